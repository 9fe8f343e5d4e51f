//! Statement date parsing across the formats Nigerian banks print.

use chrono::NaiveDate;

/// Date formats observed in exported statements, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%d-%b-%Y", // 05-Jan-2024
    "%d/%m/%Y", // 05/01/2024
    "%Y-%m-%d", // 2024-01-05
    "%d-%m-%Y", // 05-01-2024
    "%d %b %Y", // 05 Jan 2024
    "%d-%b-%y", // 05-Jan-24
];

/// Parse a raw statement date string, or `None` if no known format matches.
///
/// Grouping compares date strings verbatim and never needs this; it exists
/// for row extraction (is this cell a date?) and downstream reporting.
pub fn parse_statement_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_statement_date("05-Jan-2024"), Some(expected));
        assert_eq!(parse_statement_date("05/01/2024"), Some(expected));
        assert_eq!(parse_statement_date("2024-01-05"), Some(expected));
        assert_eq!(parse_statement_date("05 Jan 2024"), Some(expected));
    }

    #[test]
    fn test_parse_uppercase_month() {
        // Statements often shout: 05-JAN-2024
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_statement_date("05-JAN-2024"), Some(expected));
    }

    #[test]
    fn test_non_date_is_none() {
        assert_eq!(parse_statement_date("BALANCE B/F"), None);
        assert_eq!(parse_statement_date(""), None);
    }
}
