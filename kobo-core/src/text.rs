//! Description cleaning shared by the normalizer and the grouper.

/// Characters that are statement-export noise and never carry meaning.
pub const NOISE_SYMBOLS: [char; 4] = ['*', '#', '~', '`'];

/// Delimiter characters that show up as repeated runs in exported text.
pub const DELIMITER_SYMBOLS: [char; 3] = ['|', '-', '='];

/// Clean a transaction narration for display and categorization:
/// drop noise symbols, collapse delimiter runs to a single character,
/// collapse all whitespace runs to single spaces, and trim.
pub fn clean_description(raw: &str) -> String {
    let mut stripped = String::with_capacity(raw.len());
    let mut prev_delimiter: Option<char> = None;
    for c in raw.chars() {
        if NOISE_SYMBOLS.contains(&c) {
            continue;
        }
        if DELIMITER_SYMBOLS.contains(&c) {
            if prev_delimiter == Some(c) {
                continue;
            }
            prev_delimiter = Some(c);
        } else {
            prev_delimiter = None;
        }
        stripped.push(c);
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_noise_symbols() {
        assert_eq!(
            clean_description("NIP TRANSFER***JOHN DOE###"),
            "NIP TRANSFERJOHN DOE"
        );
    }

    #[test]
    fn test_collapses_delimiter_runs() {
        assert_eq!(
            clean_description("POS PURCHASE||SHOPRITE---LAGOS"),
            "POS PURCHASE|SHOPRITE-LAGOS"
        );
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            clean_description("  TRF   TO\tJOHN   DOE  "),
            "TRF TO JOHN DOE"
        );
    }

    #[test]
    fn test_plain_description_unchanged() {
        assert_eq!(
            clean_description("SALARY PAYMENT JAN"),
            "SALARY PAYMENT JAN"
        );
    }
}
