//! Bank detection from raw statement text.

use crate::registry::{BankRegistry, GENERIC_BANK};

/// Identify the issuing bank by scanning for its signature substrings.
///
/// Banks are checked in registration order and the first match wins, so
/// detection is deterministic even when several signatures occur. No match
/// is a valid outcome and yields the generic identifier; this never fails.
pub fn detect_bank(raw_text: &str, registry: &BankRegistry) -> String {
    let upper = raw_text.to_uppercase();
    for bank in registry.banks() {
        if bank
            .detection_patterns
            .iter()
            .any(|pattern| upper.contains(pattern.as_str()))
        {
            return bank.id.clone();
        }
    }
    GENERIC_BANK.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_gtbank() {
        let registry = BankRegistry::builtin();
        let text = "Page 1 of 3\nGUARANTY TRUST BANK STATEMENT OF ACCOUNT\n...";
        assert_eq!(detect_bank(text, &registry), "gtbank");
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let registry = BankRegistry::builtin();
        assert_eq!(detect_bank("zenith bank plc e-statement", &registry), "zenith");
    }

    #[test]
    fn test_no_match_is_generic() {
        let registry = BankRegistry::builtin();
        assert_eq!(detect_bank("SOME MICROFINANCE BANK", &registry), GENERIC_BANK);
        assert_eq!(detect_bank("", &registry), GENERIC_BANK);
    }

    #[test]
    fn test_registration_order_breaks_ties() {
        let registry = BankRegistry::builtin();
        // Text mentioning two banks: the earlier-registered one wins.
        let text = "ACCESS BANK transfer received from FIRSTBANK account";
        assert_eq!(detect_bank(text, &registry), "firstbank");
    }

    #[test]
    fn test_detection_is_deterministic() {
        let registry = BankRegistry::builtin();
        let text = "UNITED BANK FOR AFRICA monthly statement";
        let first = detect_bank(text, &registry);
        for _ in 0..10 {
            assert_eq!(detect_bank(text, &registry), first);
        }
    }
}
