//! Pure field predicates shared by the step gate and real-time input checks

use chrono::{Days, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Nigerian mobile number: `+234`/`234`/`0` prefix, then [789][01] and 8 digits
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+?234|0)[789][01]\d{8}$").expect("valid phone regex"));

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Message attached to a phone field holding an invalid number
pub const PHONE_INVALID_MESSAGE: &str =
    "Please enter a valid Nigerian phone number (e.g., 08012345678)";

/// Message attached to an email field holding an invalid address
pub const EMAIL_INVALID_MESSAGE: &str = "Please enter a valid email address";

/// Date format used by date fields and the submission body
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Check a phone number, ignoring any whitespace inside it
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_REGEX.is_match(&compact)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// True when the value is empty after trimming
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Earliest date a pickup may be scheduled for: the day after `today`
pub fn min_pickup_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

/// Parse a `YYYY-MM-DD` value
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// A date value is valid when it parses and is not before `min`
pub fn is_valid_pickup_date(value: &str, min: Option<NaiveDate>) -> bool {
    match (parse_date(value), min) {
        (Some(date), Some(min)) => date >= min,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod phone {
        use super::*;

        #[test]
        fn test_local_prefix() {
            assert!(is_valid_phone("08012345678"));
            assert!(is_valid_phone("09112345678"));
            assert!(is_valid_phone("07012345678"));
        }

        #[test]
        fn test_international_prefixes() {
            assert!(is_valid_phone("+2348012345678"));
            assert!(is_valid_phone("2348012345678"));
        }

        #[test]
        fn test_whitespace_is_ignored() {
            assert!(is_valid_phone("0801 234 5678"));
            assert!(is_valid_phone(" +234 801 234 5678 "));
        }

        #[test]
        fn test_too_short() {
            assert!(!is_valid_phone("0811234567"));
        }

        #[test]
        fn test_too_long() {
            assert!(!is_valid_phone("080123456789"));
        }

        #[test]
        fn test_bad_network_digit() {
            // second digit must be 7, 8 or 9
            assert!(!is_valid_phone("06012345678"));
            // third digit must be 0 or 1
            assert!(!is_valid_phone("07212345678"));
        }

        #[test]
        fn test_missing_prefix() {
            assert!(!is_valid_phone("8012345678"));
            assert!(!is_valid_phone("+448012345678"));
        }

        #[test]
        fn test_non_digits() {
            assert!(!is_valid_phone("0801234567a"));
            assert!(!is_valid_phone(""));
        }
    }

    mod email {
        use super::*;

        #[test]
        fn test_valid() {
            assert!(is_valid_email("a@b.co"));
            assert!(is_valid_email("ada.obi@relief.org.ng"));
        }

        #[test]
        fn test_missing_tld() {
            assert!(!is_valid_email("a@b"));
        }

        #[test]
        fn test_embedded_whitespace() {
            assert!(!is_valid_email("a b@c.com"));
            assert!(!is_valid_email("a@c .com"));
        }

        #[test]
        fn test_missing_parts() {
            assert!(!is_valid_email("@b.co"));
            assert!(!is_valid_email("a@.co"));
            assert!(!is_valid_email("plainaddress"));
        }
    }

    mod dates {
        use super::*;

        fn date(y: i32, m: u32, d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        }

        #[test]
        fn test_min_pickup_date_is_tomorrow() {
            assert_eq!(min_pickup_date(date(2024, 8, 30)), date(2024, 8, 31));
            assert_eq!(min_pickup_date(date(2024, 12, 31)), date(2025, 1, 1));
        }

        #[test]
        fn test_pickup_date_respects_minimum() {
            let min = Some(date(2024, 9, 1));
            assert!(is_valid_pickup_date("2024-09-01", min));
            assert!(is_valid_pickup_date("2024-09-15", min));
            assert!(!is_valid_pickup_date("2024-08-31", min));
        }

        #[test]
        fn test_pickup_date_rejects_garbage() {
            assert!(!is_valid_pickup_date("tomorrow", None));
            assert!(!is_valid_pickup_date("2024-13-01", None));
            assert!(is_valid_pickup_date("2024-02-29", None));
        }
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank(" x "));
    }
}
