use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating mobile numbers in E.164-ish form
    /// - Valid: "+919876543210", "919876543210", "9876543210"
    /// - Invalid: "98765", "+91-98-76", "abcdefghij"
    pub static ref MOBILE_NUMBER_REGEX: Regex = Regex::new(r"^\+?[1-9]\d{9,14}$").unwrap();

    static ref NON_DIGIT_REGEX: Regex = Regex::new(r"\D").unwrap();
}

/// Normalize a mobile number to E.164 format.
///
/// Numbers without a country code are assumed to be Indian (+91):
/// - "9876543210"      -> "+919876543210"
/// - "919876543210"    -> "+919876543210"
/// - "+91 98765 43210" -> "+919876543210"
pub fn normalize_mobile_number(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix('+') {
        let digits = NON_DIGIT_REGEX.replace_all(rest, "");
        format!("+{}", digits)
    } else {
        let digits = NON_DIGIT_REGEX.replace_all(raw, "").into_owned();
        if !digits.starts_with("91") || digits.len() == 10 {
            format!("+91{}", digits)
        } else {
            format!("+{}", digits)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_regex_valid() {
        assert!(MOBILE_NUMBER_REGEX.is_match("+919876543210"));
        assert!(MOBILE_NUMBER_REGEX.is_match("919876543210"));
        assert!(MOBILE_NUMBER_REGEX.is_match("9876543210"));
    }

    #[test]
    fn test_mobile_regex_invalid() {
        assert!(!MOBILE_NUMBER_REGEX.is_match("98765")); // too short
        assert!(!MOBILE_NUMBER_REGEX.is_match("0987654321")); // leading zero
        assert!(!MOBILE_NUMBER_REGEX.is_match("+91 9876543210")); // space
        assert!(!MOBILE_NUMBER_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_normalize_bare_ten_digits() {
        assert_eq!(normalize_mobile_number("9876543210"), "+919876543210");
    }

    #[test]
    fn test_normalize_with_country_code() {
        assert_eq!(normalize_mobile_number("919876543210"), "+919876543210");
        assert_eq!(normalize_mobile_number("+919876543210"), "+919876543210");
    }

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(normalize_mobile_number("+91 98765 43210"), "+919876543210");
    }
}
