use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for characteristic machine keys (the JSON key in product specs)
    /// Must be lowercase alphanumeric with underscores
    /// - Valid: "cpu", "print_speed", "a4_capacity"
    /// - Invalid: "_cpu", "cpu_", "cpu__speed", "Cpu", "cpu-speed"
    pub static ref KEY_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap();

    /// Regex for category and product slugs
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "office-chairs", "printers", "a4-paper"
    /// - Invalid: "-printers", "printers-", "office--chairs", "Printers", "office_chairs"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_regex_valid() {
        assert!(KEY_REGEX.is_match("cpu"));
        assert!(KEY_REGEX.is_match("print_speed"));
        assert!(KEY_REGEX.is_match("a4_capacity"));
        assert!(KEY_REGEX.is_match("x"));
        assert!(KEY_REGEX.is_match("ppm300"));
    }

    #[test]
    fn test_key_regex_invalid() {
        assert!(!KEY_REGEX.is_match("_cpu")); // starts with underscore
        assert!(!KEY_REGEX.is_match("cpu_")); // ends with underscore
        assert!(!KEY_REGEX.is_match("cpu__speed")); // double underscore
        assert!(!KEY_REGEX.is_match("Cpu")); // uppercase
        assert!(!KEY_REGEX.is_match("cpu-speed")); // hyphen
        assert!(!KEY_REGEX.is_match("")); // empty
        assert!(!KEY_REGEX.is_match("cpu speed")); // space
    }

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("office-chairs"));
        assert!(SLUG_REGEX.is_match("printers"));
        assert!(SLUG_REGEX.is_match("a4-paper"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-printers")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("printers-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("office--chairs")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Printers")); // uppercase
        assert!(!SLUG_REGEX.is_match("office_chairs")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
    }
}
