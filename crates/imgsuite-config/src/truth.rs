//! Truthiness of configuration values.
//!
//! Values coming from the build configuration and the process environment are plain strings.
//! A value is false if it is empty, one of `0`, `OFF`, `NO`, `FALSE`, `N`, `IGNORE`, `NOTFOUND`,
//! or ends with `-NOTFOUND` (all case-insensitive). Any other value is true.

const FALSE_CONSTANTS: &[&str] = &["0", "OFF", "NO", "FALSE", "N", "IGNORE", "NOTFOUND"];

/// Returns whether the given value is true.
pub fn is_true(value: &str) -> bool {
    !is_false(value)
}

/// Returns whether the given value is false.
pub fn is_false(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }

    let upper = value.to_ascii_uppercase();
    FALSE_CONSTANTS.contains(&upper.as_str()) || upper.ends_with("-NOTFOUND")
}

/// Parses a value as a boolean flag, for settings that must be either on or off.
///
/// Unlike [`is_true`], unknown words are rejected.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_uppercase().as_str() {
        "1" | "ON" | "YES" | "TRUE" | "Y" => Some(true),
        "0" | "OFF" | "NO" | "FALSE" | "N" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn false_constants() {
        for value in ["0", "off", "No", "FALSE", "n", "ignore", "NOTFOUND", "", "  "] {
            assert!(is_false(value), "{value:?} should be false");
        }
    }

    #[test]
    fn notfound_suffix() {
        assert!(is_false("PNG-NOTFOUND"));
        assert!(is_false("libpng-notfound"));
        assert!(is_true("NOTFOUND-PNG"));
    }

    #[test]
    fn true_values() {
        for value in ["1", "ON", "yes", "true", "Y", "2", "/usr/lib/libpng.so"] {
            assert!(is_true(value), "{value:?} should be true");
        }
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("on"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
