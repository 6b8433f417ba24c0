//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret in `Debug` output.
///
/// Empty secrets render as `EMPTY` so that a missing token secret is still
/// visible while debugging a signature mismatch. Anything else renders as
/// `***` followed by its byte length.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("EMPTY")
        } else {
            write!(f, "***({} bytes)", self.0.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let cases = vec![
            ("kd94hf93k423kf44", "***(16 bytes)"),
            ("pfkkdhi9sl3r4s00", "***(16 bytes)"),
            ("&", "***(1 bytes)"),
            ("", "EMPTY"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact(input)),
                expected,
                "Failed on input: {}",
                input
            );
        }
    }

    #[test]
    fn test_redact_option() {
        assert_eq!(format!("{:?}", Redact::from(&None)), "EMPTY");
        assert_eq!(
            format!("{:?}", Redact::from(&Some("secret".to_string()))),
            "***(6 bytes)"
        );
    }
}
