// Code Validator - format checks for SWIFT and ISO2 codes
// Pure functions: no I/O, run before any store lookup

use crate::error::FormatError;

pub const SWIFT_CODE_LEN: usize = 11;
pub const COUNTRY_CODE_LEN: usize = 2;

/// Accepts exactly 11 characters drawn from `[A-Z0-9]`.
///
/// Blank input (empty or whitespace only) is reported as missing; every
/// other rejection is a format error.
pub fn validate_swift_code(code: &str) -> Result<(), FormatError> {
    if code.trim().is_empty() {
        return Err(FormatError::MissingSwiftCode);
    }

    let well_formed = code.len() == SWIFT_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());

    if !well_formed {
        return Err(FormatError::InvalidSwiftCode);
    }

    Ok(())
}

/// Accepts exactly 2 uppercase ASCII letters.
pub fn validate_country_code(code: &str) -> Result<(), FormatError> {
    if code.trim().is_empty() {
        return Err(FormatError::MissingCountryCode);
    }

    let well_formed =
        code.len() == COUNTRY_CODE_LEN && code.bytes().all(|b| b.is_ascii_uppercase());

    if !well_formed {
        return Err(FormatError::InvalidCountryCode);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_swift_codes() {
        for code in ["DEUTDEFFXXX", "DEUTDEFF500", "TESTUS12345", "AAAAAAAAAAA", "12345678901"] {
            assert_eq!(validate_swift_code(code), Ok(()), "{} should pass", code);
        }
    }

    #[test]
    fn test_blank_swift_code_is_missing() {
        assert_eq!(validate_swift_code(""), Err(FormatError::MissingSwiftCode));
        assert_eq!(validate_swift_code(" "), Err(FormatError::MissingSwiftCode));
        assert_eq!(validate_swift_code("\t  \n"), Err(FormatError::MissingSwiftCode));
    }

    #[test]
    fn test_malformed_swift_code_is_format_error() {
        let bad = [
            "invalidSWIFT",  // lowercase + 12 chars
            "DEUTDEFF50",    // 10 chars
            "DEUTDEFF5000",  // 12 chars
            "deutdeffxxx",   // lowercase
            "DEUTDEFF-XX",   // punctuation
            " DEUTDEFFXXX",  // padded
            "DEUTDEFFÄXX",   // non-ASCII
        ];

        for code in bad {
            let err = validate_swift_code(code).unwrap_err();
            assert_eq!(err, FormatError::InvalidSwiftCode, "{:?}", code);
            assert!(!err.is_missing());
        }
    }

    #[test]
    fn test_country_codes() {
        assert_eq!(validate_country_code("DE"), Ok(()));
        assert_eq!(validate_country_code("US"), Ok(()));

        assert_eq!(validate_country_code(""), Err(FormatError::MissingCountryCode));
        assert_eq!(validate_country_code("  "), Err(FormatError::MissingCountryCode));

        for code in ["de", "D", "DEU", "--", "D1", "dE"] {
            assert_eq!(
                validate_country_code(code),
                Err(FormatError::InvalidCountryCode),
                "{:?}",
                code
            );
        }
    }

    #[test]
    fn test_length_grid_never_reports_missing() {
        for len in 1..=20 {
            let code = "A".repeat(len);
            let result = validate_swift_code(&code);
            if len == SWIFT_CODE_LEN {
                assert!(result.is_ok());
            } else {
                assert_eq!(result, Err(FormatError::InvalidSwiftCode));
            }
        }
    }
}
