// Error taxonomy for the directory core
// Validation / NotFound / Conflict are client-caused; Store is a defect path

use thiserror::Error;

// ============================================================================
// FORMAT ERRORS (Code Validator)
// ============================================================================

/// Input format failures. "Missing" and "malformed" are separate variants
/// so callers can pick the right user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("SwiftCode must not be null or empty")]
    MissingSwiftCode,

    #[error("Invalid swiftCode format. Expected 11 uppercase letters/numbers")]
    InvalidSwiftCode,

    #[error("Country ISO2 code must not be null or empty")]
    MissingCountryCode,

    #[error("Invalid country ISO2 code. Expected 2 uppercase letters")]
    InvalidCountryCode,
}

impl FormatError {
    /// True for the blank-input tier, false for the bad-format tier
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            FormatError::MissingSwiftCode | FormatError::MissingCountryCode
        )
    }
}

// ============================================================================
// DIRECTORY ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Validation(#[from] FormatError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Anything the store raised that is not one of the above.
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl DirectoryError {
    pub fn code_not_found() -> Self {
        DirectoryError::NotFound("No records for provided swiftCode".to_string())
    }

    pub fn country_not_found(input: &str) -> Self {
        DirectoryError::NotFound(format!("No country found for code: {}", input))
    }

    pub fn delete_target_not_found(code: &str) -> Self {
        DirectoryError::NotFound(format!(
            "No SWIFT code found with the provided code: {}",
            code
        ))
    }

    pub fn already_exists(code: &str) -> Self {
        DirectoryError::Conflict(format!("SWIFT code already exists: {}", code))
    }

    /// Validation, not-found and conflict failures are all caused by the
    /// caller and are never worth retrying.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DirectoryError::Store(_))
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_vs_malformed() {
        assert!(FormatError::MissingSwiftCode.is_missing());
        assert!(FormatError::MissingCountryCode.is_missing());
        assert!(!FormatError::InvalidSwiftCode.is_missing());
        assert!(!FormatError::InvalidCountryCode.is_missing());
    }

    #[test]
    fn test_messages_interpolate_input() {
        assert_eq!(
            DirectoryError::country_not_found("xy").to_string(),
            "No country found for code: xy"
        );
        assert_eq!(
            DirectoryError::already_exists("DEUTDEFF500").to_string(),
            "SWIFT code already exists: DEUTDEFF500"
        );
        assert_eq!(
            DirectoryError::delete_target_not_found("NONEXISTENT").to_string(),
            "No SWIFT code found with the provided code: NONEXISTENT"
        );
        assert_eq!(
            DirectoryError::from(FormatError::InvalidSwiftCode).to_string(),
            "Invalid swiftCode format. Expected 11 uppercase letters/numbers"
        );
    }

    #[test]
    fn test_store_errors_are_not_client_errors() {
        let err = DirectoryError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_client_error());
        assert!(DirectoryError::code_not_found().is_client_error());
        assert!(DirectoryError::from(FormatError::MissingSwiftCode).is_client_error());
    }
}
