//! Account operation errors.

use thiserror::Error;

/// Errors raised by account registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Account name is empty after trimming.
    #[error("Account name cannot be empty")]
    EmptyName,

    /// An active account with the same name already exists in the scope.
    #[error("Account '{0}' already exists")]
    DuplicateName(String),

    /// No account with the given id exists in the scope.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The account exists but is deactivated.
    #[error("Account '{0}' is inactive")]
    Inactive(String),

    /// System accounts cannot be renamed or deactivated.
    #[error("Account '{0}' is a system account and cannot be modified")]
    SystemAccountImmutable(String),
}

impl AccountError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "ACCOUNT_NAME_EMPTY",
            Self::DuplicateName(_) => "ACCOUNT_NAME_DUPLICATE",
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Inactive(_) => "ACCOUNT_INACTIVE",
            Self::SystemAccountImmutable(_) => "ACCOUNT_SYSTEM_IMMUTABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_messages() {
        let err = AccountError::DuplicateName("Cash".into());
        assert_eq!(err.error_code(), "ACCOUNT_NAME_DUPLICATE");
        assert_eq!(err.to_string(), "Account 'Cash' already exists");

        let err = AccountError::SystemAccountImmutable("Inventory Asset".into());
        assert_eq!(err.error_code(), "ACCOUNT_SYSTEM_IMMUTABLE");
    }
}
