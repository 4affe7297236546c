//! Engine error type.

use stratum_core::accounts::AccountError;
use stratum_core::costing::CostingError;
use stratum_core::ledger::LedgerError;
use stratum_shared::error::{AppError, ErrorKind};
use stratum_shared::types::ScopeId;
use thiserror::Error;

/// Result type alias using `EngineError`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Account registry error.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Costing error.
    #[error(transparent)]
    Costing(#[from] CostingError),

    /// Ledger error.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The scope was modified between the caller's read and this write.
    /// Never retried internally; the caller decides whether to re-read
    /// and resubmit.
    #[error("Scope {scope} was modified concurrently: expected version {expected}, found {actual}")]
    ConcurrentModification {
        /// The scope that changed underneath the caller.
        scope: ScopeId,
        /// The version the caller based its request on.
        expected: u64,
        /// The version actually found.
        actual: u64,
    },

    /// A post-commit check found corrupted state. The offending write
    /// is rolled back and the corruption is never masked.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The request itself is malformed.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl EngineError {
    /// Broad classification, for callers that branch on category
    /// rather than variant.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Account(err) => match err {
                AccountError::EmptyName => ErrorKind::Validation,
                AccountError::DuplicateName(_)
                | AccountError::NotFound(_)
                | AccountError::Inactive(_)
                | AccountError::SystemAccountImmutable(_) => ErrorKind::State,
            },
            Self::Costing(err) => match err {
                CostingError::InvalidQuantity(_) | CostingError::InvalidUnitCost(_) => {
                    ErrorKind::Validation
                }
                CostingError::InsufficientInventory { .. } | CostingError::LayerNotFound(_) => {
                    ErrorKind::State
                }
                CostingError::ConsumeExceedsRemaining { .. }
                | CostingError::RestoreExceedsReceived { .. } => ErrorKind::State,
            },
            Self::Ledger(err) => match err {
                LedgerError::EmptyTransaction
                | LedgerError::SingleSided
                | LedgerError::UnbalancedTransaction { .. }
                | LedgerError::ZeroAmount
                | LedgerError::NegativeAmount => ErrorKind::Validation,
                LedgerError::AccountNotFound(_)
                | LedgerError::AccountInactive(_)
                | LedgerError::DuplicateTransaction(_)
                | LedgerError::TransactionNotFound(_)
                | LedgerError::AlreadyReversed { .. }
                | LedgerError::CannotReverseReversal(_) => ErrorKind::State,
            },
            Self::ConcurrentModification { .. } => ErrorKind::Concurrency,
            Self::InvariantViolation(_) => ErrorKind::Invariant,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Account(err) => err.error_code(),
            Self::Costing(err) => err.error_code(),
            Self::Ledger(err) => err.error_code(),
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Whether the caller may retry the same request unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Concurrency
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => Self::Validation(message),
            ErrorKind::State => match &err {
                EngineError::Account(AccountError::NotFound(_))
                | EngineError::Costing(CostingError::LayerNotFound(_))
                | EngineError::Ledger(LedgerError::TransactionNotFound(_)) => {
                    Self::NotFound(message)
                }
                EngineError::Account(AccountError::DuplicateName(_))
                | EngineError::Ledger(LedgerError::DuplicateTransaction(_))
                | EngineError::Ledger(LedgerError::AlreadyReversed { .. }) => {
                    Self::Conflict(message)
                }
                _ => Self::BusinessRule(message),
            },
            ErrorKind::Concurrency => Self::Concurrency(message),
            ErrorKind::Invariant => Self::Invariant(message),
            ErrorKind::Internal => Self::Internal(message),
        }
    }
}
