//! Ledger errors.

use rust_decimal::Decimal;
use stratum_shared::types::{AccountId, TransactionId};
use thiserror::Error;

/// Errors raised by posting validation and reversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Posting has no lines.
    #[error("Transaction must have at least one line")]
    EmptyTransaction,

    /// All lines are on one side of the ledger.
    #[error("Transaction must have both debit and credit lines")]
    SingleSided,

    /// Debits and credits do not match exactly.
    #[error("Transaction is unbalanced: debits ({debit}) != credits ({credit})")]
    UnbalancedTransaction {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// A line amount is zero.
    #[error("Line amount must be non-zero")]
    ZeroAmount,

    /// A line amount is negative.
    #[error("Line amount must be positive")]
    NegativeAmount,

    /// A line references an account that does not exist in the scope.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// A line references a deactivated account.
    #[error("Account is inactive: {0}")]
    AccountInactive(AccountId),

    /// A transaction with this id has already been posted.
    #[error("Transaction already exists: {0}")]
    DuplicateTransaction(TransactionId),

    /// No transaction with the given id exists in the scope.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// The transaction has already been reversed.
    #[error("Transaction {original} was already reversed by {reversal}")]
    AlreadyReversed {
        /// The transaction a reversal was requested for.
        original: TransactionId,
        /// The reversal already posted.
        reversal: TransactionId,
    },

    /// Reversals cannot themselves be reversed.
    #[error("Transaction {0} is a reversal and cannot be reversed")]
    CannotReverseReversal(TransactionId),
}

impl LedgerError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTransaction => "LEDGER_EMPTY_TRANSACTION",
            Self::SingleSided => "LEDGER_SINGLE_SIDED",
            Self::UnbalancedTransaction { .. } => "LEDGER_UNBALANCED",
            Self::ZeroAmount => "LEDGER_ZERO_AMOUNT",
            Self::NegativeAmount => "LEDGER_NEGATIVE_AMOUNT",
            Self::AccountNotFound(_) => "LEDGER_ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "LEDGER_ACCOUNT_INACTIVE",
            Self::DuplicateTransaction(_) => "LEDGER_DUPLICATE_TRANSACTION",
            Self::TransactionNotFound(_) => "LEDGER_TRANSACTION_NOT_FOUND",
            Self::AlreadyReversed { .. } => "LEDGER_ALREADY_REVERSED",
            Self::CannotReverseReversal(_) => "LEDGER_CANNOT_REVERSE_REVERSAL",
        }
    }
}
