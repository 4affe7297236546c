//! Ledger entry types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratum_shared::types::{AccountId, LedgerEntryId, TransactionId};

/// Which side of the ledger an entry posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    /// Left side: increases assets and expenses.
    Debit,
    /// Right side: increases liabilities, equity, and revenue.
    Credit,
}

impl EntryType {
    /// The mirror side, used when building reversals.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// A single line of a posted transaction. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier.
    pub id: LedgerEntryId,
    /// The transaction this line belongs to.
    pub transaction_id: TransactionId,
    /// The account posted to.
    pub account_id: AccountId,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Amount posted. Always strictly positive.
    pub amount: Decimal,
    /// Optional line-level note.
    pub description: Option<String>,
}

impl LedgerEntry {
    /// Amount on the debit side, zero for credit entries.
    #[must_use]
    pub fn debit_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount,
            EntryType::Credit => Decimal::ZERO,
        }
    }

    /// Amount on the credit side, zero for debit entries.
    #[must_use]
    pub fn credit_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => Decimal::ZERO,
            EntryType::Credit => self.amount,
        }
    }
}
