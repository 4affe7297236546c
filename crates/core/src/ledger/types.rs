//! Posting input and transaction types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratum_shared::types::{AccountId, ScopeId, TransactionId};

use crate::reference::Reference;

use super::entry::EntryType;

/// One requested line of a posting, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    /// Account to post to.
    pub account_id: AccountId,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Amount to post. Must be strictly positive.
    pub amount: Decimal,
    /// Optional line-level note.
    pub description: Option<String>,
}

impl LineInput {
    /// Shorthand for a line without a note.
    #[must_use]
    pub const fn new(account_id: AccountId, entry_type: EntryType, amount: Decimal) -> Self {
        Self {
            account_id,
            entry_type,
            amount,
            description: None,
        }
    }
}

/// A requested posting, before validation and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingInput {
    /// Human-readable description of the business event.
    pub description: String,
    /// Business date of the transaction.
    pub transaction_date: DateTime<Utc>,
    /// Provenance link to the originating event.
    pub reference: Reference,
    /// The lines to post.
    pub lines: Vec<LineInput>,
}

/// A posted transaction header. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Owning scope.
    pub scope: ScopeId,
    /// Human-readable description.
    pub description: String,
    /// Business date.
    pub transaction_date: DateTime<Utc>,
    /// Provenance link to the originating event.
    pub reference: Reference,
    /// When the transaction was written.
    pub posted_at: DateTime<Utc>,
    /// Set once a reversal of this transaction has been posted.
    pub reversed_by: Option<TransactionId>,
}

impl Transaction {
    /// Whether a reversal has already been posted for this transaction.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed_by.is_some()
    }
}

/// Debit/credit totals of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingTotals {
    /// Sum of all debit lines.
    pub total_debit: Decimal,
    /// Sum of all credit lines.
    pub total_credit: Decimal,
    /// Whether debits equal credits exactly.
    pub is_balanced: bool,
}

impl PostingTotals {
    /// Builds totals and checks exact balance.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }
}
