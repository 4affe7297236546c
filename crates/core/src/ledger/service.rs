//! Posting resolution and reversal construction.
//!
//! This service contains pure business logic with no storage
//! dependencies. Account existence is supplied by the caller through a
//! lookup closure, so the same code serves any backing store.

use chrono::{DateTime, Utc};
use stratum_shared::types::{AccountId, LedgerEntryId, ScopeId, TransactionId};

use crate::reference::{Reference, ReferenceType};

use super::entry::LedgerEntry;
use super::error::LedgerError;
use super::types::{PostingInput, PostingTotals, Transaction};
use super::validation::validate_lines;

/// Prefix prepended to a reversal's description.
pub const REVERSAL_PREFIX: &str = "REVERSAL: ";

/// Information about an account needed for posting validation.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account id.
    pub id: AccountId,
    /// Whether the account is active.
    pub is_active: bool,
}

/// A fully resolved transaction ready to be written: header plus lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// The transaction header.
    pub transaction: Transaction,
    /// The transaction's lines.
    pub entries: Vec<LedgerEntry>,
    /// Debit/credit totals.
    pub totals: PostingTotals,
}

/// Posting validation and reversal construction.
pub struct LedgerService;

impl LedgerService {
    /// Validates a posting request and resolves it into a writeable
    /// transaction.
    ///
    /// Steps:
    /// 1. Validates the line set (non-empty, two-sided, positive
    ///    amounts, exactly balanced)
    /// 2. Validates each referenced account through `account_lookup`
    /// 3. Assigns the transaction and entry ids
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if any validation step fails; nothing is
    /// resolved partially.
    pub fn resolve<A>(
        scope: ScopeId,
        input: &PostingInput,
        account_lookup: A,
    ) -> Result<Posting, LedgerError>
    where
        A: Fn(AccountId) -> Result<AccountInfo, LedgerError>,
    {
        let totals = validate_lines(&input.lines)?;

        for line in &input.lines {
            let info = account_lookup(line.account_id)?;
            if !info.is_active {
                return Err(LedgerError::AccountInactive(line.account_id));
            }
        }

        let transaction_id = TransactionId::new();
        let entries = input
            .lines
            .iter()
            .map(|line| LedgerEntry {
                id: LedgerEntryId::new(),
                transaction_id,
                account_id: line.account_id,
                entry_type: line.entry_type,
                amount: line.amount,
                description: line.description.clone(),
            })
            .collect();

        Ok(Posting {
            transaction: Transaction {
                id: transaction_id,
                scope,
                description: input.description.clone(),
                transaction_date: input.transaction_date,
                reference: input.reference,
                posted_at: Utc::now(),
                reversed_by: None,
            },
            entries,
            totals,
        })
    }

    /// Builds the mirror-image reversal of a posted transaction.
    ///
    /// Every line keeps its account and amount but swaps sides, so the
    /// reversal balances whenever the original did. The reversal's
    /// description is the original's prefixed with `REVERSAL: `, and
    /// its reference points back at the original transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AlreadyReversed`] if the original already
    /// has a reversal and [`LedgerError::CannotReverseReversal`] if the
    /// original is itself a reversal.
    pub fn build_reversal(
        original: &Transaction,
        original_entries: &[LedgerEntry],
        reversal_date: DateTime<Utc>,
    ) -> Result<Posting, LedgerError> {
        if let Some(reversal) = original.reversed_by {
            return Err(LedgerError::AlreadyReversed {
                original: original.id,
                reversal,
            });
        }
        if original.reference.reference_type == ReferenceType::Reversal {
            return Err(LedgerError::CannotReverseReversal(original.id));
        }

        let transaction_id = TransactionId::new();
        let entries: Vec<LedgerEntry> = original_entries
            .iter()
            .map(|entry| LedgerEntry {
                id: LedgerEntryId::new(),
                transaction_id,
                account_id: entry.account_id,
                entry_type: entry.entry_type.opposite(),
                amount: entry.amount,
                description: entry.description.clone(),
            })
            .collect();

        let total_debit = entries.iter().map(LedgerEntry::debit_amount).sum();
        let total_credit = entries.iter().map(LedgerEntry::credit_amount).sum();

        Ok(Posting {
            transaction: Transaction {
                id: transaction_id,
                scope: original.scope,
                description: format!("{REVERSAL_PREFIX}{}", original.description),
                transaction_date: reversal_date,
                reference: Reference::to(ReferenceType::Reversal, original.id.into_inner()),
                posted_at: Utc::now(),
                reversed_by: None,
            },
            entries,
            totals: PostingTotals::new(total_debit, total_credit),
        })
    }
}
