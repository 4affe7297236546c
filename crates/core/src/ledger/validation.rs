//! Business rule validation for postings.

use rust_decimal::Decimal;

use super::entry::EntryType;
use super::error::LedgerError;
use super::types::{LineInput, PostingTotals};

/// Validates a set of posting lines and computes their totals.
///
/// Rules enforced:
/// - at least one line
/// - both a debit and a credit side present
/// - every amount strictly positive
/// - total debits equal total credits exactly
///
/// # Errors
///
/// Returns the first rule violation found.
pub fn validate_lines(lines: &[LineInput]) -> Result<PostingTotals, LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::EmptyTransaction);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for line in lines {
        if line.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if line.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }

        match line.entry_type {
            EntryType::Debit => {
                total_debit += line.amount;
                has_debit = true;
            }
            EntryType::Credit => {
                total_credit += line.amount;
                has_credit = true;
            }
        }
    }

    if !has_debit || !has_credit {
        return Err(LedgerError::SingleSided);
    }

    let totals = PostingTotals::new(total_debit, total_credit);
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedTransaction {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok(totals)
}
