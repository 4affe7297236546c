//! Property-based tests for posting resolution and reversals.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use stratum_shared::types::{AccountId, ScopeId};

use crate::reference::{Reference, ReferenceType};

use super::entry::EntryType;
use super::service::{AccountInfo, LedgerService};
use super::types::{LineInput, PostingInput};

fn ok_lookup(id: AccountId) -> Result<AccountInfo, super::error::LedgerError> {
    Ok(AccountInfo { id, is_active: true })
}

/// Builds a balanced posting by crediting the exact sum of the debits.
fn balanced_input(debit_cents: &[u32]) -> PostingInput {
    let mut lines: Vec<LineInput> = debit_cents
        .iter()
        .map(|&cents| {
            LineInput::new(
                AccountId::new(),
                EntryType::Debit,
                Decimal::new(i64::from(cents), 2),
            )
        })
        .collect();
    let total: Decimal = lines.iter().map(|l| l.amount).sum();
    lines.push(LineInput::new(AccountId::new(), EntryType::Credit, total));

    PostingInput {
        description: "Posting".to_string(),
        transaction_date: Utc::now(),
        reference: Reference::bare(ReferenceType::Adjustment),
        lines,
    }
}

proptest! {
    /// Any balanced input resolves, and the resolved totals match the
    /// input lines exactly.
    #[test]
    fn prop_balanced_inputs_resolve(debits in prop::collection::vec(1u32..=1_000_000, 1..6)) {
        let input = balanced_input(&debits);
        let posting = LedgerService::resolve(ScopeId::new(), &input, ok_lookup).unwrap();

        prop_assert!(posting.totals.is_balanced);
        let expected: Decimal = debits.iter().map(|&c| Decimal::new(i64::from(c), 2)).sum();
        prop_assert_eq!(posting.totals.total_debit, expected);
        prop_assert_eq!(posting.totals.total_credit, expected);
    }

    /// A reversal is always balanced and nets the original to zero on
    /// every account.
    #[test]
    fn prop_reversal_nets_to_zero(debits in prop::collection::vec(1u32..=1_000_000, 1..6)) {
        let input = balanced_input(&debits);
        let posting = LedgerService::resolve(ScopeId::new(), &input, ok_lookup).unwrap();
        let reversal =
            LedgerService::build_reversal(&posting.transaction, &posting.entries, Utc::now())
                .unwrap();

        prop_assert!(reversal.totals.is_balanced);
        for (original, mirrored) in posting.entries.iter().zip(&reversal.entries) {
            prop_assert_eq!(mirrored.account_id, original.account_id);
            let net = original.debit_amount() - original.credit_amount()
                + mirrored.debit_amount()
                - mirrored.credit_amount();
            prop_assert_eq!(net, Decimal::ZERO);
        }
    }

    /// Perturbing one amount in a multi-line posting always breaks
    /// balance validation.
    #[test]
    fn prop_perturbed_inputs_are_rejected(
        debits in prop::collection::vec(1u32..=1_000_000, 1..6),
        bump in 1u32..=1_000,
    ) {
        let mut input = balanced_input(&debits);
        input.lines[0].amount += Decimal::new(i64::from(bump), 2);

        let result = LedgerService::resolve(ScopeId::new(), &input, ok_lookup);
        let is_unbalanced = matches!(
            result,
            Err(super::error::LedgerError::UnbalancedTransaction { .. })
        );
        prop_assert!(is_unbalanced);
    }
}
