//! Balance arithmetic over debit/credit totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratum_shared::types::AccountId;

use super::types::AccountType;

/// The side on which an account's balance normally sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NormalBalance {
    /// Debits increase the balance (assets, expenses).
    Debit,
    /// Credits increase the balance (liabilities, equity, revenue).
    Credit,
}

impl NormalBalance {
    /// Net balance change contributed by a single entry.
    ///
    /// Debit-normal accounts grow with debits; credit-normal accounts
    /// grow with credits.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// An account's balance, derived from its posted entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account this balance belongs to.
    pub account_id: AccountId,
    /// Sum of all debit amounts posted to the account.
    pub total_debits: Decimal,
    /// Sum of all credit amounts posted to the account.
    pub total_credits: Decimal,
    /// Net balance in the account's normal-balance orientation.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Derives a balance from raw debit/credit totals.
    #[must_use]
    pub fn from_totals(
        account_id: AccountId,
        account_type: AccountType,
        total_debits: Decimal,
        total_credits: Decimal,
    ) -> Self {
        let balance = account_type
            .normal_balance()
            .balance_change(total_debits, total_credits);
        Self {
            account_id,
            total_debits,
            total_credits,
            balance,
        }
    }

    /// A zero balance for an account with no entries.
    #[must_use]
    pub fn zero(account_id: AccountId) -> Self {
        Self {
            account_id,
            total_debits: Decimal::ZERO,
            total_credits: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}
