//! Account domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stratum_shared::types::{AccountId, ScopeId};

use super::balance::NormalBalance;
use super::error::AccountError;

/// High-level account classification.
///
/// The five fundamental types of the accounting equation:
/// Assets = Liabilities + Equity (+ Revenue − Expenses before closing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Resources owned (cash, inventory, receivables).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual claim (capital, retained earnings).
    Equity,
    /// Income earned (sales).
    Revenue,
    /// Costs incurred (COGS, shrinkage, operating expenses).
    Expense,
}

impl AccountType {
    /// Which side increases this account.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Display ordering for statements: Asset, Liability, Equity,
    /// Revenue, Expense.
    #[must_use]
    pub const fn ordering_rank(self) -> u8 {
        match self {
            Self::Asset => 0,
            Self::Liability => 1,
            Self::Equity => 2,
            Self::Revenue => 3,
            Self::Expense => 4,
        }
    }

    /// Stable string form, matching the persisted representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chart of accounts entry.
///
/// Accounts are scope-owned and soft-deleted only: once referenced by a
/// ledger entry an account is never physically removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Owning scope.
    pub scope: ScopeId,
    /// Account name, unique among active accounts within the scope.
    pub name: String,
    /// High-level classification.
    pub account_type: AccountType,
    /// Free-form sub-classification (e.g. `CASH`, `INVENTORY`, `COGS`).
    pub subtype: Option<String>,
    /// System accounts are created by the engine and cannot be deactivated.
    pub is_system: bool,
    /// Soft-delete flag; inactive accounts are excluded from active
    /// queries but retained for referential integrity.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new active account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::EmptyName`] if the trimmed name is empty.
    pub fn new(
        scope: ScopeId,
        name: impl Into<String>,
        account_type: AccountType,
        subtype: Option<String>,
        is_system: bool,
    ) -> Result<Self, AccountError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AccountError::EmptyName);
        }

        Ok(Self {
            id: AccountId::new(),
            scope,
            name,
            account_type,
            subtype,
            is_system,
            is_active: true,
            created_at: Utc::now(),
        })
    }
}
