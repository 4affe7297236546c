//! Report output types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratum_shared::types::AccountId;

use crate::accounts::AccountType;
use crate::costing::ProductValuation;

/// One account's line on a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// The account.
    pub account_id: AccountId,
    /// Account name at report time.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Balance in the account's normal-balance orientation.
    pub balance: Decimal,
}

/// One account's row on the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// The account.
    pub account_id: AccountId,
    /// Account name at report time.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Balance shown in the debit column, zero if on the credit side.
    pub debit: Decimal,
    /// Balance shown in the credit column, zero if on the debit side.
    pub credit: Decimal,
}

/// Trial balance: every account with a non-zero balance, split into
/// debit and credit columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Rows in statement order.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the columns match exactly.
    pub is_balanced: bool,
}

/// The accounting equation checked against current balances.
///
/// Uses the expanded form: Assets = Liabilities + Equity + Net Income,
/// since revenue and expense accounts are never closed to equity here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingEquationReport {
    /// Total assets.
    pub assets: Decimal,
    /// Total liabilities.
    pub liabilities: Decimal,
    /// Total contributed equity.
    pub equity: Decimal,
    /// Revenue minus expenses.
    pub net_income: Decimal,
    /// Whether assets equal liabilities + equity + net income exactly.
    pub is_balanced: bool,
}

/// One side or section of the balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Accounts in the section, statement order.
    pub lines: Vec<ReportLine>,
    /// Section total.
    pub total: Decimal,
}

/// Balance sheet: assets against liabilities and equity, with current
/// period earnings folded into the equity total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Asset accounts.
    pub assets: BalanceSheetSection,
    /// Liability accounts.
    pub liabilities: BalanceSheetSection,
    /// Equity accounts, excluding current period earnings.
    pub equity: BalanceSheetSection,
    /// Revenue minus expenses, reported as current period earnings.
    pub current_period_earnings: Decimal,
    /// Liabilities + equity + current period earnings.
    pub total_liabilities_and_equity: Decimal,
    /// Whether assets match the other side exactly.
    pub is_balanced: bool,
}

/// On-hand inventory across all products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummaryReport {
    /// Per-product valuations, only products with stock on hand.
    pub products: Vec<ProductValuation>,
    /// Total inventory value.
    pub total_value: Decimal,
}
