//! Report queries over committed scope state.

use stratum_core::accounts::AccountBalance;
use stratum_core::reports::{
    AccountingEquationReport, BalanceSheetReport, InventorySummaryReport, ReportService,
    TrialBalanceReport,
};
use stratum_shared::types::ScopeId;

use crate::store::ScopeState;
use crate::Engine;

fn balances(state: &ScopeState) -> Vec<(stratum_core::accounts::Account, AccountBalance)> {
    state
        .accounts
        .values()
        .map(|account| {
            let (debits, credits) = state.debit_credit_totals(account.id);
            let balance =
                AccountBalance::from_totals(account.id, account.account_type, debits, credits);
            (account.clone(), balance)
        })
        .collect()
}

impl Engine {
    /// Trial balance over all accounts with a non-zero balance.
    #[must_use]
    pub fn trial_balance(&self, scope: ScopeId) -> TrialBalanceReport {
        self.store
            .read(scope, |state| ReportService::trial_balance(&balances(state)))
    }

    /// The expanded accounting equation checked against current
    /// balances.
    #[must_use]
    pub fn accounting_equation(&self, scope: ScopeId) -> AccountingEquationReport {
        self.store.read(scope, |state| {
            ReportService::accounting_equation(&balances(state))
        })
    }

    /// Balance sheet with current period earnings folded into equity.
    #[must_use]
    pub fn balance_sheet(&self, scope: ScopeId) -> BalanceSheetReport {
        self.store
            .read(scope, |state| ReportService::balance_sheet(&balances(state)))
    }

    /// On-hand inventory value per product.
    #[must_use]
    pub fn inventory_summary(&self, scope: ScopeId) -> InventorySummaryReport {
        self.store
            .read(scope, |state| ReportService::inventory_summary(&state.layers))
    }
}
