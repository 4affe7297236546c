//! Report construction over balance and layer snapshots.

use rust_decimal::Decimal;

use crate::accounts::{Account, AccountBalance, AccountType, NormalBalance};
use crate::costing::{CostLayer, ProductValuation};

use super::types::{
    AccountingEquationReport, BalanceSheetReport, BalanceSheetSection, InventorySummaryReport,
    ReportLine, TrialBalanceReport, TrialBalanceRow,
};

/// Pure report construction. Callers supply a consistent snapshot of
/// accounts with their balances, or of cost layers.
pub struct ReportService;

impl ReportService {
    /// Builds the trial balance from account balances.
    ///
    /// Accounts with a zero balance are omitted. A positive balance
    /// lands in the account's normal-balance column; a negative
    /// balance flips to the opposite column with its sign dropped.
    #[must_use]
    pub fn trial_balance(balances: &[(Account, AccountBalance)]) -> TrialBalanceReport {
        let mut rows: Vec<TrialBalanceRow> = balances
            .iter()
            .filter(|(_, balance)| balance.balance != Decimal::ZERO)
            .map(|(account, balance)| {
                let normal = account.account_type.normal_balance();
                let amount = balance.balance.abs();
                let side = if balance.balance > Decimal::ZERO {
                    normal
                } else {
                    match normal {
                        NormalBalance::Debit => NormalBalance::Credit,
                        NormalBalance::Credit => NormalBalance::Debit,
                    }
                };
                let (debit, credit) = match side {
                    NormalBalance::Debit => (amount, Decimal::ZERO),
                    NormalBalance::Credit => (Decimal::ZERO, amount),
                };
                TrialBalanceRow {
                    account_id: account.id,
                    name: account.name.clone(),
                    account_type: account.account_type,
                    debit,
                    credit,
                }
            })
            .collect();
        Self::sort_statement_order(&mut rows, |r| (r.account_type, r.name.clone()));

        let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();

        TrialBalanceReport {
            rows,
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Checks the expanded accounting equation against current
    /// balances: Assets = Liabilities + Equity + Net Income.
    #[must_use]
    pub fn accounting_equation(balances: &[(Account, AccountBalance)]) -> AccountingEquationReport {
        let sum_type = |account_type: AccountType| -> Decimal {
            balances
                .iter()
                .filter(|(account, _)| account.account_type == account_type)
                .map(|(_, balance)| balance.balance)
                .sum()
        };

        let assets = sum_type(AccountType::Asset);
        let liabilities = sum_type(AccountType::Liability);
        let equity = sum_type(AccountType::Equity);
        let net_income = sum_type(AccountType::Revenue) - sum_type(AccountType::Expense);

        AccountingEquationReport {
            assets,
            liabilities,
            equity,
            net_income,
            is_balanced: assets == liabilities + equity + net_income,
        }
    }

    /// Builds the balance sheet, folding current period earnings into
    /// the liabilities-and-equity side.
    #[must_use]
    pub fn balance_sheet(balances: &[(Account, AccountBalance)]) -> BalanceSheetReport {
        let assets = Self::section(balances, AccountType::Asset);
        let liabilities = Self::section(balances, AccountType::Liability);
        let equity = Self::section(balances, AccountType::Equity);

        let equation = Self::accounting_equation(balances);
        let total_liabilities_and_equity =
            liabilities.total + equity.total + equation.net_income;

        BalanceSheetReport {
            is_balanced: assets.total == total_liabilities_and_equity,
            current_period_earnings: equation.net_income,
            total_liabilities_and_equity,
            assets,
            liabilities,
            equity,
        }
    }

    /// Summarizes on-hand inventory per product. Products with no
    /// remaining stock are omitted.
    #[must_use]
    pub fn inventory_summary(layers: &[CostLayer]) -> InventorySummaryReport {
        let mut product_ids: Vec<_> = layers
            .iter()
            .filter(|l| l.has_remaining())
            .map(|l| l.product)
            .collect();
        product_ids.sort_unstable();
        product_ids.dedup();

        let products: Vec<ProductValuation> = product_ids
            .into_iter()
            .map(|product| ProductValuation::from_layers(product, layers))
            .collect();
        let total_value = products.iter().map(|p| p.total_value).sum();

        InventorySummaryReport {
            products,
            total_value,
        }
    }

    fn section(
        balances: &[(Account, AccountBalance)],
        account_type: AccountType,
    ) -> BalanceSheetSection {
        let mut lines: Vec<ReportLine> = balances
            .iter()
            .filter(|(account, balance)| {
                account.account_type == account_type && balance.balance != Decimal::ZERO
            })
            .map(|(account, balance)| ReportLine {
                account_id: account.id,
                name: account.name.clone(),
                account_type: account.account_type,
                balance: balance.balance,
            })
            .collect();
        Self::sort_statement_order(&mut lines, |l| (l.account_type, l.name.clone()));

        let total = lines.iter().map(|l| l.balance).sum();
        BalanceSheetSection { lines, total }
    }

    fn sort_statement_order<T, K>(items: &mut [T], key: K)
    where
        K: Fn(&T) -> (AccountType, String),
    {
        items.sort_by(|a, b| {
            let (type_a, name_a) = key(a);
            let (type_b, name_b) = key(b);
            type_a
                .ordering_rank()
                .cmp(&type_b.ordering_rank())
                .then_with(|| name_a.cmp(&name_b))
        });
    }
}
