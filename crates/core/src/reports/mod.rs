//! Derived financial and inventory reports.
//!
//! Reports are pure functions over account balances and cost layers.
//! Nothing here mutates state; the caller supplies a consistent
//! snapshot and gets a report back.

pub mod service;
pub mod types;

pub use service::ReportService;
pub use types::{
    AccountingEquationReport, BalanceSheetReport, BalanceSheetSection, InventorySummaryReport,
    ReportLine, TrialBalanceReport, TrialBalanceRow,
};
