//! Catalog of engine-managed system accounts.
//!
//! Automated postings (receipts, sales, adjustments, disassemblies)
//! target these accounts. They are created lazily on first use and are
//! flagged `is_system` so they cannot be renamed or deactivated.

use serde::{Deserialize, Serialize};

use super::types::AccountType;

/// The well-known accounts the engine posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemAccount {
    /// Inventory on hand, at cost.
    InventoryAsset,
    /// Cash paid or received.
    Cash,
    /// Amounts owed to suppliers for received goods.
    AccountsPayable,
    /// Amounts owed by customers for credit sales.
    AccountsReceivable,
    /// Revenue recognized on sales.
    SalesRevenue,
    /// Cost of goods sold, matched to revenue at fulfillment.
    CostOfGoodsSold,
    /// Owner capital contributed, including ingested inventory.
    OwnerCapital,
    /// Expense absorbing inventory write-downs and disassembly losses.
    InventoryAdjustment,
}

impl SystemAccount {
    /// All system accounts, in chart order.
    pub const ALL: [Self; 8] = [
        Self::InventoryAsset,
        Self::Cash,
        Self::AccountsPayable,
        Self::AccountsReceivable,
        Self::SalesRevenue,
        Self::CostOfGoodsSold,
        Self::OwnerCapital,
        Self::InventoryAdjustment,
    ];

    /// The canonical account name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InventoryAsset => "Inventory Asset",
            Self::Cash => "Cash",
            Self::AccountsPayable => "Accounts Payable",
            Self::AccountsReceivable => "Accounts Receivable",
            Self::SalesRevenue => "Sales Revenue",
            Self::CostOfGoodsSold => "Cost of Goods Sold",
            Self::OwnerCapital => "Owner Capital",
            Self::InventoryAdjustment => "Inventory Adjustment",
        }
    }

    /// The account's classification.
    #[must_use]
    pub const fn account_type(self) -> AccountType {
        match self {
            Self::InventoryAsset | Self::Cash | Self::AccountsReceivable => AccountType::Asset,
            Self::AccountsPayable => AccountType::Liability,
            Self::OwnerCapital => AccountType::Equity,
            Self::SalesRevenue => AccountType::Revenue,
            Self::CostOfGoodsSold | Self::InventoryAdjustment => AccountType::Expense,
        }
    }

    /// The account's subtype tag.
    #[must_use]
    pub const fn subtype(self) -> &'static str {
        match self {
            Self::InventoryAsset => "INVENTORY",
            Self::Cash => "CASH",
            Self::AccountsPayable => "ACCOUNTS_PAYABLE",
            Self::AccountsReceivable => "ACCOUNTS_RECEIVABLE",
            Self::SalesRevenue => "SALES",
            Self::CostOfGoodsSold => "COGS",
            Self::OwnerCapital => "OWNER_CAPITAL",
            Self::InventoryAdjustment => "INVENTORY_ADJUSTMENT",
        }
    }
}
