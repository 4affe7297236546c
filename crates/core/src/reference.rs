//! Provenance linkage back to originating business events.
//!
//! Both cost layers and ledger entries carry a [`Reference`] so every
//! inventory movement and every posting can be traced to the business
//! event that produced it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classifies the business event a record originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceType {
    /// Goods received against a purchase.
    PurchaseReceipt,
    /// Inventory contributed by the owner (ingested without a purchase).
    CapitalContribution,
    /// Quantity correction: shrinkage, damage, count correction.
    Adjustment,
    /// An assembly broken back down into components.
    Disassembly,
    /// A sale/fulfillment consuming inventory.
    Sale,
    /// Mirror-image correction of a previous transaction.
    Reversal,
}

impl ReferenceType {
    /// Stable string form, matching the persisted representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PurchaseReceipt => "PURCHASE_RECEIPT",
            Self::CapitalContribution => "CAPITAL_CONTRIBUTION",
            Self::Adjustment => "ADJUSTMENT",
            Self::Disassembly => "DISASSEMBLY",
            Self::Sale => "SALE",
            Self::Reversal => "REVERSAL",
        }
    }
}

impl std::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traceability link from a record back to its originating event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The kind of originating event.
    pub reference_type: ReferenceType,
    /// Identifier of the originating record, when one exists (e.g. the
    /// reversed transaction's UUID, or the layer created by a receipt).
    pub reference_id: Option<Uuid>,
}

impl Reference {
    /// Creates a reference with a linked record id.
    #[must_use]
    pub const fn to(reference_type: ReferenceType, reference_id: Uuid) -> Self {
        Self {
            reference_type,
            reference_id: Some(reference_id),
        }
    }

    /// Creates a reference without a linked record id.
    #[must_use]
    pub const fn bare(reference_type: ReferenceType) -> Self {
        Self {
            reference_type,
            reference_id: None,
        }
    }
}
