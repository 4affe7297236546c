//! Costing errors.

use rust_decimal::Decimal;
use stratum_shared::types::{LayerId, ProductId};
use thiserror::Error;

/// Errors raised by cost layer operations and FIFO planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostingError {
    /// Quantity must be strictly positive.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(Decimal),

    /// Unit cost must be non-negative.
    #[error("Unit cost cannot be negative, got {0}")]
    InvalidUnitCost(Decimal),

    /// The product does not hold enough units to cover the request.
    #[error(
        "Insufficient inventory for product {product}: requested {requested}, available {available}"
    )]
    InsufficientInventory {
        /// Product short of stock.
        product: ProductId,
        /// Units requested.
        requested: Decimal,
        /// Units actually available across all layers.
        available: Decimal,
    },

    /// No layer with the given id exists in the scope.
    #[error("Cost layer not found: {0}")]
    LayerNotFound(LayerId),

    /// A consume would drive a layer's remaining quantity negative.
    #[error("Cannot consume {requested} from layer {layer}: only {remaining} remaining")]
    ConsumeExceedsRemaining {
        /// Layer being drained.
        layer: LayerId,
        /// Units requested from the layer.
        requested: Decimal,
        /// Units the layer still holds.
        remaining: Decimal,
    },

    /// A restore would push a layer above its received quantity.
    #[error(
        "Cannot restore {requested} to layer {layer}: {remaining} remaining of {received} received"
    )]
    RestoreExceedsReceived {
        /// Layer being restored.
        layer: LayerId,
        /// Units being put back.
        requested: Decimal,
        /// Units the layer currently holds.
        remaining: Decimal,
        /// Units originally received.
        received: Decimal,
    },
}

impl CostingError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity(_) => "COSTING_INVALID_QUANTITY",
            Self::InvalidUnitCost(_) => "COSTING_INVALID_UNIT_COST",
            Self::InsufficientInventory { .. } => "COSTING_INSUFFICIENT_INVENTORY",
            Self::LayerNotFound(_) => "COSTING_LAYER_NOT_FOUND",
            Self::ConsumeExceedsRemaining { .. } => "COSTING_CONSUME_EXCEEDS_REMAINING",
            Self::RestoreExceedsReceived { .. } => "COSTING_RESTORE_EXCEEDS_RECEIVED",
        }
    }
}
