//! Inventory valuation derived from live layers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratum_shared::types::ProductId;

use super::layer::CostLayer;

/// On-hand quantity and value for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductValuation {
    /// The product valued.
    pub product: ProductId,
    /// Units on hand across all layers.
    pub total_quantity: Decimal,
    /// Value on hand: sum of `quantity_remaining * unit_cost` per layer.
    pub total_value: Decimal,
    /// Weighted average cost per unit, `None` when nothing is on hand.
    pub average_unit_cost: Option<Decimal>,
    /// Number of layers still holding units.
    pub open_layers: usize,
}

impl ProductValuation {
    /// Values a product from a snapshot of its layers.
    ///
    /// Layers for other products are ignored, so callers can pass an
    /// unfiltered scope-wide snapshot.
    #[must_use]
    pub fn from_layers(product: ProductId, layers: &[CostLayer]) -> Self {
        let mut total_quantity = Decimal::ZERO;
        let mut total_value = Decimal::ZERO;
        let mut open_layers = 0;
        for layer in layers
            .iter()
            .filter(|l| l.product == product && l.has_remaining())
        {
            total_quantity += layer.quantity_remaining;
            total_value += layer.remaining_value();
            open_layers += 1;
        }

        let average_unit_cost = total_value.checked_div(total_quantity);

        Self {
            product,
            total_quantity,
            total_value,
            average_unit_cost,
            open_layers,
        }
    }
}
