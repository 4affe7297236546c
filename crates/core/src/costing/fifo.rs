//! FIFO consumption planning.
//!
//! Planning is a pure function over a snapshot of layers: it decides
//! which layers to drain and by how much without mutating anything.
//! Callers apply the resulting plan to their stored layers, which keeps
//! the all-or-nothing guarantee trivial: a plan either covers the full
//! requested quantity or no plan is produced at all.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratum_shared::types::{LayerId, ProductId};

use super::error::CostingError;
use super::layer::CostLayer;

/// One layer's contribution to a consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerTouch {
    /// The layer drained.
    pub layer_id: LayerId,
    /// Units taken from the layer.
    pub quantity: Decimal,
    /// The layer's unit cost at receipt.
    pub unit_cost: Decimal,
    /// Historical cost released: `quantity * unit_cost`.
    pub cost: Decimal,
}

/// The outcome of planning a FIFO consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionPlan {
    /// The product being consumed.
    pub product: ProductId,
    /// Total units to consume.
    pub quantity: Decimal,
    /// Per-layer breakdown, oldest layer first.
    pub touches: Vec<LayerTouch>,
    /// Sum of the per-layer costs; the exact COGS for this consumption.
    pub total_cost: Decimal,
}

/// Plans a FIFO consumption of `quantity` units of `product`.
///
/// Layers are drained in order of `received_date`, with `id` as the
/// tiebreaker for layers received the same instant. Layers for other
/// products and fully-drained layers are skipped.
///
/// # Errors
///
/// Returns [`CostingError::InvalidQuantity`] for non-positive
/// quantities and [`CostingError::InsufficientInventory`] when the
/// available units do not cover the request. No partial plan is ever
/// produced.
pub fn plan_consumption(
    layers: &[CostLayer],
    product: ProductId,
    quantity: Decimal,
) -> Result<ConsumptionPlan, CostingError> {
    if quantity <= Decimal::ZERO {
        return Err(CostingError::InvalidQuantity(quantity));
    }

    let mut candidates: Vec<&CostLayer> = layers
        .iter()
        .filter(|l| l.product == product && l.has_remaining())
        .collect();
    candidates.sort_by(|a, b| {
        a.received_date
            .cmp(&b.received_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    let available: Decimal = candidates.iter().map(|l| l.quantity_remaining).sum();
    if available < quantity {
        return Err(CostingError::InsufficientInventory {
            product,
            requested: quantity,
            available,
        });
    }

    let mut touches = Vec::new();
    let mut outstanding = quantity;
    let mut total_cost = Decimal::ZERO;
    for layer in candidates {
        if outstanding == Decimal::ZERO {
            break;
        }
        let take = outstanding.min(layer.quantity_remaining);
        let cost = take * layer.unit_cost;
        touches.push(LayerTouch {
            layer_id: layer.id,
            quantity: take,
            unit_cost: layer.unit_cost,
            cost,
        });
        total_cost += cost;
        outstanding -= take;
    }

    Ok(ConsumptionPlan {
        product,
        quantity,
        touches,
        total_cost,
    })
}
