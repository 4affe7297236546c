//! Cost layer entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratum_shared::types::{LayerId, ProductId, ScopeId};

use crate::reference::Reference;

use super::error::CostingError;

/// A batch of inventory received at a single unit cost.
///
/// Layers are immutable except for `quantity_remaining`, which only
/// moves through [`CostLayer::consume`] and [`CostLayer::restore`].
/// `0 <= quantity_remaining <= quantity_received` holds at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLayer {
    /// Unique identifier; also the FIFO tiebreaker for equal dates.
    pub id: LayerId,
    /// Owning scope.
    pub scope: ScopeId,
    /// The product this layer holds units of.
    pub product: ProductId,
    /// Quantity originally received. Strictly positive.
    pub quantity_received: Decimal,
    /// Quantity not yet consumed.
    pub quantity_remaining: Decimal,
    /// Cost per unit at receipt. Non-negative.
    pub unit_cost: Decimal,
    /// Business date of receipt; primary FIFO ordering key.
    pub received_date: DateTime<Utc>,
    /// The event that created this layer.
    pub reference: Reference,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl CostLayer {
    /// Creates a full (unconsumed) layer.
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::InvalidQuantity`] if `quantity <= 0` and
    /// [`CostingError::InvalidUnitCost`] if `unit_cost < 0`. A zero
    /// unit cost is valid (donated or found inventory).
    pub fn new(
        scope: ScopeId,
        product: ProductId,
        quantity: Decimal,
        unit_cost: Decimal,
        received_date: DateTime<Utc>,
        reference: Reference,
    ) -> Result<Self, CostingError> {
        if quantity <= Decimal::ZERO {
            return Err(CostingError::InvalidQuantity(quantity));
        }
        if unit_cost < Decimal::ZERO {
            return Err(CostingError::InvalidUnitCost(unit_cost));
        }

        Ok(Self {
            id: LayerId::new(),
            scope,
            product,
            quantity_received: quantity,
            quantity_remaining: quantity,
            unit_cost,
            received_date,
            reference,
            created_at: Utc::now(),
        })
    }

    /// Value of the units still held in this layer.
    #[must_use]
    pub fn remaining_value(&self) -> Decimal {
        self.quantity_remaining * self.unit_cost
    }

    /// Whether the layer still holds any units.
    #[must_use]
    pub fn has_remaining(&self) -> bool {
        self.quantity_remaining > Decimal::ZERO
    }

    /// Removes `quantity` units from the layer.
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::InvalidQuantity`] for non-positive
    /// quantities and [`CostingError::ConsumeExceedsRemaining`] when
    /// the layer does not hold enough units.
    pub fn consume(&mut self, quantity: Decimal) -> Result<(), CostingError> {
        if quantity <= Decimal::ZERO {
            return Err(CostingError::InvalidQuantity(quantity));
        }
        if quantity > self.quantity_remaining {
            return Err(CostingError::ConsumeExceedsRemaining {
                layer: self.id,
                requested: quantity,
                remaining: self.quantity_remaining,
            });
        }
        self.quantity_remaining -= quantity;
        Ok(())
    }

    /// Puts `quantity` units back into the layer (reversal path).
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::InvalidQuantity`] for non-positive
    /// quantities and [`CostingError::RestoreExceedsReceived`] when the
    /// restore would push the layer above its received quantity.
    pub fn restore(&mut self, quantity: Decimal) -> Result<(), CostingError> {
        if quantity <= Decimal::ZERO {
            return Err(CostingError::InvalidQuantity(quantity));
        }
        if self.quantity_remaining + quantity > self.quantity_received {
            return Err(CostingError::RestoreExceedsReceived {
                layer: self.id,
                requested: quantity,
                remaining: self.quantity_remaining,
                received: self.quantity_received,
            });
        }
        self.quantity_remaining += quantity;
        Ok(())
    }
}
