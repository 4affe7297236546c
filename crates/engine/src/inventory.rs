//! Cost layer bookkeeping within store transactions, plus inventory
//! read queries.
//!
//! The write helpers here are only callable from the orchestrator:
//! layers never change outside a business event.

use stratum_core::costing::{CostLayer, CostingError, ProductValuation};
use stratum_core::costing::ConsumptionPlan;
use stratum_shared::types::{PageRequest, PageResponse, ProductId, ScopeId};

use crate::error::EngineResult;
use crate::store::{InventoryMovement, ScopeState};
use crate::Engine;

/// Stores a freshly created layer and records the movement.
pub(crate) fn create_layer(state: &mut ScopeState, layer: CostLayer) -> InventoryMovement {
    let movement = InventoryMovement::Created {
        layer_id: layer.id,
        quantity: layer.quantity_received,
    };
    state.layers.push(layer);
    movement
}

/// Applies a consumption plan to the stored layers, recording one
/// movement per touched layer.
pub(crate) fn apply_plan(
    state: &mut ScopeState,
    plan: &ConsumptionPlan,
) -> EngineResult<Vec<InventoryMovement>> {
    let mut movements = Vec::with_capacity(plan.touches.len());
    for touch in &plan.touches {
        let layer = state
            .layer_mut(touch.layer_id)
            .ok_or(CostingError::LayerNotFound(touch.layer_id))?;
        layer.consume(touch.quantity)?;
        movements.push(InventoryMovement::Consumed {
            layer_id: touch.layer_id,
            quantity: touch.quantity,
        });
    }
    Ok(movements)
}

/// Undoes a transaction's recorded movements: consumed units go back
/// to their layers, created layers are drained by what they were
/// created with.
pub(crate) fn undo_movements(
    state: &mut ScopeState,
    movements: &[InventoryMovement],
) -> EngineResult<()> {
    for movement in movements {
        match *movement {
            InventoryMovement::Consumed { layer_id, quantity } => {
                let layer = state
                    .layer_mut(layer_id)
                    .ok_or(CostingError::LayerNotFound(layer_id))?;
                layer.restore(quantity)?;
            }
            InventoryMovement::Created { layer_id, quantity } => {
                let layer = state
                    .layer_mut(layer_id)
                    .ok_or(CostingError::LayerNotFound(layer_id))?;
                layer.consume(quantity)?;
            }
        }
    }
    Ok(())
}

impl Engine {
    /// On-hand quantity, value, and average cost for a product.
    #[must_use]
    pub fn product_valuation(&self, scope: ScopeId, product: ProductId) -> ProductValuation {
        self.store
            .read(scope, |state| ProductValuation::from_layers(product, &state.layers))
    }

    /// Lists cost layers in FIFO order, optionally filtered to one
    /// product. Fully drained layers are included; they are part of the
    /// audit trail.
    pub fn list_layers(
        &self,
        scope: ScopeId,
        product: Option<ProductId>,
        page: &PageRequest,
    ) -> PageResponse<CostLayer> {
        let page = self.normalize_page(page);
        self.store.read(scope, |state| {
            let mut layers: Vec<CostLayer> = state
                .layers
                .iter()
                .filter(|l| product.map_or(true, |p| l.product == p))
                .cloned()
                .collect();
            layers.sort_by(|a, b| {
                a.received_date
                    .cmp(&b.received_date)
                    .then_with(|| a.id.cmp(&b.id))
            });

            let total = layers.len() as u64;
            let data: Vec<CostLayer> = layers
                .into_iter()
                .skip(page.offset())
                .take(page.limit())
                .collect();
            PageResponse::new(data, page.page, page.per_page, total)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use stratum_core::costing::plan_consumption;
    use stratum_core::reference::{Reference, ReferenceType};

    fn make_layer(scope: ScopeId, product: ProductId) -> CostLayer {
        CostLayer::new(
            scope,
            product,
            dec!(10),
            dec!(2.00),
            Utc::now(),
            Reference::bare(ReferenceType::PurchaseReceipt),
        )
        .unwrap()
    }

    #[test]
    fn test_apply_plan_then_undo_restores_layers() {
        let scope = ScopeId::new();
        let product = ProductId::new();
        let mut state = ScopeState::default();
        create_layer(&mut state, make_layer(scope, product));

        let plan = plan_consumption(&state.layers, product, dec!(7)).unwrap();
        let movements = apply_plan(&mut state, &plan).unwrap();
        assert_eq!(state.layers[0].quantity_remaining, dec!(3));

        undo_movements(&mut state, &movements).unwrap();
        assert_eq!(state.layers[0].quantity_remaining, dec!(10));
    }

    #[test]
    fn test_undo_of_created_layer_drains_it() {
        let scope = ScopeId::new();
        let product = ProductId::new();
        let mut state = ScopeState::default();
        let movement = create_layer(&mut state, make_layer(scope, product));

        undo_movements(&mut state, &[movement]).unwrap();
        assert_eq!(state.layers[0].quantity_remaining, dec!(0));
    }

    #[test]
    fn test_undo_of_partially_consumed_creation_fails() {
        let scope = ScopeId::new();
        let product = ProductId::new();
        let mut state = ScopeState::default();
        let created = create_layer(&mut state, make_layer(scope, product));

        let plan = plan_consumption(&state.layers, product, dec!(4)).unwrap();
        apply_plan(&mut state, &plan).unwrap();

        // The layer only holds 6 of its 10 received units now.
        let result = undo_movements(&mut state, &[created]);
        assert!(result.is_err());
    }
}
