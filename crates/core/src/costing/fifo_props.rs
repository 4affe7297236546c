//! Property-based tests for FIFO consumption planning.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use stratum_shared::types::{ProductId, ScopeId};

use crate::reference::{Reference, ReferenceType};

use super::error::CostingError;
use super::fifo::plan_consumption;
use super::layer::CostLayer;

/// A layer described by integer cents to keep arithmetic exact.
fn arb_layer_params() -> impl Strategy<Value = (u32, u32, i64)> {
    // (quantity 1..=500, unit cost cents 0..=10_000, age in days 0..=365)
    (1u32..=500, 0u32..=10_000, 0i64..=365)
}

fn build_layers(params: &[(u32, u32, i64)], scope: ScopeId, product: ProductId) -> Vec<CostLayer> {
    params
        .iter()
        .map(|&(qty, cents, days)| {
            CostLayer::new(
                scope,
                product,
                Decimal::from(qty),
                Decimal::new(i64::from(cents), 2),
                Utc::now() - Duration::days(days),
                Reference::bare(ReferenceType::PurchaseReceipt),
            )
            .unwrap()
        })
        .collect()
}

proptest! {
    /// A successful plan always consumes exactly the requested quantity.
    #[test]
    fn prop_plan_conserves_quantity(
        params in prop::collection::vec(arb_layer_params(), 1..8),
        request in 1u32..=2_000,
    ) {
        let scope = ScopeId::new();
        let product = ProductId::new();
        let layers = build_layers(&params, scope, product);
        let request = Decimal::from(request);

        if let Ok(plan) = plan_consumption(&layers, product, request) {
            let consumed: Decimal = plan.touches.iter().map(|t| t.quantity).sum();
            prop_assert_eq!(consumed, request);
        }
    }

    /// Plan cost equals the sum of quantity times unit cost per touch.
    #[test]
    fn prop_plan_cost_is_exact(
        params in prop::collection::vec(arb_layer_params(), 1..8),
        request in 1u32..=2_000,
    ) {
        let scope = ScopeId::new();
        let product = ProductId::new();
        let layers = build_layers(&params, scope, product);

        if let Ok(plan) = plan_consumption(&layers, product, Decimal::from(request)) {
            let expected: Decimal =
                plan.touches.iter().map(|t| t.quantity * t.unit_cost).sum();
            prop_assert_eq!(plan.total_cost, expected);
        }
    }

    /// Touches come back in receipt order, oldest first.
    #[test]
    fn prop_touches_are_oldest_first(
        params in prop::collection::vec(arb_layer_params(), 1..8),
        request in 1u32..=2_000,
    ) {
        let scope = ScopeId::new();
        let product = ProductId::new();
        let layers = build_layers(&params, scope, product);

        if let Ok(plan) = plan_consumption(&layers, product, Decimal::from(request)) {
            let dates: Vec<_> = plan
                .touches
                .iter()
                .map(|t| {
                    layers
                        .iter()
                        .find(|l| l.id == t.layer_id)
                        .map(|l| l.received_date)
                        .unwrap()
                })
                .collect();
            prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    /// Planning never succeeds beyond available stock and never
    /// produces a partial plan when it fails.
    #[test]
    fn prop_all_or_nothing(
        params in prop::collection::vec(arb_layer_params(), 0..8),
        request in 1u32..=2_000,
    ) {
        let scope = ScopeId::new();
        let product = ProductId::new();
        let layers = build_layers(&params, scope, product);
        let available: Decimal = layers.iter().map(|l| l.quantity_remaining).sum();
        let request = Decimal::from(request);

        match plan_consumption(&layers, product, request) {
            Ok(plan) => {
                prop_assert!(request <= available);
                prop_assert_eq!(plan.quantity, request);
            }
            Err(CostingError::InsufficientInventory { available: reported, .. }) => {
                prop_assert!(request > available);
                prop_assert_eq!(reported, available);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }
}
