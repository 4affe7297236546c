//! FIFO cost layers and inventory valuation.
//!
//! Every receipt of goods creates a [`CostLayer`] recording quantity
//! and unit cost. Consumption (sales, write-downs, disassembly) drains
//! layers oldest-first and reports the exact historical cost released,
//! so cost of goods sold always reflects what the consumed units
//! actually cost.

pub mod error;
pub mod fifo;
pub mod layer;
pub mod valuation;

#[cfg(test)]
mod fifo_props;

pub use error::CostingError;
pub use fifo::{plan_consumption, ConsumptionPlan, LayerTouch};
pub use layer::CostLayer;
pub use valuation::ProductValuation;
