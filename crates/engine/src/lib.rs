//! Transactional inventory and accounting engine.
//!
//! [`Engine`] is the single entry point: it owns the scope store and
//! exposes the account registry, inventory and journal queries, report
//! queries, and the business event orchestrator. Every call takes the
//! scope it operates on; scopes are fully isolated from each other.
//!
//! All writes go through the orchestrator, which applies each business
//! event atomically: either every side effect of an event (cost layer
//! changes plus the balanced ledger posting) commits, or none do.

pub mod error;
pub mod inventory;
pub mod journal;
pub mod orchestrator;
pub mod registry;
pub mod reports;
pub mod store;

#[cfg(test)]
mod orchestrator_props;

pub use error::{EngineError, EngineResult};
pub use orchestrator::{
    AdjustmentInput, AdjustmentOutcome, ComponentOutput, DisassemblyInput, DisassemblyOutcome,
    FundingSource, PaymentMethod, ReceiptInput, ReceiptOutcome, SaleInput, SaleOutcome,
};
pub use store::MemoryStore;

use stratum_shared::config::EngineConfig;
use stratum_shared::types::ScopeId;

/// The engine facade: scope store plus configuration.
#[derive(Debug, Default)]
pub struct Engine {
    pub(crate) store: MemoryStore,
    pub(crate) config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            store: MemoryStore::default(),
            config,
        }
    }

    /// Current version of a scope's state. Increments on every
    /// committed write and can be passed back as `expected_version` to
    /// detect concurrent writers.
    #[must_use]
    pub fn scope_version(&self, scope: ScopeId) -> u64 {
        self.store.version(scope)
    }
}
