//! In-memory scope store with copy-on-write commits.
//!
//! Each scope's state lives behind its own lock in a [`DashMap`], so
//! scopes never contend with each other. A write clones the scope's
//! state, applies the mutation to the working copy, verifies the
//! store-wide invariants, and only then swaps the copy in and bumps the
//! scope version. A failed mutation or a failed invariant check leaves
//! the committed state untouched.

use std::collections::HashMap;

use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratum_core::accounts::{Account, SystemAccount};
use stratum_core::costing::CostLayer;
use stratum_core::ledger::{LedgerEntry, Transaction};
use stratum_shared::types::{AccountId, LayerId, ScopeId, TransactionId};

use crate::error::{EngineError, EngineResult};

/// One inventory side effect of a committed transaction.
///
/// The engine records these as each event commits and replays them in
/// mirror form during reversal. Reversals never rederive movements
/// from current layer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryMovement {
    /// Units were taken from a layer.
    Consumed {
        /// The layer drained.
        layer_id: LayerId,
        /// Units taken.
        quantity: Decimal,
    },
    /// A layer was created with the given units.
    Created {
        /// The layer created.
        layer_id: LayerId,
        /// Units the layer was created with.
        quantity: Decimal,
    },
}

/// The complete state of one scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeState {
    /// Accounts by id.
    pub(crate) accounts: HashMap<AccountId, Account>,
    /// Resolved ids of lazily-created system accounts.
    pub(crate) system_accounts: HashMap<SystemAccount, AccountId>,
    /// Cost layers in creation order.
    pub(crate) layers: Vec<CostLayer>,
    /// Transactions in posting order.
    pub(crate) transactions: Vec<Transaction>,
    /// Ledger entries in posting order.
    pub(crate) entries: Vec<LedgerEntry>,
    /// Inventory movements per transaction, for reversal replay.
    pub(crate) movements: HashMap<TransactionId, Vec<InventoryMovement>>,
    /// Bumped on every committed write.
    pub(crate) version: u64,
}

impl ScopeState {
    pub(crate) fn layer(&self, id: LayerId) -> Option<&CostLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Option<&mut CostLayer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub(crate) fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn entries_for(&self, id: TransactionId) -> Vec<LedgerEntry> {
        self.entries
            .iter()
            .filter(|e| e.transaction_id == id)
            .cloned()
            .collect()
    }

    /// Sum of debits minus credits posted to an account.
    pub(crate) fn debit_credit_totals(&self, account_id: AccountId) -> (Decimal, Decimal) {
        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        for entry in self.entries.iter().filter(|e| e.account_id == account_id) {
            debits += entry.debit_amount();
            credits += entry.credit_amount();
        }
        (debits, credits)
    }
}

/// Scope-partitioned in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scopes: DashMap<ScopeId, ScopeState>,
}

impl MemoryStore {
    /// Runs a read-only closure against a scope's committed state.
    /// A scope that was never written to reads as empty.
    pub fn read<R>(&self, scope: ScopeId, f: impl FnOnce(&ScopeState) -> R) -> R {
        match self.scopes.get(&scope) {
            Some(state) => f(&state),
            None => f(&ScopeState::default()),
        }
    }

    /// Current committed version of a scope. Zero for untouched scopes.
    pub fn version(&self, scope: ScopeId) -> u64 {
        self.scopes.get(&scope).map_or(0, |state| state.version)
    }

    /// Applies a mutation atomically.
    ///
    /// The closure runs against a working copy of the scope's state.
    /// If it returns an error, or the mutated copy fails invariant
    /// verification, the committed state is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConcurrentModification`] when
    /// `expected_version` is given and does not match the committed
    /// version, the closure's error unchanged when the mutation fails,
    /// and [`EngineError::InvariantViolation`] when verification of
    /// the mutated copy fails.
    pub fn transact<R>(
        &self,
        scope: ScopeId,
        expected_version: Option<u64>,
        f: impl FnOnce(&mut ScopeState) -> EngineResult<R>,
    ) -> EngineResult<R> {
        let mut slot = self.scopes.entry(scope).or_default();

        if let Some(expected) = expected_version {
            if slot.version != expected {
                return Err(EngineError::ConcurrentModification {
                    scope,
                    expected,
                    actual: slot.version,
                });
            }
        }

        let mut working = slot.clone();
        let result = f(&mut working)?;
        verify_invariants(scope, &working)?;

        working.version = slot.version + 1;
        *slot = working;
        Ok(result)
    }
}

/// Checks the store-wide invariants on a candidate state before it is
/// committed. Violations are logged and surfaced, never masked.
fn verify_invariants(scope: ScopeId, state: &ScopeState) -> EngineResult<()> {
    // Every transaction balances to the cent.
    let mut totals: HashMap<TransactionId, (Decimal, Decimal)> = HashMap::new();
    for entry in &state.entries {
        let slot = totals
            .entry(entry.transaction_id)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        slot.0 += entry.debit_amount();
        slot.1 += entry.credit_amount();
    }
    for (transaction_id, (debit, credit)) in &totals {
        if debit != credit {
            let message = format!(
                "transaction {transaction_id} is unbalanced: debits {debit}, credits {credit}"
            );
            tracing::error!(%scope, %transaction_id, %debit, %credit, "invariant violation");
            return Err(EngineError::InvariantViolation(message));
        }
    }

    // Layer quantities stay within their received bounds.
    for layer in &state.layers {
        if layer.quantity_remaining < Decimal::ZERO
            || layer.quantity_remaining > layer.quantity_received
        {
            let message = format!(
                "layer {} holds {} of {} received",
                layer.id, layer.quantity_remaining, layer.quantity_received
            );
            tracing::error!(%scope, layer_id = %layer.id, "invariant violation");
            return Err(EngineError::InvariantViolation(message));
        }
    }

    // The inventory account tracks the value of the layers exactly.
    if let Some(&inventory_id) = state.system_accounts.get(&SystemAccount::InventoryAsset) {
        let (debits, credits) = state.debit_credit_totals(inventory_id);
        let posted = debits - credits;
        let held: Decimal = state.layers.iter().map(CostLayer::remaining_value).sum();
        if posted != held {
            let message = format!(
                "inventory account balance {posted} does not match layer value {held}"
            );
            tracing::error!(%scope, %posted, %held, "invariant violation");
            return Err(EngineError::InvariantViolation(message));
        }
    }

    Ok(())
}
