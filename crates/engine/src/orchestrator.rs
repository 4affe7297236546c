//! Business event orchestration.
//!
//! Each public method here applies one business event atomically:
//! the cost layer changes and the balanced ledger posting commit
//! together or not at all. The orchestrator is the only writer of
//! layers and transactions; everything else in the crate reads.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use stratum_core::accounts::SystemAccount;
use stratum_core::costing::{plan_consumption, CostLayer};
use stratum_core::ledger::{
    EntryType, LedgerError, LedgerService, LineInput, PostingInput,
};
use stratum_core::reference::{Reference, ReferenceType};
use stratum_shared::types::{LayerId, ProductId, ScopeId, TransactionId};
use tracing::instrument;

use crate::error::{EngineError, EngineResult};
use crate::inventory::{apply_plan, create_layer, undo_movements};
use crate::journal::{account_info, post};
use crate::registry::ensure_system_account;
use crate::store::ScopeState;
use crate::Engine;

/// How a receipt of goods was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundingSource {
    /// Paid in cash at receipt.
    Cash,
    /// Bought on supplier credit.
    OnCredit,
    /// Contributed by the owner; no purchase occurred.
    CapitalContribution,
}

impl FundingSource {
    const fn account(self) -> SystemAccount {
        match self {
            Self::Cash => SystemAccount::Cash,
            Self::OnCredit => SystemAccount::AccountsPayable,
            Self::CapitalContribution => SystemAccount::OwnerCapital,
        }
    }

    const fn reference_type(self) -> ReferenceType {
        match self {
            Self::Cash | Self::OnCredit => ReferenceType::PurchaseReceipt,
            Self::CapitalContribution => ReferenceType::CapitalContribution,
        }
    }
}

/// How a sale was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash at sale.
    Cash,
    /// On customer credit.
    OnCredit,
}

impl PaymentMethod {
    const fn account(self) -> SystemAccount {
        match self {
            Self::Cash => SystemAccount::Cash,
            Self::OnCredit => SystemAccount::AccountsReceivable,
        }
    }
}

/// A receipt of goods into inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptInput {
    /// Product received.
    pub product: ProductId,
    /// Units received. Strictly positive.
    pub quantity: Decimal,
    /// Cost per unit. Non-negative; zero for donated goods.
    pub unit_cost: Decimal,
    /// Business date of the receipt.
    pub received_date: DateTime<Utc>,
    /// How the receipt was paid for.
    pub funding: FundingSource,
}

/// Outcome of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptOutcome {
    /// The cost layer created.
    pub layer_id: LayerId,
    /// The posting made, absent for zero-cost receipts.
    pub transaction_id: Option<TransactionId>,
}

/// A sale consuming inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleInput {
    /// Product sold.
    pub product: ProductId,
    /// Units sold. Strictly positive.
    pub quantity: Decimal,
    /// Total sale price. Strictly positive.
    pub sale_total: Decimal,
    /// How the sale was settled.
    pub payment: PaymentMethod,
    /// Business date of the sale.
    pub sale_date: DateTime<Utc>,
}

/// Outcome of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleOutcome {
    /// The posting made.
    pub transaction_id: TransactionId,
    /// Revenue recognized.
    pub revenue: Decimal,
    /// Historical cost released from inventory.
    pub cost_of_goods: Decimal,
}

/// A quantity correction: positive to add stock, negative to remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentInput {
    /// Product adjusted.
    pub product: ProductId,
    /// Signed quantity change. Must be non-zero.
    pub quantity_change: Decimal,
    /// Cost per unit for increases; ignored for decreases, which
    /// release cost FIFO from existing layers.
    pub unit_cost: Option<Decimal>,
    /// Why the adjustment was made.
    pub reason: String,
    /// Business date of the adjustment.
    pub date: DateTime<Utc>,
}

/// Outcome of an adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentOutcome {
    /// The posting made, absent when no cost moved.
    pub transaction_id: Option<TransactionId>,
    /// The layer created, for increases only.
    pub layer_id: Option<LayerId>,
    /// Cost moved in or out of inventory.
    pub cost: Decimal,
}

/// One component produced by a disassembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentOutput {
    /// Component product.
    pub product: ProductId,
    /// Units produced. Strictly positive.
    pub quantity: Decimal,
    /// Allocation weight: this component's share of the parent cost is
    /// `weight / sum of weights`. Strictly positive.
    pub weight: Decimal,
    /// Consumable components are destroyed by the disassembly itself
    /// (packaging, seals). Their cost share is expensed instead of
    /// returned to stock, and no layer is created.
    pub consumable: bool,
}

/// Breaking parent units down into component stock.
///
/// Anything of the parent's cost not returned to stock (consumable
/// shares, the rounding remainder, or all of it when `components` is
/// empty) is expensed as an inventory adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisassemblyInput {
    /// Product being broken down.
    pub parent: ProductId,
    /// Parent units consumed. Strictly positive.
    pub quantity: Decimal,
    /// Components returned to stock.
    pub components: Vec<ComponentOutput>,
    /// Business date of the disassembly.
    pub date: DateTime<Utc>,
}

/// Outcome of a disassembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisassemblyOutcome {
    /// The posting made, absent when the parent cost was zero.
    pub transaction_id: Option<TransactionId>,
    /// Historical cost released from the parent's layers.
    pub parent_cost: Decimal,
    /// Layers created for the non-consumable components, in input
    /// order.
    pub component_layers: Vec<LayerId>,
    /// Cost expensed rather than returned to stock: consumable shares
    /// plus the allocation rounding remainder.
    pub expensed_remainder: Decimal,
}

impl Engine {
    /// Receives goods into inventory.
    ///
    /// Creates one cost layer and, unless the total cost is zero,
    /// posts `DR Inventory Asset / CR <funding account>`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid quantity or unit cost, or on a
    /// version mismatch.
    #[instrument(skip(self, input), fields(%scope, product = %input.product))]
    pub fn receive_inventory(
        &self,
        scope: ScopeId,
        input: &ReceiptInput,
        expected_version: Option<u64>,
    ) -> EngineResult<ReceiptOutcome> {
        self.store.transact(scope, expected_version, |state| {
            let total_cost = input.quantity * input.unit_cost;
            let reference_type = input.funding.reference_type();

            let transaction_id = if total_cost > Decimal::ZERO {
                let inventory = ensure_system_account(state, scope, SystemAccount::InventoryAsset)?;
                let funding = ensure_system_account(state, scope, input.funding.account())?;

                let posting_input = PostingInput {
                    description: format!(
                        "Received {} units of {}",
                        input.quantity, input.product
                    ),
                    transaction_date: input.received_date,
                    reference: Reference::bare(reference_type),
                    lines: vec![
                        LineInput::new(inventory, EntryType::Debit, total_cost),
                        LineInput::new(funding, EntryType::Credit, total_cost),
                    ],
                };
                let posting =
                    LedgerService::resolve(scope, &posting_input, |id| account_info(state, id))?;
                Some(post(state, posting)?)
            } else {
                None
            };

            let reference = match transaction_id {
                Some(id) => Reference::to(reference_type, id.into_inner()),
                None => Reference::bare(reference_type),
            };
            let layer = CostLayer::new(
                scope,
                input.product,
                input.quantity,
                input.unit_cost,
                input.received_date,
                reference,
            )?;
            let layer_id = layer.id;
            let movement = create_layer(state, layer);
            if let Some(id) = transaction_id {
                state.movements.insert(id, vec![movement]);
            }

            tracing::info!(
                %scope,
                %layer_id,
                %total_cost,
                funding = ?input.funding,
                "inventory received"
            );
            Ok(ReceiptOutcome {
                layer_id,
                transaction_id,
            })
        })
    }

    /// Records a sale: revenue recognition plus FIFO cost release in a
    /// single transaction.
    ///
    /// Posts `DR <payment account> / CR Sales Revenue` for the sale
    /// total and, when the released cost is non-zero, `DR Cost of
    /// Goods Sold / CR Inventory Asset` for that cost.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive sale total, insufficient
    /// inventory, or a version mismatch. Nothing commits on failure.
    #[instrument(skip(self, input), fields(%scope, product = %input.product))]
    pub fn record_sale(
        &self,
        scope: ScopeId,
        input: &SaleInput,
        expected_version: Option<u64>,
    ) -> EngineResult<SaleOutcome> {
        if input.sale_total <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "sale total must be positive, got {}",
                input.sale_total
            )));
        }

        self.store.transact(scope, expected_version, |state| {
            let plan = plan_consumption(&state.layers, input.product, input.quantity)?;
            let movements = apply_plan(state, &plan)?;

            let payment = ensure_system_account(state, scope, input.payment.account())?;
            let revenue = ensure_system_account(state, scope, SystemAccount::SalesRevenue)?;
            let mut lines = vec![
                LineInput::new(payment, EntryType::Debit, input.sale_total),
                LineInput::new(revenue, EntryType::Credit, input.sale_total),
            ];
            if plan.total_cost > Decimal::ZERO {
                let cogs = ensure_system_account(state, scope, SystemAccount::CostOfGoodsSold)?;
                let inventory = ensure_system_account(state, scope, SystemAccount::InventoryAsset)?;
                lines.push(LineInput::new(cogs, EntryType::Debit, plan.total_cost));
                lines.push(LineInput::new(inventory, EntryType::Credit, plan.total_cost));
            }

            let posting_input = PostingInput {
                description: format!("Sold {} units of {}", input.quantity, input.product),
                transaction_date: input.sale_date,
                reference: Reference::bare(ReferenceType::Sale),
                lines,
            };
            let posting =
                LedgerService::resolve(scope, &posting_input, |id| account_info(state, id))?;
            let transaction_id = post(state, posting)?;
            state.movements.insert(transaction_id, movements);

            tracing::info!(
                %scope,
                %transaction_id,
                revenue = %input.sale_total,
                cost = %plan.total_cost,
                "sale recorded"
            );
            Ok(SaleOutcome {
                transaction_id,
                revenue: input.sale_total,
                cost_of_goods: plan.total_cost,
            })
        })
    }

    /// Corrects on-hand quantity.
    ///
    /// Decreases release cost FIFO and post `DR Inventory Adjustment /
    /// CR Inventory Asset`. Increases create a new layer at the given
    /// unit cost and post `DR Inventory Asset / CR Owner Capital`.
    /// No posting is made when the moved cost is zero.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero quantity change, a missing unit
    /// cost on an increase, insufficient inventory on a decrease, or a
    /// version mismatch.
    #[instrument(skip(self, input), fields(%scope, product = %input.product))]
    pub fn adjust_inventory(
        &self,
        scope: ScopeId,
        input: &AdjustmentInput,
        expected_version: Option<u64>,
    ) -> EngineResult<AdjustmentOutcome> {
        if input.quantity_change == Decimal::ZERO {
            return Err(EngineError::Validation(
                "quantity change must be non-zero".to_string(),
            ));
        }

        self.store.transact(scope, expected_version, |state| {
            let outcome = if input.quantity_change < Decimal::ZERO {
                Self::adjust_down(state, scope, input)?
            } else {
                Self::adjust_up(state, scope, input)?
            };
            tracing::info!(
                %scope,
                change = %input.quantity_change,
                cost = %outcome.cost,
                reason = %input.reason,
                "inventory adjusted"
            );
            Ok(outcome)
        })
    }

    fn adjust_down(
        state: &mut ScopeState,
        scope: ScopeId,
        input: &AdjustmentInput,
    ) -> EngineResult<AdjustmentOutcome> {
        let plan = plan_consumption(&state.layers, input.product, -input.quantity_change)?;
        let movements = apply_plan(state, &plan)?;

        let transaction_id = if plan.total_cost > Decimal::ZERO {
            let adjustment =
                ensure_system_account(state, scope, SystemAccount::InventoryAdjustment)?;
            let inventory = ensure_system_account(state, scope, SystemAccount::InventoryAsset)?;
            let posting_input = PostingInput {
                description: format!("Inventory adjustment: {}", input.reason),
                transaction_date: input.date,
                reference: Reference::bare(ReferenceType::Adjustment),
                lines: vec![
                    LineInput::new(adjustment, EntryType::Debit, plan.total_cost),
                    LineInput::new(inventory, EntryType::Credit, plan.total_cost),
                ],
            };
            let posting =
                LedgerService::resolve(scope, &posting_input, |id| account_info(state, id))?;
            let id = post(state, posting)?;
            state.movements.insert(id, movements);
            Some(id)
        } else {
            None
        };

        Ok(AdjustmentOutcome {
            transaction_id,
            layer_id: None,
            cost: plan.total_cost,
        })
    }

    fn adjust_up(
        state: &mut ScopeState,
        scope: ScopeId,
        input: &AdjustmentInput,
    ) -> EngineResult<AdjustmentOutcome> {
        let unit_cost = input.unit_cost.ok_or_else(|| {
            EngineError::Validation("unit cost is required to add inventory".to_string())
        })?;
        let total_cost = input.quantity_change * unit_cost;

        let transaction_id = if total_cost > Decimal::ZERO {
            let inventory = ensure_system_account(state, scope, SystemAccount::InventoryAsset)?;
            let capital = ensure_system_account(state, scope, SystemAccount::OwnerCapital)?;
            let posting_input = PostingInput {
                description: format!("Inventory adjustment: {}", input.reason),
                transaction_date: input.date,
                reference: Reference::bare(ReferenceType::Adjustment),
                lines: vec![
                    LineInput::new(inventory, EntryType::Debit, total_cost),
                    LineInput::new(capital, EntryType::Credit, total_cost),
                ],
            };
            let posting =
                LedgerService::resolve(scope, &posting_input, |id| account_info(state, id))?;
            Some(post(state, posting)?)
        } else {
            None
        };

        let reference = match transaction_id {
            Some(id) => Reference::to(ReferenceType::Adjustment, id.into_inner()),
            None => Reference::bare(ReferenceType::Adjustment),
        };
        let layer = CostLayer::new(
            scope,
            input.product,
            input.quantity_change,
            unit_cost,
            input.date,
            reference,
        )?;
        let layer_id = layer.id;
        let movement = create_layer(state, layer);
        if let Some(id) = transaction_id {
            state.movements.insert(id, vec![movement]);
        }

        Ok(AdjustmentOutcome {
            transaction_id,
            layer_id: Some(layer_id),
            cost: total_cost,
        })
    }

    /// Breaks parent units down into component stock.
    ///
    /// The parent's FIFO cost is allocated across the components by
    /// weight. Non-consumable components come back as new layers;
    /// their unit costs round toward zero at the configured allocation
    /// scale, so the allocated total never exceeds the parent cost.
    /// Consumable shares and the rounding remainder are expensed.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive quantities or weights,
    /// insufficient parent inventory, or a version mismatch.
    #[instrument(skip(self, input), fields(%scope, parent = %input.parent))]
    pub fn disassemble(
        &self,
        scope: ScopeId,
        input: &DisassemblyInput,
        expected_version: Option<u64>,
    ) -> EngineResult<DisassemblyOutcome> {
        for component in &input.components {
            if component.weight <= Decimal::ZERO {
                return Err(EngineError::Validation(format!(
                    "component weight must be positive, got {}",
                    component.weight
                )));
            }
        }
        let scale = self.config.costing.allocation_scale;

        self.store.transact(scope, expected_version, |state| {
            let plan = plan_consumption(&state.layers, input.parent, input.quantity)?;
            let mut movements = apply_plan(state, &plan)?;
            let parent_cost = plan.total_cost;

            // Consumable weights stay in the denominator, so their
            // share is simply never allocated and lands in the
            // expensed remainder.
            let total_weight: Decimal = input.components.iter().map(|c| c.weight).sum();
            let mut allocations = Vec::with_capacity(input.components.len());
            let mut allocated_total = Decimal::ZERO;
            for component in input.components.iter().filter(|c| !c.consumable) {
                let unit_cost = (parent_cost * component.weight)
                    .checked_div(total_weight)
                    .and_then(|share| share.checked_div(component.quantity))
                    .ok_or_else(|| {
                        EngineError::Validation(
                            "component quantity must be positive".to_string(),
                        )
                    })?
                    .round_dp_with_strategy(scale, RoundingStrategy::ToZero);
                allocated_total += component.quantity * unit_cost;
                allocations.push((component, unit_cost));
            }
            let remainder = parent_cost - allocated_total;

            let transaction_id = if parent_cost > Decimal::ZERO {
                let inventory = ensure_system_account(state, scope, SystemAccount::InventoryAsset)?;
                let mut lines = Vec::new();
                if allocated_total > Decimal::ZERO {
                    lines.push(LineInput::new(inventory, EntryType::Debit, allocated_total));
                }
                if remainder > Decimal::ZERO {
                    let adjustment =
                        ensure_system_account(state, scope, SystemAccount::InventoryAdjustment)?;
                    lines.push(LineInput::new(adjustment, EntryType::Debit, remainder));
                }
                lines.push(LineInput::new(inventory, EntryType::Credit, parent_cost));

                let posting_input = PostingInput {
                    description: format!(
                        "Disassembled {} units of {}",
                        input.quantity, input.parent
                    ),
                    transaction_date: input.date,
                    reference: Reference::bare(ReferenceType::Disassembly),
                    lines,
                };
                let posting =
                    LedgerService::resolve(scope, &posting_input, |id| account_info(state, id))?;
                Some(post(state, posting)?)
            } else {
                None
            };

            let reference = match transaction_id {
                Some(id) => Reference::to(ReferenceType::Disassembly, id.into_inner()),
                None => Reference::bare(ReferenceType::Disassembly),
            };
            let mut component_layers = Vec::with_capacity(allocations.len());
            for (component, unit_cost) in allocations {
                let layer = CostLayer::new(
                    scope,
                    component.product,
                    component.quantity,
                    unit_cost,
                    input.date,
                    reference,
                )?;
                component_layers.push(layer.id);
                movements.push(create_layer(state, layer));
            }
            if let Some(id) = transaction_id {
                state.movements.insert(id, movements);
            }

            tracing::info!(
                %scope,
                %parent_cost,
                %remainder,
                components = component_layers.len(),
                "disassembly recorded"
            );
            Ok(DisassemblyOutcome {
                transaction_id,
                parent_cost,
                component_layers,
                expensed_remainder: remainder,
            })
        })
    }

    /// Posts the mirror-image reversal of a committed transaction and
    /// undoes its recorded inventory movements.
    ///
    /// The original transaction is untouched except for its
    /// `reversed_by` marker. Reversals cannot themselves be reversed,
    /// and a transaction can only be reversed once.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist, was already
    /// reversed, is itself a reversal, if its inventory movements can
    /// no longer be undone (a created layer was partially consumed),
    /// or on a version mismatch.
    #[instrument(skip(self), fields(%scope, %transaction_id))]
    pub fn reverse(
        &self,
        scope: ScopeId,
        transaction_id: TransactionId,
        expected_version: Option<u64>,
    ) -> EngineResult<TransactionId> {
        self.store.transact(scope, expected_version, |state| {
            let original = state
                .transaction(transaction_id)
                .cloned()
                .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
            let original_entries = state.entries_for(transaction_id);

            let reversal = LedgerService::build_reversal(&original, &original_entries, Utc::now())?;
            let reversal_id = reversal.transaction.id;

            let movements = state
                .movements
                .get(&transaction_id)
                .cloned()
                .unwrap_or_default();
            undo_movements(state, &movements)?;

            post(state, reversal)?;
            if let Some(transaction) = state
                .transactions
                .iter_mut()
                .find(|t| t.id == transaction_id)
            {
                transaction.reversed_by = Some(reversal_id);
            }

            tracing::info!(%scope, %transaction_id, %reversal_id, "transaction reversed");
            Ok(reversal_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stratum_shared::types::PageRequest;

    fn engine() -> Engine {
        Engine::default()
    }

    fn receipt(product: ProductId, quantity: Decimal, unit_cost: Decimal) -> ReceiptInput {
        ReceiptInput {
            product,
            quantity,
            unit_cost,
            received_date: Utc::now(),
            funding: FundingSource::Cash,
        }
    }

    fn system_balance(engine: &Engine, scope: ScopeId, which: SystemAccount) -> Decimal {
        let account = engine
            .list_accounts(scope, true, &PageRequest::default())
            .data
            .into_iter()
            .find(|a| a.name == which.name())
            .unwrap();
        engine.account_balance(scope, account.id).unwrap().balance
    }

    #[test]
    fn test_cash_receipt_posts_and_creates_layer() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        let outcome = engine
            .receive_inventory(scope, &receipt(product, dec!(10), dec!(2.50)), None)
            .unwrap();
        assert!(outcome.transaction_id.is_some());

        let valuation = engine.product_valuation(scope, product);
        assert_eq!(valuation.total_quantity, dec!(10));
        assert_eq!(valuation.total_value, dec!(25.00));

        assert_eq!(
            system_balance(&engine, scope, SystemAccount::InventoryAsset),
            dec!(25.00)
        );
        // Cash is an asset; paying for goods drives it negative here
        // since nothing funded it first.
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::Cash),
            dec!(-25.00)
        );
    }

    #[test]
    fn test_capital_contribution_credits_owner_capital() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        let input = ReceiptInput {
            funding: FundingSource::CapitalContribution,
            ..receipt(product, dec!(4), dec!(5.00))
        };
        engine.receive_inventory(scope, &input, None).unwrap();

        assert_eq!(
            system_balance(&engine, scope, SystemAccount::OwnerCapital),
            dec!(20.00)
        );
    }

    #[test]
    fn test_zero_cost_receipt_creates_layer_without_posting() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        let outcome = engine
            .receive_inventory(scope, &receipt(product, dec!(3), dec!(0)), None)
            .unwrap();
        assert!(outcome.transaction_id.is_none());
        assert_eq!(
            engine.product_valuation(scope, product).total_quantity,
            dec!(3)
        );
        assert!(engine
            .list_transactions(scope, &PageRequest::default())
            .data
            .is_empty());
    }

    #[test]
    fn test_sale_releases_fifo_cost() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        engine
            .receive_inventory(scope, &receipt(product, dec!(10), dec!(1.00)), None)
            .unwrap();
        engine
            .receive_inventory(scope, &receipt(product, dec!(10), dec!(3.00)), None)
            .unwrap();

        let sale = SaleInput {
            product,
            quantity: dec!(12),
            sale_total: dec!(60.00),
            payment: PaymentMethod::Cash,
            sale_date: Utc::now(),
        };
        let outcome = engine.record_sale(scope, &sale, None).unwrap();

        // 10 at 1.00 plus 2 at 3.00.
        assert_eq!(outcome.cost_of_goods, dec!(16.00));
        assert_eq!(outcome.revenue, dec!(60.00));
        assert_eq!(
            engine.product_valuation(scope, product).total_quantity,
            dec!(8)
        );
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::CostOfGoodsSold),
            dec!(16.00)
        );
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::SalesRevenue),
            dec!(60.00)
        );
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::InventoryAsset),
            dec!(24.00)
        );
    }

    #[test]
    fn test_credit_sale_uses_receivable() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        engine
            .receive_inventory(scope, &receipt(product, dec!(5), dec!(2.00)), None)
            .unwrap();
        let sale = SaleInput {
            product,
            quantity: dec!(5),
            sale_total: dec!(25.00),
            payment: PaymentMethod::OnCredit,
            sale_date: Utc::now(),
        };
        engine.record_sale(scope, &sale, None).unwrap();

        assert_eq!(
            system_balance(&engine, scope, SystemAccount::AccountsReceivable),
            dec!(25.00)
        );
    }

    #[test]
    fn test_oversold_sale_commits_nothing() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        engine
            .receive_inventory(scope, &receipt(product, dec!(5), dec!(2.00)), None)
            .unwrap();
        let version = engine.scope_version(scope);

        let sale = SaleInput {
            product,
            quantity: dec!(6),
            sale_total: dec!(30.00),
            payment: PaymentMethod::Cash,
            sale_date: Utc::now(),
        };
        let result = engine.record_sale(scope, &sale, None);
        assert!(result.is_err());

        // No partial consumption, no posting, no version bump.
        assert_eq!(engine.scope_version(scope), version);
        assert_eq!(
            engine.product_valuation(scope, product).total_quantity,
            dec!(5)
        );
    }

    #[test]
    fn test_nonpositive_sale_total_rejected() {
        let engine = engine();
        let scope = ScopeId::new();
        let sale = SaleInput {
            product: ProductId::new(),
            quantity: dec!(1),
            sale_total: dec!(0),
            payment: PaymentMethod::Cash,
            sale_date: Utc::now(),
        };
        assert!(matches!(
            engine.record_sale(scope, &sale, None),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_adjustment_decrease_expenses_cost() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        engine
            .receive_inventory(scope, &receipt(product, dec!(10), dec!(2.00)), None)
            .unwrap();
        let input = AdjustmentInput {
            product,
            quantity_change: dec!(-3),
            unit_cost: None,
            reason: "damaged in storage".to_string(),
            date: Utc::now(),
        };
        let outcome = engine.adjust_inventory(scope, &input, None).unwrap();

        assert_eq!(outcome.cost, dec!(6.00));
        assert!(outcome.transaction_id.is_some());
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::InventoryAdjustment),
            dec!(6.00)
        );
        assert_eq!(
            engine.product_valuation(scope, product).total_quantity,
            dec!(7)
        );
    }

    #[test]
    fn test_adjustment_increase_requires_unit_cost() {
        let engine = engine();
        let scope = ScopeId::new();
        let input = AdjustmentInput {
            product: ProductId::new(),
            quantity_change: dec!(5),
            unit_cost: None,
            reason: "count correction".to_string(),
            date: Utc::now(),
        };
        assert!(matches!(
            engine.adjust_inventory(scope, &input, None),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_adjustment_increase_credits_capital() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        let input = AdjustmentInput {
            product,
            quantity_change: dec!(5),
            unit_cost: Some(dec!(1.20)),
            reason: "count correction".to_string(),
            date: Utc::now(),
        };
        let outcome = engine.adjust_inventory(scope, &input, None).unwrap();

        assert_eq!(outcome.cost, dec!(6.00));
        assert!(outcome.layer_id.is_some());
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::OwnerCapital),
            dec!(6.00)
        );
    }

    #[test]
    fn test_disassembly_allocates_by_weight_and_expenses_remainder() {
        let engine = engine();
        let scope = ScopeId::new();
        let parent = ProductId::new();
        let part_a = ProductId::new();
        let part_b = ProductId::new();

        engine
            .receive_inventory(scope, &receipt(parent, dec!(1), dec!(10.00)), None)
            .unwrap();

        let input = DisassemblyInput {
            parent,
            quantity: dec!(1),
            components: vec![
                ComponentOutput {
                    product: part_a,
                    quantity: dec!(3),
                    weight: dec!(2),
                    consumable: false,
                },
                ComponentOutput {
                    product: part_b,
                    quantity: dec!(1),
                    weight: dec!(1),
                    consumable: false,
                },
            ],
            date: Utc::now(),
        };
        let outcome = engine.disassemble(scope, &input, None).unwrap();

        assert_eq!(outcome.parent_cost, dec!(10.00));
        assert_eq!(outcome.component_layers.len(), 2);

        // Share of A: 10 * 2/3 = 6.666..., unit cost 2.2222 at scale 4.
        let a = engine.product_valuation(scope, part_a);
        assert_eq!(a.total_value, dec!(6.6666));
        // Share of B: 10 * 1/3 / 1 = 3.3333 rounded toward zero.
        let b = engine.product_valuation(scope, part_b);
        assert_eq!(b.total_value, dec!(3.3333));

        assert_eq!(outcome.expensed_remainder, dec!(0.0001));
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::InventoryAdjustment),
            dec!(0.0001)
        );
        // Parent stock is gone.
        assert_eq!(engine.product_valuation(scope, parent).total_quantity, dec!(0));
    }

    #[test]
    fn test_disassembly_expenses_consumable_share() {
        let engine = engine();
        let scope = ScopeId::new();
        let parent = ProductId::new();
        let part = ProductId::new();
        let packaging = ProductId::new();

        engine
            .receive_inventory(scope, &receipt(parent, dec!(1), dec!(8.00)), None)
            .unwrap();
        let input = DisassemblyInput {
            parent,
            quantity: dec!(1),
            components: vec![
                ComponentOutput {
                    product: part,
                    quantity: dec!(2),
                    weight: dec!(3),
                    consumable: false,
                },
                ComponentOutput {
                    product: packaging,
                    quantity: dec!(1),
                    weight: dec!(1),
                    consumable: true,
                },
            ],
            date: Utc::now(),
        };
        let outcome = engine.disassemble(scope, &input, None).unwrap();

        // Part share: 8 * 3/4 = 6.00, unit cost 3.00, fully allocated.
        assert_eq!(outcome.component_layers.len(), 1);
        assert_eq!(engine.product_valuation(scope, part).total_value, dec!(6.00));
        // The consumable's quarter is destroyed, not re-inventoried.
        assert_eq!(
            engine.product_valuation(scope, packaging).total_quantity,
            dec!(0)
        );
        assert_eq!(outcome.expensed_remainder, dec!(2.00));
    }

    #[test]
    fn test_disassembly_with_no_components_expenses_everything() {
        let engine = engine();
        let scope = ScopeId::new();
        let parent = ProductId::new();

        engine
            .receive_inventory(scope, &receipt(parent, dec!(2), dec!(4.00)), None)
            .unwrap();
        let input = DisassemblyInput {
            parent,
            quantity: dec!(2),
            components: vec![],
            date: Utc::now(),
        };
        let outcome = engine.disassemble(scope, &input, None).unwrap();

        assert_eq!(outcome.expensed_remainder, dec!(8.00));
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::InventoryAdjustment),
            dec!(8.00)
        );
    }

    #[test]
    fn test_reverse_sale_restores_layers_and_mirrors_posting() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        engine
            .receive_inventory(scope, &receipt(product, dec!(10), dec!(2.00)), None)
            .unwrap();
        let sale = SaleInput {
            product,
            quantity: dec!(4),
            sale_total: dec!(20.00),
            payment: PaymentMethod::Cash,
            sale_date: Utc::now(),
        };
        let outcome = engine.record_sale(scope, &sale, None).unwrap();

        let reversal_id = engine
            .reverse(scope, outcome.transaction_id, None)
            .unwrap();

        // Stock came back at its original cost.
        assert_eq!(
            engine.product_valuation(scope, product).total_quantity,
            dec!(10)
        );
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::SalesRevenue),
            dec!(0)
        );
        assert_eq!(
            system_balance(&engine, scope, SystemAccount::CostOfGoodsSold),
            dec!(0)
        );

        let (original, _) = engine.get_transaction(scope, outcome.transaction_id).unwrap();
        assert_eq!(original.reversed_by, Some(reversal_id));

        let (reversal, entries) = engine.get_transaction(scope, reversal_id).unwrap();
        assert!(reversal.description.starts_with("REVERSAL: "));
        assert_eq!(
            reversal.reference.reference_id,
            Some(outcome.transaction_id.into_inner())
        );
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_double_reversal_rejected() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        let outcome = engine
            .receive_inventory(scope, &receipt(product, dec!(5), dec!(1.00)), None)
            .unwrap();
        let transaction_id = outcome.transaction_id.unwrap();

        let reversal_id = engine.reverse(scope, transaction_id, None).unwrap();
        assert!(matches!(
            engine.reverse(scope, transaction_id, None),
            Err(EngineError::Ledger(LedgerError::AlreadyReversed { .. }))
        ));
        assert!(matches!(
            engine.reverse(scope, reversal_id, None),
            Err(EngineError::Ledger(LedgerError::CannotReverseReversal(_)))
        ));
    }

    #[test]
    fn test_reverse_receipt_after_partial_sale_fails_cleanly() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        let outcome = engine
            .receive_inventory(scope, &receipt(product, dec!(10), dec!(2.00)), None)
            .unwrap();
        let sale = SaleInput {
            product,
            quantity: dec!(4),
            sale_total: dec!(20.00),
            payment: PaymentMethod::Cash,
            sale_date: Utc::now(),
        };
        engine.record_sale(scope, &sale, None).unwrap();
        let version = engine.scope_version(scope);

        // The receipt's layer only holds 6 of its 10 units now.
        let result = engine.reverse(scope, outcome.transaction_id.unwrap(), None);
        assert!(result.is_err());
        assert_eq!(engine.scope_version(scope), version);
        assert_eq!(
            engine.product_valuation(scope, product).total_quantity,
            dec!(6)
        );
    }

    #[test]
    fn test_reverse_unknown_transaction() {
        let engine = engine();
        let scope = ScopeId::new();
        assert!(matches!(
            engine.reverse(scope, TransactionId::new(), None),
            Err(EngineError::Ledger(LedgerError::TransactionNotFound(_)))
        ));
    }

    #[test]
    fn test_expected_version_guards_writes() {
        let engine = engine();
        let scope = ScopeId::new();
        let product = ProductId::new();

        let version = engine.scope_version(scope);
        engine
            .receive_inventory(scope, &receipt(product, dec!(5), dec!(1.00)), Some(version))
            .unwrap();

        // A second writer holding the old version loses.
        let result =
            engine.receive_inventory(scope, &receipt(product, dec!(5), dec!(1.00)), Some(version));
        assert!(matches!(
            result,
            Err(EngineError::ConcurrentModification { .. })
        ));
    }
}
