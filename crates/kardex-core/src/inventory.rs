//! # Inventory Service
//!
//! The operations behind every menu entry: register, move stock, delete,
//! list. Owns the business rules; persistence goes through the injected
//! [`LedgerStore`] port, so the whole service is testable against an
//! in-memory fake (see the tests below).
//!
//! ## Operation Flow
//! ```text
//! register_product ── validate ── duplicate check ── store.insert_product
//! record_inflow  ──┐
//! record_outflow ──┴─ adjust_stock ── plan_movement ── store.apply_movement
//! remove_product ── existence check ── store.delete_product (cascades)
//! ```

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::{InventoryError, InventoryResult, StoreError};
use crate::ledger;
use crate::money::Money;
use crate::store::LedgerStore;
use crate::types::{MovementEntry, NewProduct, Product};
use crate::validation;

// =============================================================================
// Stock Change
// =============================================================================

/// Outcome of a stock adjustment: the product after the change and the
/// ledger entry that was appended (`None` for a zero-delta no-op).
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub product: Product,
    pub movement: Option<MovementEntry>,
}

// =============================================================================
// Inventory
// =============================================================================

/// Inventory operations over an injected ledger store.
#[derive(Clone)]
pub struct Inventory {
    store: Arc<dyn LedgerStore>,
}

impl Inventory {
    /// Creates an inventory service backed by the given store.
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Inventory { store }
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Registers a new product.
    ///
    /// Validates the inputs, rejects duplicate names without mutating
    /// state, and records the initial inbound movement when the starting
    /// quantity is positive.
    pub async fn register_product(
        &self,
        name: &str,
        category: Option<&str>,
        price: Money,
        quantity: i64,
    ) -> InventoryResult<Product> {
        let name = validation::validate_product_name(name)?;
        let category = validation::validate_category(category)?;
        validation::validate_price(price)?;
        validation::validate_initial_quantity(quantity)?;

        if self.store.find_product_by_name(&name).await?.is_some() {
            return Err(InventoryError::DuplicateName(name));
        }

        let new_product = NewProduct {
            name,
            category,
            price,
            quantity,
        };

        let product = self
            .store
            .insert_product(&new_product)
            .await
            .map_err(|err| match err {
                // The UNIQUE constraint may still fire underneath us.
                StoreError::AlreadyExists { value, .. } => InventoryError::DuplicateName(value),
                other => InventoryError::Store(other),
            })?;

        info!(id = product.id, name = %product.name, "registered product");
        Ok(product)
    }

    // -------------------------------------------------------------------------
    // Stock Movements
    // -------------------------------------------------------------------------

    /// Records an inbound movement of `quantity` units.
    pub async fn record_inflow(&self, product_id: i64, quantity: i64) -> InventoryResult<StockChange> {
        validation::validate_movement_quantity(quantity)?;
        self.adjust_stock(product_id, quantity, None).await
    }

    /// Records an outbound movement of `quantity` units, optionally dated
    /// explicitly (recorded as the product's last outflow).
    pub async fn record_outflow(
        &self,
        product_id: i64,
        quantity: i64,
        out_date: Option<NaiveDate>,
    ) -> InventoryResult<StockChange> {
        validation::validate_movement_quantity(quantity)?;
        self.adjust_stock(product_id, -quantity, out_date).await
    }

    /// Applies a signed quantity delta to a product.
    ///
    /// The contract of the quantity updater: `NotFound` for unknown
    /// products, `InsufficientStock` when the delta would drive the
    /// quantity negative (state untouched), a silent no-op for zero, and
    /// exactly one ledger entry for every accepted non-zero delta.
    pub async fn adjust_stock(
        &self,
        product_id: i64,
        delta: i64,
        explicit_out_date: Option<NaiveDate>,
    ) -> InventoryResult<StockChange> {
        let product = self.get_product(product_id).await?;

        let Some(plan) = ledger::plan_movement(product.quantity, delta, explicit_out_date, Utc::now())?
        else {
            return Ok(StockChange {
                product,
                movement: None,
            });
        };

        let movement = self
            .store
            .apply_movement(product.id, &plan)
            .await
            .map_err(|err| match err {
                StoreError::NotFound { .. } => InventoryError::ProductNotFound(product_id),
                other => InventoryError::Store(other),
            })?;

        let mut product = product;
        product.quantity = plan.new_quantity;
        if plan.outflow_at.is_some() {
            product.last_outflow_at = plan.outflow_at;
        }

        info!(
            id = product.id,
            kind = movement.kind.label(),
            quantity = movement.quantity,
            on_hand = product.quantity,
            "recorded stock movement"
        );
        Ok(StockChange {
            product,
            movement: Some(movement),
        })
    }

    // -------------------------------------------------------------------------
    // Deletion
    // -------------------------------------------------------------------------

    /// Deletes a product and its whole movement history. Returns the
    /// removed product.
    pub async fn remove_product(&self, product_id: i64) -> InventoryResult<Product> {
        let product = self.get_product(product_id).await?;

        self.store
            .delete_product(product_id)
            .await
            .map_err(|err| match err {
                StoreError::NotFound { .. } => InventoryError::ProductNotFound(product_id),
                other => InventoryError::Store(other),
            })?;

        info!(id = product.id, name = %product.name, "deleted product");
        Ok(product)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Gets a product by id, failing with `ProductNotFound`.
    pub async fn get_product(&self, product_id: i64) -> InventoryResult<Product> {
        self.store
            .get_product(product_id)
            .await?
            .ok_or(InventoryError::ProductNotFound(product_id))
    }

    /// Lists all products, ordered by id.
    pub async fn list_products(&self) -> InventoryResult<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }

    /// Lists the full movement ledger, ordered by occurrence time.
    pub async fn list_movements(&self) -> InventoryResult<Vec<MovementEntry>> {
        Ok(self.store.list_movements().await?)
    }

    /// Lists one product's movement history, ordered by occurrence time.
    pub async fn list_movements_for(&self, product_id: i64) -> InventoryResult<Vec<MovementEntry>> {
        Ok(self.store.list_movements_for(product_id).await?)
    }
}

// =============================================================================
// Unit Tests (against an in-memory fake store)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MovementPlan;
    use crate::types::MovementKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory `LedgerStore` mirroring the semantics of the SQLite
    /// adapter, minus the SQL.
    #[derive(Default)]
    struct MemoryStore {
        inner: Mutex<MemoryState>,
    }

    #[derive(Default)]
    struct MemoryState {
        products: Vec<Product>,
        movements: Vec<MovementEntry>,
        last_product_id: i64,
        last_movement_id: i64,
    }

    #[async_trait]
    impl LedgerStore for MemoryStore {
        async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
            Ok(self.inner.lock().unwrap().products.clone())
        }

        async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
            let state = self.inner.lock().unwrap();
            Ok(state.products.iter().find(|p| p.id == id).cloned())
        }

        async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, StoreError> {
            let state = self.inner.lock().unwrap();
            Ok(state.products.iter().find(|p| p.name == name).cloned())
        }

        async fn insert_product(&self, new_product: &NewProduct) -> Result<Product, StoreError> {
            let mut state = self.inner.lock().unwrap();
            if state.products.iter().any(|p| p.name == new_product.name) {
                return Err(StoreError::already_exists("product", &new_product.name));
            }

            state.last_product_id += 1;
            let product = Product {
                id: state.last_product_id,
                name: new_product.name.clone(),
                category: new_product.category.clone(),
                price_cents: new_product.price.cents(),
                quantity: new_product.quantity,
                registered_at: Utc::now(),
                last_outflow_at: None,
            };
            state.products.push(product.clone());

            if new_product.quantity > 0 {
                state.last_movement_id += 1;
                let entry = MovementEntry {
                    id: state.last_movement_id,
                    product_id: product.id,
                    occurred_at: product.registered_at,
                    kind: MovementKind::In,
                    quantity: new_product.quantity,
                };
                state.movements.push(entry);
            }

            Ok(product)
        }

        async fn apply_movement(
            &self,
            product_id: i64,
            plan: &MovementPlan,
        ) -> Result<MovementEntry, StoreError> {
            let mut state = self.inner.lock().unwrap();
            state.last_movement_id += 1;
            let id = state.last_movement_id;

            let product = state
                .products
                .iter_mut()
                .find(|p| p.id == product_id)
                .ok_or_else(|| StoreError::not_found("product", product_id))?;

            product.quantity = plan.new_quantity;
            if plan.outflow_at.is_some() {
                product.last_outflow_at = plan.outflow_at;
            }

            let entry = MovementEntry {
                id,
                product_id,
                occurred_at: plan.occurred_at,
                kind: plan.kind,
                quantity: plan.quantity,
            };
            state.movements.push(entry.clone());
            Ok(entry)
        }

        async fn delete_product(&self, id: i64) -> Result<(), StoreError> {
            let mut state = self.inner.lock().unwrap();
            let before = state.products.len();
            state.products.retain(|p| p.id != id);
            if state.products.len() == before {
                return Err(StoreError::not_found("product", id));
            }
            state.movements.retain(|m| m.product_id != id);
            Ok(())
        }

        async fn list_movements(&self) -> Result<Vec<MovementEntry>, StoreError> {
            Ok(self.inner.lock().unwrap().movements.clone())
        }

        async fn list_movements_for(
            &self,
            product_id: i64,
        ) -> Result<Vec<MovementEntry>, StoreError> {
            let state = self.inner.lock().unwrap();
            Ok(state
                .movements
                .iter()
                .filter(|m| m.product_id == product_id)
                .cloned()
                .collect())
        }
    }

    fn inventory() -> Inventory {
        Inventory::new(Arc::new(MemoryStore::default()))
    }

    #[tokio::test]
    async fn test_register_logs_initial_inflow() {
        let inv = inventory();

        let product = inv
            .register_product("Widget", Some("Tools"), Money::from_cents(1000), 5)
            .await
            .unwrap();

        assert_eq!(product.quantity, 5);
        assert_eq!(product.last_outflow_at, None);

        let movements = inv.list_movements().await.unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].kind, MovementKind::In);
        assert_eq!(movements[0].quantity, 5);
        assert_eq!(movements[0].product_id, product.id);
    }

    #[tokio::test]
    async fn test_register_with_zero_quantity_logs_nothing() {
        let inv = inventory();

        inv.register_product("Widget", None, Money::from_cents(1000), 0)
            .await
            .unwrap();

        assert!(inv.list_movements().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_without_mutation() {
        let inv = inventory();

        let original = inv
            .register_product("Widget", Some("Tools"), Money::from_cents(1000), 5)
            .await
            .unwrap();

        let err = inv
            .register_product("Widget", Some("Other"), Money::from_cents(9999), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateName(name) if name == "Widget"));

        // The existing record is untouched and no extra ledger entry exists.
        let products = inv.list_products().await.unwrap();
        assert_eq!(products, vec![original]);
        assert_eq!(inv.list_movements().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_validation_failures() {
        let inv = inventory();

        assert!(matches!(
            inv.register_product("  ", None, Money::from_cents(100), 1).await,
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            inv.register_product("Widget", None, Money::from_cents(-1), 1).await,
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            inv.register_product("Widget", None, Money::from_cents(100), -1).await,
            Err(InventoryError::Validation(_))
        ));

        assert!(inv.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_outflow_updates_quantity_and_outflow_date() {
        let inv = inventory();
        let product = inv
            .register_product("Widget", Some("Tools"), Money::from_cents(1000), 5)
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let change = inv
            .record_outflow(product.id, 3, Some(date))
            .await
            .unwrap();

        assert_eq!(change.product.quantity, 2);
        let outflow = change.product.last_outflow_at.unwrap();
        assert_eq!(outflow.date_naive(), date);

        let movement = change.movement.unwrap();
        assert_eq!(movement.kind, MovementKind::Out);
        assert_eq!(movement.quantity, 3);
    }

    #[tokio::test]
    async fn test_inflow_appends_single_entry() {
        let inv = inventory();
        let product = inv
            .register_product("Widget", None, Money::from_cents(1000), 5)
            .await
            .unwrap();

        let change = inv.record_inflow(product.id, 7).await.unwrap();

        assert_eq!(change.product.quantity, 12);
        assert_eq!(change.product.last_outflow_at, None);
        assert_eq!(inv.list_movements().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_state_unchanged() {
        let inv = inventory();
        let product = inv
            .register_product("Widget", None, Money::from_cents(1000), 2)
            .await
            .unwrap();

        let err = inv.record_outflow(product.id, 3, None).await.unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InsufficientStock {
                available: 2,
                requested: 3
            }
        ));

        let unchanged = inv.get_product(product.id).await.unwrap();
        assert_eq!(unchanged.quantity, 2);
        assert_eq!(unchanged.last_outflow_at, None);
        assert_eq!(inv.list_movements().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_delta_is_silent_noop() {
        let inv = inventory();
        let product = inv
            .register_product("Widget", None, Money::from_cents(1000), 5)
            .await
            .unwrap();

        let change = inv.adjust_stock(product.id, 0, None).await.unwrap();

        assert_eq!(change.movement, None);
        assert_eq!(change.product.quantity, 5);
        assert_eq!(inv.list_movements().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_movement_quantity_must_be_positive() {
        let inv = inventory();
        let product = inv
            .register_product("Widget", None, Money::from_cents(1000), 5)
            .await
            .unwrap();

        assert!(matches!(
            inv.record_inflow(product.id, 0).await,
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            inv.record_outflow(product.id, -2, None).await,
            Err(InventoryError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_product_reported_not_found() {
        let inv = inventory();

        assert!(matches!(
            inv.record_inflow(99, 1).await,
            Err(InventoryError::ProductNotFound(99))
        ));
        assert!(matches!(
            inv.remove_product(99).await,
            Err(InventoryError::ProductNotFound(99))
        ));
        assert!(matches!(
            inv.get_product(99).await,
            Err(InventoryError::ProductNotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_remove_product_cascades_to_movements() {
        let inv = inventory();
        let keep = inv
            .register_product("Keep", None, Money::from_cents(100), 1)
            .await
            .unwrap();
        let gone = inv
            .register_product("Gone", None, Money::from_cents(100), 4)
            .await
            .unwrap();
        inv.record_outflow(gone.id, 2, None).await.unwrap();

        let removed = inv.remove_product(gone.id).await.unwrap();
        assert_eq!(removed.name, "Gone");

        assert!(matches!(
            inv.get_product(gone.id).await,
            Err(InventoryError::ProductNotFound(_))
        ));
        assert!(inv.list_movements_for(gone.id).await.unwrap().is_empty());

        // The other product's ledger survives.
        assert_eq!(inv.list_movements_for(keep.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_quantity_never_negative_over_sequence() {
        let inv = inventory();
        let product = inv
            .register_product("Widget", None, Money::from_cents(1000), 3)
            .await
            .unwrap();

        let deltas = [-2, 4, -5, -1, 2, -3];
        for delta in deltas {
            let _ = inv.adjust_stock(product.id, delta, None).await;
            let current = inv.get_product(product.id).await.unwrap();
            assert!(current.quantity >= 0, "quantity went negative");
        }
    }
}
