//! # Ledger Store Port
//!
//! The persistence interface for products and their movement ledger.
//! Implementations own all storage details; no sqlx types appear in these
//! signatures, so the `Inventory` service can be unit-tested against an
//! in-memory fake.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::ledger::MovementPlan;
use crate::types::{MovementEntry, NewProduct, Product};

/// Persists product records and the append-only movement ledger.
///
/// # Atomicity
///
/// `insert_product` and `apply_movement` each describe one logical change
/// that touches both tables; implementations must apply them in a single
/// transaction so the quantity and the ledger can never disagree.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Lists all products, ordered by id.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Gets a product by id, or `None` if it does not exist.
    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Gets a product by its unique name, or `None` if it does not exist.
    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, StoreError>;

    /// Inserts a new product and, when the starting quantity is positive,
    /// its initial inbound movement.
    ///
    /// Returns `Err(StoreError::AlreadyExists)` when the name is taken.
    async fn insert_product(&self, new_product: &NewProduct) -> Result<Product, StoreError>;

    /// Applies a planned movement: persists the new quantity, updates the
    /// last-outflow timestamp when the plan carries one, and appends the
    /// ledger entry. Returns the appended entry.
    ///
    /// Returns `Err(StoreError::NotFound)` when the product is gone.
    async fn apply_movement(
        &self,
        product_id: i64,
        plan: &MovementPlan,
    ) -> Result<MovementEntry, StoreError>;

    /// Deletes a product together with its movement history.
    ///
    /// Returns `Err(StoreError::NotFound)` when the product does not exist.
    async fn delete_product(&self, id: i64) -> Result<(), StoreError>;

    /// Lists every movement entry, ordered by occurrence time.
    async fn list_movements(&self) -> Result<Vec<MovementEntry>, StoreError>;

    /// Lists the movement entries of one product, ordered by occurrence time.
    async fn list_movements_for(&self, product_id: i64) -> Result<Vec<MovementEntry>, StoreError>;
}
