//! # SQLite Ledger Store
//!
//! The SQLite implementation of the [`LedgerStore`] port.
//!
//! ## Atomicity
//! ```text
//! insert_product:  INSERT product ─┬─ one transaction
//!                  INSERT initial movement (qty > 0) ─┘
//!
//! apply_movement:  UPDATE quantity / last_outflow_at ─┬─ one transaction
//!                  INSERT movement entry ─────────────┘
//!
//! delete_product:  DELETE product (movements go via ON DELETE CASCADE)
//! ```
//!
//! Queries are bound at runtime (`sqlx::query_as`), with the row layout
//! matched to the `FromRow` derives on the core types.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use kardex_core::{
    LedgerStore, MovementEntry, MovementKind, MovementPlan, NewProduct, Product, StoreError,
};

use crate::error::DbError;

/// Column list matching the `Product` FromRow derive.
const PRODUCT_COLUMNS: &str =
    "id, name, category, price_cents, quantity, registered_at, last_outflow_at";

/// Column list matching the `MovementEntry` FromRow derive.
const MOVEMENT_COLUMNS: &str = "id, product_id, occurred_at, kind, quantity";

/// SQLite-backed store for products and the movement ledger.
#[derive(Debug, Clone)]
pub struct SqliteLedgerStore {
    pool: SqlitePool,
}

impl SqliteLedgerStore {
    /// Creates a new store over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteLedgerStore { pool }
    }
}

#[async_trait]
impl LedgerStore for SqliteLedgerStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");

        let products = sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(products)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(product)
    }

    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, StoreError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ?1");

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(product)
    }

    async fn insert_product(&self, new_product: &NewProduct) -> Result<Product, StoreError> {
        debug!(name = %new_product.name, "inserting product");

        let registered_at = Utc::now();
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, category, price_cents, quantity, registered_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&new_product.name)
        .bind(&new_product.category)
        .bind(new_product.price.cents())
        .bind(new_product.quantity)
        .bind(registered_at)
        .execute(&mut *tx)
        .await
        .map_err(|err| match DbError::from(err) {
            // Attach the actual name; SQLite only reports the column.
            DbError::UniqueViolation { .. } => {
                StoreError::already_exists("product", &new_product.name)
            }
            other => StoreError::from(other),
        })?;

        let id = result.last_insert_rowid();

        // Registration with starting stock is itself the first inbound
        // movement.
        if new_product.quantity > 0 {
            sqlx::query(
                r#"
                INSERT INTO movements (product_id, occurred_at, kind, quantity)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(id)
            .bind(registered_at)
            .bind(MovementKind::In)
            .bind(new_product.quantity)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;
        }

        tx.commit().await.map_err(DbError::from)?;

        Ok(Product {
            id,
            name: new_product.name.clone(),
            category: new_product.category.clone(),
            price_cents: new_product.price.cents(),
            quantity: new_product.quantity,
            registered_at,
            last_outflow_at: None,
        })
    }

    async fn apply_movement(
        &self,
        product_id: i64,
        plan: &MovementPlan,
    ) -> Result<MovementEntry, StoreError> {
        debug!(
            product_id,
            kind = plan.kind.label(),
            quantity = plan.quantity,
            "applying movement"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = ?2,
                last_outflow_at = COALESCE(?3, last_outflow_at)
            WHERE id = ?1
            "#,
        )
        .bind(product_id)
        .bind(plan.new_quantity)
        .bind(plan.outflow_at)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", product_id).into());
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO movements (product_id, occurred_at, kind, quantity)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(product_id)
        .bind(plan.occurred_at)
        .bind(plan.kind)
        .bind(plan.quantity)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        tx.commit().await.map_err(DbError::from)?;

        Ok(MovementEntry {
            id: inserted.last_insert_rowid(),
            product_id,
            occurred_at: plan.occurred_at,
            kind: plan.kind,
            quantity: plan.quantity,
        })
    }

    async fn delete_product(&self, id: i64) -> Result<(), StoreError> {
        debug!(id, "deleting product");

        // Single statement; the movement history goes with it through
        // ON DELETE CASCADE (foreign keys are enabled on every connection).
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", id).into());
        }

        Ok(())
    }

    async fn list_movements(&self) -> Result<Vec<MovementEntry>, StoreError> {
        let query = format!("SELECT {MOVEMENT_COLUMNS} FROM movements ORDER BY occurred_at, id");

        let movements = sqlx::query_as::<_, MovementEntry>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(movements)
    }

    async fn list_movements_for(&self, product_id: i64) -> Result<Vec<MovementEntry>, StoreError> {
        let query = format!(
            "SELECT {MOVEMENT_COLUMNS} FROM movements WHERE product_id = ?1 ORDER BY occurred_at, id"
        );

        let movements = sqlx::query_as::<_, MovementEntry>(&query)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(movements)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
