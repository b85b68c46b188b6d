//! End-to-end flow of the inventory service over the real SQLite store:
//! register, move stock in and out, hit the insufficient-stock wall,
//! delete with cascade.

use std::sync::Arc;

use chrono::NaiveDate;

use kardex_core::{Inventory, InventoryError, Money, MovementKind};
use kardex_db::{Database, DbConfig};

async fn inventory() -> Inventory {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    Inventory::new(Arc::new(db.ledger()))
}

#[tokio::test]
async fn widget_scenario() {
    let inv = inventory().await;

    // Register "Widget", category "Tools", $10.00, quantity 5.
    let product = inv
        .register_product("Widget", Some("Tools"), Money::from_cents(1000), 5)
        .await
        .unwrap();
    assert_eq!(product.quantity, 5);

    let movements = inv.list_movements_for(product.id).await.unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].kind, MovementKind::In);
    assert_eq!(movements[0].quantity, 5);

    // Outbound 3 units, dated 2025-01-10.
    let out_date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    let change = inv
        .record_outflow(product.id, 3, Some(out_date))
        .await
        .unwrap();
    assert_eq!(change.product.quantity, 2);
    assert_eq!(
        change.product.last_outflow_at.unwrap().date_naive(),
        out_date
    );

    let movement = change.movement.unwrap();
    assert_eq!(movement.kind, MovementKind::Out);
    assert_eq!(movement.quantity, 3);

    // Outbound 5 units: rejected, nothing changes.
    let err = inv.record_outflow(product.id, 5, None).await.unwrap_err();
    assert!(matches!(
        err,
        InventoryError::InsufficientStock {
            available: 2,
            requested: 5
        }
    ));

    let unchanged = inv.get_product(product.id).await.unwrap();
    assert_eq!(unchanged.quantity, 2);
    assert_eq!(
        unchanged.last_outflow_at.unwrap().date_naive(),
        out_date
    );
    assert_eq!(inv.list_movements_for(product.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_name_keeps_existing_record() {
    let inv = inventory().await;

    inv.register_product("Widget", Some("Tools"), Money::from_cents(1000), 5)
        .await
        .unwrap();

    let err = inv
        .register_product("Widget", None, Money::from_cents(50), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::DuplicateName(_)));

    let products = inv.list_products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price_cents, 1000);
    assert_eq!(products[0].quantity, 5);
}

#[tokio::test]
async fn delete_removes_product_and_history() {
    let inv = inventory().await;

    let keep = inv
        .register_product("Keep", None, Money::from_cents(100), 2)
        .await
        .unwrap();
    let gone = inv
        .register_product("Gone", None, Money::from_cents(100), 4)
        .await
        .unwrap();
    inv.record_outflow(gone.id, 1, None).await.unwrap();

    inv.remove_product(gone.id).await.unwrap();

    assert!(matches!(
        inv.get_product(gone.id).await,
        Err(InventoryError::ProductNotFound(_))
    ));
    assert!(inv.list_movements_for(gone.id).await.unwrap().is_empty());

    // The untouched product and its ledger survive.
    assert_eq!(inv.get_product(keep.id).await.unwrap().quantity, 2);
    assert_eq!(inv.list_movements_for(keep.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn ledger_matches_every_accepted_change() {
    let inv = inventory().await;

    let product = inv
        .register_product("Widget", None, Money::from_cents(500), 10)
        .await
        .unwrap();

    inv.record_outflow(product.id, 4, None).await.unwrap();
    inv.record_inflow(product.id, 7).await.unwrap();
    inv.record_outflow(product.id, 13, None).await.unwrap();
    // 10 - 4 + 7 - 13 = 0
    assert_eq!(inv.get_product(product.id).await.unwrap().quantity, 0);

    let movements = inv.list_movements_for(product.id).await.unwrap();
    let kinds: Vec<_> = movements.iter().map(|m| (m.kind, m.quantity)).collect();
    assert_eq!(
        kinds,
        vec![
            (MovementKind::In, 10),
            (MovementKind::Out, 4),
            (MovementKind::In, 7),
            (MovementKind::Out, 13),
        ]
    );

    // Rejected updates leave no trace.
    assert!(inv.record_outflow(product.id, 1, None).await.is_err());
    assert_eq!(inv.list_movements_for(product.id).await.unwrap().len(), 4);
}
