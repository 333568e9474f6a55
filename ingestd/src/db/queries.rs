//! Structured read access for the gateway layer
//!
//! The only interfaces the rest of the platform may depend on; nothing
//! outside this crate reads the raw or structured tables directly.

use shared::feed::ItemSummary;
use shared::models::{InventorySnapshot, OrderStatus, PurchaseOrder};
use sqlx::PgPool;

use super::BoxError;

type OrderRow = (
    String, // order_id
    String, // tenant_id
    String, // item_id
    String, // item_name
    f64,    // quantity
    String, // unit
    f64,    // unit_price
    String, // currency
    String, // status
    i64,    // created_at
    i64,    // delivery_at
    i64,    // updated_at
);

fn order_from_row(row: OrderRow) -> Result<PurchaseOrder, BoxError> {
    let status = OrderStatus::from_db(&row.8)
        .ok_or_else(|| format!("Unknown order status in store: {}", row.8))?;
    Ok(PurchaseOrder {
        order_id: row.0,
        tenant_id: row.1,
        item_id: row.2,
        item_name: row.3,
        quantity: row.4,
        unit: row.5,
        unit_price: row.6,
        currency: row.7,
        status,
        created_at: row.9,
        delivery_at: row.10,
        updated_at: row.11,
    })
}

const ORDER_COLUMNS: &str = "order_id, tenant_id, item_id, item_name, quantity, unit, \
     unit_price, currency, status, created_at, delivery_at, updated_at";

/// List purchase orders, newest-first, optionally created after `since`
pub async fn list_orders(
    pool: &PgPool,
    tenant_id: &str,
    since: Option<i64>,
    limit: i64,
) -> Result<Vec<PurchaseOrder>, BoxError> {
    let rows: Vec<OrderRow> = sqlx::query_as(&format!(
        r#"
        SELECT {ORDER_COLUMNS}
        FROM purchase_orders
        WHERE tenant_id = $1 AND created_at > $2
        ORDER BY created_at DESC, order_id
        LIMIT $3
        "#
    ))
    .bind(tenant_id)
    .bind(since.unwrap_or(i64::MIN))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(order_from_row).collect()
}

/// Fetch one purchase order by id
pub async fn get_order(
    pool: &PgPool,
    tenant_id: &str,
    order_id: &str,
) -> Result<Option<PurchaseOrder>, BoxError> {
    let row: Option<OrderRow> = sqlx::query_as(&format!(
        r#"
        SELECT {ORDER_COLUMNS}
        FROM purchase_orders
        WHERE tenant_id = $1 AND order_id = $2
        "#
    ))
    .bind(tenant_id)
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    row.map(order_from_row).transpose()
}

type SnapshotRow = (String, String, f64, String, i64);

/// Current inventory: the latest snapshot per item, or the point-in-time
/// view as of `at` when given.
pub async fn inventory(
    pool: &PgPool,
    tenant_id: &str,
    at: Option<i64>,
) -> Result<Vec<InventorySnapshot>, BoxError> {
    let rows: Vec<SnapshotRow> = sqlx::query_as(
        r#"
        SELECT DISTINCT ON (item_id) item_id, item_name, quantity, unit, as_of
        FROM inventory_snapshots
        WHERE tenant_id = $1 AND as_of <= $2
        ORDER BY item_id, as_of DESC
        "#,
    )
    .bind(tenant_id)
    .bind(at.unwrap_or(i64::MAX))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(item_id, item_name, quantity, unit, as_of)| InventorySnapshot {
            tenant_id: tenant_id.to_string(),
            item_id,
            item_name,
            quantity,
            unit,
            as_of,
        })
        .collect())
}

/// Distinct items observed in the ingested snapshot stream
pub async fn list_items(pool: &PgPool, tenant_id: &str) -> Result<Vec<ItemSummary>, BoxError> {
    let rows: Vec<(String, String, String)> = sqlx::query_as(
        r#"
        SELECT DISTINCT ON (item_id) item_id, item_name, unit
        FROM inventory_snapshots
        WHERE tenant_id = $1
        ORDER BY item_id
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(item_id, item_name, unit)| ItemSummary {
            item_id,
            item_name,
            unit,
        })
        .collect())
}
