//! Idempotent persistence
//!
//! One atomic unit per event: insert the raw payload into the
//! append-only log keyed by (tenant, record-type, derived-id) with
//! conflict-do-nothing, resolve the log row id whether fresh or
//! pre-existing, then upsert the structured record keyed by its natural
//! key. Any failure rolls back that single record's unit; siblings in
//! the same batch are unaffected.

use shared::models::{InventorySnapshot, PurchaseOrder, RecordType};
use shared::util::now_millis;
use sqlx::{PgPool, Postgres, Transaction};

use super::BoxError;

/// What the store call did for the raw log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// First time this logical event was seen
    Inserted,
    /// Already present — the write was a no-op (not an error)
    Duplicate,
}

/// Persist one purchase order exactly once.
///
/// Duplicates are no-ops except that a later lifecycle status still
/// updates the structured row — guarded so a backward transition never
/// persists, no matter how stale the arriving payload is.
pub async fn store_order(pool: &PgPool, order: &PurchaseOrder) -> Result<StoreOutcome, BoxError> {
    order.validate()?;

    let mut tx = pool.begin().await?;
    let payload = serde_json::to_value(order)?;
    let (raw_event_id, inserted) = insert_raw(
        &mut tx,
        &order.tenant_id,
        RecordType::PurchaseOrder,
        order.record_id(),
        &payload,
    )
    .await?;

    sqlx::query(
        r#"
        INSERT INTO purchase_orders (
            order_id, tenant_id, item_id, item_name, quantity, unit,
            unit_price, currency, status, created_at, delivery_at,
            updated_at, raw_event_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ON CONFLICT (order_id)
        DO UPDATE SET status = EXCLUDED.status,
                      updated_at = EXCLUDED.updated_at
        WHERE CASE purchase_orders.status
                  WHEN 'in_approval' THEN 0
                  WHEN 'executed' THEN 1
                  ELSE 2
              END
            < CASE EXCLUDED.status
                  WHEN 'in_approval' THEN 0
                  WHEN 'executed' THEN 1
                  ELSE 2
              END
        "#,
    )
    .bind(&order.order_id)
    .bind(&order.tenant_id)
    .bind(&order.item_id)
    .bind(&order.item_name)
    .bind(order.quantity)
    .bind(&order.unit)
    .bind(order.unit_price)
    .bind(&order.currency)
    .bind(order.status.as_db())
    .bind(order.created_at)
    .bind(order.delivery_at)
    .bind(order.updated_at)
    .bind(raw_event_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(if inserted {
        StoreOutcome::Inserted
    } else {
        StoreOutcome::Duplicate
    })
}

/// Persist one inventory snapshot exactly once.
///
/// Snapshots are immutable, so the structured write is insert-or-ignore
/// on the natural key (tenant, item, as_of).
pub async fn store_snapshot(
    pool: &PgPool,
    snapshot: &InventorySnapshot,
) -> Result<StoreOutcome, BoxError> {
    if !(snapshot.quantity >= 0.0) || !snapshot.quantity.is_finite() {
        return Err(format!(
            "snapshot quantity must be non-negative, got {}",
            snapshot.quantity
        )
        .into());
    }

    let mut tx = pool.begin().await?;
    let payload = serde_json::to_value(snapshot)?;
    let record_id = snapshot.record_id();
    let (raw_event_id, inserted) = insert_raw(
        &mut tx,
        &snapshot.tenant_id,
        RecordType::InventorySnapshot,
        &record_id,
        &payload,
    )
    .await?;

    sqlx::query(
        r#"
        INSERT INTO inventory_snapshots (
            tenant_id, item_id, as_of, item_name, quantity, unit, raw_event_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (tenant_id, item_id, as_of) DO NOTHING
        "#,
    )
    .bind(&snapshot.tenant_id)
    .bind(&snapshot.item_id)
    .bind(snapshot.as_of)
    .bind(&snapshot.item_name)
    .bind(snapshot.quantity)
    .bind(&snapshot.unit)
    .bind(raw_event_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(if inserted {
        StoreOutcome::Inserted
    } else {
        StoreOutcome::Duplicate
    })
}

/// Insert into the raw log, returning the row id whether it was just
/// inserted or already existed.
async fn insert_raw(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: &str,
    record_type: RecordType,
    record_id: &str,
    payload: &serde_json::Value,
) -> Result<(i64, bool), sqlx::Error> {
    let fresh: Option<(i64,)> = sqlx::query_as(
        r#"
        INSERT INTO raw_events (tenant_id, record_type, record_id, payload, recorded_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (tenant_id, record_type, record_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(tenant_id)
    .bind(record_type.as_db())
    .bind(record_id)
    .bind(payload)
    .bind(now_millis())
    .fetch_optional(&mut **tx)
    .await?;

    match fresh {
        Some((id,)) => Ok((id, true)),
        None => {
            let (id,): (i64,) = sqlx::query_as(
                r#"
                SELECT id FROM raw_events
                WHERE tenant_id = $1 AND record_type = $2 AND record_id = $3
                "#,
            )
            .bind(tenant_id)
            .bind(record_type.as_db())
            .bind(record_id)
            .fetch_one(&mut **tx)
            .await?;
            Ok((id, false))
        }
    }
}
