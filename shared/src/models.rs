//! Business models shared by the simulator and the ingestion daemon

use serde::{Deserialize, Serialize};

/// A tracked inventory item (static configuration).
///
/// Loaded once at simulator startup and immutable during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Stable item identifier (e.g. "ITM-STEEL")
    pub id: String,
    /// Display name
    pub name: String,
    /// Unit of measure (kg, t, pcs, ...)
    pub unit: String,
    /// Base unit price used as the center of price jitter
    pub base_price: f64,
    /// Simulated consumption per simulated day, in `unit`
    pub daily_rate: f64,
    /// On-hand quantity at simulation start
    pub initial_qty: f64,
}

/// Purchase order lifecycle status
///
/// Transitions are monotonic: `in_approval → executed → supplied`,
/// `supplied` is terminal. `executed` may be skipped when the supply
/// deadline overtakes the execution lag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    InApproval,
    Executed,
    Supplied,
}

impl OrderStatus {
    /// Database string representation (snake_case)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::InApproval => "in_approval",
            Self::Executed => "executed",
            Self::Supplied => "supplied",
        }
    }

    /// Parse from database string value
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "in_approval" => Some(Self::InApproval),
            "executed" => Some(Self::Executed),
            "supplied" => Some(Self::Supplied),
            _ => None,
        }
    }

    /// Ordering rank used to enforce forward-only transitions
    pub fn rank(&self) -> i16 {
        match self {
            Self::InApproval => 0,
            Self::Executed => 1,
            Self::Supplied => 2,
        }
    }

    /// Terminal orders never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Supplied)
    }
}

/// A purchase order emitted by the simulator.
///
/// Created once; `status` (and the accompanying `updated_at`) are the
/// only fields ever mutated after creation. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Globally unique order identifier (UUID v4)
    pub order_id: String,
    /// Owning tenant
    pub tenant_id: String,
    /// Ordered item
    pub item_id: String,
    pub item_name: String,
    /// Ordered quantity, > 0
    pub quantity: f64,
    pub unit: String,
    /// Unit price, > 0
    pub unit_price: f64,
    pub currency: String,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Creation timestamp (simulated clock, Unix millis)
    pub created_at: i64,
    /// Expected delivery timestamp, strictly after `created_at`
    pub delivery_at: i64,
    /// Last mutation timestamp (creation or status change)
    pub updated_at: i64,
}

impl PurchaseOrder {
    /// Derived dedup identifier for the raw event log
    pub fn record_id(&self) -> &str {
        &self.order_id
    }

    /// Validate the payload invariants before accepting it for persistence
    pub fn validate(&self) -> Result<(), String> {
        if self.order_id.is_empty() {
            return Err("order_id must not be empty".into());
        }
        if self.tenant_id.is_empty() {
            return Err("tenant_id must not be empty".into());
        }
        if !(self.quantity > 0.0) || !self.quantity.is_finite() {
            return Err(format!("quantity must be positive, got {}", self.quantity));
        }
        if !(self.unit_price > 0.0) || !self.unit_price.is_finite() {
            return Err(format!("unit_price must be positive, got {}", self.unit_price));
        }
        if self.delivery_at <= self.created_at {
            return Err("delivery_at must be after created_at".into());
        }
        Ok(())
    }
}

/// A point-in-time inventory readout.
///
/// Immutable once created; `(tenant, item, as_of)` is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub tenant_id: String,
    pub item_id: String,
    pub item_name: String,
    /// On-hand quantity at `as_of`, ≥ 0
    pub quantity: f64,
    pub unit: String,
    /// Snapshot timestamp (simulated clock, Unix millis)
    pub as_of: i64,
}

impl InventorySnapshot {
    /// Derived dedup identifier for the raw event log
    pub fn record_id(&self) -> String {
        format!("{}:{}", self.item_id, self.as_of)
    }
}

/// A delivery scheduled by an open purchase order.
///
/// Ephemeral: exists between order creation and the simulated moment its
/// delivery timestamp is reached, then it is consumed exactly once.
#[derive(Debug, Clone)]
pub struct PendingDelivery {
    pub item_id: String,
    pub quantity: f64,
    pub delivery_at: i64,
    pub order_id: String,
}

/// Raw event log record types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    PurchaseOrder,
    InventorySnapshot,
}

impl RecordType {
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::InventorySnapshot => "inventory_snapshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(quantity: f64, created_at: i64, delivery_at: i64) -> PurchaseOrder {
        PurchaseOrder {
            order_id: "o-1".into(),
            tenant_id: "t-1".into(),
            item_id: "ITM-STEEL".into(),
            item_name: "Steel Coil".into(),
            quantity,
            unit: "t".into(),
            unit_price: 410.0,
            currency: "EUR".into(),
            status: OrderStatus::InApproval,
            created_at,
            delivery_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn status_db_round_trip() {
        for s in [
            OrderStatus::InApproval,
            OrderStatus::Executed,
            OrderStatus::Supplied,
        ] {
            assert_eq!(OrderStatus::from_db(s.as_db()), Some(s));
        }
        assert_eq!(OrderStatus::from_db("cancelled"), None);
    }

    #[test]
    fn status_rank_is_monotonic() {
        assert!(OrderStatus::InApproval.rank() < OrderStatus::Executed.rank());
        assert!(OrderStatus::Executed.rank() < OrderStatus::Supplied.rank());
        assert!(OrderStatus::Supplied.is_terminal());
        assert!(!OrderStatus::Executed.is_terminal());
    }

    #[test]
    fn order_validation_rejects_bad_payloads() {
        assert!(order(10.0, 100, 200).validate().is_ok());
        assert!(order(0.0, 100, 200).validate().is_err());
        assert!(order(-5.0, 100, 200).validate().is_err());
        assert!(order(f64::NAN, 100, 200).validate().is_err());
        // Delivery must be strictly after creation
        assert!(order(10.0, 200, 200).validate().is_err());
        assert!(order(10.0, 200, 100).validate().is_err());
    }

    #[test]
    fn snapshot_record_id_is_stable() {
        let snap = InventorySnapshot {
            tenant_id: "t-1".into(),
            item_id: "ITM-STEEL".into(),
            item_name: "Steel Coil".into(),
            quantity: 100.0,
            unit: "t".into(),
            as_of: 1_700_000_000_000,
        };
        assert_eq!(snap.record_id(), "ITM-STEEL:1700000000000");
        assert_eq!(snap.record_id(), snap.record_id());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&OrderStatus::InApproval).unwrap();
        assert_eq!(json, "\"in_approval\"");
    }
}
