//! Purchase order lifecycle
//!
//! Each order carries a status schedule attached at creation: an
//! execute-at timestamp and a supply-at timestamp (the delivery time).
//! On every step all non-terminal orders are advanced; a terminal
//! order's schedule entry is discarded.

use std::collections::HashMap;

use shared::models::{OrderStatus, PurchaseOrder};

/// Status schedule attached to an order at creation
#[derive(Debug, Clone, Copy)]
pub struct StatusSchedule {
    /// Clock value at which the order leaves `in_approval`
    pub execute_at: i64,
    /// Clock value at which the order becomes `supplied` (= delivery)
    pub supply_at: i64,
}

#[derive(Debug, Default)]
pub struct LifecycleTracker {
    schedules: HashMap<String, StatusSchedule>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a schedule to a newly created order
    pub fn track(&mut self, order_id: &str, schedule: StatusSchedule) {
        self.schedules.insert(order_id.to_string(), schedule);
    }

    /// Orders still being tracked (non-terminal)
    pub fn open_count(&self) -> usize {
        self.schedules.len()
    }

    /// Advance every tracked order against the new clock value.
    ///
    /// Returns the ids whose status changed. Transitions only ever move
    /// forward; `supplied` may skip `executed` when both deadlines have
    /// passed. Supplied orders are dropped from the tracker.
    pub fn advance(
        &mut self,
        now: i64,
        orders: &mut HashMap<String, PurchaseOrder>,
    ) -> Vec<String> {
        let mut changed = Vec::new();

        self.schedules.retain(|order_id, schedule| {
            let Some(order) = orders.get_mut(order_id) else {
                // Schedule without an order is a bug; drop it rather than
                // tracking it forever.
                tracing::warn!(order_id = %order_id, "Dropping orphan status schedule");
                return false;
            };

            if now >= schedule.supply_at {
                order.status = OrderStatus::Supplied;
                order.updated_at = now;
                changed.push(order_id.clone());
                return false; // terminal, garbage-collect
            }

            if now >= schedule.execute_at && order.status == OrderStatus::InApproval {
                order.status = OrderStatus::Executed;
                order.updated_at = now;
                changed.push(order_id.clone());
            }
            true
        });

        changed
    }
}
