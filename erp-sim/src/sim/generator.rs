//! Event generator: the step driver
//!
//! Owns the virtual clock and all simulator state, and advances it in
//! discrete steps. Each step: (a) replenishment orders due under the
//! policy, (b) consumption and arrived deliveries, (c) one inventory
//! snapshot per item at the new clock value, then lifecycle transitions
//! for every open order.

use std::collections::HashMap;

use shared::models::{InventorySnapshot, PendingDelivery, PurchaseOrder};
use shared::util::days_to_millis;

use crate::config::Config;
use crate::sim::clock::VirtualClock;
use crate::sim::inventory::ItemStock;
use crate::sim::lifecycle::{LifecycleTracker, StatusSchedule};
use crate::sim::replenish::ReplenishPolicy;

/// Everything one step produced
#[derive(Debug, Default)]
pub struct StepOutput {
    /// Clock value after the step
    pub now: i64,
    /// Orders created this step (webhook fan-out input)
    pub new_orders: Vec<PurchaseOrder>,
    /// Ids whose status changed this step
    pub status_changes: Vec<String>,
    /// Snapshots recorded this step
    pub snapshots: usize,
}

pub struct Simulator {
    tenant_id: String,
    clock: VirtualClock,
    stocks: Vec<ItemStock>,
    policy: ReplenishPolicy,
    lifecycle: LifecycleTracker,
    execute_lag_millis: i64,
    orders: HashMap<String, PurchaseOrder>,
    snapshots: Vec<InventorySnapshot>,
}

impl Simulator {
    /// Build a simulator starting its virtual clock at `start`.
    ///
    /// The caller decides where history begins (normally
    /// `now − backfill_days`); tests pass a fixed origin.
    pub fn new(cfg: &Config, items: Vec<shared::models::Item>, start: i64) -> Self {
        let mut policy = ReplenishPolicy::new(cfg.policy.clone(), &cfg.tenant_id, cfg.seed);
        for item in &items {
            policy.init_item(&item.id, start);
        }
        Self {
            tenant_id: cfg.tenant_id.clone(),
            clock: VirtualClock::new(start, cfg.step_days),
            stocks: items.into_iter().map(ItemStock::new).collect(),
            policy,
            lifecycle: LifecycleTracker::new(),
            execute_lag_millis: days_to_millis(cfg.policy.execute_lag_days),
            orders: HashMap::new(),
            snapshots: Vec::new(),
        }
    }

    /// Current simulated timestamp
    pub fn clock_now(&self) -> i64 {
        self.clock.now()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Fast-forward history up to (at most) `target`, step by step.
    ///
    /// Used at startup to backfill a deterministic history before live
    /// ticks begin; the caller must not deliver webhooks for these steps.
    pub fn bootstrap(&mut self, target: i64) -> usize {
        let mut steps = 0;
        while self.clock.peek_next() <= target {
            self.step();
            steps += 1;
        }
        steps
    }

    /// Advance one step. Never fails: a bad item/order is logged and
    /// skipped so it cannot halt the tick.
    pub fn step(&mut self) -> StepOutput {
        let now = self.clock.advance();
        let days = self.clock.step_days();
        let mut new_orders = Vec::new();
        let mut snapshots = 0;

        for stock in &mut self.stocks {
            // (a) replenishment: cadence + safety-stock acceleration
            for order in self.policy.step(stock, now) {
                if let Err(reason) = order.validate() {
                    tracing::warn!(
                        item_id = %stock.item.id,
                        order_id = %order.order_id,
                        "Skipping invalid generated order: {reason}"
                    );
                    continue;
                }
                stock.schedule_delivery(PendingDelivery {
                    item_id: order.item_id.clone(),
                    quantity: order.quantity,
                    delivery_at: order.delivery_at,
                    order_id: order.order_id.clone(),
                });
                self.lifecycle.track(
                    &order.order_id,
                    StatusSchedule {
                        execute_at: order.created_at + self.execute_lag_millis,
                        supply_at: order.delivery_at,
                    },
                );
                self.orders.insert(order.order_id.clone(), order.clone());
                new_orders.push(order);
            }

            // (b) consumption, then arrived deliveries
            stock.consume(days);
            let arrived = stock.apply_due_deliveries(now);
            for delivery in &arrived {
                tracing::debug!(
                    item_id = %delivery.item_id,
                    order_id = %delivery.order_id,
                    quantity = delivery.quantity,
                    "Delivery applied to inventory"
                );
            }

            // (c) one snapshot per item at the new clock value
            if stock.on_hand.is_finite() {
                self.snapshots.push(InventorySnapshot {
                    tenant_id: self.tenant_id.clone(),
                    item_id: stock.item.id.clone(),
                    item_name: stock.item.name.clone(),
                    quantity: stock.on_hand,
                    unit: stock.item.unit.clone(),
                    as_of: now,
                });
                snapshots += 1;
            } else {
                tracing::warn!(item_id = %stock.item.id, "Skipping non-finite inventory snapshot");
            }
        }

        let status_changes = self.lifecycle.advance(now, &mut self.orders);

        StepOutput {
            now,
            new_orders,
            status_changes,
            snapshots,
        }
    }

    /// Incremental order query used by the pull channel.
    ///
    /// `since` filters on creation time, `updated_since` on the last
    /// mutation (so status changes are re-observed). Results are sorted
    /// by `updated_at` so a bounded fetch never starves old records.
    pub fn orders_since(
        &self,
        since: Option<i64>,
        updated_since: Option<i64>,
        limit: usize,
    ) -> Vec<PurchaseOrder> {
        let mut result: Vec<PurchaseOrder> = self
            .orders
            .values()
            .filter(|o| since.is_none_or(|s| o.created_at > s))
            .filter(|o| updated_since.is_none_or(|s| o.updated_at > s))
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.updated_at
                .cmp(&b.updated_at)
                .then_with(|| a.order_id.cmp(&b.order_id))
        });
        result.truncate(limit);
        result
    }

    /// Incremental snapshot query used by the pull channel
    pub fn snapshots_since(&self, since: Option<i64>, limit: usize) -> Vec<InventorySnapshot> {
        // Snapshots are recorded in as-of order
        self.snapshots
            .iter()
            .filter(|s| since.is_none_or(|t| s.as_of > t))
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use shared::models::OrderStatus;
    use shared::util::MILLIS_PER_DAY;

    fn sim(seed: u64) -> Simulator {
        let cfg = Config {
            seed: Some(seed),
            ..Config::default()
        };
        let items = catalog::load_items(None).unwrap();
        Simulator::new(&cfg, items, 0)
    }

    #[test]
    fn bootstrap_is_deterministic_per_seed() {
        let mut a = sim(99);
        let mut b = sim(99);
        let target = 180 * MILLIS_PER_DAY;
        assert_eq!(a.bootstrap(target), b.bootstrap(target));
        assert_eq!(a.order_count(), b.order_count());
        assert_eq!(a.snapshot_count(), b.snapshot_count());

        let sa = a.snapshots_since(None, usize::MAX);
        let sb = b.snapshots_since(None, usize::MAX);
        for (x, y) in sa.iter().zip(&sb) {
            assert_eq!(x.item_id, y.item_id);
            assert_eq!(x.as_of, y.as_of);
            assert_eq!(x.quantity, y.quantity);
        }
    }

    #[test]
    fn inventory_is_never_negative() {
        let mut s = sim(3);
        for _ in 0..200 {
            s.step();
        }
        for snap in s.snapshots_since(None, usize::MAX) {
            assert!(snap.quantity >= 0.0, "negative on-hand in {}", snap.item_id);
        }
    }

    #[test]
    fn one_snapshot_per_item_per_step_with_unique_keys() {
        let mut s = sim(5);
        let items = catalog::load_items(None).unwrap().len();
        let out = s.step();
        assert_eq!(out.snapshots, items);

        s.step();
        let all = s.snapshots_since(None, usize::MAX);
        let mut keys: Vec<String> = all.iter().map(|x| x.record_id()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), all.len(), "duplicate (item, as_of) key");
    }

    #[test]
    fn statuses_only_move_forward_across_a_run() {
        let mut s = sim(11);
        let mut last_seen: HashMap<String, OrderStatus> = HashMap::new();
        for _ in 0..100 {
            s.step();
            for order in s.orders_since(None, None, usize::MAX) {
                if let Some(prev) = last_seen.get(&order.order_id) {
                    assert!(
                        prev.rank() <= order.status.rank(),
                        "backward transition on {}",
                        order.order_id
                    );
                }
                last_seen.insert(order.order_id.clone(), order.status);
            }
        }
        // A 100-step run must have driven some orders to terminal state
        assert!(
            last_seen.values().any(|st| st.is_terminal()),
            "no order ever reached supplied"
        );
    }

    #[test]
    fn orders_since_filters_and_bounds() {
        let mut s = sim(17);
        s.bootstrap(180 * MILLIS_PER_DAY);
        let all = s.orders_since(None, None, usize::MAX);
        assert!(!all.is_empty());

        let mid = all[all.len() / 2].created_at;
        for order in s.orders_since(Some(mid), None, usize::MAX) {
            assert!(order.created_at > mid);
        }

        assert!(s.orders_since(None, None, 3).len() <= 3);

        // updated_since sees status-only mutations
        let horizon = s.clock_now();
        let out = s.step();
        if !out.status_changes.is_empty() {
            let fresh = s.orders_since(None, Some(horizon), usize::MAX);
            for id in &out.status_changes {
                assert!(fresh.iter().any(|o| &o.order_id == id));
            }
        }
    }

    #[test]
    fn step_output_orders_match_store() {
        let mut s = sim(23);
        let mut emitted = 0;
        for _ in 0..50 {
            emitted += s.step().new_orders.len();
        }
        assert_eq!(emitted, s.order_count());
    }
}
