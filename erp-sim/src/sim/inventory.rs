//! Inventory model
//!
//! Pure per-item state: on-hand quantity, consumption, and pending
//! deliveries. On-hand never goes negative; each pending delivery is
//! applied exactly once, at or after its delivery timestamp.

use shared::models::{Item, PendingDelivery};

#[derive(Debug, Clone)]
pub struct ItemStock {
    pub item: Item,
    pub on_hand: f64,
    pending: Vec<PendingDelivery>,
}

impl ItemStock {
    pub fn new(item: Item) -> Self {
        Self {
            on_hand: item.initial_qty,
            item,
            pending: Vec::new(),
        }
    }

    /// Apply `days` of consumption, floored at zero
    pub fn consume(&mut self, days: f64) {
        self.on_hand = (self.on_hand - self.item.daily_rate * days).max(0.0);
    }

    /// Register a delivery scheduled by a new purchase order
    pub fn schedule_delivery(&mut self, delivery: PendingDelivery) {
        self.pending.push(delivery);
    }

    /// Apply every pending delivery whose timestamp has been reached,
    /// removing it. Returns the applied deliveries (for logging).
    pub fn apply_due_deliveries(&mut self, now: i64) -> Vec<PendingDelivery> {
        let mut applied = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].delivery_at <= now {
                let delivery = self.pending.swap_remove(i);
                self.on_hand += delivery.quantity;
                applied.push(delivery);
            } else {
                i += 1;
            }
        }
        applied
    }

    /// Days of cover: how long current stock lasts at the daily rate.
    /// Infinite when the item is not being consumed.
    pub fn days_of_cover(&self) -> f64 {
        if self.item.daily_rate <= 0.0 {
            f64::INFINITY
        } else {
            self.on_hand / self.item.daily_rate
        }
    }

    /// Open deliveries not yet arrived
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(rate: f64, initial: f64) -> ItemStock {
        ItemStock::new(Item {
            id: "ITM-TEST".into(),
            name: "Test Item".into(),
            unit: "kg".into(),
            base_price: 10.0,
            daily_rate: rate,
            initial_qty: initial,
        })
    }

    fn delivery(quantity: f64, delivery_at: i64) -> PendingDelivery {
        PendingDelivery {
            item_id: "ITM-TEST".into(),
            quantity,
            delivery_at,
            order_id: "o-1".into(),
        }
    }

    #[test]
    fn consumption_floors_at_zero() {
        let mut s = stock(100.0, 250.0);
        s.consume(2.0);
        assert_eq!(s.on_hand, 50.0);
        s.consume(7.0);
        assert_eq!(s.on_hand, 0.0);
        s.consume(1.0);
        assert_eq!(s.on_hand, 0.0);
    }

    #[test]
    fn deliveries_apply_exactly_once_at_or_after_due() {
        let mut s = stock(0.0, 100.0);
        s.schedule_delivery(delivery(40.0, 1_000));
        s.schedule_delivery(delivery(60.0, 2_000));

        assert!(s.apply_due_deliveries(500).is_empty());
        assert_eq!(s.on_hand, 100.0);

        let applied = s.apply_due_deliveries(1_000);
        assert_eq!(applied.len(), 1);
        assert_eq!(s.on_hand, 140.0);

        // Re-applying at the same instant must be a no-op
        assert!(s.apply_due_deliveries(1_000).is_empty());
        assert_eq!(s.on_hand, 140.0);

        let applied = s.apply_due_deliveries(5_000);
        assert_eq!(applied.len(), 1);
        assert_eq!(s.on_hand, 200.0);
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn days_of_cover_is_infinite_without_consumption() {
        assert!(stock(0.0, 100.0).days_of_cover().is_infinite());
        assert_eq!(stock(10.0, 100.0).days_of_cover(), 10.0);
        assert_eq!(stock(10.0, 0.0).days_of_cover(), 0.0);
    }
}
