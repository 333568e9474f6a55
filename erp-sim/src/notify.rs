//! Notification fan-out
//!
//! Delivers newly created purchase orders to every registered subscriber
//! as an HTTP POST. Fire-and-forget per subscriber: failures are logged
//! as warnings and never affect other subscribers, the caller, or the
//! generator's forward progress. No retry, no queue — the polling
//! channel covers whatever this best-effort path drops.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use shared::error::AppError;
use shared::models::PurchaseOrder;
use tokio::sync::RwLock;

const DELIVERY_TIMEOUT_SECS: u64 = 5;

#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    subscribers: Arc<RwLock<HashSet<String>>>,
}

impl Notifier {
    pub fn new() -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DELIVERY_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Cannot build webhook client: {e}")))?;
        Ok(Self {
            client,
            subscribers: Arc::new(RwLock::new(HashSet::new())),
        })
    }

    /// Register a callback address. Membership only; duplicates are a
    /// no-op. Returns the subscriber count after the call.
    pub async fn register(&self, url: String) -> usize {
        let mut subs = self.subscribers.write().await;
        if subs.insert(url.clone()) {
            tracing::info!(callback = %url, "Subscriber registered");
        }
        subs.len()
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    /// Fan a batch of new orders out to all subscribers.
    ///
    /// Spawns one detached task per (subscriber, order); the caller does
    /// not await delivery and a slow subscriber applies no backpressure.
    pub async fn dispatch(&self, orders: &[PurchaseOrder]) {
        let subs: Vec<String> = self.subscribers.read().await.iter().cloned().collect();
        if subs.is_empty() || orders.is_empty() {
            return;
        }

        for url in subs {
            for order in orders {
                let client = self.client.clone();
                let url = url.clone();
                let order = order.clone();
                tokio::spawn(async move {
                    match client.post(&url).json(&order).send().await {
                        Ok(resp) if resp.status().is_success() => {
                            tracing::debug!(
                                callback = %url,
                                order_id = %order.order_id,
                                "Webhook delivered"
                            );
                        }
                        Ok(resp) => {
                            tracing::warn!(
                                callback = %url,
                                order_id = %order.order_id,
                                status = %resp.status(),
                                "Webhook rejected by subscriber"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(
                                callback = %url,
                                order_id = %order.order_id,
                                "Webhook delivery failed: {e}"
                            );
                        }
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registration_is_set_valued() {
        let n = Notifier::new().expect("notifier");
        assert_eq!(n.register("http://a/hook".into()).await, 1);
        assert_eq!(n.register("http://b/hook".into()).await, 2);
        // Duplicate registration does not grow the set
        assert_eq!(n.register("http://a/hook".into()).await, 2);
        assert_eq!(n.subscriber_count().await, 2);
    }

    #[tokio::test]
    async fn dispatch_without_subscribers_is_a_no_op() {
        let n = Notifier::new().expect("notifier");
        // Must return immediately and not panic
        n.dispatch(&[]).await;
    }

    #[tokio::test]
    async fn dispatch_to_unreachable_subscriber_does_not_fail_caller() {
        let n = Notifier::new().expect("notifier");
        n.register("http://127.0.0.1:1/hook".into()).await;
        let order = PurchaseOrder {
            order_id: "o-1".into(),
            tenant_id: "t-1".into(),
            item_id: "ITM-TEST".into(),
            item_name: "Test Item".into(),
            quantity: 1.0,
            unit: "kg".into(),
            unit_price: 1.0,
            currency: "EUR".into(),
            status: shared::models::OrderStatus::InApproval,
            created_at: 1,
            delivery_at: 2,
            updated_at: 1,
        };
        // Fire-and-forget: the call itself must succeed
        n.dispatch(&[order]).await;
    }
}
