//! Typed order client over the `orders` collection.
//!
//! Orders are written once by the storefront and only ever patched on their
//! `status` field by the admin panel. There is no delete in normal flow.

use super::{DocumentStore, Snapshot};
use crate::errors::Result;
use crate::models::{Order, OrderStatus};
use chrono::DateTime;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Collection name for order documents.
pub const ORDERS_COLLECTION: &str = "orders";

/// Client handle for the order collection.
#[derive(Clone)]
pub struct OrderClient {
    store: Arc<DocumentStore>,
}

impl OrderClient {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Subscribes to all orders; every snapshot is delivered sorted by
    /// creation date descending.
    pub fn subscribe(&self) -> OrderSubscription {
        OrderSubscription {
            rx: self.store.subscribe(ORDERS_COLLECTION),
        }
    }

    /// Writes a new order keyed by its generated id (create-or-overwrite).
    pub async fn put_order(&self, order: &Order) -> Result<()> {
        let doc = serde_json::to_value(order)?;
        debug!(order_id = %order.id, total = order.total, "writing order");
        self.store.upsert(ORDERS_COLLECTION, &order.id, doc).await
    }

    /// Patches only the `status` field of an existing order.
    pub async fn set_status(&self, order_id: &str, status: OrderStatus) -> Result<()> {
        debug!(order_id, %status, "patching order status");
        self.store
            .merge(ORDERS_COLLECTION, order_id, json!({ "status": status }))
            .await
    }
}

/// A live view of the order collection.
pub struct OrderSubscription {
    rx: watch::Receiver<Snapshot>,
}

impl OrderSubscription {
    /// Decodes the latest snapshot, sorted by creation date descending.
    /// Malformed documents are skipped with a warning.
    pub fn orders(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .rx
            .borrow()
            .docs()
            .filter_map(|doc| match serde_json::from_value(doc.clone()) {
                Ok(order) => Some(order),
                Err(e) => {
                    warn!(error = %e, "skipping malformed order document");
                    None
                }
            })
            .collect();
        orders.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date)));
        orders
    }

    /// Waits for the next snapshot. Returns `false` if the store side has
    /// gone away.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

fn parse_date(date: &str) -> i64 {
    DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;
    use crate::test_utils::setup_store;

    fn order_at(id: &str, date: &str, total: i64) -> Order {
        Order {
            id: id.to_string(),
            customer_name: "Customer".to_string(),
            address: "Ashuganj".to_string(),
            phone: "01700000000".to_string(),
            items: vec![OrderItem {
                name: "Chicken Biryani".to_string(),
                price: total,
                quantity: 1,
            }],
            total,
            status: OrderStatus::Pending,
            date: date.to_string(),
        }
    }

    #[tokio::test]
    async fn snapshots_sort_by_date_descending() -> Result<()> {
        let store = setup_store();
        let client = OrderClient::new(store);
        client
            .put_order(&order_at("ORD-1", "2026-08-01T10:00:00+00:00", 250))
            .await?;
        client
            .put_order(&order_at("ORD-3", "2026-08-03T10:00:00+00:00", 680))
            .await?;
        client
            .put_order(&order_at("ORD-2", "2026-08-02T10:00:00+00:00", 220))
            .await?;

        let ids: Vec<_> = client
            .subscribe()
            .orders()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["ORD-3", "ORD-2", "ORD-1"]);
        Ok(())
    }

    #[tokio::test]
    async fn status_patch_preserves_total_and_items() -> Result<()> {
        let store = setup_store();
        let client = OrderClient::new(store);
        let order = order_at("ORD-9", "2026-08-10T12:30:00+00:00", 680);
        client.put_order(&order).await?;

        client.set_status("ORD-9", OrderStatus::Completed).await?;

        let stored = &client.subscribe().orders()[0];
        assert_eq!(stored.status, OrderStatus::Completed);
        assert_eq!(stored.total, 680);
        assert_eq!(stored.items, order.items);
        assert_eq!(stored.customer_name, order.customer_name);

        // Any state is reachable from any state
        client.set_status("ORD-9", OrderStatus::Cancelled).await?;
        client.set_status("ORD-9", OrderStatus::Pending).await?;
        assert_eq!(
            client.subscribe().orders()[0].status,
            OrderStatus::Pending
        );
        Ok(())
    }

    #[tokio::test]
    async fn subscription_sees_new_orders() -> Result<()> {
        let store = setup_store();
        let client = OrderClient::new(store);
        let mut sub = client.subscribe();
        assert!(sub.orders().is_empty());

        client
            .put_order(&order_at("ORD-5", "2026-08-05T09:00:00+00:00", 220))
            .await?;
        assert!(sub.changed().await);
        assert_eq!(sub.orders().len(), 1);
        Ok(())
    }
}
