//! Typed catalog client over the `foods` collection.
//!
//! Documents are full [`FoodItem`]s keyed by stringified id. Review appends
//! go through a read-modify-write prepend merged into the `reviews` field
//! only, so concurrent appenders from different clients can still lose an
//! update to each other; that race is part of the documented store contract,
//! not something this client papers over.

use super::{DocumentStore, Snapshot};
use crate::errors::{Error, Result};
use crate::models::{FoodItem, Review};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Collection name for menu item documents.
pub const CATALOG_COLLECTION: &str = "foods";

/// Client handle for the catalog collection.
#[derive(Clone)]
pub struct CatalogClient {
    store: Arc<DocumentStore>,
}

impl CatalogClient {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Subscribes to the live catalog. The subscription yields the full
    /// current item set, in arrival order, on every remote change.
    pub fn subscribe(&self) -> CatalogSubscription {
        CatalogSubscription {
            rx: self.store.subscribe(CATALOG_COLLECTION),
        }
    }

    /// Writes a full menu item keyed by its id (overwrite semantics).
    pub async fn upsert_item(&self, item: &FoodItem) -> Result<()> {
        let doc = serde_json::to_value(item)?;
        self.store.upsert(CATALOG_COLLECTION, &item.doc_key(), doc).await
    }

    /// Prepends a review to the item's embedded review list via a
    /// field-level merge that leaves every other field untouched.
    ///
    /// Read-modify-write: the current list is read, the new review is
    /// prepended, and the whole list is merged back. Two clients doing this
    /// simultaneously can each read the same prior list and one addition
    /// will be lost.
    pub async fn append_review(&self, item_id: u64, review: Review) -> Result<()> {
        let key = item_id.to_string();
        let doc = self
            .store
            .get(CATALOG_COLLECTION, &key)
            .ok_or(Error::UnknownItem { item_id })?;
        let mut reviews: Vec<Review> = match doc.get("reviews") {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Vec::new(),
        };
        reviews.insert(0, review);
        debug!(item_id, count = reviews.len(), "appending review");
        self.store
            .merge(CATALOG_COLLECTION, &key, json!({ "reviews": reviews }))
            .await
    }

    /// Deletes a menu item by id.
    pub async fn delete_item(&self, item_id: u64) -> Result<()> {
        self.store.delete(CATALOG_COLLECTION, &item_id.to_string()).await
    }
}

/// A live view of the catalog collection.
pub struct CatalogSubscription {
    rx: watch::Receiver<Snapshot>,
}

impl CatalogSubscription {
    /// Decodes the latest snapshot into menu items, in arrival order.
    /// Malformed documents are skipped with a warning rather than failing
    /// the whole snapshot.
    pub fn items(&self) -> Vec<FoodItem> {
        decode_items(&self.rx.borrow())
    }

    pub fn is_empty(&self) -> bool {
        self.rx.borrow().is_empty()
    }

    /// Waits for the next snapshot. Returns `false` if the store side has
    /// gone away.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

fn decode_items(snapshot: &Snapshot) -> Vec<FoodItem> {
    snapshot
        .docs()
        .filter_map(|doc| match serde_json::from_value(doc.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "skipping malformed catalog document");
                None
            }
        })
        .collect()
}
