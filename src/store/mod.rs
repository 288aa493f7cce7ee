//! Realtime document store and the typed clients built on top of it.
//!
//! The store holds named collections of JSON documents keyed by string, in
//! arrival order. Every write publishes the full current snapshot of the
//! affected collection through a `tokio::sync::watch` channel, so every
//! subscriber always observes a strictly newer complete snapshot and never a
//! change log. Writes are last-write-wins; there is no transaction or
//! mutual-exclusion discipline, and any client may write to any collection
//! without coordination.
//!
//! Cancellation is drop-based: a subscription is released exactly once when
//! its receiver is dropped. In-flight writes cannot be aborted.

mod catalog;
mod orders;

pub use catalog::{CATALOG_COLLECTION, CatalogClient, CatalogSubscription};
pub use orders::{ORDERS_COLLECTION, OrderClient, OrderSubscription};

use crate::errors::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::{debug, info};

/// A document is an arbitrary JSON object.
pub type Document = Value;

/// The full current set of documents in one collection, in arrival order.
///
/// Delivered whole on every change; consumers work from the latest snapshot
/// only.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    docs: Vec<(String, Document)>,
}

impl Snapshot {
    /// Documents in arrival order.
    pub fn docs(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter().map(|(_, doc)| doc)
    }

    /// Looks up a single document by key.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.docs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, doc)| doc)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

struct Collection {
    docs: Vec<(String, Document)>,
    tx: watch::Sender<Snapshot>,
}

impl Collection {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(Snapshot::default());
        Self { docs: Vec::new(), tx }
    }

    fn publish(&self) {
        self.tx.send_replace(Snapshot {
            docs: self.docs.clone(),
        });
    }
}

/// The shared realtime document store.
///
/// All storefront and admin clients in the process share one instance behind
/// an `Arc`, forming the bi-directional sync loop: any write re-publishes the
/// collection snapshot to every subscriber.
pub struct DocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
    offline: AtomicBool,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulates lost connectivity: while offline every write fails with a
    /// store error and subscribers keep rendering their last snapshot.
    pub fn set_offline(&self, offline: bool) {
        info!(offline, "document store connectivity changed");
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Store {
                message: "store unreachable (offline)".to_string(),
            });
        }
        Ok(())
    }

    /// Subscribes to a collection. The receiver starts at the current
    /// snapshot and observes every subsequent one; dropping it releases the
    /// subscription.
    pub fn subscribe(&self, collection: &str) -> watch::Receiver<Snapshot> {
        let mut collections = self.collections.write().expect("store lock poisoned");
        let entry = collections
            .entry(collection.to_string())
            .or_insert_with(Collection::new);
        debug!(collection, "new subscription");
        entry.tx.subscribe()
    }

    /// Writes a full document under `key`, replacing any existing document
    /// wholesale (create-or-overwrite).
    pub async fn upsert(&self, collection: &str, key: &str, doc: Document) -> Result<()> {
        self.check_online()?;
        let mut collections = self.collections.write().expect("store lock poisoned");
        let entry = collections
            .entry(collection.to_string())
            .or_insert_with(Collection::new);
        match entry.docs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = doc,
            None => entry.docs.push((key.to_string(), doc)),
        }
        debug!(collection, key, "upsert");
        entry.publish();
        Ok(())
    }

    /// Patches only the fields named in `patch` (a JSON object), preserving
    /// every other field of the existing document. Creates the document from
    /// the patch if it does not exist yet.
    pub async fn merge(&self, collection: &str, key: &str, patch: Document) -> Result<()> {
        self.check_online()?;
        let fields = match patch {
            Value::Object(map) => map,
            other => {
                return Err(Error::Store {
                    message: format!("merge patch must be a JSON object, got {other}"),
                });
            }
        };
        let mut collections = self.collections.write().expect("store lock poisoned");
        let entry = collections
            .entry(collection.to_string())
            .or_insert_with(Collection::new);
        match entry.docs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                if let Value::Object(existing_map) = existing {
                    for (field, value) in fields {
                        existing_map.insert(field, value);
                    }
                } else {
                    *existing = Value::Object(fields);
                }
            }
            None => entry.docs.push((key.to_string(), Value::Object(fields))),
        }
        debug!(collection, key, "merge");
        entry.publish();
        Ok(())
    }

    /// Deletes a document by key. No-op if the key is absent.
    pub async fn delete(&self, collection: &str, key: &str) -> Result<()> {
        self.check_online()?;
        let mut collections = self.collections.write().expect("store lock poisoned");
        let entry = collections
            .entry(collection.to_string())
            .or_insert_with(Collection::new);
        let before = entry.docs.len();
        entry.docs.retain(|(k, _)| k != key);
        if entry.docs.len() != before {
            debug!(collection, key, "delete");
            entry.publish();
        }
        Ok(())
    }

    /// Reads the current document under `key`, if any.
    ///
    /// This is the read half of read-modify-write flows; it carries no
    /// isolation guarantee against concurrent writers.
    pub fn get(&self, collection: &str, key: &str) -> Option<Document> {
        let collections = self.collections.read().expect("store lock poisoned");
        collections.get(collection).and_then(|entry| {
            entry
                .docs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, doc)| doc.clone())
        })
    }
}
