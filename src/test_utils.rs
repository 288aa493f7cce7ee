//! Shared test utilities.
//!
//! Common helpers for setting up a fresh store and building sample
//! documents with sensible defaults.

use crate::config::{AppConfig, default_seed_menu};
use crate::messaging::MessagePort;
use crate::models::{FoodItem, Review};
use crate::store::DocumentStore;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Creates a fresh shared document store. This is the standard setup for
/// all integration tests.
pub fn setup_store() -> Arc<DocumentStore> {
    Arc::new(DocumentStore::new())
}

/// Configuration with the built-in defaults, independent of the process
/// environment.
pub fn test_config() -> AppConfig {
    AppConfig {
        admin_password: "admin123".to_string(),
        whatsapp_number: "8801761757330".to_string(),
        order_id_prefix: "ORD".to_string(),
        toast_dismiss: Duration::from_secs(5),
        contact_phone: "+880 1761 757330".to_string(),
        map_embed_url: "https://www.google.com/maps/embed?test".to_string(),
        seed_menu: default_seed_menu(),
    }
}

/// Builds a menu item with no reviews and placeholder description/image.
pub fn sample_item(id: u64, name: &str, price: i64) -> FoodItem {
    FoodItem {
        id,
        name: name.to_string(),
        price,
        description: format!("{name} cooked fresh to order"),
        image: format!("https://example.com/{id}.jpg"),
        category: "Main Course".to_string(),
        reviews: vec![],
    }
}

/// Builds a review with a fixed id so ordering assertions stay
/// deterministic.
pub fn sample_review(id: u64, rating: u8) -> Review {
    Review {
        id,
        user_name: format!("reviewer-{id}"),
        rating,
        comment: "Test review".to_string(),
        date: "2026-08-23".to_string(),
    }
}

/// A message port that records every dispatched deep link instead of
/// opening it.
#[derive(Default)]
pub struct RecordingPort {
    opened: Mutex<Vec<String>>,
}

impl RecordingPort {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().expect("port lock poisoned").clone()
    }
}

impl MessagePort for RecordingPort {
    fn open(&self, url: &str) {
        self.opened
            .lock()
            .expect("port lock poisoned")
            .push(url.to_string());
    }
}
