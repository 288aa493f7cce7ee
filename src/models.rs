//! Data model for the storefront: menu items, reviews, carts, and orders.
//!
//! Menu items and orders are the only durable documents; everything else is
//! transient view state. `Order.items` are denormalized snapshots taken at
//! submission time so later catalog edits never alter historical orders.

use crate::errors::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A customer review embedded in its parent [`FoodItem`].
///
/// Reviews are append-only: once written they are never edited or deleted,
/// and they live exactly as long as the item that owns them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Creation-timestamp-derived id, unique within the parent item
    pub id: u64,
    pub user_name: String,
    /// Star rating, 1 through 5 inclusive
    pub rating: u8,
    pub comment: String,
    /// Calendar date string, `YYYY-MM-DD`
    pub date: String,
}

impl Review {
    /// Builds a new review dated today with an epoch-millis id.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRating`] if `rating` is outside 1..=5.
    pub fn new(user_name: impl Into<String>, rating: u8, comment: impl Into<String>) -> Result<Self> {
        if !(1..=5).contains(&rating) {
            return Err(Error::InvalidRating { rating });
        }
        let now = Utc::now();
        Ok(Self {
            id: now.timestamp_millis() as u64,
            user_name: user_name.into(),
            rating,
            comment: comment.into(),
            date: now.format("%Y-%m-%d").to_string(),
        })
    }
}

/// A menu item document. The id doubles as the catalog document key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Positive integer id, stable, assigned at creation
    pub id: u64,
    pub name: String,
    /// Non-negative price in minor currency units
    pub price: i64,
    pub description: String,
    /// Image URI
    pub image: String,
    /// Free-text category label
    pub category: String,
    /// Embedded reviews, newest-first by convention
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl FoodItem {
    /// Document key in the catalog collection (stringified id).
    pub fn doc_key(&self) -> String {
        self.id.to_string()
    }
}

/// A cart line: one menu item snapshot plus a quantity of at least 1.
///
/// Lives only in the storefront's transient memory; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem {
    pub item: FoodItem,
    pub cart_quantity: u32,
}

/// Order lifecycle status. Transitions are unconstrained: the operator may
/// move an order between any two states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

/// One line of an order: a snapshot of name/price/quantity at submission
/// time, deliberately decoupled from the live [`FoodItem`] record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: i64,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }
}

/// A submitted order document, keyed by its generated `<prefix>-<millis>` id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub items: Vec<OrderItem>,
    /// Sum of item price x quantity at creation time; immutable once written
    pub total: i64,
    pub status: OrderStatus,
    /// RFC 3339 creation timestamp
    pub date: String,
}

impl Order {
    /// Generates a fresh order id of the form `<prefix>-<epoch-millis>`.
    pub fn generate_id(prefix: &str) -> String {
        format!("{prefix}-{}", Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_rejects_out_of_range_rating() {
        assert!(matches!(
            Review::new("Rina", 0, "..."),
            Err(Error::InvalidRating { rating: 0 })
        ));
        assert!(matches!(
            Review::new("Rina", 6, "..."),
            Err(Error::InvalidRating { rating: 6 })
        ));
        assert!(Review::new("Rina", 5, "Darun!").is_ok());
    }

    #[test]
    fn review_date_is_calendar_day() {
        let review = Review::new("Rina", 4, "Bhalo").unwrap();
        assert_eq!(review.date.len(), 10);
        assert_eq!(review.date, Utc::now().format("%Y-%m-%d").to_string());
    }

    #[test]
    fn order_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"cancelled\"").unwrap(),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn order_id_carries_prefix() {
        let id = Order::generate_id("ORD");
        assert!(id.starts_with("ORD-"));
        assert!(id["ORD-".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn food_item_doc_key_is_stringified_id() {
        let item = FoodItem {
            id: 42,
            name: "Khichuri".to_string(),
            price: 180,
            description: String::new(),
            image: String::new(),
            category: "Main Course".to_string(),
            reviews: vec![],
        };
        assert_eq!(item.doc_key(), "42");
    }
}
