//! Storefront view model: menu browsing, cart, reviews, and the order
//! submission flow.
//!
//! The submission flow is the state machine
//! Idle -> OrderModalOpen -> Submitting -> Confirmed(toast) -> Idle, with an
//! orthogonal detail-modal overlay reachable while browsing. Opening the
//! order modal with a specific item locks a single-item order; opening it
//! without one composes the order from the full current cart.

use crate::cart::Cart;
use crate::config::AppConfig;
use crate::errors::{Error, Result};
use crate::messaging::{MessagePort, WhatsAppHandoff};
use crate::models::{FoodItem, Order, OrderStatus, Review};
use crate::seed::seed_catalog_if_empty;
use crate::store::{CatalogClient, CatalogSubscription, DocumentStore, OrderClient};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Order-submission state. The detail modal and cart drawer are orthogonal
/// overlays and live outside this enum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiState {
    Idle,
    /// Order form is open. `locked_item` pins a single-item order; `None`
    /// composes from the cart.
    OrderModalOpen { locked_item: Option<u64> },
    Submitting,
    /// Transient confirmation toast, auto-dismissed after the configured
    /// delay or dismissed manually.
    Confirmed { shown_at: Instant },
}

/// Customer fields from the order form. Presence is the only validation.
#[derive(Clone, Debug)]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// The storefront view model.
pub struct Storefront {
    catalog: CatalogClient,
    orders: OrderClient,
    subscription: CatalogSubscription,
    cart: Cart,
    ui: UiState,
    detail_item: Option<u64>,
    cart_open: bool,
    search_query: String,
    handoff: WhatsAppHandoff,
    order_id_prefix: String,
    toast_dismiss: Duration,
    alert: Option<String>,
}

impl Storefront {
    /// Mounts the storefront: subscribes to the catalog and runs the
    /// seeding routine if the first snapshot is empty.
    pub async fn mount(
        store: Arc<DocumentStore>,
        config: &AppConfig,
        port: Arc<dyn MessagePort>,
    ) -> Result<Self> {
        let catalog = CatalogClient::new(Arc::clone(&store));
        let orders = OrderClient::new(store);
        let subscription = catalog.subscribe();
        if seed_catalog_if_empty(&catalog, &config.seed_items()).await? {
            info!("storefront mounted on an empty catalog; seeded defaults");
        }
        Ok(Self {
            catalog,
            orders,
            subscription,
            cart: Cart::new(),
            ui: UiState::Idle,
            detail_item: None,
            cart_open: false,
            search_query: String::new(),
            handoff: WhatsAppHandoff::new(config.whatsapp_number.clone(), port),
            order_id_prefix: config.order_id_prefix.clone(),
            toast_dismiss: config.toast_dismiss,
            alert: None,
        })
    }

    /// Latest catalog snapshot, in arrival order.
    pub fn items(&self) -> Vec<FoodItem> {
        self.subscription.items()
    }

    /// Items whose name contains the search query, case-insensitively.
    pub fn filtered_items(&self) -> Vec<FoodItem> {
        let query = self.search_query.to_lowercase();
        self.items()
            .into_iter()
            .filter(|item| item.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Waits for the next catalog snapshot.
    pub async fn refresh(&mut self) -> bool {
        self.subscription.changed().await
    }

    // --- cart ---

    /// Adds the item to the cart and opens the cart drawer (UX contract).
    pub fn add_to_cart(&mut self, item: FoodItem) {
        self.cart.add(item);
        self.cart_open = true;
    }

    pub fn remove_from_cart(&mut self, item_id: u64) {
        self.cart.remove(item_id);
    }

    pub fn update_cart_quantity(&mut self, item_id: u64, delta: i64) {
        self.cart.update_quantity(item_id, delta);
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn set_cart_open(&mut self, open: bool) {
        self.cart_open = open;
    }

    // --- modals ---

    pub fn open_detail(&mut self, item_id: u64) {
        self.detail_item = Some(item_id);
    }

    pub fn close_detail(&mut self) {
        self.detail_item = None;
    }

    /// The item shown in the detail overlay, re-read from the latest
    /// snapshot on every render so remote edits show through.
    pub fn detail_item(&self) -> Option<FoodItem> {
        let id = self.detail_item?;
        self.items().into_iter().find(|i| i.id == id)
    }

    /// Opens the order modal; a `Some` item id locks a single-item order.
    /// Closes the detail overlay, matching the page behavior.
    pub fn open_order_modal(&mut self, locked_item: Option<u64>) {
        self.detail_item = None;
        self.ui = UiState::OrderModalOpen { locked_item };
    }

    pub fn close_order_modal(&mut self) {
        if matches!(self.ui, UiState::OrderModalOpen { .. }) {
            self.ui = UiState::Idle;
        }
    }

    pub fn ui_state(&self) -> UiState {
        self.ui
    }

    /// Takes the pending blocking alert, if any.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    // --- order submission ---

    /// Submits the order form.
    ///
    /// Builds the item snapshots and total from the locked item (times the
    /// requested quantity) or from the full cart, persists the order, then
    /// hands the summary off to the messaging channel fire-and-forget. On
    /// success the modal closes, the cart clears (multi-item path) and the
    /// confirmation toast shows. On persistence failure a blocking alert is
    /// set, the modal stays open, and the cart is untouched so the user can
    /// resubmit.
    pub async fn submit_order(
        &mut self,
        customer: CustomerDetails,
        quantity: u32,
    ) -> Result<Order> {
        let UiState::OrderModalOpen { locked_item } = self.ui else {
            return Err(Error::State {
                message: "order modal is not open".to_string(),
            });
        };

        let (items, total) = match locked_item {
            Some(item_id) => {
                let item = self
                    .items()
                    .into_iter()
                    .find(|i| i.id == item_id)
                    .ok_or(Error::UnknownItem { item_id })?;
                let snapshot = crate::models::OrderItem {
                    name: item.name,
                    price: item.price,
                    quantity,
                };
                let total = snapshot.line_total();
                (vec![snapshot], total)
            }
            None => {
                if self.cart.is_empty() {
                    return Err(Error::EmptyOrder);
                }
                (self.cart.order_items(), self.cart.total())
            }
        };

        let order = Order {
            id: Order::generate_id(&self.order_id_prefix),
            customer_name: customer.name,
            address: customer.address,
            phone: customer.phone,
            items,
            total,
            status: OrderStatus::Pending,
            date: Utc::now().to_rfc3339(),
        };

        self.ui = UiState::Submitting;
        match self.orders.put_order(&order).await {
            Ok(()) => {
                info!(order_id = %order.id, total = order.total, "order persisted");
                self.handoff.send(&order);
                if locked_item.is_none() {
                    self.cart.clear();
                }
                self.ui = UiState::Confirmed {
                    shown_at: Instant::now(),
                };
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "failed to persist order");
                self.alert = Some("Something went wrong. Please try again.".to_string());
                // Modal stays open with the same composition; retry is
                // implicit.
                self.ui = UiState::OrderModalOpen { locked_item };
                Err(e)
            }
        }
    }

    /// Whether the confirmation toast is currently visible. Auto-dismisses
    /// once the configured delay has elapsed.
    pub fn toast_visible(&mut self) -> bool {
        if let UiState::Confirmed { shown_at } = self.ui {
            if shown_at.elapsed() >= self.toast_dismiss {
                self.ui = UiState::Idle;
                return false;
            }
            return true;
        }
        false
    }

    pub fn dismiss_toast(&mut self) {
        if matches!(self.ui, UiState::Confirmed { .. }) {
            self.ui = UiState::Idle;
        }
    }

    // --- reviews ---

    /// Submits a review for the given item, prepending it to the embedded
    /// list. Store failures are logged and swallowed (the page only ever
    /// traced them); an out-of-range rating is rejected up front.
    pub async fn submit_review(
        &mut self,
        item_id: u64,
        user_name: &str,
        rating: u8,
        comment: &str,
    ) -> Result<()> {
        let review = Review::new(user_name, rating, comment)?;
        if let Err(e) = self.catalog.append_review(item_id, review).await {
            error!(error = %e, item_id, "failed to submit review");
        }
        Ok(())
    }
}
