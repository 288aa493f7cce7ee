//! Admin view model: auth gate, dashboard aggregates, menu CRUD, and order
//! status updates.
//!
//! The gate is the trivial machine LoggedOut -> LoggedIn -> LoggedOut with
//! no session persistence, no lockout, and a blocking alert on a wrong
//! password. Store failures on this surface are caught and logged but never
//! shown; only the storefront's order submission surfaces errors.

use crate::cart::average_rating;
use crate::config::AppConfig;
use crate::models::{FoodItem, Order, OrderStatus};
use crate::store::{
    CatalogClient, CatalogSubscription, DocumentStore, OrderClient, OrderSubscription,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Authentication gate state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}

/// Back-office tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminTab {
    Dashboard,
    Menu,
    Orders,
}

/// Aggregate dashboard stats, recomputed from the latest snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_revenue: i64,
    pub total_orders: usize,
    pub menu_items: usize,
    pub total_reviews: usize,
}

/// Outcome of the delete confirmation prompt. Deletion without
/// confirmation is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Cancelled,
}

/// Menu form fields. Required-field presence is the only validation; a
/// negative price is deliberately not rejected here.
#[derive(Clone, Debug)]
pub struct MenuItemForm {
    pub name: String,
    pub price: i64,
    pub description: String,
    pub image: String,
    pub category: String,
}

/// The admin view model.
pub struct AdminPanel {
    catalog: CatalogClient,
    orders: OrderClient,
    foods: CatalogSubscription,
    order_feed: OrderSubscription,
    auth: AuthState,
    tab: AdminTab,
    admin_password: String,
    editing: Option<u64>,
    alert: Option<String>,
}

impl AdminPanel {
    /// Mounts the admin panel: subscribes to both collections, logged out.
    pub fn mount(store: Arc<DocumentStore>, config: &AppConfig) -> Self {
        let catalog = CatalogClient::new(Arc::clone(&store));
        let orders = OrderClient::new(store);
        let foods = catalog.subscribe();
        let order_feed = orders.subscribe();
        Self {
            catalog,
            orders,
            foods,
            order_feed,
            auth: AuthState::LoggedOut,
            tab: AdminTab::Dashboard,
            admin_password: config.admin_password.clone(),
            editing: None,
            alert: None,
        }
    }

    // --- auth gate ---

    /// Plaintext comparison against the shared static secret. Wrong
    /// password raises a blocking alert and stays logged out; there is no
    /// retry limit.
    pub fn login(&mut self, password: &str) -> bool {
        if password == self.admin_password {
            info!("admin logged in");
            self.auth = AuthState::LoggedIn;
            true
        } else {
            warn!("admin login rejected");
            self.alert = Some("Wrong password!".to_string());
            false
        }
    }

    pub fn logout(&mut self) {
        self.auth = AuthState::LoggedOut;
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth
    }

    /// Takes the pending blocking alert, if any.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    fn require_login(&self, action: &str) -> bool {
        if self.auth == AuthState::LoggedIn {
            true
        } else {
            warn!(action, "rejected: not logged in");
            false
        }
    }

    // --- projections ---

    pub fn select_tab(&mut self, tab: AdminTab) {
        self.tab = tab;
    }

    pub fn active_tab(&self) -> AdminTab {
        self.tab
    }

    pub fn menu_items(&self) -> Vec<FoodItem> {
        self.foods.items()
    }

    /// Orders sorted by creation date descending.
    pub fn orders(&self) -> Vec<Order> {
        self.order_feed.orders()
    }

    /// Aggregate stats over the latest snapshots.
    pub fn dashboard_stats(&self) -> DashboardStats {
        let orders = self.orders();
        let items = self.menu_items();
        DashboardStats {
            total_revenue: orders.iter().map(|o| o.total).sum(),
            total_orders: orders.len(),
            menu_items: items.len(),
            total_reviews: items.iter().map(|i| i.reviews.len()).sum(),
        }
    }

    /// Display rating for one menu item, recomputed from its embedded
    /// reviews.
    pub fn item_rating(item: &FoodItem) -> f64 {
        average_rating(&item.reviews)
    }

    // --- menu CRUD ---

    pub fn begin_edit(&mut self, item_id: u64) {
        self.editing = Some(item_id);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<u64> {
        self.editing
    }

    /// Creates or updates a menu item from the form. A new item gets a
    /// fresh timestamp-derived id and no reviews; an edit keeps the
    /// existing id and reviews. Store failures are logged, not surfaced.
    pub async fn save_item(&mut self, form: MenuItemForm) {
        if !self.require_login("save_item") {
            return;
        }
        let (id, reviews) = match self.editing {
            Some(item_id) => {
                let existing_reviews = self
                    .menu_items()
                    .into_iter()
                    .find(|i| i.id == item_id)
                    .map(|i| i.reviews)
                    .unwrap_or_default();
                (item_id, existing_reviews)
            }
            None => (Utc::now().timestamp_millis() as u64, vec![]),
        };
        let item = FoodItem {
            id,
            name: form.name,
            price: form.price,
            description: form.description,
            image: form.image,
            category: form.category,
            reviews,
        };
        match self.catalog.upsert_item(&item).await {
            Ok(()) => {
                info!(item_id = item.id, name = %item.name, "menu item saved");
                self.editing = None;
            }
            Err(e) => error!(error = %e, "failed to save menu item"),
        }
    }

    /// Deletes a menu item after the confirmation prompt. Cancelling is a
    /// no-op; a failed delete is logged with no rollback UI.
    pub async fn delete_item(&mut self, item_id: u64, confirmation: DeleteConfirmation) {
        if !self.require_login("delete_item") {
            return;
        }
        if confirmation != DeleteConfirmation::Confirmed {
            return;
        }
        if let Err(e) = self.catalog.delete_item(item_id).await {
            error!(error = %e, item_id, "failed to delete menu item");
        }
    }

    // --- orders ---

    /// Moves an order to any status at the operator's discretion. Failures
    /// are logged, not surfaced.
    pub async fn set_order_status(&mut self, order_id: &str, status: OrderStatus) {
        if !self.require_login("set_order_status") {
            return;
        }
        if let Err(e) = self.orders.set_status(order_id, status).await {
            error!(error = %e, order_id, "failed to update order status");
        }
    }

    /// Waits for the next snapshot on either collection.
    pub async fn refresh(&mut self) -> bool {
        tokio::select! {
            changed = self.foods.changed() => changed,
            changed = self.order_feed.changed() => changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::models::OrderItem;
    use crate::test_utils::{sample_item, sample_review, setup_store, test_config};

    fn form(name: &str, price: i64) -> MenuItemForm {
        MenuItemForm {
            name: name.to_string(),
            price,
            description: "desc".to_string(),
            image: "https://example.com/i.jpg".to_string(),
            category: "Main Course".to_string(),
        }
    }

    async fn put_order(store: &Arc<DocumentStore>, id: &str, total: i64) -> Result<()> {
        OrderClient::new(Arc::clone(store))
            .put_order(&Order {
                id: id.to_string(),
                customer_name: "Rina".to_string(),
                address: "Ashuganj".to_string(),
                phone: "017".to_string(),
                items: vec![OrderItem {
                    name: "Biryani".to_string(),
                    price: total,
                    quantity: 1,
                }],
                total,
                status: OrderStatus::Pending,
                date: Utc::now().to_rfc3339(),
            })
            .await
    }

    #[tokio::test]
    async fn wrong_password_stays_logged_out_and_mutates_nothing() -> Result<()> {
        let store = setup_store();
        let catalog = CatalogClient::new(Arc::clone(&store));
        catalog.upsert_item(&sample_item(1, "Biryani", 250)).await?;
        let mut admin = AdminPanel::mount(Arc::clone(&store), &test_config());

        assert!(!admin.login("letmein"));
        assert_eq!(admin.auth_state(), AuthState::LoggedOut);
        assert_eq!(admin.take_alert().as_deref(), Some("Wrong password!"));

        // Mutations while logged out are rejected before touching the store
        admin.save_item(form("Injected", 1)).await;
        admin.delete_item(1, DeleteConfirmation::Confirmed).await;
        admin
            .set_order_status("ORD-1", OrderStatus::Cancelled)
            .await;
        let items = catalog.subscribe().items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Biryani");
        Ok(())
    }

    #[tokio::test]
    async fn login_logout_roundtrip() {
        let store = setup_store();
        let mut admin = AdminPanel::mount(store, &test_config());
        assert!(admin.login("admin123"));
        assert_eq!(admin.auth_state(), AuthState::LoggedIn);
        admin.logout();
        assert_eq!(admin.auth_state(), AuthState::LoggedOut);
    }

    #[tokio::test]
    async fn save_item_creates_with_fresh_id_and_no_reviews() -> Result<()> {
        let store = setup_store();
        let mut admin = AdminPanel::mount(Arc::clone(&store), &test_config());
        admin.login("admin123");

        admin.save_item(form("Morog Polao", 270)).await;

        let items = admin.menu_items();
        assert_eq!(items.len(), 1);
        assert!(items[0].id > 0);
        assert_eq!(items[0].name, "Morog Polao");
        assert!(items[0].reviews.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn editing_keeps_id_and_reviews() -> Result<()> {
        let store = setup_store();
        let catalog = CatalogClient::new(Arc::clone(&store));
        let mut item = sample_item(7, "Khichuri", 180);
        item.reviews = vec![sample_review(1, 5)];
        catalog.upsert_item(&item).await?;
        let mut admin = AdminPanel::mount(store, &test_config());
        admin.login("admin123");

        admin.begin_edit(7);
        admin.save_item(form("Bhuna Khichuri", 200)).await;

        let items = admin.menu_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 7);
        assert_eq!(items[0].name, "Bhuna Khichuri");
        assert_eq!(items[0].price, 200);
        assert_eq!(items[0].reviews.len(), 1, "reviews survive the edit");
        assert_eq!(admin.editing(), None, "edit state cleared on save");
        Ok(())
    }

    #[tokio::test]
    async fn delete_requires_confirmation() -> Result<()> {
        let store = setup_store();
        let catalog = CatalogClient::new(Arc::clone(&store));
        catalog.upsert_item(&sample_item(1, "Biryani", 250)).await?;
        let mut admin = AdminPanel::mount(store, &test_config());
        admin.login("admin123");

        admin.delete_item(1, DeleteConfirmation::Cancelled).await;
        assert_eq!(admin.menu_items().len(), 1);

        admin.delete_item(1, DeleteConfirmation::Confirmed).await;
        assert!(admin.menu_items().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn admin_store_failures_are_silent() -> Result<()> {
        let store = setup_store();
        let catalog = CatalogClient::new(Arc::clone(&store));
        catalog.upsert_item(&sample_item(1, "Biryani", 250)).await?;
        let mut admin = AdminPanel::mount(Arc::clone(&store), &test_config());
        admin.login("admin123");

        store.set_offline(true);
        admin.save_item(form("Polao", 270)).await;
        admin.delete_item(1, DeleteConfirmation::Confirmed).await;
        admin
            .set_order_status("ORD-1", OrderStatus::Completed)
            .await;
        // Logged only; no alert, no state change beyond the missing writes
        assert!(admin.take_alert().is_none());
        store.set_offline(false);
        assert_eq!(admin.menu_items().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn dashboard_aggregates_revenue_orders_items_reviews() -> Result<()> {
        let store = setup_store();
        let catalog = CatalogClient::new(Arc::clone(&store));
        let mut item = sample_item(1, "Biryani", 250);
        item.reviews = vec![sample_review(1, 5), sample_review(2, 3)];
        catalog.upsert_item(&item).await?;
        catalog.upsert_item(&sample_item(2, "Tehari", 220)).await?;
        put_order(&store, "ORD-1", 500).await?;
        put_order(&store, "ORD-2", 180).await?;

        let admin = AdminPanel::mount(store, &test_config());
        let stats = admin.dashboard_stats();
        assert_eq!(
            stats,
            DashboardStats {
                total_revenue: 680,
                total_orders: 2,
                menu_items: 2,
                total_reviews: 2,
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn status_updates_flow_through_to_the_feed() -> Result<()> {
        let store = setup_store();
        put_order(&store, "ORD-1", 250).await?;
        let mut admin = AdminPanel::mount(store, &test_config());
        admin.login("admin123");

        admin
            .set_order_status("ORD-1", OrderStatus::Completed)
            .await;
        assert_eq!(admin.orders()[0].status, OrderStatus::Completed);

        admin
            .set_order_status("ORD-1", OrderStatus::Cancelled)
            .await;
        assert_eq!(admin.orders()[0].status, OrderStatus::Cancelled);
        Ok(())
    }

    #[tokio::test]
    async fn item_rating_recomputes_from_embedded_reviews() {
        let mut item = sample_item(1, "Biryani", 250);
        assert_eq!(AdminPanel::item_rating(&item), 0.0);
        item.reviews = vec![sample_review(1, 5), sample_review(2, 3)];
        assert_eq!(format!("{:.1}", AdminPanel::item_rating(&item)), "4.0");
    }

    #[tokio::test]
    async fn tab_selection() {
        let store = setup_store();
        let mut admin = AdminPanel::mount(store, &test_config());
        assert_eq!(admin.active_tab(), AdminTab::Dashboard);
        admin.select_tab(AdminTab::Orders);
        assert_eq!(admin.active_tab(), AdminTab::Orders);
    }
}
