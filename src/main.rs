use dotenvy::dotenv;
use homemade_kitchen::errors::Result;
use homemade_kitchen::messaging::LoggedPort;
use homemade_kitchen::store::DocumentStore;
use homemade_kitchen::views::{AdminPanel, Storefront};
use homemade_kitchen::{config, views};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()?;

    // 4. Initialize the shared document store
    let store = Arc::new(DocumentStore::new());

    // 5. Mount the storefront; seeds the catalog if it is empty
    let storefront = Storefront::mount(Arc::clone(&store), &app_config, Arc::new(LoggedPort))
        .await
        .inspect(|_| info!("Storefront mounted."))?;
    info!(
        "Menu has {} items. Contact: {}",
        storefront.items().len(),
        app_config.contact_phone
    );

    // 6. Mount the admin panel and report the opening dashboard
    let admin = AdminPanel::mount(store, &app_config);
    let stats: views::DashboardStats = admin.dashboard_stats();
    info!(
        revenue = stats.total_revenue,
        orders = stats.total_orders,
        items = stats.menu_items,
        reviews = stats.total_reviews,
        "Dashboard ready."
    );

    Ok(())
}
