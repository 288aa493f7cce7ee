//! One-time catalog seeding.
//!
//! Runs on storefront mount: if the catalog snapshot is empty, the fixed
//! seed menu is written sequentially. The writes are idempotent overwrites
//! keyed by the same fixed ids, so two clients seeding simultaneously
//! converge to the same final state; the sequence is not atomic, and a
//! client may briefly observe partial seeding mid-run.

use crate::errors::Result;
use crate::models::FoodItem;
use crate::store::CatalogClient;
use tracing::{info, instrument};

/// Writes the seed menu into the catalog, one item at a time.
#[instrument(skip(catalog, menu), fields(items = menu.len()))]
pub async fn seed_catalog(catalog: &CatalogClient, menu: &[FoodItem]) -> Result<()> {
    info!("Seeding catalog with {} initial items", menu.len());
    for item in menu {
        catalog.upsert_item(item).await?;
    }
    info!("Finished seeding catalog");
    Ok(())
}

/// Seeds only when the current catalog snapshot is empty. Returns whether
/// seeding ran.
pub async fn seed_catalog_if_empty(catalog: &CatalogClient, menu: &[FoodItem]) -> Result<bool> {
    if catalog.subscribe().is_empty() {
        seed_catalog(catalog, menu).await?;
        Ok(true)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_seed_menu;
    use crate::store::CatalogClient;
    use crate::test_utils::{sample_item, setup_store, test_config};

    #[tokio::test]
    async fn seeding_runs_only_on_empty_catalog() -> Result<()> {
        let store = setup_store();
        let catalog = CatalogClient::new(store);
        let menu = test_config().seed_items();

        assert!(seed_catalog_if_empty(&catalog, &menu).await?);
        assert_eq!(catalog.subscribe().items().len(), menu.len());

        // Second mount sees a populated catalog and does nothing
        assert!(!seed_catalog_if_empty(&catalog, &menu).await?);
        Ok(())
    }

    #[tokio::test]
    async fn double_seeding_converges_to_one_document_per_id() -> Result<()> {
        let store = setup_store();
        // Two clients racing on an empty store, as two simultaneous page
        // loads would.
        let client_a = CatalogClient::new(std::sync::Arc::clone(&store));
        let client_b = CatalogClient::new(store);
        let menu: Vec<FoodItem> = test_config().seed_items();

        seed_catalog(&client_a, &menu).await?;
        seed_catalog(&client_b, &menu).await?;

        let items = client_b.subscribe().items();
        assert_eq!(items.len(), menu.len(), "exactly one document per fixed id");
        for (seeded, expected) in items.iter().zip(&menu) {
            assert_eq!(seeded, expected, "final field values identical");
        }
        Ok(())
    }

    #[tokio::test]
    async fn seeding_does_not_clobber_admin_edits_once_populated() -> Result<()> {
        let store = setup_store();
        let catalog = CatalogClient::new(store);
        let menu = test_config().seed_items();
        seed_catalog(&catalog, &menu).await?;

        // Operator renames item 1, then another storefront mounts
        let edited = sample_item(1, "Special Chicken Biryani", 280);
        catalog.upsert_item(&edited).await?;
        assert!(!seed_catalog_if_empty(&catalog, &menu).await?);
        assert_eq!(
            catalog.subscribe().items()[0].name,
            "Special Chicken Biryani"
        );
        Ok(())
    }

    #[test]
    fn default_menu_matches_launch_menu() {
        let menu = default_seed_menu();
        assert_eq!(menu[0].name, "Chicken Biryani");
        assert_eq!(menu[0].price, 250);
        assert_eq!(menu[1].name, "Beef Tehari");
        assert_eq!(menu[1].price, 220);
    }
}
