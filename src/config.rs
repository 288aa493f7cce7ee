//! Application configuration: environment variables with defaults, plus an
//! optional TOML file that can override the seed menu.
//!
//! The admin password is a single shared static secret compared client-side.
//! It is explicitly not a security boundary; it only gates the back-office
//! views.

use crate::errors::{Error, Result};
use crate::models::FoodItem;
use serde::Deserialize;
use std::time::Duration;
use std::{env, fs, path::Path};
use tracing::{debug, info};

const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_WHATSAPP_NUMBER: &str = "8801761757330";
const DEFAULT_ORDER_ID_PREFIX: &str = "ORD";
const DEFAULT_TOAST_DISMISS_SECS: u64 = 5;
const DEFAULT_CONTACT_PHONE: &str = "+880 1761 757330";
const DEFAULT_MAP_EMBED_URL: &str =
    "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d14594.24836647185!2d90.9984631!3d24.0354153!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3754096000000001%3A0x7080808080808080!2sAshuganj!5e0!3m2!1sen!2sbd!4v1709123456789!5m2!1sen!2sbd";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Static back-office secret, compared in plaintext
    pub admin_password: String,
    /// Fixed recipient for the order messaging hand-off
    pub whatsapp_number: String,
    /// Prefix for generated order ids (`<prefix>-<epoch-millis>`)
    pub order_id_prefix: String,
    /// How long the order-confirmed toast stays up before auto-dismissing
    pub toast_dismiss: Duration,
    /// Read-only contact phone shown on the storefront
    pub contact_phone: String,
    /// Static third-party map iframe URL, read-only external display
    pub map_embed_url: String,
    /// Menu entries written by the seeding routine when the catalog is empty
    pub seed_menu: Vec<SeedItemConfig>,
}

/// One seed menu entry. Ids are assigned positionally (1..N) when the
/// catalog is seeded.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedItemConfig {
    pub name: String,
    pub price: i64,
    pub description: String,
    pub image: String,
    pub category: String,
}

#[derive(Deserialize)]
struct MenuFile {
    items: Vec<SeedItemConfig>,
}

impl AppConfig {
    /// Materializes the seed menu as full items with fixed ids 1..N and no
    /// reviews.
    pub fn seed_items(&self) -> Vec<FoodItem> {
        self.seed_menu
            .iter()
            .enumerate()
            .map(|(index, entry)| FoodItem {
                id: index as u64 + 1,
                name: entry.name.clone(),
                price: entry.price,
                description: entry.description.clone(),
                image: entry.image.clone(),
                category: entry.category.clone(),
                reviews: vec![],
            })
            .collect()
    }
}

/// Loads the application configuration from the environment, falling back
/// to built-in defaults. If `MENU_CONFIG_PATH` is set, the seed menu is
/// read from that TOML file instead of the built-in list.
pub fn load_app_configuration() -> Result<AppConfig> {
    let seed_menu = match env::var("MENU_CONFIG_PATH") {
        Ok(path) => load_menu_file(&path)?,
        Err(_) => default_seed_menu(),
    };

    let toast_secs = match env::var("TOAST_DISMISS_SECS") {
        Ok(raw) => raw.parse().map_err(|_| Error::Config {
            message: format!("TOAST_DISMISS_SECS must be an integer, got {raw:?}"),
        })?,
        Err(_) => DEFAULT_TOAST_DISMISS_SECS,
    };

    let config = AppConfig {
        admin_password: env_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
        whatsapp_number: env_or("WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER),
        order_id_prefix: env_or("ORDER_ID_PREFIX", DEFAULT_ORDER_ID_PREFIX),
        toast_dismiss: Duration::from_secs(toast_secs),
        contact_phone: env_or("CONTACT_PHONE", DEFAULT_CONTACT_PHONE),
        map_embed_url: env_or("MAP_EMBED_URL", DEFAULT_MAP_EMBED_URL),
        seed_menu,
    };
    info!(
        seed_items = config.seed_menu.len(),
        "application configuration loaded"
    );
    Ok(config)
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn load_menu_file<P: AsRef<Path>>(path: P) -> Result<Vec<SeedItemConfig>> {
    let path_ref = path.as_ref();
    debug!("Loading seed menu from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read menu file {path_ref:?}: {e}"),
    })?;
    let menu: MenuFile = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from menu file {path_ref:?}: {e}"),
    })?;
    if menu.items.is_empty() {
        return Err(Error::Config {
            message: format!("Menu file {path_ref:?} contains no items"),
        });
    }
    Ok(menu.items)
}

/// The built-in seed menu, matching the storefront's original launch menu.
pub fn default_seed_menu() -> Vec<SeedItemConfig> {
    vec![
        SeedItemConfig {
            name: "Chicken Biryani".to_string(),
            price: 250,
            description: "সুগন্ধি বাসমতি চাল ও দেশি মুরগির মাংসের পারফেক্ট কম্বিনেশন।".to_string(),
            image: "https://images.unsplash.com/photo-1563379091339-03b21bc4a4f8?q=80&w=800&auto=format&fit=crop"
                .to_string(),
            category: "Main Course".to_string(),
        },
        SeedItemConfig {
            name: "Beef Tehari".to_string(),
            price: 220,
            description: "সরিষার তেলের খাঁটি স্বাদ ও নরম গরুর মাংসের তেহারি।".to_string(),
            image: "https://images.unsplash.com/photo-1589302168068-964664d93dc0?q=80&w=800&auto=format&fit=crop"
                .to_string(),
            category: "Main Course".to_string(),
        },
    ]
}
