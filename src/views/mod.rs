//! View models: reactive projections over the two store collections.
//!
//! Both views subscribe to their collections and re-derive everything they
//! show from the latest snapshot; neither caches derived values. UI state
//! (open modals, toasts, the auth gate) is held as explicit finite-state
//! records with enumerated states rather than ad hoc flags.

pub mod admin;
pub mod storefront;

pub use admin::{AdminPanel, AdminTab, AuthState, DashboardStats, DeleteConfirmation, MenuItemForm};
pub use storefront::{CustomerDetails, Storefront, UiState};
