//! `HomemadeKitchen` - storefront and back-office core for a home-kitchen
//! food business
//!
//! This crate implements the data-synchronization contract between the
//! customer storefront, the admin panel, and the shared realtime document
//! store, plus the pure cart/aggregation arithmetic. Both views are
//! reactive projections over collection snapshots and write back to the
//! same two collections, forming a bi-directional sync loop with no
//! server-side mediation.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Pure cart and aggregation arithmetic
pub mod cart;
/// Configuration management for the storefront and back-office
pub mod config;
/// Unified error types and result handling
pub mod errors;
/// Outbound messaging hand-off (order deep links)
pub mod messaging;
/// Data model: menu items, reviews, carts, orders
pub mod models;
/// One-time catalog seeding
pub mod seed;
/// Realtime document store and typed collection clients
pub mod store;
/// Storefront and admin view models
pub mod views;

#[cfg(test)]
pub mod test_utils;
