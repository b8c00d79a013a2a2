//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (CMS `home` story)
//! GET  /health                 - Health check
//!
//! # CMS pages
//! GET  /pages/{slug}           - Story page rendered through the block registry
//!
//! # Products
//! GET  /products/{handle}      - Product detail; query parameters become
//!                                selected-option filters
//! ```

pub mod home;
pub mod pages;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new().route("/{slug}", get(pages::show))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{handle}", get(products::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // CMS story pages
        .nest("/pages", page_routes())
        // Product routes
        .nest("/products", product_routes())
}
