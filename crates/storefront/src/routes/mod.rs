//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Menu page
//! GET  /health          - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart            - Cart page
//! GET  /cart/modal      - Cart modal overlay (fragment)
//! POST /cart/add        - Add item (returns count badge, triggers cart-updated)
//! POST /cart/remove     - Remove line (returns refreshed modal)
//! GET  /cart/count      - Cart count badge (fragment)
//! POST /cart/checkout   - Placeholder checkout acknowledgment
//!
//! # Notifications
//! GET  /notifications   - Active toasts (fragment, polled)
//! ```

pub mod cart;
pub mod menu;
pub mod notifications;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/modal", get(cart::modal))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Menu page
        .route("/", get(menu::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Notification region
        .route("/notifications", get(notifications::index))
}
