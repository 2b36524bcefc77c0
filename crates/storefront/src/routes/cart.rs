//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself is one JSON blob in the visitor's session; every handler
//! re-reads it through the store and writes back through the mutation
//! helpers, so each request sees current state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use tamarind_table_core::{Cart, LineItem, Price};

use crate::error::{self, AppError};
use crate::filters;
use crate::services::cart_store::{CartStore, SessionCartStore, add_to_cart, remove_from_cart};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: format_amount(Decimal::ZERO),
            item_count: 0,
        }
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format a decimal amount as a two-decimal price string.
fn format_amount(amount: Decimal) -> String {
    format!("${amount:.2}")
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: format_amount(cart.subtotal()),
            item_count: cart.total_quantity(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            name: line.name.clone(),
            image: line.image.clone(),
            description: line.description.clone(),
            price: line.price.to_string(),
            quantity: line.quantity,
            line_total: format_amount(line.line_total()),
        }
    }
}

// =============================================================================
// Forms and Templates
// =============================================================================

/// Add to cart form data.
///
/// The menu page posts back exactly the facts shown on the card, including
/// the `$`-prefixed price marker.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub name: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart modal overlay fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_modal.html")]
pub struct CartModalTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Checkout acknowledgment fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_notice.html")]
pub struct CheckoutNoticeTemplate;

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = SessionCartStore::new(&session).load().await;
    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Open the cart modal (HTMX).
///
/// The overlay is rebuilt in full from the stored cart on every open;
/// there is no incremental diffing.
#[instrument(skip(session))]
pub async fn modal(session: Session) -> impl IntoResponse {
    let cart = SessionCartStore::new(&session).load().await;
    CartModalTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add one unit of an item (HTMX).
///
/// Parses the posted price marker, merges the item by name, shows a toast,
/// and returns the refreshed count badge with a `cart-updated` trigger so
/// other fragments re-fetch.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let price = Price::parse_marker(&form.price)?;
    let item = LineItem::new(form.name.clone(), price, form.image, form.description);

    let store = SessionCartStore::new(&session);
    let cart = add_to_cart(&store, item).await?;

    error::add_breadcrumb("cart", "Added item", Some(&[("name", form.name.as_str())]));
    state.toaster().notify(format!("{} added to cart!", form.name));

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.total_quantity(),
        },
    )
        .into_response())
}

/// Remove a line entirely (HTMX).
///
/// Drops the whole line regardless of quantity, then returns the refreshed
/// modal in place of the open one and fires `cart-updated` for the badge.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response, AppError> {
    let store = SessionCartStore::new(&session);
    let cart = remove_from_cart(&store, &form.name).await?;

    error::add_breadcrumb("cart", "Removed line", Some(&[("name", form.name.as_str())]));

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartModalTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = SessionCartStore::new(&session).load().await;
    CartCountTemplate {
        count: cart.total_quantity(),
    }
}

/// Placeholder checkout acknowledgment.
///
/// The external checkout flow is out of scope; the cart is left intact and
/// the visitor gets an acknowledgment notice.
#[instrument]
pub async fn checkout() -> impl IntoResponse {
    CheckoutNoticeTemplate
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_cart() -> Cart {
        let burger = LineItem::new(
            "Burger",
            Price::from_cents(850),
            "/static/images/menu/burger.jpg",
            "Flame-grilled beef",
        );
        let fries = LineItem::new(
            "Fries",
            Price::from_cents(300),
            "/static/images/menu/fries.jpg",
            "Twice-fried",
        );
        Cart::default().add(burger.clone()).add(burger).add(fries)
    }

    #[test]
    fn test_cart_view_totals() {
        let view = CartView::from(&sample_cart());
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "$20.00");
        assert_eq!(view.items.len(), 2);
    }

    #[test]
    fn test_cart_view_line_formatting() {
        let view = CartView::from(&sample_cart());
        let burger = &view.items[0];
        assert_eq!(burger.price, "$8.50");
        assert_eq!(burger.quantity, 2);
        assert_eq!(burger.line_total, "$17.00");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert_eq!(view.item_count, 0);
        assert_eq!(view.total, "$0.00");
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_modal_renders_rows_and_total() {
        let html = CartModalTemplate {
            cart: CartView::from(&sample_cart()),
        }
        .render()
        .unwrap();

        assert!(html.contains("cart-modal"));
        assert!(html.contains("Burger"));
        assert!(html.contains("$8.50 x 2"));
        assert!(html.contains("Total: $20.00"));
        assert!(html.contains("checkout-btn"));
    }

    #[test]
    fn test_modal_renders_empty_state() {
        let html = CartModalTemplate {
            cart: CartView::empty(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Your cart is empty"));
        assert!(!html.contains("cart-item "));
        assert!(!html.contains("checkout-btn"));
    }

    #[test]
    fn test_count_badge_hides_only_at_zero() {
        let hidden = CartCountTemplate { count: 0 }.render().unwrap();
        assert!(hidden.contains("cart-badge--hidden"));

        let shown = CartCountTemplate { count: 2 }.render().unwrap();
        assert!(shown.contains(">2<"));
        assert!(!shown.contains("cart-badge--hidden"));
    }

    #[test]
    fn test_checkout_notice_renders_acknowledgment() {
        let html = CheckoutNoticeTemplate.render().unwrap();
        assert!(html.contains("Proceeding to checkout!"));
    }
}
