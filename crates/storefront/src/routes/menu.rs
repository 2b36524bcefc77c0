//! Menu page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;
use crate::menu::{self, MenuItem};

/// Menu card display data for templates.
///
/// The price is the `$` marker exactly as the add-to-cart form posts it
/// back.
#[derive(Clone)]
pub struct MenuItemView {
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
            image: item.image.clone(),
            description: item.description.clone(),
        }
    }
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub items: Vec<MenuItemView>,
}

/// Display the menu page.
#[instrument]
pub async fn index() -> impl IntoResponse {
    MenuTemplate {
        items: menu::menu().iter().map(MenuItemView::from).collect(),
    }
}
