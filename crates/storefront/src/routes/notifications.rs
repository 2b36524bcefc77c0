//! Notification region route handlers.
//!
//! The base layout polls this fragment; toast presence and styling follow
//! the phases tracked by the toast scheduler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::services::toast::Toast;
use crate::state::AppState;

/// Toast display data for templates.
#[derive(Clone)]
pub struct ToastView {
    pub message: String,
    pub shown: bool,
}

impl From<&Toast> for ToastView {
    fn from(toast: &Toast) -> Self {
        Self {
            message: toast.message.clone(),
            shown: toast.phase.is_shown(),
        }
    }
}

/// Notification region fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/toasts.html")]
pub struct ToastsTemplate {
    pub toasts: Vec<ToastView>,
}

/// Render the active toasts (HTMX).
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    ToastsTemplate {
        toasts: state.toaster().active().iter().map(ToastView::from).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shown_toast_gets_show_class() {
        let html = ToastsTemplate {
            toasts: vec![ToastView {
                message: "Burger added to cart!".to_string(),
                shown: true,
            }],
        }
        .render()
        .unwrap();

        assert!(html.contains("cart-notification show"));
        assert!(html.contains("Burger added to cart!"));
    }

    #[test]
    fn test_hidden_toast_has_no_show_class() {
        let html = ToastsTemplate {
            toasts: vec![ToastView {
                message: "Fries added to cart!".to_string(),
                shown: false,
            }],
        }
        .render()
        .unwrap();

        assert!(!html.contains("cart-notification show"));
    }

    #[test]
    fn test_empty_region_renders_nothing() {
        let html = ToastsTemplate { toasts: Vec::new() }.render().unwrap();
        assert!(html.trim().is_empty());
    }
}
