//! Static menu content.
//!
//! Menu data is an external concern for the cart itself; until an admin
//! backend exists, the menu ships with the binary the same way the homepage
//! copy does. Every entry carries exactly the facts the add-to-cart wiring
//! posts back: name, price, image URL, and description.

use tamarind_table_core::Price;

/// A dish offered on the menu page.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub name: String,
    pub price: Price,
    pub image: String,
    pub description: String,
}

impl MenuItem {
    fn new(name: &str, price_cents: u32, image: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            price: Price::from_cents(price_cents),
            image: format!("/static/images/menu/{image}"),
            description: description.to_string(),
        }
    }
}

/// The current menu, in display order.
#[must_use]
pub fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(
            "Burger",
            850,
            "burger.jpg",
            "Flame-grilled beef with house pickles and tamarind glaze",
        ),
        MenuItem::new(
            "Fries",
            300,
            "fries.jpg",
            "Twice-fried and tossed in smoked sea salt",
        ),
        MenuItem::new(
            "Margherita Pizza",
            1125,
            "pizza.jpg",
            "Wood-fired with fresh basil and buffalo mozzarella",
        ),
        MenuItem::new(
            "Tamarind Tacos",
            975,
            "tacos.jpg",
            "Three corn tortillas with slow-braised pork and lime crema",
        ),
        MenuItem::new(
            "Garden Salad",
            725,
            "salad.jpg",
            "Seasonal greens, toasted seeds, and citrus vinaigrette",
        ),
        MenuItem::new(
            "Lemonade",
            425,
            "lemonade.jpg",
            "Pressed daily with a tamarind-sugar rim",
        ),
        MenuItem::new(
            "Chocolate Cake",
            600,
            "cake.jpg",
            "Dark chocolate layers with salted caramel",
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tamarind_table_core::Price;

    use super::*;

    #[test]
    fn test_menu_is_not_empty() {
        assert!(!menu().is_empty());
    }

    #[test]
    fn test_menu_names_are_unique() {
        let items = menu();
        let mut names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), items.len());
    }

    #[test]
    fn test_menu_prices_round_trip_through_markers() {
        // The menu page renders each price as a `$` marker and the add form
        // posts it back; the two representations must agree.
        for item in menu() {
            let marker = item.price.to_string();
            assert_eq!(Price::parse_marker(&marker).unwrap(), item.price);
        }
    }
}
