//! Cart line items and the pure state transitions over them.
//!
//! A cart is an ordered sequence of line items keyed by product name:
//! insertion order is first-add order and at most one line exists per name.
//! Mutations are expressed as consuming `Cart -> Cart` functions so the
//! storefront can keep rendering side effects out of the state logic.
//!
//! The persisted form is a JSON array of line items. Anything malformed -
//! unparseable JSON, a zero quantity, a negative price, a duplicated name -
//! loads as an empty cart rather than surfacing an error.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Price;

/// A named product entry with price, quantity, and descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name; acts as the unique key within a cart.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URL for cart rows.
    pub image: String,
    /// Short product description.
    pub description: String,
    /// Units of this product in the cart; always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// A fresh line for a product not yet in the cart.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            image: image.into(),
            description: description.into(),
            quantity: 1,
        }
    }

    /// Price multiplied by quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.line_total(self.quantity)
    }

    fn upholds_invariants(&self) -> bool {
        self.quantity >= 1 && !self.name.is_empty() && self.price.is_non_negative()
    }
}

/// Ordered collection of unique-by-name line items for one browsing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// The line items in first-add order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Add one unit of a product.
    ///
    /// An existing line with the same name has its quantity incremented by
    /// one; the attributes it was first added with are retained even if the
    /// resubmission carries a different price or description. A new product
    /// is appended with quantity 1.
    #[must_use]
    pub fn add(mut self, item: LineItem) -> Self {
        if let Some(existing) = self.items.iter_mut().find(|line| line.name == item.name) {
            existing.quantity += 1;
        } else {
            self.items.push(LineItem { quantity: 1, ..item });
        }
        self
    }

    /// Drop every line with the given name, regardless of quantity.
    #[must_use]
    pub fn remove(mut self, name: &str) -> Self {
        self.items.retain(|line| line.name != name);
        self
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price × quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Serialize to the persisted JSON blob.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a persisted blob, treating anything malformed as empty.
    #[must_use]
    pub fn from_json(blob: &str) -> Self {
        serde_json::from_str::<Self>(blob)
            .ok()
            .filter(Self::upholds_invariants)
            .unwrap_or_default()
    }

    fn upholds_invariants(&self) -> bool {
        let mut names = HashSet::new();
        self.items
            .iter()
            .all(|line| line.upholds_invariants() && names.insert(line.name.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn burger() -> LineItem {
        LineItem::new(
            "Burger",
            Price::parse_marker("$8.50").unwrap(),
            "/static/images/menu/burger.jpg",
            "Flame-grilled beef with house pickles",
        )
    }

    fn fries() -> LineItem {
        LineItem::new(
            "Fries",
            Price::parse_marker("$3.00").unwrap(),
            "/static/images/menu/fries.jpg",
            "Twice-fried and sea-salted",
        )
    }

    #[test]
    fn test_add_new_item_starts_at_quantity_one() {
        let cart = Cart::default().add(burger());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_add_same_name_merges_into_one_line() {
        let cart = Cart::default().add(burger()).add(burger());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_repeated_adds_quantity_equals_call_count() {
        let mut cart = Cart::default();
        for _ in 0..5 {
            cart = cart.add(fries());
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_ignores_resubmitted_attributes() {
        let resubmitted = LineItem::new(
            "Burger",
            Price::parse_marker("$99.00").unwrap(),
            "/elsewhere.jpg",
            "A different description",
        );
        let cart = Cart::default().add(burger()).add(resubmitted);

        let line = &cart.items()[0];
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Price::parse_marker("$8.50").unwrap());
        assert_eq!(line.description, "Flame-grilled beef with house pickles");
    }

    #[test]
    fn test_insertion_order_is_first_add_order() {
        let cart = Cart::default().add(burger()).add(fries()).add(burger());
        let names: Vec<&str> = cart.items().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Burger", "Fries"]);
    }

    #[test]
    fn test_remove_drops_whole_line_regardless_of_quantity() {
        let cart = Cart::default()
            .add(burger())
            .add(burger())
            .add(fries())
            .remove("Burger");
        let names: Vec<&str> = cart.items().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Fries"]);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_remove_unknown_name_is_a_no_op() {
        let cart = Cart::default().add(burger()).remove("Milkshake");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_subtotal_sums_price_times_quantity() {
        let cart = Cart::default().add(burger()).add(burger()).add(fries());
        assert_eq!(cart.subtotal(), Decimal::from_str("20.00").unwrap());
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_json_round_trip() {
        let cart = Cart::default().add(burger()).add(burger()).add(fries());
        let blob = cart.to_json().unwrap();
        assert_eq!(Cart::from_json(&blob), cart);
    }

    #[test]
    fn test_json_shape_matches_persisted_format() {
        let cart = Cart::default().add(burger());
        let value: serde_json::Value = serde_json::from_str(&cart.to_json().unwrap()).unwrap();

        let lines = value.as_array().unwrap();
        assert_eq!(lines.len(), 1);
        let line = lines[0].as_object().unwrap();
        assert_eq!(line["name"], "Burger");
        assert!(line["price"].is_number());
        assert!(line["image"].is_string());
        assert!(line["description"].is_string());
        assert_eq!(line["quantity"], 1);
    }

    #[test]
    fn test_from_json_invalid_json_yields_empty() {
        assert!(Cart::from_json("not json at all").is_empty());
        assert!(Cart::from_json("{\"cart\": 1}").is_empty());
        assert!(Cart::from_json("").is_empty());
    }

    #[test]
    fn test_from_json_zero_quantity_yields_empty() {
        let blob = r#"[{"name":"Burger","price":8.5,"image":"","description":"","quantity":0}]"#;
        assert!(Cart::from_json(blob).is_empty());
    }

    #[test]
    fn test_from_json_negative_price_yields_empty() {
        let blob = r#"[{"name":"Burger","price":-8.5,"image":"x","description":"y","quantity":1}]"#;
        assert!(Cart::from_json(blob).is_empty());
    }

    #[test]
    fn test_from_json_duplicate_names_yields_empty() {
        let blob = concat!(
            r#"[{"name":"Burger","price":8.5,"image":"a","description":"b","quantity":1},"#,
            r#"{"name":"Burger","price":8.5,"image":"a","description":"b","quantity":2}]"#,
        );
        assert!(Cart::from_json(blob).is_empty());
    }
}
