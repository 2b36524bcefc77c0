//! Session-related types.
//!
//! The visitor's cart is the only state kept in the session: one key
//! holding the serialized line items.

/// Session keys for visitor data.
pub mod keys {
    /// Key for the serialized cart blob.
    pub const CART: &str = "cart";
}
