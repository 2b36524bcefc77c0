//! Core types for Tamarind Table.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod price;

pub use price::{Price, PriceError};
