//! Core business logic - framework-agnostic catalog, listing, order and customer operations.

/// Brand creation, lookup and overview
pub mod brand;
/// Shopping carts
pub mod cart;
/// Contact form and sell-a-phone submissions
pub mod inquiry;
/// Listing phones on platforms
pub mod listing;
/// Buy and sell orders
pub mod order;
/// Phone catalog management and search
pub mod phone;
/// Sales platforms and their fees
pub mod platform;
/// Listing price, condition mapping and profitability rules
pub mod pricing;
/// Customer reviews
pub mod review;
