//! Moving quote module.
//!
//! Prices a moving job from static tables and notifies the business and
//! the customer by email.

pub mod calculators;
pub mod models;
pub mod notifications;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate, round_money, QuoteRequest, QuoteResult};
pub use models::PriceRange;
pub use routes::router;
