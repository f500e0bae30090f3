//! Burn record service: CRUD and month-range queries over token-burn
//! events, one record per calendar day.

pub mod handlers;
pub mod services;

// Re-export the service types for convenience
pub use services::*;
