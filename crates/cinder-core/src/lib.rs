//! Core utilities and types shared across all Cinder crates

pub mod dates;
pub mod error;
pub mod pagination;
pub mod problem;

// Re-export commonly used types
pub use error::{ServiceError, ServiceResult};
pub use pagination::{PageOptions, Pagination, SortDirection};
pub use problem::Problem;

// Re-export external dependencies
pub use anyhow;
pub use chrono;
pub use serde;
pub use serde_json;
pub use thiserror;
pub use tracing;

/// Canonical datetime type for database TIMESTAMPTZ columns and API
/// responses (serializes as ISO 8601 with a 'Z' suffix).
pub type UtcDateTime = chrono::DateTime<chrono::Utc>;
