pub mod handlers;
pub mod types;

pub use handlers::{configure_routes, BurnsApiDoc};
pub use types::AppState;
