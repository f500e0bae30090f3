//! SeaORM entities for the Cinder burn tracker

pub mod burn_archives;
pub mod burn_records;
pub mod currency;

pub use currency::Currency;

pub mod prelude {
    pub use super::burn_archives;
    pub use super::burn_records;
    pub use super::currency::Currency;
}
