//! Database migrations for the Cinder burn tracker

pub use sea_orm_migration::prelude::*;

mod migration;

pub use migration::Migrator;
