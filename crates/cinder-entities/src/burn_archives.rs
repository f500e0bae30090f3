use async_trait::async_trait;
use cinder_core::UtcDateTime;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// Per-currency archive header. Created once, never mutated; burn records
/// hang off it by `archive_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "burn_archives")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub currency: Currency,
    pub created_at: UtcDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::burn_records::Entity")]
    BurnRecords,
}

impl Related<super::burn_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BurnRecords.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
