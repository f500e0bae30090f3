use async_trait::async_trait;
use chrono::NaiveDate;
use cinder_core::UtcDateTime;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};

/// One burn entry per calendar day. `date` carries a unique index; the
/// database is the source of truth for the one-record-per-day invariant.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "burn_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub archive_id: i32,
    #[sea_orm(unique)]
    pub date: NaiveDate,
    pub transaction_ref: String,
    pub burn_amount: f64,
    pub created_at: UtcDateTime,
    pub updated_at: UtcDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::burn_archives::Entity",
        from = "Column::ArchiveId",
        to = "super::burn_archives::Column::Id"
    )]
    BurnArchive,
}

impl Related<super::burn_archives::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BurnArchive.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();

        if insert {
            if self.created_at.is_not_set() {
                self.created_at = Set(now);
            }
            if self.updated_at.is_not_set() {
                self.updated_at = Set(now);
            }
        } else {
            self.updated_at = Set(now);
        }

        Ok(self)
    }
}
