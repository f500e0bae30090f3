use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};
use tracing::info;

use cinder_core::dates::{month_range, normalize_date};
use cinder_core::pagination::{PageOptions, Pagination, SortDirection};
use cinder_database::DbConnection;
use cinder_entities::{burn_archives, burn_records, Currency};

use super::types::{
    BurnError, CreateBurnRecordRequest, ListBurnRecordsQuery, SortField, UpdateBurnRecordRequest,
};

/// Service for burn archives and per-day burn records.
///
/// Stateless between calls; every operation is a single round trip to the
/// database behind the injected connection.
pub struct BurnRecordService {
    db: Arc<DbConnection>,
}

impl BurnRecordService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self { db }
    }

    /// Create the archive header row for a currency.
    ///
    /// No duplicate check: calling this twice for the same currency
    /// produces two rows. Prevention is the caller's concern.
    pub async fn create_archive(
        &self,
        currency: Currency,
    ) -> Result<burn_archives::Model, BurnError> {
        let archive = burn_archives::ActiveModel {
            currency: Set(currency),
            ..Default::default()
        };

        let result = archive.insert(self.db.as_ref()).await.map_err(|e| {
            BurnError::Persistence(format!("Failed to create {currency} burn archive: {e}"))
        })?;

        info!("Created burn archive {} for {}", result.id, currency);
        Ok(result)
    }

    /// Fetch the archive row for one currency. A missing archive is a
    /// persistence failure: the row is expected to exist once seeded.
    pub async fn get_archive(&self, currency: Currency) -> Result<burn_archives::Model, BurnError> {
        let archive = burn_archives::Entity::find()
            .filter(burn_archives::Column::Currency.eq(currency))
            .one(self.db.as_ref())
            .await?;

        archive.ok_or_else(|| {
            BurnError::Persistence(format!("Failed to get {currency} burn archive record"))
        })
    }

    /// Insert one burn record for a calendar day.
    ///
    /// The pre-check gives the common case a clean client error; the
    /// unique index on `date` settles concurrent inserts, so a constraint
    /// violation from the insert itself is reported the same way.
    pub async fn create_record(
        &self,
        request: CreateBurnRecordRequest,
    ) -> Result<burn_records::Model, BurnError> {
        let date = normalize_date(&request.date)?;

        let existing = burn_records::Entity::find()
            .filter(burn_records::Column::Date.eq(date))
            .one(self.db.as_ref())
            .await?;
        if existing.is_some() {
            return Err(BurnError::DuplicateDate(date));
        }

        let record = burn_records::ActiveModel {
            archive_id: Set(request.archive_id),
            date: Set(date),
            transaction_ref: Set(request.transaction_ref),
            burn_amount: Set(request.burn_amount),
            ..Default::default()
        };

        let result = record
            .insert(self.db.as_ref())
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => BurnError::DuplicateDate(date),
                _ => BurnError::Persistence(format!("Failed to create burn record: {e}")),
            })?;

        info!("Created burn record {} for {}", result.id, date);
        Ok(result)
    }

    /// Partial update by id. A date change is checked for collision
    /// against every record except the one being updated.
    pub async fn update_record(
        &self,
        id: i32,
        request: UpdateBurnRecordRequest,
    ) -> Result<burn_records::Model, BurnError> {
        let new_date = match &request.date {
            Some(raw) => {
                let date = normalize_date(raw)?;
                let clash = burn_records::Entity::find()
                    .filter(burn_records::Column::Date.eq(date))
                    .filter(burn_records::Column::Id.ne(id))
                    .one(self.db.as_ref())
                    .await?;
                if clash.is_some() {
                    return Err(BurnError::DuplicateDate(date));
                }
                Some(date)
            }
            None => None,
        };

        let record = burn_records::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                BurnError::Persistence(format!("Failed to update burn record {id}: no such record"))
            })?;

        let mut active = record.into_active_model();
        if let Some(archive_id) = request.archive_id {
            active.archive_id = Set(archive_id);
        }
        if let Some(date) = new_date {
            active.date = Set(date);
        }
        if let Some(transaction_ref) = request.transaction_ref {
            active.transaction_ref = Set(transaction_ref);
        }
        if let Some(burn_amount) = request.burn_amount {
            active.burn_amount = Set(burn_amount);
        }

        let result = active
            .update(self.db.as_ref())
            .await
            .map_err(|e| match (e.sql_err(), new_date) {
                (Some(SqlErr::UniqueConstraintViolation(_)), Some(date)) => {
                    BurnError::DuplicateDate(date)
                }
                _ => BurnError::Persistence(format!("Failed to update burn record {id}: {e}")),
            })?;

        Ok(result)
    }

    /// Delete by id. Deleting a record that does not exist is a
    /// persistence failure, matching the store's delete contract.
    pub async fn delete_record(&self, id: i32) -> Result<(), BurnError> {
        let result = burn_records::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(BurnError::Persistence(format!(
                "Failed to delete burn record {id}: no such record"
            )));
        }

        info!("Deleted burn record {}", id);
        Ok(())
    }

    /// All records for one calendar month, date descending, unpaged.
    pub async fn list_by_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<burn_records::Model>, BurnError> {
        let (start, end) = month_range(year, month)?;

        let records = burn_records::Entity::find()
            .filter(burn_records::Column::Date.gte(start))
            .filter(burn_records::Column::Date.lt(end))
            .order_by_desc(burn_records::Column::Date)
            .all(self.db.as_ref())
            .await?;

        Ok(records)
    }

    /// Paged listing for one calendar month.
    ///
    /// `year` and `month` are required and must be numeric; the month must
    /// be 1-12 (no rollover). An empty month yields an empty vec.
    pub async fn list_paged(
        &self,
        query: ListBurnRecordsQuery,
    ) -> Result<Vec<burn_records::Model>, BurnError> {
        let year: i32 = required_param("year", query.year.as_deref())?;
        let month: u32 = required_param("month", query.month.as_deref())?;
        let (start, end) = month_range(year, month)?;

        let pagination = Pagination::from_options(PageOptions {
            page: query.page,
            limit: query.limit,
            sort_by: query.sort_by,
            sort_order: query.sort_order,
        });
        let sort_column = SortField::parse(pagination.sort_by.as_deref()).column();

        let find = burn_records::Entity::find()
            .filter(burn_records::Column::Date.gte(start))
            .filter(burn_records::Column::Date.lt(end))
            .offset(pagination.skip)
            .limit(pagination.limit);

        let find = match pagination.sort_order {
            SortDirection::Asc => find.order_by_asc(sort_column),
            SortDirection::Desc => find.order_by_desc(sort_column),
        };

        let records = find.all(self.db.as_ref()).await?;
        Ok(records)
    }
}

fn required_param<T: std::str::FromStr>(name: &str, raw: Option<&str>) -> Result<T, BurnError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<T>().ok())
        .ok_or_else(|| {
            BurnError::InvalidParameter(format!("Invalid or missing '{name}' query parameter"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cinder_database::test_utils::TestDatabase;

    async fn setup() -> anyhow::Result<(TestDatabase, BurnRecordService)> {
        let test_db = TestDatabase::new().await?;
        let service = BurnRecordService::new(test_db.connection_arc());
        Ok((test_db, service))
    }

    async fn seed_archive(service: &BurnRecordService) -> i32 {
        service.create_archive(Currency::Lunc).await.unwrap().id
    }

    async fn seed_record(
        service: &BurnRecordService,
        archive_id: i32,
        date: &str,
        burn_amount: f64,
    ) -> burn_records::Model {
        service
            .create_record(CreateBurnRecordRequest {
                archive_id,
                date: date.to_string(),
                transaction_ref: format!("tx-{date}"),
                burn_amount,
            })
            .await
            .unwrap()
    }

    fn month_query(year: &str, month: &str) -> ListBurnRecordsQuery {
        ListBurnRecordsQuery {
            year: Some(year.to_string()),
            month: Some(month.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_record_shows_up_in_its_month_exactly_once() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;

        let created = seed_record(&service, archive_id, "2025-01-05", 100.0).await;

        let records = service.list_by_month(2025, 1).await?;
        let matching: Vec<_> = records.iter().filter(|r| r.id == created.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(matching[0].archive_id, archive_id);
        Ok(())
    }

    #[tokio::test]
    async fn second_create_on_same_date_is_a_duplicate() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        seed_record(&service, archive_id, "2025-01-05", 100.0).await;

        let err = service
            .create_record(CreateBurnRecordRequest {
                archive_id,
                date: "2025-01-05".to_string(),
                transaction_ref: "tx-dup".to_string(),
                burn_amount: 50.0,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BurnError::DuplicateDate(_)));
        Ok(())
    }

    #[tokio::test]
    async fn timestamp_input_normalizes_to_the_same_day() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;

        let created = seed_record(&service, archive_id, "2025-01-05T14:30:00Z", 100.0).await;
        assert_eq!(created.date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());

        // Plain-date input for the same day collides with the timestamp one.
        let err = service
            .create_record(CreateBurnRecordRequest {
                archive_id,
                date: "2025-01-05".to_string(),
                transaction_ref: "tx-dup".to_string(),
                burn_amount: 1.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BurnError::DuplicateDate(_)));
        Ok(())
    }

    #[tokio::test]
    async fn unparseable_date_is_a_client_error() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;

        let err = service
            .create_record(CreateBurnRecordRequest {
                archive_id,
                date: "not-a-date".to_string(),
                transaction_ref: "tx".to_string(),
                burn_amount: 1.0,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BurnError::InvalidParameter(_)));
        Ok(())
    }

    #[tokio::test]
    async fn month_boundaries_are_half_open() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        seed_record(&service, archive_id, "2025-01-05", 1.0).await;
        seed_record(&service, archive_id, "2025-01-31", 2.0).await;
        seed_record(&service, archive_id, "2025-02-01", 3.0).await;

        let records = service.list_by_month(2025, 1).await?;
        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();

        // Date descending is the default order.
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn list_by_month_rejects_out_of_range_month() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;

        let err = service.list_by_month(2025, 13).await.unwrap_err();
        assert!(matches!(err, BurnError::InvalidParameter(_)));
        Ok(())
    }

    #[tokio::test]
    async fn empty_month_lists_as_empty_not_error() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;

        let records = service.list_paged(month_query("2025", "6")).await?;
        assert!(records.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_paged_requires_numeric_year_and_month() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;

        let missing_year = service
            .list_paged(ListBurnRecordsQuery {
                month: Some("1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(missing_year, BurnError::InvalidParameter(_)));

        let bad_month = service
            .list_paged(month_query("2025", "first"))
            .await
            .unwrap_err();
        assert!(matches!(bad_month, BurnError::InvalidParameter(_)));

        // Month 13 is rejected, not rolled over into the next year.
        let month_13 = service
            .list_paged(month_query("2025", "13"))
            .await
            .unwrap_err();
        assert!(matches!(month_13, BurnError::InvalidParameter(_)));
        Ok(())
    }

    #[tokio::test]
    async fn bogus_sort_field_behaves_like_date() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        seed_record(&service, archive_id, "2025-01-05", 1.0).await;
        seed_record(&service, archive_id, "2025-01-10", 2.0).await;
        seed_record(&service, archive_id, "2025-01-02", 3.0).await;

        let mut bogus = month_query("2025", "1");
        bogus.sort_by = Some("bogusField".to_string());
        let by_bogus = service.list_paged(bogus).await?;

        let mut by_date_query = month_query("2025", "1");
        by_date_query.sort_by = Some("date".to_string());
        let by_date = service.list_paged(by_date_query).await?;

        let bogus_ids: Vec<i32> = by_bogus.iter().map(|r| r.id).collect();
        let date_ids: Vec<i32> = by_date.iter().map(|r| r.id).collect();
        assert_eq!(bogus_ids, date_ids);
        Ok(())
    }

    #[tokio::test]
    async fn sorts_by_burn_amount_ascending_when_asked() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        seed_record(&service, archive_id, "2025-01-05", 30.0).await;
        seed_record(&service, archive_id, "2025-01-06", 10.0).await;
        seed_record(&service, archive_id, "2025-01-07", 20.0).await;

        let mut query = month_query("2025", "1");
        query.sort_by = Some("burnAmount".to_string());
        query.sort_order = Some("asc".to_string());
        let records = service.list_paged(query).await?;

        let amounts: Vec<f64> = records.iter().map(|r| r.burn_amount).collect();
        assert_eq!(amounts, vec![10.0, 20.0, 30.0]);
        Ok(())
    }

    #[tokio::test]
    async fn sorts_by_name_using_the_transaction_reference() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        // Transaction refs deliberately out of date order.
        for (date, transaction_ref) in [
            ("2025-01-05", "tx-c"),
            ("2025-01-10", "tx-a"),
            ("2025-01-07", "tx-b"),
        ] {
            service
                .create_record(CreateBurnRecordRequest {
                    archive_id,
                    date: date.to_string(),
                    transaction_ref: transaction_ref.to_string(),
                    burn_amount: 1.0,
                })
                .await
                .unwrap();
        }

        let mut query = month_query("2025", "1");
        query.sort_by = Some("name".to_string());
        query.sort_order = Some("asc".to_string());
        let records = service.list_paged(query).await?;

        let refs: Vec<&str> = records
            .iter()
            .map(|r| r.transaction_ref.as_str())
            .collect();
        assert_eq!(refs, vec!["tx-a", "tx-b", "tx-c"]);
        Ok(())
    }

    #[tokio::test]
    async fn pagination_skips_whole_pages() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        for day in 1..=5 {
            seed_record(&service, archive_id, &format!("2025-01-0{day}"), day as f64).await;
        }

        let mut query = month_query("2025", "1");
        query.page = Some(2);
        query.limit = Some(2);
        query.sort_order = Some("asc".to_string());
        let records = service.list_paged(query).await?;

        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn update_moving_onto_another_records_date_is_a_duplicate() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        let record_x = seed_record(&service, archive_id, "2025-01-10", 1.0).await;
        seed_record(&service, archive_id, "2025-01-05", 2.0).await;

        let err = service
            .update_record(
                record_x.id,
                UpdateBurnRecordRequest {
                    date: Some("2025-01-05".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BurnError::DuplicateDate(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_resupplying_own_date_does_not_collide() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        let record = seed_record(&service, archive_id, "2025-01-10", 1.0).await;

        let updated = service
            .update_record(
                record.id,
                UpdateBurnRecordRequest {
                    date: Some("2025-01-10".to_string()),
                    burn_amount: Some(42.0),
                    ..Default::default()
                },
            )
            .await?;

        assert_eq!(updated.date, record.date);
        assert_eq!(updated.burn_amount, 42.0);
        Ok(())
    }

    #[tokio::test]
    async fn update_writes_only_the_provided_fields() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        let record = seed_record(&service, archive_id, "2025-01-10", 1.0).await;

        let updated = service
            .update_record(
                record.id,
                UpdateBurnRecordRequest {
                    transaction_ref: Some("tx-amended".to_string()),
                    ..Default::default()
                },
            )
            .await?;

        assert_eq!(updated.transaction_ref, "tx-amended");
        assert_eq!(updated.date, record.date);
        assert_eq!(updated.burn_amount, record.burn_amount);
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_record_is_a_persistence_error() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;

        let err = service
            .update_record(
                9999,
                UpdateBurnRecordRequest {
                    burn_amount: Some(1.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BurnError::Persistence(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_the_record() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        let archive_id = seed_archive(&service).await;
        let record = seed_record(&service, archive_id, "2025-01-10", 1.0).await;

        service.delete_record(record.id).await?;

        let records = service.list_by_month(2025, 1).await?;
        assert!(records.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_a_persistence_error() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;

        let err = service.delete_record(9999).await.unwrap_err();
        assert!(matches!(err, BurnError::Persistence(_)));
        Ok(())
    }

    #[tokio::test]
    async fn archives_are_fetched_per_currency() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;
        service.create_archive(Currency::Lunc).await?;
        service.create_archive(Currency::Shib).await?;

        let lunc = service.get_archive(Currency::Lunc).await?;
        let shib = service.get_archive(Currency::Shib).await?;
        assert_eq!(lunc.currency, Currency::Lunc);
        assert_eq!(shib.currency, Currency::Shib);
        Ok(())
    }

    #[tokio::test]
    async fn missing_archive_is_a_persistence_error() -> anyhow::Result<()> {
        let (_db, service) = setup().await?;

        let err = service.get_archive(Currency::Shib).await.unwrap_err();
        assert!(matches!(err, BurnError::Persistence(_)));
        Ok(())
    }
}
