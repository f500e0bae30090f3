use chrono::NaiveDate;
use cinder_core::dates::DateError;
use cinder_entities::burn_records;
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum BurnError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("A burn record already exists for {0}")]
    DuplicateDate(NaiveDate),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<sea_orm::DbErr> for BurnError {
    fn from(error: sea_orm::DbErr) -> Self {
        BurnError::Persistence(error.to_string())
    }
}

impl From<DateError> for BurnError {
    fn from(error: DateError) -> Self {
        BurnError::InvalidParameter(error.to_string())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBurnRecordRequest {
    pub archive_id: i32,
    /// Raw date string; normalized to a calendar day before use.
    pub date: String,
    pub transaction_ref: String,
    pub burn_amount: f64,
}

/// Partial update; only the provided fields are written.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBurnRecordRequest {
    pub archive_id: Option<i32>,
    pub date: Option<String>,
    pub transaction_ref: Option<String>,
    pub burn_amount: Option<f64>,
}

/// Query parameters for the paged listing, as they arrive from the HTTP
/// layer. `year` and `month` stay raw strings so that missing and
/// non-numeric values surface as the same client error.
#[derive(Debug, Clone, Default)]
pub struct ListBurnRecordsQuery {
    pub year: Option<String>,
    pub month: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Whitelisted sort fields for the paged listing. Anything outside the
/// whitelist silently falls back to `Date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    BurnAmount,
    /// `name` in the query string; maps to the transaction reference, the
    /// only name-like column on a burn record.
    Name,
}

impl SortField {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("burnAmount") => SortField::BurnAmount,
            Some("name") => SortField::Name,
            _ => SortField::Date,
        }
    }

    pub fn column(&self) -> burn_records::Column {
        match self {
            SortField::Date => burn_records::Column::Date,
            SortField::BurnAmount => burn_records::Column::BurnAmount,
            SortField::Name => burn_records::Column::TransactionRef,
        }
    }
}
