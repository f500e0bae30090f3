use std::sync::Arc;

use chrono::NaiveDate;
use cinder_core::Problem;
use cinder_entities::{burn_archives, burn_records};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::services::{BurnError, BurnRecordService, ListBurnRecordsQuery};

pub struct AppState {
    pub burn_service: Arc<BurnRecordService>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArchiveBody {
    /// Currency identifier, e.g. "LUNC" or "SHIB"
    pub currency: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BurnArchiveResponse {
    pub id: i32,
    pub currency: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<burn_archives::Model> for BurnArchiveResponse {
    fn from(model: burn_archives::Model) -> Self {
        BurnArchiveResponse {
            id: model.id,
            currency: model.currency.as_str().to_string(),
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BurnRecordResponse {
    pub id: i32,
    pub archive_id: i32,
    pub date: NaiveDate,
    pub transaction_ref: String,
    pub burn_amount: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<burn_records::Model> for BurnRecordResponse {
    fn from(model: burn_records::Model) -> Self {
        BurnRecordResponse {
            id: model.id,
            archive_id: model.archive_id,
            date: model.date,
            transaction_ref: model.transaction_ref,
            burn_amount: model.burn_amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Query parameters for the paged record listing.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBurnRecordsParams {
    pub year: Option<String>,
    pub month: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

impl From<ListBurnRecordsParams> for ListBurnRecordsQuery {
    fn from(params: ListBurnRecordsParams) -> Self {
        ListBurnRecordsQuery {
            year: params.year,
            month: params.month,
            page: params.page,
            limit: params.limit,
            sort_by: params.sort_by,
            sort_order: params.sort_order,
        }
    }
}

/// Query parameters for the unpaged by-month listing.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthParams {
    pub year: i32,
    pub month: u32,
}

impl From<BurnError> for Problem {
    fn from(err: BurnError) -> Self {
        match &err {
            BurnError::InvalidParameter(detail) => {
                Problem::bad_request("invalid-parameter", "Invalid Parameter")
                    .with_detail(detail.clone())
            }
            BurnError::DuplicateDate(date) => {
                Problem::bad_request("duplicate-date", "Duplicate Burn Date")
                    .with_detail(format!("A burn record already exists for {date}"))
            }
            BurnError::Persistence(detail) => {
                Problem::internal_error("persistence", "Persistence Error")
                    .with_detail(detail.clone())
            }
        }
    }
}
