use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::error;
use utoipa::OpenApi;

use cinder_core::Problem;
use cinder_entities::Currency;

use crate::services::{CreateBurnRecordRequest, UpdateBurnRecordRequest};

use super::types::{
    AppState, BurnArchiveResponse, BurnRecordResponse, CreateArchiveBody, ListBurnRecordsParams,
    MonthParams,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_burn_archive,
        get_burn_archives,
        create_burn_record,
        list_burn_records,
        list_burn_records_by_month,
        update_burn_record,
        delete_burn_record
    ),
    components(schemas(
        CreateArchiveBody,
        BurnArchiveResponse,
        BurnRecordResponse,
        CreateBurnRecordRequest,
        UpdateBurnRecordRequest
    )),
    info(
        title = "Burns API",
        description = "API endpoints for token-burn archives and per-day burn records.",
        version = "1.0.0"
    )
)]
pub struct BurnsApiDoc;

pub fn configure_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/burns/archives",
            post(create_burn_archive).get(get_burn_archives),
        )
        .route(
            "/burns/records",
            post(create_burn_record).get(list_burn_records),
        )
        .route("/burns/records/by-month", get(list_burn_records_by_month))
        .route(
            "/burns/records/{id}",
            axum::routing::patch(update_burn_record).delete(delete_burn_record),
        )
}

/// Log persistence failures before they leave the service boundary;
/// client errors pass through quietly.
fn surface(context: &str, err: crate::services::BurnError) -> Problem {
    if matches!(err, crate::services::BurnError::Persistence(_)) {
        error!("{}: {}", context, err);
    }
    Problem::from(err)
}

/// Create the archive header row for a currency
#[utoipa::path(
    tag = "Burns",
    post,
    path = "/burns/archives",
    request_body = CreateArchiveBody,
    responses(
        (status = 200, description = "Archive created", body = BurnArchiveResponse),
        (status = 400, description = "Unknown currency"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_burn_archive(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<CreateArchiveBody>,
) -> Result<impl IntoResponse, Problem> {
    let currency = Currency::from_str(&body.currency).ok_or_else(|| {
        Problem::bad_request("invalid-parameter", "Invalid Parameter")
            .with_detail(format!("Unknown currency '{}'", body.currency))
    })?;

    let archive = app_state
        .burn_service
        .create_archive(currency)
        .await
        .map_err(|e| surface("Failed to create burn archive", e))?;

    Ok(Json(BurnArchiveResponse::from(archive)))
}

/// Get the archive pair, SHIB first then LUNC
#[utoipa::path(
    tag = "Burns",
    get,
    path = "/burns/archives",
    responses(
        (status = 200, description = "Archive pair", body = Vec<BurnArchiveResponse>),
        (status = 500, description = "An archive is missing")
    )
)]
async fn get_burn_archives(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, Problem> {
    let shib = app_state
        .burn_service
        .get_archive(Currency::Shib)
        .await
        .map_err(|e| surface("Failed to get SHIB burn archive", e))?;
    let lunc = app_state
        .burn_service
        .get_archive(Currency::Lunc)
        .await
        .map_err(|e| surface("Failed to get LUNC burn archive", e))?;

    let responses: Vec<BurnArchiveResponse> = vec![shib.into(), lunc.into()];
    Ok(Json(responses))
}

/// Create a burn record for one calendar day
#[utoipa::path(
    tag = "Burns",
    post,
    path = "/burns/records",
    request_body = CreateBurnRecordRequest,
    responses(
        (status = 200, description = "Record created", body = BurnRecordResponse),
        (status = 400, description = "Invalid date or duplicate date"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_burn_record(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<CreateBurnRecordRequest>,
) -> Result<impl IntoResponse, Problem> {
    let record = app_state
        .burn_service
        .create_record(body)
        .await
        .map_err(|e| surface("Failed to create burn record", e))?;

    Ok(Json(BurnRecordResponse::from(record)))
}

/// Paged listing of one month's burn records
#[utoipa::path(
    tag = "Burns",
    get,
    path = "/burns/records",
    params(ListBurnRecordsParams),
    responses(
        (status = 200, description = "Burn records, possibly empty", body = Vec<BurnRecordResponse>),
        (status = 400, description = "Missing or non-numeric year/month"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_burn_records(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<ListBurnRecordsParams>,
) -> Result<impl IntoResponse, Problem> {
    let records = app_state
        .burn_service
        .list_paged(params.into())
        .await
        .map_err(|e| surface("Failed to list burn records", e))?;

    let responses: Vec<BurnRecordResponse> = records.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

/// All of one month's burn records, unpaged
#[utoipa::path(
    tag = "Burns",
    get,
    path = "/burns/records/by-month",
    params(MonthParams),
    responses(
        (status = 200, description = "Burn records for the month", body = Vec<BurnRecordResponse>),
        (status = 400, description = "Month out of range"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_burn_records_by_month(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<MonthParams>,
) -> Result<impl IntoResponse, Problem> {
    let records = app_state
        .burn_service
        .list_by_month(params.year, params.month)
        .await
        .map_err(|e| surface("Failed to list burn records by month", e))?;

    let responses: Vec<BurnRecordResponse> = records.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

/// Partially update a burn record
#[utoipa::path(
    tag = "Burns",
    patch,
    path = "/burns/records/{id}",
    request_body = UpdateBurnRecordRequest,
    responses(
        (status = 200, description = "Record updated", body = BurnRecordResponse),
        (status = 400, description = "Invalid date or duplicate date"),
        (status = 500, description = "Internal server error")
    )
)]
async fn update_burn_record(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateBurnRecordRequest>,
) -> Result<impl IntoResponse, Problem> {
    let record = app_state
        .burn_service
        .update_record(id, body)
        .await
        .map_err(|e| surface("Failed to update burn record", e))?;

    Ok(Json(BurnRecordResponse::from(record)))
}

/// Delete a burn record by id
#[utoipa::path(
    tag = "Burns",
    delete,
    path = "/burns/records/{id}",
    responses(
        (status = 200, description = "Record deleted"),
        (status = 500, description = "No such record or internal error")
    )
)]
async fn delete_burn_record(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Problem> {
    app_state
        .burn_service
        .delete_record(id)
        .await
        .map_err(|e| surface("Failed to delete burn record", e))?;

    Ok(Json(serde_json::json!({ "deleted": id })))
}
