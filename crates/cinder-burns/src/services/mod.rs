mod burn_service;
mod types;

pub use burn_service::BurnRecordService;
pub use types::{
    BurnError, CreateBurnRecordRequest, ListBurnRecordsQuery, SortField, UpdateBurnRecordRequest,
};
