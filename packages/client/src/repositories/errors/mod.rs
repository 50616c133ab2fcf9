pub mod api_errors;
pub mod storage_errors;
