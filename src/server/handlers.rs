use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use chrono::Local;

use crate::error::api::{ApiError, ApiResult};
use crate::export::{self, ExportRow};
use crate::model::extraction::{ExportRequest, ExtractRequest, ExtractResponse};
use crate::model::health::HealthResponse;
use crate::server::state::AppState;

pub async fn extract(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> ApiResult<Json<ExtractResponse>> {
    let Json(request) = payload?;
    if request.urls.is_empty() {
        return Err(ApiError::BadRequest("No URLs provided".to_string()));
    }

    let results = state.extractor.extract_many(&request.urls).await;
    Ok(Json(ExtractResponse::new(results)))
}

fn rows_to_export(payload: Result<Json<ExportRequest>, JsonRejection>) -> ApiResult<Vec<ExportRow>> {
    let Json(request) = payload?;
    if request.results.is_empty() {
        return Err(ApiError::BadRequest("No data to export".to_string()));
    }

    let rows = export::flatten(&request.results);
    if rows.is_empty() {
        return Err(ApiError::BadRequest("No courses found to export".to_string()));
    }
    Ok(rows)
}

fn attachment(content_type: &str, extension: &str, body: Vec<u8>) -> Response {
    let filename = export::export_filename(extension, Local::now().naive_local());
    log::info!("Sending export {}", filename);
    (
        [
            (CONTENT_TYPE, content_type.to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        body,
    )
        .into_response()
}

pub async fn export_csv(payload: Result<Json<ExportRequest>, JsonRejection>) -> ApiResult<Response> {
    let rows = rows_to_export(payload)?;
    let body = export::csv::write_csv(&rows)?;
    Ok(attachment(export::csv::CONTENT_TYPE, "csv", body))
}

pub async fn export_excel(payload: Result<Json<ExportRequest>, JsonRejection>) -> ApiResult<Response> {
    let rows = rows_to_export(payload)?;
    let body = export::excel::write_xlsx(&rows)?;
    Ok(attachment(export::excel::CONTENT_TYPE, "xlsx", body))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
