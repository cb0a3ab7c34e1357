use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::document::{build_resume_record, EntryOrder, ResumeRecord};
use crate::errors::AppError;
use crate::models::cv::RawCvRecord;
use crate::render::{LaidOutDocument, RenderedCv, Renderer};
use crate::session::Session;
use crate::state::AppState;

const X_RENDER_ID: &str = "x-render-id";
const X_PAGE_COUNT: &str = "x-page-count";

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub order: EntryOrder,
}

fn order_from(query: Result<Query<ExportQuery>, QueryRejection>) -> Result<EntryOrder, AppError> {
    query
        .map(|Query(q)| q.order)
        .map_err(|e| AppError::Validation(e.body_text()))
}

fn record_from(body: Result<Json<RawCvRecord>, JsonRejection>) -> Result<RawCvRecord, AppError> {
    body.map(|Json(raw)| raw)
        .map_err(|e| AppError::Validation(e.body_text()))
}

/// POST /api/v1/cv/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
    body: Result<Json<RawCvRecord>, JsonRejection>,
) -> Result<Response, AppError> {
    let order = order_from(query)?;
    let raw = record_from(body)?;
    export_pdf(&state, &raw, order).await
}

/// GET /api/v1/cv/export/pdf
/// Exports the caller's stored record, fetched with their own session.
pub async fn handle_export_stored_pdf(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let order = order_from(query)?;
    let raw = state.record_source.fetch_cv_data(&session).await?;
    export_pdf(&state, &raw, order).await
}

/// POST /api/v1/cv/layout
/// Runs the layout pass only and returns the display list for previews.
pub async fn handle_layout(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
    body: Result<Json<RawCvRecord>, JsonRejection>,
) -> Result<Json<LaidOutDocument>, AppError> {
    let order = order_from(query)?;
    let record = build_resume_record(&record_from(body)?, order)?;
    let layout = run_blocking(&state, record, |renderer, record| renderer.layout(&record)).await?;
    Ok(Json(layout))
}

async fn export_pdf(
    state: &AppState,
    raw: &RawCvRecord,
    order: EntryOrder,
) -> Result<Response, AppError> {
    let record = build_resume_record(raw, order)?;
    let render_id = Uuid::new_v4();

    let rendered = run_blocking(state, record, |renderer, record| renderer.render(&record)).await??;

    info!(
        %render_id,
        pages = rendered.page_count,
        bytes = rendered.bytes.len(),
        filename = %rendered.filename,
        "CV exported"
    );

    pdf_response(render_id, rendered)
}

/// Runs a render-pass closure on the blocking pool so the executor stays free.
async fn run_blocking<T, F>(state: &AppState, record: ResumeRecord, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&Renderer, ResumeRecord) -> T + Send + 'static,
{
    let renderer = state.renderer.clone();
    tokio::task::spawn_blocking(move || f(&renderer, record))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))
}

/// Plain `filename` for every client; non-ASCII names add an RFC 5987 `filename*`.
fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        return format!("attachment; filename=\"{filename}\"");
    }
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}

fn pdf_response(render_id: Uuid, rendered: RenderedCv) -> Result<Response, AppError> {
    let disposition = content_disposition(&rendered.filename);

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("bad filename header: {e}")))?,
    );
    headers.insert(
        HeaderName::from_static(X_RENDER_ID),
        HeaderValue::from_str(&render_id.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("bad render id header: {e}")))?,
    );
    headers.insert(
        HeaderName::from_static(X_PAGE_COUNT),
        HeaderValue::from(rendered.page_count),
    );

    Ok((StatusCode::OK, headers, Bytes::from(rendered.bytes)).into_response())
}
