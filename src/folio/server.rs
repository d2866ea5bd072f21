//! HTTP boundary.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `POST /contact` | contact form submission (urlencoded) |
//! | `POST /api/feedback` | submission as JSON |
//! | `GET /api/feedback` | filtered entries as `{success, data, count}` |
//! | `GET /admin/feedback` | page data for the admin view |
//! | `DELETE /api/feedback/{id}` | remove one entry |
//! | `GET /admin/feedback/export` | CSV download |
//! | `GET /health` | liveness |
//!
//! Store calls block, so handlers run them on the blocking pool. A create
//! has reached the disk by the time its response is sent.

use crate::api::{FeedbackView, FolioApi};
use crate::commands::THANK_YOU;
use crate::error::{FolioError, Result};
use crate::model::{EntryId, FeedbackEntry, Field, Submission};
use crate::query::FeedbackQuery;
use crate::store::FeedbackStore;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Form, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shown to visitors when the store fails; details go to the log only.
pub const SERVER_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub contact_type: Option<String>,
    pub date_range: Option<String>,
}

impl ListParams {
    fn to_query(&self) -> Result<FeedbackQuery> {
        FeedbackQuery::from_raw(
            self.search.as_deref(),
            self.contact_type.as_deref(),
            self.date_range.as_deref(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub id: EntryId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<FeedbackEntry>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

/// Maps [`FolioError`] onto a status code and JSON body.
pub struct ApiError(FolioError);

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_client_error() {
            let body = ErrorResponse {
                success: false,
                error: err.to_string(),
                field: err.field(),
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        tracing::error!(error = %err, "Request failed");
        let body = ErrorResponse {
            success: false,
            error: SERVER_ERROR_MESSAGE.to_string(),
            field: None,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .unwrap_or_else(|e| Err(FolioError::StoreUnavailable(format!("store task failed: {}", e))))
}

async fn submit<S: FeedbackStore + 'static>(
    api: Arc<FolioApi<S>>,
    submission: Submission,
) -> std::result::Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let result = blocking(move || api.submit(&submission)).await?;
    let stored = result
        .affected_entries
        .into_iter()
        .next()
        .ok_or_else(|| FolioError::StoreUnavailable("store returned no entry".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: THANK_YOU.to_string(),
            id: stored.id,
        }),
    ))
}

// Bodies that fail to decode are answered with the same JSON error shape
// as validation failures, not axum's plain-text rejections.
async fn submit_form<S: FeedbackStore + 'static>(
    State(api): State<Arc<FolioApi<S>>>,
    form: std::result::Result<Form<Submission>, FormRejection>,
) -> std::result::Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let Form(submission) = form.map_err(|r| FolioError::InvalidBody(r.body_text()))?;
    submit(api, submission).await
}

async fn submit_json<S: FeedbackStore + 'static>(
    State(api): State<Arc<FolioApi<S>>>,
    json: std::result::Result<Json<Submission>, JsonRejection>,
) -> std::result::Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let Json(submission) = json.map_err(|r| FolioError::InvalidBody(r.body_text()))?;
    submit(api, submission).await
}

async fn view<S: FeedbackStore + 'static>(
    api: Arc<FolioApi<S>>,
    params: ListParams,
) -> std::result::Result<FeedbackView, ApiError> {
    let query = params.to_query()?;
    Ok(blocking(move || api.feedback_view(&query)).await?)
}

async fn list_json<S: FeedbackStore + 'static>(
    State(api): State<Arc<FolioApi<S>>>,
    Query(params): Query<ListParams>,
) -> std::result::Result<Json<ListResponse>, ApiError> {
    let view = view(api, params).await?;
    Ok(Json(ListResponse {
        success: true,
        count: view.count,
        data: view.entries,
    }))
}

async fn admin_page<S: FeedbackStore + 'static>(
    State(api): State<Arc<FolioApi<S>>>,
    Query(params): Query<ListParams>,
) -> std::result::Result<Json<FeedbackView>, ApiError> {
    Ok(Json(view(api, params).await?))
}

async fn delete_entry<S: FeedbackStore + 'static>(
    State(api): State<Arc<FolioApi<S>>>,
    Path(id): Path<String>,
) -> std::result::Result<Json<DeleteResponse>, ApiError> {
    let id = EntryId::new(id);
    let result = blocking(move || api.delete(&[id])).await?;
    Ok(Json(DeleteResponse {
        success: true,
        deleted: !result.removed_ids.is_empty(),
    }))
}

async fn export_csv<S: FeedbackStore + 'static>(
    State(api): State<Arc<FolioApi<S>>>,
    Query(params): Query<ListParams>,
) -> std::result::Result<Response, ApiError> {
    let query = params.to_query()?;
    let result = blocking(move || api.export_csv(&query)).await?;
    let export = result
        .export
        .ok_or_else(|| FolioError::StoreUnavailable("export produced no payload".to_string()))?;

    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}

async fn health() -> &'static str {
    "ok"
}

/// Build the HTTP router around a shared API instance.
pub fn build_router<S: FeedbackStore + 'static>(api: Arc<FolioApi<S>>) -> Router {
    Router::new()
        .route("/contact", post(submit_form::<S>))
        .route("/api/feedback", post(submit_json::<S>).get(list_json::<S>))
        .route("/api/feedback/{id}", delete(delete_entry::<S>))
        .route("/admin/feedback", get(admin_page::<S>))
        .route("/admin/feedback/export", get(export_csv::<S>))
        .route("/health", get(health))
        .with_state(api)
}

/// Serve until Ctrl-C.
pub async fn serve<S: FeedbackStore + 'static>(api: Arc<FolioApi<S>>, bind: &str) -> Result<()> {
    let location = api.store().location();
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(FolioError::Io)?;
    let addr = listener.local_addr().map_err(FolioError::Io)?;
    tracing::info!(%addr, store = %location, "Folio listening");

    axum::serve(listener, build_router(api))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(FolioError::Io)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutting down");
    }
}
