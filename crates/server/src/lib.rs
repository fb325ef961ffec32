//! HTTP front end: a health probe and a single-PDF upload endpoint.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use cardstmt_core::Bank;
use cardstmt_extract::{ParseOutcome, StatementPipeline, TextSource};
use serde::Serialize;
use serde_json::json;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub mod config;

pub use config::{ServerConfig, Settings};

pub type SharedPipeline = Arc<StatementPipeline<Box<dyn TextSource>>>;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: SharedPipeline,
}

/// Error body: `{"error": "..."}` with the given status.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    fn processing(detail: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Processing failed: {detail}"),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        Self { status: e.status(), message: e.body_text() }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    supported_banks: Vec<Bank>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy", supported_banks: Bank::ALL.to_vec() })
}

/// POST /upload
///
/// Multipart form with a `file` field holding one PDF statement. The
/// upload never touches disk.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseOutcome>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        upload = Some((file_name, data.to_vec()));
        break;
    }

    let (file_name, data) = match upload {
        Some((name, data)) if !name.is_empty() => (name, data),
        _ => return Err(AppError::bad_request("No file selected")),
    };
    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(AppError::bad_request("Only PDF files are allowed"));
    }

    let file_name = base_name(&file_name).to_string();
    let file_size = data.len() as u64;
    tracing::info!("Processing upload {file_name} ({file_size} bytes)");

    let pipeline = Arc::clone(&state.pipeline);
    let result = tokio::task::spawn_blocking(move || pipeline.process_bytes(&data))
        .await
        .map_err(AppError::processing)?;

    let outcome: ParseOutcome = result.map(|r| r.with_source(file_name, file_size)).into();
    Ok(Json(outcome))
}

/// Strip any client-supplied directory components.
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use cardstmt_extract::{MockTextSource, ParserConfig};
    use serde_json::Value;
    use tower::ServiceExt;

    const BOUNDARY: &str = "cardstmt-test-boundary";
    const HDFC: &str = "HDFC Bank Credit Card Statement
        Card Number: ****1234
        Statement Period: 01-Sep-2024 to 30-Sep-2024
        Total Amount Due: ₹45,230.50
        Payment Due Date: 25-10-2024
        Credit Limit: ₹200000";

    fn app(text: &str) -> Router {
        let source: Box<dyn TextSource> = Box::new(MockTextSource::new(text));
        let pipeline = Arc::new(StatementPipeline::new(source, ParserConfig::default()));
        router(AppState { pipeline }, 1024 * 1024)
    }

    fn multipart(field: &str, file_name: Option<&str>, content: &[u8]) -> Request<Body> {
        let disposition = match file_name {
            Some(f) => format!("form-data; name=\"{field}\"; filename=\"{f}\""),
            None => format!("form-data; name=\"{field}\""),
        };
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_lists_supported_banks() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(""), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(
            body["supported_banks"],
            serde_json::json!(["HDFC", "ICICI", "SBI", "AXIS", "KOTAK"])
        );
    }

    #[tokio::test]
    async fn upload_returns_report_with_source() {
        let req = multipart("file", Some("C:\\Users\\me\\sept.pdf"), b"%PDF-1.4 body");
        let (status, body) = send(app(HDFC), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bank"], "HDFC");
        assert_eq!(body["total_balance"], "45,230.50");
        assert_eq!(body["extraction_method"], "PDF");
        assert_eq!(body["source_file"], "sept.pdf");
        assert_eq!(body["file_size"], 13);
    }

    #[tokio::test]
    async fn unknown_issuer_is_still_ok_with_error_body() {
        let req = multipart("file", Some("other.PDF"), b"%PDF");
        let (status, body) = send(app("Some other lender"), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "UnknownInstitution");
        assert_eq!(body["extracted_text_preview"], "Some other lender");
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let req = multipart("document", Some("a.pdf"), b"%PDF");
        let (status, body) = send(app(HDFC), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file selected");
    }

    #[tokio::test]
    async fn empty_file_name_is_rejected() {
        let req = multipart("file", Some(""), b"%PDF");
        let (status, body) = send(app(HDFC), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file selected");
    }

    #[tokio::test]
    async fn non_pdf_is_rejected() {
        let req = multipart("file", Some("statement.txt"), HDFC.as_bytes());
        let (status, body) = send(app(HDFC), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Only PDF files are allowed");
    }

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("a/b/c.pdf"), "c.pdf");
        assert_eq!(base_name("..\\x.pdf"), "x.pdf");
        assert_eq!(base_name("plain.pdf"), "plain.pdf");
    }
}
