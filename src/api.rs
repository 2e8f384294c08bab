//! HTTP surface for TrustShield
//!
//! One axum `Router` over a shared [`Analyzer`], with CORS and JSON
//! envelopes throughout. Attachments travel as base64 inside the JSON
//! body rather than as multipart parts.
//!
//! ## Endpoint Map
//!
//! | Method | Path                      | Description                      |
//! |--------|---------------------------|----------------------------------|
//! | GET    | `/health`                 | Load balancer health probe       |
//! | POST   | `/api/v1/scan`            | Message scan (text, screenshot)  |
//! | POST   | `/api/v1/scan-url`        | URL audit                        |
//! | POST   | `/api/v1/analyze`         | Document forensics               |
//! | POST   | `/api/v1/analyze-payment` | Payment-proof audit              |
//! | GET    | `/api/v1/safety-report`   | Session-wide fraud-chain report  |
//! | GET    | `/api/v1/overview-stats`  | Dashboard statistics             |
//!
//! A scan request that carries nothing to analyze is a 400 with an
//! `{error: {code, message}}` body. Any failure past request validation
//! still answers 200 with a well-formed ERROR verdict envelope.

use crate::analyzer::{Analyzer, FileUpload};
use crate::error::{Error, Result};
use crate::oracle::ChainJudgment;
use crate::verdict::{ArtifactKind, Verdict};
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Base64 attachment envelope used by every upload-carrying endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentBody {
    pub mime_type: String,
    /// Standard-alphabet base64 of the raw file bytes
    pub data: String,
}

#[derive(Debug, Deserialize)]
struct ScanRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    attachment: Option<AttachmentBody>,
}

#[derive(Debug, Deserialize)]
struct ScanUrlRequest {
    url: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    filename: String,
    attachment: AttachmentBody,
    #[serde(default)]
    query: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzePaymentRequest {
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    recipient: String,
    #[serde(default)]
    query: String,
    #[serde(default)]
    attachment: Option<AttachmentBody>,
}

/// Build the complete TrustShield HTTP application.
pub fn build_app(analyzer: Arc<Analyzer>, cors_origins: &[String]) -> Router {
    let cors = build_cors(cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/scan", post(scan_message))
        .route("/api/v1/scan-url", post(scan_url))
        .route("/api/v1/analyze", post(analyze_document))
        .route("/api/v1/analyze-payment", post(analyze_payment))
        .route("/api/v1/safety-report", get(safety_report))
        .route("/api/v1/overview-stats", get(overview_stats))
        .with_state(analyzer)
        .layer(cors)
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn scan_message(
    State(analyzer): State<Arc<Analyzer>>,
    Json(request): Json<ScanRequest>,
) -> Response {
    let file = match request.attachment {
        Some(attachment) => match decode_upload("upload", attachment) {
            Ok(file) => Some(file),
            Err(response) => return response,
        },
        None => None,
    };
    verdict_response(
        ArtifactKind::Message,
        analyzer.scan_message(request.text, file).await,
    )
}

async fn scan_url(
    State(analyzer): State<Arc<Analyzer>>,
    Json(request): Json<ScanUrlRequest>,
) -> Response {
    verdict_response(ArtifactKind::Url, analyzer.scan_url(&request.url).await)
}

async fn analyze_document(
    State(analyzer): State<Arc<Analyzer>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    let file = match decode_upload(request.filename, request.attachment) {
        Ok(file) => file,
        Err(response) => return response,
    };
    verdict_response(
        ArtifactKind::Document,
        analyzer.scan_document(file, &request.query).await,
    )
}

async fn analyze_payment(
    State(analyzer): State<Arc<Analyzer>>,
    Json(request): Json<AnalyzePaymentRequest>,
) -> Response {
    let file = match request.attachment {
        Some(attachment) => match decode_upload("payment-proof", attachment) {
            Ok(file) => Some(file),
            Err(response) => return response,
        },
        None => None,
    };
    verdict_response(
        ArtifactKind::Payment,
        analyzer
            .scan_payment(request.amount, &request.recipient, &request.query, file)
            .await,
    )
}

async fn safety_report(State(analyzer): State<Arc<Analyzer>>) -> Response {
    match analyzer.fraud_report().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "safety report failed; serving fallback");
            let fallback = ChainJudgment {
                fraud_type: "UNKNOWN".to_string(),
                risk_score: 0,
                narrative: "Analysis service unavailable.".to_string(),
                recommendation: String::new(),
            };
            (StatusCode::OK, Json(fallback)).into_response()
        }
    }
}

async fn overview_stats(State(analyzer): State<Arc<Analyzer>>) -> impl IntoResponse {
    Json(analyzer.overview_stats().await)
}

// =============================================================================
// Envelope plumbing
// =============================================================================

/// Map an analysis outcome onto the wire: verdicts pass through, an
/// invalid request is the only 400, and anything else still answers 200
/// with an ERROR envelope.
fn verdict_response(kind: ArtifactKind, result: Result<Verdict>) -> Response {
    match result {
        Ok(verdict) => (StatusCode::OK, Json(verdict)).into_response(),
        Err(Error::InvalidRequest(message)) => bad_request("INVALID_REQUEST", message),
        Err(e) => {
            tracing::warn!(%kind, error = %e, "scan failed; serving error envelope");
            (StatusCode::OK, Json(Verdict::error(kind, e.to_string()))).into_response()
        }
    }
}

fn bad_request(code: &str, message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": {"code": code, "message": message.into()}})),
    )
        .into_response()
}

fn decode_upload(
    filename: impl Into<String>,
    attachment: AttachmentBody,
) -> std::result::Result<FileUpload, Response> {
    match base64::engine::general_purpose::STANDARD.decode(attachment.data.as_bytes()) {
        Ok(content) => Ok(FileUpload {
            filename: filename.into(),
            mime_type: attachment.mime_type,
            content,
        }),
        Err(e) => Err(bad_request(
            "BAD_ATTACHMENT",
            format!("attachment is not valid base64: {}", e),
        )),
    }
}

// =============================================================================
// CORS
// =============================================================================

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}
