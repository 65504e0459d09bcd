use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Query},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{debug, info};

use crate::cli::formats::rule_to_json;
use crate::cli::ServeArgs;
use crate::core::args::{ImportArgs, DEFAULT_TITLE};
use crate::core::mapping::CustomMapping;
use crate::core::types::{CountType, FormatId};
use crate::matching::engine::{resolve_columns, validate_if_ready, ValidationOptions};
use crate::matching::gate::{evaluate, options_from_args};
use crate::matching::resolver::normalize_headers;
use crate::rules::{all_rules, rule_for, HeaderMatching, RULES_VERSION};
use crate::utils::validation::{validate_header_list, ValidationError};

/// Request limits
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024; // 2MB
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_CONCURRENT_REQUESTS: usize = 100;
pub const RATE_LIMIT_PER_SECOND: u64 = 10;
pub const RATE_LIMIT_BURST: u32 = 50;

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatsQuery {
    primary_count: Option<CountType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest {
    format: Option<FormatId>,
    headers: Option<Vec<String>>,
    #[serde(default)]
    primary_count: CountType,
    #[serde(default)]
    custom_mapping: CustomMapping,
}

#[derive(Deserialize)]
struct GateRequest {
    args: ImportArgs,
    headers: Option<Vec<String>>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and request limits configured.
///
/// Rate limiting needs the peer address and is added by the server on top of
/// this router.
pub fn create_router() -> Router {
    Router::new()
        .route("/api/formats", get(formats_handler))
        .route("/api/validate", post(validate_handler))
        .route("/api/gate", post(gate_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("cache-control"),
                    HeaderValue::from_static("no-store"),
                ))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(REQUEST_TIMEOUT_SECS),
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    // IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(RATE_LIMIT_PER_SECOND)
        .burst_size(RATE_LIMIT_BURST)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    let app = create_router().layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    info!("Starting vdj-import API at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn error_response(status: StatusCode, error: ErrorResponse) -> Response {
    (status, Json(error)).into_response()
}

fn rejection_response(rejection: &JsonRejection) -> Response {
    debug!("Rejected request body: {}", rejection.body_text());
    error_response(
        rejection.status(),
        create_safe_error_response("invalid_request", &rejection.body_text(), None),
    )
}

/// Apply header limits to the columns the format will actually match.
///
/// Normalized formats split comma-joined entries first, so a whole header row
/// sent as one string is bounded per column rather than as a single name.
fn check_header_limits(format: Option<FormatId>, headers: &[String]) -> Result<(), ValidationError> {
    match format.map(|f| rule_for(f).matching) {
        Some(HeaderMatching::Normalized) => {
            let pieces: Vec<String> = normalize_headers(headers, HeaderMatching::Normalized)
                .into_iter()
                .map(|h| h.raw)
                .collect();
            validate_header_list(&pieces)
        }
        _ => validate_header_list(headers),
    }
}

fn header_limit_response(error: &ValidationError) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        create_safe_error_response("header_limit", &error.to_string(), None),
    )
}

/// List every format with its required columns
async fn formats_handler(Query(query): Query<FormatsQuery>) -> Json<serde_json::Value> {
    let primary_count = query.primary_count.unwrap_or_default();
    let formats: Vec<serde_json::Value> = all_rules()
        .map(|rule| rule_to_json(rule, primary_count, true))
        .collect();

    Json(serde_json::json!({
        "rulesVersion": RULES_VERSION,
        "count": formats.len(),
        "formats": formats,
    }))
}

/// Validate a header list against one format
async fn validate_handler(payload: Result<Json<ValidateRequest>, JsonRejection>) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(&rejection),
    };

    if let Some(headers) = &request.headers {
        if let Err(e) = check_header_limits(request.format, headers) {
            return header_limit_response(&e);
        }
    }

    let options = ValidationOptions {
        primary_count: request.primary_count,
        custom_mapping: request.custom_mapping,
    };
    let headers = request.headers.as_deref();
    let result = validate_if_ready(request.format, headers, &options);
    let columns = request
        .format
        .zip(headers)
        .map(|(format, h)| resolve_columns(format, h, &options));

    Json(serde_json::json!({
        "evaluated": result.is_some(),
        "result": result,
        "columns": columns,
        "rulesVersion": RULES_VERSION,
    }))
    .into_response()
}

/// Run the import gate on arguments and optional headers
async fn gate_handler(payload: Result<Json<GateRequest>, JsonRejection>) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(&rejection),
    };

    if let Some(headers) = &request.headers {
        if let Err(e) = check_header_limits(request.args.format, headers) {
            return header_limit_response(&e);
        }
    }

    let headers = request.headers.as_deref();
    let state = evaluate(&request.args, headers);
    let columns = match (request.args.format, headers) {
        (Some(format), Some(h)) if state.problems().is_empty() => {
            Some(resolve_columns(format, h, &options_from_args(&request.args)))
        }
        _ => None,
    };

    Json(serde_json::json!({
        "state": state.as_str(),
        "canRun": state.can_run(),
        "argsValid": state.problems().is_empty(),
        "problems": state.problems(),
        "result": state.result(),
        "columns": columns,
        "title": DEFAULT_TITLE,
        "blockLabel": request.args.block_label(),
        "rulesVersion": RULES_VERSION,
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_error_response_hides_details() {
        let response =
            create_safe_error_response("header_limit", "Too many columns", Some("internal"));
        assert_eq!(response.error, "Too many columns");
        assert_eq!(response.error_type, "header_limit");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_validate_request_defaults() {
        let request: ValidateRequest = serde_json::from_str(r#"{"format": "airr"}"#).unwrap();
        assert_eq!(request.format, Some(FormatId::Airr));
        assert!(request.headers.is_none());
        assert_eq!(request.primary_count, CountType::Read);
        assert_eq!(request.custom_mapping, CustomMapping::default());
    }

    #[test]
    fn test_header_limits_follow_matching_policy() {
        let columns: Vec<String> = (0..100).map(|i| format!("column_{i:04}")).collect();
        let joined = vec![columns.join(",")];
        assert!(joined[0].len() > 1024);

        assert!(check_header_limits(Some(FormatId::Airr), &joined).is_ok());
        assert_eq!(
            check_header_limits(Some(FormatId::CellRanger), &joined),
            Err(ValidationError::HeaderNameTooLong)
        );
        assert_eq!(
            check_header_limits(None, &joined),
            Err(ValidationError::HeaderNameTooLong)
        );

        let too_many = vec![vec!["c"; 10_001].join(",")];
        assert_eq!(
            check_header_limits(Some(FormatId::AirrSc), &too_many),
            Err(ValidationError::TooManyColumns(10_001))
        );
    }

    #[test]
    fn test_gate_request_defaults_chains() {
        let request: GateRequest =
            serde_json::from_str(r#"{"args": {"datasetRef": "a.csv", "format": "mixcr"}}"#)
                .unwrap();
        assert_eq!(request.args.chains.len(), 6);
        assert!(request.headers.is_none());
    }
}
