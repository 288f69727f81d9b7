//! HTTP routes for the quote endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::AppState;

use super::requests::QuoteForm;
use super::responses::{QuoteResponse, QuoteSubmissionResponse};
use super::services;

pub const QUOTE_PATH: &str = "/api/calculate-quote";

/// Carries the quote reference so it can be matched with the emails
pub const QUOTE_REFERENCE_HEADER: &str = "x-quote-reference";

/// Create the quote router
pub fn router() -> Router<AppState> {
    Router::new().route(
        QUOTE_PATH,
        post(calculate_quote)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

/// Quote form submission
async fn calculate_quote(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let form = QuoteForm::decode(content_type, &body)?;

    let outcome =
        services::process_quote(state.mailer.as_ref(), &state.config.mail, form).await?;

    let reference = HeaderValue::from_str(&outcome.reference.to_string())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let body = QuoteSubmissionResponse {
        success: true,
        message: outcome.message.to_string(),
        quote: QuoteResponse::from(&outcome.quote),
    };

    Ok(([(QUOTE_REFERENCE_HEADER, reference)], Json(body)).into_response())
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
