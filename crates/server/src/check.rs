//! The check endpoint the gateway calls once per proxied request.

use std::sync::Arc;

use auth::ValidateToken;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use context::{UserIdentity, ValidationStatus};
use serde::Serialize;

pub(crate) struct AppState<V> {
    validator: Arc<V>,
}

impl<V> AppState<V> {
    pub(crate) fn new(validator: V) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}

impl<V> Clone for AppState<V> {
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
        }
    }
}

#[derive(Serialize)]
struct CheckResponse {
    status: ValidationStatus,
    /// Null when introspection succeeded but the response had no
    /// recognizable identity shape.
    identity: Option<UserIdentity>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Validates the `Authorization` header and reports the outcome.
///
/// The header value is forwarded to the validator verbatim; the gateway is
/// responsible for sending it in the exact form the OAuth server expects.
/// Diagnostic messages stay in the logs, response bodies carry only the
/// classification.
pub(crate) async fn check<V: ValidateToken>(State(state): State<AppState<V>>, headers: HeaderMap) -> Response {
    let Some(token) = headers.get(header::AUTHORIZATION).and_then(|value| value.to_str().ok()) else {
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    };

    let outcome = state.validator.validate(token).await;

    if let Some(message) = outcome.message() {
        log::warn!("token validation failed: {message}");
    }

    match outcome.status() {
        ValidationStatus::Success => {
            let body = CheckResponse {
                status: ValidationStatus::Success,
                identity: outcome.into_identity(),
            };

            (StatusCode::OK, Json(body)).into_response()
        }
        ValidationStatus::TokenExpiredOrInvalid => error_response(StatusCode::UNAUTHORIZED, "Unauthorized"),
        ValidationStatus::PermissionFailedDetailFetch => error_response(StatusCode::FORBIDDEN, "Forbidden"),
        ValidationStatus::InternalError => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

fn error_response(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}
