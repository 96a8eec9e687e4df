pub mod health;
pub mod index;
pub mod schedules;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::config::RunMode;
use crate::errors::ScheduleError;

/// Fixed user-facing message for failed schedule requests outside
/// development mode.
pub const QUERY_FAILED_MESSAGE: &str = "Error al obtener los horarios";

/// Body shared by every schedule endpoint: `{"horarios": [...]}`.
#[derive(Debug, Serialize)]
pub struct HorariosResponse<T: Serialize> {
    pub horarios: Vec<T>,
}

impl<T: Serialize> IntoResponse for HorariosResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Error body: always `{"error": ...}`. The message carries the failure
/// detail in development and a fixed phrase in production; the detail is
/// logged either way.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip)]
    detail: String,
}

impl ErrorResponse {
    pub fn from_error(err: ScheduleError, mode: RunMode) -> Self {
        let detail = err.to_string();
        let error = match mode {
            RunMode::Development => detail.clone(),
            RunMode::Production => QUERY_FAILED_MESSAGE.to_string(),
        };
        Self { error, detail }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.detail, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query_error() -> ScheduleError {
        ScheduleError::QueryFailed("Table 'horarios.horarioida' doesn't exist".to_string())
    }

    #[test]
    fn test_development_mode_exposes_the_detail() {
        let response = ErrorResponse::from_error(query_error(), RunMode::Development);
        assert!(response.error.contains("doesn't exist"));
    }

    #[test]
    fn test_production_mode_hides_the_detail() {
        let response = ErrorResponse::from_error(query_error(), RunMode::Production);
        assert_eq!(response.error, QUERY_FAILED_MESSAGE);
    }

    #[test]
    fn test_error_body_has_a_single_key() {
        let response = ErrorResponse::from_error(query_error(), RunMode::Production);
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body, json!({"error": QUERY_FAILED_MESSAGE}));
    }

    #[test]
    fn test_horarios_body_wraps_the_list() {
        let response = HorariosResponse {
            horarios: vec![json!({"num_tren": 1})],
        };
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body, json!({"horarios": [{"num_tren": 1}]}));
    }
}
