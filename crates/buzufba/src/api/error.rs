//! API error types and the failure-to-response classifier
//!
//! Every failed request ends up as an [`AppError`]. [`classify`] is the only
//! place that decides the status code and body sent back for it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use buzufba_api::ErrorResponse;
use buzufba_core::{BadRequestError, CoreError, NotFoundError, ValidationError};
use thiserror::Error;
use tracing::{debug, error};

/// Message of every validation failure body
pub const VALIDATION_MESSAGE: &str = "Error during validation";

/// Message of every unclassified failure body
pub const INTERNAL_MESSAGE: &str = "Internal Server Error!";

/// A failed request, by kind
#[derive(Error, Debug)]
pub enum AppError {
    /// Inbound data failed its schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A business rule rejected the request
    #[error(transparent)]
    BadRequest(#[from] BadRequestError),

    /// The requested resource does not exist
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Anything else. Never shown to the caller.
    #[error("unclassified failure: {0}")]
    Unclassified(eyre::Report),
}

impl AppError {
    /// Wrap an unexpected error
    pub fn unclassified<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unclassified(eyre::Report::new(error))
    }
}

impl From<CoreError> for AppError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::BadRequest(e) => Self::BadRequest(e),
            CoreError::NotFound(e) => Self::NotFound(e),
            CoreError::Storage(e) => Self::unclassified(e),
        }
    }
}

impl From<eyre::Report> for AppError {
    fn from(report: eyre::Report) -> Self {
        Self::Unclassified(report)
    }
}

/// Map a failure to its status code and body
pub fn classify(error: &AppError) -> (StatusCode, ErrorResponse) {
    match error {
        AppError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::with_errors(VALIDATION_MESSAGE, e.errors().clone()),
        ),
        AppError::BadRequest(e) => (StatusCode::BAD_REQUEST, ErrorResponse::message(e.message())),
        AppError::NotFound(e) => (StatusCode::NOT_FOUND, ErrorResponse::message(e.message())),
        AppError::Unclassified(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::message(INTERNAL_MESSAGE),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = classify(&self);
        match &self {
            AppError::Unclassified(report) => error!(error = ?report, "request failed"),
            other => debug!(status = status.as_u16(), error = %other, "request rejected"),
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use buzufba_api::FieldErrors;
    use buzufba_db::DbError;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn validation(pairs: &[(&str, &str)]) -> AppError {
        let errors: FieldErrors = pairs.iter().copied().collect();
        ValidationError::new(errors).into()
    }

    async fn render(error: AppError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[rstest]
    #[case::validation(
        validation(&[("routeId", "Expected number, received string")]),
        400,
        json!({
            "message": "Error during validation",
            "errors": { "routeId": ["Expected number, received string"] }
        })
    )]
    #[case::not_found(
        NotFoundError::new("Route not found").into(),
        404,
        json!({ "message": "Route not found" })
    )]
    #[case::bad_request(
        BadRequestError::new("Trip length must be positive").into(),
        400,
        json!({ "message": "Trip length must be positive" })
    )]
    #[case::unclassified(
        eyre::eyre!("connection refused").into(),
        500,
        json!({ "message": "Internal Server Error!" })
    )]
    fn test_classify(#[case] error: AppError, #[case] status: u16, #[case] body: Value) {
        let (actual_status, actual_body) = classify(&error);
        assert_eq!(actual_status.as_u16(), status);
        assert_eq!(serde_json::to_value(actual_body).unwrap(), body);
    }

    #[test]
    fn test_validation_keeps_every_message() {
        let error = validation(&[
            ("routeId", "Expected integer, received float"),
            ("routeId", "Number must be greater than 0"),
            ("statusCd", "Required"),
        ]);

        let (status, body) = classify(&error);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let errors = body.errors.unwrap();
        assert_eq!(
            errors.get("routeId").unwrap(),
            [
                "Expected integer, received float",
                "Number must be greater than 0"
            ]
        );
        assert_eq!(errors.get("statusCd").unwrap(), ["Required"]);
    }

    #[test]
    fn test_non_validation_bodies_have_no_errors_field() {
        for error in [
            AppError::from(BadRequestError::new("nope")),
            AppError::from(NotFoundError::new("gone")),
            AppError::from(eyre::eyre!("boom")),
        ] {
            assert!(classify(&error).1.errors.is_none());
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let errors = [
            validation(&[("routeId", "Required")]),
            BadRequestError::new("bad").into(),
            NotFoundError::new("missing").into(),
            AppError::unclassified(DbError::Unavailable("pool is closed".to_string())),
        ];

        for error in &errors {
            assert_eq!(classify(error), classify(error));
        }
    }

    #[test]
    fn test_storage_errors_are_unclassified() {
        let error: AppError = CoreError::Storage(DbError::Unavailable("down".to_string())).into();
        assert!(matches!(error, AppError::Unclassified(_)));

        let error: AppError = CoreError::NotFound(NotFoundError::new("Route not found")).into();
        assert!(matches!(error, AppError::NotFound(_)));

        let error: AppError = CoreError::BadRequest(BadRequestError::new("no")).into();
        assert!(matches!(error, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unclassified_response_hides_details() {
        let error = AppError::unclassified(DbError::Unavailable("connection refused".to_string()));
        let (status, body) = render(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"message":"Internal Server Error!"}"#);
        assert!(!body.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_validation_response_body() {
        let (status, body) = render(validation(&[("routeId", "Expected number, received string")])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            r#"{"message":"Error during validation","errors":{"routeId":["Expected number, received string"]}}"#
        );
    }
}
