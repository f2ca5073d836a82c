use std::process::{ExitCode, Termination};

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use serde::Serialize;
use time::OffsetDateTime;

use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Field messages collected while validating one request.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// `Ok(value)` when nothing was pushed.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

#[derive(Debug)]
pub enum ErrorStatus {
    Kernel(Report<KernelError>),
    Validation(ValidationErrors),
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus::Kernel(e)
    }
}

impl From<ValidationErrors> for ErrorStatus {
    fn from(e: ValidationErrors) -> Self {
        ErrorStatus::Validation(e)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ErrorDetails {
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    messages: Vec<String>,
    details: String,
}

impl ErrorDetails {
    fn new(messages: Vec<String>, details: impl Into<String>) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            messages,
            details: details.into(),
        }
    }

    fn described(self, details: String) -> Self {
        Self { details, ..self }
    }
}

impl ErrorStatus {
    fn status_code(&self) -> StatusCode {
        match self {
            ErrorStatus::Validation(_) => StatusCode::BAD_REQUEST,
            ErrorStatus::Kernel(report) => match report.current_context() {
                KernelError::Conflict(_) | KernelError::Concurrency => StatusCode::CONFLICT,
                KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
                KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ErrorStatus::Validation(errors) => {
                ErrorDetails::new(errors.messages().to_vec(), "Request validation failed")
            }
            ErrorStatus::Kernel(report) => {
                let context = *report.current_context();
                match context {
                    KernelError::Conflict(reason) => {
                        tracing::debug!("Rejected request: {reason}");
                        ErrorDetails::new(vec![reason.to_string()], "Conflict")
                    }
                    KernelError::Concurrency => {
                        tracing::warn!("Lost a storage race: {report:?}");
                        ErrorDetails::new(vec![context.to_string()], "Retry the request")
                    }
                    KernelError::Timeout | KernelError::Internal => {
                        tracing::error!("{report:?}");
                        ErrorDetails::new(vec![context.to_string()], "Server error")
                    }
                }
            }
        };
        let mut response = (status, Json(&body)).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Replaces the `details` of an error body with the path of the request
/// that produced it, in the form `uri=/book/add`.
pub async fn describe_request(request: Request, next: Next) -> Response {
    let description = format!("uri={}", request.uri().path());
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<ErrorDetails>() {
        Some(details) => (response.status(), Json(details.described(description))).into_response(),
        None => response,
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{middleware, Router};
    use error_stack::Report;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use kernel::{ConflictReason, KernelError};

    use super::{describe_request, ErrorDetails, ErrorStatus, ValidationErrors};

    fn status(error: KernelError) -> StatusCode {
        ErrorStatus::from(Report::new(error))
            .into_response()
            .status()
    }

    #[test]
    fn kernel_errors_map_to_status_codes() {
        assert_eq!(
            status(KernelError::Conflict(ConflictReason::AlreadyBorrowed)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(KernelError::Conflict(ConflictReason::BookCopyNotFound)),
            StatusCode::CONFLICT
        );
        assert_eq!(status(KernelError::Concurrency), StatusCode::CONFLICT);
        assert_eq!(status(KernelError::Timeout), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            status(KernelError::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_is_bad_request() {
        let mut errors = ValidationErrors::default();
        errors.push("Title of the book is mandatory");
        let response = ErrorStatus::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    async fn details_of(router: Router, uri: &str) -> (StatusCode, Option<Value>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router
            .layer(middleware::from_fn(describe_request))
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice::<Value>(&bytes).ok())
    }

    #[tokio::test]
    async fn error_details_name_the_request_path() {
        let router = Router::new().route(
            "/book/borrow",
            get(|| async {
                ErrorStatus::from(Report::new(KernelError::Conflict(
                    ConflictReason::AlreadyBorrowed,
                )))
            }),
        );
        let (status, body) = details_of(router, "/book/borrow?bookId=1").await;
        let body = body.unwrap();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["messages"], json!(["Book is already borrowed by someone"]));
        assert_eq!(body["details"], json!("uri=/book/borrow"));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn successful_responses_pass_through() {
        let router = Router::new().route("/book/", get(|| async { "ok" }));
        let (status, body) = details_of(router, "/book/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, None);
    }

    #[test]
    fn unlayered_errors_keep_their_label() {
        let mut errors = ValidationErrors::default();
        errors.push("bad");
        let response = ErrorStatus::from(errors).into_response();
        let details = response.extensions().get::<ErrorDetails>().unwrap();
        assert_eq!(details.details, "Request validation failed");
        assert_eq!(details.messages, vec!["bad".to_string()]);
    }

    #[test]
    fn empty_errors_finish_ok() {
        assert_eq!(ValidationErrors::default().finish(1), Ok(1));
        let mut errors = ValidationErrors::default();
        errors.push("bad");
        assert_eq!(errors.clone().finish(1), Err(errors));
    }
}
