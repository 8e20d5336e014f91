use anyhow::Result;
use axum::response::{IntoResponse, Response};

/// A wrapper that wraps an anyhow::Result into an `IntoResponse` compatible struct.
///
/// Failures are reported to slack as a plain text `Error: ...` body with a 200 status, so that the
/// user who invoked the command gets to see what went wrong.
pub struct ResponseResult<T: IntoResponse> {
    result: Result<T>,
}

impl<T: IntoResponse> ResponseResult<T> {
    pub fn new(result: Result<T>) -> Self {
        Self { result }
    }
}

impl<T: IntoResponse> IntoResponse for ResponseResult<T> {
    fn into_response(self) -> Response {
        match self.result {
            Ok(value) => value.into_response(),
            Err(error) => {
                log::error!("Failed to handle request {:#}.", error);
                format!("Error: {}", error).into_response()
            }
        }
    }
}
