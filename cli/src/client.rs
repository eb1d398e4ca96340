//! Shared HTTP plumbing for the Jira and GitHub clients.

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Errors returned by the REST clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or undecodable body.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an unexpected status.
    #[error("{context} failed with HTTP {status}: {body}")]
    Status {
        context: String,
        status: StatusCode,
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Pass a response through if its status is a success, else turn it into
/// [`ApiError::Status`] carrying the response body.
pub async fn ensure_success(response: Response, context: &str) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(status_error(response, context).await)
}

/// Like [`ensure_success`], but only `expected` is accepted.
pub async fn ensure_status(
    response: Response,
    expected: StatusCode,
    context: &str,
) -> Result<Response, ApiError> {
    if response.status() == expected {
        return Ok(response);
    }
    Err(status_error(response, context).await)
}

async fn status_error(response: Response, context: &str) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::Status {
        context: context.to_string(),
        status,
        body,
    }
}
