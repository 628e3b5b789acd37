//! API Error Types
//!
//! Every failure leaves the API as an RFC 7807 problem document served
//! with `application/problem+json`.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::core::properties::ExtractError;
use crate::core::query::QueryError;

/// Content type of problem documents.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Methods every endpoint answers.
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// RFC 7807 problem document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub title: String,
    pub status: u16,
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    #[error("property {0:?} not found")]
    PropertyNotFound(String),

    #[error("endpoint not found")]
    EndpointNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("none of the requested media types are supported: {0}")]
    NotAcceptable(String),

    #[error(transparent)]
    Extraction(#[from] ExtractError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::PropertyNotFound(_) | Self::EndpointNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            Self::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The document sent to the client. Extraction details stay in the logs.
    pub fn problem(&self) -> Problem {
        let (title, detail) = match self {
            Self::InvalidQuery(e) => ("Invalid query", e.to_string()),
            Self::PropertyNotFound(name) => (
                "Property not found",
                format!("Could not find property with name {name:?}"),
            ),
            Self::EndpointNotFound => (
                "Endpoint invalid or missing",
                "Endpoint requested does not exist or URL is invalid".to_string(),
            ),
            Self::MethodNotAllowed => (
                "Method not allowed",
                "Endpoint does not support request method".to_string(),
            ),
            Self::NotAcceptable(_) => (
                "Unaccepted type",
                "API does not support the MIME-types requested".to_string(),
            ),
            Self::Extraction(_) => (
                "Server error",
                "Something wrong occurred on the server".to_string(),
            ),
        };
        Problem {
            title: title.to_string(),
            status: self.status().as_u16(),
            detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Extraction(e) => tracing::error!(error = %e, "Extraction failed"),
            other => tracing::debug!(error = %other, "Request rejected"),
        }

        let mut response = (self.status(), Json(self.problem())).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        if matches!(self, Self::MethodNotAllowed) {
            headers.insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
