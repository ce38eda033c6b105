//! Handler errors and their plain-text responses.

use axum::extract::rejection::BytesRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ParamError {
    /// The endpoint only serves POST. Carries the endpoint's message.
    #[error("{0}")]
    MethodNotAllowed(&'static str),

    #[error("{message}")]
    MalformedForm { status: StatusCode, message: String },

    #[error("Bad Request")]
    MalformedJson(#[source] serde_json::Error),

    #[error("This endpoint requires at least one form parameter")]
    NoParameters,

    #[error(transparent)]
    Body(BytesRejection),
}

impl ParamError {
    pub fn status(&self) -> StatusCode {
        match self {
            ParamError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ParamError::MalformedForm { status, .. } => *status,
            ParamError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            ParamError::NoParameters => StatusCode::NOT_ACCEPTABLE,
            ParamError::Body(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        if let ParamError::Body(rejection) = self {
            return rejection.into_response();
        }

        let status = self.status();
        tracing::warn!(%status, error = %self, "rejecting request");
        let mut response = (
            status,
            [(header::X_CONTENT_TYPE_OPTIONS, "nosniff")],
            format!("{self}\n"),
        )
            .into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

/// Startup failures returned from each binary's `main`.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
