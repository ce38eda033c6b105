//! `/post`: echoes `param1` and `param2` from a POSTed form.

use axum::extract::State;
use axum::http::{Method, StatusCode};

use crate::config::ErrorPolicy;
use crate::error::ParamError;
use crate::params::{FormError, FormParams};

pub const METHOD_MESSAGE: &str = "Method not allowed";
const PARSE_MESSAGE: &str = "Error parsing form";

pub async fn submit(
    method: Method,
    State(policy): State<ErrorPolicy>,
    params: Result<FormParams, FormError>,
) -> Result<String, ParamError> {
    if method != Method::POST {
        return Err(ParamError::MethodNotAllowed(METHOD_MESSAGE));
    }
    let form = params
        .map_err(|err| policy.malformed_form(err, StatusCode::INTERNAL_SERVER_ERROR, PARSE_MESSAGE))?
        .form;

    let (param1, param2) = (form.get("param1"), form.get("param2"));
    tracing::debug!(param1, param2, "received form parameters");
    Ok(format!(
        "Received parameters:\nparam1: {param1}\nparam2: {param2}\n"
    ))
}
