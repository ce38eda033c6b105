//! `/submit`: echoes the `name` and `email` body fields for any method.

use axum::extract::State;
use axum::http::StatusCode;

use crate::config::ErrorPolicy;
use crate::error::ParamError;
use crate::params::{FormError, FormParams};

pub async fn submit(
    State(policy): State<ErrorPolicy>,
    params: Result<FormParams, FormError>,
) -> Result<String, ParamError> {
    let post_form = match params {
        Ok(params) => params.post_form,
        // Legacy mode reports a bad form inline with a 200.
        Err(err @ (FormError::InvalidEscape { .. } | FormError::Decode(_)))
            if policy == ErrorPolicy::Legacy =>
        {
            tracing::warn!(error = %err, "reporting form error inline");
            return Ok(format!("form parse error: {err}"));
        }
        Err(err) => {
            return Err(policy.malformed_form(err, StatusCode::BAD_REQUEST, "Malformed form body"));
        }
    };

    let (name, email) = (post_form.get("name"), post_form.get("email"));
    tracing::debug!(name, email, "received contact");
    Ok(format!("Name = {name}\nEmail = {email}\n"))
}
