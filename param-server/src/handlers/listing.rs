//! Catch-all endpoint that lists every submitted form parameter.

use axum::extract::State;
use axum::http::{Method, StatusCode};

use crate::config::ErrorPolicy;
use crate::error::ParamError;
use crate::params::{FormError, FormParams, ParamSet};

pub const METHOD_MESSAGE: &str = "This endpoint only accepts HTTP POST requests";
const PARSE_MESSAGE: &str = "An error occurred during parsing";

pub async fn list(
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
    if form.is_empty() {
        return Err(ParamError::NoParameters);
    }

    tracing::debug!(keys = form.len(), "listing form parameters");
    Ok(render(&form))
}

/// One `key = [v1 v2]` line per key.
fn render(form: &ParamSet) -> String {
    form.iter()
        .map(|(key, values)| format!("{key} = [{}]\n", values.join(" ")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_brackets_and_joins_values() {
        let form = ParamSet::parse(b"firstParam=hello&secondParam=world&firstParam=again").unwrap();
        assert_eq!(
            render(&form),
            "firstParam = [hello again]\nsecondParam = [world]\n"
        );
    }

    #[test]
    fn render_empty_value() {
        let form = ParamSet::parse(b"flag=").unwrap();
        assert_eq!(render(&form), "flag = []\n");
    }
}
