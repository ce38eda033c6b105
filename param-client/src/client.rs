//! Stateless request builder and response parser for the echo endpoints.
//!
//! # Design
//! `ParamsClient` holds only a `base_url`. Each endpoint has a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The text endpoints are parsed back into
//! typed values from their line layouts.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Ack, Contact, FormEcho, JsonParams, ParamEntry};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct ParamsClient {
    base_url: String,
}

impl ParamsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_form_echo(&self, param1: &str, param2: &str) -> Result<HttpRequest, ApiError> {
        check_single_line(&[param1, param2])?;
        self.form_post("/post", &[("param1", param1), ("param2", param2)])
    }

    pub fn build_json_params(&self, input: &JsonParams) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/post-endpoint", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Keys may not contain `" = "` and nothing may contain a line break.
    pub fn build_listing(&self, params: &[(&str, &str)]) -> Result<HttpRequest, ApiError> {
        for (key, value) in params {
            check_single_line(&[*key, *value])?;
            if key.contains(" = ") {
                return Err(ApiError::AmbiguousInput(key.to_string()));
            }
        }
        self.form_post("/", params)
    }

    pub fn build_contact(&self, name: &str, email: &str) -> Result<HttpRequest, ApiError> {
        check_single_line(&[name, email])?;
        self.form_post("/submit", &[("name", name), ("email", email)])
    }

    pub fn build_hello(&self, method: HttpMethod) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}/", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Assumes neither value contains a line break; `build_form_echo`
    /// refuses such values.
    pub fn parse_form_echo(&self, response: HttpResponse) -> Result<FormEcho, ApiError> {
        check_status(&response)?;
        let (param1, param2) = response
            .body
            .strip_prefix("Received parameters:\nparam1: ")
            .and_then(|rest| rest.strip_suffix('\n'))
            .and_then(|rest| rest.split_once("\nparam2: "))
            .ok_or_else(|| ApiError::UnexpectedBody(response.body.clone()))?;
        Ok(FormEcho {
            param1: param1.to_string(),
            param2: param2.to_string(),
        })
    }

    pub fn parse_json_params(&self, response: HttpResponse) -> Result<Ack, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Values are split on spaces, so a value that itself contains a space
    /// comes back as several values. Responses to requests not built by
    /// `build_listing` may also carry keys containing `" = "` or values with
    /// line breaks, which this parser misreads.
    pub fn parse_listing(&self, response: HttpResponse) -> Result<Vec<ParamEntry>, ApiError> {
        check_status(&response)?;
        response
            .body
            .lines()
            .map(|line| -> Result<ParamEntry, ApiError> {
                let (key, rest) = line
                    .split_once(" = ")
                    .ok_or_else(|| ApiError::UnexpectedBody(response.body.clone()))?;
                let joined = rest
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| ApiError::UnexpectedBody(response.body.clone()))?;
                Ok(ParamEntry {
                    key: key.to_string(),
                    values: joined.split(' ').map(str::to_string).collect(),
                })
            })
            .collect()
    }

    pub fn parse_contact(&self, response: HttpResponse) -> Result<Contact, ApiError> {
        check_status(&response)?;
        let (name, email) = response
            .body
            .strip_prefix("Name = ")
            .and_then(|rest| rest.strip_suffix('\n'))
            .and_then(|rest| rest.split_once("\nEmail = "))
            .ok_or_else(|| ApiError::UnexpectedBody(response.body.clone()))?;
        Ok(Contact {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn parse_hello(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(response.body)
    }

    fn form_post(&self, path: &str, params: &[(&str, &str)]) -> Result<HttpRequest, ApiError> {
        let body = serde_urlencoded::to_string(params).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), FORM_URLENCODED.to_string())],
            body: Some(body),
        })
    }
}

/// The text endpoints echo one value per line, so line breaks would make
/// the response unparseable.
fn check_single_line(values: &[&str]) -> Result<(), ApiError> {
    match values.iter().find(|value| value.contains(['\n', '\r'])) {
        Some(value) => Err(ApiError::AmbiguousInput(value.to_string())),
        None => Ok(()),
    }
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        405 => Err(ApiError::MethodNotAllowed(response.body.trim_end().to_string())),
        406 => Err(ApiError::NoParameters(response.body.trim_end().to_string())),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
