//! URL-encoded parameter extraction.
//!
//! # Design
//! `FormParams` is an axum extractor that collects parameters the way a
//! classic form parser does: the body is consulted only for POST, PUT and
//! PATCH requests sent as `application/x-www-form-urlencoded`, and query
//! string values are appended after the body values of the same key.
//! Other content types are not an error, they simply contribute nothing.
//!
//! Escapes are checked before decoding because `serde_urlencoded` passes an
//! invalid `%` sequence through verbatim instead of rejecting it.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid percent escape at byte {offset}")]
    InvalidEscape { offset: usize },

    #[error("form decode failed: {0}")]
    Decode(#[from] serde_urlencoded::de::Error),

    #[error(transparent)]
    Body(#[from] BytesRejection),
}

/// Used when `FormParams` is extracted directly rather than as a `Result`.
impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        if let FormError::Body(rejection) = self {
            return rejection.into_response();
        }
        (
            StatusCode::BAD_REQUEST,
            [(header::X_CONTENT_TYPE_OPTIONS, "nosniff")],
            format!("Malformed form body: {self}\n"),
        )
            .into_response()
    }
}

/// Ordered multimap of parameter names to values.
///
/// Keys keep the order in which they were first seen; each key's values
/// keep submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    /// First value for `key`, or `""` when the key was not submitted.
    pub fn get(&self, key: &str) -> &str {
        self.values(key)
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode a raw `key=value&key=value` string.
    pub fn parse(raw: &[u8]) -> Result<Self, FormError> {
        check_escapes(raw)?;
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw)?;
        Ok(pairs.into_iter().collect())
    }

    fn extend_from(&mut self, other: &ParamSet) {
        for (key, values) in &other.entries {
            for value in values {
                self.push(key.clone(), value.clone());
            }
        }
    }
}

impl FromIterator<(String, String)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = ParamSet::new();
        for (key, value) in iter {
            set.push(key, value);
        }
        set
    }
}

/// Every `%` must introduce two hex digits.
fn check_escapes(raw: &[u8]) -> Result<(), FormError> {
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' {
            let valid = raw
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(FormError::InvalidEscape { offset: i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn is_form_urlencoded(content_type: Option<&header::HeaderValue>) -> bool {
    content_type
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

/// Parameters of one request.
#[derive(Debug, Clone, Default)]
pub struct FormParams {
    /// Body parameters followed by query-string parameters.
    pub form: ParamSet,
    /// Body parameters only.
    pub post_form: ParamSet,
}

impl<S> FromRequest<S> for FormParams
where
    S: Send + Sync,
{
    type Rejection = FormError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = ParamSet::parse(req.uri().query().unwrap_or("").as_bytes())?;
        let reads_body = matches!(*req.method(), Method::POST | Method::PUT | Method::PATCH)
            && is_form_urlencoded(req.headers().get(header::CONTENT_TYPE));

        let post_form = if reads_body {
            let body = Bytes::from_request(req, state).await?;
            ParamSet::parse(&body)?
        } else {
            ParamSet::new()
        };

        let mut form = post_form.clone();
        form.extend_from(&query);
        Ok(FormParams { form, post_form })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn parse_groups_repeated_keys_in_first_seen_order() {
        let set = ParamSet::parse(b"b=1&a=2&b=3").unwrap();
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].0, "b");
        assert_eq!(collected[0].1, ["1", "3"]);
        assert_eq!(collected[1].0, "a");
    }

    #[test]
    fn parse_decodes_plus_and_escapes() {
        let set = ParamSet::parse(b"greeting=hello+there&mail=a%40b.c").unwrap();
        assert_eq!(set.get("greeting"), "hello there");
        assert_eq!(set.get("mail"), "a@b.c");
    }

    #[test]
    fn many_distinct_keys_parse_quickly() {
        let raw: String = (0..100_000).map(|i| format!("k{i}=&")).collect();
        let started = std::time::Instant::now();
        let set = ParamSet::parse(raw.as_bytes()).unwrap();
        assert_eq!(set.len(), 100_000);
        assert_eq!(set.iter().nth(99_999).unwrap().0, "k99999");
        assert!(
            started.elapsed() < std::time::Duration::from_secs(5),
            "took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn get_missing_key_is_empty() {
        let set = ParamSet::parse(b"").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.get("param1"), "");
    }

    #[test]
    fn truncated_escape_is_rejected() {
        assert!(matches!(
            ParamSet::parse(b"a=1&b=%4"),
            Err(FormError::InvalidEscape { offset: 6 })
        ));
        assert!(matches!(
            ParamSet::parse(b"a=%zz"),
            Err(FormError::InvalidEscape { offset: 2 })
        ));
    }

    #[test]
    fn content_type_match_ignores_case_and_parameters() {
        let value = header::HeaderValue::from_static("Application/X-WWW-Form-Urlencoded; charset=utf-8");
        assert!(is_form_urlencoded(Some(&value)));
        let json = header::HeaderValue::from_static("application/json");
        assert!(!is_form_urlencoded(Some(&json)));
        assert!(!is_form_urlencoded(None));
    }

    #[tokio::test]
    async fn body_values_precede_query_values() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/post?k=query&q=1")
            .header(header::CONTENT_TYPE, FORM_URLENCODED)
            .body(Body::from("k=body"))
            .unwrap();
        let params = FormParams::from_request(req, &()).await.unwrap();
        assert_eq!(params.form.values("k").unwrap(), ["body", "query"]);
        assert_eq!(params.form.get("q"), "1");
        assert_eq!(params.post_form.len(), 1);
        assert_eq!(params.post_form.get("q"), "");
    }

    #[tokio::test]
    async fn get_request_body_is_ignored() {
        let req = Request::builder()
            .method(Method::GET)
            .uri("/submit")
            .header(header::CONTENT_TYPE, FORM_URLENCODED)
            .body(Body::from("name=John"))
            .unwrap();
        let params = FormParams::from_request(req, &()).await.unwrap();
        assert!(params.post_form.is_empty());
    }

    #[tokio::test]
    async fn non_form_content_type_contributes_nothing() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("a=%zz"))
            .unwrap();
        let params = FormParams::from_request(req, &()).await.unwrap();
        assert!(params.form.is_empty());
    }
}
