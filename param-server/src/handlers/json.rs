//! `/post-endpoint`: decodes a fixed two-field JSON record.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::Json;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParamError;

/// Missing or `null` fields decode to their zero value; unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonParams {
    #[serde(deserialize_with = "null_as_default")]
    pub param1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub param2: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode the first JSON value in `body`. Anything after it is ignored and a
/// `null` document yields the zero record.
pub fn decode(body: &[u8]) -> Result<JsonParams, serde_json::Error> {
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<JsonParams>>();
    match values.next() {
        Some(value) => Ok(value?.unwrap_or_default()),
        None => Err(serde_json::Error::custom("EOF while parsing a value")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub status: String,
}

impl Ack {
    pub fn success() -> Self {
        Ack {
            status: "success".to_string(),
        }
    }
}

pub async fn receive(body: Result<Bytes, BytesRejection>) -> Result<Json<Ack>, ParamError> {
    let body = body.map_err(ParamError::Body)?;
    let params = decode(&body).map_err(ParamError::MalformedJson)?;
    tracing::info!(param1 = %params.param1, param2 = params.param2, "received parameters");
    Ok(Json(Ack::success()))
}
