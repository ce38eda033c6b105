//! Request and response DTOs for the parameter-echo endpoints.

use serde::{Deserialize, Serialize};

/// Body of a `/post-endpoint` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonParams {
    pub param1: String,
    pub param2: i64,
}

/// JSON acknowledgement returned by `/post-endpoint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub status: String,
}

impl Ack {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// The two values echoed by `/post`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormEcho {
    pub param1: String,
    pub param2: String,
}

/// One line of the listing endpoint's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamEntry {
    pub key: String,
    pub values: Vec<String>,
}

/// The two fields echoed by `/submit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
}
