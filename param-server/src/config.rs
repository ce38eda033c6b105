//! Startup configuration read from the environment.
//!
//! # Design
//! Values are read once in `serve` and never change afterwards. Only the
//! `ErrorPolicy` reaches the handlers, as immutable router state.

use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use axum::http::StatusCode;
use thiserror::Error;

use crate::error::ParamError;
use crate::params::FormError;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),

    #[error("unknown ERROR_POLICY {0:?}, expected \"legacy\" or \"unified\"")]
    UnknownPolicy(String),
}

/// How handlers report a malformed form body.
///
/// `Legacy` keeps each endpoint's historical status (500 for the POST-only
/// form endpoints, an inline 200 message for `/submit`). `Unified` answers
/// 400 everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    #[default]
    Legacy,
    Unified,
}

impl ErrorPolicy {
    /// Map a form rejection to the error the endpoint reports under this
    /// policy. `legacy_status` and `legacy_message` are the endpoint's own
    /// answer in legacy mode.
    pub fn malformed_form(
        self,
        err: FormError,
        legacy_status: StatusCode,
        legacy_message: &'static str,
    ) -> ParamError {
        match (self, err) {
            (_, FormError::Body(rejection)) => ParamError::Body(rejection),
            (ErrorPolicy::Legacy, _) => ParamError::MalformedForm {
                status: legacy_status,
                message: legacy_message.to_string(),
            },
            (ErrorPolicy::Unified, err) => ParamError::MalformedForm {
                status: StatusCode::BAD_REQUEST,
                message: format!("Malformed form body: {err}"),
            },
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(ErrorPolicy::Legacy),
            "unified" => Ok(ErrorPolicy::Unified),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub error_policy: ErrorPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let error_policy = match lookup("ERROR_POLICY") {
            Some(raw) => raw.parse()?,
            None => ErrorPolicy::default(),
        };
        Ok(Config {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            error_policy,
        })
    }
}
