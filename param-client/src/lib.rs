//! Synchronous client core for the parameter-echo servers.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip.
//!
//! # Design
//! - `ParamsClient` is stateless; it holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and
//!   `parse_*` (consumes response).
//! - DTOs are defined independently from the server crate; the
//!   integration tests catch drift in the text layouts.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::ParamsClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Ack, Contact, FormEcho, JsonParams, ParamEntry};
