//! Minimal parameter-echo HTTP servers.
//!
//! # Overview
//! Five independent programs share this crate. Each binary picks one
//! `Variant`, and `app` builds the single-endpoint router for it:
//!
//! | Variant | Path | Behavior |
//! |---|---|---|
//! | `Form` | `/post` | POST only, echoes `param1` and `param2` |
//! | `Json` | `/post-endpoint` | decodes `{param1, param2}`, answers `{"status":"success"}` |
//! | `Listing` | any | POST only, lists every form parameter |
//! | `Contact` | `/submit` | echoes `name` and `email` for any method |
//! | `Hello` | any | `Hello, World!` |
//!
//! # Design
//! Handlers are plain async functions with no shared mutable state. The
//! only router state is the immutable `ErrorPolicy` chosen at startup.
//! Every handler checks the method first, then the body format, then
//! required parameters.

pub mod config;
pub mod error;
pub mod handlers;
pub mod params;

use axum::routing::{any, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

pub use config::{Config, ConfigError, ErrorPolicy};
pub use error::{ParamError, ServerError};
pub use handlers::json::{Ack, JsonParams};
pub use params::{FormError, FormParams, ParamSet};

use handlers::{contact, form, hello, json, listing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Form,
    Json,
    Listing,
    Contact,
    Hello,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Form => "form-echo",
            Variant::Json => "json-echo",
            Variant::Listing => "form-listing",
            Variant::Contact => "contact-echo",
            Variant::Hello => "hello-world",
        }
    }

    /// The path the variant is mounted on. `Listing` and `Hello` also
    /// answer on every other path.
    pub fn path(self) -> &'static str {
        match self {
            Variant::Form => "/post",
            Variant::Json => "/post-endpoint",
            Variant::Contact => "/submit",
            Variant::Listing | Variant::Hello => "/",
        }
    }
}

pub fn app(variant: Variant, policy: ErrorPolicy) -> Router {
    let path = variant.path();
    let router = match variant {
        // POST is enforced inside the handler so the 405 body carries the
        // endpoint's own message.
        Variant::Form => Router::new().route(path, any(form::submit)),
        Variant::Json => Router::new().route(path, any(json::receive)),
        Variant::Listing => Router::new()
            .route(path, any(listing::list))
            .fallback(listing::list),
        Variant::Contact => Router::new().route(path, any(contact::submit)),
        Variant::Hello => Router::new()
            .route(path, any(hello::hello))
            .fallback(hello::hello),
    };
    router.with_state(policy)
}

pub async fn run(
    listener: TcpListener,
    variant: Variant,
    policy: ErrorPolicy,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(variant, policy)).await
}

/// Entry point shared by the binaries: logging, config, bind, serve.
pub async fn serve(variant: Variant) -> Result<(), ServerError> {
    init_tracing();
    let config = Config::from_env()?;
    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!(
        addr = %config.addr,
        variant = variant.name(),
        policy = ?config.error_policy,
        "listening"
    );
    run(listener, variant, config.error_policy).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
