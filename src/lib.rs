//! The Rust client for LogSnag, an event tracking and analytics service.
//!
//! # Overview
//!
//! The library revolves around a [`Client`] created from a [`Configuration`] holding your API
//! token and project. The client exposes four operations:
//!
//! - [`Client::log`] tracks an event in a channel,
//! - [`Client::identify`] attaches properties to a user profile,
//! - [`Client::insight`] sets the value of a real-time insight widget,
//! - [`Client::mutate_insight`] increments a numeric insight.
//!
//! Each operation accepts any value that serializes to a map, typically built with
//! [`serde_json::json!`] or a `#[derive(Serialize)]` struct.
//!
//! # Error Handling
//!
//! There are two separate channels for failures:
//!
//! - Invalid input (missing or unknown keys, malformed tags, wrong value types) and missing
//!   configuration are returned as `Err(`[`Error`]`)` before any request is made.
//! - Everything that happens once a request is sent is reported through the returned
//!   [`Outcome`]: network failures have no status code, error responses carry the status code and
//!   the server's message.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate for logging
//! messages. A dedicated logger may be set with [`Configuration::logger`].
//!
//! # Examples
//!
//! ```no_run
//! use logsnag::Configuration;
//! use serde_json::json;
//!
//! let client = Configuration::new("api-token", "my-project")?.to_client();
//! let outcome = client.log(json!({
//!     "channel": "payments",
//!     "event": "New Subscription",
//!     "tags": { "plan": "premium" },
//! }))?;
//! assert!(outcome.is_success());
//! # Ok::<(), logsnag::Error>(())
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

mod client;
mod config;
mod error;
mod event;
mod outcome;
mod transport;
pub mod validator;

pub use client::Client;
pub use config::Configuration;
pub use error::{ConfigurationError, Error, Result, TransportError, ValidationError};
pub use event::{Event, EventKind};
pub use outcome::Outcome;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, Transport};
