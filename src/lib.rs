//! # Wraith
//!
//! Dispatch-and-hook convenience layer over a shared pooled HTTP client.
//!
//! Wraith builds requests (method, URL, query parameters, headers, JSON
//! body), sends them through a long-lived connection-pooling transport,
//! runs an ordered before/after [`Hook`] chain around each call, and
//! normalizes the result into one [`Outcome`] carrying status code,
//! headers, body bytes, and error.
//!
//! Two ways in:
//!
//! - The free functions ([`get`], [`post`], [`put`], [`patch`],
//!   [`delete`]) plus [`add_hook`] and [`set_transport_client`] operate on
//!   a process-wide shared client and hook registry.
//! - A [`Client`] built via [`Client::builder`] owns its own transport and
//!   hook chain, for callers who want the wiring explicit.
//!
//! There is no retry, redirect, or streaming machinery here: one dispatch
//! attempt per call, and any policy beyond that belongs to the caller.

// Request construction
pub mod headers;
pub mod query;
pub mod request;

// Dispatch pipeline
pub mod client;
pub mod context;
pub mod hook;
pub mod response;
pub mod transport;

pub mod error;

mod global;

// Re-exports
pub use client::{Client, ClientBuilder};
pub use context::CallContext;
pub use error::{Error, Result};
pub use global::{
    add_hook, delete, delete_with_timeout, get, get_with_timeout, patch, patch_with_timeout,
    post, post_with_timeout, put, put_with_timeout, set_transport_client,
};
pub use hook::{Hook, HookChain};
pub use request::Method;
pub use response::Outcome;
pub use transport::{Transport, TransportConfig};
