//! Process-wide shared state and the package-level convenience API.
//!
//! One pooled transport client and one append-only hook registry serve the
//! whole process. Every call snapshots both up front, so the before and
//! after phases of a single call always observe the same chain even if
//! another thread registers a hook mid-flight.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::client::Client;
use crate::hook::{Hook, HookChain};
use crate::request::Method;
use crate::response::Outcome;
use crate::transport::{Transport, TransportConfig};

static HOOKS: RwLock<Vec<Arc<dyn Hook>>> = RwLock::new(Vec::new());

static TRANSPORT: Lazy<RwLock<Arc<dyn Transport>>> = Lazy::new(|| {
    let client: Arc<dyn Transport> = Arc::new(
        TransportConfig::default()
            .build()
            .expect("failed to build default transport client"),
    );
    RwLock::new(client)
});

/// Append a hook to the process-wide registry.
///
/// Registration order is invocation order, for the after phase as much as
/// the before phase. There is no removal: the registry lives for the
/// process lifetime.
pub fn add_hook(hook: impl Hook + 'static) {
    HOOKS
        .write()
        .expect("hook registry lock poisoned")
        .push(Arc::new(hook));
}

/// Replace the process-wide shared transport client wholesale.
///
/// Calls already in flight keep the client they started with.
pub fn set_transport_client(transport: impl Transport + 'static) {
    *TRANSPORT.write().expect("transport lock poisoned") = Arc::new(transport);
}

/// Snapshot the shared transport and registry into a client for one call.
fn snapshot() -> Client {
    let hooks = HookChain::from(HOOKS.read().expect("hook registry lock poisoned").clone());
    let transport = TRANSPORT.read().expect("transport lock poisoned").clone();
    Client::from_parts(transport, hooks)
}

/// Dispatch a GET through the shared client.
pub async fn get(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
) -> Outcome {
    snapshot().get(url, header, parameters).await
}

/// [`get`] with a per-request deadline propagated into the transport.
pub async fn get_with_timeout(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    timeout: Duration,
) -> Outcome {
    snapshot()
        .send::<()>(Method::Get, url, header, parameters, None, Some(timeout))
        .await
}

/// Dispatch a POST with a JSON body through the shared client.
pub async fn post<B>(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    body: &B,
) -> Outcome
where
    B: Serialize + ?Sized,
{
    snapshot().post(url, header, parameters, body).await
}

/// [`post`] with a per-request deadline.
pub async fn post_with_timeout<B>(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    body: &B,
    timeout: Duration,
) -> Outcome
where
    B: Serialize + ?Sized,
{
    snapshot()
        .send(Method::Post, url, header, parameters, Some(body), Some(timeout))
        .await
}

/// Dispatch a PUT with a JSON body through the shared client.
pub async fn put<B>(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    body: &B,
) -> Outcome
where
    B: Serialize + ?Sized,
{
    snapshot().put(url, header, parameters, body).await
}

/// [`put`] with a per-request deadline.
pub async fn put_with_timeout<B>(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    body: &B,
    timeout: Duration,
) -> Outcome
where
    B: Serialize + ?Sized,
{
    snapshot()
        .send(Method::Put, url, header, parameters, Some(body), Some(timeout))
        .await
}

/// Dispatch a PATCH with a JSON body through the shared client.
pub async fn patch<B>(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    body: &B,
) -> Outcome
where
    B: Serialize + ?Sized,
{
    snapshot().patch(url, header, parameters, body).await
}

/// [`patch`] with a per-request deadline.
pub async fn patch_with_timeout<B>(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    body: &B,
    timeout: Duration,
) -> Outcome
where
    B: Serialize + ?Sized,
{
    snapshot()
        .send(Method::Patch, url, header, parameters, Some(body), Some(timeout))
        .await
}

/// Dispatch a DELETE through the shared client. The body argument is
/// accepted for signature parity but never attached.
pub async fn delete<B>(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    body: Option<&B>,
) -> Outcome
where
    B: Serialize + ?Sized,
{
    snapshot().delete(url, header, parameters, body).await
}

/// [`delete`] with a per-request deadline.
pub async fn delete_with_timeout<B>(
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    body: Option<&B>,
    timeout: Duration,
) -> Outcome
where
    B: Serialize + ?Sized,
{
    snapshot()
        .send(Method::Delete, url, header, parameters, body, Some(timeout))
        .await
}
