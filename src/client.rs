//! The dispatcher: a client owning a transport and a hook chain.
//!
//! Call flow: build request → run `before` hooks → transport → normalize
//! response → run `after` hooks → return [`Outcome`]. A before-hook error
//! aborts before the transport is touched; an after-hook error replaces
//! the computed result. Transport failures skip response parsing but the
//! after chain still runs, so timing and telemetry hooks observe every
//! call uniformly.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::context::CallContext;
use crate::error::Result;
use crate::hook::{Hook, HookChain};
use crate::request::{self, Method};
use crate::response::{self, Outcome};
use crate::transport::{Transport, TransportConfig};

/// A dispatcher with an explicit transport and hook chain.
///
/// Cloning is cheap and clones share the same transport (and its
/// connection pool). For the process-wide singleton flavor of this API,
/// see the crate-level free functions.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    hooks: HookChain,
}

impl Client {
    /// Start building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub(crate) fn from_parts(transport: Arc<dyn Transport>, hooks: HookChain) -> Self {
        Self { transport, hooks }
    }

    /// Dispatch a GET.
    pub async fn get(
        &self,
        url: &str,
        header: Option<&HashMap<String, String>>,
        parameters: Option<&HashMap<String, String>>,
    ) -> Outcome {
        self.send::<()>(Method::Get, url, header, parameters, None, None)
            .await
    }

    /// Dispatch a POST with a JSON body.
    pub async fn post<B>(
        &self,
        url: &str,
        header: Option<&HashMap<String, String>>,
        parameters: Option<&HashMap<String, String>>,
        body: &B,
    ) -> Outcome
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::Post, url, header, parameters, Some(body), None)
            .await
    }

    /// Dispatch a PUT with a JSON body.
    pub async fn put<B>(
        &self,
        url: &str,
        header: Option<&HashMap<String, String>>,
        parameters: Option<&HashMap<String, String>>,
        body: &B,
    ) -> Outcome
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::Put, url, header, parameters, Some(body), None)
            .await
    }

    /// Dispatch a PATCH with a JSON body.
    pub async fn patch<B>(
        &self,
        url: &str,
        header: Option<&HashMap<String, String>>,
        parameters: Option<&HashMap<String, String>>,
        body: &B,
    ) -> Outcome
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::Patch, url, header, parameters, Some(body), None)
            .await
    }

    /// Dispatch a DELETE. A body argument is accepted for signature parity
    /// but never attached.
    pub async fn delete<B>(
        &self,
        url: &str,
        header: Option<&HashMap<String, String>>,
        parameters: Option<&HashMap<String, String>>,
        body: Option<&B>,
    ) -> Outcome
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::Delete, url, header, parameters, body, None)
            .await
    }

    /// Build and dispatch one call, with an optional per-request deadline
    /// that is propagated into the transport.
    pub async fn send<B>(
        &self,
        method: Method,
        url: &str,
        header: Option<&HashMap<String, String>>,
        parameters: Option<&HashMap<String, String>>,
        body: Option<&B>,
        timeout: Option<Duration>,
    ) -> Outcome
    where
        B: Serialize + ?Sized,
    {
        let mut request = match request::build(method, url, header, parameters, body) {
            Ok(request) => request,
            Err(error) => return Outcome::aborted(error),
        };
        if timeout.is_some() {
            *request.timeout_mut() = timeout;
        }

        let mut cx = CallContext::new();
        self.dispatch(&mut cx, request).await
    }

    /// Run the full pipeline for an already-built request.
    ///
    /// Exposed for callers that construct requests themselves; `send` is
    /// the usual entry point. The context is threaded through both hook
    /// phases of this one call.
    pub async fn dispatch(&self, cx: &mut CallContext, mut request: reqwest::Request) -> Outcome {
        if let Err(error) = self.hooks.run_before(cx, &mut request) {
            return Outcome::aborted(error);
        }

        let result = self.transport.execute(request).await;
        let outcome = response::parse(result).await;

        if let Err(error) = self.hooks.run_after(cx, &outcome) {
            return Outcome::aborted(error);
        }
        outcome
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    config: TransportConfig,
    hooks: HookChain,
}

impl ClientBuilder {
    /// Use a specific transport instead of building the default pooled
    /// client.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Pool/timeout settings for the default transport. Ignored when an
    /// explicit transport was supplied.
    pub fn config(mut self, config: TransportConfig) -> Self {
        self.config = config;
        self
    }

    /// Append one hook to the chain.
    pub fn hook(mut self, hook: impl Hook + 'static) -> Self {
        self.hooks.append(Arc::new(hook));
        self
    }

    /// Replace the whole hook chain.
    pub fn hooks(mut self, hooks: HookChain) -> Self {
        self.hooks = hooks;
        self
    }

    /// Build the client. Fails only when the default transport cannot be
    /// constructed.
    pub fn build(self) -> Result<Client> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(self.config.build()?),
        };
        Ok(Client {
            transport,
            hooks: self.hooks,
        })
    }
}
