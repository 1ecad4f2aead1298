//! Hook interception around request dispatch.
//!
//! A [`Hook`] observes one call twice: `before` runs ahead of the
//! transport with a mutable view of the outgoing request, `after` runs
//! once the response (or failure) has been normalized. Hooks in a
//! [`HookChain`] run in registration order in both phases, and the first
//! hook error short-circuits the rest of its phase.

use std::sync::Arc;

use crate::context::CallContext;
use crate::error::Result;
use crate::response::Outcome;

/// A pluggable interceptor around a single dispatched call.
///
/// Both callbacks default to no-ops, so an implementation overrides only
/// the phase it cares about. Implementations are shared across concurrent
/// calls (the chain hands out `&self`); any mutable state a hook keeps
/// must bring its own synchronization. Per-call state belongs in the
/// [`CallContext`] instead.
pub trait Hook: Send + Sync {
    /// Runs before the transport is invoked.
    ///
    /// May attach values to the context and mutate the outgoing request
    /// (inject auth headers, stamp trace ids). Returning an error aborts
    /// the call: later hooks do not run and the transport is never
    /// invoked.
    fn before(&self, _cx: &mut CallContext, _request: &mut reqwest::Request) -> Result<()> {
        Ok(())
    }

    /// Runs after the transport call, successful or not.
    ///
    /// Receives the normalized outcome snapshot, including any transport
    /// or status error, plus the context accumulated so far. Returning an
    /// error skips later hooks and replaces the call's result with that
    /// error.
    fn after(&self, _cx: &mut CallContext, _outcome: &Outcome) -> Result<()> {
        Ok(())
    }
}

/// An ordered, append-only sequence of hooks.
///
/// Registration order is invocation order for `before` and `after` alike
/// (the after phase is not reversed). Cloning is cheap: hooks are held
/// behind `Arc`.
#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<Arc<dyn Hook>>,
}

impl HookChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook to the end of the chain.
    pub fn append(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.push(hook);
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every `before` callback in order, stopping at the first error.
    pub(crate) fn run_before(
        &self,
        cx: &mut CallContext,
        request: &mut reqwest::Request,
    ) -> Result<()> {
        for hook in &self.hooks {
            hook.before(cx, request)?;
        }
        Ok(())
    }

    /// Run every `after` callback in order, stopping at the first error.
    pub(crate) fn run_after(&self, cx: &mut CallContext, outcome: &Outcome) -> Result<()> {
        for hook in &self.hooks {
            hook.after(cx, outcome)?;
        }
        Ok(())
    }
}

impl From<Vec<Arc<dyn Hook>>> for HookChain {
    fn from(hooks: Vec<Arc<dyn Hook>>) -> Self {
        Self { hooks }
    }
}

impl std::fmt::Debug for HookChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookChain")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
