//! Request construction: method, resolved URL, headers, JSON body.

use std::collections::HashMap;
use std::fmt;

use reqwest::Url;
use serde::Serialize;

use crate::error::Result;
use crate::headers;
use crate::query;

/// HTTP method for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// The wire name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether this method carries a JSON payload. GET and DELETE never
    /// do, whatever body argument the caller passed.
    pub fn allows_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a transport-level request.
///
/// The URL is resolved against `parameters` first (see
/// [`query::resolve`]). For POST/PUT/PATCH the body is serialized to JSON
/// (`None` serializes to JSON `null`); a serialization failure degrades to
/// an empty payload rather than failing the call. Headers replace the
/// request's header map wholesale, and only when a map was given. No
/// Content-Type is set implicitly.
pub fn build<B>(
    method: Method,
    url: &str,
    header: Option<&HashMap<String, String>>,
    parameters: Option<&HashMap<String, String>>,
    body: Option<&B>,
) -> Result<reqwest::Request>
where
    B: Serialize + ?Sized,
{
    let resolved = query::resolve(url, parameters)?;
    // Scheme-less references survive resolution but are not dispatchable.
    let url = Url::parse(&resolved)?;
    let mut request = reqwest::Request::new(method.as_reqwest(), url);

    if method.allows_body() {
        let payload = match serde_json::to_vec(&body) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(%method, "request body serialization failed, sending empty body: {err}");
                Vec::new()
            }
        };
        *request.body_mut() = Some(payload.into());
    }

    if header.is_some() {
        *request.headers_mut() = headers::to_header_map(header)?;
    }

    Ok(request)
}
