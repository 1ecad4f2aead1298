//! Response normalization: classify the transport result into an
//! [`Outcome`].

use bytes::Bytes;
use reqwest::header::HeaderMap;

use crate::error::{Error, Result};

/// The normalized result of one dispatched call.
///
/// Mirrors the (status, headers, body, error) tuple every call returns.
/// `status == -1` means no usable response was obtained (build failure,
/// hook abort, or transport failure). On a non-200 status, `status` and
/// `headers` are still populated for diagnostics while `error` carries the
/// failure; callers must treat any `Some` error as fatal for success-path
/// logic.
#[derive(Debug)]
pub struct Outcome {
    /// Response status code, or `-1` when no response was obtained.
    pub status: i32,
    /// Response headers, when a response was obtained.
    pub headers: Option<HeaderMap>,
    /// Raw body bytes. Only populated for a 200 response read in full.
    pub body: Option<Bytes>,
    /// The call's single error value, if any.
    pub error: Option<Error>,
}

impl Outcome {
    /// Outcome for a call that never produced a response.
    pub(crate) fn aborted(error: Error) -> Self {
        Self {
            status: -1,
            headers: None,
            body: None,
            error: Some(error),
        }
    }

    /// True when the call succeeded: status 200 and no error.
    pub fn is_success(&self) -> bool {
        self.status == 200 && self.error.is_none()
    }
}

/// Normalize the transport's result.
///
/// 200 is the only status treated as success; everything else has its
/// body read and folded into a [`Error::Status`]. The response's
/// connection is released when the `reqwest::Response` is dropped, on
/// every path.
pub(crate) async fn parse(result: Result<reqwest::Response>) -> Outcome {
    let response = match result {
        Ok(response) => response,
        Err(error) => {
            tracing::error!("error sending request: {error}");
            return Outcome::aborted(error);
        }
    };

    let status = response.status().as_u16();
    let headers = response.headers().clone();

    if status != 200 {
        // Read failures here fold into an empty body text.
        let body = response.text().await.unwrap_or_default();
        return Outcome {
            status: i32::from(status),
            headers: Some(headers),
            body: None,
            error: Some(Error::status(status, body)),
        };
    }

    match response.bytes().await {
        Ok(body) => Outcome {
            status: i32::from(status),
            headers: Some(headers),
            body: Some(body),
            error: None,
        },
        Err(error) => {
            tracing::error!("couldn't read response body: {error}");
            Outcome {
                status: i32::from(status),
                headers: Some(headers),
                body: None,
                error: Some(Error::BodyRead(error)),
            }
        }
    }
}
