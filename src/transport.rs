// Blocking HTTP transport
//
// One-time process-wide engine setup plus the shared POST primitive used by
// both REST operations. Every call owns its client handle; nothing is pooled
// or reused across calls.

use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use crate::errors::{Error, Result};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Set exactly once, never reset for the life of the process.
static TRANSPORT_INIT: OnceCell<()> = OnceCell::new();

/// Prepare the process-wide pieces of the HTTP engine.
///
/// The first call installs the ring-backed rustls crypto provider as the
/// process default; every later call is a no-op. Safe to call from
/// concurrent threads. Requests perform this lazily, so calling it up front
/// is optional.
pub fn ensure_initialized() {
    TRANSPORT_INIT.get_or_init(|| {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            "license manager client initializing"
        );
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            // The host application installed its own provider first; keep it.
            debug!("a default crypto provider is already installed");
        }
    });
}

/// POST `body` to `url` and collect the raw response body.
///
/// Blocks the calling thread until the exchange completes or the timeout
/// elapses. The server's HTTP status code is not inspected: any completed
/// exchange yields `Ok` with whatever body the server sent, including error
/// bodies.
pub(crate) fn post(url: &str, body: String, timeout: Duration) -> Result<String> {
    ensure_initialized();

    // A zero timeout disables the deadline entirely; the blocking client
    // would otherwise fall back to its own 30 second default.
    let timeout = if timeout.is_zero() { None } else { Some(timeout) };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(Error::Init)?;

    debug!(url = %url, bytes = body.len(), "sending POST request");

    let response = client
        .post(url)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(body)
        .send()
        .map_err(|source| Error::from_reqwest(url, source))?;

    let body = response
        .text()
        .map_err(|source| Error::from_reqwest(url, source))?;

    debug!(bytes = body.len(), "response body received");

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_initialized_is_idempotent() {
        ensure_initialized();
        ensure_initialized();
        assert!(TRANSPORT_INIT.get().is_some());
    }
}
