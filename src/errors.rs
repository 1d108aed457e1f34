// Error taxonomy for the license manager client
//
// Rust callers get a typed enum with source chaining; callers that need a
// bare integer status (process exit codes, FFI-style bindings) map each
// variant through `Error::code`.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by the REST client.
///
/// A completed HTTP exchange is a success regardless of the server's status
/// code; these variants cover everything that prevents the exchange from
/// completing.
#[derive(Debug, Error)]
pub enum Error {
    /// A required parameter was empty. Raised before any network activity.
    #[error("invalid parameter: {0} must not be empty")]
    InvalidParameter(&'static str),

    /// The per-call HTTP client could not be constructed.
    #[error("failed to initialize HTTP client")]
    Init(#[source] reqwest::Error),

    /// The request could not be built, e.g. the URL is malformed.
    #[error("invalid request configuration for {url}")]
    Config {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No connection could be established (DNS failure, connection refused).
    #[error("failed to connect to {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The exchange did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any other transport failure: TLS handshake, protocol error,
    /// interrupted response body.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// Stable integer code for this error, usable as a process exit status.
    ///
    /// `0` is reserved for success. Invalid parameters map to `-1`;
    /// transport failures are numbered by category.
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidParameter(_) => -1,
            Error::Init(_) => 1,
            Error::Config { .. } => 2,
            Error::Connect { .. } => 3,
            Error::Timeout { .. } => 4,
            Error::Transport { .. } => 5,
        }
    }

    /// Classify an error raised while sending to `url` or reading the
    /// response body.
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_owned();
        if source.is_timeout() {
            Error::Timeout { url, source }
        } else if source.is_connect() {
            Error::Connect { url, source }
        } else if source.is_builder() {
            Error::Config { url, source }
        } else {
            Error::Transport { url, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Produces a real builder error without touching the network.
    fn builder_error() -> reqwest::Error {
        reqwest::blocking::Client::new()
            .post("http://bad host")
            .send()
            .expect_err("a URL with a space in the host must not parse")
    }

    #[test]
    fn test_invalid_parameter_maps_to_negative_one() {
        let err = Error::InvalidParameter("masterKey");
        assert_eq!(err.code(), -1);
        assert_eq!(err.to_string(), "invalid parameter: masterKey must not be empty");
    }

    #[test]
    fn test_malformed_url_classifies_as_config() {
        let err = Error::from_reqwest("http://bad host/activate", builder_error());
        assert!(matches!(err, Error::Config { .. }), "unexpected: {err:?}");
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn test_display_names_the_target_url() {
        let err = Error::from_reqwest("http://bad host/activate", builder_error());
        assert!(err.to_string().contains("http://bad host/activate"));
    }
}
