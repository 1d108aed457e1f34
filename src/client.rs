// REST operations against the licensing server
//
// Two calls: create a slave key derived from a master key, and activate a
// runtime key. Both return the server's raw JSON response body; parsing it
// is the caller's concern.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::errors::{Error, Result};
use crate::transport;

/// Timeout applied when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire payload for `POST /slaves`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSlavePayload<'a> {
    master_key: &'a str,
    comment: &'a str,
}

/// Wire payload for `POST /activate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivatePayload<'a> {
    master_or_slave_key: &'a str,
    runtime_key: &'a str,
}

/// Create a slave key derived from `master_key`.
///
/// `url` is the server base URL, e.g. `https://localhost:3600`. `comment` is
/// free text stored alongside the slave — end-user contact information is a
/// good choice for tracking; pass an empty string for none.
///
/// Returns the server's raw JSON response. A completed exchange is `Ok` even
/// when the server reports an application-level failure in the body: the
/// HTTP status code is not inspected.
pub fn create_slave(url: &str, master_key: &str, comment: &str) -> Result<String> {
    create_slave_with_timeout(url, master_key, comment, DEFAULT_TIMEOUT)
}

/// Same as [`create_slave`] with an explicit timeout. A zero timeout
/// disables the deadline.
pub fn create_slave_with_timeout(
    url: &str,
    master_key: &str,
    comment: &str,
    timeout: Duration,
) -> Result<String> {
    require_non_empty(url, "url")?;
    require_non_empty(master_key, "masterKey")?;

    debug!("creating slave key");

    let body = serde_json::to_string(&CreateSlavePayload { master_key, comment })
        .expect("flat string payload always serializes");
    transport::post(&endpoint_url(url, "slaves"), body, timeout)
}

/// Activate `runtime_key` against the server, authorized by a master or
/// slave key.
///
/// On success the server's JSON response carries a `"token"` field; the body
/// is returned raw for the caller to parse. Status-code handling matches
/// [`create_slave`].
pub fn activate(url: &str, master_or_slave_key: &str, runtime_key: &str) -> Result<String> {
    activate_with_timeout(url, master_or_slave_key, runtime_key, DEFAULT_TIMEOUT)
}

/// Same as [`activate`] with an explicit timeout. A zero timeout disables
/// the deadline.
pub fn activate_with_timeout(
    url: &str,
    master_or_slave_key: &str,
    runtime_key: &str,
    timeout: Duration,
) -> Result<String> {
    require_non_empty(url, "url")?;
    require_non_empty(master_or_slave_key, "masterOrSlaveKey")?;
    require_non_empty(runtime_key, "runtimeKey")?;

    debug!("activating runtime key");

    let body = serde_json::to_string(&ActivatePayload {
        master_or_slave_key,
        runtime_key,
    })
    .expect("flat string payload always serializes");
    transport::post(&endpoint_url(url, "activate"), body, timeout)
}

fn require_non_empty(value: &str, name: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidParameter(name));
    }
    Ok(())
}

/// Join `segment` onto the base URL with exactly one `/` separator.
fn endpoint_url(base: &str, segment: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_uses_single_separator() {
        assert_eq!(
            endpoint_url("https://host:3600", "slaves"),
            "https://host:3600/slaves"
        );
        assert_eq!(
            endpoint_url("https://host:3600/", "slaves"),
            "https://host:3600/slaves"
        );
        assert_eq!(
            endpoint_url("https://host:3600", "activate"),
            "https://host:3600/activate"
        );
        assert_eq!(
            endpoint_url("https://host:3600/", "activate"),
            "https://host:3600/activate"
        );
    }

    #[test]
    fn test_slave_payload_serializes_deterministically() {
        let body = serde_json::to_string(&CreateSlavePayload {
            master_key: "abc",
            comment: "",
        })
        .unwrap();
        assert_eq!(body, r#"{"masterKey":"abc","comment":""}"#);
    }

    #[test]
    fn test_activate_payload_serializes_deterministically() {
        let body = serde_json::to_string(&ActivatePayload {
            master_or_slave_key: "mk",
            runtime_key: "rk",
        })
        .unwrap();
        assert_eq!(body, r#"{"masterOrSlaveKey":"mk","runtimeKey":"rk"}"#);
    }

    #[test]
    fn test_payload_escapes_embedded_quotes() {
        let body = serde_json::to_string(&CreateSlavePayload {
            master_key: "ab\"c",
            comment: "",
        })
        .unwrap();
        assert_eq!(body, r#"{"masterKey":"ab\"c","comment":""}"#);

        // The encoded form must round back through a strict parser.
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["masterKey"], "ab\"c");
    }

    #[test]
    fn test_create_slave_rejects_empty_required_fields() {
        let cases = [("", "mk"), ("http://localhost:3600", ""), ("", "")];
        for (url, master_key) in cases {
            let err = create_slave(url, master_key, "").unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter(_)),
                "url={url:?} masterKey={master_key:?} gave {err:?}"
            );
            assert_eq!(err.code(), -1);
        }
    }

    #[test]
    fn test_activate_rejects_empty_required_fields() {
        let cases = [
            ("", "mk", "rk"),
            ("http://localhost:3600", "", "rk"),
            ("http://localhost:3600", "mk", ""),
            ("", "", ""),
        ];
        for (url, key, runtime_key) in cases {
            let err = activate(url, key, runtime_key).unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter(_)),
                "url={url:?} key={key:?} runtimeKey={runtime_key:?} gave {err:?}"
            );
            assert_eq!(err.code(), -1);
        }
    }
}
