use reqwest::header::HeaderMap;
use std::fmt::Debug;
use tracing_subscriber::EnvFilter;

/// Placeholder written in place of any credential-bearing value.
pub const REDACTED: &str = "[REDACTED]";

/// Header names whose values carry credentials or tokens.
const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "access_token", "sso_token", "data"];

/// Form fields whose values carry credentials or one-time codes.
const SENSITIVE_FORM_FIELDS: [&str; 2] = ["code", "client_secret"];

/// JSON keys whose values are issued tokens, at any nesting depth.
const SENSITIVE_BODY_KEYS: [&str; 6] =
    ["access_token", "refresh_token", "id_token", "sso_token", "accessToken", "refreshToken"];

/// Sink for the diagnostic output of the HTTP clients.
///
/// Every [`HTTPClient`](crate::http_handler::http_client::HTTPClient) holds one of these
/// behind an `Arc`, so the log destination is chosen by whoever builds the client
/// instead of being a process-wide singleton.
pub trait ClientLogger: Debug + Send + Sync {
    /// Verbose tracing of requests and responses.
    fn debug(&self, tag: &str, message: &str);
    /// Regular operational messages.
    fn log(&self, tag: &str, message: &str);
    /// Failures that are about to be handed back to the caller.
    fn error(&self, tag: &str, message: &str);
}

/// Default [`ClientLogger`] forwarding to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl ClientLogger for TracingLogger {
    fn debug(&self, tag: &str, message: &str) { tracing::debug!(tag = %tag, "{message}") }
    fn log(&self, tag: &str, message: &str) { tracing::info!(tag = %tag, "{message}") }
    fn error(&self, tag: &str, message: &str) { tracing::error!(tag = %tag, "{message}") }
}

/// Installs a formatting subscriber filtered by `RUST_LOG` (defaults to `info`).
///
/// Calling this more than once is harmless, later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

pub(crate) fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS.iter().any(|s| s.eq_ignore_ascii_case(name))
}

/// Renders a header map for log output with every credential header masked.
pub(crate) fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if is_sensitive_header(name.as_str()) {
                REDACTED.to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}

/// Renders form pairs for log output with one-time codes and secrets masked.
pub(crate) fn redact_form(pairs: &[(String, String)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| {
            if SENSITIVE_FORM_FIELDS.contains(&k.as_str()) {
                (k.clone(), REDACTED.to_string())
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect()
}

/// Returns a copy of `body` fit for log output, with token values masked wherever they
/// appear in nested objects and arrays.
pub(crate) fn redact_json(body: &serde_json::Value) -> serde_json::Value {
    match body {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let shown = if SENSITIVE_BODY_KEYS.contains(&k.as_str()) {
                    serde_json::Value::String(REDACTED.to_string())
                } else {
                    redact_json(v)
                };
                (k.clone(), shown)
            })
            .collect::<serde_json::Map<_, _>>()
            .into(),
        serde_json::Value::Array(items) => items.iter().map(redact_json).collect(),
        other => other.clone(),
    }
}

/// Keeps every message in memory so tests can inspect what was logged.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLogger {
    lines: std::sync::Mutex<Vec<(&'static str, String)>>,
}

#[cfg(test)]
impl RecordingLogger {
    pub(crate) fn lines(&self) -> Vec<(&'static str, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.lines().into_iter().filter(|(lvl, _)| *lvl == "error").map(|(_, m)| m).collect()
    }

    fn push(&self, level: &'static str, tag: &str, message: &str) {
        self.lines.lock().unwrap().push((level, format!("{tag} : {message}")));
    }
}

#[cfg(test)]
impl ClientLogger for RecordingLogger {
    fn debug(&self, tag: &str, message: &str) { self.push("debug", tag, message) }
    fn log(&self, tag: &str, message: &str) { self.push("log", tag, message) }
    fn error(&self, tag: &str, message: &str) { self.push("error", tag, message) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue};

    #[test]
    fn test_header_redaction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic c2VjcmV0"));
        headers.insert(HeaderName::from_static("sso_token"), HeaderValue::from_static("tok"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let shown = redact_headers(&headers);
        assert!(shown.contains(&("authorization".to_string(), REDACTED.to_string())));
        assert!(shown.contains(&("sso_token".to_string(), REDACTED.to_string())));
        assert!(shown.contains(&("content-type".to_string(), "application/json".to_string())));
    }

    #[test]
    fn test_form_redaction() {
        let form = vec![
            ("client_id".to_string(), "abc".to_string()),
            ("code".to_string(), "one-time".to_string()),
        ];
        let shown = redact_form(&form);
        assert_eq!(shown[0].1, "abc");
        assert_eq!(shown[1].1, REDACTED);
    }

    #[test]
    fn test_data_header_is_masked() {
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("data"), HeaderValue::from_static("scope-code"));
        assert_eq!(redact_headers(&headers), vec![("data".to_string(), REDACTED.to_string())]);
    }

    #[test]
    fn test_body_redaction_reaches_nested_tokens() {
        let body = serde_json::json!({
            "access_token": "tok-1",
            "expires": "3600",
            "tokens": [{"refresh_token": "tok-2", "scope": "paytm"}],
            "user": {"id_token": "tok-3", "name": "someone"}
        });
        let shown = redact_json(&body);
        assert_eq!(
            shown,
            serde_json::json!({
                "access_token": REDACTED,
                "expires": "3600",
                "tokens": [{"refresh_token": REDACTED, "scope": "paytm"}],
                "user": {"id_token": REDACTED, "name": "someone"}
            })
        );
        assert!(!shown.to_string().contains("tok-"));
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing();
        init_tracing();
        tracing::info!("subscriber installed");
    }
}
