use super::http_request::request_common::RequestError;
use std::env;
use std::time::Duration;

const BASE_URL_VAR: &str = "MAPPS_BASE_URL";
const TIMEOUT_VAR: &str = "MAPPS_TIMEOUT_MS";
const CLIENT_NAME_VAR: &str = "MAPPS_CLIENT_NAME";

/// Connection settings shared by every client.
///
/// Only the base URL is mandatory; unset fields fall back to the defaults of the
/// client the configuration is handed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Root URL every API path is appended to, e.g. `"https://accounts.example.com"`.
    pub base_url: String,
    /// Per-request timeout; the client default applies when unset.
    pub timeout: Option<Duration>,
    /// Name sent, lower-cased, in the client name header and used in failure logs.
    pub client_name: Option<String>,
    /// Prefix attached to every log line of the client.
    pub log_tag: Option<String>,
}

impl HttpConfig {
    /// Configuration for `base_url` with every optional setting left to the client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: None, client_name: None, log_tag: None }
    }

    /// Overrides the client's default timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the client's display name.
    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    /// Overrides the client's log tag.
    #[must_use]
    pub fn with_log_tag(mut self, tag: impl Into<String>) -> Self {
        self.log_tag = Some(tag.into());
        self
    }

    /// Reads `MAPPS_BASE_URL`, `MAPPS_TIMEOUT_MS` and `MAPPS_CLIENT_NAME`.
    ///
    /// # Errors
    /// Fails when the base URL is unset or the timeout is not a number of milliseconds.
    pub fn from_env() -> Result<Self, RequestError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, RequestError>
    where F: Fn(&str) -> Option<String> {
        let base_url =
            lookup(BASE_URL_VAR).ok_or(RequestError::InvalidArgument { field: BASE_URL_VAR })?;
        let mut config = Self::new(base_url);
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| RequestError::InvalidArgument { field: TIMEOUT_VAR })?;
            config = config.with_timeout(Duration::from_millis(millis));
        }
        if let Some(name) = lookup(CLIENT_NAME_VAR) {
            config = config.with_client_name(name);
        }
        Ok(config)
    }
}
