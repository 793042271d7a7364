use crate::http_handler::http_request::request_common::{RequestError, require_non_empty};
use crate::logger::REDACTED;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::fmt;

/// A client secret. Never shows up in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self { Self(secret.into()) }
    pub(crate) fn expose(&self) -> &str { &self.0 }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClientSecret").field(&REDACTED).finish()
    }
}

impl fmt::Display for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(REDACTED) }
}

/// OAuth client id and, for clients that need it, the matching secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: Option<ClientSecret>,
}

impl Credentials {
    /// Credentials consisting of a client id only.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: None }
    }

    pub fn with_secret(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: Some(ClientSecret::new(client_secret)) }
    }

    pub fn client_id(&self) -> &str { &self.client_id }
    pub fn client_secret(&self) -> Option<&ClientSecret> { self.client_secret.as_ref() }

    pub(crate) fn validate_id(&self) -> Result<(), RequestError> {
        require_non_empty("clientId", &self.client_id).map(|_| ())
    }

    pub(crate) fn validate_secret(&self) -> Result<(), RequestError> {
        let secret = self.client_secret.as_ref().map_or("", ClientSecret::expose);
        require_non_empty("clientSecret", secret).map(|_| ())
    }

    /// `Basic base64(id:secret)`, the value of the `Authorization` header.
    pub(crate) fn basic_authorization(&self) -> Result<String, RequestError> {
        self.validate_secret()?;
        let secret = self.client_secret.as_ref().map_or("", ClientSecret::expose);
        let encoded = BASE64.encode(format!("{}:{secret}", self.client_id));
        Ok(format!("Basic {encoded}"))
    }
}
