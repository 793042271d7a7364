use super::super::common::HTTPError;
use super::super::http_client::HTTPClient;
use crate::logger::{redact_form, redact_headers, redact_json};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::time::Duration;
use strum_macros::{AsRefStr, Display, EnumString};

/// Header carrying a fresh UUID for every outgoing request.
pub const CLIENT_REQ_ID_HEADER: &str = "x-http-mapps-client-req-id";
/// Header carrying the lower-cased name of the issuing client.
pub const CLIENT_NAME_HEADER: &str = "x-http-mapps-client-name";

pub(crate) const PROTOCOL_JSON: &str = "application/json";
pub(crate) const FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";

/// HTTP verbs understood by [`HTTPClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HTTPRequestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<HTTPRequestMethod> for reqwest::Method {
    fn from(value: HTTPRequestMethod) -> Self {
        match value {
            HTTPRequestMethod::Get => reqwest::Method::GET,
            HTTPRequestMethod::Post => reqwest::Method::POST,
            HTTPRequestMethod::Put => reqwest::Method::PUT,
            HTTPRequestMethod::Patch => reqwest::Method::PATCH,
            HTTPRequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Failures detected while assembling a request, before anything hits the network.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Provided {field} is not of valid type")]
    InvalidArgument { field: &'static str },
    #[error("Provided value for header {name} is not a valid header value")]
    InvalidHeader { name: String },
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Rejects empty or whitespace-only values for a required string parameter.
pub(crate) fn require_non_empty<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, RequestError> {
    if value.trim().is_empty() {
        Err(RequestError::InvalidArgument { field })
    } else {
        Ok(value)
    }
}

pub(crate) fn header_value(name: &str, value: &str) -> Result<HeaderValue, RequestError> {
    HeaderValue::from_str(value).map_err(|_| RequestError::InvalidHeader { name: name.to_string() })
}

/// Inserts a header whose name is a lower-case static token.
pub(crate) fn insert_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: &str,
) -> Result<(), RequestError> {
    headers.insert(HeaderName::from_static(name), header_value(name, value)?);
    Ok(())
}

/// Caller-side description of a call, before the client injects its defaults.
#[derive(Clone)]
pub struct RequestOptions {
    pub method: Option<HTTPRequestMethod>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    pub form: Option<Vec<(String, String)>>,
    pub query: Option<Vec<(String, String)>>,
    /// Overrides the client-wide timeout for this call only.
    pub timeout: Option<Duration>,
    /// Return status and headers alongside the body.
    pub resolve_with_full_response: bool,
    /// Treat non-2xx responses as errors.
    pub simple: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: None,
            headers: HeaderMap::new(),
            body: None,
            form: None,
            query: None,
            timeout: None,
            resolve_with_full_response: false,
            simple: true,
        }
    }
}

impl RequestOptions {
    pub fn new(method: HTTPRequestMethod) -> Self {
        Self { method: Some(method), ..Self::default() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Serializes `body` as the JSON payload of the request.
    ///
    /// # Errors
    /// Fails if `body` cannot be represented as JSON.
    pub fn with_json_body<T: serde::Serialize>(mut self, body: &T) -> Result<Self, RequestError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_form(mut self, form: Vec<(String, String)>) -> Self {
        self.form = Some(form);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = Some(query);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn resolve_with_full_response(mut self, full: bool) -> Self {
        self.resolve_with_full_response = full;
        self
    }

    #[must_use]
    pub fn simple(mut self, simple: bool) -> Self {
        self.simple = simple;
        self
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("method", &self.method)
            .field("headers", &redact_headers(&self.headers))
            .field("body", &self.body.as_ref().map(redact_json))
            .field("form", &self.form.as_deref().map(redact_form))
            .field("query", &self.query)
            .field("timeout", &self.timeout)
            .field("resolve_with_full_response", &self.resolve_with_full_response)
            .field("simple", &self.simple)
            .finish()
    }
}

/// A fully assembled request: absolute URL, merged headers and resolved timeout.
#[derive(Clone)]
pub struct RequestDescriptor {
    pub(crate) method: HTTPRequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) form: Option<Vec<(String, String)>>,
    pub(crate) query: Option<Vec<(String, String)>>,
    pub(crate) timeout: Duration,
    pub(crate) resolve_with_full_response: bool,
    pub(crate) simple: bool,
}

impl RequestDescriptor {
    pub fn method(&self) -> HTTPRequestMethod { self.method }
    pub fn url(&self) -> &str { &self.url }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> Option<&serde_json::Value> { self.body.as_ref() }
    pub fn form(&self) -> Option<&[(String, String)]> { self.form.as_deref() }
    pub fn query(&self) -> Option<&[(String, String)]> { self.query.as_deref() }
    pub fn timeout(&self) -> Duration { self.timeout }
    pub fn resolves_with_full_response(&self) -> bool { self.resolve_with_full_response }
    pub fn is_simple(&self) -> bool { self.simple }

    /// Value of the generated request id header.
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get(CLIENT_REQ_ID_HEADER).and_then(|v| v.to_str().ok())
    }
}

impl fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &redact_headers(&self.headers))
            .field("body", &self.body.as_ref().map(redact_json))
            .field("form", &self.form.as_deref().map(redact_form))
            .field("query", &self.query)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// An endpoint of the remote API: where it lives and which headers and query it needs.
pub(crate) trait HTTPRequestType {
    fn endpoint(&self) -> &'static str;
    fn request_method(&self) -> HTTPRequestMethod;
    fn header_params(&self) -> Result<HeaderMap, RequestError> { Ok(HeaderMap::new()) }
    fn query_params(&self) -> Vec<(String, String)> { Vec::new() }

    fn base_options(&self) -> Result<RequestOptions, RequestError> {
        let options = RequestOptions::new(self.request_method()).with_headers(self.header_params()?);
        let query = self.query_params();
        if query.is_empty() { Ok(options) } else { Ok(options.with_query(query)) }
    }
}

pub(crate) trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(&self, client: &HTTPClient) -> Result<serde_json::Value, HTTPError> {
        let options = self.base_options()?;
        Ok(client.invoke(self.endpoint(), options).await?.into_body())
    }
}

pub(crate) trait JSONBodyHTTPRequestType: HTTPRequestType {
    type Body: serde::Serialize;
    fn body(&self) -> &Self::Body;

    async fn send_request(&self, client: &HTTPClient) -> Result<serde_json::Value, HTTPError> {
        let options = self.base_options()?.with_json_body(self.body())?;
        Ok(client.invoke(self.endpoint(), options).await?.into_body())
    }
}

pub(crate) trait FormBodyHTTPRequestType: HTTPRequestType {
    fn form_params(&self) -> Vec<(String, String)>;

    async fn send_request(&self, client: &HTTPClient) -> Result<serde_json::Value, HTTPError> {
        let options = self.base_options()?.with_form(self.form_params());
        Ok(client.invoke(self.endpoint(), options).await?.into_body())
    }
}
