use reqwest::header::HeaderMap;
use std::time::Duration;

/// Failures detected while performing a request or reading its response.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("remote API responded with status {status}")]
    Remote {
        status: u16,
        /// Parsed error body sent by the remote, if it sent one.
        body: Option<serde_json::Value>,
    },
}

impl ResponseError {
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() { ResponseError::Timeout(timeout) } else { ResponseError::Transport(err) }
    }
}

/// Status, headers and body of a completed call.
#[derive(Debug, Clone, PartialEq)]
pub struct FullResponse {
    status: u16,
    headers: HeaderMap,
    body: serde_json::Value,
}

impl FullResponse {
    pub fn status(&self) -> u16 { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &serde_json::Value { &self.body }
}

/// What a successful call resolves to, depending on the requested response mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    Body(serde_json::Value),
    Full(FullResponse),
}

impl ResponsePayload {
    pub fn body(&self) -> &serde_json::Value {
        match self {
            ResponsePayload::Body(body) => body,
            ResponsePayload::Full(full) => &full.body,
        }
    }

    pub fn into_body(self) -> serde_json::Value {
        match self {
            ResponsePayload::Body(body) => body,
            ResponsePayload::Full(full) => full.body,
        }
    }
}

/// Interprets a raw response body: JSON when possible, a JSON string otherwise.
/// An empty body yields `None`.
pub(crate) fn parse_body(text: &str) -> Option<serde_json::Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(
        serde_json::from_str(text)
            .unwrap_or_else(|_| serde_json::Value::String(text.to_string())),
    )
}

/// Reads the response and applies the error policy of the call.
pub(crate) async fn unwrap_return_code(
    response: reqwest::Response,
    timeout: Duration,
    full: bool,
    simple: bool,
) -> Result<ResponsePayload, ResponseError> {
    let status = response.status();
    let headers = response.headers().clone();
    let text = response.text().await.map_err(|e| ResponseError::from_transport(e, timeout))?;
    let body = parse_body(&text);

    if simple && !status.is_success() {
        return Err(ResponseError::Remote { status: status.as_u16(), body });
    }

    let body = body.unwrap_or(serde_json::Value::Null);
    if full {
        Ok(ResponsePayload::Full(FullResponse { status: status.as_u16(), headers, body }))
    } else {
        Ok(ResponsePayload::Body(body))
    }
}
