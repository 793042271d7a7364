use super::http_request::request_common::RequestError;
use super::http_response::response_common::ResponseError;

/// Error returned by every client call.
///
/// Construction and argument problems surface as [`HTTPError::Request`], anything that
/// happened on or after the wire as [`HTTPError::Response`].
#[derive(Debug, thiserror::Error)]
pub enum HTTPError {
    /// The request could not be built.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// The call failed on the wire or the remote rejected it.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl HTTPError {
    /// The error body sent by the remote API, when the call failed with one.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            HTTPError::Response(ResponseError::Remote { body, .. }) => body.as_ref(),
            _ => None,
        }
    }

    /// HTTP status of a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            HTTPError::Response(ResponseError::Remote { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Name of the offending parameter for invalid-argument failures.
    pub fn invalid_field(&self) -> Option<&'static str> {
        match self {
            HTTPError::Request(RequestError::InvalidArgument { field }) => Some(*field),
            _ => None,
        }
    }

    /// Whether a caller-supplied argument was rejected before anything was sent.
    pub fn is_invalid_argument(&self) -> bool { self.invalid_field().is_some() }

    /// Whether the call gave up after its timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, HTTPError::Response(ResponseError::Timeout(_)))
    }
}
