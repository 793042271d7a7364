use super::request_common::{
    FORM_URL_ENCODED, FormBodyHTTPRequestType, HTTPRequestMethod, HTTPRequestType, RequestError,
    header_value, require_non_empty,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

pub(crate) const GRANT_TYPE: &str = "authorization_code";
/// Scope requested when the caller does not name one.
pub const DEFAULT_SCOPE: &str = "paytm";

/// Request type for the authorization code exchange.
pub(crate) struct OauthTokenRequest<'a> {
    authorization: String,
    client_id: &'a str,
    code: &'a str,
    scope: &'a str,
}

impl<'a> OauthTokenRequest<'a> {
    pub(crate) fn new(
        authorization: String,
        client_id: &'a str,
        code: &'a str,
        scope: Option<&'a str>,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            authorization,
            client_id,
            code: require_non_empty("code", code)?,
            scope: scope.map_or(Ok(DEFAULT_SCOPE), |s| require_non_empty("scope", s))?,
        })
    }
}

impl FormBodyHTTPRequestType for OauthTokenRequest<'_> {
    fn form_params(&self) -> Vec<(String, String)> {
        vec![
            ("client_id".to_string(), self.client_id.to_string()),
            ("grant_type".to_string(), GRANT_TYPE.to_string()),
            ("code".to_string(), self.code.to_string()),
            ("scope".to_string(), self.scope.to_string()),
        ]
    }
}

impl HTTPRequestType for OauthTokenRequest<'_> {
    fn endpoint(&self) -> &'static str { "/oauth2/v2/token" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
    fn header_params(&self) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URL_ENCODED));
        headers.insert(AUTHORIZATION, header_value("Authorization", &self.authorization)?);
        Ok(headers)
    }
}
