use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType, PROTOCOL_JSON, RequestError,
    header_value, insert_header, require_non_empty,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

pub(crate) const VERIFICATION_TYPE: &str = "oauth_token";
pub(crate) const FETCH_STRATEGY: &str = "profile_info,phone_number,email";

/// Request type for the user profile endpoint.
pub(crate) struct UserProfileRequest<'a> {
    authorization: String,
    scope_code: &'a str,
}

impl<'a> UserProfileRequest<'a> {
    pub(crate) fn new(authorization: String, scope_code: &'a str) -> Result<Self, RequestError> {
        Ok(Self { authorization, scope_code: require_non_empty("scopeCode", scope_code)? })
    }
}

impl NoBodyHTTPRequestType for UserProfileRequest<'_> {}

impl HTTPRequestType for UserProfileRequest<'_> {
    fn endpoint(&self) -> &'static str { "/v2/user" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
    fn header_params(&self) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(PROTOCOL_JSON));
        insert_header(&mut headers, "data", self.scope_code)?;
        insert_header(&mut headers, "verification_type", VERIFICATION_TYPE)?;
        headers.insert(AUTHORIZATION, header_value("Authorization", &self.authorization)?);
        Ok(headers)
    }
    fn query_params(&self) -> Vec<(String, String)> {
        vec![("fetch_strategy".to_string(), FETCH_STRATEGY.to_string())]
    }
}
