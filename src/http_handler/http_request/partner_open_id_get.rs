use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType, PROTOCOL_JSON, RequestError,
    insert_header, require_non_empty,
};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

/// Request type for the partner open id lookup.
pub(crate) struct PartnerOpenIdRequest<'a> {
    client_id: &'a str,
    sso_token: &'a str,
}

impl<'a> PartnerOpenIdRequest<'a> {
    pub(crate) fn new(client_id: &'a str, sso_token: &'a str) -> Result<Self, RequestError> {
        Ok(Self { client_id, sso_token: require_non_empty("sso_token", sso_token)? })
    }
}

impl NoBodyHTTPRequestType for PartnerOpenIdRequest<'_> {}

impl HTTPRequestType for PartnerOpenIdRequest<'_> {
    fn endpoint(&self) -> &'static str { "/h5/auth/v1/partner/getOpenId" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
    fn header_params(&self) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(PROTOCOL_JSON));
        insert_header(&mut headers, "client_id", self.client_id)?;
        insert_header(&mut headers, "sso_token", self.sso_token)?;
        Ok(headers)
    }
}
