use super::credentials::Credentials;
use crate::http_handler::common::HTTPError;
use crate::http_handler::http_client::{ClientIdentity, HTTPClient};
use crate::http_handler::http_config::HttpConfig;
use crate::http_handler::http_request::oauth_token_post::OauthTokenRequest;
use crate::http_handler::http_request::request_common::{
    FormBodyHTTPRequestType, NoBodyHTTPRequestType,
};
use crate::http_handler::http_request::user_profile_get::UserProfileRequest;
use crate::logger::{ClientLogger, TracingLogger};
use std::sync::Arc;
use std::time::Duration;

const OAUTH_IDENTITY: ClientIdentity = ClientIdentity {
    name: "MINIAPPS-OAUTH-CLIENT",
    timeout: Duration::from_secs(5),
    log_tag: "[clients/oauth]",
};

/// Client for the oauth token exchange and user profile APIs.
///
/// Both calls authenticate with a Basic authorization header derived from the
/// client id and secret.
#[derive(Debug)]
pub struct OauthClient {
    http: HTTPClient,
    credentials: Credentials,
}

impl OauthClient {
    /// # Errors
    /// Fails when the base URL, client id or client secret is empty.
    pub fn new(credentials: Credentials, config: HttpConfig) -> Result<Self, HTTPError> {
        Self::with_logger(credentials, config, Arc::new(TracingLogger))
    }

    /// # Errors
    /// Fails when the base URL, client id or client secret is empty.
    pub fn with_logger(
        credentials: Credentials,
        config: HttpConfig,
        logger: Arc<dyn ClientLogger>,
    ) -> Result<Self, HTTPError> {
        let http = HTTPClient::from_identity(config, OAUTH_IDENTITY, logger)?;
        credentials.validate_id()?;
        credentials.validate_secret()?;
        Ok(Self { http, credentials })
    }

    pub fn http(&self) -> &HTTPClient { &self.http }
    pub fn client_id(&self) -> &str { self.credentials.client_id() }

    /// Value of the `Authorization` header sent with every call of this client.
    ///
    /// # Errors
    /// Cannot fail for a constructed client; the secret was validated in `new`.
    pub fn authorization_header(&self) -> Result<String, HTTPError> {
        Ok(self.credentials.basic_authorization()?)
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// `scope` defaults to [`DEFAULT_SCOPE`](crate::http_handler::http_request::oauth_token_post::DEFAULT_SCOPE).
    ///
    /// # Errors
    /// Fails for an empty code and for any transport or remote failure.
    pub async fn oauth_token(
        &self,
        code: &str,
        scope: Option<&str>,
    ) -> Result<serde_json::Value, HTTPError> {
        let result = async {
            let authorization = self.authorization_header()?;
            OauthTokenRequest::new(authorization, self.credentials.client_id(), code, scope)?
                .send_request(&self.http)
                .await
        }
        .await;
        self.http.log_outcome("oauthToken", &result);
        result
    }

    /// Fetches profile, phone number and email of the user behind `scope_code`.
    ///
    /// # Errors
    /// Fails for an empty scope code and for any transport or remote failure.
    pub async fn user_profile(&self, scope_code: &str) -> Result<serde_json::Value, HTTPError> {
        let result = async {
            let authorization = self.authorization_header()?;
            UserProfileRequest::new(authorization, scope_code)?.send_request(&self.http).await
        }
        .await;
        self.http.log_outcome("userProfile", &result);
        result
    }
}
