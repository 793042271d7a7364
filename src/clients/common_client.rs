use super::credentials::Credentials;
use crate::http_handler::common::HTTPError;
use crate::http_handler::http_client::{ClientIdentity, HTTPClient};
use crate::http_handler::http_config::HttpConfig;
use crate::http_handler::http_request::partner_notification_post::{
    PartnerNotification, PartnerNotificationRequest,
};
use crate::http_handler::http_request::partner_open_id_get::PartnerOpenIdRequest;
use crate::http_handler::http_request::request_common::{
    JSONBodyHTTPRequestType, NoBodyHTTPRequestType,
};
use crate::logger::{ClientLogger, TracingLogger};
use std::sync::Arc;
use std::time::Duration;

const COMMON_IDENTITY: ClientIdentity = ClientIdentity {
    name: "MINIAPPS-COMMON-CLIENT",
    timeout: Duration::from_secs(5),
    log_tag: "[clients/common]",
};

/// Client for the partner open id and partner notification APIs.
#[derive(Debug)]
pub struct CommonClient {
    http: HTTPClient,
    credentials: Credentials,
}

impl CommonClient {
    /// Creates a client identified by the `clientId` received on onboarding.
    ///
    /// # Errors
    /// Fails when the base URL or the client id is empty.
    pub fn new(credentials: Credentials, config: HttpConfig) -> Result<Self, HTTPError> {
        Self::with_logger(credentials, config, Arc::new(TracingLogger))
    }

    /// # Errors
    /// Fails when the base URL or the client id is empty.
    pub fn with_logger(
        credentials: Credentials,
        config: HttpConfig,
        logger: Arc<dyn ClientLogger>,
    ) -> Result<Self, HTTPError> {
        let http = HTTPClient::from_identity(config, COMMON_IDENTITY, logger)?;
        credentials.validate_id()?;
        Ok(Self { http, credentials })
    }

    pub fn http(&self) -> &HTTPClient { &self.http }
    pub fn client_id(&self) -> &str { self.credentials.client_id() }

    /// Looks up the partner open id of the user behind `sso_token`.
    ///
    /// # Errors
    /// Fails for an empty token and for any transport or remote failure.
    pub async fn get_partner_open_id(
        &self,
        sso_token: &str,
    ) -> Result<serde_json::Value, HTTPError> {
        let result = match PartnerOpenIdRequest::new(self.credentials.client_id(), sso_token) {
            Ok(request) => request.send_request(&self.http).await,
            Err(err) => Err(err.into()),
        };
        self.http.log_outcome("getPartnerOpenId", &result);
        result
    }

    /// Sends a templated notification to the user identified by `open_id`.
    ///
    /// # Errors
    /// Fails for missing notification fields and for any transport or remote failure.
    pub async fn send_partner_notification(
        &self,
        notification: PartnerNotification,
    ) -> Result<serde_json::Value, HTTPError> {
        let result =
            match PartnerNotificationRequest::new(self.credentials.client_id(), notification) {
                Ok(request) => request.send_request(&self.http).await,
                Err(err) => Err(err.into()),
            };
        self.http.log_outcome("sendPartnerNotification", &result);
        result
    }
}
