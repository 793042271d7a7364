use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType, PROTOCOL_JSON, RequestError,
    insert_header, require_non_empty,
};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

/// Order and merchant ids are numeric in some integrations and alphanumeric in others;
/// either form is sent as given.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(u64),
    Text(String),
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self { Identifier::Number(value) }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self { Identifier::Text(value.to_string()) }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self { Identifier::Text(value) }
}

/// Content shown to the user by the notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationPayload {
    pub name: String,
    pub vertical: String,
    pub url: String,
}

/// Everything needed to send a partner notification.
#[derive(Clone, PartialEq, Eq)]
pub struct PartnerNotification {
    /// Token obtained from the oauth token exchange; sent as a header only.
    pub access_token: String,
    /// Merchant id received on onboarding.
    pub mid: Identifier,
    /// Open id returned by the partner open id lookup.
    pub open_id: String,
    pub order_id: Identifier,
    /// Notification template name received on onboarding.
    pub template_name: String,
    pub notification_payload: NotificationPayload,
}

impl std::fmt::Debug for PartnerNotification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartnerNotification")
            .field("access_token", &crate::logger::REDACTED)
            .field("mid", &self.mid)
            .field("open_id", &self.open_id)
            .field("order_id", &self.order_id)
            .field("template_name", &self.template_name)
            .field("notification_payload", &self.notification_payload)
            .finish()
    }
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PartnerNotificationBody {
    client_id: String,
    open_id: String,
    order_id: Identifier,
    template_name: String,
    mid: Identifier,
    notification_payload: NotificationPayload,
}

/// Request type for the partner notification endpoint.
pub(crate) struct PartnerNotificationRequest {
    access_token: String,
    body: PartnerNotificationBody,
}

fn require_identifier(field: &'static str, value: &Identifier) -> Result<(), RequestError> {
    match value {
        Identifier::Text(text) => require_non_empty(field, text).map(|_| ()),
        Identifier::Number(_) => Ok(()),
    }
}

impl PartnerNotificationRequest {
    pub(crate) fn new(
        client_id: &str,
        notification: PartnerNotification,
    ) -> Result<Self, RequestError> {
        require_non_empty("access_token", &notification.access_token)?;
        require_non_empty("openId", &notification.open_id)?;
        require_non_empty("templateName", &notification.template_name)?;
        require_identifier("orderId", &notification.order_id)?;
        require_identifier("mid", &notification.mid)?;

        let PartnerNotification {
            access_token,
            mid,
            open_id,
            order_id,
            template_name,
            notification_payload,
        } = notification;
        Ok(Self {
            access_token,
            body: PartnerNotificationBody {
                client_id: client_id.to_string(),
                open_id,
                order_id,
                template_name,
                mid,
                notification_payload,
            },
        })
    }
}

impl JSONBodyHTTPRequestType for PartnerNotificationRequest {
    type Body = PartnerNotificationBody;
    fn body(&self) -> &Self::Body { &self.body }
}

impl HTTPRequestType for PartnerNotificationRequest {
    fn endpoint(&self) -> &'static str { "/h5/notify/v1/sendPartnerNotification" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
    fn header_params(&self) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(PROTOCOL_JSON));
        insert_header(&mut headers, "access_token", &self.access_token)?;
        Ok(headers)
    }
}
