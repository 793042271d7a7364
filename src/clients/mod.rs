pub mod common_client;
pub mod credentials;
pub mod oauth_client;

pub use crate::http_handler::http_request::partner_notification_post::{
    Identifier, NotificationPayload, PartnerNotification,
};
pub use common_client::CommonClient;
pub use credentials::{ClientSecret, Credentials};
pub use oauth_client::OauthClient;
