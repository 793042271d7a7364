pub mod oauth_token_post;
pub mod partner_notification_post;
pub mod partner_open_id_get;
pub mod request_common;
pub mod user_profile_get;
