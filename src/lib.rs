#![allow(clippy::similar_names, clippy::module_name_repetitions)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
//! Asynchronous client for the miniapps OAuth and partner notification APIs.
//!
//! [`OauthClient`] exchanges authorization codes and fetches user profiles,
//! [`CommonClient`] looks up partner open ids and sends partner notifications.
//! Both are thin wrappers around [`HTTPClient`], which can also be used directly
//! for endpoints this crate does not model.

pub mod clients;
pub mod http_handler;
pub mod logger;

pub use clients::{
    ClientSecret, CommonClient, Credentials, Identifier, NotificationPayload, OauthClient,
    PartnerNotification,
};
pub use http_handler::common::HTTPError;
pub use http_handler::http_client::HTTPClient;
pub use http_handler::http_config::HttpConfig;
pub use http_handler::http_request::request_common::{
    HTTPRequestMethod, RequestDescriptor, RequestError, RequestOptions,
};
pub use http_handler::http_response::response_common::{
    FullResponse, ResponseError, ResponsePayload,
};
pub use logger::{ClientLogger, TracingLogger};
