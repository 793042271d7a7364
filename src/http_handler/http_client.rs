use super::common::HTTPError;
use super::http_config::HttpConfig;
use super::http_request::request_common::{
    CLIENT_NAME_HEADER, CLIENT_REQ_ID_HEADER, RequestDescriptor, RequestError, RequestOptions,
    header_value,
};
use super::http_response::response_common::{ResponseError, ResponsePayload, unwrap_return_code};
use crate::logger::{ClientLogger, TracingLogger, redact_json};
use reqwest::header::HeaderName;
use std::sync::Arc;
use std::time::Duration;

/// Fixed identity a specific client contributes when it wraps an [`HTTPClient`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClientIdentity {
    pub(crate) name: &'static str,
    pub(crate) timeout: Duration,
    pub(crate) log_tag: &'static str,
}

pub(crate) const BASE_IDENTITY: ClientIdentity = ClientIdentity {
    name: "BASE-CLIENT",
    timeout: Duration::from_secs(20),
    log_tag: "[clients/base]",
};

/// A wrapper around `reqwest::Client` that builds and executes requests
/// against a single base URL.
///
/// All specific API clients hold one of these and route every call through
/// [`HTTPClient::invoke`], which injects the request id and client name headers
/// and logs failures before handing them back.
#[derive(Debug)]
pub struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: String,
    /// Timeout applied to requests that do not carry their own.
    timeout: Duration,
    client_name: String,
    log_tag: String,
    logger: Arc<dyn ClientLogger>,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` logging through `tracing`.
    ///
    /// Without overrides in `config` the client is named `BASE-CLIENT` and uses a
    /// 20 second timeout.
    ///
    /// # Errors
    /// Fails with an invalid-argument error when the base URL is empty.
    pub fn new(config: HttpConfig) -> Result<HTTPClient, HTTPError> {
        Self::with_logger(config, Arc::new(TracingLogger))
    }

    /// Like [`HTTPClient::new`], logging through `logger`.
    ///
    /// # Errors
    /// Fails with an invalid-argument error when the base URL is empty.
    pub fn with_logger(
        config: HttpConfig,
        logger: Arc<dyn ClientLogger>,
    ) -> Result<HTTPClient, HTTPError> {
        Self::from_identity(config, BASE_IDENTITY, logger)
    }

    pub(crate) fn from_identity(
        config: HttpConfig,
        identity: ClientIdentity,
        logger: Arc<dyn ClientLogger>,
    ) -> Result<HTTPClient, HTTPError> {
        let log_tag = config.log_tag.unwrap_or_else(|| identity.log_tag.to_string());
        if config.base_url.trim().is_empty() {
            let err = RequestError::InvalidArgument { field: "endpoint" };
            logger.debug(&log_tag, &format!("Error : {err}"));
            return Err(err.into());
        }
        let client = reqwest::Client::builder().build().map_err(ResponseError::Transport)?;
        Ok(HTTPClient {
            client,
            base_url: config.base_url,
            timeout: config.timeout.unwrap_or(identity.timeout),
            client_name: config.client_name.unwrap_or_else(|| identity.name.to_string()),
            log_tag,
            logger,
        })
    }

    /// Returns the base URL that the client was initialized with.
    pub fn url(&self) -> &str { self.base_url.as_str() }
    /// Returns the timeout applied to requests that do not set their own.
    pub fn timeout(&self) -> Duration { self.timeout }
    /// Returns the display name, as configured (not lower-cased).
    pub fn client_name(&self) -> &str { self.client_name.as_str() }
    pub fn log_tag(&self) -> &str { self.log_tag.as_str() }

    /// Assembles the request for `path`.
    ///
    /// Caller headers are kept, except that the request id and client name headers
    /// are always set here.
    ///
    /// # Errors
    /// Fails when `path` is empty or `options` carries no method.
    pub fn build_request(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<RequestDescriptor, RequestError> {
        if path.trim().is_empty() {
            return Err(self.reject(RequestError::InvalidArgument { field: "API path" }));
        }
        let Some(method) = options.method else {
            return Err(self.reject(RequestError::InvalidArgument { field: "HTTP method" }));
        };

        let mut headers = options.headers.clone();
        let request_id = uuid::Uuid::new_v4().to_string();
        headers.insert(
            HeaderName::from_static(CLIENT_REQ_ID_HEADER),
            header_value(CLIENT_REQ_ID_HEADER, &request_id)?,
        );
        headers.insert(
            HeaderName::from_static(CLIENT_NAME_HEADER),
            header_value(CLIENT_NAME_HEADER, &self.client_name.to_lowercase())?,
        );

        Ok(RequestDescriptor {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body: options.body.clone(),
            form: options.form.clone(),
            query: options.query.clone(),
            timeout: options.timeout.unwrap_or(self.timeout),
            resolve_with_full_response: options.resolve_with_full_response,
            simple: options.simple,
        })
    }

    /// Performs the call described by `descriptor`.
    ///
    /// # Errors
    /// Timeouts, transport failures and, for simple requests, non-2xx statuses.
    pub async fn execute(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<ResponsePayload, ResponseError> {
        self.logger
            .debug(&self.log_tag, &format!("Going to hit HTTP request with options : {descriptor:?}"));

        let mut request = self
            .client
            .request(descriptor.method.into(), &descriptor.url)
            .headers(descriptor.headers.clone())
            .timeout(descriptor.timeout);
        if let Some(query) = &descriptor.query {
            request = request.query(query);
        }
        if let Some(form) = &descriptor.form {
            request = request.form(form);
        }
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        let result = match request.send().await {
            Ok(response) => {
                unwrap_return_code(
                    response,
                    descriptor.timeout,
                    descriptor.resolve_with_full_response,
                    descriptor.simple,
                )
                .await
            }
            Err(err) => Err(ResponseError::from_transport(err, descriptor.timeout)),
        };

        match &result {
            Ok(payload) => self.logger.debug(
                &self.log_tag,
                &format!("Success Response Body : {}", redact_json(payload.body())),
            ),
            Err(err) => self.logger.debug(
                &self.log_tag,
                &format!("Error occurred while hitting HTTP request {} : {err}", descriptor.url),
            ),
        }
        result
    }

    /// Builds and executes a request for `path`, logging any failure before returning it.
    ///
    /// # Errors
    /// Everything [`HTTPClient::build_request`] and [`HTTPClient::execute`] can fail with.
    pub async fn invoke(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponsePayload, HTTPError> {
        let result = match self.build_request(path, &options) {
            Ok(descriptor) => self.execute(&descriptor).await.map_err(HTTPError::from),
            Err(err) => Err(err.into()),
        };
        if let Err(err) = &result {
            self.logger.error(
                &self.log_tag,
                &format!(
                    "Error occurred while calling API : {path} for client : {}",
                    self.client_name
                ),
            );
            self.logger.error(&self.log_tag, &format!("HTTP Options : {options:?}"));
            self.logger.error(&self.log_tag, &format!("Error : {err}"));
        }
        result
    }

    /// Traces the outcome of a named client operation.
    pub(crate) fn log_outcome(
        &self,
        operation: &str,
        result: &Result<serde_json::Value, HTTPError>,
    ) {
        match result {
            Ok(body) => self
                .logger
                .debug(&self.log_tag, &format!("{operation} Response : {}", redact_json(body))),
            Err(err) => self
                .logger
                .log(&self.log_tag, &format!("Error occurred during {operation} : {err}")),
        }
    }

    fn reject(&self, err: RequestError) -> RequestError {
        self.logger.debug(&self.log_tag, &format!("Error : {err}"));
        err
    }
}
