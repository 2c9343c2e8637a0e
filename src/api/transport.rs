//! HTTP transport for the Jira REST API.
//!
//! Sends one authenticated request per call and decodes the JSON body.
//! Non-2xx responses become [`ApiError::Http`] carrying the status and the
//! server's error payload. Nothing is retried.

use std::borrow::Cow;
use std::fmt::Display;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, ErrorDetails, Result};
use crate::config::{ClientConfig, ConfigError};

/// REST API root a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiBase {
    /// The core platform API, `/rest/api/2`.
    Core,
    /// The Jira Software agile API, `/rest/agile/1.0`.
    Agile,
}

impl ApiBase {
    /// The path prefix appended to the instance base URL.
    pub fn prefix(self) -> &'static str {
        match self {
            ApiBase::Core => "/rest/api/2",
            ApiBase::Agile => "/rest/agile/1.0",
        }
    }
}

/// Query parameters for a request, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(&'static str, String)>);

impl Query {
    /// An empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    /// Append a parameter only when a value is present.
    pub fn with_opt<V: Display>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Look up the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The parameters as key/value pairs.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    /// Whether no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Percent-encode a single path segment such as an issue key.
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// An authenticated HTTP transport bound to one Jira instance.
#[derive(Debug, Clone)]
pub struct Transport {
    /// The HTTP client.
    client: Client,
    /// The base URL for the Jira instance, without trailing slash.
    base_url: String,
    /// Bearer credentials.
    auth: Auth,
}

impl Transport {
    /// Create a transport from a connection configuration.
    ///
    /// No network activity happens here.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the configuration is invalid and
    /// `ApiError::Network` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let auth = Auth::bearer(config.token())?;
        let client = Self::build_http_client(config)?;
        let base_url = normalize_base_url(config.base_url());
        Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Build the HTTP client with the configured timeout and extra headers.
    fn build_http_client(config: &ClientConfig) -> Result<Client> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.headers() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                ConfigError::ValidationError(format!("invalid header name '{}'", name))
            })?;
            if name == header::AUTHORIZATION || name == header::CONTENT_TYPE {
                warn!(header = %name, "Ignoring override of a transport-managed header");
                continue;
            }
            let value = HeaderValue::from_str(value).map_err(|_| {
                ConfigError::ValidationError(format!("invalid value for header '{}'", name))
            })?;
            headers.insert(name, value);
        }

        Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(ApiError::Network)
    }

    /// The normalized instance base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path` under the given API root.
    pub fn url(&self, base: ApiBase, path: &str) -> String {
        format!("{}{}{}", self.base_url, base.prefix(), path)
    }

    /// Perform a GET request and decode the JSON response.
    #[instrument(skip(self, query))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        base: ApiBase,
        path: &str,
        query: &Query,
    ) -> Result<T> {
        let url = self.url(base, path);
        debug!(url = %url, params = ?query.pairs(), "GET");

        let request = self.client.get(&url).query(query.pairs());
        self.send(request).await
    }

    /// Perform a POST request with a JSON body and decode the JSON response.
    #[instrument(skip(self, body))]
    pub async fn post<B, T>(&self, base: ApiBase, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(base, path);
        debug!(url = %url, "POST");

        let request = self.client.post(&url).json(body);
        self.send(request).await
    }

    /// Attach authentication headers, send, and handle the response.
    ///
    /// `Content-Type` is left to `RequestBuilder::json`; GETs carry no body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header(header::AUTHORIZATION, self.auth.header_value().clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an error from an HTTP response, keeping Jira's error payload.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        ApiError::from_status(status, ErrorDetails::parse(url, body))
    }
}

/// Normalize the base URL by removing trailing slashes.
///
/// Plain HTTP is allowed but warned about unless it targets localhost.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Transport {
        Transport::new(&ClientConfig::new("https://jira.example.com/", "t")).unwrap()
    }

    #[test]
    fn test_new_rejects_unparseable_url() {
        let config = ClientConfig::new("https://jira example.com", "t");
        let err = Transport::new(&config).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        assert!(err.to_string().contains("jira example.com"));
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://jira.example.com/"),
            "https://jira.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_path() {
        assert_eq!(
            normalize_base_url("https://example.com/jira/"),
            "https://example.com/jira"
        );
    }

    #[test]
    fn test_url_per_api_base() {
        let transport = transport();
        assert_eq!(
            transport.url(ApiBase::Core, "/myself"),
            "https://jira.example.com/rest/api/2/myself"
        );
        assert_eq!(
            transport.url(ApiBase::Agile, "/board/7"),
            "https://jira.example.com/rest/agile/1.0/board/7"
        );
    }

    #[test]
    fn test_new_fails_fast_on_bad_config() {
        let err = Transport::new(&ClientConfig::new("", "t")).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        let err = Transport::new(&ClientConfig::new("https://jira.example.com", "")).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_new_rejects_invalid_header_name() {
        let config =
            ClientConfig::new("https://jira.example.com", "t").with_header("bad header", "v");
        assert!(matches!(Transport::new(&config), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_query_builder() {
        let query = Query::new()
            .with("startAt", 0)
            .with_opt("state", None::<&str>)
            .with_opt("name", Some("Team"))
            .with("validateQuery", true);

        assert_eq!(
            query.pairs(),
            &[
                ("startAt", "0".to_string()),
                ("name", "Team".to_string()),
                ("validateQuery", "true".to_string()),
            ]
        );
        assert_eq!(query.get("name"), Some("Team"));
        assert_eq!(query.get("state"), None);
        assert!(Query::new().is_empty());
    }

    #[test]
    fn test_segment_encodes_reserved_characters() {
        assert_eq!(segment("PROJ-123"), "PROJ-123");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_error_from_response_keeps_payload() {
        let err = Transport::error_from_response(
            StatusCode::NOT_FOUND,
            "https://jira/rest/api/2/issue/X-1",
            r#"{"errorMessages":["Issue Does Not Exist"],"errors":{}}"#,
        );
        assert!(err.is_not_found());
        assert_eq!(
            err.details().unwrap().error_messages,
            vec!["Issue Does Not Exist".to_string()]
        );
    }
}
