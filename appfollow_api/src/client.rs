//! HTTP client for the AppFollow API.

use serde_json::Value;
use url::Url;

use crate::{
    config::ClientConfig,
    errors::is_truthy,
    params::Params,
    signer::Credentials,
    ApiError, Error,
};

/// HTTP client for the AppFollow API.
///
/// Every request is a signed GET. The client owns one `reqwest::Client` for
/// its whole lifetime, so connections are reused across calls. Clones share
/// that session.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    credentials: Credentials,
    /// Base URL for the API. Defaults to `https://api.appfollow.io`.
    base_api_url: String,
}

impl Client {
    /// Creates a client for the production API with a fresh HTTP session.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::with_config(credentials, &ClientConfig::default())
    }

    pub fn with_config(credentials: Credentials, config: &ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_http_client()?,
            credentials,
            base_api_url: config.base_url.clone(),
        })
    }

    /// Creates a client on a caller-supplied HTTP session, e.g. one built
    /// with custom timeouts or a proxy.
    pub fn with_http_client(credentials: Credentials, http: reqwest::Client) -> Self {
        Self {
            http,
            credentials,
            base_api_url: ClientConfig::default().base_url,
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Result<Self, Error> {
        Self::with_config(credentials, &ClientConfig::default().with_base_url(base_url))
    }

    /// Points an existing client at another API root.
    pub fn with_api_url(mut self, base_url: &str) -> Self {
        self.base_api_url = base_url.to_string();
        self
    }

    /// Builds credentials and transport settings from `APPFOLLOW_*` variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::with_config(Credentials::from_env()?, &ClientConfig::from_env())
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Authenticates `params` for `path` and returns the query string pairs
    /// in key order.
    ///
    /// Injects `cid`, renames `from_` to `from`, then signs everything and
    /// appends `sign`.
    pub fn signed_query(&self, path: &str, mut params: Params) -> Vec<(String, String)> {
        params.insert("cid", self.credentials.client_id());
        if let Some(from) = params.remove("from_") {
            params.insert("from", from);
        }
        params.remove("sign");
        let sign = self.credentials.sign(path, &params);
        params.insert("sign", sign);
        params.to_query_pairs()
    }

    fn get_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, Error> {
        let mut url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::Config(format!("invalid URL {}{}: {}", self.base_api_url, path, e))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Issues a signed GET to `path` and returns the decoded JSON body.
    ///
    /// 502 and 504 become [`ApiError`]s, any other non-2xx status becomes
    /// [`Error::HttpStatus`]. A 2xx body that is an object with a non-empty
    /// `error` member is returned as [`Error::Api`].
    pub async fn call(&self, path: &str, params: Params) -> Result<Value, Error> {
        let query = self.signed_query(path, params);
        let url = self.get_url(path, &query)?;
        tracing::debug!("GET {}", path);

        let resp = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to get {}: {}", path, e);
            Error::Network(e)
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::BAD_GATEWAY {
            tracing::warn!("{} returned 502 Bad Gateway", path);
            return Err(ApiError::bad_gateway().into());
        }
        if status == reqwest::StatusCode::GATEWAY_TIMEOUT {
            tracing::warn!("{} returned 504 Gateway Timeout", path);
            return Err(ApiError::gateway_timeout().into());
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Network(e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body: snippet,
            });
        }

        let data = serde_json::from_str::<Value>(&body).map_err(|e| {
            tracing::error!("Failed to parse response: {} | body: {}", e, truncate_body(&body));
            Error::Decode(e)
        })?;

        if let Some(err) = data.get("error").filter(|err| is_truthy(err)) {
            let api_error = ApiError::from_error_object(err)?;
            tracing::warn!("{} returned API error: {}", path, api_error);
            return Err(api_error.into());
        }

        Ok(data)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
