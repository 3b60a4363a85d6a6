use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use snafu::prelude::*;
use url::Url;

use crate::helpers::client::{UserClient, UserOperation, UserRequest};
use crate::helpers::settings::Settings;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum HttpError {
    // HttpUserClient::new
    #[snafu(display("Invalid proxy URL: {proxy}"))]
    Proxy {
        proxy: String,
        source: reqwest::Error,
    },

    // HttpUserClient::new
    #[snafu(display("Invalid API key, it cannot be sent as an HTTP header"))]
    ApiKey {
        source: header::InvalidHeaderValue,
    },

    // HttpUserClient::new
    #[snafu(display("Failed to build the HTTP client"))]
    Build { source: reqwest::Error },

    // HttpUserClient::url
    #[snafu(display("API URL cannot be used as a base: {url}"))]
    BaseUrl { url: Url },

    // HttpUserClient::get
    #[snafu(display("Request to {url} failed"))]
    Request { url: Url, source: reqwest::Error },

    #[snafu(display("Request to {url} returned {status}: {body}"))]
    Status {
        url: Url,
        status: StatusCode,
        body: String,
    },

    #[snafu(display("Response from {url} is not valid JSON"))]
    Decode { url: Url, source: reqwest::Error },
}

/// A [`UserClient`] talking to the user resources service over HTTP.
///
/// Every operation is a `GET {api_url}/user/{operation}/{id}`, with the
/// optional `count` and `cursor` as query parameters. The JSON body of the
/// response is returned untouched.
#[derive(Clone, Debug)]
pub struct HttpUserClient {
    api_url: Url,
    http: Client,
}

impl HttpUserClient {
    pub fn new(api_url: Url, settings: &Settings) -> Result<Self, HttpError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(key) = &settings.api_key {
            let mut value = header::HeaderValue::from_str(key).context(ApiKeySnafu)?;
            value.set_sensitive(true);
            let mut headers = header::HeaderMap::new();
            headers.insert("x-api-key", value);
            builder = builder.default_headers(headers);
        }

        if let Some(proxy) = &settings.proxy {
            debug!("Using proxy {}", proxy);
            let proxy = reqwest::Proxy::all(proxy).context(ProxySnafu { proxy })?;
            builder = builder.proxy(proxy);
        }

        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_url,
            http: builder.build().context(BuildSnafu)?,
        })
    }

    /// Build the URL of a request, with the id as an escaped path segment.
    pub fn url(&self, request: &UserRequest) -> Result<Url, HttpError> {
        let mut url = self.api_url.clone();

        url.path_segments_mut()
            .map_err(|_| HttpError::BaseUrl {
                url: self.api_url.clone(),
            })?
            .pop_if_empty()
            .push("user")
            .push(request.operation.name())
            .push(&request.id);

        {
            let mut query = url.query_pairs_mut();
            if let Some(count) = request.count {
                query.append_pair("count", &count.to_string());
            }
            if let Some(cursor) = &request.cursor {
                query.append_pair("cursor", cursor);
            }
        }

        // Don't leave a dangling '?' when there are no parameters
        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }

    async fn get(&self, request: UserRequest) -> Result<Value, HttpError> {
        let url = self.url(&request)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .context(RequestSnafu { url: url.clone() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::Status { url, status, body });
        }

        response.json::<Value>().await.context(DecodeSnafu { url })
    }

    async fn page(
        &self,
        operation: UserOperation,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, HttpError> {
        self.get(UserRequest::page(operation, id, count, cursor)).await
    }
}

impl UserClient for HttpUserClient {
    type Error = HttpError;

    async fn details(&self, id: &str) -> Result<Value, HttpError> {
        self.get(UserRequest::details(id)).await
    }

    async fn followers(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, HttpError> {
        self.page(UserOperation::Followers, id, count, cursor).await
    }

    async fn following(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, HttpError> {
        self.page(UserOperation::Following, id, count, cursor).await
    }

    async fn highlights(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, HttpError> {
        self.page(UserOperation::Highlights, id, count, cursor).await
    }

    async fn likes(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, HttpError> {
        self.page(UserOperation::Likes, id, count, cursor).await
    }

    async fn media(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, HttpError> {
        self.page(UserOperation::Media, id, count, cursor).await
    }

    async fn replies(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, HttpError> {
        self.page(UserOperation::Replies, id, count, cursor).await
    }

    async fn subscriptions(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, HttpError> {
        self.page(UserOperation::Subscriptions, id, count, cursor).await
    }

    async fn timeline(
        &self,
        id: &str,
        count: Option<u64>,
        cursor: Option<&str>,
    ) -> Result<Value, HttpError> {
        self.page(UserOperation::Timeline, id, count, cursor).await
    }
}
