use std::time::Duration;

use reqwest::Url;
use scanner_core::HeaderField;
use serde::Deserialize;

use crate::{AccessToken, FailureKind, FetchError, MessageMetadata, MessageRef};

pub const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// The only headers requested per message; bodies are never fetched.
pub const METADATA_HEADERS: [&str; 3] = ["Subject", "From", "Date"];

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: GMAIL_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The remote message service: a search endpoint and a per-message
/// metadata endpoint, both authorized with a bearer token.
#[async_trait::async_trait]
pub trait MailApi: Send + Sync {
    /// Lists at most `max_results` messages matching `query`. No matches is
    /// an empty list, not an error.
    async fn search(
        &self,
        token: &AccessToken,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<MessageRef>, FetchError>;

    /// Fetches the Subject/From/Date headers of one message. Any non-2xx
    /// status is an error carrying the response body.
    async fn fetch_metadata(
        &self,
        token: &AccessToken,
        message_id: &str,
    ) -> Result<MessageMetadata, FetchError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageListResponse {
    #[serde(default)]
    messages: Option<Vec<MessageStub>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageStub {
    id: String,
    #[serde(default)]
    thread_id: String,
}

#[derive(Debug, Deserialize)]
struct MessageDetail {
    #[serde(default)]
    id: String,
    #[serde(default)]
    payload: Option<MessagePayload>,
}

#[derive(Debug, Deserialize)]
struct MessagePayload {
    #[serde(default)]
    headers: Vec<WireHeader>,
}

#[derive(Debug, Deserialize)]
struct WireHeader {
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Clone)]
pub struct ReqwestMailApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestMailApi {
    pub fn new(settings: ApiSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn messages_url(&self) -> Result<Url, FetchError> {
        let base = self.settings.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}/messages"))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_text(&self, url: Url, token: &AccessToken) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                body,
            ));
        }

        response.text().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl MailApi for ReqwestMailApi {
    async fn search(
        &self,
        token: &AccessToken,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<MessageRef>, FetchError> {
        let mut url = self.messages_url()?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("maxResults", &max_results.to_string());

        let body = self.get_text(url, token).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let list: MessageListResponse = serde_json::from_str(&body)
            .map_err(|err| FetchError::new(FailureKind::InvalidResponse, err.to_string()))?;

        Ok(list
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|stub| MessageRef::new(stub.id, stub.thread_id))
            .collect())
    }

    async fn fetch_metadata(
        &self,
        token: &AccessToken,
        message_id: &str,
    ) -> Result<MessageMetadata, FetchError> {
        let mut url = self.messages_url()?;
        url.path_segments_mut()
            .map_err(|_| FetchError::new(FailureKind::InvalidUrl, "base url cannot have a path"))?
            .push(message_id);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", "metadata");
            for header in METADATA_HEADERS {
                query.append_pair("metadataHeaders", header);
            }
        }

        let body = self.get_text(url, token).await?;
        let detail: MessageDetail = serde_json::from_str(&body)
            .map_err(|err| FetchError::new(FailureKind::InvalidResponse, err.to_string()))?;

        let headers = detail
            .payload
            .map(|payload| payload.headers)
            .unwrap_or_default()
            .into_iter()
            .map(|header| HeaderField::new(header.name, header.value))
            .collect();
        let id = if detail.id.is_empty() {
            message_id.to_string()
        } else {
            detail.id
        };

        Ok(MessageMetadata { id, headers })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
