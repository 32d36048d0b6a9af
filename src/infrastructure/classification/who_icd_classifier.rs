use std::sync::LazyLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::application::ports::{ClassifierError, DiseaseClassifier};
use crate::domain::DiseaseCode;
use crate::infrastructure::http::{RetryPolicy, send_with_retry};

const TOKEN_SCOPE: &str = "icdapi_access";
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

#[derive(Debug, Clone)]
pub struct WhoIcdEndpoints {
    pub token_url: String,
    pub search_url: String,
}

/// WHO ICD API lookup authenticated with the OAuth2 client-credentials flow.
/// Access tokens are cached until shortly before they expire.
pub struct WhoIcdClassifier {
    client: Client,
    endpoints: WhoIcdEndpoints,
    client_id: String,
    client_secret: String,
    language: String,
    max_results: usize,
    retry: RetryPolicy,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    destination_entities: Vec<DestinationEntity>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DestinationEntity {
    #[serde(default)]
    the_code: Option<String>,
    #[serde(default)]
    title: String,
}

impl WhoIcdClassifier {
    pub fn new(
        client: Client,
        endpoints: WhoIcdEndpoints,
        client_id: String,
        client_secret: String,
        language: String,
        max_results: usize,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            endpoints,
            client_id,
            client_secret,
            language,
            max_results,
            retry,
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, ClassifierError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let form = [
            ("grant_type", "client_credentials"),
            ("scope", TOKEN_SCOPE),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = send_with_retry(&self.retry, || {
            self.client.post(&self.endpoints.token_url).form(&form)
        })
        .await
        .map_err(|e| ClassifierError::Authentication(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ClassifierError::Authentication(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Authentication(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        tracing::debug!(expires_in = token.expires_in, "Obtained ICD API access token");
        Ok(token.access_token)
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }
}

#[async_trait]
impl DiseaseClassifier for WhoIcdClassifier {
    #[tracing::instrument(skip(self, query), fields(query_chars = query.len()))]
    async fn classify(&self, query: &str) -> Result<Vec<DiseaseCode>, ClassifierError> {
        let token = self.access_token().await?;

        let response = send_with_retry(&self.retry, || {
            self.client
                .get(&self.endpoints.search_url)
                .bearer_auth(&token)
                .header("Accept", "application/json")
                .header("Accept-Language", &self.language)
                .header("API-Version", "v2")
                .query(&[("q", query), ("flatResults", "true")])
        })
        .await
        .map_err(|e| ClassifierError::ApiRequestFailed(e.to_string()))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
            return Err(ClassifierError::Authentication(
                "access token rejected".to_string(),
            ));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        if search.error {
            return Err(ClassifierError::ApiRequestFailed(
                search.error_message.unwrap_or_else(|| "search failed".to_string()),
            ));
        }

        let codes: Vec<DiseaseCode> = search
            .destination_entities
            .into_iter()
            .filter_map(|entity| {
                let code = entity.the_code.filter(|c| !c.trim().is_empty())?;
                Some(DiseaseCode {
                    code,
                    title: HTML_TAG.replace_all(&entity.title, "").trim().to_string(),
                })
            })
            .take(self.max_results)
            .collect();

        tracing::info!(codes = codes.len(), "Classification lookup complete");
        Ok(codes)
    }
}
