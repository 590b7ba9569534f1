use std::fmt;

use crate::client::{AzureSearchHttpClient, Credential};
use crate::filter::{to_odata_filter, AzureSearchFilter};
use crate::{AzureAiSearchRetriever, AzureSearchError};

pub const DEFAULT_API_VERSION: &str = "2023-11-01";
pub const DEFAULT_URL_SUFFIX: &str = "search.windows.net";
pub const DEFAULT_CONTENT_KEY: &str = "content";
pub const DEFAULT_ID_KEY: &str = "id";

pub const SERVICE_NAME_ENV: &str = "AZURE_AI_SEARCH_SERVICE_NAME";
pub const INDEX_NAME_ENV: &str = "AZURE_AI_SEARCH_INDEX_NAME";
pub const API_KEY_ENV: &str = "AZURE_AI_SEARCH_API_KEY";
pub const AD_TOKEN_ENV: &str = "AZURE_AI_SEARCH_AD_TOKEN";
pub const URL_SUFFIX_ENV: &str = "AZURE_AI_SEARCH_URL_SUFFIX";

#[derive(Default, Clone)]
pub struct AzureAiSearchRetrieverBuilder {
    service_name: Option<String>,
    url_suffix: Option<String>,
    index_name: Option<String>,
    api_key: Option<String>,
    azure_ad_token: Option<String>,
    api_version: Option<String>,
    content_key: Option<String>,
    id_key: Option<String>,
    top_k: Option<usize>,
    filter: Option<AzureSearchFilter>,
}

impl fmt::Debug for AzureAiSearchRetrieverBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| if value.is_some() { "<redacted>" } else { "<none>" };

        f.debug_struct("AzureAiSearchRetrieverBuilder")
            .field("service_name", &self.service_name)
            .field("url_suffix", &self.url_suffix)
            .field("index_name", &self.index_name)
            .field("api_key", &redact(&self.api_key))
            .field("azure_ad_token", &redact(&self.azure_ad_token))
            .field("api_version", &self.api_version)
            .field("content_key", &self.content_key)
            .field("id_key", &self.id_key)
            .field("top_k", &self.top_k)
            .field("filter", &self.filter)
            .finish()
    }
}

impl AzureAiSearchRetrieverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Either a bare service name (`my-search`) or a full endpoint URL.
    pub fn service_name(mut self, value: impl Into<String>) -> Self {
        self.service_name = non_blank(value.into());
        self
    }

    pub fn url_suffix(mut self, value: impl Into<String>) -> Self {
        self.url_suffix = non_blank(value.into());
        self
    }

    pub fn index_name(mut self, value: impl Into<String>) -> Self {
        self.index_name = Some(value.into());
        self
    }

    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.api_key = non_blank(value.into());
        self
    }

    pub fn azure_ad_token(mut self, value: impl Into<String>) -> Self {
        self.azure_ad_token = non_blank(value.into());
        self
    }

    pub fn api_version(mut self, value: impl Into<String>) -> Self {
        self.api_version = non_blank(value.into());
        self
    }

    pub fn content_key(mut self, value: impl Into<String>) -> Self {
        self.content_key = non_blank(value.into());
        self
    }

    pub fn id_key(mut self, value: impl Into<String>) -> Self {
        self.id_key = non_blank(value.into());
        self
    }

    pub fn top_k(mut self, value: usize) -> Self {
        self.top_k = Some(value);
        self
    }

    pub fn filter(mut self, value: impl Into<AzureSearchFilter>) -> Self {
        self.filter = Some(value.into());
        self
    }

    pub fn raw_filter(mut self, value: impl Into<String>) -> Self {
        self.filter = Some(AzureSearchFilter::Raw(value.into()));
        self
    }

    /// Fills unset connection fields from the `AZURE_AI_SEARCH_*` variables.
    pub fn with_env(mut self) -> Self {
        fill_from_env(&mut self.service_name, SERVICE_NAME_ENV);
        fill_from_env(&mut self.index_name, INDEX_NAME_ENV);
        fill_from_env(&mut self.api_key, API_KEY_ENV);
        fill_from_env(&mut self.azure_ad_token, AD_TOKEN_ENV);
        fill_from_env(&mut self.url_suffix, URL_SUFFIX_ENV);
        self
    }

    pub fn build(self) -> Result<AzureAiSearchRetriever, AzureSearchError> {
        let service_name = self
            .service_name
            .ok_or(AzureSearchError::MissingServiceName)?;

        let index_name = self
            .index_name
            .ok_or(AzureSearchError::MissingIndexName)?
            .trim()
            .to_string();
        if index_name.is_empty() {
            return Err(AzureSearchError::EmptyIndexName);
        }

        let credential = match (self.api_key, self.azure_ad_token) {
            (Some(key), _) => Credential::ApiKey(key),
            (None, Some(token)) => Credential::AdToken(token),
            (None, None) => return Err(AzureSearchError::MissingCredential),
        };

        if self.top_k == Some(0) {
            return Err(AzureSearchError::InvalidTopK);
        }

        let filter = self.filter.as_ref().map(to_odata_filter).transpose()?;

        let url_suffix = self.url_suffix.as_deref().unwrap_or(DEFAULT_URL_SUFFIX);
        let endpoint = resolve_endpoint(&service_name, url_suffix);
        let client = AzureSearchHttpClient::new(&endpoint, credential)?;

        if client.endpoint().scheme() == "http" {
            tracing::warn!(
                endpoint = %client.endpoint(),
                "azure ai search endpoint is not using TLS; credentials are sent unencrypted"
            );
        }

        Ok(AzureAiSearchRetriever::new(
            client,
            index_name,
            self.api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            self.content_key
                .unwrap_or_else(|| DEFAULT_CONTENT_KEY.to_string()),
            self.id_key.unwrap_or_else(|| DEFAULT_ID_KEY.to_string()),
            self.top_k,
            filter,
        ))
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn fill_from_env(slot: &mut Option<String>, var_name: &str) {
    if slot.is_none() {
        *slot = std::env::var(var_name).ok().and_then(non_blank);
    }
}

fn resolve_endpoint(service_name: &str, url_suffix: &str) -> String {
    if service_name.starts_with("https://") || service_name.starts_with("http://") {
        service_name.trim_end_matches('/').to_string()
    } else {
        format!("https://{service_name}.{}", url_suffix.trim_matches('.'))
    }
}
