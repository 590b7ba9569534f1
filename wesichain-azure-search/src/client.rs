use std::fmt;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::types::ErrorEnvelope;
use crate::AzureSearchError;

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    ApiKey(String),
    AdToken(String),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Credential::AdToken(_) => f.write_str("AdToken(<redacted>)"),
        }
    }
}

/// Parameters of a single `GET /indexes/{index}/docs` call.
#[derive(Clone, Debug)]
pub struct DocsQuery<'a> {
    pub index_name: &'a str,
    pub api_version: &'a str,
    pub search: &'a str,
    pub top: Option<usize>,
    pub filter: Option<&'a str>,
}

#[derive(Clone, Debug)]
pub struct AzureSearchHttpClient {
    http: Client,
    endpoint: Url,
    credential: Credential,
}

impl AzureSearchHttpClient {
    pub fn new(endpoint: &str, credential: Credential) -> Result<Self, AzureSearchError> {
        let endpoint = parse_endpoint(endpoint)?;
        match &credential {
            Credential::ApiKey(value) | Credential::AdToken(value) if value.trim().is_empty() => {
                return Err(AzureSearchError::MissingCredential);
            }
            _ => {}
        }

        Ok(Self {
            http: Client::new(),
            endpoint,
            credential,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// A copy of this client with a fresh connection pool, for use on a
    /// runtime other than the one the pooled connections were opened on.
    pub(crate) fn detached(&self) -> Self {
        Self {
            http: Client::new(),
            endpoint: self.endpoint.clone(),
            credential: self.credential.clone(),
        }
    }

    pub fn docs_url(&self, query: &DocsQuery<'_>) -> Result<Url, AzureSearchError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| AzureSearchError::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
                reason: "cannot be used as a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(["indexes", query.index_name, "docs"]);

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("api-version", query.api_version)
                .append_pair("search", query.search);
            if let Some(top) = query.top {
                pairs.append_pair("$top", &top.to_string());
            }
            if let Some(filter) = query.filter {
                pairs.append_pair("$filter", filter);
            }
        }

        Ok(url)
    }

    pub async fn get_docs<Resp>(&self, query: &DocsQuery<'_>) -> Result<Resp, AzureSearchError>
    where
        Resp: DeserializeOwned,
    {
        let url = self.docs_url(query)?;
        let request = self
            .http
            .get(url)
            .header("Content-Type", "application/json");
        let request = match &self.credential {
            Credential::ApiKey(key) => request.header("api-key", key),
            Credential::AdToken(token) => request.bearer_auth(token),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AzureSearchError::HttpStatus {
                status: status.as_u16(),
                message: azure_error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| AzureSearchError::InvalidResponse {
            message: format!("failed to decode search response body: {err}"),
        })
    }
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url, AzureSearchError> {
    let url = Url::parse(endpoint).map_err(|err| AzureSearchError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AzureSearchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("has unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.cannot_be_a_base() {
        return Err(AzureSearchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: "cannot be used as a base URL".to_string(),
        });
    }

    Ok(url)
}

fn azure_error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "unknown azure ai search error".to_string();
    }

    match serde_json::from_str::<ErrorEnvelope>(trimmed) {
        Ok(envelope) => match envelope.error.code {
            Some(code) if !code.is_empty() => format!("{code}: {}", envelope.error.message),
            _ => envelope.error.message,
        },
        Err(_) => trimmed.to_string(),
    }
}
