use thiserror::Error;
use wesichain_core::WesichainError;

#[derive(Debug, Error)]
pub enum AzureSearchError {
    #[error("invalid configuration: service_name is required")]
    MissingServiceName,
    #[error("invalid configuration: index_name is required")]
    MissingIndexName,
    #[error("invalid configuration: index_name cannot be empty")]
    EmptyIndexName,
    #[error("invalid configuration: an api_key or azure_ad_token is required")]
    MissingCredential,
    #[error("invalid configuration: endpoint '{endpoint}' {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("invalid configuration: top_k must be greater than 0")]
    InvalidTopK,
    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),
    #[error("request to azure ai search failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("azure ai search returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },
    /// Local failure of the blocking path; neither config nor transport.
    #[error("blocking retrieval could not run: {0}")]
    Runtime(String),
    #[error("invalid azure ai search response: {message}")]
    InvalidResponse { message: String },
    #[error("search hit is missing content field '{content_key}'")]
    MissingContentKey { content_key: String },
    #[error("search hit content field '{content_key}' is not a string")]
    InvalidContent { content_key: String },
    #[error("search hit content field '{content_key}' is empty")]
    EmptyContent { content_key: String },
}

impl AzureSearchError {
    /// Errors raised while validating connection parameters or filters,
    /// before any request is sent.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            AzureSearchError::MissingServiceName
                | AzureSearchError::MissingIndexName
                | AzureSearchError::EmptyIndexName
                | AzureSearchError::MissingCredential
                | AzureSearchError::InvalidEndpoint { .. }
                | AzureSearchError::InvalidTopK
                | AzureSearchError::UnsupportedFilter(_)
        )
    }

    /// Service failures: network errors, non-success statuses, and success
    /// responses whose body or hits cannot be turned into documents.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AzureSearchError::Request(_)
                | AzureSearchError::HttpStatus { .. }
                | AzureSearchError::InvalidResponse { .. }
                | AzureSearchError::MissingContentKey { .. }
                | AzureSearchError::InvalidContent { .. }
                | AzureSearchError::EmptyContent { .. }
        )
    }
}

impl From<AzureSearchError> for WesichainError {
    fn from(value: AzureSearchError) -> Self {
        if value.is_config() {
            WesichainError::InvalidConfig(value.to_string())
        } else {
            WesichainError::Retrieval(value.to_string())
        }
    }
}
