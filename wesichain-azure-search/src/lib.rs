//! Azure AI Search retriever integration for Wesichain.
//!
//! This crate provides an `AzureAiSearchRetriever` with:
//! - a single-round-trip query against an existing search index,
//! - blocking (`retrieve`) and async (`retrieve_async`) entry points,
//! - `Runnable<String, Vec<Document>>` so it composes with other chain steps.
//!
//! Environment variables read by `AzureAiSearchRetriever::from_env`:
//! - `AZURE_AI_SEARCH_SERVICE_NAME` (service name or full endpoint URL)
//! - `AZURE_AI_SEARCH_INDEX_NAME`
//! - `AZURE_AI_SEARCH_API_KEY` or `AZURE_AI_SEARCH_AD_TOKEN`
//! - `AZURE_AI_SEARCH_URL_SUFFIX` (optional, defaults to `search.windows.net`)

pub mod client;
mod config;
mod error;
pub mod filter;
pub mod mapper;
mod retriever;
mod types;

pub use config::{
    AzureAiSearchRetrieverBuilder, AD_TOKEN_ENV, API_KEY_ENV, DEFAULT_API_VERSION,
    DEFAULT_CONTENT_KEY, DEFAULT_ID_KEY, DEFAULT_URL_SUFFIX, INDEX_NAME_ENV, SERVICE_NAME_ENV,
    URL_SUFFIX_ENV,
};
pub use error::AzureSearchError;
pub use filter::AzureSearchFilter;
pub use retriever::AzureAiSearchRetriever;
pub use types::SearchResponse;
