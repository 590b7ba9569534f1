use futures::stream::{self, BoxStream, StreamExt};
use tracing::Instrument;
use wesichain_core::{Document, Runnable, StreamEvent, WesichainError};

use crate::client::{AzureSearchHttpClient, DocsQuery};
use crate::config::AzureAiSearchRetrieverBuilder;
use crate::mapper::hits_to_documents;
use crate::types::SearchResponse;
use crate::AzureSearchError;

/// Retriever backed by an Azure AI Search index.
///
/// Each call issues exactly one `GET /indexes/{index}/docs` request and maps
/// the returned hits into [`Document`]s in the order the service ranked them.
/// There is no retry or caching; failures are returned to the caller as-is.
#[derive(Clone, Debug)]
pub struct AzureAiSearchRetriever {
    client: AzureSearchHttpClient,
    index_name: String,
    api_version: String,
    content_key: String,
    id_key: String,
    top_k: Option<usize>,
    filter: Option<String>,
}

impl AzureAiSearchRetriever {
    pub fn builder() -> AzureAiSearchRetrieverBuilder {
        AzureAiSearchRetrieverBuilder::new()
    }

    /// Builds a retriever purely from the `AZURE_AI_SEARCH_*` variables.
    pub fn from_env() -> Result<Self, AzureSearchError> {
        Self::builder().with_env().build()
    }

    pub(crate) fn new(
        client: AzureSearchHttpClient,
        index_name: String,
        api_version: String,
        content_key: String,
        id_key: String,
        top_k: Option<usize>,
        filter: Option<String>,
    ) -> Self {
        Self {
            client,
            index_name,
            api_version,
            content_key,
            id_key,
            top_k,
            filter,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint().as_str()
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn content_key(&self) -> &str {
        &self.content_key
    }

    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    pub fn top_k(&self) -> Option<usize> {
        self.top_k
    }

    /// The OData `$filter` sent with every query.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub async fn retrieve_async(&self, query: &str) -> Result<Vec<Document>, AzureSearchError> {
        self.search(&self.client, query, self.top_k).await
    }

    /// Like [`retrieve_async`](Self::retrieve_async) with a per-call limit.
    /// `None` falls back to the configured `top_k`.
    pub async fn retrieve_async_with_top_k(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<Document>, AzureSearchError> {
        let top_k = effective_top_k(top_k, self.top_k)?;
        self.search(&self.client, query, top_k).await
    }

    /// Blocking retrieval. Drives the request on a private current-thread
    /// runtime. Inside an async context (e.g. a `spawn_blocking` task) that
    /// runtime runs on a scoped helper thread, which blocks the caller until
    /// it finishes.
    pub fn retrieve(&self, query: &str) -> Result<Vec<Document>, AzureSearchError> {
        self.retrieve_with_top_k(query, None)
    }

    pub fn retrieve_with_top_k(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<Document>, AzureSearchError> {
        let top_k = effective_top_k(top_k, self.top_k)?;
        if tokio::runtime::Handle::try_current().is_err() {
            return self.block_on_search(query, top_k);
        }

        std::thread::scope(|scope| {
            scope
                .spawn(|| self.block_on_search(query, top_k))
                .join()
                .unwrap_or_else(|_| {
                    Err(AzureSearchError::Runtime(
                        "blocking retrieval thread panicked".to_string(),
                    ))
                })
        })
    }

    fn block_on_search(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<Document>, AzureSearchError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| AzureSearchError::Runtime(err.to_string()))?;
        // Pooled connections belong to the runtime that opened them.
        let client = self.client.detached();
        runtime.block_on(self.search(&client, query, top_k))
    }

    async fn search(
        &self,
        client: &AzureSearchHttpClient,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<Document>, AzureSearchError> {
        let span = tracing::info_span!(
            "azure_search_query",
            index = %self.index_name,
            top_k = ?top_k,
            filtered = self.filter.is_some(),
        );

        async move {
            let request = DocsQuery {
                index_name: &self.index_name,
                api_version: &self.api_version,
                search: query,
                top: top_k,
                filter: self.filter.as_deref(),
            };
            let response: SearchResponse = client.get_docs(&request).await?;

            let mut hits = response.value;
            tracing::debug!(hits = hits.len(), "azure ai search returned hits");
            if let Some(limit) = top_k {
                if hits.len() > limit {
                    tracing::warn!(
                        hits = hits.len(),
                        top_k = limit,
                        "azure ai search ignored $top; truncating hits"
                    );
                    hits.truncate(limit);
                }
            }

            hits_to_documents(hits, &self.content_key, &self.id_key)
        }
        .instrument(span)
        .await
    }
}

fn effective_top_k(
    requested: Option<usize>,
    configured: Option<usize>,
) -> Result<Option<usize>, AzureSearchError> {
    match requested {
        Some(0) => Err(AzureSearchError::InvalidTopK),
        Some(k) => Ok(Some(k)),
        None => Ok(configured),
    }
}

#[async_trait::async_trait]
impl Runnable<String, Vec<Document>> for AzureAiSearchRetriever {
    async fn invoke(&self, input: String) -> Result<Vec<Document>, WesichainError> {
        Ok(self.retrieve_async(&input).await?)
    }

    fn stream(&self, input: String) -> BoxStream<'_, Result<StreamEvent, WesichainError>> {
        stream::once(async move { self.retrieve_async(&input).await })
            .flat_map(|result| match result {
                Ok(documents) => {
                    let mut events = Vec::with_capacity(documents.len() + 1);
                    events.push(Ok(StreamEvent::Metadata {
                        key: "hit_count".to_string(),
                        value: documents.len().into(),
                    }));
                    events.extend(
                        documents
                            .into_iter()
                            .map(|doc| Ok(StreamEvent::Document(doc))),
                    );
                    stream::iter(events)
                }
                Err(err) => stream::iter(vec![Err(WesichainError::from(err))]),
            })
            .boxed()
    }
}
