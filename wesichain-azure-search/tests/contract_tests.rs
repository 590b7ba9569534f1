//! Live checks against a real Azure AI Search index.
//!
//! Skipped unless `RUN_AZURE_SEARCH_CONTRACT=1`; the connection settings come
//! from the usual `AZURE_AI_SEARCH_*` variables.

use wesichain_azure_search::AzureAiSearchRetriever;

fn contract_enabled() -> bool {
    std::env::var("RUN_AZURE_SEARCH_CONTRACT").ok().as_deref() == Some("1")
}

#[test]
fn contract_blocking_retrieve() {
    if !contract_enabled() {
        return;
    }

    let retriever = AzureAiSearchRetriever::from_env().expect("retriever should build");
    let documents = retriever
        .retrieve("what is langchain")
        .expect("retrieve should succeed");
    for doc in &documents {
        assert!(!doc.content.is_empty());
    }

    let retriever = AzureAiSearchRetriever::builder()
        .with_env()
        .top_k(1)
        .build()
        .expect("retriever should build");
    let documents = retriever
        .retrieve("what is langchain")
        .expect("retrieve should succeed");
    assert!(documents.len() <= 1);
}

#[tokio::test]
async fn contract_async_retrieve() {
    if !contract_enabled() {
        return;
    }

    let retriever = AzureAiSearchRetriever::from_env().expect("retriever should build");
    let documents = retriever
        .retrieve_async("what is langchain")
        .await
        .expect("retrieve should succeed");
    for doc in &documents {
        assert!(!doc.content.is_empty());
    }
}
