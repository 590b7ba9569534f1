use futures::StreamExt;
use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wesichain_azure_search::AzureAiSearchRetriever;
use wesichain_core::{Runnable, StreamEvent, WesichainError};

async fn mounted_retriever(status: u16, body: serde_json::Value) -> (MockServer, AzureAiSearchRetriever) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("search", "what is langchain"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;

    let retriever = AzureAiSearchRetriever::builder()
        .service_name(server.uri())
        .index_name("langchain-docs")
        .api_key("test-key")
        .build()
        .unwrap();
    (server, retriever)
}

#[tokio::test]
async fn invoke_matches_retrieve_async() {
    let (_server, retriever) = mounted_retriever(
        200,
        json!({"value": [{"id": "1", "content": "LangChain is a framework"}]}),
    )
    .await;

    let via_runnable = retriever
        .invoke("what is langchain".to_string())
        .await
        .unwrap();
    let direct = retriever.retrieve_async("what is langchain").await.unwrap();
    assert_eq!(via_runnable, direct);
}

#[tokio::test]
async fn invoke_maps_failures_to_retrieval_errors() {
    let (_server, retriever) =
        mounted_retriever(500, json!({"error": {"message": "boom"}})).await;

    let err = retriever
        .invoke("what is langchain".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, WesichainError::Retrieval(ref message) if message.contains("boom")));
}

#[tokio::test]
async fn stream_emits_hit_count_then_documents() {
    let (_server, retriever) = mounted_retriever(
        200,
        json!({"value": [
            {"id": "1", "content": "first"},
            {"id": "2", "content": "second"}
        ]}),
    )
    .await;

    let events: Vec<StreamEvent> = retriever
        .stream("what is langchain".to_string())
        .map(|event| event.unwrap())
        .collect()
        .await;

    assert_eq!(events.len(), 3);
    assert_eq!(
        events[0],
        StreamEvent::Metadata {
            key: "hit_count".to_string(),
            value: json!(2),
        }
    );
    match &events[2] {
        StreamEvent::Document(doc) => assert_eq!(doc.content, "second"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn stream_yields_single_error_on_failure() {
    let (_server, retriever) = mounted_retriever(401, json!({})).await;

    let events: Vec<_> = retriever
        .stream("what is langchain".to_string())
        .collect()
        .await;
    assert_eq!(events.len(), 1);
    assert!(events[0].is_err());
}
