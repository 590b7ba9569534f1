use tracing_subscriber::EnvFilter;
use wesichain_azure_search::AzureAiSearchRetriever;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wesichain_azure_search=debug")),
        )
        .init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "what is langchain".to_string());
    let top_k = std::env::var("AZURE_AI_SEARCH_TOP_K")
        .ok()
        .and_then(|value| value.parse::<usize>().ok());

    let mut builder = AzureAiSearchRetriever::builder().with_env();
    if let Some(k) = top_k {
        builder = builder.top_k(k);
    }
    let retriever = builder.build()?;

    let documents = retriever.retrieve_async(&query).await?;
    println!("Retrieved {} docs for {query:?}", documents.len());
    for doc in &documents {
        let preview: String = doc.content.chars().take(80).collect();
        println!("- [{}] {preview}", doc.id);
    }

    Ok(())
}
