use std::collections::HashMap;

use serde_json::{Map as JsonMap, Value as JsonValue};
use wesichain_core::{Document, Value};

use crate::error::AzureSearchError;

/// Turns one search hit into a [`Document`].
///
/// The `content_key` field becomes the document content and must be a
/// non-blank string. Every other field, including `@search.*` annotations, is
/// kept as metadata. When `id_key` holds a string it is also copied into
/// `Document::id`.
pub fn hit_to_document(
    mut hit: JsonMap<String, JsonValue>,
    content_key: &str,
    id_key: &str,
) -> Result<Document, AzureSearchError> {
    let content = match hit.remove(content_key) {
        Some(JsonValue::String(text)) if text.trim().is_empty() => {
            return Err(AzureSearchError::EmptyContent {
                content_key: content_key.to_string(),
            })
        }
        Some(JsonValue::String(text)) => text,
        Some(_) => {
            return Err(AzureSearchError::InvalidContent {
                content_key: content_key.to_string(),
            })
        }
        None => {
            return Err(AzureSearchError::MissingContentKey {
                content_key: content_key.to_string(),
            })
        }
    };

    let id = hit
        .get(id_key)
        .and_then(JsonValue::as_str)
        .map(ToOwned::to_owned)
        .unwrap_or_default();

    let metadata: HashMap<String, Value> = hit.into_iter().collect();

    Ok(Document {
        id,
        content,
        metadata,
        embedding: None,
    })
}

pub fn hits_to_documents(
    hits: Vec<JsonMap<String, JsonValue>>,
    content_key: &str,
    id_key: &str,
) -> Result<Vec<Document>, AzureSearchError> {
    hits.into_iter()
        .map(|hit| hit_to_document(hit, content_key, id_key))
        .collect()
}
