use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

#[derive(Clone, Debug, Deserialize)]
pub struct SearchResponse {
    pub value: Vec<JsonMap<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}
