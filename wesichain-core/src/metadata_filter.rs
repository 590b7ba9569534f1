use serde::{Deserialize, Serialize};

use crate::Value;

/// Backend-neutral predicate over document metadata. Integrations translate it
/// into their own filter syntax.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum MetadataFilter {
    Eq(String, Value),
    In(String, Vec<Value>),
    Range {
        key: String,
        min: Option<Value>,
        max: Option<Value>,
    },
    All(Vec<MetadataFilter>),
    Any(Vec<MetadataFilter>),
}

impl MetadataFilter {
    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        MetadataFilter::Eq(key.into(), value.into())
    }

    pub fn between(key: impl Into<String>, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        MetadataFilter::Range {
            key: key.into(),
            min: Some(min.into()),
            max: Some(max.into()),
        }
    }
}
