use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::{Document, Value, WesichainError};

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Document(Document),
    Metadata { key: String, value: Value },
}

#[async_trait]
pub trait Runnable<Input: Send + 'static, Output: Send + 'static> {
    async fn invoke(&self, input: Input) -> Result<Output, WesichainError>;

    fn stream(&self, input: Input) -> BoxStream<'_, Result<StreamEvent, WesichainError>>;
}
