mod document;
mod error;
mod metadata_filter;
mod runnable;

pub use document::{Document, Value};
pub use error::WesichainError;
pub use metadata_filter::MetadataFilter;
pub use runnable::{Runnable, StreamEvent};
