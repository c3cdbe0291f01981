//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - JSON-file and in-memory datasets and target stores
//! - `document` - Markdown rendering of KPI and DSS reports
//! - `stdio` - JSON-lines tool server over stdin/stdout

pub mod document;
pub mod stdio;
pub mod storage;

pub use document::MarkdownReportRenderer;
pub use stdio::JsonLinesServer;
pub use storage::{
    InMemoryEnvironmentDataset, InMemorySocialDataset, InMemoryTargetStore,
    JsonEnvironmentDataset, JsonSocialDataset, JsonTargetStore,
};
