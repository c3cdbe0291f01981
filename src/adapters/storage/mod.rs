//! Storage Adapters
//!
//! Implementations of the dataset and target ports.
//!
//! ## Available Adapters
//!
//! - **JsonEnvironmentDataset** / **JsonSocialDataset** - JSON arrays on disk
//! - **JsonTargetStore** - KPI targets document, bootstrapped when missing
//! - **InMemory\*** - In-memory versions (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{JsonTargetStore, InMemoryTargetStore};
//!
//! // Production: file-based targets
//! let targets = JsonTargetStore::new("./data/kpi_targets.json");
//!
//! // Testing: in-memory targets
//! let targets = InMemoryTargetStore::new();
//! ```

mod in_memory_dataset;
mod in_memory_target_store;
mod json_environment_dataset;
mod json_social_dataset;
mod json_target_store;

pub use in_memory_dataset::{InMemoryEnvironmentDataset, InMemorySocialDataset};
pub use in_memory_target_store::InMemoryTargetStore;
pub use json_environment_dataset::JsonEnvironmentDataset;
pub use json_social_dataset::JsonSocialDataset;
pub use json_target_store::JsonTargetStore;
