//! Data layer: core types, loading, caching, and filtering.
//!
//! Architecture:
//! ```text
//!  Sample - Superstore.csv  (Latin-1)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  cache    │  OnceLock<Dataset>, assigned once per process
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterSelection predicates → FilteredView
//!   └──────────┘
//! ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use cache::DatasetCache;
pub use error::LoadError;
pub use filter::{apply, FilterSelection, FilteredView};
pub use loader::{LoaderConfig, SourceEncoding};
pub use model::{Dataset, OrderRecord};
