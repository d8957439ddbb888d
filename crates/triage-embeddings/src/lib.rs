//! # triage-embeddings
//!
//! Embedding generation for the example store.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine
//! ├── provider (chosen once at startup)
//! │   ├── CohereEmbedProvider (remote, default)
//! │   └── TfIdfFallback (local, always available)
//! └── L1MemoryCache (moka, keyed by blake3 of model + text)
//! ```

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::L1MemoryCache;
pub use engine::EmbeddingEngine;
pub use providers::{CohereEmbedProvider, TfIdfFallback};
