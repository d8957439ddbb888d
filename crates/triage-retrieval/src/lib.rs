//! # triage-retrieval
//!
//! Context retrieval for the few-shot classifier and one-time seeding of
//! the example store.

pub mod retriever;
pub mod seed;
pub mod seeder;

pub use retriever::Retriever;
pub use seed::{builtin_seed_set, load_seed_set, SeedSet};
pub use seeder::Seeder;
