pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod lexicon;
pub mod loader;
pub mod rerank;
pub mod resolver;

pub use crate::api::Dataset;
pub use crate::resolver::CandidateResolver;
// cmd and reports belong to the binary (main.rs).
