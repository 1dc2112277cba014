pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod service;

pub use catalog::{create_pool, CandidateRetriever, PgCatalog, RetrievalError};
pub use config::{AppConfig, MatchingConfig};
pub use service::{EngineError, MatcherService, QuotationStore};
