pub mod config;
pub mod error;
pub mod models;
pub mod keywords;
pub mod fetch;
pub mod llm;
pub mod analysis;
pub mod validation;

pub use config::{Config, PipelineConfig};
pub use error::{Error, FetchError, Result};
pub use fetch::PageFetcher;
pub use llm::{ClaudeProvider, LLMProvider};
pub use analysis::{AnalysisPipeline, Analyzer};
