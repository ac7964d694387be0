pub mod batch;
pub mod models;
pub mod pipeline;

pub use batch::{BatchSummarizer, TokenBudget};
pub use models::create_model;
pub use pipeline::StockNewsSummarizer;

/// Backend configuration handed to [`create_model`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

pub mod prelude {
    pub use super::batch::{BatchSummarizer, TokenBudget};
    pub use super::models::create_model;
    pub use super::pipeline::StockNewsSummarizer;
    pub use super::Config;
    pub use sn_core::{Article, CompletionError, CompletionModel, Error, Result};
}
