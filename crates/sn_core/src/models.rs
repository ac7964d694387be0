use std::fmt;

use async_trait::async_trait;

use crate::error::CompletionError;

#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    /// Returns the name of the completion backend
    fn name(&self) -> &str;

    /// Submit a single non-streaming completion request
    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> std::result::Result<String, CompletionError>;
}
