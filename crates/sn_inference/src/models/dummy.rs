use std::fmt;

use async_trait::async_trait;

use sn_core::{CompletionError, CompletionModel};

/// Offline backend for development and tests: echoes the headlines it was
/// asked to summarize instead of calling anyone.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

#[async_trait]
impl CompletionModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(
        &self,
        prompt: &str,
        _max_output_tokens: u32,
        _temperature: f32,
    ) -> std::result::Result<String, CompletionError> {
        let headlines: Vec<String> = prompt
            .lines()
            .skip(1) // instruction line
            .map(|line| line.split(" (Link:").next().unwrap_or(line))
            .map(|title| format!("- {}", title))
            .collect();
        Ok(format!("Key updates:\n{}", headlines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_headlines_without_links() {
        let prompt = "Summarize key updates or issues of the company based on the following articles:\n\
                      Nvidia beats estimates (Link: https://example.com/1)\n\
                      Nvidia announces buyback (Link: https://example.com/2)";
        let summary = DummyModel.complete(prompt, 512, 1.0).await.unwrap();
        assert!(summary.contains("- Nvidia beats estimates"));
        assert!(summary.contains("- Nvidia announces buyback"));
        assert!(!summary.contains("example.com"));
    }
}
