use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use sn_core::{Article, CompletionError, CompletionModel};

/// Instruction prepended to every batch prompt.
pub const PROMPT_HEADER: &str =
    "Summarize key updates or issues of the company based on the following articles:";

/// Titles are clipped before rendering so one verbose headline cannot eat
/// the whole budget.
const TITLE_CHARS: usize = 80;

/// Token limits a batch must satisfy before it is submitted.
///
/// Input size is approximated from character count (`tokens_per_char`);
/// no real tokenizer is involved, so the provider's own context-length
/// rejection remains the ground truth and the engine must recover from it.
#[derive(Debug, Clone)]
pub struct TokenBudget {
    /// Context window of the model, input and output combined.
    pub max_model_tokens: u32,
    /// Output tokens requested per completion.
    pub max_output_tokens: u32,
    /// Provider throughput allowance. Kept as a separate constraint from the
    /// context window rather than folded into one ceiling.
    pub max_tokens_per_minute: u32,
    pub tokens_per_char: f64,
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self {
            max_model_tokens: 8192,
            max_output_tokens: 512,
            max_tokens_per_minute: 7000,
            tokens_per_char: 0.25,
        }
    }
}

impl TokenBudget {
    pub fn estimate_tokens(&self, text: &str) -> u32 {
        (text.chars().count() as f64 * self.tokens_per_char).round() as u32
    }

    /// Whether a request with this many estimated input tokens may be
    /// submitted: it must fit the context window and the per-minute
    /// allowance, checked independently.
    pub fn fits(&self, input_tokens: u32) -> bool {
        let total = input_tokens.saturating_add(self.max_output_tokens);
        total <= self.max_model_tokens && total <= self.max_tokens_per_minute
    }
}

/// Adaptive batching engine: summarizes an article list in as few model
/// calls as the token budget allows, shrinking the batch on size rejections
/// and backing off on rate limits.
///
/// Recoverable failures never surface to the caller; the engine returns the
/// best partial result it managed to accumulate.
pub struct BatchSummarizer {
    model: Arc<dyn CompletionModel>,
    budget: TokenBudget,
    rate_limit_margin: Duration,
}

impl BatchSummarizer {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self::with_budget(model, TokenBudget::default())
    }

    pub fn with_budget(model: Arc<dyn CompletionModel>, budget: TokenBudget) -> Self {
        Self {
            model,
            budget,
            rate_limit_margin: Duration::from_secs(1),
        }
    }

    /// Summarize `articles`, largest feasible prefix first.
    ///
    /// Each iteration of the outer loop banks one batch summary and drops the
    /// batch from the front of the queue. The inner loop probes candidate
    /// sizes downward: locally when the estimate says the prompt cannot fit,
    /// and again when the provider rejects a prompt the estimate let through.
    /// Rate limits retry the same batch after the provider-suggested wait.
    /// Any other failure ends the run with whatever has been accumulated.
    pub async fn summarize(&self, articles: &[Article]) -> String {
        let mut remaining = articles;
        let mut accumulated: Vec<String> = Vec::new();

        'outer: while !remaining.is_empty() {
            let mut candidate = remaining.len();

            while candidate > 0 {
                let batch = &remaining[..candidate];
                let body = render_batch(batch);
                let input_tokens = self.budget.estimate_tokens(&body);

                if !self.budget.fits(input_tokens) {
                    candidate -= 1;
                    continue;
                }

                let prompt = format!("{PROMPT_HEADER}\n{body}");
                debug!(
                    batch = candidate,
                    remaining = remaining.len(),
                    input_tokens,
                    "submitting batch"
                );

                match self
                    .model
                    .complete(&prompt, self.budget.max_output_tokens, 1.0)
                    .await
                {
                    Ok(text) => {
                        accumulated.push(text.trim().to_string());
                        remaining = &remaining[candidate..];
                        continue 'outer;
                    }
                    Err(CompletionError::RateLimited { retry_after }) => {
                        let wait = retry_after + self.rate_limit_margin;
                        info!(wait_secs = wait.as_secs_f64(), "rate limited, backing off");
                        tokio::time::sleep(wait).await;
                        // same candidate, same batch
                    }
                    Err(CompletionError::ContextLengthExceeded) => {
                        debug!(batch = candidate, "context length exceeded, shrinking batch");
                        candidate -= 1;
                    }
                    Err(err) => {
                        warn!(error = %err, "aborting run, returning partial result");
                        return accumulated.join("\n\n");
                    }
                }
            }

            // Even a single article cannot be submitted; nothing left in the
            // queue can make progress.
            warn!(
                remaining = remaining.len(),
                "unable to process articles due to size limitations"
            );
            break;
        }

        accumulated.join("\n\n")
    }
}

fn render_batch(batch: &[Article]) -> String {
    batch
        .iter()
        .map(|article| {
            let title: String = article.title.chars().take(TITLE_CHARS).collect();
            format!("{} (Link: {})", title, article.url)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
