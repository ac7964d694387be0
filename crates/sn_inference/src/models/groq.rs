use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use sn_core::{CompletionError, CompletionModel, Error, Result};

use crate::Config;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.2-90b-text-preview";
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Groq chat-completions client (OpenAI-compatible wire format).
///
/// Maps provider failures onto [`CompletionError`] so the batching engine
/// never has to inspect response text itself.
pub struct GroqModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model: String,
}

impl GroqModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::InvalidInput("missing Groq API key".to_string()))?;
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

impl fmt::Debug for GroqModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl CompletionModel for GroqModel {
    fn name(&self) -> &str {
        "Groq"
    }

    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> std::result::Result<String, CompletionError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature,
            max_tokens: max_output_tokens,
            top_p: 1.0,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let retry_header = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<f64>().ok())
                .map(Duration::from_secs_f64);
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, retry_header, &body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Api(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CompletionError::Api("response contained no choices".to_string()))
    }
}

/// Turn a non-2xx response into the structured failure the engine dispatches
/// on. The retry wait comes from the `Retry-After` header when present, else
/// from the "try again in Ns" hint Groq embeds in the error message, else a
/// 60s default.
fn classify_failure(
    status: StatusCode,
    retry_after_header: Option<Duration>,
    body: &str,
) -> CompletionError {
    let (message, code) = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => (parsed.error.message, parsed.error.code),
        Err(_) => (body.to_string(), None),
    };
    let code = code.unwrap_or_default();

    if status == StatusCode::TOO_MANY_REQUESTS || code == "rate_limit_exceeded" {
        let retry_after = retry_after_header
            .or_else(|| retry_hint(&message))
            .unwrap_or(DEFAULT_RETRY_AFTER);
        return CompletionError::RateLimited { retry_after };
    }

    if code == "context_length_exceeded"
        || message.contains("context_length_exceeded")
        || message.contains("Please reduce the length of the messages or completion")
    {
        return CompletionError::ContextLengthExceeded;
    }

    CompletionError::Api(format!("{}: {}", status, message))
}

/// Extract the wait from messages like "... Please try again in 7.66s."
fn retry_hint(message: &str) -> Option<Duration> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"try again in ([0-9]+(?:\.[0-9]+)?)s").unwrap());
    let secs: f64 = re.captures(message)?.get(1)?.as_str().parse().ok()?;
    Some(Duration::from_secs_f64(secs))
}
