/// LLM client — the single point of entry for all hosted-model calls.
///
/// ARCHITECTURAL RULE: no other module may call a completion API directly.
/// All LLM interactions MUST go through this module.
///
/// Both providers speak the OpenAI chat-completions dialect, so one client
/// covers them: Groq serves the search agents, the Hugging Face router
/// serves final script generation. One attempt per call — failed or hung
/// outbound calls surface as-is, there is no retry policy.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const HF_ROUTER_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Model used by the search agents to synthesize findings.
pub const SEARCH_MODEL: &str = "llama-3.3-70b-versatile";
/// Model used for final script generation.
pub const GENERATION_MODEL: &str = "meta-llama/Meta-Llama-3-8B-Instruct";

const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the assistant text from the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for one OpenAI-compatible chat-completions endpoint.
/// Constructed once per provider at startup and injected.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    url: String,
    api_key: String,
}

impl LlmClient {
    /// Client for the Groq endpoint (search-agent synthesis).
    pub fn groq(api_key: String) -> Self {
        Self::new(GROQ_API_URL, api_key)
    }

    /// Client for the Hugging Face router (script generation).
    pub fn huggingface(api_key: String) -> Self {
        Self::new(HF_ROUTER_API_URL, api_key)
    }

    fn new(url: &str, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            url: url.to_string(),
            api_key,
        }
    }

    /// Makes a single chat-completion call and returns the full response.
    pub async fn chat(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: extract_api_error(body),
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: model={model}, prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

/// Pulls the provider's error message out of a failure body, falling back
/// to the raw body when it is not the standard JSON error shape.
fn extract_api_error(body: String) -> String {
    serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_extracts_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{
                "choices": [{"message": {"role": "assistant", "content": "Hello there"}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 3}
            }"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("Hello there"));
    }

    #[test]
    fn test_text_handles_empty_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_text_handles_null_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_extract_api_error_standard_shape() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "tokens"}}"#;
        assert_eq!(extract_api_error(body.to_string()), "Rate limit reached");
    }

    #[test]
    fn test_extract_api_error_falls_back_to_raw_body() {
        assert_eq!(
            extract_api_error("502 Bad Gateway".to_string()),
            "502 Bad Gateway"
        );
    }
}
