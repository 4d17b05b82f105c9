/// LLM Client — the single point of entry for all Claude API calls in the service.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
/// Reports run 4,000–15,000 words, so the output budget is sized for
/// long-form generation rather than chat turns.
const MAX_TOKENS: u32 = 32_000;
/// Low temperature: report structure must stay consistent across runs.
const TEMPERATURE: f32 = 0.2;

/// Failure taxonomy for one synthesis call. Every variant is terminal for
/// the request — no automatic retry happens here; a failed generation is
/// shown to the user, who re-triggers manually.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("LLM service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("LLM credentials missing or invalid")]
    Unauthenticated,

    #[error("LLM returned an empty or too-short response ({chars} chars)")]
    EmptyResponse { chars: usize },
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct LlmResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl LlmResponse {
    /// Concatenates all text blocks. Long generations can arrive as more
    /// than one block; the caller always wants the full report text.
    fn text(&self) -> String {
        self.content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// The single LLM client used by all services.
/// Wraps the Anthropic Messages API configured for long-form, low-variance output.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(300))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes one call to the Claude API and returns the response text.
    ///
    /// `min_chars` is the policy threshold below which a response counts as
    /// a failed generation (`EmptyResponse`). No retries: retry, if any, is
    /// the caller's responsibility.
    pub async fn generate(
        &self,
        user_message: &str,
        system: &str,
        min_chars: usize,
    ) -> Result<String, GatewayError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: user_message,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GatewayError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GatewayError::Unauthenticated);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::ServiceUnavailable(format!(
                "status {status}: {body}"
            )));
        }

        let llm_response: LlmResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ServiceUnavailable(e.to_string()))?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        let text = llm_response.text();
        let chars = text.chars().count();
        if chars < min_chars {
            return Err(GatewayError::EmptyResponse { chars });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(blocks: Vec<(&str, Option<&str>)>) -> LlmResponse {
        LlmResponse {
            content: blocks
                .into_iter()
                .map(|(t, text)| ContentBlock {
                    block_type: t.to_string(),
                    text: text.map(String::from),
                })
                .collect(),
            usage: Usage {
                input_tokens: 0,
                output_tokens: 0,
            },
        }
    }

    #[test]
    fn test_text_joins_multiple_blocks() {
        let resp = make_response(vec![("text", Some("part one ")), ("text", Some("part two"))]);
        assert_eq!(resp.text(), "part one part two");
    }

    #[test]
    fn test_text_skips_non_text_blocks() {
        let resp = make_response(vec![("tool_use", None), ("text", Some("report body"))]);
        assert_eq!(resp.text(), "report body");
    }

    #[test]
    fn test_text_empty_content_yields_empty_string() {
        let resp = make_response(vec![]);
        assert_eq!(resp.text(), "");
    }
}
