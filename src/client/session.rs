// Session context for the model invocation boundary. Created once, on
// successful credential validation; the generation worker gets its own clone.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::client::gemini::{GeminiRequest, GeminiResponse};
use crate::config::Config;
use crate::error::GenerateError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct SessionContext {
    http: Client,
    api_key: String,
    model: String,
    endpoint_base: String,
    temperature: f32,
    max_output_tokens: i32,
}

impl SessionContext {
    // Credential check is shape-only (non-empty after trimming); a bad key
    // surfaces on the first submit.
    pub fn new(api_key: &str, config: &Config) -> Result<Self, GenerateError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GenerateError::Validation(
                "Please enter an API key.".to_string(),
            ));
        }
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenerateError::ModelInvocation(format!("HTTP client setup: {}", e)))?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: config.model.clone(),
            endpoint_base: config.endpoint_base.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    // One POST to generateContent, returning the model's raw text output.
    // No retry, no rate limiting; every failure maps to ModelInvocation.
    pub fn submit(&self, instruction: &str) -> Result<String, GenerateError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint_base, self.model
        );
        let body =
            GeminiRequest::from_instruction(instruction, self.temperature, self.max_output_tokens);

        log::debug!("Submitting generation request to model '{}'", self.model);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| GenerateError::ModelInvocation(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GenerateError::ModelInvocation(format!(
                "API key was rejected (HTTP {})",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Err(GenerateError::ModelInvocation(format!(
                "Model service returned HTTP {}",
                status.as_u16()
            )));
        }

        let envelope: GeminiResponse = response.json().map_err(|e| {
            GenerateError::ModelInvocation(format!("Unexpected response envelope: {}", e))
        })?;

        let candidate = envelope
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerateError::ModelInvocation("Model returned no candidates".to_string()))?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        if text.is_empty() {
            return Err(GenerateError::ModelInvocation(
                "Model returned an empty candidate".to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected_before_any_network_use() {
        let err = SessionContext::new("   ", &Config::default()).unwrap_err();
        assert!(matches!(err, GenerateError::Validation(_)));
    }

    #[test]
    fn session_picks_up_config_values() {
        let config = Config {
            model: "gemini-test".to_string(),
            ..Config::default()
        };
        let session = SessionContext::new("k-123", &config).unwrap();
        assert_eq!(session.model(), "gemini-test");
    }

    #[test]
    fn trailing_slash_in_endpoint_is_normalized() {
        let config = Config {
            endpoint_base: "https://example.test/".to_string(),
            ..Config::default()
        };
        let session = SessionContext::new("k-123", &config).unwrap();
        assert_eq!(session.endpoint_base, "https://example.test");
    }
}
