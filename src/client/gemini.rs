//! Gemini `generateContent` REST request and response types.

use serde::{Deserialize, Serialize};

/// Gemini API request structure
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GeminiGenerationConfig,
}

/// Content block for a Gemini API request.
#[derive(Debug, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

/// Text part within a Gemini content block.
#[derive(Debug, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

/// Generation configuration for Gemini API requests.
#[derive(Debug, Serialize)]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: i32,
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
}

/// Response from the Gemini API.
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// Candidate response from Gemini.
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiResponseContent,
}

/// Content within a Gemini response candidate.
#[derive(Debug, Deserialize)]
pub struct GeminiResponseContent {
    #[serde(default)]
    pub parts: Vec<GeminiResponsePart>,
}

/// Text part within a Gemini response.
#[derive(Debug, Deserialize)]
pub struct GeminiResponsePart {
    pub text: String,
}

impl GeminiRequest {
    pub fn from_instruction(instruction: &str, temperature: f32, max_output_tokens: i32) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: instruction.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature,
                max_output_tokens,
                // Ask for raw JSON so the model usually skips the ```json fence.
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let req = GeminiRequest::from_instruction("hello", 0.4, 8192);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"maxOutputTokens\""));
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
        assert!(json.contains("\"text\":\"hello\""));
    }

    #[test]
    fn response_with_missing_candidates_deserializes_to_empty() {
        let resp: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.candidates.is_empty());
    }
}
