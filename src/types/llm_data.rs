use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

// One correspondence between a prompt fragment and a generated code
// fragment. `id` is the join key for hover linking.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MappingSegment {
    pub id: String,
    pub prompt_segment: String,
    pub code_segment: String,
}

// The structured payload the model must return.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ModelResponse {
    pub code: String,
    pub mapping: Vec<MappingSegment>,
}

// One user submission; built per generate action and discarded after use.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub target_language: String,
    pub user_prompt: String,
}

impl GenerationRequest {
    // Only constructor: trims both inputs and rejects empty ones, so a
    // GenerationRequest that exists is always well-formed.
    pub fn validated(target_language: &str, user_prompt: &str) -> Result<Self, GenerateError> {
        let target_language = target_language.trim();
        let user_prompt = user_prompt.trim();
        if target_language.is_empty() || user_prompt.is_empty() {
            return Err(GenerateError::Validation(
                "Please enter both a language/framework and a prompt.".to_string(),
            ));
        }
        Ok(Self {
            target_language: target_language.to_string(),
            user_prompt: user_prompt.to_string(),
        })
    }
}
