// Parses the model's raw text output into a ModelResponse. The model
// sometimes wraps its JSON in a ```json fence even when asked not to, so one
// leading/trailing fence marker is stripped first. Deserializing into the
// typed struct validates both top-level keys, the mapping array shape, and
// the three string fields per entry. No partial recovery.

use regex::Regex;

use crate::error::GenerateError;
use crate::types::llm_data::ModelResponse;

pub fn parse_model_response(raw: &str) -> Result<ModelResponse, GenerateError> {
    let stripped = strip_code_fence(raw);
    serde_json::from_str::<ModelResponse>(&stripped)
        .map_err(|e| GenerateError::MalformedResponse(format!("Not a valid response payload: {}", e)))
}

// Removes one leading fence marker (optional language tag) and one trailing
// ``` if present. Unfenced input passes through apart from outer whitespace.
fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    let opening = Regex::new(r"^```[A-Za-z0-9_-]*[ \t]*\r?\n?").unwrap();
    if let Some(m) = opening.find(trimmed) {
        let rest = trimmed[m.end()..].trim_end();
        let rest = rest.strip_suffix("```").unwrap_or(rest);
        return rest.trim().to_string();
    }
    trimmed.to_string()
}
