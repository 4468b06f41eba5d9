use thiserror::Error;

// Error taxonomy for one generate action. Every variant is terminal for the
// current request; the UI reports it and stays usable for the next attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}
