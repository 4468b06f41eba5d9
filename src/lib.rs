// Declare all modules that are part of this library
pub mod config;
pub mod error;
pub mod types {
    pub mod llm_data;
}
pub mod composing {
    pub mod meta_prompt;
}
pub mod client {
    pub mod gemini;
    pub mod generation;
    pub mod session;
}
pub mod parsing {
    pub mod llm_parser;
}
pub mod render {
    pub mod cards;
}
