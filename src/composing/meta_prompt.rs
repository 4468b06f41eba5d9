// Meta-prompt construction. The instruction must pin down the exact two-key
// JSON schema and include one worked example, otherwise the model drifts
// into prose or drops the segment ids.

use crate::types::llm_data::GenerationRequest;

const SCHEMA_INSTRUCTIONS: &str = "\
You MUST return your response as a single JSON object. The JSON object must have two keys:
1. `code`: A string containing the full, complete generated code.
2. `mapping`: An array of objects. Each object must have:
    - `prompt_segment`: The text fragment from the user's prompt.
    - `code_segment`: The corresponding generated code fragment.
    - `id`: A unique string ID (e.g., \"seg-1\", \"seg-2\") to link them.
Do NOT include any text outside the JSON object.";

const WORKED_EXAMPLE: &str = r#"EXAMPLE:
User Request: "In JavaScript, create a variable 'user' with name 'Ali' and print it to console."
Language/Framework: JavaScript
Your JSON Output:
{
  "code": "const user = {\n  name: 'Ali'\n};\nconsole.log(user);",
  "mapping": [
    {
      "prompt_segment": "create a variable 'user' with name 'Ali'",
      "code_segment": "const user = {\n  name: 'Ali'\n};",
      "id": "seg-1"
    },
    {
      "prompt_segment": "and print it to console",
      "code_segment": "console.log(user);",
      "id": "seg-2"
    }
  ]
}"#;

// Pure string construction: states the target language, embeds the user's
// prompt verbatim, and appends the schema contract plus the worked example.
pub fn compose_meta_prompt(request: &GenerationRequest) -> String {
    format!(
        "You are an expert code generation assistant. The user wants code in the following language: {language}\n\
         The user's request is: \"{prompt}\"\n\n\
         Your task is to:\n\
         1. Generate the requested code.\n\
         2. Provide a precise mapping between the meaningful segments of the user's prompt and the corresponding segments of the generated code.\n\n\
         {schema}\n\n\
         ---\n\
         {example}\n\
         ---\n\n\
         Now, process the following user request:\n\
         Language/Framework: {language}\n\
         User's Prompt: {prompt}\n",
        language = request.target_language,
        prompt = request.user_prompt,
        schema = SCHEMA_INSTRUCTIONS,
        example = WORKED_EXAMPLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(language: &str, prompt: &str) -> GenerationRequest {
        GenerationRequest::validated(language, prompt).unwrap()
    }

    #[test]
    fn meta_prompt_embeds_both_inputs_verbatim() {
        let req = request("Rust", "read a file and count its lines");
        let text = compose_meta_prompt(&req);
        assert!(text.contains("Rust"));
        assert!(text.contains("read a file and count its lines"));
    }

    #[test]
    fn meta_prompt_states_the_schema_keys() {
        let text = compose_meta_prompt(&request("Go", "an http server"));
        assert!(text.contains("`code`"));
        assert!(text.contains("`mapping`"));
        assert!(text.contains("prompt_segment"));
        assert!(text.contains("code_segment"));
        assert!(text.contains("`id`"));
    }

    #[test]
    fn meta_prompt_includes_a_worked_example() {
        let text = compose_meta_prompt(&request("Python", "sort a list"));
        assert!(text.contains("EXAMPLE:"));
        assert!(text.contains("\"seg-1\""));
    }
}
