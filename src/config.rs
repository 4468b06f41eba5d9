use serde::Deserialize;
use std::fs;

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.4
}

fn default_max_output_tokens() -> i32 {
    8192
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint_base")]
    pub endpoint_base: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint_base: default_endpoint_base(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

// The config file is optional; a missing file means defaults. A file that
// exists but does not parse is an error the caller surfaces to the user.
pub fn load_config_from_file(file_path: &str) -> Result<Config, String> {
    match fs::read_to_string(file_path) {
        Ok(contents) => toml::from_str::<Config>(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", file_path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(format!("Failed to read {}: {}", file_path, e)),
    }
}
