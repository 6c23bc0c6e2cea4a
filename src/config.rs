//! Analyzer configuration.
//!
//! Loads settings from config.json. Missing or malformed files fall back to
//! defaults, so the analyzer always starts. The model API key can also come
//! from the `OPENAI_API_KEY` environment variable (or a `.env` file).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable holding the model API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Settings for the external vision-and-language model.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Set to false to run fully offline (heuristic tiers only)
    pub enabled: bool,
    /// OpenAI-compatible API base URL
    pub endpoint: String,
    /// API key; `OPENAI_API_KEY` takes precedence when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model used to describe the screenshot
    pub vision_model: String,
    /// Model used to generate ideas
    pub text_model: String,
    /// Per-request HTTP timeout in seconds
    pub timeout_secs: u64,
    pub describe_max_tokens: u32,
    pub ideas_max_tokens: u32,
    pub additional_max_tokens: u32,
    pub ideas_temperature: f32,
    pub additional_temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: None,
            vision_model: "gpt-4o".to_string(),
            text_model: "gpt-4o".to_string(),
            timeout_secs: 120,
            describe_max_tokens: 1500,
            ideas_max_tokens: 4000,
            additional_max_tokens: 2000,
            ideas_temperature: 0.7,
            additional_temperature: 0.8,
        }
    }
}

impl ModelConfig {
    /// Returns the usable API key, if any. Placeholder values count as missing.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| self.api_key.clone())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != "your-openai-api-key-here")
    }
}

/// Settings for the Tesseract OCR engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Explicit path to the tesseract executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tesseract_path: Option<String>,
    /// Tesseract language code
    pub language: String,
    /// Tesseract page segmentation mode (3 = fully automatic)
    pub page_seg_mode: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            language: "eng".to_string(),
            page_seg_mode: 3,
        }
    }
}

/// Image normalization applied before the screenshot is sent to the model.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Longest side, in pixels, of the image sent to the model
    pub max_model_dimension: u32,
    /// JPEG quality for the re-encoded image (1-100)
    pub jpeg_quality: u8,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            max_model_dimension: 2048,
            jpeg_quality: 95,
        }
    }
}

/// Complete analyzer configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub model: ModelConfig,
    pub ocr: OcrConfig,
    pub vision: VisionConfig,
}

impl AnalyzerConfig {
    /// Loads config from the given file, or returns defaults if it is missing or invalid.
    pub fn load(config_path: &Path) -> Self {
        crate::log(&format!("Looking for config at: {}", config_path.display()));

        if !config_path.exists() {
            crate::log("config.json not found. Using default config.");
            return Self::default();
        }

        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    config
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                    Self::default()
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
                Self::default()
            }
        }
    }

    /// Loads config.json from next to the executable, then the user config dir.
    pub fn load_default() -> Self {
        let exe_config = crate::paths::get_config_path();
        if exe_config.exists() {
            return Self::load(&exe_config);
        }
        match crate::paths::get_user_config_path() {
            Some(user_config) => Self::load(&user_config),
            None => Self::default(),
        }
    }
}

/// Loads environment variables from a `.env` file into the process.
///
/// With no path, `.env` is searched for from the working directory upward.
/// A missing file is not an error. Existing variables are never overridden.
pub fn load_env(path: Option<&Path>) {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match result {
        Ok(loaded) => crate::log(&format!("Loaded environment from {}", loaded.display())),
        Err(e) if e.not_found() => {}
        Err(e) => crate::log(&format!("Failed to load .env: {}", e)),
    }
}
