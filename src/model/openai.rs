use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Batch, ModelError, StructuredRequest, VisionModel};
use crate::config::ModelConfig;

/// Longest slice of an error body kept in [`ModelError::Api`].
const MAX_ERROR_BODY: usize = 500;

/// Blocking client for an OpenAI-compatible chat-completions API.
pub struct OpenAiClient {
    config: ModelConfig,
    api_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Creates a client, failing when the model is disabled or no API key is available.
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        if !config.enabled {
            return Err(ModelError::NotConfigured("model disabled in config".to_string()));
        }
        let api_key = config.resolved_api_key().ok_or_else(|| {
            ModelError::NotConfigured(format!(
                "no API key (set {} or model.api_key)",
                crate::config::API_KEY_ENV
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Connection(e.to_string()))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    fn chat(&self, request: &ChatRequest<'_>) -> Result<String, ModelError> {
        let url = format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .map_err(|e| ModelError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ModelError::Parse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ModelError::Parse("empty completion".to_string()))?;

        crate::log(&format!(
            "Model response received: {} characters",
            content.chars().count()
        ));
        Ok(content)
    }
}

impl VisionModel for OpenAiClient {
    fn describe(&self, jpeg: &[u8], prompt: &str) -> Result<String, ModelError> {
        let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg));
        crate::log(&format!(
            "Requesting image description from {} ({} base64 characters)",
            self.config.vision_model,
            data_url.len()
        ));

        let request = ChatRequest {
            model: &self.config.vision_model,
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ]),
            }],
            max_tokens: self.config.describe_max_tokens,
            temperature: None,
        };

        self.chat(&request)
    }

    fn generate_structured(&self, request: &StructuredRequest<'_>) -> Result<String, ModelError> {
        let (temperature, max_tokens) = match request.batch {
            Batch::Primary => (self.config.ideas_temperature, self.config.ideas_max_tokens),
            Batch::TopUp => (
                self.config.additional_temperature,
                self.config.additional_max_tokens,
            ),
        };

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(ChatMessage {
                role: "system",
                content: MessageContent::Text(system.to_string()),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: MessageContent::Text(request.prompt.to_string()),
        });

        crate::log(&format!(
            "Requesting {:?} idea batch from {}",
            request.batch, self.config.text_model
        ));

        self.chat(&ChatRequest {
            model: &self.config.text_model,
            messages,
            max_tokens,
            temperature: Some(temperature),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_is_not_configured() {
        let config = ModelConfig {
            enabled: false,
            ..ModelConfig::default()
        };
        assert!(matches!(
            OpenAiClient::new(config),
            Err(ModelError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_vision_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o",
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: "Describe".to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: "data:image/jpeg;base64,AAAA".to_string(),
                        },
                    },
                ]),
            }],
            max_tokens: 1500,
            temperature: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,AAAA"
        );
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_text_message_serializes_as_string() {
        let message = ChatMessage {
            role: "system",
            content: MessageContent::Text("You are a CRO expert".to_string()),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["content"], "You are a CRO expert");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"[]"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("[]"));
    }
}
