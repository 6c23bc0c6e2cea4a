//! External vision-and-language model.
//!
//! The pipeline only talks to the [`VisionModel`] trait; [`OpenAiClient`]
//! implements it over an OpenAI-compatible chat-completions endpoint.

pub mod openai;
pub mod prompts;

pub use openai::OpenAiClient;

/// Errors from the assisted path. All of them are recoverable: the caller
/// moves on to the next fallback tier.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model client not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Parse(String),
}

/// Which idea batch a structured request belongs to. Clients map this to
/// their own temperature and token limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Batch {
    /// The first request for a full set of ideas
    Primary,
    /// A smaller follow-up request to top up the backlog
    TopUp,
}

/// A request for structured (JSON) output.
#[derive(Clone, Debug)]
pub struct StructuredRequest<'a> {
    pub system: Option<&'a str>,
    pub prompt: &'a str,
    pub batch: Batch,
}

pub trait VisionModel {
    /// Describes a JPEG-encoded screenshot following `prompt`.
    fn describe(&self, jpeg: &[u8], prompt: &str) -> Result<String, ModelError>;

    /// Returns the raw payload text for a structured-output request.
    fn generate_structured(&self, request: &StructuredRequest<'_>) -> Result<String, ModelError>;
}
