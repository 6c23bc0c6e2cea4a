pub mod engine;
pub mod setup;

pub use engine::{OcrLine, OcrWord, TesseractEngine};

use anyhow::Result;
use image::DynamicImage;

/// Returned instead of an empty string when OCR fails or reads nothing.
///
/// Exactly 50 characters, so it always counts as "too short" for
/// business-type classification.
pub const OCR_PLACEHOLDER: &str = "Landing page content - text extraction unavailable";

/// A text recognizer for screenshots.
pub trait OcrEngine {
    fn extract_text(&self, img: &DynamicImage) -> Result<String>;
}

/// Extracts text, substituting [`OCR_PLACEHOLDER`] for failures and empty output.
pub fn extract_text_or_placeholder(engine: &dyn OcrEngine, img: &DynamicImage) -> String {
    match engine.extract_text(img) {
        Ok(text) if !text.trim().is_empty() => {
            let text = text.trim().to_string();
            crate::log(&format!("Extracted {} characters of text", text.chars().count()));
            text
        }
        Ok(_) => {
            crate::log("OCR returned no text, using placeholder");
            OCR_PLACEHOLDER.to_string()
        }
        Err(e) => {
            crate::log(&format!("OCR failed: {}", e));
            OCR_PLACEHOLDER.to_string()
        }
    }
}
