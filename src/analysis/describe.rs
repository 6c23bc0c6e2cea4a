//! Page description: assisted by the vision model when available, otherwise
//! built from the detected visual elements.

use image::DynamicImage;
use serde::Serialize;
use std::fmt::Write;

use crate::config::VisionConfig;
use crate::model::VisionModel;
use crate::model::prompts::DESCRIBE_PROMPT;
use crate::vision::{self, VisualElements};

/// Assisted descriptions shorter than this are logged as low quality.
const MIN_ASSISTED_CHARS: usize = 100;

/// Phrases that identify a heuristic description. Every heuristic
/// description contains the first one.
pub const FALLBACK_MARKERS: [&str; 4] = [
    "enhanced landing page analysis",
    "desktop layout detected",
    "page structure: unknownxunknown",
    "fallback analysis",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Assisted,
    Heuristic,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageDescription {
    pub text: String,
    pub provenance: Provenance,
}

impl ImageDescription {
    pub fn is_assisted(&self) -> bool {
        self.provenance == Provenance::Assisted
    }
}

pub fn contains_fallback_marker(text: &str) -> bool {
    let lower = text.to_lowercase();
    FALLBACK_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Tries the model first and falls back to [`heuristic_description`] on
/// any failure.
pub fn generate_description(
    model: Option<&dyn VisionModel>,
    img: &DynamicImage,
    visual: &VisualElements,
    config: &VisionConfig,
) -> ImageDescription {
    let Some(model) = model else {
        crate::log("No vision model configured, using heuristic description");
        return heuristic_description(visual);
    };

    let jpeg = match vision::encode_for_model(img, config.max_model_dimension, config.jpeg_quality) {
        Ok(jpeg) => jpeg,
        Err(e) => {
            crate::log(&format!("Failed to encode image for model: {:#}", e));
            return heuristic_description(visual);
        }
    };

    match model.describe(&jpeg, DESCRIBE_PROMPT) {
        Ok(text) => {
            let chars = text.chars().count();
            if chars < MIN_ASSISTED_CHARS {
                crate::log(&format!(
                    "Warning: model description is short ({} characters)",
                    chars
                ));
            }
            if !text.to_lowercase().contains("landing page") {
                crate::log("Warning: model description does not mention a landing page");
            }
            if contains_fallback_marker(&text) {
                crate::log("Warning: model description contains a fallback marker phrase");
            }
            ImageDescription {
                text,
                provenance: Provenance::Assisted,
            }
        }
        Err(e) => {
            crate::log(&format!("Image description failed: {}", e));
            heuristic_description(visual)
        }
    }
}

/// Deterministic description built from the detected elements.
pub fn heuristic_description(visual: &VisualElements) -> ImageDescription {
    let mut text = String::from("Enhanced landing page analysis:\n");

    // Writing to a String cannot fail
    let _ = match &visual.layout {
        Some(layout) => writeln!(
            text,
            "Page Structure: {}x{} layout ({})",
            layout.dimensions.width,
            layout.dimensions.height,
            if layout.is_mobile {
                "mobile-optimized"
            } else {
                "desktop-focused"
            }
        ),
        None => writeln!(text, "Page Structure: unknownxunknown layout"),
    };

    let _ = writeln!(
        text,
        "UI Elements: {} interactive buttons/CTAs detected",
        visual.buttons.len()
    );
    let _ = writeln!(text, "Forms: {} form fields present", visual.forms.len());
    if !visual.headlines.is_empty() {
        text.push_str("Content: Headline text areas identified\n");
    }
    if !visual.images.is_empty() {
        text.push_str("Media: Images and graphics detected\n");
    }
    let primary = visual
        .colors
        .as_ref()
        .and_then(|c| c.primary.as_deref())
        .unwrap_or("unknown");
    let _ = writeln!(text, "Design: Primary color scheme detected ({})", primary);

    text.push_str("\nConversion Opportunities:\n");
    if visual.buttons.is_empty() {
        text.push_str("- Missing clear call-to-action buttons\n");
    }
    if visual.forms.is_empty() {
        text.push_str("- No forms detected (may need lead capture)\n");
    }
    if !visual.headlines.is_empty() {
        text.push_str("- Headline optimization opportunities\n");
    }
    if !visual.images.is_empty() {
        text.push_str("- Visual content optimization potential\n");
    }
    text.push_str("- Social proof elements may be missing\n");
    text.push_str("- Trust signals could be improved");

    ImageDescription {
        text,
        provenance: Provenance::Heuristic,
    }
}
