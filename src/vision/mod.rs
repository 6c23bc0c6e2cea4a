//! Visual element extraction.
//!
//! Detects buttons, form fields, headline regions, imagery, layout and the
//! colour palette from a decoded screenshot. Detection is heuristic and never
//! fails: anything that cannot be measured is left empty.

pub mod detect;
pub mod palette;
pub mod preprocess;

pub use preprocess::encode_for_model;

use image::DynamicImage;
use serde::Serialize;

/// Binarization threshold used before tracing element regions.
pub const BINARY_THRESHOLD: u8 = 127;

/// Bounding box in absolute pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Button,
    FormField,
    Headline,
}

/// A detected UI element.
#[derive(Clone, Debug, Serialize)]
pub struct DetectedRegion {
    #[serde(rename = "type")]
    pub kind: RegionKind,
    pub position: Rect,
    /// Pixel area, reported for buttons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<u64>,
}

/// Imagery detected from intensity variance.
#[derive(Clone, Debug, Serialize)]
pub struct ImageRegion {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub count: u32,
}

impl Default for ImageRegion {
    fn default() -> Self {
        Self {
            kind: "image",
            count: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Hero,
    Content,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SectionSpan {
    pub y_start: u32,
    pub y_end: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub position: SectionSpan,
}

/// Overall page geometry.
#[derive(Clone, Debug, Serialize)]
pub struct Layout {
    pub dimensions: Dimensions,
    pub aspect_ratio: f64,
    pub is_mobile: bool,
    pub sections: Vec<Section>,
}

/// Dominant colours, largest cluster first.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ColorPalette {
    pub dominant_colors: Vec<[u8; 3]>,
    pub color_count: usize,
    /// Hex code of the largest cluster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
}

/// Everything detected on the page. `Default` is the empty record used when
/// extraction could not run at all.
#[derive(Clone, Debug, Default, Serialize)]
pub struct VisualElements {
    pub buttons: Vec<DetectedRegion>,
    pub forms: Vec<DetectedRegion>,
    pub headlines: Vec<DetectedRegion>,
    pub images: Vec<ImageRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPalette>,
}

/// Runs every detector over the screenshot.
pub fn extract_visual_elements(img: &DynamicImage) -> VisualElements {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        crate::log("Visual element extraction skipped: empty image");
        return VisualElements::default();
    }

    let gray = img.to_luma8();
    let binary = preprocess::binarize(&gray, BINARY_THRESHOLD);
    let boxes = detect::component_boxes(&binary);
    let variance = preprocess::intensity_variance(&gray);

    let colors = match palette::dominant_colors(&img.to_rgb8(), palette::PALETTE_CLUSTERS) {
        Some(palette) => palette,
        None => {
            crate::log("Colour clustering failed: not enough distinct colours");
            ColorPalette::default()
        }
    };

    let elements = VisualElements {
        buttons: detect::detect_buttons(&boxes),
        forms: detect::detect_forms(&boxes),
        headlines: detect::detect_headlines(width, height),
        images: detect::detect_images(variance),
        layout: Some(detect::analyze_layout(width, height)),
        colors: Some(colors),
    };

    crate::log(&format!(
        "Found {} buttons, {} forms ({} regions traced, variance {:.1})",
        elements.buttons.len(),
        elements.forms.len(),
        boxes.len(),
        variance
    ));

    elements
}
