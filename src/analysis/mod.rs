//! Landing page analysis pipeline.
//!
//! This module provides:
//! - Page description (model-assisted or heuristic)
//! - Tiered CRO idea generation
//! - ICE scoring and backlog summary
//! - JSON export of the result

pub mod describe;
pub mod export;
pub mod ice;
pub mod ideas;
pub mod summary;

pub use describe::{ImageDescription, Provenance};
pub use ice::{IceScore, ScoredIdea};
pub use ideas::{BusinessType, Category, Idea, Priority};
pub use summary::Summary;

use image::DynamicImage;
use serde::Serialize;
use std::path::Path;

use crate::config::{AnalyzerConfig, VisionConfig};
use crate::error::AnalyzeError;
use crate::model::{OpenAiClient, VisionModel};
use crate::ocr::{self, OcrEngine, TesseractEngine};
use crate::vision::{self, VisualElements};
use ideas::{IdeaContext, IdeaGenerator};

pub const FALLBACK_EXTRACTED_TEXT: &str = "Analysis failed, using fallback ideas";
pub const FALLBACK_DESCRIPTION: &str = "Fallback analysis";

/// Intermediate results reported alongside the backlog.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub visual_elements: VisualElements,
    pub extracted_text: String,
    pub image_description: String,
    pub ai_analysis_working: bool,
    pub business_type: BusinessType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub ideas: Vec<ScoredIdea>,
    pub summary: Summary,
    pub metadata: Metadata,
}

impl AnalysisResult {
    /// General-pool backlog returned when the screenshot could not be analyzed.
    pub fn fallback(error: &str) -> Self {
        let ideas = ice::score_ideas(ideas::general_pool_ideas());
        let summary = summary::summarize(&ideas);
        Self {
            ideas,
            summary,
            metadata: Metadata {
                visual_elements: VisualElements::default(),
                extracted_text: FALLBACK_EXTRACTED_TEXT.to_string(),
                image_description: FALLBACK_DESCRIPTION.to_string(),
                ai_analysis_working: false,
                business_type: BusinessType::Generic,
                error: Some(error.to_string()),
            },
        }
    }
}

/// Runs the pipeline with a text recognizer and an optional vision model.
pub struct Analyzer {
    ocr: Box<dyn OcrEngine>,
    model: Option<Box<dyn VisionModel>>,
    vision: VisionConfig,
}

impl Analyzer {
    pub fn new(
        ocr: Box<dyn OcrEngine>,
        model: Option<Box<dyn VisionModel>>,
        vision: VisionConfig,
    ) -> Self {
        Self { ocr, model, vision }
    }

    /// Tesseract plus the configured model client. A model that cannot be
    /// configured is logged and left out.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let ocr = Box::new(TesseractEngine::new(config.ocr.clone()));
        let model: Option<Box<dyn VisionModel>> = match OpenAiClient::new(config.model.clone()) {
            Ok(client) => {
                crate::log(&format!("Vision model enabled: {}", config.model.vision_model));
                Some(Box::new(client))
            }
            Err(e) => {
                crate::log(&format!("{}. Running without model assistance", e));
                None
            }
        };
        Self::new(ocr, model, config.vision.clone())
    }

    pub fn analyze_path(&self, path: &Path) -> Result<AnalysisResult, AnalyzeError> {
        let bytes = std::fs::read(path).map_err(|source| AnalyzeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        crate::log(&format!("Loaded {} ({} bytes)", path.display(), bytes.len()));
        self.analyze_bytes(&bytes)
    }

    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult, AnalyzeError> {
        let img = image::load_from_memory(bytes)?;
        Ok(self.analyze_image(&img))
    }

    /// Like [`analyze_path`](Self::analyze_path), but input errors produce
    /// [`AnalysisResult::fallback`].
    pub fn analyze_or_fallback_path(&self, path: &Path) -> AnalysisResult {
        self.analyze_path(path).unwrap_or_else(|e| fallback_for(&e))
    }

    pub fn analyze_or_fallback_bytes(&self, bytes: &[u8]) -> AnalysisResult {
        self.analyze_bytes(bytes).unwrap_or_else(|e| fallback_for(&e))
    }

    /// Runs every stage on a decoded screenshot. Stage failures degrade to
    /// fallback data and never abort the run.
    pub fn analyze_image(&self, img: &DynamicImage) -> AnalysisResult {
        crate::log(&format!(
            "Analyzing {}x{} screenshot",
            img.width(),
            img.height()
        ));

        let visual_elements = vision::extract_visual_elements(img);
        let extracted_text = ocr::extract_text_or_placeholder(self.ocr.as_ref(), img);
        let description = describe::generate_description(
            self.model.as_deref(),
            img,
            &visual_elements,
            &self.vision,
        );
        crate::log(&format!(
            "Description ready ({:?}, {} characters)",
            description.provenance,
            description.text.chars().count()
        ));

        let classification = ideas::archetype::classify(&extracted_text);
        if classification.confident {
            crate::log(&format!(
                "Business type: {}",
                classification.business_type.as_str()
            ));
        }

        let ctx = IdeaContext {
            description: &description,
            extracted_text: &extracted_text,
            visual: &visual_elements,
            classification,
        };
        let generated = IdeaGenerator::new(self.model.as_deref()).generate(&ctx);
        let scored = ice::score_ideas(generated);
        let summary = summary::summarize(&scored);

        if let Some(top) = scored.first() {
            crate::log(&format!(
                "Generated {} ideas, top: {} (ICE {:.2})",
                scored.len(),
                top.idea.title,
                top.ice.score
            ));
        }

        AnalysisResult {
            ideas: scored,
            summary,
            metadata: Metadata {
                visual_elements,
                extracted_text,
                ai_analysis_working: description.is_assisted(),
                image_description: description.text,
                business_type: classification.business_type,
                error: None,
            },
        }
    }
}

fn fallback_for(error: &AnalyzeError) -> AnalysisResult {
    crate::log(&format!("Analysis failed: {}. Using fallback ideas", error));
    AnalysisResult::fallback(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::describe::contains_fallback_marker;
    use crate::analysis::ideas::{IDEA_COUNT, IdeaSource};
    use crate::model::{ModelError, StructuredRequest};
    use anyhow::anyhow;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    struct FixedOcr(Option<&'static str>);

    impl OcrEngine for FixedOcr {
        fn extract_text(&self, _img: &DynamicImage) -> anyhow::Result<String> {
            self.0
                .map(|s| s.to_string())
                .ok_or_else(|| anyhow!("tesseract not found"))
        }
    }

    /// Model whose description call fails. Counts idea requests.
    struct FailingModel {
        structured_calls: Rc<Cell<usize>>,
    }

    impl VisionModel for FailingModel {
        fn describe(&self, _jpeg: &[u8], _prompt: &str) -> Result<String, ModelError> {
            Err(ModelError::Api {
                status: 401,
                message: "invalid api key".to_string(),
            })
        }

        fn generate_structured(&self, _request: &StructuredRequest<'_>) -> Result<String, ModelError> {
            self.structured_calls.set(self.structured_calls.get() + 1);
            Err(ModelError::Connection("unreachable".to_string()))
        }
    }

    struct WorkingModel;

    impl VisionModel for WorkingModel {
        fn describe(&self, _jpeg: &[u8], _prompt: &str) -> Result<String, ModelError> {
            Ok("This landing page shows a dark hero section with one white CTA button \
                reading 'Start now' and a bold headline across the top of the page."
                .to_string())
        }

        fn generate_structured(&self, _request: &StructuredRequest<'_>) -> Result<String, ModelError> {
            let ideas: Vec<serde_json::Value> = (1..=20)
                .map(|i| {
                    serde_json::json!({
                        "title": format!("Test CTA button copy variant {}", i),
                        "description": "Replace 'Start now' on the hero button with outcome copy",
                        "hypothesis": "Outcome copy lifts clicks by 10%",
                        "category": if i % 2 == 0 { "copy" } else { "design" },
                        "reasoning": "Specific buttons convert better",
                        "implementation": "1. Write variants 2. A/B test",
                        "success_metrics": "CTA click-through rate",
                        "priority": "high"
                    })
                })
                .collect();
            Ok(format!("```json\n{}\n```", serde_json::to_string(&ideas).unwrap()))
        }
    }

    /// Dark 1000x600 page with one bright button-sized block, as PNG bytes.
    fn screenshot_png() -> Vec<u8> {
        let img = RgbImage::from_fn(1000, 600, |x, y| {
            if (100..260).contains(&x) && (200..250).contains(&y) {
                Rgb([250, 250, 250])
            } else {
                Rgb([15, 15, 40])
            }
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn offline(ocr: FixedOcr) -> Analyzer {
        Analyzer::new(Box::new(ocr), None, VisionConfig::default())
    }

    fn assert_backlog_invariants(result: &AnalysisResult) {
        assert_eq!(result.ideas.len(), IDEA_COUNT);
        for pair in result.ideas.windows(2) {
            assert!(pair[0].ice.score >= pair[1].ice.score);
        }
        for item in &result.ideas {
            let ice = &item.ice;
            for value in [ice.impact, ice.confidence, ice.effort] {
                assert!((1.0..=10.0).contains(&value));
            }
            let expected = (ice.impact * ice.confidence / ice.effort * 100.0).round() / 100.0;
            assert_eq!(ice.score, expected);
            assert_eq!(ice.priority, ice::priority_for(ice.score));
        }
        let Summary::Backlog(stats) = &result.summary else {
            panic!("expected backlog summary");
        };
        assert_eq!(stats.total_ideas, IDEA_COUNT);
    }

    #[test]
    fn test_offline_run_without_text() {
        let result = offline(FixedOcr(None)).analyze_bytes(&screenshot_png()).unwrap();

        assert_backlog_invariants(&result);
        assert_eq!(result.metadata.extracted_text, crate::ocr::OCR_PLACEHOLDER);
        assert!(!result.metadata.ai_analysis_working);
        assert!(contains_fallback_marker(&result.metadata.image_description));
        assert_eq!(result.metadata.business_type, BusinessType::Generic);
        assert_eq!(result.metadata.visual_elements.buttons.len(), 1);
        assert!(result.metadata.error.is_none());
        assert!(result
            .ideas
            .iter()
            .any(|i| i.idea.title == "Optimize Existing CTA Button Copy and Design"));
    }

    #[test]
    fn test_failing_describe_falls_back_without_idea_requests() {
        let calls = Rc::new(Cell::new(0));
        let analyzer = Analyzer::new(
            Box::new(FixedOcr(None)),
            Some(Box::new(FailingModel {
                structured_calls: Rc::clone(&calls),
            })),
            VisionConfig::default(),
        );

        let result = analyzer.analyze_bytes(&screenshot_png()).unwrap();

        assert_backlog_invariants(&result);
        assert!(!result.metadata.ai_analysis_working);
        assert!(contains_fallback_marker(&result.metadata.image_description));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_working_model_produces_assisted_backlog() {
        let analyzer = Analyzer::new(
            Box::new(FixedOcr(Some("Start now"))),
            Some(Box::new(WorkingModel)),
            VisionConfig::default(),
        );

        let result = analyzer.analyze_bytes(&screenshot_png()).unwrap();

        assert_backlog_invariants(&result);
        assert!(result.metadata.ai_analysis_working);
        assert!(result
            .ideas
            .iter()
            .all(|i| i.idea.source == IdeaSource::Assisted));
    }

    #[test]
    fn test_long_text_reports_business_type() {
        let text = "Learn new skills from expert instructors. Every course comes with a certificate.";
        let result = offline(FixedOcr(Some(text))).analyze_bytes(&screenshot_png()).unwrap();

        assert_backlog_invariants(&result);
        assert_eq!(result.metadata.business_type, BusinessType::Learning);
        assert!(result
            .ideas
            .iter()
            .any(|i| i.idea.source == IdeaSource::Archetype));
    }

    #[test]
    fn test_offline_runs_are_identical() {
        let analyzer = offline(FixedOcr(Some("Get started for free today")));
        let png = screenshot_png();
        let first = serde_json::to_value(analyzer.analyze_bytes(&png).unwrap()).unwrap();
        let second = serde_json::to_value(analyzer.analyze_bytes(&png).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_undecodable_bytes() {
        let analyzer = offline(FixedOcr(None));
        assert!(matches!(
            analyzer.analyze_bytes(b"definitely not an image"),
            Err(AnalyzeError::Decode(_))
        ));

        let result = analyzer.analyze_or_fallback_bytes(b"definitely not an image");
        assert_backlog_invariants(&result);
        assert_eq!(result.metadata.extracted_text, FALLBACK_EXTRACTED_TEXT);
        assert_eq!(result.metadata.image_description, FALLBACK_DESCRIPTION);
        assert!(!result.metadata.ai_analysis_working);
        assert!(result.metadata.error.is_some());
        assert!(result
            .ideas
            .iter()
            .all(|i| i.idea.source == IdeaSource::General));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let analyzer = offline(FixedOcr(None));

        assert!(matches!(
            analyzer.analyze_path(&path),
            Err(AnalyzeError::Read { .. })
        ));
        let result = analyzer.analyze_or_fallback_path(&path);
        assert!(result.metadata.error.unwrap().contains("missing.png"));
    }

    #[test]
    fn test_analyze_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        std::fs::write(&path, screenshot_png()).unwrap();

        let result = offline(FixedOcr(None)).analyze_path(&path).unwrap();
        assert_backlog_invariants(&result);
    }

    #[test]
    fn test_result_json_shape() {
        let result = offline(FixedOcr(None)).analyze_bytes(&screenshot_png()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["ideas"].as_array().unwrap().len(), 20);
        assert!(json["ideas"][0]["id"].as_str().unwrap().starts_with("idea_"));
        assert!(json["summary"]["average_impact"].is_number());
        assert_eq!(json["metadata"]["business_type"], "generic");
        assert!(json["metadata"].get("error").is_none());
        assert!(json["metadata"]["visual_elements"]["layout"]["dimensions"]["width"] == 1000);
    }
}
