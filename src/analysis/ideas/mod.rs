//! Tiered idea generation.
//!
//! Ideas come from the assisted model first, then from hand-authored pools:
//! archetype templates when the page text could be classified, the
//! visual-analysis pool otherwise, the tactical pool, and finally the
//! general pool. The backlog always ends with exactly [`IDEA_COUNT`] ideas.

pub mod archetype;
pub mod filter;
pub mod parse;
pub mod templates;
pub mod visual;

pub use archetype::{BusinessType, Classification};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::describe::{ImageDescription, Provenance};
use crate::model::prompts;
use crate::model::{Batch, StructuredRequest, VisionModel};
use crate::vision::VisualElements;

/// Ideas in every completed backlog.
pub const IDEA_COUNT: usize = 20;

/// Ideas requested by the assisted top-up batch.
pub const TOP_UP_COUNT: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Copy,
    Design,
    Ux,
    Technical,
    Layout,
    Trust,
    SocialProof,
    #[default]
    General,
}

impl Category {
    /// Lenient parse of model output. Unknown values map to `General`.
    pub fn parse(value: &str) -> Self {
        let normalized: String = value
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "copy" | "copywriting" => Category::Copy,
            "design" => Category::Design,
            "ux" | "user_experience" => Category::Ux,
            "technical" => Category::Technical,
            "layout" => Category::Layout,
            "trust" => Category::Trust,
            "social_proof" => Category::SocialProof,
            _ => Category::General,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Lenient parse of model output. Unknown values map to `Medium`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

/// The tier an idea was produced by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaSource {
    Assisted,
    Archetype,
    VisualAnalysis,
    Tactical,
    General,
}

/// One CRO experiment proposal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Idea {
    pub title: String,
    pub description: String,
    pub hypothesis: String,
    pub category: Category,
    pub reasoning: String,
    pub implementation: String,
    pub success_metrics: String,
    pub priority: Priority,
    pub source: IdeaSource,
}

/// Inputs shared by every tier.
pub struct IdeaContext<'a> {
    pub description: &'a ImageDescription,
    pub extracted_text: &'a str,
    pub visual: &'a VisualElements,
    pub classification: Classification,
}

/// Lowercase alphanumerics only, so punctuation and quoting differences
/// between tiers do not defeat duplicate suppression.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Bounded, duplicate-free accumulator.
struct Backlog {
    ideas: Vec<Idea>,
    seen: HashSet<String>,
}

impl Backlog {
    fn new() -> Self {
        Self {
            ideas: Vec::with_capacity(IDEA_COUNT),
            seen: HashSet::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.ideas.len() >= IDEA_COUNT
    }

    fn len(&self) -> usize {
        self.ideas.len()
    }

    /// Adds an idea unless the backlog is full or the title was already used.
    fn push(&mut self, idea: Idea) -> bool {
        if self.is_full() {
            return false;
        }
        let key = normalize_title(&idea.title);
        if key.is_empty() || !self.seen.insert(key) {
            return false;
        }
        self.ideas.push(idea);
        true
    }

    /// Returns the number of ideas accepted.
    fn extend(&mut self, ideas: impl IntoIterator<Item = Idea>) -> usize {
        let mut added = 0;
        for idea in ideas {
            if self.is_full() {
                break;
            }
            if self.push(idea) {
                added += 1;
            }
        }
        added
    }
}

/// The general pool as a complete backlog. Used when generation fails.
pub fn general_pool_ideas() -> Vec<Idea> {
    templates::GENERAL_POOL
        .iter()
        .take(IDEA_COUNT)
        .map(|t| t.to_idea(IdeaSource::General))
        .collect()
}

pub struct IdeaGenerator<'a> {
    model: Option<&'a dyn VisionModel>,
}

impl<'a> IdeaGenerator<'a> {
    pub fn new(model: Option<&'a dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Produces exactly [`IDEA_COUNT`] ideas. Never fails: errors fall back
    /// to the general pool.
    pub fn generate(&self, ctx: &IdeaContext<'_>) -> Vec<Idea> {
        match self.try_generate(ctx) {
            Ok(ideas) => ideas,
            Err(e) => {
                crate::log(&format!("Idea generation failed: {:#}. Using general pool", e));
                general_pool_ideas()
            }
        }
    }

    pub fn try_generate(&self, ctx: &IdeaContext<'_>) -> Result<Vec<Idea>> {
        let mut backlog = Backlog::new();

        match self.model {
            Some(model) if ctx.description.provenance == Provenance::Assisted => {
                self.add_assisted(model, ctx, &mut backlog)?;
            }
            _ => crate::log("Assisted idea generation skipped"),
        }

        if !backlog.is_full() {
            let (source, pool) = if ctx.classification.confident {
                let lower = ctx.extracted_text.to_lowercase();
                let ideas = archetype::archetype_ideas(ctx.classification.business_type, &lower);
                ("archetype", ideas)
            } else {
                ("visual analysis", visual::visual_ideas(ctx.visual))
            };
            let added = backlog.extend(pool);
            crate::log(&format!("Added {} {} ideas", added, source));
        }

        if !backlog.is_full() {
            let added = backlog.extend(
                templates::TACTICAL_POOL
                    .iter()
                    .map(|t| t.to_idea(IdeaSource::Tactical)),
            );
            crate::log(&format!("Added {} tactical ideas", added));
        }

        if !backlog.is_full() {
            let added = backlog.extend(
                templates::GENERAL_POOL
                    .iter()
                    .map(|t| t.to_idea(IdeaSource::General)),
            );
            crate::log(&format!("Added {} general ideas", added));
        }

        if backlog.len() != IDEA_COUNT {
            bail!("only {} unique ideas after all tiers", backlog.len());
        }

        Ok(backlog.ideas)
    }

    fn add_assisted(
        &self,
        model: &dyn VisionModel,
        ctx: &IdeaContext<'_>,
        backlog: &mut Backlog,
    ) -> Result<()> {
        let elements_json = serde_json::to_string_pretty(ctx.visual)
            .context("Failed to serialize visual elements")?;

        let prompt = prompts::fill(
            prompts::IDEAS_PROMPT,
            &ctx.description.text,
            ctx.extracted_text,
            &elements_json,
        );
        let request = StructuredRequest {
            system: Some(prompts::IDEAS_SYSTEM),
            prompt: &prompt,
            batch: Batch::Primary,
        };

        let raw = match model.generate_structured(&request) {
            Ok(raw) => raw,
            Err(e) => {
                crate::log(&format!("Assisted idea generation failed: {}", e));
                return Ok(());
            }
        };
        let added = backlog.extend(filtered(parse::parse_ideas(&raw)?));
        crate::log(&format!("Accepted {} assisted ideas", added));

        if backlog.is_full() {
            return Ok(());
        }

        let prompt = prompts::fill_with_count(
            prompts::ADDITIONAL_IDEAS_PROMPT,
            &ctx.description.text,
            ctx.extracted_text,
            &elements_json,
            TOP_UP_COUNT,
        );
        let request = StructuredRequest {
            system: None,
            prompt: &prompt,
            batch: Batch::TopUp,
        };

        match model.generate_structured(&request) {
            Ok(raw) => {
                let added = backlog.extend(filtered(parse::parse_ideas(&raw)?));
                crate::log(&format!("Accepted {} top-up ideas", added));
            }
            Err(e) => crate::log(&format!("Top-up idea batch failed: {}", e)),
        }

        Ok(())
    }
}

fn filtered(ideas: Vec<Idea>) -> impl Iterator<Item = Idea> {
    ideas.into_iter().filter(|idea| {
        let keep = filter::is_specific(idea);
        if !keep {
            crate::log(&format!("Rejected non-specific idea: {}", idea.title));
        }
        keep
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;
    use std::cell::RefCell;

    struct ScriptedModel {
        replies: RefCell<Vec<Result<String, ModelError>>>,
        batches: RefCell<Vec<Batch>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String, ModelError>>) -> Self {
            Self {
                replies: RefCell::new(replies),
                batches: RefCell::new(Vec::new()),
            }
        }
    }

    impl VisionModel for ScriptedModel {
        fn describe(&self, _jpeg: &[u8], _prompt: &str) -> Result<String, ModelError> {
            Err(ModelError::NotConfigured("scripted".to_string()))
        }

        fn generate_structured(&self, request: &StructuredRequest<'_>) -> Result<String, ModelError> {
            self.batches.borrow_mut().push(request.batch);
            let mut replies = self.replies.borrow_mut();
            if replies.is_empty() {
                return Err(ModelError::Connection("no more replies".to_string()));
            }
            replies.remove(0)
        }
    }

    fn assisted_description() -> ImageDescription {
        ImageDescription {
            text: "The landing page hero headline reads 'Ship faster'".to_string(),
            provenance: Provenance::Assisted,
        }
    }

    fn heuristic_description() -> ImageDescription {
        ImageDescription {
            text: "Enhanced landing page analysis:\n".to_string(),
            provenance: Provenance::Heuristic,
        }
    }

    fn json_ideas(count: usize, prefix: &str) -> String {
        let ideas: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "title": format!("{} hero headline variant {}", prefix, i),
                    "description": "Rewrite the hero headline around the main benefit",
                    "hypothesis": "Clearer headline lifts signups by 10%",
                    "category": "copy",
                    "reasoning": "Visitors read the headline first",
                    "implementation": ["1. Draft", "2. Test"],
                    "success_metrics": "Signup rate",
                    "priority": "high"
                })
            })
            .collect();
        serde_json::to_string(&ideas).unwrap()
    }

    fn context<'a>(
        description: &'a ImageDescription,
        visual: &'a VisualElements,
        text: &'a str,
    ) -> IdeaContext<'a> {
        IdeaContext {
            description,
            extracted_text: text,
            visual,
            classification: archetype::classify(text),
        }
    }

    #[test]
    fn test_no_model_short_text_uses_visual_then_tactical() {
        let description = heuristic_description();
        let visual = VisualElements::default();
        let ideas = IdeaGenerator::new(None).generate(&context(&description, &visual, "Hi"));

        assert_eq!(ideas.len(), IDEA_COUNT);
        assert_eq!(ideas[0].source, IdeaSource::VisualAnalysis);
        assert_eq!(ideas[0].title, "Add Primary CTA Button in Hero Section");
        assert!(ideas.iter().any(|i| i.source == IdeaSource::Tactical));
        assert!(ideas.iter().all(|i| i.source != IdeaSource::Archetype));
    }

    #[test]
    fn test_long_text_uses_archetype_pool() {
        let description = heuristic_description();
        let visual = VisualElements::default();
        let text = "Calm your mind. Change your life. Sleep more, stress less with guided meditation.";
        let ideas = IdeaGenerator::new(None).generate(&context(&description, &visual, text));

        assert_eq!(ideas.len(), IDEA_COUNT);
        assert_eq!(ideas[0].source, IdeaSource::Archetype);
        assert!(ideas.iter().any(|i| i.title.contains("Calm Your Mind")));
    }

    #[test]
    fn test_heuristic_description_never_calls_model() {
        let model = ScriptedModel::new(vec![Ok(json_ideas(20, "A"))]);
        let description = heuristic_description();
        let visual = VisualElements::default();
        let ideas = IdeaGenerator::new(Some(&model)).generate(&context(&description, &visual, ""));

        assert_eq!(ideas.len(), IDEA_COUNT);
        assert!(model.batches.borrow().is_empty());
        assert!(ideas.iter().all(|i| i.source != IdeaSource::Assisted));
    }

    #[test]
    fn test_full_assisted_batch_skips_top_up() {
        let model = ScriptedModel::new(vec![Ok(json_ideas(25, "A"))]);
        let description = assisted_description();
        let visual = VisualElements::default();
        let ideas = IdeaGenerator::new(Some(&model)).generate(&context(&description, &visual, ""));

        assert_eq!(ideas.len(), IDEA_COUNT);
        assert!(ideas.iter().all(|i| i.source == IdeaSource::Assisted));
        assert_eq!(*model.batches.borrow(), vec![Batch::Primary]);
        assert_eq!(ideas[0].implementation, "1. Draft 2. Test");
    }

    #[test]
    fn test_short_assisted_batch_is_topped_up_then_filled() {
        let model = ScriptedModel::new(vec![Ok(json_ideas(5, "A")), Ok(json_ideas(3, "B"))]);
        let description = assisted_description();
        let visual = VisualElements::default();
        let ideas = IdeaGenerator::new(Some(&model)).generate(&context(&description, &visual, ""));

        assert_eq!(ideas.len(), IDEA_COUNT);
        assert_eq!(*model.batches.borrow(), vec![Batch::Primary, Batch::TopUp]);
        let assisted = ideas.iter().filter(|i| i.source == IdeaSource::Assisted).count();
        assert_eq!(assisted, 8);
        assert_eq!(ideas[8].source, IdeaSource::VisualAnalysis);
    }

    #[test]
    fn test_model_failure_falls_through_to_pools() {
        let model = ScriptedModel::new(vec![Err(ModelError::Api {
            status: 500,
            message: "boom".to_string(),
        })]);
        let description = assisted_description();
        let visual = VisualElements::default();
        let ideas = IdeaGenerator::new(Some(&model)).generate(&context(&description, &visual, ""));

        assert_eq!(ideas.len(), IDEA_COUNT);
        assert_eq!(*model.batches.borrow(), vec![Batch::Primary]);
    }

    #[test]
    fn test_titles_are_unique() {
        let description = heuristic_description();
        let visual = VisualElements::default();
        let ideas = IdeaGenerator::new(None).generate(&context(&description, &visual, ""));
        let titles: HashSet<String> = ideas.iter().map(|i| normalize_title(&i.title)).collect();
        assert_eq!(titles.len(), ideas.len());
    }

    #[test]
    fn test_generate_is_deterministic_without_model() {
        let description = heuristic_description();
        let visual = VisualElements::default();
        let text = "Shop our store and buy the best product at a great sale price today";
        let first = IdeaGenerator::new(None).generate(&context(&description, &visual, text));
        let second = IdeaGenerator::new(None).generate(&context(&description, &visual, text));
        assert_eq!(first, second);
    }

    #[test]
    fn test_general_pool_ideas_are_complete() {
        let ideas = general_pool_ideas();
        assert_eq!(ideas.len(), IDEA_COUNT);
        assert!(ideas.iter().all(|i| i.source == IdeaSource::General));
    }

    #[test]
    fn test_category_and_priority_parsing() {
        assert_eq!(Category::parse("Social Proof"), Category::SocialProof);
        assert_eq!(Category::parse("social-proof"), Category::SocialProof);
        assert_eq!(Category::parse("UX"), Category::Ux);
        assert_eq!(Category::parse("growth"), Category::General);
        assert_eq!(Priority::parse(" HIGH "), Priority::High);
        assert_eq!(Priority::parse("urgent"), Priority::Medium);
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("Add \"FAQ\" Section!"), "addfaqsection");
        assert_eq!(normalize_title("add faq section"), "addfaqsection");
    }
}
