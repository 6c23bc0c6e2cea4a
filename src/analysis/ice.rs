//! ICE (Impact, Confidence, Effort) scoring.
//!
//! Each dimension starts at 5.0, moves by fixed weights and is clamped to
//! [1, 10] and rounded to one decimal. The score is computed from the
//! rounded values, so `score == round2(impact * confidence / effort)`
//! always holds for the reported numbers.

use serde::Serialize;

use super::ideas::{Category, Idea, Priority};

/// Impact multiplier per category. Categories not listed weigh 1.0.
pub const CATEGORY_WEIGHTS: [(Category, f64); 5] = [
    (Category::Ux, 1.3),
    (Category::Copy, 1.2),
    (Category::Design, 1.1),
    (Category::Layout, 1.0),
    (Category::Technical, 0.9),
];

const BASE: f64 = 5.0;
const MIN_DIMENSION: f64 = 1.0;
const MAX_DIMENSION: f64 = 10.0;

/// Score thresholds for [`Priority::High`] and [`Priority::Medium`].
pub const HIGH_PRIORITY_SCORE: f64 = 8.0;
pub const MEDIUM_PRIORITY_SCORE: f64 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

/// Scoring inputs for one idea.
#[derive(Clone, Debug, PartialEq)]
pub struct IceAttributes {
    pub category: Category,
    pub affects_value_proposition: bool,
    pub affects_cta: bool,
    pub affects_trust: bool,
    pub affects_social_proof: bool,
    pub has_case_studies: bool,
    pub case_study_count: u32,
    pub follows_best_practices: bool,
    pub industry_standard: bool,
    /// In [0, 1]
    pub reasoning_strength: f64,
    pub complexity: Complexity,
    pub dev_time_days: u32,
    pub requires_design: bool,
    pub requires_copywriting: bool,
    pub requires_ab_testing: bool,
    pub requires_user_research: bool,
}

impl Default for IceAttributes {
    fn default() -> Self {
        Self {
            category: Category::General,
            affects_value_proposition: false,
            affects_cta: false,
            affects_trust: false,
            affects_social_proof: false,
            has_case_studies: false,
            case_study_count: 0,
            follows_best_practices: false,
            industry_standard: false,
            reasoning_strength: 0.5,
            complexity: Complexity::Medium,
            dev_time_days: 3,
            requires_design: false,
            requires_copywriting: false,
            requires_ab_testing: false,
            requires_user_research: false,
        }
    }
}

impl IceAttributes {
    /// Derives attributes from the idea's category and title keywords.
    pub fn derive(idea: &Idea) -> Self {
        let title = idea.title.to_lowercase();
        let category = idea.category;
        let proof_heavy = matches!(category, Category::SocialProof | Category::Trust);

        let (complexity, dev_time_days) = match category {
            Category::Copy => (Complexity::Low, 1),
            Category::Design => (Complexity::Medium, 3),
            _ => (Complexity::High, 5),
        };

        Self {
            category,
            affects_value_proposition: title.contains("value")
                || title.contains("headline")
                || category == Category::Copy,
            affects_cta: title.contains("cta")
                || title.contains("button")
                || category == Category::Design,
            affects_trust: title.contains("trust")
                || title.contains("testimonial")
                || category == Category::Trust,
            affects_social_proof: title.contains("social")
                || title.contains("testimonial")
                || category == Category::SocialProof,
            has_case_studies: true,
            case_study_count: if proof_heavy { 3 } else { 2 },
            follows_best_practices: true,
            industry_standard: true,
            reasoning_strength: if proof_heavy { 0.8 } else { 0.7 },
            complexity,
            dev_time_days,
            requires_design: category == Category::Design,
            requires_copywriting: category == Category::Copy,
            requires_ab_testing: true,
            requires_user_research: category == Category::Ux,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IceScore {
    pub impact: f64,
    pub confidence: f64,
    pub effort: f64,
    pub score: f64,
    pub priority: Priority,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn clamp_dimension(value: f64) -> f64 {
    round1(value.clamp(MIN_DIMENSION, MAX_DIMENSION))
}

pub fn category_weight(category: Category) -> f64 {
    CATEGORY_WEIGHTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, weight)| *weight)
        .unwrap_or(1.0)
}

fn impact(attrs: &IceAttributes) -> f64 {
    let mut value = BASE * category_weight(attrs.category);
    if attrs.affects_value_proposition {
        value += 2.0;
    }
    if attrs.affects_cta {
        value += 1.5;
    }
    if attrs.affects_trust {
        value += 1.0;
    }
    if attrs.affects_social_proof {
        value += 1.0;
    }
    clamp_dimension(value)
}

fn confidence(attrs: &IceAttributes) -> f64 {
    let mut value = BASE;
    if attrs.has_case_studies {
        value += 2.0;
    }
    if attrs.case_study_count > 3 {
        value += 1.0;
    }
    if attrs.follows_best_practices {
        value += 1.5;
    }
    if attrs.industry_standard {
        value += 1.0;
    }
    value += 2.0 * attrs.reasoning_strength.clamp(0.0, 1.0);
    clamp_dimension(value)
}

fn effort(attrs: &IceAttributes) -> f64 {
    let mut value = BASE;
    value += match attrs.complexity {
        Complexity::Low => -2.0,
        Complexity::Medium => 0.0,
        Complexity::High => 2.0,
    };
    value += match attrs.dev_time_days {
        0..=1 => -2.0,
        2..=3 => -1.0,
        4..=6 => 0.0,
        _ => 2.0,
    };
    if attrs.requires_design {
        value += 1.0;
    }
    if attrs.requires_copywriting {
        value += 0.5;
    }
    if attrs.requires_ab_testing {
        value += 1.0;
    }
    if attrs.requires_user_research {
        value += 1.5;
    }
    clamp_dimension(value)
}

pub fn priority_for(score: f64) -> Priority {
    if score >= HIGH_PRIORITY_SCORE {
        Priority::High
    } else if score >= MEDIUM_PRIORITY_SCORE {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Pure ICE scoring.
pub fn score(attrs: &IceAttributes) -> IceScore {
    let impact = impact(attrs);
    let confidence = confidence(attrs);
    let effort = effort(attrs);
    let score = if effort == 0.0 {
        0.0
    } else {
        round2(impact * confidence / effort)
    };

    IceScore {
        impact,
        confidence,
        effort,
        score,
        priority: priority_for(score),
    }
}

pub fn estimate_lift(ice: &IceScore) -> &'static str {
    let lift = ice.impact * ice.confidence / 100.0 * 25.0;
    if lift >= 15.0 {
        "15-25% conversion increase"
    } else if lift >= 10.0 {
        "10-15% conversion increase"
    } else if lift >= 5.0 {
        "5-10% conversion increase"
    } else {
        "2-5% conversion increase"
    }
}

pub fn estimate_time(ice: &IceScore) -> &'static str {
    if ice.effort <= 3.0 {
        "1-2 days"
    } else if ice.effort <= 6.0 {
        "3-5 days"
    } else {
        "1-2 weeks"
    }
}

/// An idea with its score and estimates.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredIdea {
    pub id: String,
    #[serde(flatten)]
    pub idea: Idea,
    pub ice: IceScore,
    pub estimated_lift: &'static str,
    pub implementation_time: &'static str,
}

/// Scores ideas, assigns `idea_<n>` ids in input order and sorts by
/// descending score. Equal scores keep their input order.
pub fn score_ideas(ideas: Vec<Idea>) -> Vec<ScoredIdea> {
    let mut scored: Vec<ScoredIdea> = ideas
        .into_iter()
        .enumerate()
        .map(|(i, idea)| {
            let ice = score(&IceAttributes::derive(&idea));
            ScoredIdea {
                id: format!("idea_{}", i + 1),
                idea,
                ice,
                estimated_lift: estimate_lift(&ice),
                implementation_time: estimate_time(&ice),
            }
        })
        .collect();

    scored.sort_by(|a, b| b.ice.score.total_cmp(&a.ice.score));
    scored
}
