//! Specificity filter for assisted ideas.

use super::Idea;

/// Page elements an idea must mention to count as grounded in the screenshot.
pub const SPECIFIC_TERMS: &[&str] = &[
    "hero",
    "headline",
    "cta",
    "button",
    "form",
    "testimonial",
    "review",
    "pricing",
    "feature",
    "benefit",
    "value proposition",
    "trust signal",
    "social proof",
    "guarantee",
    "security",
    "mobile",
    "responsive",
    "navigation",
    "menu",
    "footer",
    "header",
    "above the fold",
    "section",
    "image",
    "photo",
    "logo",
    "brand",
    "color",
    "layout",
    "design",
];

/// Boilerplate goals that carry no concrete change.
pub const GENERIC_PHRASES: &[&str] = &[
    "improve conversion",
    "increase sales",
    "better user experience",
    "optimize website",
    "enhance performance",
    "boost revenue",
];

/// A title built around a generic phrase, or a title and description that
/// together contain every generic phrase.
pub fn is_generic(idea: &Idea) -> bool {
    let title = idea.title.to_lowercase();
    let combined = format!("{} {}", title, idea.description.to_lowercase());

    GENERIC_PHRASES.iter().any(|phrase| title.contains(phrase))
        || GENERIC_PHRASES.iter().all(|phrase| combined.contains(phrase))
}

pub fn has_specific_reference(idea: &Idea) -> bool {
    let combined = format!("{} {}", idea.title, idea.description).to_lowercase();
    SPECIFIC_TERMS.iter().any(|term| combined.contains(term))
}

/// Accepts ideas that reference a page element and are not generic.
pub fn is_specific(idea: &Idea) -> bool {
    has_specific_reference(idea) && !is_generic(idea)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ideas::{Category, IdeaSource, Priority};

    fn idea(title: &str, description: &str) -> Idea {
        Idea {
            title: title.to_string(),
            description: description.to_string(),
            hypothesis: String::new(),
            category: Category::Copy,
            reasoning: String::new(),
            implementation: String::new(),
            success_metrics: String::new(),
            priority: Priority::Medium,
            source: IdeaSource::Assisted,
        }
    }

    #[test]
    fn test_specific_idea_is_accepted() {
        assert!(is_specific(&idea(
            "Change hero headline from 'Welcome' to 'Save 3 hours a day'",
            "Lead with the time saving"
        )));
    }

    #[test]
    fn test_idea_without_page_reference_is_rejected() {
        assert!(!is_specific(&idea("Run a podcast", "Talk about the product weekly")));
    }

    #[test]
    fn test_generic_title_is_rejected_even_with_reference() {
        let generic = idea("Improve conversion", "Tweak the hero button");
        assert!(has_specific_reference(&generic));
        assert!(!is_specific(&generic));
    }

    #[test]
    fn test_generic_phrase_in_description_alone_is_allowed() {
        assert!(is_specific(&idea(
            "Move testimonials above the pricing table",
            "Placing proof next to prices should improve conversion"
        )));
    }
}
