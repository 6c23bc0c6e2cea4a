//! Business-type classification and the per-archetype idea pools.

use serde::Serialize;

use super::templates::IdeaTemplate;
use super::{Category, Idea, IdeaSource, Priority};

/// Extracted text must be longer than this for classification to be attempted.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Wellness,
    Learning,
    Ecommerce,
    Saas,
    #[default]
    Generic,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Wellness => "wellness",
            BusinessType::Learning => "learning",
            BusinessType::Ecommerce => "ecommerce",
            BusinessType::Saas => "saas",
            BusinessType::Generic => "generic",
        }
    }
}

/// Keyword table in tie-break order.
pub const ARCHETYPE_RULES: [(BusinessType, &[&str]); 4] = [
    (
        BusinessType::Wellness,
        &["calm", "meditation", "sleep", "relaxation", "mindfulness", "stress", "anxiety"],
    ),
    (
        BusinessType::Learning,
        &[
            "learn",
            "masterclass",
            "course",
            "lesson",
            "education",
            "skill",
            "training",
            "instructor",
            "teacher",
        ],
    ),
    (
        BusinessType::Ecommerce,
        &["shop", "buy", "purchase", "product", "store", "cart", "checkout", "price", "sale"],
    ),
    (
        BusinessType::Saas,
        &["software", "app", "platform", "tool", "solution", "service", "subscription", "trial"],
    ),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub business_type: BusinessType,
    /// False when the text was too short to classify
    pub confident: bool,
}

/// Scores every rule by keyword hits. The highest count wins and ties go to
/// the earlier rule; no hits at all is `Generic`.
pub fn classify(text: &str) -> Classification {
    if text.chars().count() <= MIN_TEXT_CHARS {
        return Classification::default();
    }

    let lower = text.to_lowercase();
    let mut best = (BusinessType::Generic, 0usize);
    for (business_type, keywords) in ARCHETYPE_RULES.iter() {
        let hits = keywords.iter().filter(|k| lower.contains(*k)).count();
        if hits > best.1 {
            best = (*business_type, hits);
        }
    }

    Classification {
        business_type: best.0,
        confident: true,
    }
}

/// Template emitted only when one of `triggers` occurs in the page text.
struct TriggeredTemplate {
    triggers: &'static [&'static str],
    template: IdeaTemplate,
}

const WELLNESS_TRIGGERED: &[TriggeredTemplate] = &[
    TriggeredTemplate {
        triggers: &["for free", "free trial"],
        template: IdeaTemplate {
            title: "Change \"Try for Free\" CTA to \"Start Your Free Meditation\"",
            description: "Replace the generic free-trial CTA with benefit-focused copy that names the meditation itself",
            hypothesis: "A benefit-specific CTA will increase conversion by 25-35%",
            category: Category::Copy,
            reasoning: "Specific benefit-focused CTAs convert better than generic \"try\" language",
            implementation: "1. Change the button text to \"Start Your Free Meditation\" 2. Test \"Begin Your Meditation Journey\" 3. A/B test against the current version",
            success_metrics: "Click-through rate, conversion rate",
            priority: Priority::High,
        },
    },
    TriggeredTemplate {
        triggers: &["calm your mind"],
        template: IdeaTemplate {
            title: "Add Specific Benefits Below the \"Calm Your Mind\" Headline",
            description: "Add three or four measurable benefits directly below the main headline",
            hypothesis: "Specific benefits will increase engagement and conversion by 20-30%",
            category: Category::Copy,
            reasoning: "Concrete outcomes are more persuasive than a general promise",
            implementation: "1. Add bullets such as \"Fall asleep faster\" and \"Reduce daily stress\" 2. Place them below the headline 3. Keep each to one line",
            success_metrics: "Time on page, scroll depth, conversion rate",
            priority: Priority::High,
        },
    },
];

const WELLNESS_POOL: &[IdeaTemplate] = &[
    IdeaTemplate {
        title: "Add \"7-Day Sleep Challenge\" Free Trial",
        description: "Frame the free trial as a seven-day sleep improvement challenge with daily goals",
        hypothesis: "A specific challenge will increase trial signup by 40-60%",
        category: Category::Ux,
        reasoning: "A concrete challenge is more compelling than an open-ended trial",
        implementation: "1. Build a challenge landing section 2. Define daily goals 3. Add progress tracking 4. Send a daily email",
        success_metrics: "Trial signup rate, challenge completion rate",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add \"Before/After Sleep Quality\" Testimonials",
        description: "Show customer sleep improvements as before/after comparisons with real numbers",
        hypothesis: "Specific sleep results will increase conversion by 35-50%",
        category: Category::SocialProof,
        reasoning: "Measured results are more compelling than general praise",
        implementation: "1. Collect sleep improvement stories 2. Build before/after cards 3. Include hours slept and quality scores 4. Add customer photos",
        success_metrics: "Conversion rate, time on page",
        priority: Priority::High,
    },
];

const LEARNING_TRIGGERED: &[TriggeredTemplate] = &[
    TriggeredTemplate {
        triggers: &["get started", "get access", "masterclass"],
        template: IdeaTemplate {
            title: "Change the \"Get ...\" CTA to \"Start Learning Today\"",
            description: "Replace the generic \"get\" CTA with action-oriented copy that promises immediate learning",
            hypothesis: "An action-oriented CTA will increase conversion by 25-35%",
            category: Category::Copy,
            reasoning: "Action-focused CTAs convert better than generic \"get\" language",
            implementation: "1. Change the button text to \"Start Learning Today\" 2. Test \"Access All Classes\" 3. A/B test against the current version",
            success_metrics: "Click-through rate, conversion rate",
            priority: Priority::High,
        },
    },
    TriggeredTemplate {
        triggers: &["learn from the best"],
        template: IdeaTemplate {
            title: "Add Named Instructors Below \"Learn From the Best\"",
            description: "List three or four well-known instructors with photos directly below the main headline",
            hypothesis: "Named instructors will increase engagement and conversion by 30-40%",
            category: Category::Copy,
            reasoning: "Specific names are more compelling than a generic \"best\" claim",
            implementation: "1. Pick the most recognizable instructors 2. Add their names and photos below the headline 3. Link each to a class preview",
            success_metrics: "Time on page, scroll depth, conversion rate",
            priority: Priority::High,
        },
    },
    TriggeredTemplate {
        triggers: &["bite-sized", "bite sized"],
        template: IdeaTemplate {
            title: "Add \"Complete a Lesson in 10 Minutes\" Social Proof",
            description: "Back the bite-sized lesson claim with completion time and completion rate statistics",
            hypothesis: "Time-specific proof will increase conversion by 25-35%",
            category: Category::SocialProof,
            reasoning: "Time commitment is a major barrier and quick wins build confidence",
            implementation: "1. Add \"Complete a lesson in just 10 minutes\" 2. Show completion rate 3. Place below the hero 4. Add student quotes",
            success_metrics: "Conversion rate, lesson completion rate",
            priority: Priority::High,
        },
    },
];

const LEARNING_POOL: &[IdeaTemplate] = &[
    IdeaTemplate {
        title: "Add \"What Do You Want to Learn?\" Quiz",
        description: "Add a short interactive quiz that recommends classes based on the visitor's goals",
        hypothesis: "Personalized recommendations will increase conversion by 40-60%",
        category: Category::Ux,
        reasoning: "Personalization makes the catalogue feel relevant",
        implementation: "1. Write a five-question quiz 2. Map answers to course recommendations 3. Collect email for results 4. Follow up with matching content",
        success_metrics: "Quiz engagement, conversion rate, email signups",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add \"Student Success Stories\" Section",
        description: "Show specific student achievements and career improvements after taking courses",
        hypothesis: "Student success stories will increase conversion by 35-50%",
        category: Category::SocialProof,
        reasoning: "Specific outcomes are more compelling than generic testimonials",
        implementation: "1. Collect student stories 2. Include before/after career results 3. Add photos and names 4. Place after the hero section",
        success_metrics: "Conversion rate, time on page",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add \"Free Sample Lesson\" CTA",
        description: "Offer a free sample lesson as a secondary CTA to demonstrate value before purchase",
        hypothesis: "A free sample will increase trial signup by 50-80%",
        category: Category::Ux,
        reasoning: "Sampling the product removes doubt about its quality",
        implementation: "1. Publish a free sample lesson 2. Add a \"Try a Free Lesson\" button 3. Gate it behind email 4. Follow up with recommendations",
        success_metrics: "Trial signup rate, email capture rate",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Highlight Course Completion Certificates",
        description: "Show a certificate preview and explain the career value of completing a course",
        hypothesis: "Certificates will increase conversion by 20-30%",
        category: Category::Trust,
        reasoning: "Certificates turn learning time into a tangible credential",
        implementation: "1. Add a certificate preview image 2. Show example certificates 3. Explain career benefits 4. Mention certificates on course cards",
        success_metrics: "Conversion rate, course completion rate",
        priority: Priority::Medium,
    },
];

const ECOMMERCE_POOL: &[IdeaTemplate] = &[
    IdeaTemplate {
        title: "Add \"Free Shipping\" Badge Near CTAs",
        description: "Display the free shipping offer prominently next to the add-to-cart buttons",
        hypothesis: "Free shipping messaging will increase conversion by 20-30%",
        category: Category::Trust,
        reasoning: "Shipping costs are the most common reason for cart abandonment",
        implementation: "1. Add a \"Free Shipping\" badge next to product CTAs 2. Use a contrasting color 3. Test placements",
        success_metrics: "Conversion rate, cart abandonment rate",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add \"Customer Reviews\" Section With Star Ratings",
        description: "Show customer reviews with star ratings and photos near the product CTAs",
        hypothesis: "Visible reviews will increase conversion by 25-40%",
        category: Category::SocialProof,
        reasoning: "Shoppers trust other customers more than product copy",
        implementation: "1. Add a review section 2. Show star ratings 3. Include customer photos 4. Place it near product CTAs",
        success_metrics: "Conversion rate, trust score",
        priority: Priority::High,
    },
];

const SAAS_POOL: &[IdeaTemplate] = &[
    IdeaTemplate {
        title: "Add \"Start Free Trial\" Primary CTA",
        description: "Make a no-credit-card free trial the primary CTA in the hero",
        hypothesis: "A free trial CTA will increase conversion by 40-60%",
        category: Category::Ux,
        reasoning: "Trying the software removes doubt that demos and copy cannot",
        implementation: "1. Add a \"Start Free Trial\" button 2. State \"no credit card required\" 3. Collect only email 4. Follow up with onboarding",
        success_metrics: "Trial signup rate, trial-to-paid conversion",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add Interactive Product Demo Below Hero",
        description: "Embed a clickable walkthrough or short screen recording of the core workflow",
        hypothesis: "Showing the product will increase understanding and conversion by 20-30%",
        category: Category::Ux,
        reasoning: "Visitors convert when they can see the product solve their problem",
        implementation: "1. Record the core workflow 2. Build a clickable demo 3. Place it below the hero 4. Track demo completion",
        success_metrics: "Demo engagement, time on page, conversion rate",
        priority: Priority::Medium,
    },
];

const GENERIC_TRIGGERED: &[TriggeredTemplate] = &[
    TriggeredTemplate {
        triggers: &["free"],
        template: IdeaTemplate {
            title: "Make the \"Free\" Offer More Prominent",
            description: "Move the free offer into the headline or CTA and state exactly what is free",
            hypothesis: "Clearer free-offer messaging will increase conversion by 20-30%",
            category: Category::Copy,
            reasoning: "A visible free offer lowers the cost of trying",
            implementation: "1. Put the offer in the hero 2. State what is included 3. Test offer copy 4. A/B test placement",
            success_metrics: "Conversion rate, trial signup rate",
            priority: Priority::High,
        },
    },
    TriggeredTemplate {
        triggers: &["get", "start"],
        template: IdeaTemplate {
            title: "Rewrite CTA Button Copy Around the Outcome",
            description: "Replace the generic \"get\" or \"start\" button copy with the outcome the visitor receives",
            hypothesis: "Outcome-focused CTA copy will increase click-through by 25-35%",
            category: Category::Copy,
            reasoning: "Buttons that name the benefit convert better than bare verbs",
            implementation: "1. List the main outcomes 2. Write CTA variations around them 3. A/B test the versions 4. Keep the winner",
            success_metrics: "Click-through rate, conversion rate",
            priority: Priority::High,
        },
    },
];

fn pools(business_type: BusinessType) -> (&'static [TriggeredTemplate], &'static [IdeaTemplate]) {
    match business_type {
        BusinessType::Wellness => (WELLNESS_TRIGGERED, WELLNESS_POOL),
        BusinessType::Learning => (LEARNING_TRIGGERED, LEARNING_POOL),
        BusinessType::Ecommerce => (&[], ECOMMERCE_POOL),
        BusinessType::Saas => (&[], SAAS_POOL),
        BusinessType::Generic => (GENERIC_TRIGGERED, &[]),
    }
}

/// Triggered templates whose phrase occurs in `text_lower`, then the fixed
/// templates of the archetype.
pub fn archetype_ideas(business_type: BusinessType, text_lower: &str) -> Vec<Idea> {
    let (triggered, fixed) = pools(business_type);

    triggered
        .iter()
        .filter(|t| t.triggers.iter().any(|phrase| text_lower.contains(phrase)))
        .map(|t| &t.template)
        .chain(fixed.iter())
        .map(|t| t.to_idea(IdeaSource::Archetype))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_not_classified() {
        let placeholder = crate::ocr::OCR_PLACEHOLDER;
        let result = classify(placeholder);
        assert!(!result.confident);
        assert_eq!(result.business_type, BusinessType::Generic);
    }

    #[test]
    fn test_highest_hit_count_wins() {
        // One wellness hit ("sleep") against three ecommerce hits
        let text = "Shop the store, add to cart and sleep easy knowing returns are free forever";
        let result = classify(text);
        assert!(result.confident);
        assert_eq!(result.business_type, BusinessType::Ecommerce);
    }

    #[test]
    fn test_ties_go_to_earlier_rule() {
        // One wellness hit ("calm") and one learning hit ("course")
        let text = "A calm way to finish every course you take, built around your week and goals";
        assert_eq!(classify(text).business_type, BusinessType::Wellness);
    }

    #[test]
    fn test_no_hits_is_generic_but_confident() {
        let text = "Welcome to our website where we do many wonderful things for people nearby";
        let result = classify(text);
        assert!(result.confident);
        assert_eq!(result.business_type, BusinessType::Generic);
    }

    #[test]
    fn test_triggered_templates_come_first() {
        let ideas = archetype_ideas(BusinessType::Learning, "learn from the best with bite-sized lessons");
        assert_eq!(ideas.len(), 2 + LEARNING_POOL.len());
        assert!(ideas[0].title.contains("Learn From the Best"));
        assert!(ideas[1].title.contains("10 Minutes"));
        assert!(ideas.iter().all(|i| i.source == IdeaSource::Archetype));
    }

    #[test]
    fn test_generic_pool_without_triggers_is_empty() {
        assert!(archetype_ideas(BusinessType::Generic, "welcome").is_empty());
        assert_eq!(archetype_ideas(BusinessType::Generic, "get it free").len(), 2);
    }

    #[test]
    fn test_business_type_names() {
        assert_eq!(BusinessType::Saas.as_str(), "saas");
        assert_eq!(serde_json::to_value(BusinessType::Ecommerce).unwrap(), "ecommerce");
    }
}
