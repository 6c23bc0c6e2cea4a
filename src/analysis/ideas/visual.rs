//! Ideas conditioned on what the detectors found (or did not find).
//! Used when the page text is too short to classify.

use super::templates::IdeaTemplate;
use super::{Category, Idea, IdeaSource, Priority};
use crate::vision::VisualElements;

/// Chosen when a detector fired; `{count}` is the number of detections.
const CTA_PRESENT: IdeaTemplate = IdeaTemplate {
    title: "Optimize Existing CTA Button Copy and Design",
    description: "Improve the {count} detected CTA buttons with action-oriented copy and a clearer visual hierarchy",
    hypothesis: "Better CTA design will increase click-through rates by 20-30%",
    category: Category::Design,
    reasoning: "Existing CTAs can be tuned for contrast, size and wording",
    implementation: "1. Review current button text 2. Replace it with action-oriented copy 3. Test button colors and sizes 4. A/B test variations",
    success_metrics: "Click-through rate, conversion rate",
    priority: Priority::High,
};

const CTA_MISSING: IdeaTemplate = IdeaTemplate {
    title: "Add Primary CTA Button in Hero Section",
    description: "Add a prominent call-to-action button in the hero section where attention is highest",
    hypothesis: "Adding a primary CTA will increase conversion by 40-60%",
    category: Category::Design,
    reasoning: "Visitors who are ready to act need an obvious next step on the first screen",
    implementation: "1. Design a prominent CTA button 2. Use action-oriented copy 3. Place it in the hero section 4. Test button colors",
    success_metrics: "Click-through rate, conversion rate",
    priority: Priority::High,
};

const FORMS_PRESENT: IdeaTemplate = IdeaTemplate {
    title: "Optimize Form Fields and Reduce Friction",
    description: "Streamline the {count} detected form fields to reduce abandonment and increase completion",
    hypothesis: "Form optimization will increase completion rates by 30-50%",
    category: Category::Ux,
    reasoning: "Forms are the main conversion point and the main source of abandonment",
    implementation: "1. Audit current fields 2. Remove unnecessary fields 3. Add a progress indicator 4. Improve field labels",
    success_metrics: "Form completion rate, conversion rate, time to complete",
    priority: Priority::High,
};

const FORMS_MISSING: IdeaTemplate = IdeaTemplate {
    title: "Add Lead Capture Form Below Hero",
    description: "Add a short email capture form with a clear offer below the hero section",
    hypothesis: "Adding lead capture will increase lead generation by 50-100%",
    category: Category::Ux,
    reasoning: "Visitors not ready to buy can still be captured as leads",
    implementation: "1. Design a one-field lead form 2. Pair it with a compelling offer 3. Place it below the hero 4. Test the form copy",
    success_metrics: "Lead capture rate, email signups",
    priority: Priority::High,
};

const HEADLINE_PRESENT: IdeaTemplate = IdeaTemplate {
    title: "Rewrite Hero Headline for Better Value Proposition",
    description: "Rewrite the main headline to lead with a specific benefit and a clear value proposition",
    hypothesis: "A benefit-focused headline will increase conversion by 25-35%",
    category: Category::Copy,
    reasoning: "The headline is read first and has to communicate value immediately",
    implementation: "1. Identify the primary user benefit 2. Rewrite the headline to lead with it 3. A/B test variations 4. Measure conversion lift",
    success_metrics: "Click-through rate, bounce rate, conversion rate",
    priority: Priority::High,
};

const HEADLINE_MISSING: IdeaTemplate = IdeaTemplate {
    title: "Add Compelling Hero Headline",
    description: "Add a benefit-focused headline that tells visitors immediately what they gain",
    hypothesis: "Adding a compelling headline will increase engagement by 40-60%",
    category: Category::Copy,
    reasoning: "Without a headline visitors have to work out the offer themselves",
    implementation: "1. Identify the primary user benefit 2. Write a benefit-focused headline 3. Test variations 4. Optimize for clarity",
    success_metrics: "Time on page, bounce rate, engagement",
    priority: Priority::High,
};

const IMAGES_PRESENT: IdeaTemplate = IdeaTemplate {
    title: "Replace Decorative Images With Conversion-Focused Visuals",
    description: "Swap generic imagery for product shots and customer photos that support the offer",
    hypothesis: "Conversion-focused images will increase engagement and conversion by 15-25%",
    category: Category::Design,
    reasoning: "Images shape perception before any copy is read",
    implementation: "1. Audit current images 2. Replace them with product and customer visuals 3. Add customer photos 4. Test image placement",
    success_metrics: "Time on page, engagement, conversion rate",
    priority: Priority::Medium,
};

const IMAGES_MISSING: IdeaTemplate = IdeaTemplate {
    title: "Add Customer Photos and Social Proof Images",
    description: "Add customer photos, testimonial images and company logos to build trust",
    hypothesis: "Adding customer photos will increase trust and conversion by 20-40%",
    category: Category::SocialProof,
    reasoning: "Real faces and logos make the page feel credible",
    implementation: "1. Collect customer photos 2. Add testimonial images 3. Include company logos 4. Place them near CTAs",
    success_metrics: "Trust score, conversion rate, time on page",
    priority: Priority::Medium,
};

const MOBILE_LAYOUT: IdeaTemplate = IdeaTemplate {
    title: "Optimize Mobile Experience and Touch Targets",
    description: "Improve mobile usability with larger touch targets and a thumb-reachable CTA",
    hypothesis: "Mobile optimization will increase mobile conversion by 30-50%",
    category: Category::Ux,
    reasoning: "Small touch targets and long scrolls lose mobile visitors",
    implementation: "1. Test on real devices 2. Enlarge touch targets 3. Simplify mobile navigation 4. Test mobile forms",
    success_metrics: "Mobile conversion rate, bounce rate, time on page",
    priority: Priority::High,
};

const DESKTOP_LAYOUT: IdeaTemplate = IdeaTemplate {
    title: "Add Mobile-Responsive Design Elements",
    description: "Make sure the desktop layout collapses cleanly on mobile screens with responsive design",
    hypothesis: "Mobile responsiveness will increase mobile conversion by 25-40%",
    category: Category::Technical,
    reasoning: "A large share of traffic arrives on phones even for desktop-first pages",
    implementation: "1. Test the mobile layout 2. Fix breakpoints 3. Improve mobile navigation 4. Test mobile CTAs",
    success_metrics: "Mobile conversion rate, mobile bounce rate",
    priority: Priority::Medium,
};

const COLOR_SCHEME: IdeaTemplate = IdeaTemplate {
    title: "Optimize Color Scheme for CTA Contrast",
    description: "Test color combinations so the CTA stands out from the dominant page colors",
    hypothesis: "Optimized colors will increase conversion by 10-20%",
    category: Category::Design,
    reasoning: "Contrast decides what the eye lands on first",
    implementation: "1. Test CTA button colors 2. Check color contrast 3. Test background colors 4. A/B test color schemes",
    success_metrics: "Conversion rate, click-through rate",
    priority: Priority::Medium,
};

/// Appended regardless of what was detected.
const ALWAYS: [IdeaTemplate; 3] = [
    IdeaTemplate {
        title: "Add Customer Testimonials Section Below Hero",
        description: "Add a testimonials section with customer quotes, photos and specific results",
        hypothesis: "Adding social proof will increase conversion by 25-40%",
        category: Category::SocialProof,
        reasoning: "Social proof reduces purchase anxiety for first-time visitors",
        implementation: "1. Collect 3-5 testimonials with photos 2. Include specific results and company names 3. Design testimonial cards 4. Place below the hero",
        success_metrics: "Conversion rate, bounce rate, time on page",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add Security Badges and Money-Back Guarantee",
        description: "Display security badges and a money-back guarantee next to the CTAs",
        hypothesis: "Trust signals will increase conversion by 15-25%",
        category: Category::Trust,
        reasoning: "Trust signals reduce friction for new customers",
        implementation: "1. Add an SSL badge 2. Display the guarantee 3. Show customer count 4. Place badges near CTAs",
        success_metrics: "Conversion rate, cart abandonment rate, trust score",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Add Limited-Time Offer With Countdown Timer",
        description: "Create urgency with a limited-time offer and countdown timer next to the CTA",
        hypothesis: "Urgency will increase conversion by 20-35%",
        category: Category::Ux,
        reasoning: "A deadline motivates immediate action",
        implementation: "1. Define a limited-time offer 2. Add a countdown timer 3. Place it near the primary CTA 4. Test timeframes",
        success_metrics: "Conversion rate, time to purchase, cart abandonment",
        priority: Priority::Medium,
    },
];

fn pick(present: bool, count: usize, yes: &IdeaTemplate, no: &IdeaTemplate) -> Idea {
    if present {
        yes.to_idea_with_count(IdeaSource::VisualAnalysis, count)
    } else {
        no.to_idea(IdeaSource::VisualAnalysis)
    }
}

pub fn visual_ideas(visual: &VisualElements) -> Vec<Idea> {
    let mut ideas = vec![
        pick(!visual.buttons.is_empty(), visual.buttons.len(), &CTA_PRESENT, &CTA_MISSING),
        pick(!visual.forms.is_empty(), visual.forms.len(), &FORMS_PRESENT, &FORMS_MISSING),
        pick(
            !visual.headlines.is_empty(),
            visual.headlines.len(),
            &HEADLINE_PRESENT,
            &HEADLINE_MISSING,
        ),
        pick(!visual.images.is_empty(), visual.images.len(), &IMAGES_PRESENT, &IMAGES_MISSING),
    ];

    let is_mobile = visual.layout.as_ref().is_some_and(|l| l.is_mobile);
    ideas.push(pick(is_mobile, 0, &MOBILE_LAYOUT, &DESKTOP_LAYOUT));

    let has_palette = visual
        .colors
        .as_ref()
        .is_some_and(|c| !c.dominant_colors.is_empty());
    if has_palette {
        ideas.push(COLOR_SCHEME.to_idea(IdeaSource::VisualAnalysis));
    }

    ideas.extend(ALWAYS.iter().map(|t| t.to_idea(IdeaSource::VisualAnalysis)));
    ideas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::{ColorPalette, DetectedRegion, Rect, RegionKind};

    fn button() -> DetectedRegion {
        DetectedRegion {
            kind: RegionKind::Button,
            position: Rect { x: 0, y: 0, width: 120, height: 40 },
            area: Some(4800),
        }
    }

    #[test]
    fn test_empty_elements_pick_missing_variants() {
        let ideas = visual_ideas(&VisualElements::default());
        assert_eq!(ideas.len(), 8);
        assert_eq!(ideas[0].title, CTA_MISSING.title);
        assert_eq!(ideas[1].title, FORMS_MISSING.title);
        assert_eq!(ideas[4].title, DESKTOP_LAYOUT.title);
        assert!(ideas.iter().all(|i| i.source == IdeaSource::VisualAnalysis));
    }

    #[test]
    fn test_detected_buttons_fill_count() {
        let visual = VisualElements {
            buttons: vec![button(), button(), button()],
            colors: Some(ColorPalette {
                dominant_colors: vec![[255, 255, 255]],
                color_count: 1,
                primary: Some("#ffffff".to_string()),
            }),
            ..VisualElements::default()
        };
        let ideas = visual_ideas(&visual);
        assert_eq!(ideas.len(), 9);
        assert_eq!(
            ideas[0].description,
            "Improve the 3 detected CTA buttons with action-oriented copy and a clearer visual hierarchy"
        );
        assert_eq!(ideas[5].title, COLOR_SCHEME.title);
    }

    #[test]
    fn test_empty_palette_adds_no_color_idea() {
        let visual = VisualElements {
            colors: Some(ColorPalette::default()),
            ..VisualElements::default()
        };
        assert_eq!(visual_ideas(&visual).len(), 8);
    }
}
