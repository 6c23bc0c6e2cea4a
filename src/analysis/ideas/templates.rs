//! Hand-authored idea pools used when the assisted path is unavailable or short.

use super::{Category, Idea, IdeaSource, Priority};

/// A fixed idea. `{count}` in the description is replaced by callers that
/// condition a template on a detected element count.
#[derive(Clone, Copy, Debug)]
pub struct IdeaTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub hypothesis: &'static str,
    pub category: Category,
    pub reasoning: &'static str,
    pub implementation: &'static str,
    pub success_metrics: &'static str,
    pub priority: Priority,
}

impl IdeaTemplate {
    pub fn to_idea(&self, source: IdeaSource) -> Idea {
        Idea {
            title: self.title.to_string(),
            description: self.description.to_string(),
            hypothesis: self.hypothesis.to_string(),
            category: self.category,
            reasoning: self.reasoning.to_string(),
            implementation: self.implementation.to_string(),
            success_metrics: self.success_metrics.to_string(),
            priority: self.priority,
            source,
        }
    }

    /// Like [`to_idea`](Self::to_idea), substituting `{count}` in the description.
    pub fn to_idea_with_count(&self, source: IdeaSource, count: usize) -> Idea {
        let mut idea = self.to_idea(source);
        idea.description = idea.description.replace("{count}", &count.to_string());
        idea
    }
}

/// Proven, business-agnostic tactics appended after the archetype pools.
pub const TACTICAL_POOL: [IdeaTemplate; 10] = [
    IdeaTemplate {
        title: "Add \"As Seen In\" Media Logos Section",
        description: "Display logos of media outlets, publications or companies that have featured or used the product",
        hypothesis: "Media logos will increase credibility and conversion by 15-25%",
        category: Category::SocialProof,
        reasoning: "Third-party logos act as borrowed authority and build instant credibility",
        implementation: "1. Collect press and customer logos 2. Build an \"As Seen In\" strip 3. Place it directly above or below the hero 4. Link logos to the coverage",
        success_metrics: "Conversion rate, trust score, time on page",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Add \"Join X,XXX+ Customers\" Social Proof",
        description: "Show the number of customers or active users next to the primary CTA",
        hypothesis: "A visible customer count will increase conversion by 10-20%",
        category: Category::SocialProof,
        reasoning: "Large numbers signal popularity and reduce the perceived risk of signing up",
        implementation: "1. Pull the current customer count 2. Write \"Join X,XXX+ customers\" copy 3. Place it beside the hero CTA 4. Refresh the number monthly",
        success_metrics: "Conversion rate, trust score",
        priority: Priority::Low,
    },
    IdeaTemplate {
        title: "Add \"Free Trial\" or \"Money-Back Guarantee\" Badge",
        description: "Place a prominent risk-reversal badge next to the CTA buttons",
        hypothesis: "Risk reversal will increase conversion by 20-35%",
        category: Category::Trust,
        reasoning: "Removing financial risk lowers purchase anxiety at the moment of decision",
        implementation: "1. Design a guarantee badge 2. Place it beside each CTA button 3. Use a contrasting color 4. Link to the guarantee terms",
        success_metrics: "Conversion rate, cart abandonment rate",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Add \"Limited Time\" or \"Exclusive\" Offer",
        description: "Create urgency with limited-time pricing or exclusive access shown near the CTA",
        hypothesis: "Scarcity will increase conversion by 25-40%",
        category: Category::Ux,
        reasoning: "Scarcity triggers loss aversion and motivates immediate action",
        implementation: "1. Define a genuine limited-time offer 2. Add a countdown timer 3. Use \"Limited Time\" language in the banner 4. Place it next to the CTA",
        success_metrics: "Conversion rate, time to purchase",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Add \"How It Works\" Step-by-Step Section",
        description: "Add a three-step visual section right after the hero explaining how the product works",
        hypothesis: "Process clarity will increase conversion by 15-25%",
        category: Category::Ux,
        reasoning: "Visitors convert when they can picture the path from signup to result",
        implementation: "1. Break the process into 3-4 steps 2. Add an icon per step 3. Keep each step to one sentence 4. Place the section after the hero",
        success_metrics: "Time on page, conversion rate, bounce rate",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Add \"Before/After\" Case Study Section",
        description: "Show one customer's measurable results as a before/after comparison with photo and name",
        hypothesis: "Concrete results will increase conversion by 30-50%",
        category: Category::SocialProof,
        reasoning: "Specific numbers are more persuasive than general praise",
        implementation: "1. Find a customer with measurable results 2. Build a before/after comparison 3. Include specific metrics 4. Add the customer's photo and name",
        success_metrics: "Conversion rate, time on page",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add \"FAQ\" Section to Address Objections",
        description: "Add an FAQ section above the footer answering the most common objections",
        hypothesis: "Answering objections on the page will increase conversion by 10-20%",
        category: Category::Copy,
        reasoning: "Unanswered questions stall decisions and send visitors elsewhere",
        implementation: "1. Collect objections from sales and support 2. Write short benefit-focused answers 3. Use an accordion layout 4. Place it before the footer",
        success_metrics: "Conversion rate, support inquiries",
        priority: Priority::Low,
    },
    IdeaTemplate {
        title: "Add \"Live Chat\" or \"Support\" Indicator",
        description: "Show that help is available with a live chat widget or support hours near the CTA",
        hypothesis: "Visible support will increase conversion by 10-15%",
        category: Category::Trust,
        reasoning: "Knowing help is available reduces the risk of committing",
        implementation: "1. Add a live chat widget 2. Show support hours 3. Display typical response time 4. Keep the widget visible on scroll",
        success_metrics: "Conversion rate, chat engagement",
        priority: Priority::Low,
    },
    IdeaTemplate {
        title: "Add \"Mobile-First\" Design Optimization",
        description: "Rework the mobile layout with larger touch targets and a sticky CTA button",
        hypothesis: "Mobile optimization will increase mobile conversion by 20-40%",
        category: Category::Technical,
        reasoning: "Most landing page traffic is mobile and small touch targets leak conversions",
        implementation: "1. Audit the page on small screens 2. Enlarge buttons to 44px minimum 3. Add a sticky mobile CTA 4. Simplify mobile navigation",
        success_metrics: "Mobile conversion rate, bounce rate",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Add \"A/B Testing\" Framework",
        description: "Set up systematic A/B testing of the headline, CTA copy and hero image",
        hypothesis: "Continuous testing will increase conversion by 10-30%",
        category: Category::Technical,
        reasoning: "Measured iteration consistently beats opinion-driven changes",
        implementation: "1. Install a testing tool 2. Test headline, CTA and hero image first 3. Run to statistical significance 4. Ship the winners",
        success_metrics: "Conversion rate improvement, test win rate",
        priority: Priority::Medium,
    },
];

/// Unconditional pool of general CRO ideas. The last line of defence: used
/// whole when generation fails and to top up any shortfall.
pub const GENERAL_POOL: [IdeaTemplate; 20] = [
    IdeaTemplate {
        title: "Add Customer Testimonials Section",
        description: "Add a testimonials section with real customer quotes and photos below the hero section",
        hypothesis: "Adding social proof will increase conversion by 15-25%",
        category: Category::SocialProof,
        reasoning: "Social proof builds trust and reduces purchase anxiety",
        implementation: "1. Collect customer testimonials 2. Design testimonial cards 3. Add below the hero section 4. Include customer photos and names",
        success_metrics: "Conversion rate, time on page, scroll depth",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Optimize Hero Headline",
        description: "Rewrite the main headline to lead with the primary benefit and a clear value proposition",
        hypothesis: "A benefit-focused headline will increase conversion by 20-30%",
        category: Category::Copy,
        reasoning: "A clear value proposition tells visitors immediately what they gain",
        implementation: "1. Identify the primary user benefit 2. Write 3-5 headline variations 3. A/B test them 4. Keep the winner",
        success_metrics: "Click-through rate, bounce rate, conversion rate",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add Trust Badges",
        description: "Display security badges, certifications and guarantees prominently near the form and CTA",
        hypothesis: "Trust signals will increase conversion by 10-15%",
        category: Category::Trust,
        reasoning: "Badges reduce purchase anxiety and borrow credibility",
        implementation: "1. Add an SSL badge 2. Display a money-back guarantee 3. Show customer count 4. Add security certifications",
        success_metrics: "Conversion rate, cart abandonment rate",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Improve CTA Button Design",
        description: "Make the primary CTA button more prominent with stronger contrast and action-oriented copy",
        hypothesis: "A more prominent CTA will increase click-through by 25-40%",
        category: Category::Design,
        reasoning: "Button prominence and copy directly drive clicks",
        implementation: "1. Increase button size 2. Use a high-contrast color 3. Test action-oriented copy 4. Add a hover state",
        success_metrics: "Click-through rate, conversion rate",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add Urgency Elements",
        description: "Add a countdown timer, limited-time offer or stock indicator near the CTA",
        hypothesis: "Urgency will increase conversion by 15-25%",
        category: Category::Ux,
        reasoning: "Urgency shortens deliberation and accelerates decisions",
        implementation: "1. Add a countdown timer 2. Show limited availability 3. Display expiring offers 4. Test urgency messages",
        success_metrics: "Conversion rate, time to purchase",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Optimize Form Fields",
        description: "Cut the signup form to the minimum required fields and add a progress indicator",
        hypothesis: "Less form friction will increase completion by 20-35%",
        category: Category::Ux,
        reasoning: "Every extra form field lowers completion",
        implementation: "1. Remove optional fields 2. Add a progress bar 3. Use smart defaults 4. Add inline validation",
        success_metrics: "Form completion rate, time to complete",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add Social Proof Numbers",
        description: "Display customer count, review count or satisfaction rate in the hero section",
        hypothesis: "Social proof numbers will increase conversion by 10-20%",
        category: Category::SocialProof,
        reasoning: "Numbers are concrete evidence of popularity",
        implementation: "1. Add customer count 2. Display review count 3. Show satisfaction rate 4. Add \"as featured in\" logos",
        success_metrics: "Conversion rate, trust indicators",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Improve Mobile Responsiveness",
        description: "Ensure every element is sized and spaced for mobile devices",
        hypothesis: "A better mobile experience will increase mobile conversion by 30-50%",
        category: Category::Technical,
        reasoning: "Mobile visitors abandon layouts that are hard to tap and read",
        implementation: "1. Test on multiple devices 2. Enlarge touch targets 3. Improve loading speed 4. Simplify navigation",
        success_metrics: "Mobile conversion rate, bounce rate",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add FAQ Section",
        description: "Add an FAQ section that answers common objections and questions",
        hypothesis: "An FAQ section will increase conversion by 10-15%",
        category: Category::Copy,
        reasoning: "Answered objections stop being barriers",
        implementation: "1. Research common questions 2. Write clear answers 3. Make the FAQ searchable 4. Link to it from key areas",
        success_metrics: "Support ticket reduction, conversion rate",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Implement Exit-Intent Popup",
        description: "Show a compelling offer when a visitor is about to leave the page",
        hypothesis: "An exit-intent popup will recover 5-15% of abandoning visitors",
        category: Category::Ux,
        reasoning: "Exit intent is the last chance to capture a leaving visitor",
        implementation: "1. Design an offer 2. Set up exit detection 3. A/B test offers 4. Track recovery",
        success_metrics: "Recovery rate, additional conversions",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Add Video Testimonials",
        description: "Embed short video testimonials from satisfied customers in the hero section",
        hypothesis: "Video testimonials will increase conversion by 20-35%",
        category: Category::SocialProof,
        reasoning: "Video is harder to fake and more engaging than text",
        implementation: "1. Record customer testimonials 2. Edit to under a minute 3. Add to the hero section 4. Include transcripts",
        success_metrics: "Engagement rate, conversion rate, time on page",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Optimize Page Load Speed",
        description: "Speed up the page by compressing images, deferring scripts and caching",
        hypothesis: "Faster loading will increase conversion by 10-20%",
        category: Category::Technical,
        reasoning: "Every second of load time costs visitors before they see the offer",
        implementation: "1. Compress images 2. Minify CSS and JS 3. Enable caching 4. Serve assets from a CDN",
        success_metrics: "Page load time, bounce rate, conversion rate",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Add Money-Back Guarantee",
        description: "Display a money-back guarantee next to the pricing and CTA",
        hypothesis: "A money-back guarantee will increase conversion by 15-25%",
        category: Category::Trust,
        reasoning: "Guarantees reduce perceived risk",
        implementation: "1. Design a guarantee badge 2. Add it to several locations 3. Include the terms 4. Test guarantee lengths",
        success_metrics: "Conversion rate, refund rate",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Create Comparison Table",
        description: "Add a table comparing the product against common alternatives",
        hypothesis: "A comparison table will increase conversion by 20-30%",
        category: Category::Copy,
        reasoning: "Comparison tables shortcut research that visitors would do elsewhere",
        implementation: "1. Research competitors 2. Build a comparison matrix 3. Highlight advantages 4. Place it in the pricing section",
        success_metrics: "Conversion rate, time to decision",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Add Live Chat Support",
        description: "Add live chat so visitors can get answers before converting",
        hypothesis: "Live chat will increase conversion by 10-20%",
        category: Category::Ux,
        reasoning: "Immediate answers remove last-minute friction",
        implementation: "1. Choose a chat platform 2. Install the widget 3. Train the support team 4. Monitor chat-to-conversion",
        success_metrics: "Chat engagement, conversion rate",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Optimize Above-the-Fold Content",
        description: "Make sure the value proposition and CTA are visible without scrolling",
        hypothesis: "Stronger above-the-fold content will increase conversion by 25-40%",
        category: Category::Layout,
        reasoning: "Visitors decide whether to stay based on the first screen",
        implementation: "1. Audit the first screen on desktop and mobile 2. Prioritize headline and CTA 3. Test layouts 4. Measure engagement",
        success_metrics: "Scroll depth, conversion rate",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add Social Media Proof",
        description: "Show follower counts or embedded posts from customers on social media",
        hypothesis: "Social media proof will increase conversion by 10-15%",
        category: Category::SocialProof,
        reasoning: "An active community signals a credible brand",
        implementation: "1. Embed selected posts 2. Display follower counts 3. Show share counts 4. Link to profiles",
        success_metrics: "Social engagement, conversion rate",
        priority: Priority::Low,
    },
    IdeaTemplate {
        title: "Implement A/B Testing Framework",
        description: "Set up A/B testing to continuously improve page elements",
        hypothesis: "A/B testing will increase conversion by 10-30% over time",
        category: Category::Technical,
        reasoning: "Data-driven iteration outperforms guesswork",
        implementation: "1. Choose a testing platform 2. Set up tracking 3. Write test hypotheses 4. Run tests continuously",
        success_metrics: "Test win rate, overall conversion improvement",
        priority: Priority::High,
    },
    IdeaTemplate {
        title: "Add Progress Indicators",
        description: "Show a progress bar or step numbers for multi-step signup flows",
        hypothesis: "Progress indicators will increase completion by 15-25%",
        category: Category::Ux,
        reasoning: "Seeing the end of a flow makes finishing it feel achievable",
        implementation: "1. Add a progress bar 2. Show step numbers 3. Include time estimates 4. Test designs",
        success_metrics: "Completion rate, time to complete",
        priority: Priority::Medium,
    },
    IdeaTemplate {
        title: "Optimize for Voice Search",
        description: "Add natural-language questions and answers so the page ranks for voice queries",
        hypothesis: "Voice search optimization will increase organic traffic by 15-25%",
        category: Category::Technical,
        reasoning: "Voice queries are phrased as questions and reward direct answers",
        implementation: "1. Research voice keywords 2. Add question-style content 3. Target featured snippets 4. Test voice queries",
        success_metrics: "Voice search traffic, featured snippet appearances",
        priority: Priority::Low,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pool_sizes() {
        assert_eq!(TACTICAL_POOL.len(), 10);
        assert!(GENERAL_POOL.len() >= 20);
    }

    #[test]
    fn test_titles_unique_across_pools() {
        let mut seen = HashSet::new();
        for template in TACTICAL_POOL.iter().chain(GENERAL_POOL.iter()) {
            assert!(seen.insert(template.title), "duplicate title: {}", template.title);
        }
    }

    #[test]
    fn test_count_substitution() {
        let template = IdeaTemplate {
            description: "Improve the {count} detected buttons",
            ..GENERAL_POOL[0]
        };
        let idea = template.to_idea_with_count(IdeaSource::VisualAnalysis, 3);
        assert_eq!(idea.description, "Improve the 3 detected buttons");
        assert_eq!(idea.source, IdeaSource::VisualAnalysis);
    }
}
