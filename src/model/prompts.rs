//! Prompt templates. Placeholders use `{name}` and are filled in a single pass,
//! so braces inside substituted content are left alone.

/// Asks the vision model for a quote-rich description of the screenshot.
pub const DESCRIBE_PROMPT: &str = r#"Analyze this landing page screenshot in detail for CRO optimization purposes. Provide a comprehensive description including:

1. Page Structure: header, hero section, content sections, footer layout
2. Key UI Elements:
   - Buttons and CTAs (location, color, size, copy, prominence)
   - Forms and input fields (number of fields, labels, validation indicators)
   - Navigation menu and links (placement, style)
   - Images, logos and graphics (relevance, quality, placement)
3. Content Analysis:
   - Headlines and subheadings (tone, length, messaging, hierarchy)
   - Body text (clarity, benefit focus)
   - Value propositions and benefits (how clearly communicated)
   - Social proof (testimonials, reviews, customer logos, case studies)
4. Design Elements:
   - Color scheme and contrast
   - Typography and font hierarchy
   - Spacing, layout and visual flow
5. Conversion Elements:
   - Primary and secondary CTAs
   - Trust signals (badges, guarantees, security indicators)
   - Urgency and scarcity elements
6. Technical Aspects:
   - Mobile responsiveness indicators
   - Form validation and accessibility
7. Potential Issues:
   - Conversion barriers and friction points
   - Missing elements that could boost conversion

Be extremely specific about what you observe. Quote exact text, describe exact colors, mention specific button copy and reference sections by name, for example:
- "The hero headline reads '[exact text]' in [color] font"
- "The primary CTA button says '[exact text]' and is [color]"
- "There's a section titled '[exact text]' with [description]""#;

/// System message for idea generation.
pub const IDEAS_SYSTEM: &str = "You are a senior Growth Product Manager and CRO expert. Generate EXACTLY 20 specific, actionable growth ideas based on the image analysis. Each idea must be specific to what you observe in the image.";

/// Main idea request. Placeholders: `{image_description}`, `{extracted_text}`, `{visual_elements}`.
pub const IDEAS_PROMPT: &str = r#"Analyze this landing page and generate EXACTLY 20 specific, actionable growth ideas.

IMAGE ANALYSIS:
{image_description}

EXTRACTED TEXT:
{extracted_text}

VISUAL ELEMENTS:
{visual_elements}

Each idea must be:
- SPECIFIC to what you observe (reference actual elements, text and design)
- ACTIONABLE (a PM can implement it immediately)
- MEASURABLE (clear success metrics)
- TACTICAL (a concrete growth tactic, not "optimize" or "improve" without saying what changes)

Use tactics such as benefit-first copy, social proof placement, trust signals, CTA psychology,
form friction reduction, visual hierarchy, urgency and scarcity, and mobile-first design.
Write titles like "Change hero headline from '[current]' to '[benefit-focused version]'" or
"Add [specific trust signal] next to [specific element]".

For each idea provide:
1. title: specific action with clear direction
2. description: what exactly to change and why, referencing elements from the page
3. hypothesis: testable statement with expected lift
4. category: one of copy, design, ux, technical, layout, trust, social_proof
5. reasoning: why it improves conversion
6. implementation: step-by-step changes for this page
7. success_metrics: KPIs to measure
8. priority: high, medium or low

Return ONLY a JSON array of objects with the fields:
title, description, hypothesis, category, reasoning, implementation, success_metrics, priority"#;

/// Follow-up request for a smaller batch. Same placeholders as [`IDEAS_PROMPT`] plus `{count}`.
pub const ADDITIONAL_IDEAS_PROMPT: &str = r#"Based on this landing page analysis, generate {count} more specific, actionable ideas:

Image: {image_description}
Text: {extracted_text}
Elements: {visual_elements}

Focus on specific elements you can see on the page. Each idea must reference something concrete from the landing page.

Return ONLY a JSON array of objects with: title, description, hypothesis, category, reasoning, implementation, success_metrics, priority"#;

/// Replaces each known `{name}` placeholder with its value.
///
/// Substituted values are never scanned again. Unknown names are kept verbatim.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let known = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match known {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Fills the idea prompt placeholders.
pub fn fill(template: &str, description: &str, text: &str, elements_json: &str) -> String {
    render(
        template,
        &[
            ("image_description", description),
            ("extracted_text", text),
            ("visual_elements", elements_json),
        ],
    )
}

/// Fills the top-up prompt, which also asks for `count` ideas.
pub fn fill_with_count(
    template: &str,
    description: &str,
    text: &str,
    elements_json: &str,
    count: usize,
) -> String {
    let count = count.to_string();
    render(
        template,
        &[
            ("image_description", description),
            ("extracted_text", text),
            ("visual_elements", elements_json),
            ("count", &count),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_all_placeholders() {
        let prompt = fill(IDEAS_PROMPT, "Hero says 'Hi'", "Hi there", "{}");
        assert!(prompt.contains("Hero says 'Hi'"));
        assert!(prompt.contains("Hi there"));
        assert!(!prompt.contains("{image_description}"));
        assert!(!prompt.contains("{extracted_text}"));
        assert!(!prompt.contains("{visual_elements}"));
    }

    #[test]
    fn test_placeholders_inside_page_content_survive() {
        let prompt = fill_with_count(
            ADDITIONAL_IDEAS_PROMPT,
            "Banner reads {count} seats left",
            "Use {extracted_text} and {visual_elements} here",
            r#"{"buttons": []}"#,
            10,
        );
        assert!(prompt.contains("generate 10 more"));
        assert!(prompt.contains("Banner reads {count} seats left"));
        assert!(prompt.contains("Use {extracted_text} and {visual_elements} here"));
        assert!(prompt.contains(r#"{"buttons": []}"#));
    }

    #[test]
    fn test_render_keeps_unknown_and_unclosed_braces() {
        let out = render("a {x} {y} {z", &[("x", "1")]);
        assert_eq!(out, "a 1 {y} {z");
    }
}
