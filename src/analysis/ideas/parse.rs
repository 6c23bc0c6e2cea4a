//! Parsing of assisted idea payloads.
//!
//! Models are asked for a JSON array but often wrap it in code fences, nest
//! it under an `ideas` key, return lists for text fields, or ignore the
//! format entirely and answer with labelled lines. All of those are accepted.

use anyhow::Result;
use regex::Regex;
use serde_json::Value;

use super::{Category, Idea, IdeaSource, Priority};

/// `Label: value` line, tolerating list numbering and markdown bold.
const LABEL_PATTERN: &str = r"(?i)^\s*(?:\d+[.)]\s*)?(?:[-*]\s+)?\**\s*(title|description|hypothesis|category|reasoning|implementation|success[ _]metrics|priority)\s*\**\s*:\s*\**\s*(.*?)\s*\**\s*$";

/// Structured parse first, labelled lines second.
pub fn parse_ideas(raw: &str) -> Result<Vec<Idea>> {
    match parse_structured(raw) {
        Some(ideas) => Ok(ideas),
        None => {
            crate::log("Idea payload is not JSON, trying labelled lines");
            parse_labeled(raw)
        }
    }
}

/// Returns `None` when no JSON array of ideas can be found.
pub fn parse_structured(raw: &str) -> Option<Vec<Idea>> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body)
        .ok()
        .or_else(|| embedded_object_array(body))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("ideas") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    Some(items.iter().filter_map(idea_from_value).collect())
}

/// Finds the first JSON array of objects embedded in prose.
///
/// Every `[` is tried as a start, and trailing text after the array is ignored,
/// so bracketed asides like `[20]` before the payload are skipped.
fn embedded_object_array(body: &str) -> Option<Value> {
    body.match_indices('[').find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&body[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Array(items)))
                if !items.is_empty() && items.iter().all(Value::is_object) =>
            {
                Some(Value::Array(items))
            }
            _ => None,
        }
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let after = &trimmed[start + 3..];
    // Skip the language tag line
    let after = match after.find('\n') {
        Some(newline) => &after[newline + 1..],
        None => after,
    };
    match after.rfind("```") {
        Some(end) => after[..end].trim(),
        None => after.trim(),
    }
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn idea_from_value(value: &Value) -> Option<Idea> {
    let object = value.as_object()?;
    let title = field_text(object.get("title"));
    if title.is_empty() {
        return None;
    }

    Some(Idea {
        title,
        description: field_text(object.get("description")),
        hypothesis: field_text(object.get("hypothesis")),
        category: Category::parse(&field_text(object.get("category"))),
        reasoning: field_text(object.get("reasoning")),
        implementation: field_text(object.get("implementation")),
        success_metrics: field_text(
            object
                .get("success_metrics")
                .or_else(|| object.get("successMetrics")),
        ),
        priority: Priority::parse(&field_text(object.get("priority"))),
        source: IdeaSource::Assisted,
    })
}

#[derive(Default)]
struct PartialIdea {
    title: String,
    description: String,
    hypothesis: String,
    category: String,
    reasoning: String,
    implementation: String,
    success_metrics: String,
    priority: String,
}

impl PartialIdea {
    fn finish(self) -> Option<Idea> {
        if self.title.is_empty() {
            return None;
        }
        Some(Idea {
            title: self.title,
            description: self.description,
            hypothesis: self.hypothesis,
            category: Category::parse(&self.category),
            reasoning: self.reasoning,
            implementation: self.implementation,
            success_metrics: self.success_metrics,
            priority: Priority::parse(&self.priority),
            source: IdeaSource::Assisted,
        })
    }
}

/// Reads `Label: value` lines. A new `Title:` starts a new idea; lines that
/// carry no label are ignored.
pub fn parse_labeled(raw: &str) -> Result<Vec<Idea>> {
    let re = Regex::new(LABEL_PATTERN)?;
    let mut ideas = Vec::new();
    let mut current = PartialIdea::default();

    for line in raw.lines() {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let label = caps[1].to_lowercase();
        let value = caps[2].trim_matches(|c: char| c == '"' || c == '\'').trim().to_string();

        match label.as_str() {
            "title" => {
                if let Some(idea) = std::mem::take(&mut current).finish() {
                    ideas.push(idea);
                }
                current.title = value;
            }
            "description" => current.description = value,
            "hypothesis" => current.hypothesis = value,
            "category" => current.category = value,
            "reasoning" => current.reasoning = value,
            "implementation" => current.implementation = value,
            "priority" => current.priority = value,
            _ => current.success_metrics = value,
        }
    }

    if let Some(idea) = current.finish() {
        ideas.push(idea);
    }
    Ok(ideas)
}
