//! Backlog summary statistics.

use serde::Serialize;

use super::ice::ScoredIdea;
use super::ideas::Priority;

/// Reported for every non-empty backlog.
pub const ESTIMATED_TOTAL_LIFT: &str = "10-25% conversion increase";

/// Aggregate figures for a scored backlog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacklogStats {
    /// Number of ideas
    pub total_ideas: usize,
    /// Ideas whose ICE priority is high
    pub high_priority_ideas: usize,
    /// Mean impact, one decimal
    pub average_impact: f64,
    /// Mean effort, one decimal
    pub average_effort: f64,
    pub estimated_total_lift: &'static str,
}

/// Serializes as `{}` when there is nothing to summarize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Empty {},
    Backlog(BacklogStats),
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    let total: f64 = values.sum();
    let mean = total / count as f64;
    (mean * 10.0).round() / 10.0
}

pub fn summarize(ideas: &[ScoredIdea]) -> Summary {
    if ideas.is_empty() {
        return Summary::Empty {};
    }

    let count = ideas.len();
    Summary::Backlog(BacklogStats {
        total_ideas: count,
        high_priority_ideas: ideas
            .iter()
            .filter(|i| i.ice.priority == Priority::High)
            .count(),
        average_impact: mean(ideas.iter().map(|i| i.ice.impact), count),
        average_effort: mean(ideas.iter().map(|i| i.ice.effort), count),
        estimated_total_lift: ESTIMATED_TOTAL_LIFT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ice::score_ideas;
    use crate::analysis::ideas::general_pool_ideas;

    #[test]
    fn test_empty_summary_serializes_as_empty_object() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::Empty {});
        assert_eq!(serde_json::to_string(&summary).unwrap(), "{}");
    }

    #[test]
    fn test_summary_of_general_pool() {
        let scored = score_ideas(general_pool_ideas());
        let Summary::Backlog(stats) = summarize(&scored) else {
            panic!("expected backlog stats");
        };

        assert_eq!(stats.total_ideas, 20);
        let high = scored.iter().filter(|i| i.ice.priority == Priority::High).count();
        assert_eq!(stats.high_priority_ideas, high);
        assert!((1.0..=10.0).contains(&stats.average_impact));
        assert!((1.0..=10.0).contains(&stats.average_effort));
        assert_eq!(stats.estimated_total_lift, ESTIMATED_TOTAL_LIFT);
    }

    #[test]
    fn test_mean_rounds_to_one_decimal() {
        assert_eq!(mean([1.0, 2.0, 2.0].into_iter(), 3), 1.7);
    }

    #[test]
    fn test_backlog_summary_json_fields() {
        let scored = score_ideas(general_pool_ideas());
        let json = serde_json::to_value(summarize(&scored)).unwrap();
        assert_eq!(json["total_ideas"], 20);
        assert_eq!(json["estimated_total_lift"], "10-25% conversion increase");
    }
}
