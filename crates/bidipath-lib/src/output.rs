use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Direction, Graph};
use crate::routing::{PathAlgorithm, PathPlan};
use crate::weight::{edge_cost, AttributeWeight};

/// Presentation style for turning a [`PathSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRenderMode {
    PlainText,
    Markdown,
}

/// Step taken while walking a planned path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathStep {
    pub index: usize,
    pub vertex: String,
    /// Cost of the edge that led into this vertex; absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg: Option<f64>,
    /// Distance accumulated from the source up to this vertex.
    pub cumulative: f64,
}

/// Structured representation of a planned path that rendering consumers can
/// serialise or print.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub algorithm: PathAlgorithm,
    pub source: String,
    pub target: String,
    pub distance: f64,
    pub hops: usize,
    pub settled: usize,
    pub steps: Vec<PathStep>,
}

impl PathSummary {
    /// Convert a [`PathPlan`] into a summary, annotating each step with the
    /// cost of the edge that reached it under the plan's weight key.
    pub fn from_plan(graph: &Graph<String>, plan: &PathPlan) -> Result<Self> {
        let Some(first) = plan.steps.first() else {
            return Err(Error::EmptyPath);
        };
        let weight = AttributeWeight::new(&plan.weight_key);

        let mut steps = vec![PathStep {
            index: 0,
            vertex: first.clone(),
            leg: None,
            cumulative: 0.0,
        }];
        let mut cumulative = 0.0;
        for (index, pair) in plan.steps.windows(2).enumerate() {
            let (tail, head) = (&pair[0], &pair[1]);
            let leg = graph
                .neighbours(tail, Direction::Forward)
                .and_then(|adjacency| adjacency.get(head))
                .and_then(|parallel| edge_cost(&weight, tail, head, parallel));
            cumulative += leg.unwrap_or(0.0);
            steps.push(PathStep {
                index: index + 1,
                vertex: head.clone(),
                leg,
                cumulative,
            });
        }

        Ok(Self {
            algorithm: plan.algorithm,
            source: plan.source.clone(),
            target: plan.target.clone(),
            distance: plan.distance,
            hops: plan.hop_count(),
            settled: plan.stats.settled(),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: PathRenderMode) -> String {
        match mode {
            PathRenderMode::PlainText => self.render_plain(),
            PathRenderMode::Markdown => self.render_markdown(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Path: {} -> {} (distance {}, {} hops, algorithm: {})",
            self.source,
            self.target,
            format_distance(self.distance),
            self.hops,
            self.algorithm
        );
        for step in &self.steps {
            match step.leg {
                Some(leg) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} (+{}, {})",
                        step.index,
                        step.vertex,
                        format_distance(leg),
                        format_distance(step.cumulative)
                    );
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {}", step.index, step.vertex);
                }
            }
        }
        buffer
    }

    fn render_markdown(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Path** _{} → {}_ (distance {}, {} hops, algorithm: `{}`)",
            self.source,
            self.target,
            format_distance(self.distance),
            self.hops,
            self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** ({})",
                step.index,
                step.vertex,
                format_distance(step.cumulative)
            );
        }
        buffer
    }
}

/// Whole numbers print without a fractional part; others keep up to three
/// decimals.
fn format_distance(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{value:.3}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeAttributes;
    use crate::path::SearchStats;

    fn plan(steps: &[&str], distance: f64) -> PathPlan {
        PathPlan {
            algorithm: PathAlgorithm::Bidirectional,
            source: steps.first().unwrap_or(&"").to_string(),
            target: steps.last().unwrap_or(&"").to_string(),
            distance,
            steps: steps.iter().map(|s| s.to_string()).collect(),
            weight_key: "weight".to_string(),
            stats: SearchStats::default(),
        }
    }

    fn graph() -> Graph<String> {
        let mut graph = Graph::directed();
        graph.add_edge("a".into(), "b".into(), EdgeAttributes::weighted(1.5));
        graph.add_edge("b".into(), "c".into(), EdgeAttributes::weighted(2.0));
        graph
    }

    #[test]
    fn legs_follow_the_plan_weight_key() {
        let mut graph = Graph::directed();
        graph.add_edge(
            "a".to_string(),
            "b".to_string(),
            EdgeAttributes::weighted(1.0).with("minutes", 7),
        );
        let mut minutes = plan(&["a", "b"], 7.0);
        minutes.weight_key = "minutes".to_string();

        let summary = PathSummary::from_plan(&graph, &minutes).unwrap();
        assert_eq!(summary.steps[1].leg, Some(7.0));
        assert_eq!(summary.steps[1].cumulative, summary.distance);
    }

    #[test]
    fn summary_rejects_empty_plans() {
        let error = PathSummary::from_plan(&graph(), &plan(&[], 0.0)).unwrap_err();
        assert_eq!(error.to_string(), "path was empty");
    }

    #[test]
    fn summary_annotates_legs() {
        let summary = PathSummary::from_plan(&graph(), &plan(&["a", "b", "c"], 3.5)).unwrap();

        assert_eq!(summary.hops, 2);
        assert_eq!(summary.steps[0].leg, None);
        assert_eq!(summary.steps[1].leg, Some(1.5));
        assert_eq!(summary.steps[2].cumulative, 3.5);
    }

    #[test]
    fn plain_text_lists_each_step() {
        let summary = PathSummary::from_plan(&graph(), &plan(&["a", "b", "c"], 3.5)).unwrap();
        let text = summary.render(PathRenderMode::PlainText);

        assert!(text.starts_with("Path: a -> c (distance 3.5, 2 hops, algorithm: bidirectional)"));
        assert!(text.contains("  1: b (+1.5, 1.5)"));
        assert!(text.contains("  2: c (+2, 3.5)"));
    }

    #[test]
    fn markdown_highlights_vertices() {
        let summary = PathSummary::from_plan(&graph(), &plan(&["a"], 0.0)).unwrap();
        let text = summary.render(PathRenderMode::Markdown);
        assert!(text.contains("*  0. **a** (0)"));
    }

    #[test]
    fn json_omits_missing_leg() {
        let summary = PathSummary::from_plan(&graph(), &plan(&["a", "b"], 1.5)).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["algorithm"], "bidirectional");
        assert!(json["steps"][0].get("leg").is_none());
        assert_eq!(json["steps"][1]["leg"], 1.5);
    }

    #[test]
    fn distances_format_compactly() {
        assert_eq!(format_distance(4.0), "4");
        assert_eq!(format_distance(2.125), "2.125");
        assert_eq!(format_distance(0.1 + 0.2), "0.3");
    }
}
