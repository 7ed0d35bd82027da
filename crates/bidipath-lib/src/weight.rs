//! Edge weight policies.
//!
//! A weight function maps an edge `tail -> head` and its attribute bag to a
//! non-negative cost, or to `None` when the edge should be hidden from the
//! search entirely. Weight functions must be pure: the search may call them
//! any number of times, in any order.

use crate::graph::{EdgeAttributes, Vertex};

/// Attribute key read by [`AttributeWeight::default`].
pub const DEFAULT_WEIGHT_KEY: &str = "weight";

/// Cost assigned to an edge that lacks the configured weight attribute.
pub const DEFAULT_EDGE_COST: f64 = 1.0;

/// Pluggable edge cost policy.
pub trait WeightFn<V> {
    /// Cost of traversing `tail -> head`, or `None` if the edge is hidden.
    fn cost(&self, tail: &V, head: &V, attributes: &EdgeAttributes) -> Option<f64>;
}

impl<V, F> WeightFn<V> for F
where
    F: Fn(&V, &V, &EdgeAttributes) -> Option<f64>,
{
    fn cost(&self, tail: &V, head: &V, attributes: &EdgeAttributes) -> Option<f64> {
        self(tail, head, attributes)
    }
}

/// Reads the cost from a named edge attribute.
///
/// Edges missing the attribute cost [`DEFAULT_EDGE_COST`]. Edges whose
/// attribute holds a non-numeric value are hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeWeight {
    key: String,
}

impl AttributeWeight {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for AttributeWeight {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_KEY)
    }
}

impl<V> WeightFn<V> for AttributeWeight {
    fn cost(&self, _tail: &V, _head: &V, attributes: &EdgeAttributes) -> Option<f64> {
        match attributes.get(&self.key) {
            None => Some(DEFAULT_EDGE_COST),
            Some(value) => value.as_f64(),
        }
    }
}

/// Cheapest visible cost among the parallel edges joining `tail -> head`.
///
/// Returns `None` when every parallel edge is hidden.
pub fn edge_cost<V, W>(weight: &W, tail: &V, head: &V, parallel: &[EdgeAttributes]) -> Option<f64>
where
    V: Vertex,
    W: WeightFn<V> + ?Sized,
{
    parallel
        .iter()
        .filter_map(|attributes| weight.cost(tail, head, attributes))
        .min_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_weight_reads_key() {
        let weight = AttributeWeight::new("length");
        let attributes = EdgeAttributes::new().with("length", 4.5);
        assert_eq!(weight.cost(&1, &2, &attributes), Some(4.5));
    }

    #[test]
    fn attribute_weight_defaults_to_unit_cost() {
        let weight = AttributeWeight::default();
        assert_eq!(weight.cost(&1, &2, &EdgeAttributes::new()), Some(1.0));
    }

    #[test]
    fn non_numeric_attribute_hides_edge() {
        let weight = AttributeWeight::default();
        let attributes = EdgeAttributes::new().with("weight", "heavy");
        assert_eq!(weight.cost(&1, &2, &attributes), None);
    }

    #[test]
    fn closures_are_weight_functions() {
        let red_only = |_: &u32, _: &u32, attributes: &EdgeAttributes| {
            (attributes.get("color").and_then(|c| c.as_str()) == Some("red")).then_some(1.0)
        };
        let red = EdgeAttributes::new().with("color", "red");
        let blue = EdgeAttributes::new().with("color", "blue");
        assert_eq!(red_only.cost(&0, &1, &red), Some(1.0));
        assert_eq!(red_only.cost(&0, &1, &blue), None);
    }

    #[test]
    fn edge_cost_takes_cheapest_visible_parallel_edge() {
        let weight = AttributeWeight::default();
        let parallel = vec![
            EdgeAttributes::weighted(5.0),
            EdgeAttributes::new().with("weight", "hidden"),
            EdgeAttributes::weighted(2.0),
        ];
        assert_eq!(edge_cost(&weight, &'A', &'B', &parallel), Some(2.0));
    }

    #[test]
    fn edge_cost_hidden_when_all_parallel_edges_hidden() {
        let hide_all = |_: &char, _: &char, _: &EdgeAttributes| -> Option<f64> { None };
        let parallel = vec![EdgeAttributes::weighted(1.0)];
        assert_eq!(edge_cost(&hide_all, &'A', &'B', &parallel), None);
    }
}
