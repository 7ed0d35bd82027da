//! Bidirectional Dijkstra search.
//!
//! Two Dijkstra searches run in lockstep: one forward from the source over
//! outgoing edges, one backward from the target over incoming edges. Each
//! loop iteration hands the turn to the other direction, pops its closest
//! frontier vertex and settles it. The search stops as soon as a vertex is
//! settled from both ends; at that point the best meeting point recorded so
//! far is optimal.
//!
//! The meeting point is tracked on every relaxation that reaches a vertex
//! already seen by the opposite side. The vertex that triggers termination is
//! not necessarily on the shortest path, so the result is always read from the
//! tracked meeting, never from the vertex that ended the loop.
//!
//! Alternation is turn-based: a popped entry that turns out to be a stale
//! duplicate still consumes that direction's turn.
//!
//! Weights must be non-negative. A relaxation that undercuts an already
//! settled vertex aborts the search with [`Error::InconsistentWeights`]; this
//! is a best-effort check and will not catch every negative-weight graph.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::frontier::{Pop, Relaxation, SearchSide, Sequence};
use crate::graph::{Direction, Graph, Vertex};
use crate::path::{SearchStats, ShortestPath};
use crate::weight::{edge_cost, WeightFn};

/// Find the minimum-weight path from `source` to `target`.
///
/// # Example
///
/// ```
/// use bidipath_lib::{bidirectional_dijkstra, path_graph, AttributeWeight};
///
/// let graph = path_graph(5, false);
/// let result = bidirectional_dijkstra(&graph, &0, &4, &AttributeWeight::default()).unwrap();
/// assert_eq!(result.distance, 4.0);
/// assert_eq!(result.path, vec![0, 1, 2, 3, 4]);
/// ```
pub fn bidirectional_dijkstra<V, W>(
    graph: &Graph<V>,
    source: &V,
    target: &V,
    weight: &W,
) -> Result<ShortestPath<V>>
where
    V: Vertex,
    W: WeightFn<V> + ?Sized,
{
    BidirectionalSearch::new(graph, weight).run(source, target)
}

/// Configurable bidirectional search over a borrowed graph.
///
/// All search state is created inside [`run`](Self::run) and dropped when it
/// returns, so one `BidirectionalSearch` can serve any number of queries, and
/// several threads may search the same graph at once.
pub struct BidirectionalSearch<'a, V: Vertex, W: ?Sized> {
    graph: &'a Graph<V>,
    weight: &'a W,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, V, W> BidirectionalSearch<'a, V, W>
where
    V: Vertex,
    W: WeightFn<V> + ?Sized,
{
    pub fn new(graph: &'a Graph<V>, weight: &'a W) -> Self {
        Self {
            graph,
            weight,
            cancel: None,
        }
    }

    /// Abort with [`Error::Cancelled`] once `flag` is set. The flag is polled
    /// at the top of every loop iteration.
    pub fn cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn run(&self, source: &V, target: &V) -> Result<ShortestPath<V>> {
        if !self.graph.contains(source) {
            return Err(Error::vertex_not_found(source));
        }
        if !self.graph.contains(target) {
            return Err(Error::vertex_not_found(target));
        }
        if source == target {
            return Ok(ShortestPath::trivial(source.clone()));
        }

        debug!(?source, ?target, "starting bidirectional search");

        let mut sequence = Sequence::default();
        let mut sides = [
            SearchSide::seeded(source.clone(), &mut sequence),
            SearchSide::seeded(target.clone(), &mut sequence),
        ];
        let mut best: Option<Meeting<V>> = None;
        let mut stats = SearchStats::default();
        let mut direction = Direction::Backward;

        while !sides[0].frontier.is_empty() && !sides[1].frontier.is_empty() {
            if self.is_cancelled() {
                debug!(?source, ?target, "bidirectional search cancelled");
                return Err(Error::Cancelled);
            }

            direction = direction.opposite();
            let (distance, vertex) = match sides[direction.index()].settle_next() {
                Some(Pop::Settled(distance, vertex)) => (distance, vertex),
                Some(Pop::Stale) => {
                    stats.stale_pops += 1;
                    continue;
                }
                None => break,
            };
            stats.record_settled(direction);
            trace!(?vertex, %direction, distance, "settled vertex");

            if sides[direction.opposite().index()].is_finalized(&vertex) {
                // The later of the two sides to reach `vertex` recorded a
                // meeting when it relaxed into it.
                let Some(meeting) = best else {
                    unreachable!("{vertex:?} finalized by both sides without a meeting");
                };
                debug!(
                    meeting = ?meeting.vertex,
                    distance = meeting.distance,
                    settled = stats.settled(),
                    stale = stats.stale_pops,
                    "bidirectional search met"
                );
                return Ok(ShortestPath {
                    distance: meeting.distance,
                    path: meeting.path,
                    stats,
                });
            }

            self.expand(
                &mut sides,
                direction,
                distance,
                &vertex,
                &mut sequence,
                &mut best,
                &mut stats,
            )?;
        }

        debug!(?source, ?target, settled = stats.settled(), "frontiers exhausted");
        Err(Error::no_path(source, target))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    #[allow(clippy::too_many_arguments)]
    fn expand(
        &self,
        sides: &mut [SearchSide<V>; 2],
        direction: Direction,
        distance: f64,
        vertex: &V,
        sequence: &mut Sequence,
        best: &mut Option<Meeting<V>>,
        stats: &mut SearchStats,
    ) -> Result<()> {
        let Some(adjacency) = self.graph.neighbours(vertex, direction) else {
            return Ok(());
        };

        for (neighbour, parallel) in adjacency {
            // Costs are always evaluated in the edge's own orientation.
            let cost = match direction {
                Direction::Forward => edge_cost(self.weight, vertex, neighbour, parallel),
                Direction::Backward => edge_cost(self.weight, neighbour, vertex, parallel),
            };
            let Some(cost) = cost else {
                continue;
            };
            let candidate = distance + cost;

            let (active, opposite) = split_sides(sides, direction);
            match active.relax(vertex, neighbour, candidate, sequence) {
                Relaxation::Unchanged => {}
                Relaxation::Contradiction => {
                    warn!(
                        vertex = ?neighbour,
                        %direction,
                        candidate,
                        "shorter path to settled vertex; weights are inconsistent"
                    );
                    return Err(Error::inconsistent_weights(neighbour));
                }
                Relaxation::Improved => {
                    stats.relaxations += 1;
                    let Some(remaining) = opposite.seen_distance(neighbour) else {
                        continue;
                    };
                    let total = candidate + remaining;
                    if best.as_ref().is_some_and(|current| current.distance <= total) {
                        continue;
                    }
                    let (forward, backward) = match direction {
                        Direction::Forward => (&*active, opposite),
                        Direction::Backward => (opposite, &*active),
                    };
                    *best = Some(Meeting {
                        distance: total,
                        vertex: neighbour.clone(),
                        path: join_at(forward, backward, neighbour),
                    });
                    stats.meeting_updates += 1;
                }
            }
        }

        Ok(())
    }
}

/// Best meeting point recorded so far.
#[derive(Debug)]
struct Meeting<V> {
    distance: f64,
    vertex: V,
    path: Vec<V>,
}

fn split_sides<V: Vertex>(
    sides: &mut [SearchSide<V>; 2],
    direction: Direction,
) -> (&mut SearchSide<V>, &SearchSide<V>) {
    let [forward, backward] = sides;
    match direction {
        Direction::Forward => (forward, &*backward),
        Direction::Backward => (backward, &*forward),
    }
}

/// Forward prefix to `meeting` followed by the reversed backward prefix,
/// with the meeting vertex appearing once.
fn join_at<V: Vertex>(forward: &SearchSide<V>, backward: &SearchSide<V>, meeting: &V) -> Vec<V> {
    let mut path = forward.paths.get(meeting).cloned().unwrap_or_default();
    if let Some(suffix) = backward.paths.get(meeting) {
        path.extend(suffix.iter().rev().skip(1).cloned());
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{path_graph, EdgeAttributes};
    use crate::weight::AttributeWeight;

    #[test]
    fn identical_endpoints_skip_the_search() {
        let graph = path_graph(3, true);
        let never = |_: &usize, _: &usize, _: &EdgeAttributes| -> Option<f64> {
            panic!("weight function must not be consulted")
        };
        let result = bidirectional_dijkstra(&graph, &1, &1, &never).unwrap();
        assert_eq!(result.into_parts(), (0.0, vec![1]));
    }

    #[test]
    fn settles_from_both_ends() {
        let graph = path_graph(9, false);
        let result = bidirectional_dijkstra(&graph, &0, &8, &AttributeWeight::default()).unwrap();

        assert_eq!(result.distance, 8.0);
        assert!(result.stats.forward_settled > 0);
        assert!(result.stats.backward_settled > 0);
        assert!(result.stats.meeting_updates >= 1);
    }

    #[test]
    fn meeting_path_is_joined_without_duplicate_vertex() {
        let mut graph = Graph::directed();
        graph.add_edge("s", "m", EdgeAttributes::weighted(1.0));
        graph.add_edge("m", "t", EdgeAttributes::weighted(1.0));

        let result =
            bidirectional_dijkstra(&graph, &"s", &"t", &AttributeWeight::default()).unwrap();
        assert_eq!(result.path, vec!["s", "m", "t"]);
    }

    #[test]
    fn result_comes_from_tracked_meeting_not_terminating_vertex() {
        // `a` is the first vertex settled from both ends, but the direct
        // edge recorded earlier as the meeting is cheaper.
        let mut graph = Graph::undirected();
        graph.add_edge("s", "t", EdgeAttributes::weighted(5.0));
        graph.add_edge("s", "a", EdgeAttributes::weighted(3.0));
        graph.add_edge("a", "t", EdgeAttributes::weighted(3.0));

        let result =
            bidirectional_dijkstra(&graph, &"s", &"t", &AttributeWeight::default()).unwrap();
        assert_eq!(result.distance, 5.0);
        assert_eq!(result.path, vec!["s", "t"]);
    }

    #[test]
    fn meeting_on_an_endpoint_is_recorded() {
        // The only meeting candidate is the target itself, reached by a
        // forward relaxation into the backward side's seed.
        let mut graph = Graph::directed();
        graph.add_edge("s", "t", EdgeAttributes::weighted(2.0));

        let result =
            bidirectional_dijkstra(&graph, &"s", &"t", &AttributeWeight::default()).unwrap();
        assert_eq!(result.into_parts(), (2.0, vec!["s", "t"]));
    }

    #[test]
    fn raised_cancel_flag_aborts() {
        let graph = path_graph(4, false);
        let weight = AttributeWeight::default();
        let flag = AtomicBool::new(true);
        let error = BidirectionalSearch::new(&graph, &weight)
            .cancel_flag(&flag)
            .run(&0, &3)
            .unwrap_err();
        assert!(matches!(error, Error::Cancelled));
    }

    #[test]
    fn unraised_cancel_flag_is_ignored() {
        let graph = path_graph(4, false);
        let weight = AttributeWeight::default();
        let flag = AtomicBool::new(false);
        let search = BidirectionalSearch::new(&graph, &weight).cancel_flag(&flag);
        assert_eq!(search.run(&0, &3).unwrap().distance, 3.0);
        assert_eq!(search.run(&3, &0).unwrap().path, vec![3, 2, 1, 0]);
    }

    #[test]
    fn stale_entries_consume_a_turn() {
        // Vertex 1 is queued twice on the forward side; the backward side
        // burns turns on dead-end predecessors of the target until the
        // superseded entry surfaces.
        let mut graph = Graph::directed();
        graph.add_edge(0, 1, EdgeAttributes::weighted(10.0));
        graph.add_edge(0, 2, EdgeAttributes::weighted(1.0));
        graph.add_edge(2, 1, EdgeAttributes::weighted(1.0));
        graph.add_edge(1, 3, EdgeAttributes::weighted(5.0));
        graph.add_edge(3, 4, EdgeAttributes::weighted(50.0));
        graph.add_edge(7, 4, EdgeAttributes::weighted(1.0));
        graph.add_edge(8, 4, EdgeAttributes::weighted(1.0));
        graph.add_edge(9, 4, EdgeAttributes::weighted(1.0));

        let result = bidirectional_dijkstra(&graph, &0, &4, &AttributeWeight::default()).unwrap();
        assert_eq!(result.distance, 57.0);
        assert_eq!(result.path, vec![0, 2, 1, 3, 4]);
        assert_eq!(result.stats.stale_pops, 1);
        assert_eq!(result.stats.forward_settled, 4);
        assert_eq!(result.stats.backward_settled, 5);
    }
}
