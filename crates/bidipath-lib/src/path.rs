use serde::Serialize;

use crate::graph::Direction;

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Vertices settled by the forward (source) side.
    pub forward_settled: usize,
    /// Vertices settled by the backward (target) side.
    pub backward_settled: usize,
    /// Superseded frontier entries discarded on pop.
    pub stale_pops: usize,
    /// Edge relaxations that improved a tentative distance.
    pub relaxations: usize,
    /// Times the best meeting point was replaced.
    pub meeting_updates: usize,
}

impl SearchStats {
    pub(crate) fn record_settled(&mut self, direction: Direction) {
        match direction {
            Direction::Forward => self.forward_settled += 1,
            Direction::Backward => self.backward_settled += 1,
        }
    }

    /// Total vertices settled across both directions.
    pub fn settled(&self) -> usize {
        self.forward_settled + self.backward_settled
    }
}

/// Minimum-weight path between two vertices.
///
/// Equality compares only the distance and the vertex sequence, so results
/// from different algorithms (or runs) can be compared directly.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPath<V> {
    /// Sum of edge costs along `path`.
    pub distance: f64,
    /// Vertices from source to target inclusive; never empty.
    pub path: Vec<V>,
    pub stats: SearchStats,
}

impl<V> ShortestPath<V> {
    pub(crate) fn trivial(vertex: V) -> Self {
        Self {
            distance: 0.0,
            path: vec![vertex],
            stats: SearchStats::default(),
        }
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&V> {
        self.path.first()
    }

    pub fn target(&self) -> Option<&V> {
        self.path.last()
    }

    /// Split into the `(distance, path)` pair.
    pub fn into_parts(self) -> (f64, Vec<V>) {
        (self.distance, self.path)
    }
}

impl<V: PartialEq> PartialEq for ShortestPath<V> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.path == other.path
    }
}
