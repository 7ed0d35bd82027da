//! Priority queue and per-direction bookkeeping shared by the search
//! algorithms.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::Vertex;

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Heap entry ordered by distance, then by insertion sequence.
#[derive(Clone, Debug)]
pub(crate) struct FrontierEntry<V> {
    pub(crate) distance: FloatOrd,
    pub(crate) sequence: u64,
    pub(crate) vertex: V,
}

impl<V> PartialEq for FrontierEntry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V> Eq for FrontierEntry<V> {}

impl<V> Ord for FrontierEntry<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by distance.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<V> PartialOrd for FrontierEntry<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of tentative distances.
///
/// Sequence numbers are unique per entry, so entries never compare equal and
/// pops are fully deterministic.
#[derive(Debug)]
pub(crate) struct Frontier<V> {
    heap: BinaryHeap<FrontierEntry<V>>,
}

impl<V> Frontier<V> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub(crate) fn push(&mut self, distance: f64, sequence: u64, vertex: V) {
        self.heap.push(FrontierEntry {
            distance: FloatOrd(distance),
            sequence,
            vertex,
        });
    }

    /// Remove the entry with the smallest distance, oldest first on ties.
    pub(crate) fn pop(&mut self) -> Option<(f64, V)> {
        self.heap
            .pop()
            .map(|entry| (entry.distance.0, entry.vertex))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Monotonic insertion counter shared by every frontier of one search call.
#[derive(Debug, Default)]
pub(crate) struct Sequence(u64);

impl Sequence {
    pub(crate) fn next(&mut self) -> u64 {
        let value = self.0;
        self.0 += 1;
        value
    }
}

/// Outcome of relaxing an edge into one side of the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Relaxation {
    /// The candidate improved the tentative distance and was queued.
    Improved,
    /// The candidate was no better than what is already known.
    Unchanged,
    /// The neighbour is finalized at a larger distance than the candidate.
    Contradiction,
}

/// Result of popping the next frontier entry.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Pop<V> {
    /// The vertex was settled at this distance.
    Settled(f64, V),
    /// The entry was a superseded duplicate of an already settled vertex.
    Stale,
}

/// State owned by one direction of a search: its frontier plus the seen,
/// finalized and path-prefix tables.
#[derive(Debug)]
pub(crate) struct SearchSide<V: Vertex> {
    pub(crate) frontier: Frontier<V>,
    pub(crate) seen: HashMap<V, f64>,
    pub(crate) finalized: HashMap<V, f64>,
    pub(crate) paths: HashMap<V, Vec<V>>,
}

impl<V: Vertex> SearchSide<V> {
    /// Side seeded with its origin at distance zero.
    pub(crate) fn seeded(origin: V, sequence: &mut Sequence) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(0.0, sequence.next(), origin.clone());
        Self {
            frontier,
            seen: HashMap::from([(origin.clone(), 0.0)]),
            finalized: HashMap::new(),
            paths: HashMap::from([(origin.clone(), vec![origin])]),
        }
    }

    pub(crate) fn is_finalized(&self, vertex: &V) -> bool {
        self.finalized.contains_key(vertex)
    }

    pub(crate) fn seen_distance(&self, vertex: &V) -> Option<f64> {
        self.seen.get(vertex).copied()
    }

    /// Pop the next entry that has not been finalized yet, settling it.
    ///
    /// Returns `None` once the frontier is empty.
    pub(crate) fn settle_next(&mut self) -> Option<Pop<V>> {
        let (distance, vertex) = self.frontier.pop()?;
        if self.finalized.contains_key(&vertex) {
            return Some(Pop::Stale);
        }
        self.finalized.insert(vertex.clone(), distance);
        Some(Pop::Settled(distance, vertex))
    }

    /// Relax `from -> to` with a candidate distance, extending the path
    /// prefix on improvement.
    pub(crate) fn relax(
        &mut self,
        from: &V,
        to: &V,
        candidate: f64,
        sequence: &mut Sequence,
    ) -> Relaxation {
        if let Some(&settled) = self.finalized.get(to) {
            return if candidate < settled {
                Relaxation::Contradiction
            } else {
                Relaxation::Unchanged
            };
        }

        if let Some(&current) = self.seen.get(to) {
            if candidate >= current {
                return Relaxation::Unchanged;
            }
        }

        self.seen.insert(to.clone(), candidate);
        self.frontier.push(candidate, sequence.next(), to.clone());
        let mut prefix = self.paths.get(from).cloned().unwrap_or_default();
        prefix.push(to.clone());
        self.paths.insert(to.clone(), prefix);
        Relaxation::Improved
    }
}
