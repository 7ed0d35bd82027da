//! Single-direction Dijkstra search.
//!
//! Used as an alternative planner and as the independent reference the
//! bidirectional engine is checked against.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::graph::{Direction, Graph, Vertex};
use crate::path::{SearchStats, ShortestPath};
use crate::weight::{edge_cost, WeightFn};

/// Find the minimum-weight path from `source` to `target`, stopping as soon
/// as the target is settled.
pub fn dijkstra<V, W>(
    graph: &Graph<V>,
    source: &V,
    target: &V,
    weight: &W,
) -> Result<ShortestPath<V>>
where
    V: Vertex,
    W: WeightFn<V> + ?Sized,
{
    if !graph.contains(target) {
        return Err(Error::vertex_not_found(target));
    }
    let run = settle(graph, source, Some(target), weight)?;

    let Some(&distance) = run.distances.get(target) else {
        return Err(Error::no_path(source, target));
    };

    Ok(ShortestPath {
        distance,
        path: reconstruct_path(&run.parents, source, target),
        stats: run.stats,
    })
}

/// Shortest distance from `source` to every reachable vertex.
pub fn single_source_distances<V, W>(
    graph: &Graph<V>,
    source: &V,
    weight: &W,
) -> Result<HashMap<V, f64>>
where
    V: Vertex,
    W: WeightFn<V> + ?Sized,
{
    settle(graph, source, None, weight).map(|run| run.distances)
}

struct Settled<V> {
    distances: HashMap<V, f64>,
    parents: HashMap<V, V>,
    stats: SearchStats,
}

fn settle<V, W>(
    graph: &Graph<V>,
    source: &V,
    target: Option<&V>,
    weight: &W,
) -> Result<Settled<V>>
where
    V: Vertex,
    W: WeightFn<V> + ?Sized,
{
    if !graph.contains(source) {
        return Err(Error::vertex_not_found(source));
    }

    let mut distances: HashMap<V, f64> = HashMap::new();
    let mut tentative: HashMap<V, f64> = HashMap::from([(source.clone(), 0.0)]);
    let mut parents: HashMap<V, V> = HashMap::new();
    let mut stats = SearchStats::default();
    let mut queue = Frontier::new();
    let mut sequence = 0u64;

    queue.push(0.0, sequence, source.clone());

    while let Some((distance, vertex)) = queue.pop() {
        if distances.contains_key(&vertex) {
            stats.stale_pops += 1;
            continue;
        }
        distances.insert(vertex.clone(), distance);
        stats.record_settled(Direction::Forward);

        if target == Some(&vertex) {
            break;
        }

        let Some(adjacency) = graph.neighbours(&vertex, Direction::Forward) else {
            continue;
        };
        for (next, parallel) in adjacency {
            let Some(cost) = edge_cost(weight, &vertex, next, parallel) else {
                continue;
            };
            let next_cost = distance + cost;

            if let Some(&settled) = distances.get(next) {
                if next_cost < settled {
                    return Err(Error::inconsistent_weights(next));
                }
                continue;
            }

            if next_cost < *tentative.get(next).unwrap_or(&f64::INFINITY) {
                tentative.insert(next.clone(), next_cost);
                parents.insert(next.clone(), vertex.clone());
                sequence += 1;
                queue.push(next_cost, sequence, next.clone());
                stats.relaxations += 1;
            }
        }
    }

    debug!(?source, settled = stats.settled(), "dijkstra finished");
    Ok(Settled {
        distances,
        parents,
        stats,
    })
}

fn reconstruct_path<V: Vertex>(parents: &HashMap<V, V>, source: &V, target: &V) -> Vec<V> {
    let mut path = vec![target.clone()];
    let mut current = target;
    while current != source {
        let Some(parent) = parents.get(current) else {
            break;
        };
        path.push(parent.clone());
        current = parent;
    }
    path.reverse();
    path
}
