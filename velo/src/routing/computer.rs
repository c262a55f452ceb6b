//! Best route search between two nodes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use tracing::debug;

use crate::data::Graph;
use crate::error::{Result, VeloError};
use crate::routing::cost::CostFunction;
use crate::routing::edge::Edge;
use crate::routing::route::Route;
use crate::routing::single_route::SingleRoute;

/// Cost of a node once it has been settled.
const CLOSED: f32 = f32::NEG_INFINITY;

/// Queue entry: a node and its tentative cost plus the straight-line
/// distance left to the target.
#[derive(Debug, Clone, Copy)]
struct WeightedNode {
    node_id: u32,
    priority: f32,
}

impl PartialEq for WeightedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WeightedNode {}

impl PartialOrd for WeightedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; lower node ids first on ties
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

/// Computes lowest-cost routes on a graph with A*.
///
/// The cost of an edge is its length times the factor given by the cost
/// function. Costs are accumulated in `f32`, which is enough for the
/// 1/16 m resolution of edge lengths.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use velo::{CityBikeCostFunction, Graph, RouteComputer};
///
/// let graph = Arc::new(Graph::load_from("/data/velo")?);
/// let computer = RouteComputer::new(graph.clone(), CityBikeCostFunction::new(graph));
/// if let Some(route) = computer.best_route_between(159049, 117669)? {
///     println!("{:.0} m", route.length());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RouteComputer<C> {
    graph: Arc<Graph>,
    cost_function: C,
}

impl<C: CostFunction> RouteComputer<C> {
    pub fn new(graph: Arc<Graph>, cost_function: C) -> Self {
        Self {
            graph,
            cost_function,
        }
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    /// The lowest-cost route from `start_node_id` to `end_node_id`, or
    /// `None` if the end cannot be reached.
    ///
    /// # Errors
    ///
    /// Returns [`VeloError::InvalidArgument`] if both nodes are the same.
    pub fn best_route_between(
        &self,
        start_node_id: u32,
        end_node_id: u32,
    ) -> Result<Option<Route>> {
        if start_node_id == end_node_id {
            return Err(VeloError::InvalidArgument(format!(
                "start and end are the same node ({start_node_id})"
            )));
        }

        let graph = &*self.graph;
        let target = graph.node_point(end_node_id);
        let remaining = |node_id: u32| graph.node_point(node_id).distance_to(&target) as f32;

        let mut costs = vec![f32::INFINITY; graph.node_count()];
        let mut predecessors = vec![0u32; graph.node_count()];
        let mut queue = BinaryHeap::new();

        costs[start_node_id as usize] = 0.0;
        queue.push(WeightedNode {
            node_id: start_node_id,
            priority: remaining(start_node_id),
        });

        let mut settled = 0usize;
        while let Some(WeightedNode { node_id, .. }) = queue.pop() {
            let cost = costs[node_id as usize];
            if cost == CLOSED {
                continue;
            }
            if node_id == end_node_id {
                let route = self.reconstruct(start_node_id, end_node_id, &predecessors)?;
                debug!(
                    start = start_node_id,
                    end = end_node_id,
                    settled,
                    length = route.length(),
                    "Route found"
                );
                return Ok(Some(route));
            }
            costs[node_id as usize] = CLOSED;
            settled += 1;

            for edge_id in graph.node_out_edges(node_id) {
                let to = graph.edge_target_node_id(edge_id);
                let to_cost = costs[to as usize];
                if to_cost == CLOSED {
                    continue;
                }
                let factor = self.cost_function.cost_factor(node_id, edge_id);
                let candidate = cost + (graph.edge_length(edge_id) * factor) as f32;
                if candidate < to_cost {
                    costs[to as usize] = candidate;
                    predecessors[to as usize] = node_id;
                    queue.push(WeightedNode {
                        node_id: to,
                        priority: candidate + remaining(to),
                    });
                }
            }
        }

        debug!(start = start_node_id, end = end_node_id, settled, "No route");
        Ok(None)
    }

    /// Walk the predecessors back from `end`, taking for every step the
    /// first out edge of the predecessor that leads to the node.
    fn reconstruct(&self, start: u32, end: u32, predecessors: &[u32]) -> Result<Route> {
        let graph = &*self.graph;
        let mut edges = Vec::new();
        let mut to = end;
        while to != start {
            let from = predecessors[to as usize];
            let edge_id = graph
                .node_out_edges(from)
                .find(|&edge_id| graph.edge_target_node_id(edge_id) == to)
                .ok_or_else(|| VeloError::MalformedGraph {
                    reason: format!("no edge from node {from} to node {to}"),
                })?;
            edges.push(Edge::of(graph, edge_id, from, to));
            to = from;
        }
        edges.reverse();
        Ok(SingleRoute::new(edges)?.into())
    }
}
