// point to point maximum flow on a CapacityGraph
// Edmonds-Karp: BFS augmenting paths over a dense residual matrix, O(V*E^2)

use std::collections::VecDeque;

use crate::dsa::graph::{Capacity, CapacityGraph, Direction};

// anything that can bound the flow a single pair can push through a topology
pub trait MaxFlowOracle {
    fn max_flow(&self,graph:&CapacityGraph,source:usize,sink:usize) -> Capacity;
}

#[derive(Clone,Copy,Debug,Default)]
pub struct EdmondsKarp;

// residual capacities below this are treated as saturated
const RESIDUAL_EPS:f64 = 1e-12;

impl MaxFlowOracle for EdmondsKarp {
    fn max_flow(&self,graph:&CapacityGraph,source:usize,sink:usize) -> Capacity {
        if source == sink || !graph.contains_node(source) || !graph.contains_node(sink) {
            return 0.0;
        }
        let nodes = graph.nodes();
        let n = nodes.len();
        let index_of = |node:usize| nodes.binary_search(&node).ok();
        let (Some(s),Some(t)) = (index_of(source),index_of(sink))
            else {return 0.0};

        // residual[u*n + v]
        let mut residual = vec![0.0;n*n];
        for (u,node) in nodes.iter().enumerate() {
            for (next,link) in graph.adjacent(*node, Direction::Outgoing) {
                if let Some(v) = index_of(next) {
                    residual[u*n + v] += link.capacity;
                }
            }
        }

        let mut max_flow = 0.0;
        let mut parent:Vec<Option<usize>> = vec![None;n];
        loop {
            parent.iter_mut().for_each(|p| *p = None);
            parent[s] = Some(s);
            let mut queue = VecDeque::with_capacity(n);
            queue.push_back(s);
            while let Some(u) = queue.pop_front() {
                if u == t {
                    break;
                }
                for v in 0..n {
                    if parent[v].is_none() && residual[u*n + v] > RESIDUAL_EPS {
                        parent[v] = Some(u);
                        queue.push_back(v);
                    }
                }
            }
            if parent[t].is_none() {
                break;
            }

            // bottleneck along the path
            let mut path_flow = f64::INFINITY;
            let mut v = t;
            while v != s {
                let Some(u) = parent[v] else {break};
                path_flow = path_flow.min(residual[u*n + v]);
                v = u;
            }

            let mut v = t;
            while v != s {
                let Some(u) = parent[v] else {break};
                residual[u*n + v] -= path_flow;
                residual[v*n + u] += path_flow;
                v = u;
            }
            max_flow += path_flow;
        }
        max_flow
    }
}

#[cfg(test)]
mod tests {
    use super::{EdmondsKarp, MaxFlowOracle};
    use crate::dsa::graph::CapacityGraph;
    use crate::traffic_matrix::topology::reference_topology;

    #[test]
    fn test_reference_flows() {
        let graph = reference_topology();
        let oracle = EdmondsKarp;
        assert_eq!(oracle.max_flow(&graph, 1, 2),1001.0);
        assert_eq!(oracle.max_flow(&graph, 3, 1),2.0);
        assert_eq!(oracle.max_flow(&graph, 2, 5),1.0);
        assert_eq!(oracle.max_flow(&graph, 6, 2),1.0);
        assert_eq!(oracle.max_flow(&graph, 1, 5),1.0);
    }
    #[test]
    fn test_directed_and_degenerate() {
        let graph:CapacityGraph = [(0,1,3.0),(1,2,2.0),(0,2,1.0)].into();
        let oracle = EdmondsKarp;
        assert_eq!(oracle.max_flow(&graph, 0, 2),3.0);
        assert_eq!(oracle.max_flow(&graph, 2, 0),0.0);
        assert_eq!(oracle.max_flow(&graph, 0, 0),0.0);
        assert_eq!(oracle.max_flow(&graph, 0, 42),0.0);
    }
}
