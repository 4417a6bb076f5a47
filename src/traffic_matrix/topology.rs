// reference topologies and tunable parameters

use lazy_static::lazy_static;

use crate::dsa::graph::{CapacityGraph, Link};

// slack allowed when comparing accumulated f64 demand against capacity
pub(crate) const CAPACITY_EPS:f64 = 1e-9;

lazy_static! {
    // six node test network, every link undirected
    //   6 - 1 ==== 2 - 4 - 5
    //        \    /
    //          3
    pub static ref reference_links:Vec<(usize,usize,Link)> = vec![
        (1,2,Link::new(1000.0,1.0)),
        (1,3,Link::new(1.0,1.0)),
        (2,3,Link::new(1.0,1.0)),
        (2,4,Link::new(1.0,1.0)),
        (4,5,Link::new(1.0,1.0)),
        (1,6,Link::new(1.0,1.0)),
    ];
}

pub fn reference_topology() -> CapacityGraph {
    CapacityGraph::from_links(reference_links.iter())
}

// every pair directly linked with the same capacity
pub fn full_mesh(nodes:usize,capacity:f64) -> CapacityGraph {
    let mut graph = CapacityGraph::with_capacity(nodes);
    for i in 0..nodes {
        graph.push_node(i);
        for j in i+1..nodes {
            graph.push_link(i, j, Link::new(capacity,1.0));
        }
    }
    graph.shrink_to_fit();
    graph
}

// 0 - 1 - 2 chain, node 3 hangs off 0 and 1, node 4 hangs off 3
#[cfg(test)]
pub(crate) fn five_node() -> CapacityGraph {
    CapacityGraph::from_links([
        (0,1,Link::new(1.0,1.0)),
        (1,2,Link::new(1.0,1.0)),
        (3,0,Link::new(2.0,1.0)),
        (3,1,Link::new(1.0,1.0)),
        (3,4,Link::new(1.0,1.0)),
    ])
}

#[cfg(test)]
mod tests {
    use super::{full_mesh, reference_topology};

    #[test]
    fn test_reference_degrees() {
        let graph = reference_topology();
        assert_eq!(graph.nodes(),vec![1,2,3,4,5,6]);
        assert_eq!(graph.edges_len(),12);
        let out_degrees:Vec<usize> = graph.nodes().into_iter().map(|n| graph.out_degree(n)).collect();
        assert_eq!(out_degrees,vec![3,3,2,2,1,1]);
    }
    #[test]
    fn test_full_mesh() {
        let graph = full_mesh(5, 1.0);
        assert_eq!(graph.edges_len(),20);
        assert_eq!(full_mesh(1, 1.0).nodes(),vec![0]);
    }
}
