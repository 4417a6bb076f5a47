// Bottleneck groups.
//
// For a node `n` and one of its edges `e = (n,m)`, keep `e` as the only edge
// touching `n` and look at what `n` can still reach. Edges that leave `n` with
// the same reachable set funnel into the same part of the network, so the
// destinations behind them compete for the summed capacity of those edges.
// The incoming side is the mirror image, walking edges backwards.

use std::collections::BTreeSet;

use log::debug;

use crate::dsa::graph::{Capacity, CapacityGraph, Direction, HashMap};

#[derive(Clone,Debug,PartialEq)]
pub struct Group {
    // 1-based, in discovery order for its node and direction
    pub id:usize,
    pub node:usize,
    pub direction:Direction,
    pub reachable_nodes:BTreeSet<usize>,
    // neighbours whose edge was merged into this group
    pub members:BTreeSet<usize>,
    pub capacity:Capacity,
    pub used_capacity:Capacity,
}

impl Group {
    pub fn available(&self) -> Capacity {
        (self.capacity - self.used_capacity).max(0.0)
    }
    pub fn covers(&self,peer:usize) -> bool {
        self.reachable_nodes.contains(&peer)
    }
}

// nodes left reachable from `node` when `neighbour`'s edge is the only one kept
pub fn reachability_set(graph:&CapacityGraph,node:usize,neighbour:usize,direction:Direction) -> BTreeSet<usize> {
    // the kept edge is the only way out of `node`, so the walk continues from
    // `neighbour` in the graph with `node` removed
    graph.reachable_avoiding(neighbour, node, direction)
}

// groups of a single node, ids from 1
// on directed topologies two reachable sets can overlap without being equal,
// such edges are merged too so every destination sits in exactly one group
pub fn node_groups(graph:&CapacityGraph,node:usize,direction:Direction) -> Vec<Group> {
    let mut groups:Vec<Group> = Vec::new();
    for (neighbour,link) in graph.adjacent(node, direction) {
        let reach = reachability_set(graph, node, neighbour, direction);
        let overlapping:Vec<usize> = groups.iter().enumerate()
            .filter(|(_,g)| !g.reachable_nodes.is_disjoint(&reach))
            .map(|(position,_)| position)
            .collect();
        let Some((&first,rest)) = overlapping.split_first() else {
            groups.push(Group {
                id:groups.len() + 1,
                node,
                direction,
                reachable_nodes:reach,
                members:BTreeSet::from([neighbour]),
                capacity:link.capacity,
                used_capacity:0.0,
            });
            continue;
        };
        // descending, so `first` keeps its position
        for position in rest.iter().rev() {
            let absorbed = groups.remove(*position);
            let group = &mut groups[first];
            group.reachable_nodes.extend(absorbed.reachable_nodes);
            group.members.extend(absorbed.members);
            group.capacity += absorbed.capacity;
        }
        let group = &mut groups[first];
        group.reachable_nodes.extend(reach);
        group.members.insert(neighbour);
        group.capacity += link.capacity;
    }
    for (position,group) in groups.iter_mut().enumerate() {
        group.id = position + 1;
    }
    groups
}

// node -> its groups for one direction, nodes without edges map to an empty list
pub fn build(graph:&CapacityGraph,direction:Direction) -> HashMap<usize,Vec<Group>> {
    let mut partition = HashMap::with_capacity_and_hasher(graph.nodes_len(), nohash::BuildNoHashHasher::default());
    for node in graph.nodes() {
        let groups = node_groups(graph, node, direction);
        debug!("node {node} {direction}: {} edge(s) in {} group(s), capacities {:?}",
            graph.degree(node, direction),
            groups.len(),
            groups.iter().map(|g| g.capacity).collect::<Vec<_>>());
        partition.insert(node, groups);
    }
    partition
}

// both directions of a topology, each computed on its own
#[derive(Clone,Debug)]
pub struct GroupPartition {
    pub outgoing:HashMap<usize,Vec<Group>>,
    pub incoming:HashMap<usize,Vec<Group>>,
}

impl GroupPartition {
    pub fn build(graph:&CapacityGraph) -> Self {
        Self {
            outgoing:build(graph, Direction::Outgoing),
            incoming:build(graph, Direction::Incoming),
        }
    }
    pub fn side(&self,direction:Direction) -> &HashMap<usize,Vec<Group>> {
        match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        }
    }
    pub fn groups(&self,node:usize,direction:Direction) -> &[Group] {
        self.side(direction).get(&node).map(|g| g.as_slice()).unwrap_or(&[])
    }
}
