use std::borrow::Borrow;
use std::collections::BTreeSet;

pub(crate) type HashMap<K,V> = std::collections::hash_map::HashMap<K,V,nohash::BuildNoHashHasher<usize>>;
pub(crate) type HashSet<K> = std::collections::hash_set::HashSet<K,nohash::BuildNoHashHasher<usize>>;

pub type Capacity = f64;

// attributes carried by a directed edge
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct Link {
    pub capacity:Capacity,
    pub weight:f64,
}

impl Link {
    // capacity must be finite and non-negative, CapacityGraph panics otherwise
    pub fn new(capacity:Capacity,weight:f64) -> Self {
        Self {capacity,weight}
    }
}

impl Default for Link {
    fn default() -> Self {
        Self {capacity:0.0,weight:1.0}
    }
}

// which side of a node the edges are looked at from
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Outgoing => write!(f,"outgoing"),
            Direction::Incoming => write!(f,"incoming"),
        }
    }
}

#[derive(Clone,Debug)]
struct Neighbours {
    to:HashMap<usize,Link>,
    from:HashMap<usize,Link>,
}

impl Neighbours {
    fn new() -> Self {
        Self {
            to:HashMap::with_hasher(nohash::BuildNoHashHasher::default()),
            from:HashMap::with_hasher(nohash::BuildNoHashHasher::default())
        }
    }
    fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {
           return Self::new();
        }
        Self {to:HashMap::with_capacity_and_hasher(capacity,nohash::BuildNoHashHasher::default()),
            from:HashMap::with_capacity_and_hasher(capacity,nohash::BuildNoHashHasher::default())
        }
    }
    fn side(&self,direction:Direction) -> &HashMap<usize,Link> {
        match direction {
            Direction::Outgoing => &self.to,
            Direction::Incoming => &self.from,
        }
    }
    fn shrink_to_fit(&mut self) {
        self.to.shrink_to_fit();
        self.from.shrink_to_fit();
    }
}

impl Default for Neighbours {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
struct Visited {
    visited_nodes:HashSet<usize>,
}

impl Visited {
    fn with_capacity(capacity:usize) -> Self {
        Self {visited_nodes:HashSet::with_capacity_and_hasher(capacity,nohash::BuildNoHashHasher::default())}
    }
    // a node that must never be entered by the traversal
    fn block(&mut self,node:usize) {
        self.visited_nodes.insert(node);
    }
    // true if the node was not visited before
    fn visit(&mut self,node:usize) -> bool {
        self.visited_nodes.insert(node)
    }
    fn is_visited(&self,node:&usize) -> bool {
        self.visited_nodes.contains(node)
    }
}

// A directed graph whose edges carry a capacity and a weight
// undirected links are stored as two directed edges of equal capacity
#[derive(Clone,Debug)]
pub struct CapacityGraph {
    edges_len:usize,
    nodes:HashMap<usize,Neighbours>
}

impl Default for CapacityGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CapacityGraph {
    pub fn new() -> Self {
        Self {edges_len:0,nodes:HashMap::with_hasher(nohash::BuildNoHashHasher::default())}
    }
    pub fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {
            return Self::new();
        }
        Self {edges_len:0,nodes:HashMap::with_capacity_and_hasher(capacity, nohash::BuildNoHashHasher::default())}
    }
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        for neighbours in self.nodes.values_mut() {
            neighbours.shrink_to_fit();
        }
    }
    pub fn nodes_len(&self) -> usize {
        self.nodes.len()
    }
    pub fn edges_len(&self) -> usize {
        self.edges_len
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn contains_node(&self,node:usize) -> bool {
        self.nodes.contains_key(&node)
    }
    // ascending node ids, position in this vector is the node's dense index
    pub fn nodes(&self) -> Vec<usize> {
        let mut nodes:Vec<usize> = self.nodes.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }
    pub fn link(&self,start:usize,end:usize) -> Option<Link> {
        self.nodes.get(&start)?.to.get(&end).copied()
    }
    // (neighbour, link) pairs on one side of a node, ascending by neighbour
    pub fn adjacent(&self,node:usize,direction:Direction) -> Vec<(usize,Link)> {
        let Some(neighbours) = self.nodes.get(&node)
            else {return vec![]};
        let mut adjacent:Vec<(usize,Link)> = neighbours.side(direction).iter()
            .map(|(n,link)| (*n,*link))
            .collect();
        adjacent.sort_unstable_by_key(|(n,_)| *n);
        adjacent
    }
    pub fn degree(&self,node:usize,direction:Direction) -> usize {
        self.nodes.get(&node).map(|n| n.side(direction).len()).unwrap_or(0)
    }
    pub fn out_degree(&self,node:usize) -> usize {
        self.degree(node, Direction::Outgoing)
    }
    pub fn in_degree(&self,node:usize) -> usize {
        self.degree(node, Direction::Incoming)
    }
    // sum of capacities over every edge on one side of a node
    pub fn total_capacity(&self,node:usize,direction:Direction) -> Capacity {
        self.nodes.get(&node)
            .map(|n| n.side(direction).values().map(|link| link.capacity).sum())
            .unwrap_or(0.0)
    }
    fn assert_pair(&self,start:usize,end:usize) {
        let start_node = self.nodes.get(&start).expect(&format!("Start node {start} non-existent"));
        let end_node = self.nodes.get(&end).expect(&format!("End node {end} non-existent"));

        if start_node.to.get(&end) != end_node.from.get(&start) {
            panic!("Edge {start} -> {end} defined, but the two adjacency lists disagree");
        }
    }
    pub fn push_node_with_sizehint(&mut self,node:usize,hint:usize) {
        if self.nodes.contains_key(&node) {return;}
        // insert a node without adding edges
        self.nodes.insert(node, Neighbours::with_capacity(hint));
    }
    pub fn push_node(&mut self,node:usize) {
        self.push_node_with_sizehint(node, 0);
    }
    // re-pushing an existing edge overwrites its link
    pub fn push_edge_with_sizehint(&mut self,start:usize,end:usize,link:Link,hint:usize) {
        assert!(start != end, "self loop at {start}");
        assert!(link.capacity.is_finite() && link.capacity >= 0.0,
            "edge {start} -> {end} has capacity {}", link.capacity);
        self.push_node_with_sizehint(start, hint);
        self.push_node_with_sizehint(end, hint);

        let is_new = self.nodes.get_mut(&start)
            .map(|n| n.to.insert(end,link).is_none())
            .unwrap_or(false);
        if let Some(neighbours) = self.nodes.get_mut(&end) {
            neighbours.from.insert(start,link);
        }
        if is_new {
            self.edges_len += 1;
        }

        #[cfg(debug_assertions)]
        self.assert_pair(start, end);
    }
    pub fn push_edge(&mut self,start:usize,end:usize,link:Link) {
        self.push_edge_with_sizehint(start, end, link, 0);
    }
    // one undirected link becomes two directed edges with the same attributes
    pub fn push_link(&mut self,node1:usize,node2:usize,link:Link) {
        self.push_edge(node1, node2, link);
        self.push_edge(node2, node1, link);
    }
    pub fn from_links<B:Borrow<(usize,usize,Link)>>(links:impl IntoIterator<Item = B>) -> Self {
        let mut new_graph = Self::new();
        for l in links {
            let (node1,node2,link) = l.borrow();
            new_graph.push_link(*node1, *node2, *link);
        }
        new_graph.shrink_to_fit();
        new_graph
    }

    // dfs following `direction` edges from start, never entering `avoid`
    fn traverse(&self,start:usize,avoid:Option<usize>,direction:Direction) -> BTreeSet<usize> {
        let mut order = BTreeSet::new();
        if !self.nodes.contains_key(&start) || avoid == Some(start) {
            return order;
        }
        let mut visited = Visited::with_capacity(self.nodes_len());
        if let Some(avoid) = avoid {
            visited.block(avoid);
        }
        let mut stack = Vec::with_capacity(self.nodes_len());
        stack.push(start);
        while let Some(current) = stack.pop() {
            if !visited.visit(current) {
                continue;
            }
            order.insert(current);
            let Some(neighbours) = self.nodes.get(&current)
                else {continue};
            for next in neighbours.side(direction).keys() {
                if !visited.is_visited(next) {
                    stack.push(*next);
                }
            }
        }
        order
    }

    // nodes reachable from start inside the graph with `avoid` removed
    // result contains start itself
    pub fn reachable_avoiding(&self,start:usize,avoid:usize,direction:Direction) -> BTreeSet<usize> {
        self.traverse(start, Some(avoid), direction)
    }

    // nodes reachable from start (start excluded)
    pub fn reachable(&self,start:usize,direction:Direction) -> BTreeSet<usize> {
        let mut reach = self.traverse(start, None, direction);
        reach.remove(&start);
        reach
    }
}

impl<A:Borrow<(usize,usize,Link)>> FromIterator<A> for CapacityGraph {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let size = match iter.size_hint() {
            (_,Some(higher)) => {higher},
            (lower,None) => {lower}
        };
        let mut new_graph = Self::with_capacity(size);
        for edge in iter {
            let (start,end,link) = edge.borrow();
            new_graph.push_edge_with_sizehint(*start, *end, *link, size);
        }
        new_graph.shrink_to_fit();
        new_graph
    }
}

impl<T> From<T> for CapacityGraph
    where T:AsRef<[(usize,usize,Capacity)]>
{
    fn from(value: T) -> Self {
        let mut new_graph = Self::with_capacity(value.as_ref().len());
        for (start,end,capacity) in value.as_ref() {
            new_graph.push_edge_with_sizehint(*start, *end, Link::new(*capacity,1.0), value.as_ref().len());
        }
        new_graph.shrink_to_fit();
        new_graph
    }
}
