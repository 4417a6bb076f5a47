use log::debug;

use crate::dsa::graph::{Capacity, CapacityGraph};
use crate::dsa::max_flow::MaxFlowOracle;
use crate::linear_algebra::matrix::Matrix;

use super::demand::NodeIndex;
use super::error::{Result, TrafficError};

// max flow each ordered pair could carry if it had the network to itself
#[derive(Clone,Debug,PartialEq)]
pub struct PairwiseMaxFlow {
    index:NodeIndex,
    flows:Matrix,
}

impl PairwiseMaxFlow {
    // one oracle call per ordered pair, diagonal stays 0
    pub fn compute<O:MaxFlowOracle + ?Sized>(graph:&CapacityGraph,oracle:&O) -> Result<Self> {
        let index = NodeIndex::new(graph);
        let n = index.len();
        let mut flows = Matrix::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                if i == j {continue}
                let (src,dst) = (index.node_at(i),index.node_at(j));
                let value = oracle.max_flow(graph, src, dst);
                if !value.is_finite() || value < 0.0 {
                    return Err(TrafficError::InvalidMaxFlow { src, dst, value });
                }
                flows.set(i, j, value)?;
            }
        }
        debug!("pairwise max flow computed for {} ordered pairs",n*n.saturating_sub(1));
        Ok(Self {index,flows})
    }
    pub fn index(&self) -> &NodeIndex {
        &self.index
    }
    pub fn get(&self,src:usize,dst:usize) -> Result<Capacity> {
        let (i,j) = (self.index.index_of(src)?,self.index.index_of(dst)?);
        Ok(self.flows.get(i, j)?)
    }
}

#[cfg(test)]
mod tests {
    use super::PairwiseMaxFlow;
    use crate::dsa::graph::CapacityGraph;
    use crate::dsa::max_flow::{EdmondsKarp, MaxFlowOracle};
    use crate::traffic_matrix::error::TrafficError;
    use crate::traffic_matrix::topology::reference_topology;

    struct Broken;

    impl MaxFlowOracle for Broken {
        fn max_flow(&self,_graph:&CapacityGraph,_source:usize,_sink:usize) -> f64 {
            -1.0
        }
    }

    #[test]
    fn test_reference_pairs() {
        let flows = PairwiseMaxFlow::compute(&reference_topology(), &EdmondsKarp).unwrap();
        assert_eq!(flows.get(1, 2).unwrap(),1001.0);
        assert_eq!(flows.get(2, 1).unwrap(),1001.0);
        assert_eq!(flows.get(6, 2).unwrap(),1.0);
        assert_eq!(flows.get(3, 3).unwrap(),0.0);
        assert_eq!(flows.get(7, 3),Err(TrafficError::UnknownNode(7)));
    }
    #[test]
    fn test_oracle_output_checked() {
        let result = PairwiseMaxFlow::compute(&reference_topology(), &Broken);
        assert!(matches!(result,Err(TrafficError::InvalidMaxFlow { src: 1, dst: 2, .. })));
    }
}
