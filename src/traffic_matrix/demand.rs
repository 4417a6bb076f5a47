use crate::dsa::graph::CapacityGraph;
use crate::linear_algebra::matrix::{Matrix, MatrixError};

use super::error::{Result, TrafficError};

// maps opaque node ids to dense row/col positions, ascending by id
#[derive(Clone,Debug,PartialEq,Eq,Default)]
pub struct NodeIndex {
    nodes:Vec<usize>,
}

impl NodeIndex {
    pub fn new(graph:&CapacityGraph) -> Self {
        Self {nodes:graph.nodes()}
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }
    pub fn index_of(&self,node:usize) -> Result<usize> {
        self.nodes.binary_search(&node).map_err(|_| TrafficError::UnknownNode(node))
    }
    // panics when index is out of range, only fed with 0..len
    pub fn node_at(&self,index:usize) -> usize {
        self.nodes[index]
    }
}

// |N|x|N| generated traffic, zero diagonal
#[derive(Clone,Debug,PartialEq)]
pub struct DemandMatrix {
    index:NodeIndex,
    demands:Matrix,
}

impl DemandMatrix {
    pub fn zeros(index:NodeIndex) -> Self {
        let n = index.len();
        Self {index,demands:Matrix::zeros(n, n)}
    }
    // rows/cols follow the ascending node ids of `nodes`
    pub fn from_matrix(nodes:Vec<usize>,demands:Matrix) -> Result<Self> {
        let mut nodes = nodes;
        nodes.sort_unstable();
        nodes.dedup();
        let n = nodes.len();
        if demands.dimension() != (n,n) {
            return Err(MatrixError::SizeMisMatch {
                row:n,col:n,len:demands.dimension().0*demands.dimension().1
            }.into());
        }
        Ok(Self {index:NodeIndex{nodes},demands})
    }
    pub fn index(&self) -> &NodeIndex {
        &self.index
    }
    pub fn nodes(&self) -> &[usize] {
        self.index.nodes()
    }
    pub fn matrix(&self) -> &Matrix {
        &self.demands
    }
    pub fn get(&self,src:usize,dst:usize) -> Result<f64> {
        let (i,j) = (self.index.index_of(src)?,self.index.index_of(dst)?);
        Ok(self.demands.get(i, j)?)
    }
    pub(crate) fn set_dense(&mut self,i:usize,j:usize,value:f64) -> Result<()> {
        Ok(self.demands.set(i, j, value)?)
    }
    // total traffic leaving `node`
    pub fn row_sum(&self,node:usize) -> Result<f64> {
        Ok(self.demands.row_sum(self.index.index_of(node)?)?)
    }
    // total traffic entering `node`
    pub fn col_sum(&self,node:usize) -> Result<f64> {
        Ok(self.demands.col_sum(self.index.index_of(node)?)?)
    }
    // flattened ((src,dst),demand) without the diagonal, row major
    pub fn off_diagonal(&self) -> Vec<((usize,usize),f64)> {
        self.demands.indexed()
            .filter(|((i,j),_)| i != j)
            .map(|((i,j),value)| ((self.index.node_at(i),self.index.node_at(j)),value))
            .collect()
    }
    pub fn total(&self) -> f64 {
        self.off_diagonal().iter().map(|(_,value)| value).sum()
    }
}

impl std::fmt::Display for DemandMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f,"nodes {:?}",self.index.nodes())?;
        write!(f,"{}",self.demands)
    }
}
