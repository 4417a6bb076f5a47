use thiserror::Error;

use crate::dsa::graph::Direction;
use crate::linear_algebra::matrix::MatrixError;

#[derive(Error,Debug,Clone,PartialEq)]
pub enum TrafficError {
    #[error("No {direction} group of node {node} covers node {peer}, topology disconnected or partition broken")]
    PartitionLookup{node:usize,peer:usize,direction:Direction},
    #[error("Attempted to commit {value} to pair ({src},{dst}), commits must be finite and non-negative")]
    NegativeCommit{src:usize,dst:usize,value:f64},
    #[error("Committing {value} to {direction} group {group} of node {node} exceeds its capacity {capacity} (already used {used})")]
    OverCommit{node:usize,direction:Direction,group:usize,capacity:f64,used:f64,value:f64},
    #[error("scaler must lie in [0,1], got {0}")]
    ScalerOutOfRange(f64),
    #[error("node {0} is not part of the topology")]
    UnknownNode(usize),
    #[error("max-flow oracle returned {value} for pair ({src},{dst})")]
    InvalidMaxFlow{src:usize,dst:usize,value:f64},
    #[error("generated demand matrix is infeasible: {0}")]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type Result<T> = std::result::Result<T,TrafficError>;

#[derive(Debug,Clone,Copy,PartialEq)]
pub enum Violation {
    // off-diagonal entry below zero or not finite
    InvalidEntry{src:usize,dst:usize,value:f64},
    SelfDemand{node:usize,value:f64},
    Egress{node:usize,demand:f64,capacity:f64},
    Ingress{node:usize,demand:f64,capacity:f64},
}

impl Violation {
    // how far past the limit the matrix went
    pub fn overshoot(&self) -> f64 {
        match self {
            Violation::InvalidEntry{value,..} => if value.is_finite() {-value} else {f64::INFINITY},
            Violation::SelfDemand{value,..} => value.abs(),
            Violation::Egress{demand,capacity,..} | Violation::Ingress{demand,capacity,..} => demand - capacity,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::InvalidEntry{src,dst,value} => write!(f,"demand ({src},{dst}) = {value}"),
            Violation::SelfDemand{node,value} => write!(f,"self demand at node {node} = {value}"),
            Violation::Egress{node,demand,capacity} =>
                write!(f,"node {node} sends {demand} over egress capacity {capacity} (+{})",self.overshoot()),
            Violation::Ingress{node,demand,capacity} =>
                write!(f,"node {node} receives {demand} over ingress capacity {capacity} (+{})",self.overshoot()),
        }
    }
}

#[derive(Error,Debug,Clone,PartialEq)]
pub struct ValidationFailure {
    pub violations:Vec<Violation>,
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"{} violation(s)",self.violations.len())?;
        for (i,violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 {": "} else {"; "};
            write!(f,"{sep}{violation}")?;
        }
        Ok(())
    }
}

impl ValidationFailure {
    pub fn worst_overshoot(&self) -> f64 {
        self.violations.iter().map(Violation::overshoot).fold(0.0, f64::max)
    }
    // distinct offending nodes, ascending
    pub fn nodes(&self) -> Vec<usize> {
        let mut nodes:Vec<usize> = self.violations.iter().map(|v| match v {
            Violation::InvalidEntry{src,..} => *src,
            Violation::SelfDemand{node,..} | Violation::Egress{node,..} | Violation::Ingress{node,..} => *node,
        }).collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }
}
