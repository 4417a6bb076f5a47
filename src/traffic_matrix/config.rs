use rand::SeedableRng;
use rand::rngs::StdRng;

use super::error::{Result, TrafficError};

// order in which ordered pairs get first claim on shared capacity
#[derive(Clone,Copy,Debug,Default,PartialEq,Eq)]
pub enum PairOrder {
    // (0,1),(0,2),...,(1,0),(1,2),... over dense node index
    #[default]
    RowMajor,
    // exact reverse of RowMajor
    Reversed,
}

impl PairOrder {
    pub fn pairs(self,nodes_len:usize) -> Vec<(usize,usize)> {
        let mut pairs:Vec<(usize,usize)> = (0..nodes_len)
            .flat_map(|i| (0..nodes_len).filter(move |j| *j != i).map(move |j| (i,j)))
            .collect();
        if self == PairOrder::Reversed {
            pairs.reverse();
        }
        pairs
    }
}

#[derive(Clone,Debug,PartialEq)]
pub struct GeneratorConfig {
    // fraction of the available bound one draw may claim, in [0,1]
    pub scaler:f64,
    // None draws a fresh seed from the OS for every run
    pub seed:Option<u64>,
    pub order:PairOrder,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {scaler:1.0,seed:None,order:PairOrder::RowMajor}
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_scaler(mut self,scaler:f64) -> Self {
        self.scaler = scaler;
        self
    }
    pub fn with_seed(mut self,seed:u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn with_order(mut self,order:PairOrder) -> Self {
        self.order = order;
        self
    }
    pub fn validate(&self) -> Result<()> {
        check_scaler(self.scaler)
    }
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

pub(crate) fn check_scaler(scaler:f64) -> Result<()> {
    if !(0.0..=1.0).contains(&scaler) {
        return Err(TrafficError::ScalerOutOfRange(scaler));
    }
    Ok(())
}
