use crate::dsa::graph::{CapacityGraph, Direction};
use crate::traffic_matrix::DemandMatrix;

// summary of one generated matrix, off-diagonal entries only
#[derive(Clone,Copy,Debug,PartialEq,Default)]
pub struct DemandStatistics {
    pub pairs:usize,
    pub total:f64,
    pub mean:f64,
    pub std_dev:f64,
    pub max:f64,
    // highest demand/capacity ratio over all nodes, 0 for nodes without capacity
    pub peak_egress_utilization:f64,
    pub peak_ingress_utilization:f64,
}

fn utilization(demand:f64,capacity:f64) -> f64 {
    if capacity <= 0.0 {0.0} else {demand/capacity}
}

impl DemandStatistics {
    pub fn new(matrix:&DemandMatrix,graph:&CapacityGraph) -> Self {
        let entries = matrix.off_diagonal();
        if entries.is_empty() {
            return Self::default();
        }
        let n = entries.len() as f64;

        let mut sum = 0.0;
        let mut sum_2 = 0.0;
        let mut max:f64 = 0.0;
        for (_,d) in entries.iter() {
            sum += d;
            sum_2 += d.powi(2);
            max = max.max(*d);
        }
        let mean = sum/n;
        // population variance, clamped against rounding below zero
        let variance = (sum_2/n - mean.powi(2)).max(0.0);

        let mut peak_egress:f64 = 0.0;
        let mut peak_ingress:f64 = 0.0;
        for (i,node) in matrix.nodes().iter().enumerate() {
            let sent = matrix.matrix().row_sum(i).unwrap_or(0.0);
            let received = matrix.matrix().col_sum(i).unwrap_or(0.0);
            peak_egress = peak_egress.max(utilization(sent, graph.total_capacity(*node, Direction::Outgoing)));
            peak_ingress = peak_ingress.max(utilization(received, graph.total_capacity(*node, Direction::Incoming)));
        }

        Self {
            pairs:entries.len(),
            total:sum,
            mean,
            std_dev:variance.sqrt(),
            max,
            peak_egress_utilization:peak_egress,
            peak_ingress_utilization:peak_ingress,
        }
    }
}
