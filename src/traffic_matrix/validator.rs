// post-hoc feasibility check of a generated matrix against raw node capacities

use log::warn;

use crate::dsa::graph::{CapacityGraph, Direction};

use super::demand::DemandMatrix;
use super::error::{Result, ValidationFailure, Violation};
use super::topology::CAPACITY_EPS;

fn exceeds(demand:f64,capacity:f64) -> bool {
    demand > capacity + CAPACITY_EPS*capacity.max(1.0)
}

// every invariant the matrix breaks, empty when feasible
pub fn violations(matrix:&DemandMatrix,graph:&CapacityGraph) -> Result<Vec<Violation>> {
    let mut found = Vec::new();
    for ((src,dst),value) in matrix.off_diagonal() {
        if !value.is_finite() || value < 0.0 {
            found.push(Violation::InvalidEntry { src, dst, value });
        }
    }
    for &node in matrix.nodes() {
        let self_demand = matrix.get(node, node)?;
        if self_demand != 0.0 {
            found.push(Violation::SelfDemand { node, value: self_demand });
        }
        let sent = matrix.row_sum(node)? - self_demand;
        let egress = graph.total_capacity(node, Direction::Outgoing);
        if exceeds(sent, egress) {
            found.push(Violation::Egress { node, demand: sent, capacity: egress });
        }
        let received = matrix.col_sum(node)? - self_demand;
        let ingress = graph.total_capacity(node, Direction::Incoming);
        if exceeds(received, ingress) {
            found.push(Violation::Ingress { node, demand: received, capacity: ingress });
        }
    }
    Ok(found)
}

pub fn check(matrix:&DemandMatrix,graph:&CapacityGraph) -> Result<()> {
    let violations = violations(matrix, graph)?;
    if violations.is_empty() {
        return Ok(());
    }
    let failure = ValidationFailure { violations };
    warn!("demand matrix rejected, worst overshoot {}: {failure}",failure.worst_overshoot());
    Err(failure.into())
}

pub fn is_feasible(matrix:&DemandMatrix,graph:&CapacityGraph) -> bool {
    check(matrix, graph).is_ok()
}

#[cfg(test)]
mod tests {
    use super::{check, is_feasible, violations};
    use crate::linear_algebra::matrix::Matrix;
    use crate::traffic_matrix::demand::DemandMatrix;
    use crate::traffic_matrix::error::{TrafficError, Violation};
    use crate::traffic_matrix::topology::five_node;

    fn matrix_with(entries:&[(usize,usize,f64)]) -> DemandMatrix {
        let mut m = Matrix::zeros(5, 5);
        for (i,j,value) in entries {
            m.set(*i, *j, *value).unwrap();
        }
        DemandMatrix::from_matrix((0..5).collect(), m).unwrap()
    }

    #[test]
    fn test_feasible() {
        let graph = five_node();
        assert!(is_feasible(&matrix_with(&[]), &graph));
        // node 3 has 4 of egress in total
        assert!(is_feasible(&matrix_with(&[(3,0,2.0),(3,2,1.0),(3,4,1.0)]), &graph));
    }
    #[test]
    fn test_overshoot_reported() {
        let graph = five_node();
        let matrix = matrix_with(&[(4,0,1.5),(2,1,-0.5)]);
        let found = violations(&matrix, &graph).unwrap();
        assert!(found.contains(&Violation::InvalidEntry { src: 2, dst: 1, value: -0.5 }));
        assert!(found.contains(&Violation::Egress { node: 4, demand: 1.5, capacity: 1.0 }));
        let Err(TrafficError::Validation(failure)) = check(&matrix, &graph)
            else {panic!("matrix should be rejected")};
        assert_eq!(failure.nodes(),vec![2,4]);
        assert!((failure.worst_overshoot() - 0.5).abs() < 1e-12);
    }
    #[test]
    fn test_ingress_and_diagonal() {
        let graph = five_node();
        // 2 has a single incoming edge of capacity 1
        let matrix = matrix_with(&[(0,2,0.75),(3,2,0.75),(1,1,0.1)]);
        let found = violations(&matrix, &graph).unwrap();
        assert_eq!(found,vec![
            Violation::SelfDemand { node: 1, value: 0.1 },
            Violation::Ingress { node: 2, demand: 1.5, capacity: 1.0 },
        ]);
    }
}
