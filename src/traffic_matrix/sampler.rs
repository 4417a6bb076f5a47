// constrained random demand draws
//
// Pairs are drawn one after the other and every draw is committed before the
// next, so pairs earlier in the order get first claim on shared groups. The
// resulting distribution is therefore not invariant under reordering pairs.

use log::trace;
use rand::Rng;

use crate::dsa::graph::{CapacityGraph, Direction};

use super::config::{PairOrder, check_scaler};
use super::demand::{DemandMatrix, NodeIndex};
use super::error::Result;
use super::ledger::ResidualLedger;
use super::pairwise::PairwiseMaxFlow;

// upper limit of one draw before scaling
// the pair's max flow when it fits the residual bound, the bound otherwise
pub fn draw_limit(max_flow:f64,bound:f64) -> f64 {
    if max_flow <= bound {max_flow} else {bound}
}

pub fn generate<R:Rng>(
    graph:&CapacityGraph,
    max_flow:&PairwiseMaxFlow,
    ledger:&mut ResidualLedger,
    scaler:f64,
    order:PairOrder,
    rng:&mut R,
) -> Result<DemandMatrix> {
    check_scaler(scaler)?;
    let index = NodeIndex::new(graph);
    let mut demands = DemandMatrix::zeros(index.clone());

    for (i,j) in order.pairs(index.len()) {
        let (src,dst) = (index.node_at(i),index.node_at(j));
        // always drawn, keeps the stream aligned for every scaler
        let u:f64 = rng.random();
        let flow = max_flow.get(src, dst)?;
        if flow <= 0.0 {
            // disconnected pair
            continue;
        }
        let bound = ledger.available(src, dst, Direction::Outgoing)?
            .min(ledger.available(dst, src, Direction::Incoming)?);
        let demand = u*draw_limit(flow, bound)*scaler;
        trace!("pair ({src},{dst}) max flow {flow} bound {bound} demand {demand}");
        ledger.commit(src, dst, demand)?;
        demands.set_dense(i, j, demand)?;
    }
    Ok(demands)
}
