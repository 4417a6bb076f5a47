// per group capacity bookkeeping for one generation run
//
// The ledger never decides how much may be committed. The sampler computes the
// bound, the ledger only records consumption and rejects commits that break
// 0 <= used <= capacity.

use crate::dsa::graph::{Capacity, Direction, HashMap};

use super::error::{Result, TrafficError};
use super::partition::{Group, GroupPartition};
use super::topology::CAPACITY_EPS;

#[derive(Clone,Debug)]
pub struct ResidualLedger {
    outgoing:HashMap<usize,Vec<Group>>,
    incoming:HashMap<usize,Vec<Group>>,
}

impl From<&GroupPartition> for ResidualLedger {
    fn from(value: &GroupPartition) -> Self {
        let mut ledger = Self {
            outgoing:value.outgoing.clone(),
            incoming:value.incoming.clone(),
        };
        ledger.reset();
        ledger
    }
}

impl From<GroupPartition> for ResidualLedger {
    fn from(value: GroupPartition) -> Self {
        let mut ledger = Self {outgoing:value.outgoing,incoming:value.incoming};
        ledger.reset();
        ledger
    }
}

impl ResidualLedger {
    fn side(&self,direction:Direction) -> &HashMap<usize,Vec<Group>> {
        match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        }
    }
    fn position(&self,node:usize,peer:usize,direction:Direction) -> Result<usize> {
        self.side(direction).get(&node)
            .and_then(|groups| groups.iter().position(|g| g.covers(peer)))
            .ok_or(TrafficError::PartitionLookup { node, peer, direction })
    }
    pub fn groups(&self,node:usize,direction:Direction) -> &[Group] {
        self.side(direction).get(&node).map(|g| g.as_slice()).unwrap_or(&[])
    }
    // the group of `node` on `direction` whose reachable set holds `peer`
    pub fn group_for(&self,node:usize,peer:usize,direction:Direction) -> Result<&Group> {
        let position = self.position(node, peer, direction)?;
        Ok(&self.groups(node, direction)[position])
    }
    pub fn available(&self,node:usize,peer:usize,direction:Direction) -> Result<Capacity> {
        Ok(self.group_for(node, peer, direction)?.available())
    }
    pub fn total_capacity(&self,node:usize,direction:Direction) -> Capacity {
        self.groups(node, direction).iter().map(|g| g.capacity).sum()
    }
    pub fn used(&self,node:usize,direction:Direction) -> Capacity {
        self.groups(node, direction).iter().map(|g| g.used_capacity).sum()
    }

    fn check_fits(group:&Group,value:f64) -> Result<()> {
        if group.used_capacity + value > group.capacity + CAPACITY_EPS*group.capacity.max(1.0) {
            return Err(TrafficError::OverCommit {
                node:group.node,
                direction:group.direction,
                group:group.id,
                capacity:group.capacity,
                used:group.used_capacity,
                value,
            });
        }
        Ok(())
    }

    // charge `value` to the outgoing group of src and the incoming group of dst
    // nothing is written unless both groups can take it
    pub fn commit(&mut self,src:usize,dst:usize,value:f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(TrafficError::NegativeCommit { src, dst, value });
        }
        let out_position = self.position(src, dst, Direction::Outgoing)?;
        let in_position = self.position(dst, src, Direction::Incoming)?;
        Self::check_fits(&self.groups(src, Direction::Outgoing)[out_position], value)?;
        Self::check_fits(&self.groups(dst, Direction::Incoming)[in_position], value)?;

        if let Some(groups) = self.outgoing.get_mut(&src) {
            groups[out_position].used_capacity += value;
        }
        if let Some(groups) = self.incoming.get_mut(&dst) {
            groups[in_position].used_capacity += value;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        for groups in self.outgoing.values_mut().chain(self.incoming.values_mut()) {
            for group in groups.iter_mut() {
                group.used_capacity = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ResidualLedger;
    use crate::dsa::graph::Direction;
    use crate::traffic_matrix::error::TrafficError;
    use crate::traffic_matrix::partition::GroupPartition;
    use crate::traffic_matrix::topology::five_node;

    fn ledger() -> ResidualLedger {
        GroupPartition::build(&five_node()).into()
    }

    #[test]
    fn test_available_after_commit() {
        let mut ledger = ledger();
        assert_eq!(ledger.groups(3, Direction::Outgoing).len(),2);
        assert_eq!(ledger.available(3, 4, Direction::Outgoing).unwrap(),1.0);
        assert_eq!(ledger.available(3, 0, Direction::Outgoing).unwrap(),3.0);
        ledger.commit(3, 4, 1.0).unwrap();
        assert_eq!(ledger.available(3, 4, Direction::Outgoing).unwrap(),0.0);
        assert_eq!(ledger.available(4, 3, Direction::Incoming).unwrap(),0.0);
        // other group of 3 untouched
        assert_eq!(ledger.available(3, 2, Direction::Outgoing).unwrap(),3.0);
        assert_eq!(ledger.used(3, Direction::Outgoing),1.0);
        assert_eq!(ledger.total_capacity(3, Direction::Outgoing),4.0);
    }
    #[test]
    fn test_commit_touches_two_groups() {
        let mut ledger = ledger();
        ledger.commit(0, 2, 0.5).unwrap();
        let touched:usize = [Direction::Outgoing,Direction::Incoming].into_iter()
            .flat_map(|d| (0..5).map(move |n| (n,d)))
            .map(|(n,d)| ledger.groups(n, d).iter().filter(|g| g.used_capacity > 0.0).count())
            .sum();
        assert_eq!(touched,2);
        assert_eq!(ledger.group_for(0, 2, Direction::Outgoing).unwrap().used_capacity,0.5);
        assert_eq!(ledger.group_for(2, 0, Direction::Incoming).unwrap().used_capacity,0.5);
    }
    #[test]
    fn test_rejected_commits_leave_no_trace() {
        let mut ledger = ledger();
        assert!(matches!(ledger.commit(3, 4, 1.5),Err(TrafficError::OverCommit { node: 3, group: 2, .. })));
        assert!(matches!(ledger.commit(3, 4, -1.0),Err(TrafficError::NegativeCommit { .. })));
        assert!(matches!(ledger.commit(3, 4, f64::NAN),Err(TrafficError::NegativeCommit { .. })));
        assert_eq!(ledger.available(3, 4, Direction::Outgoing).unwrap(),1.0);
        // 4 only has 1 of ingress capacity from 3's side
        ledger.commit(0, 4, 1.0).unwrap();
        assert!(matches!(ledger.commit(3, 4, 0.5),Err(TrafficError::OverCommit { node: 4, .. })));
        assert_eq!(ledger.available(3, 4, Direction::Outgoing).unwrap(),1.0);
    }
    #[test]
    fn test_lookup_failure_and_reset() {
        let mut graph = five_node();
        graph.push_node(9);
        let mut ledger:ResidualLedger = GroupPartition::build(&graph).into();
        assert_eq!(ledger.group_for(9, 0, Direction::Outgoing).unwrap_err(),
            TrafficError::PartitionLookup { node: 9, peer: 0, direction: Direction::Outgoing });
        assert!(ledger.commit(0, 9, 0.0).is_err());
        ledger.commit(1, 3, 1.0).unwrap();
        ledger.reset();
        assert_eq!(ledger.used(1, Direction::Outgoing),0.0);
        assert_eq!(ledger.used(3, Direction::Incoming),0.0);
    }
}
