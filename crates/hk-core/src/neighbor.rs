//! Neighbor Rule
//!
//! Decides which agents influence agent `i`: everyone whose opinion lies
//! within the confidence radius under the chosen norm and topology.

use hk_types::{Norm, Topology};

use crate::opinion::Opinion;
use crate::params::ModelParams;

/// Influence-set membership rule shared by every engine and analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborRule {
    pub radius: f64,
    pub norm: Norm,
    pub topology: Topology,
    pub include_self: bool,
}

impl NeighborRule {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            norm: Norm::L2,
            topology: Topology::Bounded,
            include_self: true,
        }
    }

    pub fn from_params(params: &ModelParams) -> Self {
        Self {
            radius: params.radius,
            norm: params.norm,
            topology: Topology::Bounded,
            include_self: params.include_self,
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_include_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Whether agent `j` belongs to agent `i`'s influence set.
    pub fn influences<O: Opinion>(&self, profile: &[O], i: usize, j: usize) -> bool {
        if i == j && !self.include_self {
            return false;
        }
        profile[i].distance(profile[j], self.norm, self.topology) <= self.radius
    }

    /// Indices in agent `i`'s influence set, ascending.
    pub fn neighbors_iter<'a, O: Opinion>(
        &'a self,
        profile: &'a [O],
        i: usize,
    ) -> impl Iterator<Item = usize> + 'a {
        (0..profile.len()).filter(move |&j| self.influences(profile, i, j))
    }

    pub fn neighbors<O: Opinion>(&self, profile: &[O], i: usize) -> Vec<usize> {
        self.neighbors_iter(profile, i).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_types::Point2;

    #[test]
    fn test_worked_example_sets() {
        let profile = [0.1, 0.5, 0.9];
        let rule = NeighborRule::new(0.5);
        assert_eq!(rule.neighbors(&profile, 0), vec![0, 1]);
        assert_eq!(rule.neighbors(&profile, 1), vec![0, 1, 2]);
        assert_eq!(rule.neighbors(&profile, 2), vec![1, 2]);
    }

    #[test]
    fn test_self_exclusion() {
        let profile = [0.1, 0.5, 0.9];
        let rule = NeighborRule::new(0.3).with_include_self(false);
        assert!(rule.neighbors(&profile, 0).is_empty());
        assert!(!rule.influences(&profile, 1, 1));
    }

    #[test]
    fn test_boundary_distance_counts() {
        let profile = [0.0, 0.25];
        let rule = NeighborRule::new(0.25);
        assert!(rule.influences(&profile, 0, 1));
    }

    #[test]
    fn test_periodic_wraps() {
        let profile = [0.05, 0.5, 0.95];
        let bounded = NeighborRule::new(0.15);
        let periodic = bounded.with_topology(Topology::Periodic);
        assert_eq!(bounded.neighbors(&profile, 0), vec![0]);
        assert_eq!(periodic.neighbors(&profile, 0), vec![0, 2]);
    }

    #[test]
    fn test_planar_norm_matters() {
        let profile = [Point2::new(0.0, 0.0), Point2::new(0.3, 0.3)];
        let l2 = NeighborRule::new(0.5).with_norm(Norm::L2);
        let l1 = NeighborRule::new(0.5).with_norm(Norm::L1);
        assert!(l2.influences(&profile, 0, 1));
        assert!(!l1.influences(&profile, 0, 1));
    }
}
