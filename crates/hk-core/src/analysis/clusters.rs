//! Cluster Detector
//!
//! Greedy single-pass clustering of a final opinion profile. The first
//! point seeds the list; each later point becomes a new representative
//! unless it lies strictly within R of an existing one. Representatives are
//! never moved and no membership lists are kept, so only the count and the
//! representatives themselves are meaningful.
//!
//! Planar profiles are swept in order of their first coordinate, which does
//! not guarantee spatial locality.

use hk_types::{Norm, Topology};
use serde::{Deserialize, Serialize};

use crate::error::{require_positive, HkError, HkResult, Parameter};
use crate::opinion::Opinion;

/// Order in which points are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SweepOrder {
    /// Ascending by value (first coordinate in 2D).
    #[default]
    Sorted,
    /// As supplied.
    AsGiven,
}

/// Which representatives a point is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClusterMatch {
    /// Every representative created so far.
    #[default]
    Any,
    /// Only the most recently created representative. This is the rule
    /// existing result tables were produced with; on sorted scalar data it
    /// agrees with `Any`.
    Latest,
}

/// Representatives found by one sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clusters<O> {
    pub representatives: Vec<O>,
}

impl<O> Clusters<O> {
    pub fn count(&self) -> usize {
        self.representatives.len()
    }
}

impl Clusters<f64> {
    /// Mean of the representatives.
    pub fn mean(&self) -> f64 {
        self.representatives.iter().sum::<f64>() / self.count() as f64
    }

    /// Population variance of the representatives.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.representatives
            .iter()
            .map(|r| (r - mean).powi(2))
            .sum::<f64>()
            / self.count() as f64
    }

    pub fn statistics(&self) -> ClusterStatistics {
        ClusterStatistics {
            count: self.count(),
            mean: self.mean(),
            variance: self.variance(),
        }
    }
}

/// Count, mean and variance of scalar cluster representatives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterStatistics {
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
}

/// Configurable greedy cluster sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterDetector {
    radius: f64,
    norm: Norm,
    order: SweepOrder,
    matching: ClusterMatch,
}

impl ClusterDetector {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            norm: Norm::L2,
            order: SweepOrder::default(),
            matching: ClusterMatch::default(),
        }
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_order(mut self, order: SweepOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_matching(mut self, matching: ClusterMatch) -> Self {
        self.matching = matching;
        self
    }

    pub fn detect<O: Opinion>(&self, profile: &[O]) -> HkResult<Clusters<O>> {
        require_positive(Parameter::Radius, self.radius)?;
        if profile.is_empty() {
            return Err(HkError::DegenerateProfile);
        }

        let mut points = profile.to_vec();
        if self.order == SweepOrder::Sorted {
            points.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));
        }

        let near = |a: O, b: O| a.distance(b, self.norm, Topology::Bounded) < self.radius;
        let mut representatives = vec![points[0]];
        for &point in &points {
            let represented = match self.matching {
                ClusterMatch::Latest => representatives.last().is_some_and(|&r| near(point, r)),
                ClusterMatch::Any => representatives.iter().any(|&r| near(point, r)),
            };
            if !represented {
                representatives.push(point);
            }
        }

        Ok(Clusters { representatives })
    }
}

/// Number of clusters under the default sorted sweep.
pub fn count_clusters<O: Opinion>(profile: &[O], radius: f64, norm: Norm) -> HkResult<usize> {
    ClusterDetector::new(radius)
        .with_norm(norm)
        .detect(profile)
        .map(|clusters| clusters.count())
}

/// Count, mean and variance of the representatives of a scalar profile.
pub fn cluster_statistics(profile: &[f64], radius: f64) -> HkResult<ClusterStatistics> {
    ClusterDetector::new(radius)
        .detect(profile)
        .map(|clusters| clusters.statistics())
}
