//! Cluster Tally
//!
//! Accumulates a running statistic per observed cluster count, for callers
//! that repeat runs and want the spread of some quantity grouped by how
//! many clusters each run ended with.

use serde::Serialize;
use std::collections::BTreeMap;

/// Welford accumulator for count, mean and variance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunningStat {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Zero until a value is pushed.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance; zero for fewer than two values.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Unbiased sample variance; zero for fewer than two values.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }
}

/// Running statistics keyed by cluster count.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterTally {
    by_count: BTreeMap<usize, RunningStat>,
}

impl ClusterTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for a run that ended with `clusters` clusters.
    pub fn record(&mut self, clusters: usize, value: f64) {
        self.by_count.entry(clusters).or_default().push(value);
    }

    pub fn get(&self, clusters: usize) -> Option<&RunningStat> {
        self.by_count.get(&clusters)
    }

    /// Entries in ascending cluster count.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RunningStat)> {
        self.by_count.iter().map(|(&k, v)| (k, v))
    }

    pub fn total_runs(&self) -> u64 {
        self.by_count.values().map(RunningStat::count).sum()
    }

    /// Cluster count seen most often; ties go to the smaller count.
    pub fn most_common(&self) -> Option<usize> {
        self.by_count
            .iter()
            .max_by(|(ka, a), (kb, b)| a.count().cmp(&b.count()).then(kb.cmp(ka)))
            .map(|(&k, _)| k)
    }
}
