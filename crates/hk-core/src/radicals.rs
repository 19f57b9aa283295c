//! Radical Agents
//!
//! Radicals are fixed opinions appended to the base population. They count
//! towards everyone's influence set but are never influenced themselves.

use crate::error::{HkError, HkResult, Parameter};

/// Opinions of the fixed agents, in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadicalSet {
    opinions: Vec<f64>,
}

impl RadicalSet {
    pub fn new(opinions: Vec<f64>) -> Self {
        Self { opinions }
    }

    /// Builds a set whose declared size must match the supplied opinions.
    pub fn with_count(count: usize, opinions: Vec<f64>) -> HkResult<Self> {
        if count != opinions.len() {
            return Err(HkError::invalid(
                Parameter::Radicals,
                format!(
                    "declared {} radicals but {} opinions were given",
                    count,
                    opinions.len()
                ),
            ));
        }
        Ok(Self::new(opinions))
    }

    pub fn len(&self) -> usize {
        self.opinions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opinions.is_empty()
    }

    pub fn opinions(&self) -> &[f64] {
        &self.opinions
    }
}

/// Base population and radicals merged into one sorted profile.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPopulation {
    pub profile: Vec<f64>,
    /// Positions of the radicals in `profile`, ascending.
    pub radical_indices: Vec<usize>,
}

/// Concatenates and sorts both populations, then locates each radical by
/// claiming the first unclaimed index holding exactly its value.
pub fn merge(base: &[f64], radicals: &RadicalSet) -> HkResult<MergedPopulation> {
    let mut profile: Vec<f64> = base.iter().chain(radicals.opinions()).copied().collect();
    profile.sort_by(f64::total_cmp);

    let mut claimed = vec![false; profile.len()];
    let mut radical_indices = Vec::with_capacity(radicals.len());
    for &value in radicals.opinions() {
        let index = (0..profile.len())
            .find(|&j| !claimed[j] && profile[j] == value)
            .ok_or(HkError::RadicalNotFound { value })?;
        claimed[index] = true;
        radical_indices.push(index);
    }
    radical_indices.sort_unstable();

    Ok(MergedPopulation {
        profile,
        radical_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sorts_and_locates() {
        let merged = merge(&[0.4, 0.2, 0.6], &RadicalSet::new(vec![0.9, 0.1])).unwrap();
        assert_eq!(merged.profile, vec![0.1, 0.2, 0.4, 0.6, 0.9]);
        assert_eq!(merged.radical_indices, vec![0, 4]);
    }

    #[test]
    fn test_duplicate_values_claim_distinct_indices() {
        let merged = merge(&[0.5, 0.3], &RadicalSet::new(vec![0.5, 0.5])).unwrap();
        assert_eq!(merged.profile, vec![0.3, 0.5, 0.5, 0.5]);
        assert_eq!(merged.radical_indices, vec![1, 2]);
    }

    #[test]
    fn test_declared_count_must_match() {
        let err = RadicalSet::with_count(3, vec![0.1, 0.9]).unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::Radicals));
        assert_eq!(RadicalSet::with_count(2, vec![0.1, 0.9]).unwrap().len(), 2);
    }

    #[test]
    fn test_unmatchable_radical_fails() {
        let err = merge(&[0.2], &RadicalSet::new(vec![f64::NAN])).unwrap_err();
        assert!(matches!(err, HkError::RadicalNotFound { .. }));
    }

    #[test]
    fn test_empty_radicals() {
        let merged = merge(&[0.7, 0.3], &RadicalSet::default()).unwrap();
        assert_eq!(merged.profile, vec![0.3, 0.7]);
        assert!(merged.radical_indices.is_empty());
    }
}
