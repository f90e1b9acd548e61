// traits.rs - Core traits and types for the frequency estimators

use crate::data::HaplotypeLabel;
use crate::error::{LdMixError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Probability of every distinct label under one sub-model.
///
/// Keys are kept sorted so that iteration, and therefore every sum over the
/// table, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    probs: BTreeMap<HaplotypeLabel, f64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: HaplotypeLabel, prob: f64) -> Option<f64> {
        self.probs.insert(label, prob)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.probs.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.probs.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HaplotypeLabel, f64)> {
        self.probs.iter().map(|(l, p)| (l, *p))
    }

    pub fn labels(&self) -> impl Iterator<Item = &HaplotypeLabel> {
        self.probs.keys()
    }

    /// Sum of squared differences over the labels present in both tables
    pub fn squared_distance(&self, other: &FrequencyTable) -> f64 {
        self.probs
            .iter()
            .filter_map(|(label, p)| other.get(label.as_str()).map(|q| (p - q) * (p - q)))
            .sum()
    }
}

impl FromIterator<(HaplotypeLabel, f64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (HaplotypeLabel, f64)>>(iter: I) -> Self {
        FrequencyTable {
            probs: iter.into_iter().collect(),
        }
    }
}

/// Pluggable sub-model of the mixture.
///
/// `estimate` receives one non-negative weight per chromosome (aligned with
/// `labels`) and must return a probability for every distinct label present.
pub trait FrequencyEstimator: Send + Sync + Debug {
    fn estimate(
        &self,
        weights: &[f64],
        labels: &[HaplotypeLabel],
        blocksize: usize,
    ) -> Result<FrequencyTable>;

    /// Get a human-readable name for this estimator
    fn name(&self) -> &'static str;

    /// Get a description of this estimator
    fn description(&self) -> &'static str;
}

/// Shared precondition checks for estimator inputs
pub fn check_estimator_input(weights: &[f64], labels: &[HaplotypeLabel]) -> Result<()> {
    if labels.is_empty() {
        return Err(LdMixError::invalid_input("No labels to estimate frequencies from"));
    }
    if weights.len() != labels.len() {
        return Err(LdMixError::invalid_input(format!(
            "{} weights for {} labels",
            weights.len(),
            labels.len()
        )));
    }
    if let Some((i, w)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(LdMixError::invalid_input(format!(
            "Weight {} at position {} is not a finite non-negative number",
            w, i
        )));
    }
    Ok(())
}

/// Split a label into its block codes, checking both against `blocksize`
pub fn split_label(label: &HaplotypeLabel, blocksize: usize) -> Result<(&str, &str)> {
    let (block1, block2) = label.blocks();
    if block1.chars().count() != blocksize || block2.chars().count() != blocksize {
        return Err(LdMixError::invalid_input(format!(
            "Label '{}' does not contain two codes of blocksize {}",
            label, blocksize
        )));
    }
    Ok((block1, block2))
}
