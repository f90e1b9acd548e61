// linkage.rs - Linkage (LD) frequency estimator

use super::traits::{check_estimator_input, split_label, FrequencyEstimator, FrequencyTable};
use crate::data::HaplotypeLabel;
use crate::error::Result;
use std::collections::BTreeMap;

/// Linkage model: both blocks are inherited as a unit, so each joint label
/// gets its weighted empirical frequency.
#[derive(Debug, Clone)]
pub struct LinkageFrequency;

impl FrequencyEstimator for LinkageFrequency {
    fn estimate(
        &self,
        weights: &[f64],
        labels: &[HaplotypeLabel],
        blocksize: usize,
    ) -> Result<FrequencyTable> {
        check_estimator_input(weights, labels)?;

        let mut mass: BTreeMap<&HaplotypeLabel, f64> = BTreeMap::new();
        for (label, w) in labels.iter().zip(weights) {
            split_label(label, blocksize)?;
            *mass.entry(label).or_insert(0.0) += w;
        }

        let total: f64 = weights.iter().sum();
        Ok(mass
            .into_iter()
            .map(|(label, m)| {
                let prob = if total > 0.0 { m / total } else { 0.0 };
                (label.clone(), prob)
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "linkage"
    }

    fn description(&self) -> &'static str {
        "Blocks co-inherited as a unit (weighted joint haplotype frequency)"
    }
}
