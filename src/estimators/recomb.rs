// recomb.rs - Free-recombination frequency estimator

use super::traits::{check_estimator_input, split_label, FrequencyEstimator, FrequencyTable};
use crate::data::HaplotypeLabel;
use crate::error::Result;
use std::collections::BTreeMap;

/// Recombination model: the two blocks assort independently, so a joint
/// label's probability is the product of the weighted marginal frequencies
/// of its two block codes.
#[derive(Debug, Clone)]
pub struct RecombFrequency;

impl FrequencyEstimator for RecombFrequency {
    fn estimate(
        &self,
        weights: &[f64],
        labels: &[HaplotypeLabel],
        blocksize: usize,
    ) -> Result<FrequencyTable> {
        check_estimator_input(weights, labels)?;

        let mut marginal1: BTreeMap<&str, f64> = BTreeMap::new();
        let mut marginal2: BTreeMap<&str, f64> = BTreeMap::new();
        for (label, w) in labels.iter().zip(weights) {
            let (block1, block2) = split_label(label, blocksize)?;
            *marginal1.entry(block1).or_insert(0.0) += w;
            *marginal2.entry(block2).or_insert(0.0) += w;
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Ok(labels.iter().map(|l| (l.clone(), 0.0)).collect());
        }

        Ok(labels
            .iter()
            .map(|label| {
                let (block1, block2) = label.blocks();
                let p1 = marginal1.get(block1).copied().unwrap_or(0.0) / total;
                let p2 = marginal2.get(block2).copied().unwrap_or(0.0) / total;
                (label.clone(), p1 * p2)
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "recomb"
    }

    fn description(&self) -> &'static str {
        "Blocks recombine freely (product of weighted block frequencies)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::labels::parse_labels;
    use approx::assert_relative_eq;

    #[test]
    fn test_product_of_marginals() {
        let labels = parse_labels(&["00+00", "11+11", "00+00", "00+00", "11+11", "00+01"]).unwrap();
        let table = RecombFrequency.estimate(&[1.0; 6], &labels, 2).unwrap();

        // block1: 00 -> 4/6, 11 -> 2/6; block2: 00 -> 3/6, 11 -> 2/6, 01 -> 1/6
        assert_eq!(table.len(), 3);
        assert_relative_eq!(table.get("00+00").unwrap(), (4.0 / 6.0) * (3.0 / 6.0));
        assert_relative_eq!(table.get("11+11").unwrap(), (2.0 / 6.0) * (2.0 / 6.0));
        assert_relative_eq!(table.get("00+01").unwrap(), (4.0 / 6.0) * (1.0 / 6.0));
    }

    #[test]
    fn test_independent_blocks_match_linkage() {
        // Every combination present once: the joint frequency factorises.
        let labels = parse_labels(&["0+0", "0+1", "1+0", "1+1"]).unwrap();
        let table = RecombFrequency.estimate(&[1.0; 4], &labels, 1).unwrap();
        for (_, p) in table.iter() {
            assert_relative_eq!(p, 0.25);
        }
    }

    #[test]
    fn test_weighted_marginals() {
        let labels = parse_labels(&["00+00", "11+11"]).unwrap();
        let table = RecombFrequency.estimate(&[3.0, 1.0], &labels, 2).unwrap();
        assert_relative_eq!(table.get("00+00").unwrap(), 0.75 * 0.75);
        assert_relative_eq!(table.get("11+11").unwrap(), 0.25 * 0.25);
    }

    #[test]
    fn test_zero_weights_and_errors() {
        let labels = parse_labels(&["00+00", "11+11"]).unwrap();
        let table = RecombFrequency.estimate(&[0.0, 0.0], &labels, 2).unwrap();
        assert_eq!(table.get("11+11"), Some(0.0));

        assert!(RecombFrequency.estimate(&[1.0, 1.0], &labels, 1).is_err());
        assert!(RecombFrequency.estimate(&[1.0], &labels, 2).is_err());
    }
}
