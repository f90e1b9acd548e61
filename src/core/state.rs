// state.rs - Mixture parameters and the EM update step

use crate::core::mapper::ResponsibilityMapper;
use crate::data::HaplotypeLabel;
use crate::error::{LdMixError, Result};
use crate::estimators::{FrequencyEstimator, FrequencyTable};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_MAX_STEPS: usize = 1000;
pub const DEFAULT_PROB0: f64 = 0.5;
pub const DEFAULT_BLOCKSIZE: usize = 2;
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Parameters of a single mixture fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixtureConfig {
    /// Maximum number of EM updates
    pub max_steps: usize,
    /// Initial mixing weight of the recombination model
    pub prob0: f64,
    /// Number of SNPs per block code, passed through to the estimators
    pub blocksize: usize,
    /// Convergence threshold on the parameter delta
    pub tolerance: f64,
}

impl Default for MixtureConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            prob0: DEFAULT_PROB0,
            blocksize: DEFAULT_BLOCKSIZE,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl MixtureConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.prob0) {
            return Err(LdMixError::config(format!(
                "prob0 must be between 0.0 and 1.0, got {}",
                self.prob0
            )));
        }
        if self.blocksize == 0 {
            return Err(LdMixError::config("blocksize must be at least 1"));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(LdMixError::config(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Snapshot of the model between two EM iterations.
///
/// `r1`/`r2` are the prior-scaled component probabilities of every
/// chromosome: `r1 = prob0 · P_recomb(label)`, `r2 = (1 − prob0) · P_link(label)`.
/// Both tables always cover every label; a state is never mutated, each
/// update builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureState {
    prob0: f64,
    props_recomb: FrequencyTable,
    props_link: FrequencyTable,
    labels: Arc<[HaplotypeLabel]>,
    blocksize: usize,
    r1: Vec<f64>,
    r2: Vec<f64>,
}

impl MixtureState {
    /// Build a state from fitted tables, projecting them onto `labels`
    pub fn from_tables(
        labels: Arc<[HaplotypeLabel]>,
        blocksize: usize,
        prob0: f64,
        props_recomb: FrequencyTable,
        props_link: FrequencyTable,
    ) -> Result<Self> {
        let r1 = ResponsibilityMapper::new("recomb").project_scaled(&props_recomb, &labels, prob0)?;
        let r2 = ResponsibilityMapper::new("linkage").project_scaled(
            &props_link,
            &labels,
            1.0 - prob0,
        )?;

        Ok(Self {
            prob0,
            props_recomb,
            props_link,
            labels,
            blocksize,
            r1,
            r2,
        })
    }

    pub fn prob0(&self) -> f64 {
        self.prob0
    }

    pub fn props_recomb(&self) -> &FrequencyTable {
        &self.props_recomb
    }

    pub fn props_link(&self) -> &FrequencyTable {
        &self.props_link
    }

    pub fn labels(&self) -> &[HaplotypeLabel] {
        &self.labels
    }

    pub fn blocksize(&self) -> usize {
        self.blocksize
    }

    /// Prior-scaled component probabilities `(r1, r2)`
    pub fn responsibilities(&self) -> (&[f64], &[f64]) {
        (&self.r1, &self.r2)
    }

    /// One population explains every chromosome
    pub fn is_degenerate(&self) -> bool {
        self.prob0 == 0.0 || self.prob0 == 1.0
    }

    /// Posterior probability of the recombination component per chromosome
    pub fn posterior(&self) -> Vec<f64> {
        posterior(&self.r1, &self.r2, self.prob0)
    }

    /// One EM update: refit both sub-models on the current posteriors and
    /// re-estimate the mixing weight. Returns the new state and the
    /// parameter delta between the two states.
    pub fn update(
        &self,
        recomb: &dyn FrequencyEstimator,
        linkage: &dyn FrequencyEstimator,
    ) -> Result<(MixtureState, f64)> {
        let weights_recomb = self.posterior();
        let weights_link: Vec<f64> = weights_recomb.iter().map(|w| 1.0 - w).collect();

        let new_recomb = recomb.estimate(&weights_recomb, &self.labels, self.blocksize)?;
        let new_link = linkage.estimate(&weights_link, &self.labels, self.blocksize)?;

        let new_prob0 = weights_recomb.iter().sum::<f64>() / weights_recomb.len() as f64;

        let delta = (self.props_recomb.squared_distance(&new_recomb)
            + self.props_link.squared_distance(&new_link)
            + (self.prob0 - new_prob0).abs())
        .sqrt();

        let next = MixtureState::from_tables(
            Arc::clone(&self.labels),
            self.blocksize,
            new_prob0,
            new_recomb,
            new_link,
        )?;

        Ok((next, delta))
    }
}

/// `r1 / (r1 + r2)` per chromosome; a chromosome with zero probability under
/// both components keeps the prior `prob0`.
pub fn posterior(r1: &[f64], r2: &[f64], prob0: f64) -> Vec<f64> {
    r1.iter()
        .zip(r2)
        .map(|(a, b)| {
            let total = a + b;
            if total > 0.0 {
                (a / total).clamp(0.0, 1.0)
            } else {
                prob0
            }
        })
        .collect()
}
