// likelihood.rs - Final likelihoods, model-selection statistics and posteriors

use crate::core::em::{EmOutcome, Termination};
use crate::data::HaplotypeLabel;
use crate::error::{LdMixError, Result};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::collections::BTreeSet;

pub const DEFAULT_MIN_BIC: f64 = 10.0;

/// Result of one mixture fit.
///
/// `r1[i]` is the posterior probability that chromosome `i` belongs to the
/// recombination component; `labels[i]` is its joint haplotype label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Σ log(r1 + r2) of the final state
    pub log_mix: f64,
    /// Linkage-only log-likelihood at initialisation
    pub log_ld: f64,
    /// Recombination-only log-likelihood at initialisation
    pub log_no_ld: f64,
    pub bic: f64,
    /// Final mixing weight of the recombination model
    pub prob: f64,
    pub steps: usize,
    pub pval: f64,
    pub termination: Termination,
    pub r1: Vec<f64>,
    pub labels: Vec<HaplotypeLabel>,
}

impl ResultRecord {
    pub fn n_chromosomes(&self) -> usize {
        self.r1.len()
    }

    /// Likelihood-ratio statistic of the mixture against the recomb-only model
    pub fn lrt_statistic(&self) -> f64 {
        lrt_statistic(self.log_mix, self.log_no_ld)
    }

    /// The mixture explains the data better than independent assortment
    pub fn supports_mixture(&self, min_bic: f64) -> bool {
        self.bic > min_bic
    }
}

/// Builds a [`ResultRecord`] from the last state of an EM run
pub struct LikelihoodReporter;

impl LikelihoodReporter {
    pub fn report(outcome: &EmOutcome) -> Result<ResultRecord> {
        let state = &outcome.state;
        let (r1, r2) = state.responsibilities();

        let log_mix: f64 = r1.iter().zip(r2).map(|(a, b)| (a + b).ln()).sum();
        let posterior = state.posterior();

        let n = posterior.len();
        let df = distinct_labels(state.labels());
        let lambda = lrt_statistic(log_mix, outcome.initial.log_recomb);
        let bic = lambda - df as f64 * (n as f64).ln();
        let pval = chi_squared_pvalue(lambda, df)?;

        Ok(ResultRecord {
            log_mix,
            log_ld: outcome.initial.log_linkage,
            log_no_ld: outcome.initial.log_recomb,
            bic,
            prob: state.prob0(),
            steps: outcome.steps,
            pval,
            termination: outcome.termination,
            r1: posterior,
            labels: state.labels().to_vec(),
        })
    }
}

/// `2 · (log_mix − log_no_ld)`, never negative; undefined differences
/// (such as −∞ − −∞) count as no evidence.
pub fn lrt_statistic(log_mix: f64, log_no_ld: f64) -> f64 {
    let lambda = 2.0 * (log_mix - log_no_ld);
    if lambda.is_nan() {
        0.0
    } else {
        lambda.max(0.0)
    }
}

/// Upper tail `P(χ²_df > lambda)`
pub fn chi_squared_pvalue(lambda: f64, df: usize) -> Result<f64> {
    if lambda.is_infinite() {
        return Ok(0.0);
    }
    let dist = ChiSquared::new(df as f64).map_err(|e| {
        LdMixError::invalid_input(format!("Chi-squared with {} degrees of freedom: {}", df, e))
    })?;
    Ok((1.0 - dist.cdf(lambda)).clamp(0.0, 1.0))
}

fn distinct_labels(labels: &[HaplotypeLabel]) -> usize {
    labels.iter().collect::<BTreeSet<_>>().len()
}
