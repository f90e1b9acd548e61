// em.rs - EM engine for the two-component LD mixture

use crate::core::likelihood::{LikelihoodReporter, ResultRecord};
use crate::core::mapper::ResponsibilityMapper;
use crate::core::state::{MixtureConfig, MixtureState};
use crate::data::{encode_labels, GenotypeMatrix, HaplotypeLabel};
use crate::error::Result;
use crate::estimators::{FrequencyEstimator, LinkageFrequency, RecombFrequency};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Why the EM loop stopped. None of these is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Parameter delta fell to the tolerance
    Converged,
    /// `max_steps` updates were executed
    MaxStepsReached,
    /// The mixing weight reached exactly 0 or 1
    Degenerate,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::Converged => "converged",
            Termination::MaxStepsReached => "max_steps_reached",
            Termination::Degenerate => "degenerate",
        };
        f.write_str(s)
    }
}

/// Log-likelihoods of the two pure models, computed once at initialisation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialLikelihoods {
    /// Σ log P_recomb(label) with uniform weights
    pub log_recomb: f64,
    /// Σ log P_link(label) with uniform weights
    pub log_linkage: f64,
}

/// Final state of a run plus its bookkeeping
#[derive(Debug, Clone)]
pub struct EmOutcome {
    pub state: MixtureState,
    pub initial: InitialLikelihoods,
    /// Number of EM updates executed
    pub steps: usize,
    pub termination: Termination,
    /// Delta of the last executed update
    pub last_delta: Option<f64>,
}

/// Drives the iterate-until-converged loop over two pluggable sub-models
#[derive(Debug, Clone, Copy)]
pub struct EmEngine<'a> {
    recomb: &'a dyn FrequencyEstimator,
    linkage: &'a dyn FrequencyEstimator,
    config: MixtureConfig,
}

impl EmEngine<'static> {
    /// Engine with the built-in [`RecombFrequency`] and [`LinkageFrequency`]
    pub fn with_default_estimators(config: MixtureConfig) -> Result<Self> {
        EmEngine::new(&RecombFrequency, &LinkageFrequency, config)
    }
}

impl<'a> EmEngine<'a> {
    pub fn new(
        recomb: &'a dyn FrequencyEstimator,
        linkage: &'a dyn FrequencyEstimator,
        config: MixtureConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            recomb,
            linkage,
            config,
        })
    }

    pub fn config(&self) -> &MixtureConfig {
        &self.config
    }

    /// Fit both sub-models with unit weights and build the starting state
    pub fn initialize(
        &self,
        labels: Vec<HaplotypeLabel>,
    ) -> Result<(MixtureState, InitialLikelihoods)> {
        let labels: Arc<[HaplotypeLabel]> = labels.into();
        let blocksize = self.config.blocksize;
        let weights = vec![1.0; labels.len()];

        let props_recomb = self.recomb.estimate(&weights, &labels, blocksize)?;
        let props_link = self.linkage.estimate(&weights, &labels, blocksize)?;

        let p_recomb = ResponsibilityMapper::new(self.recomb.name()).project(&props_recomb, &labels)?;
        let p_link = ResponsibilityMapper::new(self.linkage.name()).project(&props_link, &labels)?;

        let initial = InitialLikelihoods {
            log_recomb: p_recomb.iter().map(|p| p.ln()).sum(),
            log_linkage: p_link.iter().map(|p| p.ln()).sum(),
        };

        let state = MixtureState::from_tables(
            labels,
            blocksize,
            self.config.prob0,
            props_recomb,
            props_link,
        )?;

        Ok((state, initial))
    }

    /// Run EM from the initial state until a terminal condition is met
    pub fn run(&self, labels: Vec<HaplotypeLabel>) -> Result<EmOutcome> {
        let (mut state, initial) = self.initialize(labels)?;
        let mut steps = 0;
        let mut last_delta = None;

        let termination = if state.is_degenerate() {
            Termination::Degenerate
        } else {
            loop {
                if steps >= self.config.max_steps {
                    break Termination::MaxStepsReached;
                }

                let (next, delta) = state.update(self.recomb, self.linkage)?;
                state = next;
                steps += 1;
                last_delta = Some(delta);

                debug!(
                    "EM step {}: delta={:.3e} prob0={:.6}",
                    steps,
                    delta,
                    state.prob0()
                );

                if state.is_degenerate() {
                    break Termination::Degenerate;
                }
                if delta <= self.config.tolerance {
                    break Termination::Converged;
                }
            }
        };

        match termination {
            Termination::MaxStepsReached if self.config.max_steps > 0 => warn!(
                "EM stopped after {} steps without converging (last delta {:.3e})",
                steps,
                last_delta.unwrap_or(f64::NAN)
            ),
            _ => debug!(
                "EM finished: {} after {} steps, prob0={:.6}",
                termination,
                steps,
                state.prob0()
            ),
        }

        Ok(EmOutcome {
            state,
            initial,
            steps,
            termination,
            last_delta,
        })
    }

    /// Encode the matrix, run EM and report the final likelihoods
    pub fn fit(&self, matrix: &GenotypeMatrix) -> Result<ResultRecord> {
        let labels = encode_labels(matrix)?;
        let outcome = self.run(labels)?;
        LikelihoodReporter::report(&outcome)
    }
}

/// Fit the mixture with the built-in estimators
pub fn fit_mixture_model(matrix: &GenotypeMatrix, config: &MixtureConfig) -> Result<ResultRecord> {
    EmEngine::with_default_estimators(*config)?.fit(matrix)
}

/// Fit the mixture with caller-supplied estimators
pub fn fit_mixture_model_with(
    matrix: &GenotypeMatrix,
    config: &MixtureConfig,
    recomb: &dyn FrequencyEstimator,
    linkage: &dyn FrequencyEstimator,
) -> Result<ResultRecord> {
    EmEngine::new(recomb, linkage, *config)?.fit(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::labels::parse_labels;
    use crate::error::LdMixError;
    use crate::estimators::FrequencyTable;
    use std::collections::BTreeMap;

    /// Both components use the weighted empirical label frequency
    #[derive(Debug)]
    struct EmpiricalStub;

    impl FrequencyEstimator for EmpiricalStub {
        fn estimate(
            &self,
            weights: &[f64],
            labels: &[HaplotypeLabel],
            _blocksize: usize,
        ) -> Result<FrequencyTable> {
            let mut mass: BTreeMap<&HaplotypeLabel, f64> = BTreeMap::new();
            for (l, w) in labels.iter().zip(weights) {
                *mass.entry(l).or_insert(0.0) += w;
            }
            let total: f64 = weights.iter().sum();
            Ok(mass
                .into_iter()
                .map(|(l, m)| (l.clone(), if total > 0.0 { m / total } else { 0.0 }))
                .collect())
        }

        fn name(&self) -> &'static str {
            "empirical"
        }

        fn description(&self) -> &'static str {
            "Empirical label frequency"
        }
    }

    /// Ignores the weights entirely
    #[derive(Debug)]
    struct FixedStub(f64);

    impl FrequencyEstimator for FixedStub {
        fn estimate(
            &self,
            _weights: &[f64],
            labels: &[HaplotypeLabel],
            _blocksize: usize,
        ) -> Result<FrequencyTable> {
            Ok(labels.iter().map(|l| (l.clone(), self.0)).collect())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }

        fn description(&self) -> &'static str {
            "Fixed probability"
        }
    }

    /// Drops the last label from its table
    #[derive(Debug)]
    struct LeakyStub;

    impl FrequencyEstimator for LeakyStub {
        fn estimate(
            &self,
            _weights: &[f64],
            labels: &[HaplotypeLabel],
            _blocksize: usize,
        ) -> Result<FrequencyTable> {
            Ok(labels
                .iter()
                .take(labels.len() - 1)
                .map(|l| (l.clone(), 0.5))
                .collect())
        }

        fn name(&self) -> &'static str {
            "leaky"
        }

        fn description(&self) -> &'static str {
            "Misses a label"
        }
    }

    fn scenario_matrix() -> GenotypeMatrix {
        GenotypeMatrix::from_rows(&[
            ("00", "00"),
            ("11", "11"),
            ("00", "00"),
            ("00", "00"),
            ("11", "11"),
            ("00", "01"),
        ])
        .unwrap()
    }

    fn scenario_labels() -> Vec<HaplotypeLabel> {
        parse_labels(&["00+00", "11+11", "00+00", "00+00", "11+11", "00+01"]).unwrap()
    }

    #[test]
    fn test_scenario_converges_with_stub_estimators() {
        let engine = EmEngine::new(&EmpiricalStub, &EmpiricalStub, MixtureConfig::default()).unwrap();
        let outcome = engine.run(scenario_labels()).unwrap();

        assert_eq!(outcome.termination, Termination::Converged);
        assert!(outcome.steps >= 1 && outcome.steps <= 1000);
        assert!(outcome.last_delta.unwrap() <= 1e-9);

        let record = LikelihoodReporter::report(&outcome).unwrap();
        assert!((0.0..=1.0).contains(&record.prob));
        assert_eq!(record.r1.len(), 6);
    }

    #[test]
    fn test_scenario_with_default_estimators() {
        let record = fit_mixture_model(&scenario_matrix(), &MixtureConfig::default()).unwrap();

        assert!(record.steps <= 1000);
        assert!((0.0..=1.0).contains(&record.prob));
        assert_eq!(record.r1.len(), 6);
        assert!(record.r1.iter().all(|r| (0.0..=1.0).contains(r)));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let config = MixtureConfig::default();
        let a = fit_mixture_model(&scenario_matrix(), &config).unwrap();
        let b = fit_mixture_model(&scenario_matrix(), &config).unwrap();

        assert_eq!(a.prob.to_bits(), b.prob.to_bits());
        assert_eq!(a.log_mix.to_bits(), b.log_mix.to_bits());
        assert_eq!(a.steps, b.steps);
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.r1), bits(&b.r1));
    }

    #[test]
    fn test_zero_max_steps_reports_initial_state() {
        let config = MixtureConfig {
            max_steps: 0,
            ..MixtureConfig::default()
        };
        let engine = EmEngine::with_default_estimators(config).unwrap();
        let outcome = engine.run(scenario_labels()).unwrap();

        assert_eq!(outcome.steps, 0);
        assert_eq!(outcome.termination, Termination::MaxStepsReached);
        assert_eq!(outcome.last_delta, None);
        assert_eq!(outcome.state.prob0(), 0.5);

        let (initial, _) = engine.initialize(scenario_labels()).unwrap();
        assert_eq!(&outcome.state, &initial);
    }

    #[test]
    fn test_steps_never_exceed_max_steps() {
        for max_steps in [1, 2, 5, 17] {
            let config = MixtureConfig {
                max_steps,
                tolerance: f64::MIN_POSITIVE,
                ..MixtureConfig::default()
            };
            let engine = EmEngine::with_default_estimators(config).unwrap();
            let outcome = engine.run(scenario_labels()).unwrap();
            assert!(outcome.steps <= max_steps);
        }
    }

    #[test]
    fn test_identical_labels_do_not_divide_by_zero() {
        let labels = parse_labels(&["00+00"; 5]).unwrap();
        let engine = EmEngine::with_default_estimators(MixtureConfig::default()).unwrap();
        let outcome = engine.run(labels).unwrap();

        // both models give probability 1: the weight stays put and the loop stops
        assert!(outcome.steps <= 1);
        assert!(outcome.state.prob0().is_finite());
        assert!(matches!(
            outcome.termination,
            Termination::Converged | Termination::Degenerate
        ));

        let record = LikelihoodReporter::report(&outcome).unwrap();
        assert!(record.r1.iter().all(|r| r.is_finite()));
        assert_eq!(record.log_no_ld, 0.0);
    }

    #[test]
    fn test_degenerate_mixing_weight_stops_loop() {
        // recomb explains everything, linkage nothing: prob0 jumps to 1
        let engine = EmEngine::new(&FixedStub(0.5), &FixedStub(0.0), MixtureConfig::default()).unwrap();
        let outcome = engine.run(scenario_labels()).unwrap();

        assert_eq!(outcome.termination, Termination::Degenerate);
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.state.prob0(), 1.0);

        let record = LikelihoodReporter::report(&outcome).unwrap();
        assert!(record.r1.iter().all(|r| *r == 1.0));
        assert_eq!(record.log_ld, f64::NEG_INFINITY);
    }

    #[test]
    fn test_degenerate_initial_weight() {
        let config = MixtureConfig {
            prob0: 1.0,
            ..MixtureConfig::default()
        };
        let outcome = EmEngine::with_default_estimators(config)
            .unwrap()
            .run(scenario_labels())
            .unwrap();
        assert_eq!(outcome.termination, Termination::Degenerate);
        assert_eq!(outcome.steps, 0);
    }

    #[test]
    fn test_blocksize_does_not_change_control_flow() {
        let run = |blocksize| {
            let config = MixtureConfig {
                blocksize,
                ..MixtureConfig::default()
            };
            EmEngine::new(&EmpiricalStub, &EmpiricalStub, config)
                .unwrap()
                .run(scenario_labels())
                .unwrap()
        };

        let reference = run(2);
        for blocksize in [1, 3, 10] {
            let other = run(blocksize);
            assert_eq!(other.steps, reference.steps);
            assert_eq!(other.termination, reference.termination);
            assert_eq!(other.state.prob0().to_bits(), reference.state.prob0().to_bits());
        }
    }

    #[test]
    fn test_missing_label_is_an_error() {
        let engine = EmEngine::new(&LeakyStub, &EmpiricalStub, MixtureConfig::default()).unwrap();
        let err = engine.run(scenario_labels()).unwrap_err();
        assert!(matches!(err, LdMixError::MissingLabel { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MixtureConfig {
            prob0: -0.1,
            ..MixtureConfig::default()
        };
        assert!(EmEngine::with_default_estimators(config).is_err());
    }

    #[test]
    fn test_mismatched_blocksize_surfaces_estimator_error() {
        let config = MixtureConfig {
            blocksize: 3,
            ..MixtureConfig::default()
        };
        let err = fit_mixture_model(&scenario_matrix(), &config).unwrap_err();
        assert!(matches!(err, LdMixError::InvalidInput { .. }));
    }
}
