// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::MixtureConfig;
use crate::data::PairMode;
use crate::error::{LdMixError, Result};
use crate::estimators::EstimatorRegistry;
use crate::output::OutputFormat;
use regex::Regex;
use std::str::FromStr;

pub struct ValidationResult {
    /// Fit settings; `blocksize` falls back to the default until a panel is
    /// loaded and its code width is known
    pub mixture_config: MixtureConfig,
    pub pair_mode: PairMode,
    pub output_format: OutputFormat,
    pub include_regex: Option<Regex>,
    pub exclude_regex: Option<Regex>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    // Validate estimator names
    let registry = EstimatorRegistry::new();
    for name in [&args.recomb_estimator, &args.linkage_estimator] {
        if !registry.has_estimator(name) {
            return Err(LdMixError::config(format!(
                "Invalid estimator '{}'. Available: {}",
                name,
                registry.get_estimator_names().join(", ")
            )));
        }
    }

    let pair_mode = PairMode::from_str(&args.pairs).map_err(LdMixError::config)?;
    let output_format = OutputFormat::from_str(&args.format).map_err(LdMixError::config)?;

    if args.threads == Some(0) {
        return Err(LdMixError::config("Thread count must be at least 1"));
    }
    if args.min_bic.is_nan() {
        return Err(LdMixError::config("min_bic must be a number"));
    }

    let mut mixture_config = MixtureConfig {
        max_steps: args.max_steps,
        prob0: args.prob0,
        tolerance: args.tolerance,
        ..MixtureConfig::default()
    };
    if let Some(blocksize) = args.blocksize {
        mixture_config.blocksize = blocksize;
    }
    mixture_config.validate()?;

    // Compile regex patterns
    let include_regex = if let Some(pattern) = &args.include_chromosomes {
        Some(Regex::new(pattern).map_err(|e| {
            LdMixError::config(format!("Invalid include_chromosomes regex: {}", e))
        })?)
    } else {
        None
    };

    let exclude_regex = if let Some(pattern) = &args.exclude_chromosomes {
        Some(Regex::new(pattern).map_err(|e| {
            LdMixError::config(format!("Invalid exclude_chromosomes regex: {}", e))
        })?)
    } else {
        None
    };

    Ok(ValidationResult {
        mixture_config,
        pair_mode,
        output_format,
        include_regex,
        exclude_regex,
    })
}
