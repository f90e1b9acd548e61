// config.rs - Configuration file support

use crate::error::{LdMixError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub genotypes: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,
    pub responsibilities: Option<String>,

    // Mixture fit
    pub max_steps: Option<usize>,
    pub prob0: Option<f64>,
    pub blocksize: Option<usize>,
    pub tolerance: Option<f64>,
    pub recomb_estimator: Option<String>,
    pub linkage_estimator: Option<String>,

    // Scan
    pub pairs: Option<String>,
    pub threads: Option<usize>,
    pub min_bic: Option<f64>,

    // Chromosome filtering
    pub include_chromosomes: Option<String>,
    pub exclude_chromosomes: Option<String>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LdMixError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            LdMixError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| LdMixError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# ldmixture.toml - Configuration file for ldmixture
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Phased block-code panel (.tsv or .csv): chromosome, block_1, ..., block_k
genotypes = "/path/to/blocks.tsv"

# Output summary file
output = "ld_mixture.tsv"

# Output format: tsv, csv, json
format = "tsv"

# Per-chromosome recombination posteriors of pairs passing min_bic
# responsibilities = "responsibilities.tsv"

# =============================================================================
# MIXTURE FIT
# =============================================================================

# Maximum number of EM updates per block pair
max_steps = 1000

# Initial mixing weight of the recombination model (0.0-1.0)
prob0 = 0.5

# SNPs per block code (omit to infer from the panel)
# blocksize = 2

# Convergence threshold on the parameter delta
tolerance = 1e-9

# Frequency estimators for the two components
recomb_estimator = "recomb"
linkage_estimator = "linkage"

# =============================================================================
# SCAN
# =============================================================================

# Block pairs to fit: adjacent, all
pairs = "adjacent"

# Number of threads (omit for auto-detection)
# threads = 8

# Minimum BIC for a pair to count as supporting the mixture
min_bic = 10.0

# =============================================================================
# CHROMOSOME FILTERING
# =============================================================================

# Include only chromosomes matching regex pattern
# include_chromosomes = "^EUR_.*"

# Exclude chromosomes matching regex pattern
# exclude_chromosomes = "_outgroup$"

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without fitting (dry run)
dry_run = false
"#
        .to_string()
    }
}
