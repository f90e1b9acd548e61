// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::core::state::{DEFAULT_MAX_STEPS, DEFAULT_PROB0, DEFAULT_TOLERANCE};
use crate::core::DEFAULT_MIN_BIC;
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.genotypes.is_none() {
            self.genotypes = config.genotypes;
        }
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.responsibilities.is_none() {
            self.responsibilities = config.responsibilities;
        }
        if self.format == "tsv" {
            if let Some(format) = config.format {
                self.format = format;
            }
        }

        // Mixture fit (only override defaults, not explicit CLI values)
        if self.max_steps == DEFAULT_MAX_STEPS {
            if let Some(max_steps) = config.max_steps {
                self.max_steps = max_steps;
            }
        }
        if self.prob0 == DEFAULT_PROB0 {
            if let Some(prob0) = config.prob0 {
                self.prob0 = prob0;
            }
        }
        if self.blocksize.is_none() {
            self.blocksize = config.blocksize;
        }
        if self.tolerance == DEFAULT_TOLERANCE {
            if let Some(tolerance) = config.tolerance {
                self.tolerance = tolerance;
            }
        }
        if self.recomb_estimator == "recomb" {
            if let Some(name) = config.recomb_estimator {
                self.recomb_estimator = name;
            }
        }
        if self.linkage_estimator == "linkage" {
            if let Some(name) = config.linkage_estimator {
                self.linkage_estimator = name;
            }
        }

        // Scan
        if self.pairs == "adjacent" {
            if let Some(pairs) = config.pairs {
                self.pairs = pairs;
            }
        }
        if self.threads.is_none() {
            self.threads = config.threads;
        }
        if self.min_bic == DEFAULT_MIN_BIC {
            if let Some(min_bic) = config.min_bic {
                self.min_bic = min_bic;
            }
        }

        // Chromosome filtering
        if self.include_chromosomes.is_none() {
            self.include_chromosomes = config.include_chromosomes;
        }
        if self.exclude_chromosomes.is_none() {
            self.exclude_chromosomes = config.exclude_chromosomes;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_fills_defaults() {
        let config = Config {
            genotypes: Some("blocks.tsv".to_string()),
            max_steps: Some(200),
            pairs: Some("all".to_string()),
            dry_run: Some(true),
            ..Config::default()
        };

        let merged = Args::for_tests().merge_with_config(config);
        assert_eq!(merged.genotypes.as_deref(), Some("blocks.tsv"));
        assert_eq!(merged.max_steps, 200);
        assert_eq!(merged.pairs, "all");
        assert!(merged.dry_run);
    }

    #[test]
    fn test_cli_values_take_precedence() {
        let mut args = Args::for_tests();
        args.genotypes = Some("cli.tsv".to_string());
        args.max_steps = 50;
        args.format = "json".to_string();

        let config = Config {
            genotypes: Some("file.tsv".to_string()),
            max_steps: Some(200),
            format: Some("csv".to_string()),
            prob0: Some(0.2),
            ..Config::default()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.genotypes.as_deref(), Some("cli.tsv"));
        assert_eq!(merged.max_steps, 50);
        assert_eq!(merged.format, "json");
        // prob0 was left at its default on the command line
        assert_eq!(merged.prob0, 0.2);
    }
}
