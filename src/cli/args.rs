// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// ldmixture - LD mixture-model fits over pairs of SNP blocks
pub struct Args {
    /// path to phased block-code panel (.tsv or .csv)
    #[argh(option)]
    pub genotypes: Option<String>,

    /// output summary file
    #[argh(option)]
    pub output: Option<String>,

    /// output format: tsv, csv, json (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// write per-chromosome recombination posteriors of supported pairs to this file (TSV)
    #[argh(option)]
    pub responsibilities: Option<String>,

    /// maximum number of EM updates per fit (default: 1000)
    #[argh(option, default = "1000")]
    pub max_steps: usize,

    /// initial mixing weight of the recombination model (0.0-1.0, default: 0.5)
    #[argh(option, default = "0.5")]
    pub prob0: f64,

    /// SNPs per block code (default: inferred from the panel)
    #[argh(option)]
    pub blocksize: Option<usize>,

    /// convergence threshold on the parameter delta (default: 1e-9)
    #[argh(option, default = "1e-9")]
    pub tolerance: f64,

    /// block pairs to fit: adjacent, all (default: adjacent)
    #[argh(option, default = "String::from(\"adjacent\")")]
    pub pairs: String,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// estimator for the recombination component (default: recomb)
    #[argh(option, default = "String::from(\"recomb\")")]
    pub recomb_estimator: String,

    /// estimator for the linkage component (default: linkage)
    #[argh(option, default = "String::from(\"linkage\")")]
    pub linkage_estimator: String,

    /// include only chromosomes matching regex pattern
    #[argh(option)]
    pub include_chromosomes: Option<String>,

    /// exclude chromosomes matching regex pattern
    #[argh(option)]
    pub exclude_chromosomes: Option<String>,

    /// minimum BIC for a pair to count as supporting the mixture (default: 10)
    #[argh(option, default = "10.0")]
    pub min_bic: f64,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,

    /// list available frequency estimators and exit
    #[argh(switch)]
    pub list_estimators: bool,

    /// validate inputs without fitting (dry run)
    #[argh(switch)]
    pub dry_run: bool,
}

#[cfg(test)]
impl Args {
    /// Default arguments, as parsed from an empty command line
    pub(crate) fn for_tests() -> Self {
        Args {
            genotypes: None,
            output: None,
            format: "tsv".to_string(),
            responsibilities: None,
            max_steps: 1000,
            prob0: 0.5,
            blocksize: None,
            tolerance: 1e-9,
            pairs: "adjacent".to_string(),
            threads: None,
            recomb_estimator: "recomb".to_string(),
            linkage_estimator: "linkage".to_string(),
            include_chromosomes: None,
            exclude_chromosomes: None,
            min_bic: 10.0,
            config: None,
            generate_config: false,
            list_estimators: false,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::from_args(&["ldmixture"], &["--genotypes", "panel.tsv"]).unwrap();
        assert_eq!(args.genotypes.as_deref(), Some("panel.tsv"));
        assert_eq!(args.max_steps, 1000);
        assert_eq!(args.prob0, 0.5);
        assert_eq!(args.tolerance, 1e-9);
        assert_eq!(args.pairs, "adjacent");
        assert_eq!(args.blocksize, None);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_parse_options() {
        let args = Args::from_args(
            &["ldmixture"],
            &[
                "--genotypes",
                "panel.csv",
                "--pairs",
                "all",
                "--blocksize",
                "3",
                "--max-steps",
                "50",
                "--format",
                "json",
                "--dry-run",
            ],
        )
        .unwrap();
        assert_eq!(args.pairs, "all");
        assert_eq!(args.blocksize, Some(3));
        assert_eq!(args.max_steps, 50);
        assert_eq!(args.format, "json");
        assert!(args.dry_run);
    }
}
