// lib.rs - ldmixture library root

//! # ldmixture - Two-component LD mixture model over pairs of SNP blocks
//!
//! For every chromosome of a phased sample, the codes of two SNP blocks are
//! joined into a haplotype label. An EM loop then fits a mixture of a
//! recombination model (the blocks assort independently) and a linkage
//! model (the blocks are inherited as a unit), reporting the mixing weight,
//! model-selection statistics and the per-chromosome posterior of the
//! recombination component.
//!
//! ## Features
//!
//! - **Pluggable sub-models**: any [`FrequencyEstimator`](estimators::FrequencyEstimator)
//!   can drive either component
//! - **Pure EM steps**: every iteration builds a new immutable state
//! - **Panel scans**: fit adjacent or all block pairs in parallel
//! - **Multiple formats**: TSV, CSV and JSON summaries plus a responsibilities matrix
//!
//! ## Basic Usage
//!
//! ```rust
//! use ldmixture::prelude::*;
//!
//! let matrix = GenotypeMatrix::from_rows(&[
//!     ("00", "00"),
//!     ("11", "11"),
//!     ("00", "00"),
//!     ("00", "00"),
//!     ("11", "11"),
//!     ("00", "01"),
//! ])?;
//!
//! let result = fit_mixture_model(&matrix, &MixtureConfig::default())?;
//! assert_eq!(result.r1.len(), 6);
//! assert!((0.0..=1.0).contains(&result.prob));
//! # Ok::<(), ldmixture::LdMixError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod estimators;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{fit_mixture_model, fit_mixture_model_with, scan_block_pairs};
    pub use crate::core::{EmEngine, MixtureConfig, PairFit, ResultRecord, Termination};
    pub use crate::data::{BlockPanel, GenotypeMatrix, HaplotypeLabel, PairMode};
    pub use crate::error::{LdMixError, Result};
    pub use crate::estimators::{EstimatorRegistry, FrequencyEstimator, FrequencyTable};
    pub use crate::estimators::{LinkageFrequency, RecombFrequency};
    pub use crate::output::{write_responsibilities, write_results, OutputFormat};
}

// Re-export main types at the root level for convenience
pub use crate::core::{fit_mixture_model, EmEngine, MixtureConfig, ResultRecord};
pub use data::{BlockPanel, GenotypeMatrix, HaplotypeLabel};
pub use error::{LdMixError, Result};
pub use estimators::{EstimatorRegistry, FrequencyEstimator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "ldmixture v{} - LD mixture-model fits over SNP block pairs",
        VERSION
    )
}
