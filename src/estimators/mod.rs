// mod.rs - Frequency estimators module root

pub mod linkage;
pub mod recomb;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use linkage::LinkageFrequency;
pub use recomb::RecombFrequency;
pub use registry::EstimatorRegistry;
pub use traits::{FrequencyEstimator, FrequencyTable};
