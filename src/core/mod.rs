// mod.rs - Core mixture-model logic

pub mod em;
pub mod likelihood;
pub mod mapper;
pub mod scan;
pub mod state;

// Re-export main types for convenience
pub use em::{
    fit_mixture_model, fit_mixture_model_with, EmEngine, EmOutcome, InitialLikelihoods,
    Termination,
};
pub use likelihood::{LikelihoodReporter, ResultRecord, DEFAULT_MIN_BIC};
pub use mapper::ResponsibilityMapper;
pub use scan::{scan_block_pairs, PairFit};
pub use state::{MixtureConfig, MixtureState};
