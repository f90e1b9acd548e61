// mod.rs - Data structures module

pub mod genotype;
pub mod labels;
pub mod loaders;
pub mod panel;

// Re-export main types for convenience
pub use genotype::GenotypeMatrix;
pub use labels::{encode_labels, HaplotypeLabel, HaplotypeLabelEncoder, LABEL_SEPARATOR};
pub use panel::{BlockPanel, PairMode};
