// mod.rs - Block panel file loaders

pub mod csv;
pub mod tsv;
