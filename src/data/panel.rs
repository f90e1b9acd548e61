// panel.rs - Chromosome × block code panel and block-pair enumeration

use crate::data::genotype::GenotypeMatrix;
use crate::error::{LdMixError, Result};
use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Which block pairs of a panel are fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairMode {
    /// Consecutive blocks `(i, i + 1)`
    Adjacent,
    /// Every pair `i < j`
    All,
}

impl FromStr for PairMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adjacent" => Ok(PairMode::Adjacent),
            "all" => Ok(PairMode::All),
            _ => Err(format!("Invalid pair mode '{}'. Use: adjacent, all", s)),
        }
    }
}

impl PairMode {
    pub fn description(&self) -> &'static str {
        match self {
            PairMode::Adjacent => "adjacent blocks",
            PairMode::All => "all block pairs",
        }
    }
}

/// Phased chromosomes × SNP blocks, each cell a block code.
///
/// Codes are stored block-major: `codes[block][chromosome]`.
#[derive(Debug, Clone)]
pub struct BlockPanel {
    pub chromosome_ids: Vec<String>,
    pub block_names: Vec<String>,
    codes: Vec<Vec<String>>,
}

impl BlockPanel {
    pub fn new(
        chromosome_ids: Vec<String>,
        block_names: Vec<String>,
        codes: Vec<Vec<String>>,
    ) -> Result<Self> {
        if block_names.len() < 2 {
            return Err(LdMixError::invalid_input(format!(
                "A block panel needs at least 2 blocks, found {}",
                block_names.len()
            )));
        }
        if codes.len() != block_names.len() {
            return Err(LdMixError::invalid_input(format!(
                "{} code columns for {} block names",
                codes.len(),
                block_names.len()
            )));
        }
        if chromosome_ids.is_empty() {
            return Err(LdMixError::invalid_input("Block panel has no chromosomes"));
        }
        for (name, column) in block_names.iter().zip(codes.iter()) {
            if column.len() != chromosome_ids.len() {
                return Err(LdMixError::invalid_input(format!(
                    "Block '{}' has {} codes for {} chromosomes",
                    name,
                    column.len(),
                    chromosome_ids.len()
                )));
            }
        }

        Ok(Self {
            chromosome_ids,
            block_names,
            codes,
        })
    }

    /// Build a panel from row-major records as read from a table file
    pub(crate) fn from_records(
        block_names: Vec<String>,
        records: Vec<(String, Vec<String>)>,
    ) -> Result<Self> {
        let mut codes = vec![Vec::with_capacity(records.len()); block_names.len()];
        let mut chromosome_ids = Vec::with_capacity(records.len());

        for (id, row) in records {
            for (column, code) in codes.iter_mut().zip(row) {
                column.push(code);
            }
            chromosome_ids.push(id);
        }

        Self::new(chromosome_ids, block_names, codes)
    }

    /// Load a panel from a `.csv` file or, for any other extension, a TSV file
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading block panel: {}", path.display());

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("tsv");
        let panel = match extension {
            "csv" => Self::from_csv(path)?,
            _ => Self::from_tsv(path)?,
        };

        panel.log_statistics("LOADED PANEL");
        Ok(panel)
    }

    pub fn n_chromosomes(&self) -> usize {
        self.chromosome_ids.len()
    }

    pub fn n_blocks(&self) -> usize {
        self.block_names.len()
    }

    pub fn block_codes(&self, block: usize) -> Option<&[String]> {
        self.codes.get(block).map(|c| c.as_slice())
    }

    /// Extract the two-block matrix for blocks `a` and `b`
    pub fn pair(&self, a: usize, b: usize) -> Result<GenotypeMatrix> {
        let n_blocks = self.n_blocks();
        if a >= n_blocks || b >= n_blocks {
            return Err(LdMixError::invalid_input(format!(
                "Block pair ({}, {}) out of range for {} blocks",
                a, b, n_blocks
            )));
        }
        if a == b {
            return Err(LdMixError::invalid_input(format!(
                "Block pair must use two distinct blocks, got ({}, {})",
                a, b
            )));
        }

        GenotypeMatrix::with_ids(
            self.chromosome_ids.clone(),
            self.codes[a].clone(),
            self.codes[b].clone(),
        )
    }

    /// Block index pairs for the requested mode, in a stable order
    pub fn block_pairs(&self, mode: PairMode) -> Vec<(usize, usize)> {
        let n = self.n_blocks();
        match mode {
            PairMode::Adjacent => (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect(),
            PairMode::All => (0..n)
                .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
                .collect(),
        }
    }

    /// Code width of the first cell, used as the default blocksize
    pub fn inferred_blocksize(&self) -> Option<usize> {
        self.codes
            .first()
            .and_then(|c| c.first())
            .map(|code| code.chars().count())
    }

    /// Keep only chromosomes matching `include` and not matching `exclude`
    pub fn apply_chromosome_filtering(
        &mut self,
        include: Option<&Regex>,
        exclude: Option<&Regex>,
    ) -> Result<()> {
        if include.is_none() && exclude.is_none() {
            return Ok(());
        }

        let keep: Vec<bool> = self
            .chromosome_ids
            .iter()
            .map(|id| {
                if let Some(regex) = include {
                    if !regex.is_match(id) {
                        return false;
                    }
                }
                if let Some(regex) = exclude {
                    if regex.is_match(id) {
                        return false;
                    }
                }
                true
            })
            .collect();

        let kept = keep.iter().filter(|k| **k).count();
        if kept == 0 {
            return Err(LdMixError::invalid_input(
                "Chromosome filters removed every chromosome",
            ));
        }

        let initial = self.chromosome_ids.len();
        self.chromosome_ids = retain_by_mask(&self.chromosome_ids, &keep);
        for column in self.codes.iter_mut() {
            *column = retain_by_mask(column, &keep);
        }

        info!(
            "Chromosome filters: kept {} chromosomes (removed {})",
            kept,
            initial - kept
        );
        Ok(())
    }

    pub fn log_statistics(&self, title: &str) {
        info!(
            "=== {} === {} chromosomes × {} blocks",
            title,
            self.n_chromosomes(),
            self.n_blocks()
        );
    }
}

fn retain_by_mask(values: &[String], keep: &[bool]) -> Vec<String> {
    values
        .iter()
        .zip(keep)
        .filter(|(_, k)| **k)
        .map(|(v, _)| v.clone())
        .collect()
}
