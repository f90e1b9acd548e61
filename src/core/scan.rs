// scan.rs - Independent mixture fits over many block pairs

use crate::core::em::EmEngine;
use crate::core::likelihood::ResultRecord;
use crate::core::state::MixtureConfig;
use crate::data::BlockPanel;
use crate::error::Result;
use crate::estimators::FrequencyEstimator;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Mixture fit of one pair of blocks
#[derive(Debug, Clone, Serialize)]
pub struct PairFit {
    pub block_a: String,
    pub block_b: String,
    #[serde(flatten)]
    pub result: ResultRecord,
}

/// Fit every `(a, b)` block pair of `panel`.
///
/// Each pair is one single-threaded EM run; pairs are spread over the rayon
/// pool. Results come back in the order of `pairs`. Any failing pair aborts
/// the scan with its error.
pub fn scan_block_pairs(
    panel: &BlockPanel,
    pairs: &[(usize, usize)],
    config: &MixtureConfig,
    recomb: &dyn FrequencyEstimator,
    linkage: &dyn FrequencyEstimator,
) -> Result<Vec<PairFit>> {
    let engine = EmEngine::new(recomb, linkage, *config)?;
    let start = Instant::now();
    let total = pairs.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let update_interval = std::cmp::max(1, total / 100);
    let progress_counter = AtomicUsize::new(0);

    let fits: Result<Vec<PairFit>> = pairs
        .par_iter()
        .map(|&(a, b)| {
            let matrix = panel.pair(a, b)?;
            let result = engine.fit(&matrix)?;

            let count = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
            if count % update_interval == 0 || count == total {
                pb.set_position(count as u64);
            }

            Ok(PairFit {
                block_a: panel.block_names[a].clone(),
                block_b: panel.block_names[b].clone(),
                result,
            })
        })
        .collect();

    match &fits {
        Ok(done) => {
            pb.finish_with_message("✅ Block pair scan completed!");
            info!(
                "Fitted {} block pairs in {:.2}s",
                done.len(),
                start.elapsed().as_secs_f64()
            );
        }
        Err(_) => pb.abandon(),
    }

    fits
}
