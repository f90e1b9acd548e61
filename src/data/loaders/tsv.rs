// tsv.rs - TSV file loader for block panels

use crate::data::panel::BlockPanel;
use crate::error::{LdMixError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reject missing cells; missing genotype encodings are not modelled
pub(crate) fn parse_code(s: &str, line: usize, block: &str) -> Result<String> {
    let cleaned = s.trim();

    if cleaned.is_empty() || cleaned == "NA" {
        return Err(LdMixError::parse(
            line,
            format!("Missing code for block '{}'", block),
        ));
    }

    Ok(cleaned.to_string())
}

impl BlockPanel {
    /// Load a tab-separated panel: `chromosome<TAB>block_1<TAB>...<TAB>block_k`
    pub fn from_tsv(file_path: &Path) -> Result<Self> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);

        let mut header: Option<Vec<String>> = None;
        let mut records = Vec::new();

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = line_idx + 1;

            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();

            let block_names = match &header {
                Some(names) => names,
                None => {
                    if parts.len() < 3 {
                        return Err(LdMixError::parse(
                            line_num,
                            "TSV header must have a chromosome column and at least 2 blocks",
                        ));
                    }
                    header = Some(parts[1..].iter().map(|s| s.trim().to_string()).collect());
                    continue;
                }
            };

            if parts.len() != block_names.len() + 1 {
                return Err(LdMixError::parse(
                    line_num,
                    format!(
                        "Line has {} columns, expected {}",
                        parts.len(),
                        block_names.len() + 1
                    ),
                ));
            }

            let chromosome = parts[0].trim().to_string();
            let codes = parts[1..]
                .iter()
                .zip(block_names.iter())
                .map(|(code, block)| parse_code(code, line_num, block))
                .collect::<Result<Vec<_>>>()?;

            records.push((chromosome, codes));
        }

        let block_names = header.ok_or_else(|| LdMixError::parse(1, "Empty TSV file"))?;
        Self::from_records(block_names, records)
    }
}
