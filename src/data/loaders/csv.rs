// csv.rs - CSV file loader for block panels

use crate::data::loaders::tsv::parse_code;
use crate::data::panel::BlockPanel;
use crate::error::{LdMixError, Result};
use std::path::Path;

impl BlockPanel {
    /// Load a comma-separated panel with the same layout as the TSV loader
    pub fn from_csv(file_path: &Path) -> Result<Self> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(::csv::Trim::All)
            .from_path(file_path)?;

        let headers = reader.headers()?.clone();
        if headers.len() < 3 {
            return Err(LdMixError::parse(
                1,
                "CSV header must have a chromosome column and at least 2 blocks",
            ));
        }
        let block_names: Vec<String> = headers.iter().skip(1).map(|s| s.to_string()).collect();

        let mut records = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record?;
            let line_num = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_idx + 2);

            if record.len() != headers.len() {
                return Err(LdMixError::parse(
                    line_num,
                    format!(
                        "Line has {} columns, expected {}",
                        record.len(),
                        headers.len()
                    ),
                ));
            }

            let chromosome = record[0].to_string();
            let codes = record
                .iter()
                .skip(1)
                .zip(block_names.iter())
                .map(|(code, block)| parse_code(code, line_num, block))
                .collect::<Result<Vec<_>>>()?;

            records.push((chromosome, codes));
        }

        Self::from_records(block_names, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"chromosome,b1,b2,b3\nHG00100_1,00,00,10\nHG00100_2,11,11,01\n")
            .unwrap();

        let panel = BlockPanel::from_file(file.path()).unwrap();
        assert_eq!(panel.n_blocks(), 3);
        assert_eq!(panel.chromosome_ids, vec!["HG00100_1", "HG00100_2"]);
        assert_eq!(panel.block_codes(2).unwrap()[1], "01");
    }

    #[test]
    fn test_csv_missing_code() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"chromosome,b1,b2\nHG00100_1,00,\n").unwrap();
        assert!(BlockPanel::from_csv(file.path()).is_err());
    }
}
