// genotype.rs - Two-block genotype matrix for a single block pair

use crate::data::labels::LABEL_SEPARATOR;
use crate::error::{LdMixError, Result};

/// Chromosomes × 2 block columns of categorical codes (e.g. "00", "01").
///
/// Row order is preserved everywhere downstream: responsibilities are
/// reported in the same order as the rows of this matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct GenotypeMatrix {
    chromosome_ids: Vec<String>,
    block1: Vec<String>,
    block2: Vec<String>,
}

impl GenotypeMatrix {
    /// Build a matrix from the two block columns; chromosomes are named by
    /// their 1-based row index.
    pub fn new(block1: Vec<String>, block2: Vec<String>) -> Result<Self> {
        let ids = (1..=block1.len()).map(|i| i.to_string()).collect();
        Self::with_ids(ids, block1, block2)
    }

    /// Build a matrix with explicit chromosome identifiers
    pub fn with_ids(
        chromosome_ids: Vec<String>,
        block1: Vec<String>,
        block2: Vec<String>,
    ) -> Result<Self> {
        let matrix = Self {
            chromosome_ids,
            block1,
            block2,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Convenience constructor from `(block1, block2)` rows
    pub fn from_rows<S: AsRef<str>>(rows: &[(S, S)]) -> Result<Self> {
        let (block1, block2) = rows
            .iter()
            .map(|(a, b)| (a.as_ref().to_string(), b.as_ref().to_string()))
            .unzip();
        Self::new(block1, block2)
    }

    /// Check row counts and the code alphabet of both columns
    pub fn validate(&self) -> Result<()> {
        if self.block1.len() != self.block2.len() {
            return Err(LdMixError::invalid_input(format!(
                "Block columns have different row counts: {} vs {}",
                self.block1.len(),
                self.block2.len()
            )));
        }
        if self.block1.is_empty() {
            return Err(LdMixError::invalid_input("Empty genotype matrix"));
        }
        if self.chromosome_ids.len() != self.block1.len() {
            return Err(LdMixError::invalid_input(format!(
                "{} chromosome ids for {} rows",
                self.chromosome_ids.len(),
                self.block1.len()
            )));
        }

        validate_block_codes(&self.block1, 1)?;
        validate_block_codes(&self.block2, 2)?;
        Ok(())
    }

    pub fn n_chromosomes(&self) -> usize {
        self.block1.len()
    }

    pub fn chromosome_ids(&self) -> &[String] {
        &self.chromosome_ids
    }

    pub fn block1(&self) -> &[String] {
        &self.block1
    }

    pub fn block2(&self) -> &[String] {
        &self.block2
    }

    /// Rows as `(block1, block2)` code pairs
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.block1
            .iter()
            .zip(self.block2.iter())
            .map(|(a, b)| (a.as_str(), b.as_str()))
    }
}

/// Every code of a block must be non-empty, free of the label separator and
/// of the same width as the first one.
fn validate_block_codes(codes: &[String], block: usize) -> Result<()> {
    let width = codes.first().map(|c| c.chars().count()).unwrap_or(0);

    for (row, code) in codes.iter().enumerate() {
        if code.is_empty() {
            return Err(LdMixError::invalid_input(format!(
                "Empty code in block {} at row {}",
                block,
                row + 1
            )));
        }
        if code.contains(LABEL_SEPARATOR) {
            return Err(LdMixError::invalid_input(format!(
                "Code '{}' in block {} contains the label separator '{}'",
                code, block, LABEL_SEPARATOR
            )));
        }
        if code.chars().any(char::is_whitespace) {
            return Err(LdMixError::invalid_input(format!(
                "Code '{}' in block {} contains whitespace",
                code, block
            )));
        }
        if code.chars().count() != width {
            return Err(LdMixError::invalid_input(format!(
                "Code '{}' in block {} at row {} has width {}, expected {}",
                code,
                block,
                row + 1,
                code.chars().count(),
                width
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let matrix = GenotypeMatrix::from_rows(&[("00", "00"), ("11", "11"), ("00", "01")]).unwrap();
        assert_eq!(matrix.n_chromosomes(), 3);
        assert_eq!(matrix.chromosome_ids(), &["1", "2", "3"]);
        assert_eq!(matrix.rows().nth(2), Some(("00", "01")));
    }

    #[test]
    fn test_mismatched_row_counts() {
        let err = GenotypeMatrix::new(
            vec!["00".to_string(), "11".to_string()],
            vec!["00".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, LdMixError::InvalidInput { .. }));
    }

    #[test]
    fn test_empty_matrix() {
        let err = GenotypeMatrix::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Empty genotype matrix"));
    }

    #[test]
    fn test_invalid_codes() {
        assert!(GenotypeMatrix::from_rows(&[("00", "")]).is_err());
        assert!(GenotypeMatrix::from_rows(&[("0+", "00")]).is_err());
        assert!(GenotypeMatrix::from_rows(&[("00", "00"), ("000", "00")]).is_err());
        assert!(GenotypeMatrix::from_rows(&[("0 ", "00")]).is_err());
    }

    #[test]
    fn test_id_count_mismatch() {
        let err = GenotypeMatrix::with_ids(
            vec!["HG00100_1".to_string()],
            vec!["00".to_string(), "11".to_string()],
            vec!["00".to_string(), "11".to_string()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("chromosome ids"));
    }
}
