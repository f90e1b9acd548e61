// labels.rs - Joint haplotype labels for a block pair

use crate::data::genotype::GenotypeMatrix;
use crate::error::{LdMixError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display};

/// Separator placed between the two block codes of a label
pub const LABEL_SEPARATOR: char = '+';

/// Joint genotype pattern of one chromosome, e.g. `"00+01"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HaplotypeLabel(String);

impl HaplotypeLabel {
    pub fn new(block1: &str, block2: &str) -> Self {
        let mut label = String::with_capacity(block1.len() + block2.len() + 1);
        label.push_str(block1);
        label.push(LABEL_SEPARATOR);
        label.push_str(block2);
        HaplotypeLabel(label)
    }

    /// Parse a label string; exactly one separator with non-empty codes on
    /// both sides is accepted.
    pub fn parse(label: &str) -> Result<Self> {
        let mut parts = label.split(LABEL_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) if !a.is_empty() && !b.is_empty() => Ok(Self::new(a, b)),
            _ => Err(LdMixError::invalid_input(format!(
                "Malformed haplotype label '{}'",
                label
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into the `(block1, block2)` codes
    pub fn blocks(&self) -> (&str, &str) {
        self.0
            .split_once(LABEL_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }
}

impl Display for HaplotypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HaplotypeLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for HaplotypeLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Turns the two block columns of a [`GenotypeMatrix`] into per-chromosome
/// labels, preserving row order.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaplotypeLabelEncoder;

impl HaplotypeLabelEncoder {
    pub fn encode(&self, matrix: &GenotypeMatrix) -> Result<Vec<HaplotypeLabel>> {
        matrix.validate()?;
        Ok(matrix
            .rows()
            .map(|(block1, block2)| HaplotypeLabel::new(block1, block2))
            .collect())
    }
}

/// Shorthand for `HaplotypeLabelEncoder.encode(matrix)`
pub fn encode_labels(matrix: &GenotypeMatrix) -> Result<Vec<HaplotypeLabel>> {
    HaplotypeLabelEncoder.encode(matrix)
}

/// Parse a list of label strings (mostly useful for tests and callers that
/// already hold encoded labels)
pub fn parse_labels<S: AsRef<str>>(labels: &[S]) -> Result<Vec<HaplotypeLabel>> {
    labels
        .iter()
        .map(|l| HaplotypeLabel::parse(l.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_preserves_order() {
        let matrix = GenotypeMatrix::from_rows(&[
            ("00", "00"),
            ("11", "11"),
            ("00", "00"),
            ("00", "00"),
            ("11", "11"),
            ("00", "01"),
        ])
        .unwrap();

        let labels = encode_labels(&matrix).unwrap();
        let strings: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
        assert_eq!(
            strings,
            vec!["00+00", "11+11", "00+00", "00+00", "11+11", "00+01"]
        );
    }

    #[test]
    fn test_label_blocks() {
        let label = HaplotypeLabel::new("010", "11");
        assert_eq!(label.blocks(), ("010", "11"));
        assert_eq!(label.to_string(), "010+11");
    }

    #[test]
    fn test_parse() {
        assert_eq!(HaplotypeLabel::parse("00+01").unwrap().blocks(), ("00", "01"));
        assert!(HaplotypeLabel::parse("0001").is_err());
        assert!(HaplotypeLabel::parse("00+01+11").is_err());
        assert!(HaplotypeLabel::parse("+01").is_err());
    }

    #[test]
    fn test_borrow_lookup() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(HaplotypeLabel::new("00", "11"), 0.25);
        assert_eq!(map.get("00+11"), Some(&0.25));
    }
}
