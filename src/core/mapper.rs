// mapper.rs - Project frequency tables back onto chromosome order

use crate::data::HaplotypeLabel;
use crate::error::{LdMixError, Result};
use crate::estimators::FrequencyTable;

/// Maps a label-keyed [`FrequencyTable`] onto the ordered chromosome
/// sequence. A label absent from the table is an estimator contract
/// violation and is reported as [`LdMixError::MissingLabel`].
#[derive(Debug, Clone, Copy)]
pub struct ResponsibilityMapper<'a> {
    table_name: &'a str,
}

impl<'a> ResponsibilityMapper<'a> {
    /// `table_name` only appears in error messages
    pub fn new(table_name: &'a str) -> Self {
        Self { table_name }
    }

    pub fn project(&self, table: &FrequencyTable, labels: &[HaplotypeLabel]) -> Result<Vec<f64>> {
        labels
            .iter()
            .map(|label| {
                table
                    .get(label.as_str())
                    .ok_or_else(|| LdMixError::missing_label(label.as_str(), self.table_name))
            })
            .collect()
    }

    /// `project` followed by scaling every value by `factor`
    pub fn project_scaled(
        &self,
        table: &FrequencyTable,
        labels: &[HaplotypeLabel],
        factor: f64,
    ) -> Result<Vec<f64>> {
        let mut values = self.project(table, labels)?;
        values.iter_mut().for_each(|v| *v *= factor);
        Ok(values)
    }
}
