// mod.rs - Output formatters module

use crate::core::PairFit;
use crate::error::{LdMixError, Result};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Summary table columns, in output order
pub const SUMMARY_COLUMNS: [&str; 11] = [
    "block_a",
    "block_b",
    "n_chromosomes",
    "log_mix",
    "log_ld",
    "log_no_ld",
    "bic",
    "prob",
    "steps",
    "pval",
    "termination",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unsupported output format: {}. Use: tsv, csv, json", s)),
        }
    }
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent)?;
    }
    Ok(())
}

fn create_output(file_path: &str) -> Result<BufWriter<File>> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| {
        LdMixError::invalid_input(format!(
            "Failed to create output file '{}': {}",
            file_path, e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn write_header<W: Write>(writer: &mut W, command_line: &str) -> Result<()> {
    writeln!(writer, "# Command: {}", command_line)?;
    writeln!(
        writer,
        "# Generated: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(writer, "# ldmixture v{}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

fn summary_record(fit: &PairFit) -> Vec<String> {
    let r = &fit.result;
    vec![
        fit.block_a.clone(),
        fit.block_b.clone(),
        r.n_chromosomes().to_string(),
        r.log_mix.to_string(),
        r.log_ld.to_string(),
        r.log_no_ld.to_string(),
        r.bic.to_string(),
        r.prob.to_string(),
        r.steps.to_string(),
        r.pval.to_string(),
        r.termination.to_string(),
    ]
}

/// Write one summary row per fitted block pair as delimited text
pub fn write_delimited<W: Write>(
    mut writer: W,
    delimiter: u8,
    fits: &[PairFit],
    command_line: &str,
) -> Result<()> {
    write_header(&mut writer, command_line)?;

    let mut table = ::csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    table.write_record(SUMMARY_COLUMNS)?;
    for fit in fits {
        table.write_record(summary_record(fit))?;
    }
    table.flush()?;
    Ok(())
}

/// Write full fit records, including posteriors, as a JSON array
pub fn write_json<W: Write>(mut writer: W, fits: &[PairFit]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, fits)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write the scan summary in the specified format
pub fn write_results(
    file_path: &str,
    format: OutputFormat,
    fits: &[PairFit],
    command_line: &str,
) -> Result<()> {
    let writer = create_output(file_path)?;
    match format {
        OutputFormat::Tsv => write_delimited(writer, b'\t', fits, command_line)?,
        OutputFormat::Csv => write_delimited(writer, b',', fits, command_line)?,
        OutputFormat::Json => write_json(writer, fits)?,
    }
    println!("✅ Mixture summary written to: {}", file_path);
    Ok(())
}

/// Write recombination posteriors as a chromosome × block-pair TSV matrix.
///
/// Only pairs whose fit supports the mixture (`bic > min_bic`) get a column.
/// Returns the number of columns written.
pub fn write_responsibilities(
    file_path: &str,
    chromosome_ids: &[String],
    fits: &[PairFit],
    min_bic: f64,
    command_line: &str,
) -> Result<usize> {
    let selected: Vec<&PairFit> = fits
        .iter()
        .filter(|f| f.result.supports_mixture(min_bic))
        .collect();

    for fit in &selected {
        if fit.result.r1.len() != chromosome_ids.len() {
            return Err(LdMixError::invalid_input(format!(
                "Pair {}/{} has {} posteriors for {} chromosomes",
                fit.block_a,
                fit.block_b,
                fit.result.r1.len(),
                chromosome_ids.len()
            )));
        }
    }

    let mut writer = create_output(file_path)?;
    write_header(&mut writer, command_line)?;

    write!(writer, "chromosome")?;
    for fit in &selected {
        write!(writer, "\t{}/{}", fit.block_a, fit.block_b)?;
    }
    writeln!(writer)?;

    for (i, id) in chromosome_ids.iter().enumerate() {
        write!(writer, "{}", id)?;
        for fit in &selected {
            write!(writer, "\t{}", fit.result.r1[i])?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    println!(
        "✅ Responsibilities for {} block pairs written to: {}",
        selected.len(),
        file_path
    );
    Ok(selected.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::em::fit_mixture_model;
    use crate::core::MixtureConfig;
    use crate::data::GenotypeMatrix;
    use std::fs;
    use tempfile::TempDir;

    fn fit(block_a: &str, block_b: &str, bic: f64) -> PairFit {
        let matrix = GenotypeMatrix::from_rows(&[
            ("00", "00"),
            ("11", "11"),
            ("00", "00"),
            ("00", "01"),
        ])
        .unwrap();
        let mut result = fit_mixture_model(&matrix, &MixtureConfig::default()).unwrap();
        result.bic = bic;
        PairFit {
            block_a: block_a.to_string(),
            block_b: block_b.to_string(),
            result,
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("nexus".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_write_tsv_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("summary.tsv");
        let path = path.to_str().unwrap();

        let fits = vec![fit("b1", "b2", 1.0), fit("b2", "b3", 20.0)];
        write_results(path, OutputFormat::Tsv, &fits, "ldmixture --genotypes x.tsv").unwrap();

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "# Command: ldmixture --genotypes x.tsv");
        assert!(lines[1].starts_with("# Generated: "));
        assert!(lines[2].starts_with("# ldmixture v"));
        assert_eq!(lines[3], SUMMARY_COLUMNS.join("\t"));
        assert_eq!(lines.len(), 6);

        let row: Vec<&str> = lines[5].split('\t').collect();
        assert_eq!(row[0], "b2");
        assert_eq!(row[2], "4");
        assert_eq!(row[6], "20");
    }

    #[test]
    fn test_write_csv_summary() {
        let mut buffer = Vec::new();
        write_delimited(&mut buffer, b',', &[fit("b1", "b2", 3.5)], "cmd").unwrap();
        let content = String::from_utf8(buffer).unwrap();
        assert!(content.contains("block_a,block_b,n_chromosomes"));
        assert!(content.lines().last().unwrap().starts_with("b1,b2,4,"));
    }

    #[test]
    fn test_write_json() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[fit("b1", "b2", 3.5)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let record = &value[0];
        assert_eq!(record["block_a"], "b1");
        assert_eq!(record["r1"].as_array().unwrap().len(), 4);
        assert_eq!(record["labels"][3], "00+01");
        assert!(record["termination"].is_string());
    }

    #[test]
    fn test_responsibilities_only_supported_pairs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resp.tsv");
        let path = path.to_str().unwrap();
        let ids: Vec<String> = ["c1", "c2", "c3", "c4"].iter().map(|s| s.to_string()).collect();

        let fits = vec![fit("b1", "b2", 5.0), fit("b2", "b3", 15.0)];
        let written = write_responsibilities(path, &ids, &fits, 10.0, "cmd").unwrap();
        assert_eq!(written, 1);

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(lines[0], "chromosome\tb2/b3");
        assert_eq!(lines.len(), 5);
        assert!(lines[4].starts_with("c4\t"));
    }

    #[test]
    fn test_responsibilities_length_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resp.tsv");
        let ids = vec!["c1".to_string()];
        let fits = vec![fit("b1", "b2", 50.0)];
        assert!(write_responsibilities(path.to_str().unwrap(), &ids, &fits, 10.0, "cmd").is_err());
    }
}
