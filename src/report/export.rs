//! JSON export of entropy and ranking results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{ColumnEntropy, EntropyReport, InformationGainRecord, Ranking, SkippedColumn};

/// Metadata about the analysis run
#[derive(Debug, Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (RFC 3339)
    pub timestamp: String,
    /// Morphent version
    pub morphent_version: String,
    /// Input file path
    pub input_file: String,
    /// Target column (ranking exports only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,
    /// Number of quantile bins for continuous columns
    pub num_bins: usize,
}

impl AnalysisMetadata {
    pub fn new(input_file: &Path, target_column: Option<&str>, num_bins: usize) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            morphent_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.display().to_string(),
            target_column: target_column.map(str::to_string),
            num_bins,
        }
    }
}

/// Summary statistics of an entropy run
#[derive(Debug, Serialize)]
pub struct EntropyExportSummary {
    pub columns_analyzed: usize,
    pub columns_skipped: usize,
    pub mean_entropy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_entropy_column: Option<String>,
}

/// Complete entropy export
#[derive(Debug, Serialize)]
pub struct EntropyExport<'a> {
    pub metadata: AnalysisMetadata,
    pub summary: EntropyExportSummary,
    pub columns: &'a [ColumnEntropy],
    pub skipped: &'a [SkippedColumn],
}

/// Summary statistics of a ranking run
#[derive(Debug, Serialize)]
pub struct RankingExportSummary {
    pub records_used: usize,
    pub overall_entropy: f64,
    pub predictors_ranked: usize,
    pub predictors_skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_informative: Option<String>,
}

/// Complete ranking export
#[derive(Debug, Serialize)]
pub struct RankingExport<'a> {
    pub metadata: AnalysisMetadata,
    pub summary: RankingExportSummary,
    pub ranking: &'a [InformationGainRecord],
    pub skipped: &'a [SkippedColumn],
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Build the serializable form of an entropy report
pub fn entropy_export<'a>(report: &'a EntropyReport, input_file: &Path) -> EntropyExport<'a> {
    EntropyExport {
        metadata: AnalysisMetadata::new(input_file, None, report.num_bins),
        summary: EntropyExportSummary {
            columns_analyzed: report.columns.len(),
            columns_skipped: report.skipped.len(),
            mean_entropy: mean(report.columns.iter().map(|c| c.summary.entropy)),
            highest_entropy_column: report.columns.first().map(|c| c.name.clone()),
        },
        columns: &report.columns,
        skipped: &report.skipped,
    }
}

/// Build the serializable form of a ranking
pub fn ranking_export<'a>(ranking: &'a Ranking, input_file: &Path) -> RankingExport<'a> {
    RankingExport {
        metadata: AnalysisMetadata::new(input_file, Some(&ranking.target), ranking.num_bins),
        summary: RankingExportSummary {
            records_used: ranking.records_used,
            overall_entropy: ranking.overall_entropy,
            predictors_ranked: ranking.records.len(),
            predictors_skipped: ranking.skipped.len(),
            most_informative: ranking.most_informative().map(|r| r.predictor.clone()),
        },
        ranking: &ranking.records,
        skipped: &ranking.skipped,
    }
}

fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize results to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write results to {}", output_path.display()))?;

    Ok(())
}

/// Export an entropy report to a JSON file
pub fn export_entropy_report(report: &EntropyReport, input_file: &Path, output_path: &Path) -> Result<()> {
    write_json(&entropy_export(report, input_file), output_path)
}

/// Export a ranking to a JSON file
pub fn export_ranking(ranking: &Ranking, input_file: &Path, output_path: &Path) -> Result<()> {
    write_json(&ranking_export(ranking, input_file), output_path)
}
