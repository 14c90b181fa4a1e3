//! `morphent entropy` - Shannon entropy of every selected column

use std::time::Instant;

use anyhow::Result;
use tracing::info;

use super::args::TableArgs;
use super::config::AnalysisConfig;
use super::prepare::{load_options, load_variables, resolve_schema, skipped_names};
use crate::pipeline::column_entropies;
use crate::report::{display_entropy_report, export_entropy_report};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_step_header, print_step_time, print_success, print_warning, RunCard,
};

pub fn run_entropy(args: &TableArgs) -> Result<()> {
    let config = AnalysisConfig::from_args(args, None)?;
    let num_bins = config.num_bins();
    let export_path = args.export_path("entropy");
    let options = load_options(args.infer_schema_length, &config);

    print_banner(env!("CARGO_PKG_VERSION"));

    let schema = resolve_schema(&args.input, &options, &config)?;
    print_config(&RunCard {
        input: &args.input,
        target: None,
        num_bins,
        columns: schema.len(),
        export: export_path.as_deref(),
    });

    // STEP 1: load
    print_step_header(1, "Loading Dataset");
    let step_start = Instant::now();
    let table = load_variables(&args.input, &options, &schema)?;
    print_step_time(step_start.elapsed());

    // STEP 2: entropy
    print_step_header(2, "Column Entropy");
    let step_start = Instant::now();
    let spinner = create_spinner("Computing entropies...");
    let report = column_entropies(&table, num_bins)?;
    if report.skipped.is_empty() {
        finish_with_success(
            &spinner,
            &format!("{} columns analysed", report.columns.len()),
        );
    } else {
        finish_with_warning(
            &spinner,
            &format!(
                "{} columns analysed, {} skipped",
                report.columns.len(),
                report.skipped.len()
            ),
        );
        print_warning(&format!(
            "Skipped {} column(s) without usable observations: {}",
            report.skipped.len(),
            skipped_names(&report.skipped)
        ));
    }
    info!(
        columns = report.columns.len(),
        skipped = report.skipped.len(),
        "entropy analysis finished"
    );
    print_step_time(step_start.elapsed());

    display_entropy_report(&report, args.top);

    if let Some(path) = export_path {
        print_step_header(3, "Export");
        export_entropy_report(&report, &args.input, &path)?;
        print_success(&format!("Results saved to {}", path.display()));
    }

    print_completion();
    Ok(())
}
