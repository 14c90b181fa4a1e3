//! `morphent rank` - information gain ranking of predictors against a target

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use super::args::TableArgs;
use super::config::AnalysisConfig;
use super::prepare::{load_options, load_variables, resolve_schema, skipped_names};
use crate::pipeline::rank_predictors;
use crate::report::{display_ranking, export_ranking};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success, print_warning,
    RunCard,
};

pub fn run_rank(target: Option<&str>, args: &TableArgs) -> Result<()> {
    let config = AnalysisConfig::from_args(args, target)?;
    let target = config.target.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "Target column is required. Use -t/--target or set \"target\" in the config file."
        )
    })?;
    let num_bins = config.num_bins();
    let export_path = args.export_path("ranking");
    let options = load_options(args.infer_schema_length, &config);

    print_banner(env!("CARGO_PKG_VERSION"));

    let schema = resolve_schema(&args.input, &options, &config)?;
    if schema.len() < 2 {
        anyhow::bail!(
            "No predictor columns selected besides target '{}'. Use --categorical / --continuous or set --default-kind.",
            target
        );
    }
    print_config(&RunCard {
        input: &args.input,
        target: Some(&target),
        num_bins,
        columns: schema.len() - 1,
        export: export_path.as_deref(),
    });

    // STEP 1: load
    print_step_header(1, "Loading Dataset");
    let step_start = Instant::now();
    let table = load_variables(&args.input, &options, &schema)?;
    print_step_time(step_start.elapsed());

    // STEP 2: ranking
    print_step_header(2, "Information Gain");
    let step_start = Instant::now();
    let spinner = create_spinner("Ranking predictors...");
    let ranking = rank_predictors(&table, &target, num_bins)
        .with_context(|| format!("Failed to rank predictors against '{}'", target))?;
    if ranking.skipped.is_empty() {
        finish_with_success(
            &spinner,
            &format!("{} predictors ranked", ranking.records.len()),
        );
    } else {
        finish_with_warning(
            &spinner,
            &format!(
                "{} predictors ranked, {} skipped",
                ranking.records.len(),
                ranking.skipped.len()
            ),
        );
        print_warning(&format!(
            "Skipped {} predictor(s) without usable observations: {}",
            ranking.skipped.len(),
            skipped_names(&ranking.skipped)
        ));
    }
    let excluded = table.rows() - ranking.records_used;
    if excluded > 0 {
        print_info(&format!(
            "{} rows without a '{}' label excluded",
            excluded, target
        ));
    }
    info!(
        predictors = ranking.records.len(),
        skipped = ranking.skipped.len(),
        records = ranking.records_used,
        "ranking finished"
    );
    print_step_time(step_start.elapsed());

    display_ranking(&ranking, args.top);

    if let Some(path) = export_path {
        print_step_header(3, "Export");
        export_ranking(&ranking, &args.input, &path)?;
        print_success(&format!("Results saved to {}", path.display()));
    }

    print_completion();
    Ok(())
}
