use std::path::{Path, PathBuf};
use std::sync::Arc;
use stripcheck_core::error::StripError;
use stripcheck_core::rules::load_rule_table;
use stripcheck_core::{AnalysisConfig, AnalysisEngine};
use tracing::warn;

use crate::output::{self, ImageOutcome};

pub fn run(
    images: Vec<PathBuf>,
    rules_path: &Path,
    config_path: Option<PathBuf>,
    output_format: &str,
    detail: bool,
) -> Result<(), StripError> {
    let config = match config_path {
        Some(path) => AnalysisConfig::from_json_file(&path)?,
        None => AnalysisConfig::default(),
    };

    // A missing table is not fatal: every verdict falls back to CHECK.
    let load = load_rule_table(rules_path);
    let engine = AnalysisEngine::new(Arc::new(load.table)).with_config(config);

    let mut outcomes = Vec::with_capacity(images.len());
    let mut failed = 0;
    for path in images {
        let analysis =
            stripcheck_core::open_image(&path).and_then(|img| engine.analyze_detailed(&img));
        if let Err(ref e) = analysis {
            warn!(path = %path.display(), error = %e, "analysis failed");
            failed += 1;
        }
        outcomes.push(ImageOutcome { path, analysis });
    }

    match output_format {
        "json" => output::json::print(&outcomes, detail)?,
        _ => output::table::print(&outcomes, detail),
    }

    if failed > 0 {
        return Err(StripError::BatchIncomplete {
            failed,
            total: outcomes.len(),
        });
    }

    Ok(())
}
