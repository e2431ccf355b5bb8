pub mod json;
pub mod table;

use std::path::PathBuf;
use stripcheck_core::error::StripError;
use stripcheck_core::Analysis;

/// Analysis outcome for one input file.
pub struct ImageOutcome {
    pub path: PathBuf,
    pub analysis: Result<Analysis, StripError>,
}
