pub mod classify;
pub mod color;
pub mod config;
pub mod error;
pub mod fiducial;
pub mod model;
pub mod preprocess;
pub mod rules;
pub mod zones;

pub use classify::{Analysis, AnalysisEngine, AnalysisResult};
pub use config::AnalysisConfig;
pub use error::StripError;
pub use rules::schema::RuleTable;

use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;

/// Decode an image file in any format the `image` crate supports.
pub fn open_image(path: &Path) -> Result<DynamicImage, StripError> {
    Ok(image::open(path)?)
}

/// Main API entry point: analyze a photograph on disk against a rule table
/// using the QR fiducial backend and default calibration.
///
/// A frame without a readable fiducial is a normal result (all states "NA",
/// status "CHECK"); only an unreadable or empty image is an error.
pub fn analyze_file(path: &Path, rules: Arc<RuleTable>) -> Result<AnalysisResult, StripError> {
    let image = open_image(path)?;
    AnalysisEngine::new(rules).analyze(&image)
}
