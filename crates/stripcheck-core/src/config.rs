//! Tunable parameters for the analysis pipeline.
//!
//! Defaults reproduce the calibration the strips were designed against;
//! a JSON file can override them for a different print run or camera.

use crate::error::StripError;
use crate::model::Analyte;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Exclusive upper bound of the 8-bit hue channel (degrees halved).
pub const HUE_LIMIT: u8 = 180;

/// Complete analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub preprocess: PreprocessConfig,
    #[serde(default)]
    pub zones: ZoneConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    /// Sample the four zones on the rayon pool.
    #[serde(default = "default_true")]
    pub parallel_zones: bool,
}

/// Image preparation applied before location and sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Apply a 3x3 sharpening kernel to the whole frame.
    pub sharpen: bool,
}

/// Geometry of the sample zones around the fiducial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Desired zone thickness as a fraction of the fiducial width.
    pub border_ratio: f64,
    /// Pixels kept clear between a zone and the frame edge.
    pub safety_margin: i64,
    /// Zones this thick or thinner are rejected.
    pub min_border: i64,
}

/// Inclusive HSV bounds, 8-bit convention: H in `[0, 180)`, S and V in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }
}

/// Per-analyte color ranges counted as "indicator present".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    pub chlorine: HsvRange,
    pub nitrate: HsvRange,
    pub iron: HsvRange,
    pub phosphate: HsvRange,
}

impl CalibrationConfig {
    pub fn range(&self, analyte: Analyte) -> HsvRange {
        match analyte {
            Analyte::Chlorine => self.chlorine,
            Analyte::Nitrate => self.nitrate,
            Analyte::Iron => self.iron,
            Analyte::Phosphate => self.phosphate,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { sharpen: true }
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            border_ratio: 0.35,
            safety_margin: 5,
            min_border: 10,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            chlorine: HsvRange::new([140, 80, 80], [170, 255, 255]),
            nitrate: HsvRange::new([130, 50, 80], [160, 255, 255]),
            iron: HsvRange::new([5, 80, 80], [20, 255, 255]),
            phosphate: HsvRange::new([100, 80, 80], [130, 255, 255]),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            zones: ZoneConfig::default(),
            calibration: CalibrationConfig::default(),
            parallel_zones: true,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, StripError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, StripError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<(), StripError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), StripError> {
        if self.zones.border_ratio.is_nan() || self.zones.border_ratio <= 0.0 {
            return Err(StripError::ConfigInvalid(format!(
                "zones.border_ratio must be positive, got {}",
                self.zones.border_ratio
            )));
        }
        if self.zones.safety_margin < 0 || self.zones.min_border < 0 {
            return Err(StripError::ConfigInvalid(
                "zones.safety_margin and zones.min_border must not be negative".into(),
            ));
        }

        for analyte in Analyte::ALL {
            let range = self.calibration.range(analyte);
            if (0..3).any(|i| range.lower[i] > range.upper[i]) {
                return Err(StripError::ConfigInvalid(format!(
                    "{} range has a lower bound above its upper bound",
                    analyte
                )));
            }
            if range.upper[0] >= HUE_LIMIT {
                return Err(StripError::ConfigInvalid(format!(
                    "{} hue bound {} is outside [0, {})",
                    analyte, range.upper[0], HUE_LIMIT
                )));
            }
        }

        Ok(())
    }
}
