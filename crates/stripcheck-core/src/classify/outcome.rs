use crate::classify::states::NOT_DETERMINED;
use crate::model::{Analyte, Rect, Side};
use crate::rules::schema::DEFAULT_VERDICT;
use crate::zones::Zones;
use serde::{Deserialize, Serialize};

/// Verdict and per-analyte states for one photograph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Output of the first matching rule, or "CHECK".
    pub status: String,
    pub chlorine: String,
    pub nitrate: String,
    pub iron: String,
    pub phosphate: String,
}

impl AnalysisResult {
    /// Result for a frame whose zones could not be read.
    pub fn not_determined() -> Self {
        Self {
            status: DEFAULT_VERDICT.to_string(),
            chlorine: NOT_DETERMINED.to_string(),
            nitrate: NOT_DETERMINED.to_string(),
            iron: NOT_DETERMINED.to_string(),
            phosphate: NOT_DETERMINED.to_string(),
        }
    }

    pub fn state(&self, analyte: Analyte) -> &str {
        match analyte {
            Analyte::Chlorine => &self.chlorine,
            Analyte::Nitrate => &self.nitrate,
            Analyte::Iron => &self.iron,
            Analyte::Phosphate => &self.phosphate,
        }
    }

    pub fn is_determined(&self) -> bool {
        Analyte::ALL
            .iter()
            .all(|a| self.state(*a) != NOT_DETERMINED)
    }
}

/// Coverage measured in one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneReading {
    pub analyte: Analyte,
    pub side: Side,
    pub zone: Rect,
    /// Fraction of zone pixels inside the analyte's color range.
    pub ratio: f64,
    pub state: String,
}

/// Why no states were determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Miss {
    NoFiducial,
    BorderTooThin,
}

/// Full record of one analysis pass, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub result: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiducial: Option<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<Zones>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub readings: Vec<ZoneReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miss: Option<Miss>,
    /// Identifier of the rule that produced the verdict, if any matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<String>,
}

impl Analysis {
    pub fn missed(miss: Miss, fiducial: Option<Rect>, zones: Option<Zones>) -> Self {
        Self {
            result: AnalysisResult::not_determined(),
            fiducial,
            zones,
            readings: Vec::new(),
            miss: Some(miss),
            matched_rule: None,
        }
    }
}
