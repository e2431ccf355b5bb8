use crate::classify::outcome::{Analysis, AnalysisResult, Miss, ZoneReading};
use crate::classify::states;
use crate::color;
use crate::config::AnalysisConfig;
use crate::error::StripError;
use crate::fiducial::qr::QrLocator;
use crate::fiducial::FiducialLocator;
use crate::model::Analyte;
use crate::preprocess;
use crate::rules::schema::{RuleTable, DEFAULT_VERDICT};
use crate::zones::{self, Zones};
use image::{DynamicImage, RgbImage};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Runs the locate -> zones -> sample -> classify -> match pipeline.
///
/// Holds only immutable state, so one engine can serve any number of
/// sequential or concurrent calls.
pub struct AnalysisEngine {
    rules: Arc<RuleTable>,
    locator: Box<dyn FiducialLocator>,
    config: AnalysisConfig,
}

impl AnalysisEngine {
    /// Engine with the QR backend and default calibration.
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self {
            rules,
            locator: Box::new(QrLocator::new()),
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_locator(mut self, locator: Box<dyn FiducialLocator>) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Decode an encoded image and analyze it.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult, StripError> {
        let image = image::load_from_memory(bytes)?;
        self.analyze(&image)
    }

    /// Analyze a decoded image. Fails only for an empty image.
    pub fn analyze(&self, image: &DynamicImage) -> Result<AnalysisResult, StripError> {
        Ok(self.analyze_detailed(image)?.result)
    }

    pub fn analyze_detailed(&self, image: &DynamicImage) -> Result<Analysis, StripError> {
        self.analyze_rgb(&image.to_rgb8())
    }

    pub fn analyze_rgb(&self, image: &RgbImage) -> Result<Analysis, StripError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(StripError::InvalidImage(format!(
                "image has no pixels ({width}x{height})"
            )));
        }

        let sharpened;
        let frame = if self.config.preprocess.sharpen {
            sharpened = preprocess::sharpen(image);
            &sharpened
        } else {
            image
        };

        let Some(fiducial) = self.locator.locate(frame) else {
            debug!(backend = self.locator.backend_name(), "no fiducial found");
            return Ok(Analysis::missed(Miss::NoFiducial, None, None));
        };
        debug!(%fiducial, "fiducial located");

        let zones = zones::derive_zones(fiducial, width, height, &self.config.zones);
        if !zones.is_usable() {
            debug!(border = zones.border, "fiducial too close to frame edge");
            return Ok(Analysis::missed(Miss::BorderTooThin, Some(fiducial), Some(zones)));
        }

        let readings = self.read_zones(frame, &zones);
        let state = |analyte: Analyte| {
            readings
                .iter()
                .find(|r| r.analyte == analyte)
                .map(|r| r.state.clone())
                .unwrap_or_else(|| states::NOT_DETERMINED.to_string())
        };
        let chlorine = state(Analyte::Chlorine);
        let nitrate = state(Analyte::Nitrate);
        let iron = state(Analyte::Iron);
        let phosphate = state(Analyte::Phosphate);

        let matched = self.rules.find(&chlorine, &nitrate, &iron, &phosphate);
        let status = matched
            .map(|r| r.output.clone())
            .unwrap_or_else(|| DEFAULT_VERDICT.to_string());
        debug!(%status, rule = matched.map(|r| r.id.as_str()), "verdict");

        Ok(Analysis {
            result: AnalysisResult {
                status,
                chlorine,
                nitrate,
                iron,
                phosphate,
            },
            fiducial: Some(fiducial),
            zones: Some(zones),
            readings,
            miss: None,
            matched_rule: matched.map(|r| r.id.clone()),
        })
    }

    /// Sample and classify every zone. Zones are disjoint, so they can be
    /// read in any order.
    fn read_zones(&self, frame: &RgbImage, zones: &Zones) -> Vec<ZoneReading> {
        let read = |analyte: &Analyte| {
            let analyte = *analyte;
            let side = analyte.side();
            let zone = zones.get(side);
            let ratio = color::sample(frame, zone, &self.config.calibration.range(analyte));
            let state = states::classify(analyte, ratio);
            debug!(%analyte, %side, %zone, ratio, state, "zone read");
            ZoneReading {
                analyte,
                side,
                zone,
                ratio,
                state: state.to_string(),
            }
        };

        if self.config.parallel_zones {
            Analyte::ALL.par_iter().map(read).collect()
        } else {
            Analyte::ALL.iter().map(read).collect()
        }
    }
}
