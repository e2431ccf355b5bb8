use crate::model::Analyte;

/// State reported for every analyte when the zones could not be read.
pub const NOT_DETERMINED: &str = "NA";

/// Step function from coverage ratio to named state.
///
/// `bands[i]` is selected when the ratio is below its threshold and not below
/// any earlier one; `top` is selected otherwise. Thresholds ascend.
struct Scale {
    bands: &'static [(f64, &'static str)],
    top: &'static str,
}

const CHLORINE: Scale = Scale {
    bands: &[(0.05, "Colorless"), (0.15, "Light Pink"), (0.30, "Pink")],
    top: "Dark Magenta",
};

const NITRATE: Scale = Scale {
    bands: &[(0.05, "White"), (0.20, "Pink")],
    top: "Bright Pink",
};

const IRON: Scale = Scale {
    bands: &[(0.05, "Clear"), (0.20, "Orange")],
    top: "Dark Orange",
};

const PHOSPHATE: Scale = Scale {
    bands: &[(0.05, "Clear")],
    top: "Blue",
};

fn scale(analyte: Analyte) -> &'static Scale {
    match analyte {
        Analyte::Chlorine => &CHLORINE,
        Analyte::Nitrate => &NITRATE,
        Analyte::Iron => &IRON,
        Analyte::Phosphate => &PHOSPHATE,
    }
}

/// Classify a coverage ratio into the analyte's named state.
///
/// A ratio exactly on a threshold falls into the higher band.
pub fn classify(analyte: Analyte, ratio: f64) -> &'static str {
    let scale = scale(analyte);
    scale
        .bands
        .iter()
        .find(|(threshold, _)| ratio < *threshold)
        .map(|(_, state)| *state)
        .unwrap_or(scale.top)
}

/// All states of an analyte, from faintest to most intense.
pub fn states(analyte: Analyte) -> Vec<&'static str> {
    let scale = scale(analyte);
    scale
        .bands
        .iter()
        .map(|(_, state)| *state)
        .chain(std::iter::once(scale.top))
        .collect()
}

/// Intensity rank of a state name (0 = faintest).
pub fn rank(analyte: Analyte, state: &str) -> Option<usize> {
    states(analyte).iter().position(|s| *s == state)
}
