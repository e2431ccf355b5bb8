pub mod engine;
pub mod outcome;
pub mod states;

pub use engine::AnalysisEngine;
pub use outcome::{Analysis, AnalysisResult, Miss, ZoneReading};
pub use states::classify;
