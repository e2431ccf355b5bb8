use stripcheck_core::error::StripError;
use stripcheck_core::AnalysisConfig;

pub fn print_default() -> Result<(), StripError> {
    let json = serde_json::to_string_pretty(&AnalysisConfig::default())?;
    println!("{json}");
    Ok(())
}
