use serde_json::{json, Value};
use stripcheck_core::error::StripError;

use super::ImageOutcome;

pub fn print(outcomes: &[ImageOutcome], detail: bool) -> Result<(), StripError> {
    let entries = outcomes
        .iter()
        .map(|o| entry(o, detail))
        .collect::<Result<Vec<Value>, StripError>>()?;
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn entry(outcome: &ImageOutcome, detail: bool) -> Result<Value, StripError> {
    let path = outcome.path.display().to_string();
    let value = match &outcome.analysis {
        Ok(analysis) if detail => json!({ "path": path, "analysis": analysis }),
        Ok(analysis) => {
            let mut value = serde_json::to_value(&analysis.result)?;
            if let Value::Object(ref mut map) = value {
                map.insert("path".into(), Value::String(path));
            }
            value
        }
        Err(e) => json!({ "path": path, "error": e.to_string() }),
    };
    Ok(value)
}
