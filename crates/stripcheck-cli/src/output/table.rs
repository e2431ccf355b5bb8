use stripcheck_core::model::Analyte;
use stripcheck_core::Analysis;

use super::ImageOutcome;

pub fn print(outcomes: &[ImageOutcome], detail: bool) {
    let multi = outcomes.len() > 1;

    for (i, outcome) in outcomes.iter().enumerate() {
        if multi {
            if i > 0 {
                println!();
            }
            println!("--- {} ---\n", outcome.path.display());
        }

        match &outcome.analysis {
            Ok(analysis) => print_analysis(analysis, detail),
            Err(e) => println!("  Error: {e}"),
        }
    }
}

fn print_analysis(analysis: &Analysis, detail: bool) {
    let result = &analysis.result;
    println!("  Status: {}\n", result.status);

    for analyte in Analyte::ALL {
        println!("  {:<10} {}", analyte.name(), result.state(analyte));
    }
    println!();

    if !detail {
        return;
    }

    match analysis.fiducial {
        Some(fiducial) => println!("  Fiducial: {fiducial}"),
        None => println!("  Fiducial: not found"),
    }
    if let Some(zones) = analysis.zones {
        println!("  Border:   {}px", zones.border);
    }
    if let Some(miss) = analysis.miss {
        println!("  Reason:   {miss:?}");
    }
    if let Some(ref rule) = analysis.matched_rule {
        println!("  Rule:     {rule}");
    }

    if !analysis.readings.is_empty() {
        println!();
        for reading in &analysis.readings {
            println!(
                "  {:<10} {:<6} {:<14} {:>6.1}%  -> {}",
                reading.analyte.name(),
                reading.side.to_string(),
                reading.zone.to_string(),
                reading.ratio * 100.0,
                reading.state
            );
        }
    }
    println!();
}
