use std::path::Path;
use stripcheck_core::classify::states;
use stripcheck_core::error::StripError;
use stripcheck_core::model::Analyte;
use stripcheck_core::rules::load_rule_table;
use stripcheck_core::rules::schema::{Criterion, Rule, DEFAULT_VERDICT};

fn load(file: &Path) -> Result<stripcheck_core::rules::RuleLoad, StripError> {
    let mut load = load_rule_table(file);
    match load.failure.take() {
        Some(failure) => Err(failure),
        None => Ok(load),
    }
}

pub fn show(file: &Path) -> Result<(), StripError> {
    let load = load(file)?;
    let rules = load.table.rules();

    if rules.is_empty() {
        println!("No rules in {}. Every verdict is {}.", file.display(), DEFAULT_VERDICT);
        return Ok(());
    }

    let id_width = rules.iter().map(|r| r.id.len()).max().unwrap_or(2).max(2);
    let col = |rule: &Rule, analyte: Analyte| match analyte {
        Analyte::Chlorine => rule.chlorine.to_string(),
        Analyte::Nitrate => rule.nitrate.to_string(),
        Analyte::Iron => rule.iron.to_string(),
        Analyte::Phosphate => rule.phosphate.to_string(),
    };

    print!("  {:<width$}", "ID", width = id_width);
    for analyte in Analyte::ALL {
        print!("  {:<13}", analyte.name());
    }
    println!("  Output");
    println!("  {}", "-".repeat(id_width + 4 * 15 + 8));

    for rule in rules {
        print!("  {:<width$}", rule.id, width = id_width);
        for analyte in Analyte::ALL {
            print!("  {:<13}", col(rule, analyte));
        }
        println!("  {}", rule.output);
    }

    println!();
    println!("Rules are tried top to bottom; the first match wins.");
    println!("States matching no rule yield {}.", DEFAULT_VERDICT);

    Ok(())
}

pub fn validate(file: &Path) -> Result<(), StripError> {
    let load = load(file)?;

    println!("Rule table '{}' loaded.", file.display());
    println!("  Rules: {}", load.table.len());
    if !load.skipped.is_empty() {
        let lines: Vec<String> = load.skipped.iter().map(|l| l.to_string()).collect();
        println!("  Skipped records (too few fields) on line(s): {}", lines.join(", "));
    }

    // States that no analyte can ever produce will never match.
    let mut warnings = Vec::new();
    for rule in load.table.rules() {
        let criteria = [
            (Analyte::Chlorine, &rule.chlorine),
            (Analyte::Nitrate, &rule.nitrate),
            (Analyte::Iron, &rule.iron),
            (Analyte::Phosphate, &rule.phosphate),
        ];
        for (analyte, criterion) in criteria {
            if let Criterion::Exact(state) = criterion {
                if states::rank(analyte, state).is_none() {
                    warnings.push(format!(
                        "rule '{}': {} state '{}' is never produced (expected one of: {})",
                        rule.id,
                        analyte,
                        state,
                        states::states(analyte).join(", ")
                    ));
                }
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
