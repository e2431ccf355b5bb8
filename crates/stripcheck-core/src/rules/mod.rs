pub mod schema;

use crate::error::StripError;
use schema::{Criterion, Rule, RuleTable};
use std::path::Path;
use tracing::{info, warn};

/// Minimum number of tab-separated fields a rule record needs.
pub const MIN_FIELDS: usize = 6;

/// Outcome of loading a rule source.
///
/// Loading never fails outright: an unreadable source yields an empty table
/// with the cause kept in `failure`.
#[derive(Debug)]
pub struct RuleLoad {
    pub table: RuleTable,
    /// 1-based line numbers of records skipped for having too few fields.
    pub skipped: Vec<usize>,
    pub failure: Option<StripError>,
}

impl RuleLoad {
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// Load a rule table from a tab-separated file.
pub fn load_rule_table(path: &Path) -> RuleLoad {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let (table, skipped) = parse_rule_table(&content);
            info!(path = %path.display(), rules = table.len(), "loaded rule table");
            for line in &skipped {
                warn!(path = %path.display(), line, "skipped rule record with too few fields");
            }
            RuleLoad {
                table,
                skipped,
                failure: None,
            }
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "rule table unavailable, every verdict will be CHECK"
            );
            RuleLoad {
                table: RuleTable::empty(),
                skipped: Vec::new(),
                failure: Some(StripError::RulesLoad {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }),
            }
        }
    }
}

/// Parse tab-separated rule records. The first line is a header and is
/// discarded. Returns the table and the line numbers of skipped records.
pub fn parse_rule_table(content: &str) -> (RuleTable, Vec<usize>) {
    let mut rules = Vec::new();
    let mut skipped = Vec::new();

    for (index, line) in content.lines().enumerate().skip(1) {
        match parse_record(line) {
            Some(rule) => rules.push(rule),
            None => skipped.push(index + 1),
        }
    }

    (RuleTable::new(rules), skipped)
}

/// Parse a single record; `None` when it has fewer than [`MIN_FIELDS`] fields.
///
/// Surrounding whitespace is stripped from the whole line before splitting,
/// so a trailing empty field does not count.
pub fn parse_record(line: &str) -> Option<Rule> {
    let fields: Vec<&str> = line.trim().split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(Rule {
        id: fields[0].to_string(),
        chlorine: Criterion::parse(fields[1]),
        nitrate: Criterion::parse(fields[2]),
        iron: Criterion::parse(fields[3]),
        phosphate: Criterion::parse(fields[4]),
        output: fields[5].to_string(),
    })
}
