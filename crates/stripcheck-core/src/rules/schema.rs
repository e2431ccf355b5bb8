use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict returned when no rule matches the observed states.
pub const DEFAULT_VERDICT: &str = "CHECK";

/// Literal that marks a criterion as a wildcard in the rule source.
pub const WILDCARD: &str = "Any";

/// One analyte column of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    /// Matches any observed state.
    Wildcard,
    /// Matches exactly this state name (case-sensitive).
    Exact(String),
}

impl Criterion {
    pub fn parse(field: &str) -> Self {
        if field == WILDCARD {
            Criterion::Wildcard
        } else {
            Criterion::Exact(field.to_string())
        }
    }

    pub fn matches(&self, observed: &str) -> bool {
        match self {
            Criterion::Wildcard => true,
            Criterion::Exact(state) => state == observed,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Wildcard => f.write_str(WILDCARD),
            Criterion::Exact(state) => f.write_str(state),
        }
    }
}

/// A single verdict rule: four analyte criteria and the output they select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Leading identifier column from the source, kept for display only.
    pub id: String,
    pub chlorine: Criterion,
    pub nitrate: Criterion,
    pub iron: Criterion,
    pub phosphate: Criterion,
    pub output: String,
}

impl Rule {
    pub fn matches(&self, chlorine: &str, nitrate: &str, iron: &str, phosphate: &str) -> bool {
        self.chlorine.matches(chlorine)
            && self.nitrate.matches(nitrate)
            && self.iron.matches(iron)
            && self.phosphate.matches(phosphate)
    }
}

/// Ordered, immutable list of verdict rules.
///
/// Built once and shared read-only; order is significant since the first
/// matching rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching all four observed states, if any.
    pub fn find(
        &self,
        chlorine: &str,
        nitrate: &str,
        iron: &str,
        phosphate: &str,
    ) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(chlorine, nitrate, iron, phosphate))
    }

    /// Verdict for the observed states: the first matching rule's output,
    /// or [`DEFAULT_VERDICT`].
    pub fn verdict(&self, chlorine: &str, nitrate: &str, iron: &str, phosphate: &str) -> &str {
        self.find(chlorine, nitrate, iron, phosphate)
            .map(|rule| rule.output.as_str())
            .unwrap_or(DEFAULT_VERDICT)
    }
}
