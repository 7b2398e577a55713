use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Which accepting states a run reports.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Only the accepting states of the rightmost column that has any, i.e.
    /// the longest-spanning parses; one derivation is extracted.
    #[display(fmt = "first")]
    First,
    /// Every accepting state at every end offset, with all derivations.
    #[display(fmt = "all")]
    All,
}

impl Default for MatchMode {
    fn default() -> Self { MatchMode::All }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    pub mode: MatchMode,
    /// Upper bound on the derivations extracted per accepting state. Highly
    /// ambiguous grammars can otherwise produce exponentially many.
    pub max_trees: Option<usize>,
}

impl ParseOptions {
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_trees(mut self, max_trees: usize) -> Self {
        self.max_trees = Some(max_trees);
        self
    }

    /// The derivation limit actually applied: first-match mode wants one.
    pub(crate) fn tree_limit(&self) -> Option<usize> {
        match self.mode {
            MatchMode::First => Some(1),
            MatchMode::All => self.max_trees,
        }
    }
}

#[cfg(test)]
#[path = "tests/options.rs"]
mod tests_for_options;
