use std::sync::Arc;

use linear_map::LinearMap;
use thiserror::Error;

use crate::action::Action;
use crate::chart::{ANY_RULE, GAMMA_RULE};

// A grammar G maps rule names to ordered lists of rule bodies; each body is a
// sequence of terms plus an optional semantic action:
//
//   <items> = <items> " " <item> {sum($1, $3)} | <item> ;
//
// Grammars are read-only once built and may be shared by concurrent parses.

#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Grammar { rules: LinearMap<String, Rule> }

impl Grammar {
    /// Builds a grammar, rejecting duplicate rule names, reserved names
    /// (as rule names or as referenced nonterminals), rules without bodies,
    /// empty terminals and inverted wildcard bounds.
    ///
    /// References to undefined nonterminals are *not* rejected here, since a
    /// parse may draw on several grammars at once; see
    /// [`Grammar::check_references`].
    pub fn new(rules: impl IntoIterator<Item=Rule>) -> Result<Self, GrammarError> {
        let mut map = LinearMap::new();
        for rule in rules {
            rule.validate()?;
            if map.contains_key(&rule.name) {
                return Err(GrammarError::DuplicateRule(rule.name));
            }
            map.insert(rule.name.clone(), rule);
        }
        Ok(Grammar { rules: map })
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn rules(&self) -> impl Iterator<Item=&Rule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize { self.rules.len() }
    pub fn is_empty(&self) -> bool { self.rules.is_empty() }

    /// Fails on the first nonterminal that no rule of this grammar defines.
    pub fn check_references(&self) -> Result<(), GrammarError> {
        Grammar::check_references_across(std::slice::from_ref(self))
    }

    /// Like [`Grammar::check_references`], but a nonterminal counts as
    /// defined if any of `grammars` defines it.
    pub fn check_references_across(grammars: &[Grammar]) -> Result<(), GrammarError> {
        for g in grammars {
            for rule in g.rules() {
                for name in rule.nonterms() {
                    if !grammars.iter().any(|g| g.rule(name).is_some()) {
                        return Err(GrammarError::UndefinedNonTerminal {
                            rule: rule.name.clone(),
                            missing: name.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Rule {
    pub(crate) name: String,
    pub(crate) bodies: Vec<Arc<RuleBody>>,
}

impl Rule {
    pub fn new(name: impl Into<String>, bodies: impl IntoIterator<Item=RuleBody>) -> Rule {
        Rule { name: name.into(), bodies: bodies.into_iter().map(Arc::new).collect() }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn bodies(&self) -> &[Arc<RuleBody>] { &self.bodies }

    fn nonterms(&self) -> impl Iterator<Item=&str> {
        self.bodies.iter()
            .flat_map(|b| b.terms.iter())
            .filter_map(|t| match t {
                Term::NonTerminal(name) => Some(&name[..]),
                Term::Terminal(_) | Term::Wildcard(_) => None,
            })
    }

    fn validate(&self) -> Result<(), GrammarError> {
        if self.name == GAMMA_RULE || self.name == ANY_RULE {
            return Err(GrammarError::ReservedName(self.name.clone()));
        }
        if self.bodies.is_empty() {
            return Err(GrammarError::EmptyRule(self.name.clone()));
        }
        for term in self.bodies.iter().flat_map(|b| b.terms.iter()) {
            match term {
                Term::Terminal(text) if text.is_empty() => {
                    return Err(GrammarError::EmptyTerminal { rule: self.name.clone() });
                }
                Term::NonTerminal(name) if name == GAMMA_RULE || name == ANY_RULE => {
                    return Err(GrammarError::ReservedName(name.clone()));
                }
                Term::Wildcard(Some(Bounds { min, max })) if min > max => {
                    return Err(GrammarError::InvertedBounds {
                        rule: self.name.clone(), min: *min, max: *max,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub struct RuleBody {
    pub(crate) terms: Vec<Term>,
    pub(crate) action: Option<Action>,
}

impl RuleBody {
    pub fn new(terms: Vec<Term>) -> Self {
        RuleBody { terms, action: None }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn terms(&self) -> &[Term] { &self.terms }
    pub fn action(&self) -> Option<&Action> { self.action.as_ref() }
}

/// One grammar symbol occurrence.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub enum Term {
    /// Matches one token whose text is exactly this string.
    Terminal(String),
    NonTerminal(String),
    /// Matches any tokens. Without bounds, one or more of them; with bounds,
    /// between `min` and `max` inclusive.
    Wildcard(Option<Bounds>),
}

impl Term {
    pub fn terminal(text: impl Into<String>) -> Term { Term::Terminal(text.into()) }
    pub fn nonterminal(name: impl Into<String>) -> Term { Term::NonTerminal(name.into()) }
    pub fn wildcard() -> Term { Term::Wildcard(None) }
    pub fn bounded(min: usize, max: usize) -> Term { Term::Wildcard(Some(Bounds { min, max })) }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Bounds { pub min: usize, pub max: usize }

impl Bounds {
    pub fn contains(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum GrammarError {
    #[error("rule name `{0}` is reserved")]
    ReservedName(String),
    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),
    #[error("rule `{0}` has no bodies")]
    EmptyRule(String),
    #[error("rule `{rule}` contains an empty terminal")]
    EmptyTerminal { rule: String },
    #[error("rule `{rule}` has a wildcard with min {min} greater than max {max}")]
    InvertedBounds { rule: String, min: usize, max: usize },
    #[error("rule `{rule}` refers to undefined nonterminal `{missing}`")]
    UndefinedNonTerminal { rule: String, missing: String },
}

#[cfg(test)]
#[path = "tests/grammar.rs"]
mod tests_for_grammar;
