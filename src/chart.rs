//! The Earley chart: one [`TableColumn`] per input boundary, each holding the
//! deduplicated set of dotted rule instances ([`TableState`]s) that end there.
//!
//! Given a production X → αβ, the dotted state X → α • β records that α has
//! already been matched and β is expected next.

use std::sync::Arc;

use crate::grammar::{Bounds, RuleBody, Term};
use crate::Token;

/// Name of the augmented rule `Γ → S` added for every start symbol S.
pub const GAMMA_RULE: &str = "\u{0263}";

/// Name carried by wildcard pseudo-states.
pub const ANY_RULE: &str = "\u{2217}";

/// Marks the current position inside a rendered state.
pub const DOT: &str = "\u{2022}";

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum StateKind {
    /// An instance of a rule body.
    Rule(Arc<RuleBody>),
    /// A wildcard match in progress; `dot` counts the tokens consumed so far.
    Wildcard(Option<Bounds>),
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TableState {
    pub(crate) name: String,
    pub(crate) kind: StateKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) dot: usize,
}

impl TableState {
    pub(crate) fn rule(name: impl Into<String>, body: Arc<RuleBody>, start: usize) -> Self {
        TableState { name: name.into(), kind: StateKind::Rule(body), start, end: start, dot: 0 }
    }

    pub(crate) fn wildcard(bounds: Option<Bounds>, start: usize) -> Self {
        TableState {
            name: ANY_RULE.to_string(),
            kind: StateKind::Wildcard(bounds),
            start,
            end: start,
            dot: 0,
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn kind(&self) -> &StateKind { &self.kind }
    pub fn start(&self) -> usize { self.start }
    pub fn end(&self) -> usize { self.end }
    pub fn dot(&self) -> usize { self.dot }

    pub fn body(&self) -> Option<&Arc<RuleBody>> {
        match &self.kind {
            StateKind::Rule(body) => Some(body),
            StateKind::Wildcard(_) => None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, StateKind::Wildcard(_))
    }

    pub fn is_completed(&self) -> bool {
        match &self.kind {
            StateKind::Rule(body) => self.dot >= body.terms.len(),
            StateKind::Wildcard(None) => self.dot > 0,
            StateKind::Wildcard(Some(bounds)) => bounds.contains(self.dot),
        }
    }

    /// Whether a wildcard state may consume one more token.
    pub(crate) fn can_extend(&self) -> bool {
        match &self.kind {
            StateKind::Rule(_) => false,
            StateKind::Wildcard(None) => true,
            StateKind::Wildcard(Some(bounds)) => self.dot < bounds.max,
        }
    }

    /// The term expected after the dot, if any. Wildcard pseudo-states have
    /// none: they advance by scanning alone.
    pub fn next_term(&self) -> Option<&Term> {
        match &self.kind {
            StateKind::Rule(body) => body.terms.get(self.dot),
            StateKind::Wildcard(_) => None,
        }
    }

    /// Whether completing `done` lets this state move its dot forward.
    ///
    /// A wildcard waiter only advances on a completed wildcard match, never
    /// on a completed rule: each wildcard step has to consume exactly one
    /// token for `dot` to count repetitions and for bounds to hold.
    pub(crate) fn awaits(&self, done: &TableState) -> bool {
        match (self.next_term(), &done.kind) {
            (Some(Term::NonTerminal(name)), StateKind::Rule(_)) => *name == done.name,
            (Some(Term::Wildcard(_)), StateKind::Wildcard(_)) => true,
            _ => false,
        }
    }

    /// A copy with the dot moved one symbol (or one repetition) forward.
    /// The column it is inserted into stamps its `end`.
    pub(crate) fn advanced(&self) -> TableState {
        TableState { dot: self.dot + 1, ..self.clone() }
    }
}

/// Deduplication predicate for chart columns.
///
/// Two states are the same entry when all their fields agree, except that
/// two wildcard states with the same span are always the same entry,
/// whatever their bounds. This collapses wildcard readings that differ only
/// in their bounds; the first one inserted wins.
pub fn same_entry(incoming: &TableState, present: &TableState) -> bool {
    if incoming.is_wildcard() && present.is_wildcard() {
        return incoming.start == present.start && incoming.end == present.end;
    }
    let same_kind = match (&incoming.kind, &present.kind) {
        (StateKind::Rule(a), StateKind::Rule(b)) => Arc::ptr_eq(a, b) || a == b,
        _ => false,
    };
    same_kind
        && incoming.name == present.name
        && incoming.start == present.start
        && incoming.end == present.end
        && incoming.dot == present.dot
}

#[derive(Debug, Clone)]
pub struct TableColumn {
    /// The token consumed between the previous column and this one; `None`
    /// for column 0.
    pub(crate) token: Option<Token>,
    pub(crate) index: usize,
    pub(crate) states: Vec<TableState>,
}

impl TableColumn {
    pub(crate) fn new(index: usize, token: Option<Token>) -> Self {
        TableColumn { token, index, states: Vec::new() }
    }

    pub fn index(&self) -> usize { self.index }
    pub fn token(&self) -> Option<&Token> { self.token.as_ref() }
    pub fn states(&self) -> &[TableState] { &self.states }

    pub(crate) fn token_text(&self) -> Option<&str> {
        self.token.as_ref().map(|t| &t.text[..])
    }

    /// Byte offsets of the token ending at this column; `(0, 0)` for column 0.
    pub fn byte_span(&self) -> (usize, usize) {
        self.token.as_ref().map_or((0, 0), |t| (t.start, t.end))
    }

    /// Adds `state` unless an equal entry (per [`same_entry`]) is present.
    /// Returns the position of the entry now standing for `state`, and
    /// whether the column changed.
    pub(crate) fn insert(&mut self, mut state: TableState) -> (usize, bool) {
        state.end = self.index;
        if let Some(i) = self.states.iter().position(|s| same_entry(&state, s)) {
            return (i, false);
        }
        self.states.push(state);
        (self.states.len() - 1, true)
    }
}

#[cfg(test)]
#[path = "tests/chart.rs"]
mod tests_for_chart;
