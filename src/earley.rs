//! Earley chart construction: gradually build, from left to right, the set of
//! dotted states ending at each input position.
//!
//! Every start symbol S gets an augmented rule `Γ → S` primed into column 0,
//! so one sweep can accept several top-level categories. Columns are settled
//! strictly in order: column `i+1` only ever receives states scanned out of a
//! settled column `i`.

use std::sync::Arc;

use log::{debug, trace};

use crate::action::{Action, Arg};
use crate::chart::{StateKind, TableColumn, TableState, GAMMA_RULE};
use crate::eval::{evaluate, EvalError};
use crate::grammar::{Grammar, RuleBody, Term};
use crate::options::{MatchMode, ParseOptions};
use crate::Token;

#[derive(Debug)]
pub struct Parse<'g> {
    grammars: Vec<&'g Grammar>,
    source: Option<&'g str>,
    starts: Vec<String>,
    pub(crate) columns: Vec<TableColumn>,
    accepted: Vec<TableState>,
}

impl<'g> Parse<'g> {
    /// Builds the chart for `tokens` (one column per boundary) and primes
    /// column 0 with the augmented rule of every start symbol.
    pub fn new<S: Into<String>>(
        grammars: impl IntoIterator<Item=&'g Grammar>,
        tokens: impl IntoIterator<Item=Token>,
        starts: impl IntoIterator<Item=S>,
    ) -> Self {
        let mut columns = vec![TableColumn::new(0, None)];
        for token in tokens {
            let index = columns.len();
            columns.push(TableColumn::new(index, Some(token)));
        }
        let starts: Vec<String> = starts.into_iter().map(Into::into).collect();
        for start in &starts {
            let body = RuleBody::new(vec![Term::NonTerminal(start.clone())])
                .with_action(Action::identity(Arg::Index(1)));
            columns[0].insert(TableState::rule(GAMMA_RULE, Arc::new(body), 0));
        }
        Parse {
            grammars: grammars.into_iter().collect(),
            source: None,
            starts,
            columns,
            accepted: Vec::new(),
        }
    }

    /// Remembers the text the tokens' byte offsets point into, enabling
    /// [`Parse::span_text`].
    pub fn with_source(mut self, source: &'g str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn columns(&self) -> &[TableColumn] { &self.columns }
    pub fn starts(&self) -> &[String] { &self.starts }

    /// The accepting states found by the last [`Parse::run`].
    pub fn accepted(&self) -> &[TableState] { &self.accepted }

    /// Source text covered by the chart positions `start..end`, if the chart
    /// was given its source.
    pub fn span_text(&self, start: usize, end: usize) -> Option<&'g str> {
        let source = self.source?;
        if end >= self.columns.len() {
            return None;
        }
        if start >= end {
            return Some("");
        }
        let from = self.columns[start + 1].byte_span().0;
        let to = self.columns[end].byte_span().1;
        source.get(from..to)
    }

    /// Fills the chart and returns the completed `Γ` states. Any column may
    /// accept, so prefix parses are reported too. With [`MatchMode::First`]
    /// only the rightmost accepting column is reported.
    pub fn run(&mut self, mode: MatchMode) -> Vec<TableState> {
        if self.starts.is_empty() {
            self.accepted.clear();
            return Vec::new();
        }
        debug!("parsing {} tokens for start symbols {:?}", self.columns.len() - 1, self.starts);

        for i in 0..self.columns.len() {
            self.settle(i);
            trace!("column {}: {} states", i, self.columns[i].states.len());
        }

        let mut accepted = Vec::new();
        for column in self.columns.iter().rev() {
            accepted.extend(column.states.iter()
                .filter(|s| s.name == GAMMA_RULE && s.is_completed())
                .cloned());
            if mode == MatchMode::First && !accepted.is_empty() {
                break;
            }
        }
        debug!("{} accepting states ({} mode)", accepted.len(), mode);
        self.accepted = accepted.clone();
        accepted
    }

    /// Runs the whole pipeline: fills the chart, extracts derivations from
    /// the accepting states and evaluates each one.
    pub fn meanings(&mut self, options: &ParseOptions) -> Result<Vec<String>, EvalError> {
        let accepted = self.run(options.mode);
        let limit = options.tree_limit();
        let mut out = Vec::new();
        for state in &accepted {
            for node in self.trees_limited(state, limit) {
                out.push(evaluate(&node)?);
            }
            if options.mode == MatchMode::First && !out.is_empty() {
                break;
            }
        }
        Ok(out)
    }

    // The state list of a column doubles as its work-list: states appended
    // while it is being walked are visited in the same pass. The epsilon
    // closure then catches completions the single pass misses, and anything
    // it adds goes back through the work-list.
    fn settle(&mut self, i: usize) {
        let mut cursor = 0;
        loop {
            while cursor < self.columns[i].states.len() {
                let state = self.columns[i].states[cursor].clone();
                self.process(i, &state);
                cursor += 1;
            }
            self.close_epsilons(i);
            if cursor == self.columns[i].states.len() {
                break;
            }
        }
    }

    fn process(&mut self, i: usize, state: &TableState) {
        let has_next = i + 1 < self.columns.len();
        match &state.kind {
            StateKind::Wildcard(bounds) => {
                if state.is_completed() {
                    self.complete(i, state);
                }
                if has_next && state.can_extend() {
                    self.scan(i + 1, state, &Term::Wildcard(*bounds));
                }
            }
            StateKind::Rule(_) => {
                match state.next_term() {
                    None => { self.complete(i, state); }
                    Some(term @ (Term::NonTerminal(_) | Term::Wildcard(_))) => {
                        self.predict(i, term);
                    }
                    Some(term @ Term::Terminal(_)) => {
                        if has_next {
                            self.scan(i + 1, state, term);
                        }
                    }
                }
            }
        }
    }

    fn close_epsilons(&mut self, i: usize) {
        loop {
            let mut changed = false;
            let mut j = 0;
            while j < self.columns[i].states.len() {
                let state = self.columns[i].states[j].clone();
                if state.is_completed() {
                    changed |= self.complete(i, &state);
                }
                if let Some(term @ Term::NonTerminal(_)) = state.next_term() {
                    changed |= self.predict(i, term);
                }
                j += 1;
            }
            if !changed {
                break;
            }
        }
    }

    /// Seeds column `i` with fresh states for `term`: every body of the
    /// named rule in every grammar, or a single wildcard state. Nonterminals
    /// no grammar defines predict nothing. Returns whether the column changed.
    fn predict(&mut self, i: usize, term: &Term) -> bool {
        let mut changed = false;
        match term {
            Term::NonTerminal(name) => {
                for g in &self.grammars {
                    let rule = match g.rule(name) {
                        Some(rule) => rule,
                        None => continue,
                    };
                    for body in &rule.bodies {
                        let state = TableState::rule(&rule.name[..], body.clone(), i);
                        changed |= self.columns[i].insert(state).1;
                    }
                }
            }
            Term::Wildcard(bounds) => {
                changed |= self.columns[i].insert(TableState::wildcard(*bounds, i)).1;
            }
            Term::Terminal(_) => {}
        }
        changed
    }

    /// Moves `state` over `term` into column `next`. A wildcard consumes the
    /// token whatever it is; a terminal only if its text is identical.
    fn scan(&mut self, next: usize, state: &TableState, term: &Term) -> bool {
        let matches = match term {
            Term::Wildcard(_) => true,
            Term::Terminal(text) => self.columns[next].token_text() == Some(&text[..]),
            Term::NonTerminal(_) => false,
        };
        matches && self.columns[next].insert(state.advanced()).1
    }

    /// `done` spans `done.start..i`; every state in column `done.start`
    /// waiting for it moves forward into column `i`.
    fn complete(&mut self, i: usize, done: &TableState) -> bool {
        let advanced: Vec<TableState> = self.columns[done.start].states.iter()
            .filter(|waiting| waiting.awaits(done))
            .map(TableState::advanced)
            .collect();
        let mut changed = false;
        for state in advanced {
            changed |= self.columns[i].insert(state).1;
        }
        changed
    }
}

#[cfg(test)]
#[path = "tests/earley.rs"]
mod tests_for_earley;
