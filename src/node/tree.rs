use log::trace;

use crate::chart::{same_entry, StateKind, TableState};
use crate::earley::Parse;
use crate::grammar::Term;
use crate::node::Node;

impl Parse<'_> {
    /// Every derivation of the completed `state`, in chart order.
    pub fn trees(&self, state: &TableState) -> Vec<Node> {
        self.trees_limited(state, None)
    }

    /// The first derivation of the completed `state` found.
    pub fn tree(&self, state: &TableState) -> Option<Node> {
        self.trees_limited(state, Some(1)).pop()
    }

    pub(crate) fn trees_limited(&self, state: &TableState, limit: Option<usize>) -> Vec<Node> {
        let mut builder = TreeBuilder { parse: self, limit, active: Vec::new() };
        builder.derive(state)
    }
}

// Derivations are recovered by reading the completion relation backwards:
// working from the last symbol of a body to the first, each nonterminal is
// matched against a completed state of that name ending where the symbols to
// its right begin.
struct TreeBuilder<'p, 'g> {
    parse: &'p Parse<'g>,
    limit: Option<usize>,
    /// States being expanded on the current path. Re-entering one would only
    /// produce an infinite derivation (e.g. `A = A | ...`), so it is skipped.
    active: Vec<TableState>,
}

impl TreeBuilder<'_, '_> {
    fn full(&self, out: &[Node]) -> bool {
        self.limit.map_or(false, |limit| out.len() >= limit)
    }

    fn derive(&mut self, state: &TableState) -> Vec<Node> {
        let body = match &state.kind {
            StateKind::Rule(body) => body.clone(),
            StateKind::Wildcard(_) => return vec![Node::new(state.clone(), vec![])],
        };
        if self.active.iter().any(|s| same_entry(state, s)) {
            trace!("cutting cyclic derivation of {} at [{}, {}]", state.name, state.start, state.end);
            return vec![];
        }
        self.active.push(state.clone());
        let mut out = Vec::new();
        let terms = &body.terms[..state.dot.min(body.terms.len())];
        self.fill(state, terms, state.end, &mut Vec::new(), &mut out);
        self.active.pop();
        out
    }

    /// Matches `terms` so that they end at chart position `pos`. `suffix`
    /// holds the nodes for the symbols to the right, last symbol first.
    fn fill(&mut self, state: &TableState, terms: &[Term], pos: usize, suffix: &mut Vec<Node>, out: &mut Vec<Node>) {
        if self.full(out) {
            return;
        }
        let (term, rest) = match terms.split_last() {
            Some(split) => split,
            None => {
                if pos == state.start {
                    out.push(Node::new(state.clone(), suffix.iter().rev().cloned().collect()));
                }
                return;
            }
        };
        let parse = self.parse;
        let column = &parse.columns[pos];
        match term {
            Term::Terminal(text) => {
                let token = column.token().filter(|t| {
                    pos > state.start && t.text == *text && reaches(parse, state, rest.len(), pos - 1)
                });
                if let Some(token) = token {
                    suffix.push(Node::terminal(token.clone(), pos));
                    self.fill(state, rest, pos - 1, suffix, out);
                    suffix.pop();
                }
            }
            Term::NonTerminal(name) => {
                let candidates = column.states.iter().filter(|s| {
                    !s.is_wildcard() && s.is_completed() && s.name == *name && s.start >= state.start
                        && reaches(parse, state, rest.len(), s.start)
                });
                for candidate in candidates {
                    for child in self.derive(candidate) {
                        suffix.push(child);
                        self.fill(state, rest, candidate.start, suffix, out);
                        suffix.pop();
                        if self.full(out) {
                            return;
                        }
                    }
                }
            }
            Term::Wildcard(_) => {
                let candidates = column.states.iter().filter(|s| {
                    s.is_wildcard() && s.is_completed() && s.start >= state.start
                        && reaches(parse, state, rest.len(), s.start)
                });
                for candidate in candidates {
                    suffix.push(Node::new(candidate.clone(), vec![]));
                    self.fill(state, rest, candidate.start, suffix, out);
                    suffix.pop();
                    if self.full(out) {
                        return;
                    }
                }
            }
        }
    }
}

/// Whether the first `dot` symbols of `state`'s body can span
/// `state.start..pos`, i.e. whether column `pos` holds `state` with its dot
/// there. Splits failing this yield no derivation.
fn reaches(parse: &Parse, state: &TableState, dot: usize, pos: usize) -> bool {
    parse.columns[pos].states.iter().any(|s| {
        s.dot == dot && s.start == state.start && s.name == state.name && s.kind == state.kind
    })
}
