//! Earley recognition of token sequences against context-free grammars,
//! followed by evaluation of the semantic actions attached to the rules into
//! a meaning-representation string.
//!
//! ```text
//! <list>  = "<" <items> ">" {nf.I($2)} ;
//! <items> = <items> " " <item> {sum($1, $3)} | <item> {nf.I($1)} ;
//! <item>  = "bar" {nf.I("bar")} | "baz" {nf.I("baz")} ;
//! ```
//!
//! Parsing `< bar baz >` (tokenized as `<`, `bar`, ` `, `baz`, `>`) from
//! `list` yields the meaning `sum("bar", "baz")`.
//!
//! The pipeline is: [`Parse::new`] lays out one chart column per token
//! boundary, [`Parse::run`] fills the chart and returns the accepting states,
//! [`Parse::trees`] recovers the derivations of an accepting state, and
//! [`evaluate`] turns a derivation into its meaning. [`Parse::meanings`] does
//! all of it at once.
//!
//! Grammars and tokens come from outside: this crate neither reads grammar
//! notation nor tokenizes text.

pub mod action;
pub mod chart;
mod display;
pub mod earley;
pub mod eval;
pub mod grammar;
pub mod node;
pub mod options;
pub mod rendering;

pub use action::{Action, Arg, ArgKind, Payload};
pub use chart::{TableColumn, TableState};
pub use earley::Parse;
pub use eval::{evaluate, EvalError};
pub use grammar::{Bounds, Grammar, GrammarError, Rule, RuleBody, Term};
pub use node::{Node, NodeValue};
pub use options::{MatchMode, ParseOptions};

/// One input token: its text and the byte offsets it occupies in the source.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Token { text: text.into(), start, end }
    }
}
