use crate::action::{Action, Arg};
use crate::chart::{StateKind, TableState, DOT};
use crate::grammar::{Bounds, Grammar, Rule, RuleBody, Term};
use crate::node::{Node, NodeValue};

impl std::fmt::Display for Bounds {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(w, "{{{},{}}}", self.min, self.max)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Term::Terminal(text) => write!(w, "{:?}", text),
            Term::NonTerminal(name) => write!(w, "<{}>", name),
            Term::Wildcard(None) => write!(w, "(any)"),
            Term::Wildcard(Some(bounds)) => write!(w, "(any){}", bounds),
        }
    }
}

impl std::fmt::Display for Arg {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Arg::Str(s) => write!(w, "{:?}", s),
            Arg::Int(i) => write!(w, "{}", i),
            Arg::Float(f) => write!(w, "{}", f),
            Arg::Func(f) => write!(w, "{}", f),
            Arg::Index(i) => write!(w, "${}", i),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(w, "{}(", self.func)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 { write!(w, ", ")?; }
            write!(w, "{}", arg)?;
        }
        write!(w, ")")
    }
}

// empty bodies render as `ε` so a rule never ends in a bare `=` or `|`
impl std::fmt::Display for RuleBody {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.terms.is_empty() {
            write!(w, "\u{03B5}")?;
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 { write!(w, " ")?; }
            write!(w, "{}", term)?;
        }
        match &self.action {
            Some(action) => write!(w, " {{{}}}", action),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(w, "<{}> =", self.name)?;
        for (i, body) in self.bodies.iter().enumerate() {
            if i > 0 { write!(w, " |")?; }
            write!(w, " {}", body)?;
        }
        write!(w, " ;")
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rule in self.rules() {
            writeln!(w, "{}", rule)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for TableState {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.kind {
            StateKind::Rule(body) => {
                write!(w, "{} ->", self.name)?;
                for (i, term) in body.terms.iter().enumerate() {
                    if i == self.dot { write!(w, " {}", DOT)?; }
                    write!(w, " {}", term)?;
                }
                if self.dot >= body.terms.len() { write!(w, " {}", DOT)?; }
            }
            StateKind::Wildcard(bounds) => {
                write!(w, "{} -> ", self.name)?;
                match bounds {
                    Some(bounds) => write!(w, "(any){}", bounds)?,
                    None => write!(w, "(any)")?,
                }
                write!(w, " x{}", self.dot)?;
            }
        }
        write!(w, " [{}, {}]", self.start, self.end)
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.value {
            NodeValue::Terminal { token, .. } => return write!(w, "{:?}", token.text),
            NodeValue::State(state) if state.is_wildcard() => {
                return write!(w, "{}[{}, {}]", state.name, state.start, state.end);
            }
            NodeValue::State(state) => write!(w, "{}", state.name)?,
        }
        write!(w, "(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 { write!(w, " ")?; }
            write!(w, "{}", child)?;
        }
        write!(w, ")")
    }
}
