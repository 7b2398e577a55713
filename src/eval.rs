//! Evaluation of semantic actions over a derivation tree.
//!
//! A node's action `f(a1, a2, ...)` becomes the string `f(s1, s2, ...)`,
//! where each `si` is the evaluated argument; back-references `$i` evaluate
//! the i-th child recursively, so meanings compose bottom-up. The identity
//! action `nf.I(a)` yields the evaluated `a` itself.

use thiserror::Error;

use crate::action::{Arg, ArgKind};
use crate::node::Node;

#[derive(PartialEq, Eq, Debug, Error)]
pub enum EvalError {
    #[error("identity action must have exactly one argument, found {0}")]
    Arity(usize),
    #[error("argument index {index} not in range [1, {len}]")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("invalid argument kind `{0}`")]
    InvalidArgumentKind(String),
    #[error("argument of kind {kind} cannot hold {payload}")]
    TypeMismatch { kind: ArgKind, payload: String },
}

/// The meaning representation of `node`; empty when its rule body carries
/// no action.
pub fn evaluate(node: &Node) -> Result<String, EvalError> {
    let action = match node.action() {
        Some(action) => action,
        None => return Ok(String::new()),
    };
    if action.is_identity() {
        return match &action.args[..] {
            [arg] => evaluate_arg(arg, node.children()),
            args => Err(EvalError::Arity(args.len())),
        };
    }
    let args = action.args.iter()
        .map(|arg| evaluate_arg(arg, node.children()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{}({})", action.func, args.join(", ")))
}

fn evaluate_arg(arg: &Arg, children: &[Node]) -> Result<String, EvalError> {
    match arg {
        Arg::Str(s) => Ok(format!("{:?}", s)),
        Arg::Int(i) => Ok(i.to_string()),
        Arg::Float(f) => Ok(f.to_string()),
        Arg::Func(f) => Ok(f.clone()),
        &Arg::Index(index) => {
            let len = children.len();
            if index < 1 || index as u64 > len as u64 {
                return Err(EvalError::IndexOutOfRange { index, len });
            }
            evaluate(&children[index as usize - 1])
        }
    }
}

impl Node {
    /// Shorthand for [`evaluate`].
    pub fn semantic(&self) -> Result<String, EvalError> {
        evaluate(self)
    }
}

#[cfg(test)]
#[path = "tests/eval.rs"]
mod tests_for_eval;
