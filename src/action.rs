//! Semantic actions attached to rule bodies.
//!
//! An action is a function name plus an argument list, written in grammar
//! notation as `{sum($1, $3)}`. Evaluating it over a derivation (see
//! [`crate::eval`]) produces a nested function-call expression string.

use bigdecimal::BigDecimal;
use derive_more::{Display, From};
use num_bigint::BigInt;

use crate::eval::EvalError;

/// Function name of the pass-through action: forwards its single argument
/// unchanged, without wrapping it in a call.
pub const IDENTITY: &str = "nf.I";

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Action {
    pub(crate) func: String,
    pub(crate) args: Vec<Arg>,
}

impl Action {
    pub fn new(func: impl Into<String>, args: Vec<Arg>) -> Self {
        Action { func: func.into(), args }
    }

    /// `nf.I(arg)`
    pub fn identity(arg: Arg) -> Self {
        Action::new(IDENTITY, vec![arg])
    }

    pub fn func(&self) -> &str { &self.func }
    pub fn args(&self) -> &[Arg] { &self.args }

    pub fn is_identity(&self) -> bool { self.func == IDENTITY }
}

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum Arg {
    /// Emitted as a quoted string literal.
    Str(String),
    Int(BigInt),
    Float(BigDecimal),
    /// Emitted verbatim, as a bare function reference.
    Func(String),
    /// One-based back-reference to a child of the node being evaluated.
    Index(i64),
}

impl Arg {
    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Str(_) => ArgKind::Str,
            Arg::Int(_) => ArgKind::Int,
            Arg::Float(_) => ArgKind::Float,
            Arg::Func(_) => ArgKind::Func,
            Arg::Index(_) => ArgKind::Index,
        }
    }

    /// Builds an argument from a kind tag and an untyped payload, as handed
    /// over by a grammar compiler. Fails if the tag is unknown or the payload
    /// does not fit the kind.
    pub fn from_tagged(kind: &str, payload: Payload) -> Result<Arg, EvalError> {
        let kind: ArgKind = kind.parse()?;
        match (kind, payload) {
            (ArgKind::Str, Payload::Text(s)) => Ok(Arg::Str(s)),
            (ArgKind::Func, Payload::Text(s)) => Ok(Arg::Func(s)),
            (ArgKind::Int, Payload::Int(i)) => Ok(Arg::Int(i)),
            (ArgKind::Float, Payload::Float(f)) => Ok(Arg::Float(f)),
            (ArgKind::Index, Payload::Index(i)) => Ok(Arg::Index(i)),
            (kind, payload) => Err(EvalError::TypeMismatch { kind, payload: payload.to_string() }),
        }
    }
}

impl From<&str> for Arg { fn from(s: &str) -> Arg { Arg::Str(s.into()) } }
impl From<String> for Arg { fn from(s: String) -> Arg { Arg::Str(s) } }
impl From<BigInt> for Arg { fn from(i: BigInt) -> Arg { Arg::Int(i) } }
impl From<BigDecimal> for Arg { fn from(f: BigDecimal) -> Arg { Arg::Float(f) } }

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
pub enum ArgKind {
    #[display(fmt = "string")]
    Str,
    #[display(fmt = "int")]
    Int,
    #[display(fmt = "float")]
    Float,
    #[display(fmt = "func")]
    Func,
    #[display(fmt = "index")]
    Index,
}

impl std::str::FromStr for ArgKind {
    type Err = EvalError;
    fn from_str(s: &str) -> Result<ArgKind, EvalError> {
        match s {
            "string" => Ok(ArgKind::Str),
            "int" => Ok(ArgKind::Int),
            "float" => Ok(ArgKind::Float),
            "func" => Ok(ArgKind::Func),
            "index" => Ok(ArgKind::Index),
            other => Err(EvalError::InvalidArgumentKind(other.to_string())),
        }
    }
}

/// Untyped argument value, before it has been checked against its kind tag.
#[derive(PartialEq, Eq, Clone, Debug, Display, From)]
pub enum Payload {
    #[display(fmt = "text {:?}", _0)]
    Text(String),
    #[display(fmt = "integer {}", _0)]
    Int(BigInt),
    #[display(fmt = "float {}", _0)]
    Float(BigDecimal),
    #[display(fmt = "index {}", _0)]
    Index(i64),
}
