use std::fmt;

use shade_common::Span;

/// An error raised while reading ESTree JSON.
///
/// These describe a malformed parser output, not a badly typed shader; the
/// latter is reported by the type checker.
#[derive(Clone, Debug, PartialEq)]
pub enum EstreeError {
    /// The input is not valid JSON.
    InvalidJson(String),
    /// A JSON value where a node was expected has no `type` field.
    NotANode { found: String },
    /// A node lacks a field its type requires.
    MissingField {
        node: String,
        field: &'static str,
        span: Option<Span>,
    },
    /// A node field holds the wrong kind of value.
    InvalidField {
        node: String,
        field: &'static str,
        expected: &'static str,
        span: Option<Span>,
    },
    /// An operator outside the shader subset (`<<`, `typeof`, ...).
    UnsupportedOperator {
        node: String,
        operator: String,
        span: Option<Span>,
    },
    /// A top-level statement that is not a function declaration.
    UnexpectedTopLevel { kind: String, span: Option<Span> },
}

impl EstreeError {
    pub fn span(&self) -> Option<Span> {
        match self {
            EstreeError::InvalidJson(_) | EstreeError::NotANode { .. } => None,
            EstreeError::MissingField { span, .. }
            | EstreeError::InvalidField { span, .. }
            | EstreeError::UnsupportedOperator { span, .. }
            | EstreeError::UnexpectedTopLevel { span, .. } => *span,
        }
    }
}

impl fmt::Display for EstreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstreeError::InvalidJson(msg) => write!(f, "invalid ESTree JSON: {}", msg),
            EstreeError::NotANode { found } => {
                write!(f, "expected an ESTree node, found {}", found)
            }
            EstreeError::MissingField { node, field, .. } => {
                write!(f, "`{}` node is missing field `{}`", node, field)
            }
            EstreeError::InvalidField {
                node,
                field,
                expected,
                ..
            } => {
                write!(f, "field `{}` of `{}` must be {}", field, node, expected)
            }
            EstreeError::UnsupportedOperator { node, operator, .. } => {
                write!(f, "unsupported operator `{}` in `{}`", operator, node)
            }
            EstreeError::UnexpectedTopLevel { kind, .. } => {
                write!(
                    f,
                    "only function declarations may appear at top level, found `{}`",
                    kind
                )
            }
        }
    }
}

impl std::error::Error for EstreeError {}
