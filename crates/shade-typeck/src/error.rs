//! Inference errors.
//!
//! Inference stops at the first failure. Each error names the construct that
//! failed and carries the span of the failing node when the syntax tree had
//! one.

use std::fmt;

use shade_common::Span;

use crate::ty::{ObjectKind, SemanticType};

#[derive(Clone, Debug, PartialEq)]
pub enum TypeError {
    /// A free identifier that is not a local, not injected, and not a
    /// registry global.
    UnresolvedIdentifier { name: String, span: Option<Span> },
    /// A member the object's registry entry (or the injection map) does not
    /// define.
    UnknownMember {
        object: SemanticType,
        member: String,
        span: Option<Span>,
    },
    /// `new X(...)` where `X` is not a constructible registry entry.
    UnknownConstructor { name: String, span: Option<Span> },
    ArgumentTypeMismatch {
        callee: String,
        index: usize,
        expected: SemanticType,
        found: SemanticType,
        span: Option<Span>,
    },
    ArityMismatch {
        callee: String,
        min: usize,
        max: usize,
        found: usize,
        span: Option<Span>,
    },
    /// A call whose callee is not a method reference.
    NotCallable {
        callee: String,
        ty: SemanticType,
        span: Option<Span>,
    },
    /// Two different object kinds meet in one operator.
    IncompatibleOperandKinds {
        op: String,
        left: ObjectKind,
        right: ObjectKind,
        span: Option<Span>,
    },
    /// An operand type the operator has no rule for.
    InvalidOperand {
        op: String,
        ty: SemanticType,
        span: Option<Span>,
    },
    BranchTypeMismatch {
        consequent: SemanticType,
        alternate: SemanticType,
        span: Option<Span>,
    },
    AssignmentTypeMismatch {
        target: String,
        expected: SemanticType,
        found: SemanticType,
        span: Option<Span>,
    },
    InvalidAssignmentTarget { kind: String, span: Option<Span> },
    /// A `var` that no initializer, injection, or assignment gave a type.
    UntypedDeclaration { name: String, span: Option<Span> },
    UntypedParameter {
        function: String,
        name: String,
        span: Option<Span>,
    },
    ReturnTypeMismatch {
        function: String,
        first: SemanticType,
        second: SemanticType,
        span: Option<Span>,
    },
    /// A syntax form outside the shader subset.
    UnsupportedSyntax { kind: String, span: Option<Span> },
}

impl TypeError {
    pub fn span(&self) -> Option<Span> {
        match self {
            TypeError::UnresolvedIdentifier { span, .. }
            | TypeError::UnknownMember { span, .. }
            | TypeError::UnknownConstructor { span, .. }
            | TypeError::ArgumentTypeMismatch { span, .. }
            | TypeError::ArityMismatch { span, .. }
            | TypeError::NotCallable { span, .. }
            | TypeError::IncompatibleOperandKinds { span, .. }
            | TypeError::InvalidOperand { span, .. }
            | TypeError::BranchTypeMismatch { span, .. }
            | TypeError::AssignmentTypeMismatch { span, .. }
            | TypeError::InvalidAssignmentTarget { span, .. }
            | TypeError::UntypedDeclaration { span, .. }
            | TypeError::UntypedParameter { span, .. }
            | TypeError::ReturnTypeMismatch { span, .. }
            | TypeError::UnsupportedSyntax { span, .. } => *span,
        }
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            TypeError::UnresolvedIdentifier { .. } => "S0001",
            TypeError::UnknownMember { .. } => "S0002",
            TypeError::UnknownConstructor { .. } => "S0003",
            TypeError::ArgumentTypeMismatch { .. } => "S0004",
            TypeError::ArityMismatch { .. } => "S0005",
            TypeError::NotCallable { .. } => "S0006",
            TypeError::IncompatibleOperandKinds { .. } => "S0007",
            TypeError::InvalidOperand { .. } => "S0008",
            TypeError::BranchTypeMismatch { .. } => "S0009",
            TypeError::AssignmentTypeMismatch { .. } => "S0010",
            TypeError::InvalidAssignmentTarget { .. } => "S0011",
            TypeError::UntypedDeclaration { .. } => "S0012",
            TypeError::UntypedParameter { .. } => "S0013",
            TypeError::ReturnTypeMismatch { .. } => "S0014",
            TypeError::UnsupportedSyntax { .. } => "S0015",
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::UnresolvedIdentifier { name, .. } => {
                write!(f, "cannot resolve identifier `{}`", name)
            }
            TypeError::UnknownMember { object, member, .. } => {
                write!(f, "`{}` has no member `{}`", object, member)
            }
            TypeError::UnknownConstructor { name, .. } => {
                write!(f, "`{}` is not a known constructor", name)
            }
            TypeError::ArgumentTypeMismatch {
                callee,
                index,
                expected,
                found,
                ..
            } => write!(
                f,
                "argument {} of `{}`: expected {}, found {}",
                index + 1,
                callee,
                expected,
                found
            ),
            TypeError::ArityMismatch {
                callee,
                min,
                max,
                found,
                ..
            } => {
                if min == max {
                    write!(
                        f,
                        "`{}` takes {} argument(s), found {}",
                        callee, min, found
                    )
                } else {
                    write!(
                        f,
                        "`{}` takes {} to {} arguments, found {}",
                        callee, min, max, found
                    )
                }
            }
            TypeError::NotCallable { callee, ty, .. } => {
                write!(f, "`{}` of type {} is not callable", callee, ty)
            }
            TypeError::IncompatibleOperandKinds {
                op, left, right, ..
            } => write!(
                f,
                "operator `{}` cannot combine Object({}) with Object({})",
                op, left, right
            ),
            TypeError::InvalidOperand { op, ty, .. } => {
                write!(f, "operator `{}` cannot be applied to {}", op, ty)
            }
            TypeError::BranchTypeMismatch {
                consequent,
                alternate,
                ..
            } => write!(
                f,
                "conditional branches disagree: {} vs {}",
                consequent, alternate
            ),
            TypeError::AssignmentTypeMismatch {
                target,
                expected,
                found,
                ..
            } => write!(
                f,
                "cannot assign {} to `{}` of type {}",
                found, target, expected
            ),
            TypeError::InvalidAssignmentTarget { kind, .. } => {
                write!(f, "cannot assign to a {}", kind)
            }
            TypeError::UntypedDeclaration { name, .. } => {
                write!(f, "variable `{}` is never given a type", name)
            }
            TypeError::UntypedParameter { function, name, .. } => write!(
                f,
                "parameter `{}` of `{}` has no injected type",
                name, function
            ),
            TypeError::ReturnTypeMismatch {
                function,
                first,
                second,
                ..
            } => write!(
                f,
                "`{}` returns both {} and {}",
                function, first, second
            ),
            TypeError::UnsupportedSyntax { kind, .. } => {
                write!(f, "unsupported syntax: {}", kind)
            }
        }
    }
}

impl std::error::Error for TypeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_construct() {
        let err = TypeError::ReturnTypeMismatch {
            function: "shade".into(),
            first: SemanticType::Object(ObjectKind::Color),
            second: SemanticType::Object(ObjectKind::Float3),
            span: Some(Span::new(40, 52)),
        };
        assert_eq!(
            err.to_string(),
            "`shade` returns both Object(Color) and Object(Float3)"
        );
        assert_eq!(err.code(), "S0014");
        assert_eq!(err.span(), Some(Span::new(40, 52)));

        let err = TypeError::ArityMismatch {
            callee: "Color".into(),
            min: 3,
            max: 4,
            found: 1,
            span: None,
        };
        assert_eq!(err.to_string(), "`Color` takes 3 to 4 arguments, found 1");
    }
}
