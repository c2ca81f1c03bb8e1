//! Backend errors. Either one aborts the backend call that raised it.

use std::fmt;

use shade_typeck::SemanticType;

#[derive(Clone, Debug, PartialEq)]
pub enum CodegenError {
    /// A semantic type the target language has no spelling for.
    UnsupportedTargetType {
        target: &'static str,
        ty: SemanticType,
    },
    /// A float value with no literal form (NaN, infinities).
    InvalidFloatLiteral { value: f64 },
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::UnsupportedTargetType { target, ty } => {
                write!(f, "{} has no type for {}", target, ty)
            }
            CodegenError::InvalidFloatLiteral { value } => {
                write!(f, "cannot emit float literal {}", value)
            }
        }
    }
}

impl std::error::Error for CodegenError {}
