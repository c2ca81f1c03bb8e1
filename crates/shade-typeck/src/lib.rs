//! Shade type inference.
//!
//! Shader functions are written in a dynamically typed source language; the
//! targets (GLSL, C++) are statically typed. This crate closes the gap: given
//! a function's syntax tree, the types of its inputs (the injection map), and
//! the catalogue of built-in object types (the registry), it assigns a
//! semantic type to every expression and a signature to the function.
//!
//! # Architecture
//!
//! - [`ty`]: semantic types, object kinds, signatures, constant values
//! - [`registry`]: the built-in object catalogue
//! - [`inject`]: externally supplied input types
//! - [`env`]: scope stack
//! - [`annotation`]: per-node and per-function results
//! - [`typed`]: the annotated tree handed to backends
//! - [`infer`]: the recursive-descent inference engine
//! - [`error`] / [`diagnostics`]: inference errors and their rendering

pub mod annotation;
pub mod diagnostics;
pub mod env;
pub mod error;
pub mod infer;
pub mod inject;
pub mod registry;
pub mod ty;
pub mod typed;

pub use annotation::{Annotation, FunctionAnnotation};
pub use error::TypeError;
pub use infer::{infer_function, infer_program};
pub use inject::{Injected, InjectionMap};
pub use registry::{Registry, RegistryEntry, RegistryError};
pub use ty::{ConstantValue, ObjectKind, SemanticType, Signature};
pub use typed::{TypedExpr, TypedExprKind, TypedFunction, TypedProgram, TypedStmt};

/// Infer a function against the built-in registry.
pub fn infer(
    func: &shade_ast::FunctionDecl,
    injections: &InjectionMap,
) -> Result<TypedFunction, TypeError> {
    infer_function(func, injections, &Registry::builtin())
}
