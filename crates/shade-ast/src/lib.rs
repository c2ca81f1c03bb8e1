//! Syntax tree for shade shader functions.
//!
//! The shader front end is an ordinary JavaScript parser. This crate holds
//! the Rust rendering of the ESTree subset the compiler understands and a
//! loader that reads the parser's JSON output.
//!
//! - [`expr`]: expressions and operators
//! - [`stmt`]: statements, function declarations, programs
//! - [`estree`]: ESTree JSON -> syntax tree
//! - [`build`]: terse constructors, mostly for tests and embedders

pub mod build;
pub mod error;
pub mod estree;
pub mod expr;
pub mod stmt;

pub use error::EstreeError;
pub use expr::{AssignOp, BinaryOp, Expr, ExprKind, Ident, LitValue, Literal, LogicalOp, UnaryOp};
pub use stmt::{Declarator, FunctionDecl, Program, Stmt, StmtKind};
