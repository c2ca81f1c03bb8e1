//! Statements, function declarations and programs.

use shade_common::Span;

use crate::expr::{Expr, Ident};

/// A statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `var a = 1, b;` -- one statement, several declarators.
    VarDecl(Vec<Declarator>),
    Expr(Expr),
    Return(Option<Expr>),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    Block(Vec<Stmt>),
    /// Any ESTree statement outside the shader subset (loops, nested
    /// functions, ...), kept by name so that inference can report it.
    Unsupported { kind: String },
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Stmt { kind, span: None }
    }

    pub fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    /// The ESTree node type this statement was loaded from.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            StmtKind::VarDecl(_) => "VariableDeclaration",
            StmtKind::Expr(_) => "ExpressionStatement",
            StmtKind::Return(_) => "ReturnStatement",
            StmtKind::If { .. } => "IfStatement",
            StmtKind::Block(_) => "BlockStatement",
            StmtKind::Unsupported { kind } => kind,
        }
    }
}

/// One `name [= init]` entry of a variable declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Declarator {
    pub name: Ident,
    pub init: Option<Expr>,
    pub span: Option<Span>,
}

/// A shader function: `function shade(env) { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Vec<Stmt>,
    pub span: Option<Span>,
}

/// A compilation unit: the function declarations of one parsed file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub functions: Vec<FunctionDecl>,
    pub span: Option<Span>,
}

impl Program {
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name.name == name)
    }
}
