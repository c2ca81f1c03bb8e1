//! The annotated syntax tree produced by inference.
//!
//! Every expression node owns exactly one [`Annotation`], so a tree that
//! exists is a tree that is fully annotated. Backends consume this tree and
//! never consult the type environment again.

use shade_ast::{AssignOp, BinaryOp, LitValue, LogicalOp, UnaryOp};
use shade_common::Span;

use crate::annotation::{Annotation, FunctionAnnotation};
use crate::ty::SemanticType;

/// All functions of a program, in source order.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedProgram {
    pub functions: Vec<TypedFunction>,
}

impl TypedProgram {
    pub fn function(&self, name: &str) -> Option<&TypedFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypedParam {
    pub name: String,
    pub ty: SemanticType,
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypedFunction {
    pub name: String,
    pub params: Vec<TypedParam>,
    pub body: Vec<TypedStmt>,
    pub return_type: SemanticType,
    pub span: Option<Span>,
}

impl TypedFunction {
    pub fn annotation(&self) -> FunctionAnnotation {
        FunctionAnnotation {
            name: self.name.clone(),
            params: self
                .params
                .iter()
                .map(|p| (p.name.clone(), p.ty.clone()))
                .collect(),
            return_type: self.return_type.clone(),
        }
    }

    /// Every expression in the body, outermost first, in source order.
    pub fn expressions(&self) -> Vec<&TypedExpr> {
        let mut out = Vec::new();
        for stmt in &self.body {
            stmt.collect_expressions(&mut out);
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypedStmt {
    VarDecl(Vec<TypedDeclarator>),
    Expr(TypedExpr),
    Return(Option<TypedExpr>),
    If {
        test: TypedExpr,
        consequent: Vec<TypedStmt>,
        alternate: Option<Vec<TypedStmt>>,
    },
    Block(Vec<TypedStmt>),
}

impl TypedStmt {
    /// The ESTree node type this statement was inferred from.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypedStmt::VarDecl(_) => "VariableDeclaration",
            TypedStmt::Expr(_) => "ExpressionStatement",
            TypedStmt::Return(_) => "ReturnStatement",
            TypedStmt::If { .. } => "IfStatement",
            TypedStmt::Block(_) => "BlockStatement",
        }
    }

    fn collect_expressions<'a>(&'a self, out: &mut Vec<&'a TypedExpr>) {
        match self {
            TypedStmt::VarDecl(decls) => {
                for decl in decls {
                    if let Some(init) = &decl.init {
                        init.collect(out);
                    }
                }
            }
            TypedStmt::Expr(expr) | TypedStmt::Return(Some(expr)) => expr.collect(out),
            TypedStmt::Return(None) => {}
            TypedStmt::If {
                test,
                consequent,
                alternate,
            } => {
                test.collect(out);
                for stmt in consequent.iter().chain(alternate.iter().flatten()) {
                    stmt.collect_expressions(out);
                }
            }
            TypedStmt::Block(body) => {
                for stmt in body {
                    stmt.collect_expressions(out);
                }
            }
        }
    }
}

/// One `name = init` of a `var` statement. The annotation is the type the
/// binding settled on, which for an uninitialized slot is the type of its
/// first assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedDeclarator {
    pub name: String,
    pub init: Option<TypedExpr>,
    pub annotation: Annotation,
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub annotation: Annotation,
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypedExprKind {
    Literal(LitValue),
    Ident(String),
    Member {
        object: Box<TypedExpr>,
        property: String,
    },
    Call {
        callee: Box<TypedExpr>,
        args: Vec<TypedExpr>,
    },
    /// `new Color(...)`, resolved to its registry entry name.
    New {
        constructor: String,
        args: Vec<TypedExpr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Assign {
        op: AssignOp,
        target: Box<TypedExpr>,
        value: Box<TypedExpr>,
    },
    Conditional {
        test: Box<TypedExpr>,
        consequent: Box<TypedExpr>,
        alternate: Box<TypedExpr>,
    },
    Unary {
        op: UnaryOp,
        argument: Box<TypedExpr>,
    },
}

impl TypedExpr {
    pub fn ty(&self) -> &SemanticType {
        &self.annotation.ty
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            TypedExprKind::Literal(_) => "Literal",
            TypedExprKind::Ident(_) => "Identifier",
            TypedExprKind::Member { .. } => "MemberExpression",
            TypedExprKind::Call { .. } => "CallExpression",
            TypedExprKind::New { .. } => "NewExpression",
            TypedExprKind::Binary { .. } => "BinaryExpression",
            TypedExprKind::Logical { .. } => "LogicalExpression",
            TypedExprKind::Assign { .. } => "AssignmentExpression",
            TypedExprKind::Conditional { .. } => "ConditionalExpression",
            TypedExprKind::Unary { .. } => "UnaryExpression",
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a TypedExpr>) {
        out.push(self);
        match &self.kind {
            TypedExprKind::Literal(_) | TypedExprKind::Ident(_) => {}
            TypedExprKind::Member { object, .. } => object.collect(out),
            TypedExprKind::Call { callee, args } => {
                callee.collect(out);
                for arg in args {
                    arg.collect(out);
                }
            }
            TypedExprKind::New { args, .. } => {
                for arg in args {
                    arg.collect(out);
                }
            }
            TypedExprKind::Binary { left, right, .. }
            | TypedExprKind::Logical { left, right, .. } => {
                left.collect(out);
                right.collect(out);
            }
            TypedExprKind::Assign { target, value, .. } => {
                target.collect(out);
                value.collect(out);
            }
            TypedExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                test.collect(out);
                consequent.collect(out);
                alternate.collect(out);
            }
            TypedExprKind::Unary { argument, .. } => argument.collect(out),
        }
    }
}
