//! Terse syntax tree constructors.
//!
//! Nodes built here carry no spans. Numeric literals get raw text the way a
//! parser would record it, so `int(5)` is integral and `num(5.0)` is not.

use crate::expr::{
    AssignOp, BinaryOp, Expr, ExprKind, Ident, LitValue, Literal, LogicalOp, UnaryOp,
};
use crate::stmt::{Declarator, FunctionDecl, Program, Stmt, StmtKind};

pub fn ident(name: &str) -> Expr {
    Expr::new(ExprKind::Ident(name.to_string()))
}

/// An integer literal, e.g. `5`.
pub fn int(value: i64) -> Expr {
    Expr::new(ExprKind::Literal(Literal {
        value: LitValue::Number(value as f64),
        raw: Some(value.to_string()),
    }))
}

/// A fractional literal, e.g. `0.5` or `1.0`.
pub fn num(value: f64) -> Expr {
    let mut raw = value.to_string();
    if !raw.contains(['.', 'e', 'E']) && value.is_finite() {
        raw.push_str(".0");
    }
    Expr::new(ExprKind::Literal(Literal {
        value: LitValue::Number(value),
        raw: Some(raw),
    }))
}

pub fn string(value: &str) -> Expr {
    Expr::new(ExprKind::Literal(Literal {
        value: LitValue::String(value.to_string()),
        raw: None,
    }))
}

pub fn boolean(value: bool) -> Expr {
    Expr::new(ExprKind::Literal(Literal {
        value: LitValue::Bool(value),
        raw: None,
    }))
}

/// `object.property`
pub fn member(object: Expr, property: &str) -> Expr {
    Expr::new(ExprKind::Member {
        object: Box::new(object),
        property: Ident::new(property),
    })
}

/// A dotted member chain: `path("env.texCoord.x")`.
pub fn path(dotted: &str) -> Expr {
    let mut parts = dotted.split('.');
    let root = ident(parts.next().unwrap_or_default());
    parts.fold(root, member)
}

pub fn index(object: Expr, idx: Expr) -> Expr {
    Expr::new(ExprKind::Index {
        object: Box::new(object),
        index: Box::new(idx),
    })
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Call {
        callee: Box::new(callee),
        args,
    })
}

pub fn new(constructor: &str, args: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::New {
        callee: Box::new(ident(constructor)),
        args,
    })
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::new(ExprKind::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
    Expr::new(ExprKind::Logical {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn assign(target: Expr, value: Expr) -> Expr {
    assign_op(AssignOp::Assign, target, value)
}

pub fn assign_op(op: AssignOp, target: Expr, value: Expr) -> Expr {
    Expr::new(ExprKind::Assign {
        op,
        target: Box::new(target),
        value: Box::new(value),
    })
}

pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
    Expr::new(ExprKind::Conditional {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    })
}

pub fn unary(op: UnaryOp, argument: Expr) -> Expr {
    Expr::new(ExprKind::Unary {
        op,
        argument: Box::new(argument),
    })
}

// ── Statements ─────────────────────────────────────────────────────────

/// `var name = init;`
pub fn var(name: &str, init: Expr) -> Stmt {
    vars(vec![(name, Some(init))])
}

/// `var a = x, b;` -- several declarators in one statement.
pub fn vars(declarators: Vec<(&str, Option<Expr>)>) -> Stmt {
    Stmt::new(StmtKind::VarDecl(
        declarators
            .into_iter()
            .map(|(name, init)| Declarator {
                name: Ident::new(name),
                init,
                span: None,
            })
            .collect(),
    ))
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::new(StmtKind::Expr(expr))
}

pub fn ret(expr: Expr) -> Stmt {
    Stmt::new(StmtKind::Return(Some(expr)))
}

pub fn ret_void() -> Stmt {
    Stmt::new(StmtKind::Return(None))
}

pub fn block(body: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::Block(body))
}

pub fn if_(test: Expr, consequent: Vec<Stmt>, alternate: Option<Vec<Stmt>>) -> Stmt {
    Stmt::new(StmtKind::If {
        test,
        consequent: Box::new(block(consequent)),
        alternate: alternate.map(|body| Box::new(block(body))),
    })
}

pub fn function(name: &str, params: &[&str], body: Vec<Stmt>) -> FunctionDecl {
    FunctionDecl {
        name: Ident::new(name),
        params: params.iter().map(|p| Ident::new(*p)).collect(),
        body,
        span: None,
    }
}

pub fn program(functions: Vec<FunctionDecl>) -> Program {
    Program {
        functions,
        span: None,
    }
}
