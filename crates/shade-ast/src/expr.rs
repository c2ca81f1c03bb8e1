//! Expression nodes.

use std::fmt;

use shade_common::Span;

/// A name together with the span it was written at.
#[derive(Clone, Debug, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Option<Span>,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Ident {
            name: name.into(),
            span: None,
        }
    }
}

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Ident(String),
    /// `object.property`
    Member {
        object: Box<Expr>,
        property: Ident,
    },
    /// `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        argument: Box<Expr>,
    },
    /// Any ESTree expression outside the shader subset, kept by name so that
    /// inference can report it.
    Unsupported { kind: String },
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr { kind, span: None }
    }

    pub fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    /// The ESTree node type this expression was loaded from.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            ExprKind::Literal(_) => "Literal",
            ExprKind::Ident(_) => "Identifier",
            ExprKind::Member { .. } | ExprKind::Index { .. } => "MemberExpression",
            ExprKind::Call { .. } => "CallExpression",
            ExprKind::New { .. } => "NewExpression",
            ExprKind::Binary { .. } => "BinaryExpression",
            ExprKind::Logical { .. } => "LogicalExpression",
            ExprKind::Assign { .. } => "AssignmentExpression",
            ExprKind::Conditional { .. } => "ConditionalExpression",
            ExprKind::Unary { .. } => "UnaryExpression",
            ExprKind::Unsupported { kind } => kind,
        }
    }

    /// The dotted path of a plain member chain (`env.texCoord.x`), or `None`
    /// when the chain contains anything but identifiers and named members.
    pub fn dotted_path(&self) -> Option<String> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name.clone()),
            ExprKind::Member { object, property } => {
                let mut path = object.dotted_path()?;
                path.push('.');
                path.push_str(&property.name);
                Some(path)
            }
            _ => None,
        }
    }
}

/// A literal value and, when the parser kept it, its raw source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub value: LitValue,
    pub raw: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LitValue {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
}

impl Literal {
    /// Whether a numeric literal was written as an integer.
    ///
    /// `1.0` and `1e3` are fractional literals even though their values are
    /// integral; without raw text only the value decides.
    pub fn is_integral(&self) -> bool {
        let LitValue::Number(value) = self.value else {
            return false;
        };
        if let Some(raw) = &self.raw {
            let hex = raw.starts_with("0x") || raw.starts_with("0X");
            if !hex && raw.contains(['.', 'e', 'E']) {
                return false;
            }
        }
        value.is_finite() && value.fract() == 0.0
    }
}

// ── Operators ──────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
}

impl BinaryOp {
    pub fn from_estree(op: &str) -> Option<Self> {
        Some(match op {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Ge,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::NotEq,
            "===" => BinaryOp::StrictEq,
            "!==" => BinaryOp::StrictNotEq,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem
        )
    }

    pub fn is_comparison(self) -> bool {
        !self.is_arithmetic()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn from_estree(op: &str) -> Option<Self> {
        match op {
            "&&" => Some(LogicalOp::And),
            "||" => Some(LogicalOp::Or),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
}

impl AssignOp {
    pub fn from_estree(op: &str) -> Option<Self> {
        Some(match op {
            "=" => AssignOp::Assign,
            "+=" => AssignOp::AddAssign,
            "-=" => AssignOp::SubAssign,
            "*=" => AssignOp::MulAssign,
            "/=" => AssignOp::DivAssign,
            "%=" => AssignOp::RemAssign,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::RemAssign => "%=",
        }
    }

    /// The arithmetic operator a compound assignment applies, if any.
    pub fn binary_op(self) -> Option<BinaryOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::AddAssign => Some(BinaryOp::Add),
            AssignOp::SubAssign => Some(BinaryOp::Sub),
            AssignOp::MulAssign => Some(BinaryOp::Mul),
            AssignOp::DivAssign => Some(BinaryOp::Div),
            AssignOp::RemAssign => Some(BinaryOp::Rem),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl UnaryOp {
    pub fn from_estree(op: &str) -> Option<Self> {
        match op {
            "-" => Some(UnaryOp::Neg),
            "+" => Some(UnaryOp::Plus),
            "!" => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(BinaryOp, LogicalOp, AssignOp, UnaryOp);
