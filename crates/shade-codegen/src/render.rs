//! Expression rendering shared by the backends.
//!
//! The backends differ in how they spell types and numbers and in which
//! expression forms they support. A [`Dialect`] captures those differences;
//! [`Renderer`] walks typed expressions and collects a warning for every
//! placeholder it has to emit.

use shade_ast::LitValue;
use shade_typeck::typed::{TypedDeclarator, TypedExpr, TypedExprKind, TypedFunction};
use shade_typeck::{ConstantValue, SemanticType};

use crate::emit::LineBuffer;
use crate::error::CodegenError;

pub type Result<T> = std::result::Result<T, CodegenError>;

/// What one target language can express.
pub trait Dialect {
    /// Target name for messages (`"GLSL"`).
    fn name(&self) -> &'static str;

    /// The target spelling of a semantic type.
    fn map_type(&self, ty: &SemanticType) -> Result<&'static str>;

    /// The literal text of a compile-time number on a node of type `ty`.
    fn number(&self, value: f64, ty: &SemanticType) -> Result<String>;

    fn supports_conditional(&self) -> bool;

    fn supports_unary(&self) -> bool;
}

pub struct Renderer<'d, D: Dialect> {
    dialect: &'d D,
    warnings: Vec<String>,
}

impl<'d, D: Dialect> Renderer<'d, D> {
    pub fn new(dialect: &'d D) -> Self {
        Renderer {
            dialect,
            warnings: Vec::new(),
        }
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    /// Record a non-fatal problem. Callers report the collected warnings;
    /// the log only traces them.
    pub fn warn(&mut self, message: String) {
        log::debug!("{}: {}", self.dialect.name(), message);
        self.warnings.push(message);
    }

    /// `<ret> <name>(<params>) {`, parameters as bare names, `void` when
    /// there are none.
    fn function_header(&self, out: &mut LineBuffer, func: &TypedFunction) -> Result<()> {
        let ret = self.dialect.map_type(&func.return_type)?;
        out.append_line(format!("{} {}(", ret, func.name));
        if func.params.is_empty() {
            out.append("void");
        }
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                out.append(", ");
            }
            out.append(&param.name);
        }
        out.append(") {");
        Ok(())
    }

    /// `<type> <name> [= <init>];`
    pub fn declarator(&mut self, decl: &TypedDeclarator) -> Result<String> {
        let ty = self.dialect.map_type(&decl.annotation.ty)?;
        match &decl.init {
            Some(init) => Ok(format!("{} {} = {};", ty, decl.name, self.expr(init)?)),
            None => Ok(format!("{} {};", ty, decl.name)),
        }
    }

    pub fn return_stmt(&mut self, argument: Option<&TypedExpr>) -> Result<String> {
        match argument {
            Some(expr) => Ok(format!("return {};", self.expr(expr)?)),
            None => Ok("return;".to_string()),
        }
    }

    /// Emit `<ret> <name>(<params>) {`, the body via `body`, and the
    /// closing brace.
    pub fn function(
        &mut self,
        out: &mut LineBuffer,
        func: &TypedFunction,
        body: impl FnOnce(&mut Self, &mut LineBuffer) -> Result<()>,
    ) -> Result<()> {
        self.function_header(out, func)?;
        out.indent();
        body(self, out)?;
        out.dedent();
        out.append_line("}");
        Ok(())
    }

    pub fn expr(&mut self, expr: &TypedExpr) -> Result<String> {
        // Constant propagation: a numeric node with a known value is that
        // value.
        if let Some(value) = expr.annotation.static_number() {
            if expr.ty().is_numeric() {
                return self.dialect.number(value, expr.ty());
            }
        }

        match &expr.kind {
            TypedExprKind::Literal(LitValue::String(s)) => Ok(format!("\"{}\"", s.escape_default())),
            TypedExprKind::Literal(LitValue::Bool(b)) => Ok(b.to_string()),
            TypedExprKind::Literal(LitValue::Number(n)) => self.dialect.number(*n, expr.ty()),
            TypedExprKind::Ident(name) => Ok(name.clone()),
            TypedExprKind::Member { object, property } => {
                Ok(format!("{}.{}", self.expr(object)?, property))
            }
            TypedExprKind::Call { callee, args } => {
                Ok(format!("{}({})", self.expr(callee)?, self.args(args)?))
            }
            TypedExprKind::New { args, .. } => {
                let ty = self.dialect.map_type(expr.ty())?;
                Ok(format!("{}({})", ty, self.args(args)?))
            }
            TypedExprKind::Binary { op, left, right } => {
                Ok(format!("{} {} {}", self.operand(left)?, op, self.operand(right)?))
            }
            TypedExprKind::Logical { op, left, right } => {
                Ok(format!("{} {} {}", self.operand(left)?, op, self.operand(right)?))
            }
            TypedExprKind::Assign { op, target, value } => {
                Ok(format!("{} {} {}", self.place(target)?, op, self.expr(value)?))
            }
            TypedExprKind::Conditional {
                test,
                consequent,
                alternate,
            } if self.dialect.supports_conditional() => Ok(format!(
                "{} ? {} : {}",
                self.operand(test)?,
                self.operand(consequent)?,
                self.operand(alternate)?
            )),
            TypedExprKind::Unary { op, argument } if self.dialect.supports_unary() => {
                Ok(format!("{}{}", op, self.operand(argument)?))
            }
            _ => Ok(self.placeholder(expr.kind_name())),
        }
    }

    /// An assignment target: always the name or member path, never a
    /// propagated constant.
    fn place(&mut self, expr: &TypedExpr) -> Result<String> {
        match &expr.kind {
            TypedExprKind::Ident(name) => Ok(name.clone()),
            TypedExprKind::Member { object, property } => {
                Ok(format!("{}.{}", self.place(object)?, property))
            }
            _ => self.expr(expr),
        }
    }

    /// `<unhandled: Kind>`, with a warning.
    pub fn placeholder(&mut self, kind: &str) -> String {
        self.warn(format!("unhandled {} rendered as a placeholder", kind));
        format!("<unhandled: {}>", kind)
    }

    fn args(&mut self, args: &[TypedExpr]) -> Result<String> {
        let rendered = args
            .iter()
            .map(|arg| self.expr(arg))
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }

    /// An operator operand, parenthesized when it is itself an operator
    /// expression that did not fold to a constant.
    fn operand(&mut self, expr: &TypedExpr) -> Result<String> {
        let text = self.expr(expr)?;
        let folded = expr.ty().is_numeric() && expr.annotation.static_value.is_some();
        let compound = matches!(
            expr.kind,
            TypedExprKind::Binary { .. }
                | TypedExprKind::Logical { .. }
                | TypedExprKind::Assign { .. }
                | TypedExprKind::Conditional { .. }
        );
        if compound && !folded && !text.starts_with("<unhandled") {
            Ok(format!("({})", text))
        } else {
            Ok(text)
        }
    }
}

/// The host's shortest round-trip form of a number (`5`, `0.5`).
pub fn host_number(value: f64) -> String {
    ConstantValue::Number(value).to_string()
}
