//! ESTree JSON -> syntax tree.
//!
//! Accepts the output of esprima/acorn-style parsers. Source locations are
//! read from `range: [start, end]` or from `start`/`end` offsets when the
//! parser was asked to keep them; literal `raw` text is kept when present so
//! that `1.0` can be told apart from `1`.
//!
//! Node types outside the shader subset are not rejected here. They become
//! `Unsupported` nodes and the type checker reports them with context.

use serde_json::{Map, Value};
use shade_common::Span;

use crate::error::EstreeError;
use crate::expr::{
    AssignOp, BinaryOp, Expr, ExprKind, Ident, LitValue, Literal, LogicalOp, UnaryOp,
};
use crate::stmt::{Declarator, FunctionDecl, Program, Stmt, StmtKind};

type Result<T> = std::result::Result<T, EstreeError>;

/// Parse ESTree JSON text into a [`Program`].
pub fn from_json(text: &str) -> Result<Program> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| EstreeError::InvalidJson(e.to_string()))?;
    from_value(&value)
}

/// Convert an ESTree JSON value into a [`Program`].
///
/// The root may be a `Program` or a single `FunctionDeclaration`.
pub fn from_value(value: &Value) -> Result<Program> {
    let root = Node::new(value)?;
    match root.kind {
        "Program" => {
            let mut functions = Vec::new();
            for item in root.array("body")? {
                let item = Node::new(item)?;
                match item.kind {
                    "FunctionDeclaration" => functions.push(function(&item)?),
                    "EmptyStatement" => {}
                    // Directive prologues such as "use strict".
                    "ExpressionStatement" if item.opt("directive").is_some() => {}
                    kind => {
                        return Err(EstreeError::UnexpectedTopLevel {
                            kind: kind.to_string(),
                            span: item.span,
                        })
                    }
                }
            }
            Ok(Program {
                functions,
                span: root.span,
            })
        }
        "FunctionDeclaration" => Ok(Program {
            span: root.span,
            functions: vec![function(&root)?],
        }),
        kind => Err(EstreeError::UnexpectedTopLevel {
            kind: kind.to_string(),
            span: root.span,
        }),
    }
}

// ── Node access ────────────────────────────────────────────────────────

/// A JSON object known to carry a `type` field.
struct Node<'a> {
    kind: &'a str,
    fields: &'a Map<String, Value>,
    span: Option<Span>,
}

impl<'a> Node<'a> {
    fn new(value: &'a Value) -> Result<Self> {
        let not_a_node = || EstreeError::NotANode {
            found: describe(value).to_string(),
        };
        let fields = value.as_object().ok_or_else(not_a_node)?;
        let kind = fields
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(not_a_node)?;
        Ok(Node {
            kind,
            fields,
            span: span_of(fields),
        })
    }

    /// A present, non-null field.
    fn opt(&self, field: &'static str) -> Option<&'a Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    fn get(&self, field: &'static str) -> Result<&'a Value> {
        self.opt(field).ok_or_else(|| EstreeError::MissingField {
            node: self.kind.to_string(),
            field,
            span: self.span,
        })
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> EstreeError {
        EstreeError::InvalidField {
            node: self.kind.to_string(),
            field,
            expected,
            span: self.span,
        }
    }

    fn node(&self, field: &'static str) -> Result<Node<'a>> {
        Node::new(self.get(field)?).map_err(|_| self.invalid(field, "a node"))
    }

    fn opt_node(&self, field: &'static str) -> Result<Option<Node<'a>>> {
        match self.opt(field) {
            Some(value) => Node::new(value)
                .map(Some)
                .map_err(|_| self.invalid(field, "a node")),
            None => Ok(None),
        }
    }

    fn str(&self, field: &'static str) -> Result<&'a str> {
        self.get(field)?
            .as_str()
            .ok_or_else(|| self.invalid(field, "a string"))
    }

    fn bool(&self, field: &'static str) -> Result<bool> {
        match self.opt(field) {
            None => Ok(false),
            Some(v) => v.as_bool().ok_or_else(|| self.invalid(field, "a boolean")),
        }
    }

    fn array(&self, field: &'static str) -> Result<&'a Vec<Value>> {
        self.get(field)?
            .as_array()
            .ok_or_else(|| self.invalid(field, "an array"))
    }

    fn ident(&self, field: &'static str) -> Result<Ident> {
        let node = self.node(field)?;
        identifier(&node).ok_or_else(|| self.invalid(field, "an identifier"))
    }

    fn unsupported_operator(&self, operator: &str) -> EstreeError {
        EstreeError::UnsupportedOperator {
            node: self.kind.to_string(),
            operator: operator.to_string(),
            span: self.span,
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without `type`",
    }
}

fn span_of(fields: &Map<String, Value>) -> Option<Span> {
    let offset = |v: &Value| v.as_u64().and_then(|n| u32::try_from(n).ok());
    if let Some([start, end]) = fields.get("range").and_then(Value::as_array).map(Vec::as_slice) {
        if let (Some(start), Some(end)) = (offset(start), offset(end)) {
            return (start <= end).then(|| Span::new(start, end));
        }
    }
    let start = fields.get("start").and_then(offset)?;
    let end = fields.get("end").and_then(offset)?;
    (start <= end).then(|| Span::new(start, end))
}

fn identifier(node: &Node<'_>) -> Option<Ident> {
    if node.kind != "Identifier" {
        return None;
    }
    let name = node.opt("name")?.as_str()?;
    Some(Ident {
        name: name.to_string(),
        span: node.span,
    })
}

// ── Functions and statements ───────────────────────────────────────────

fn function(node: &Node<'_>) -> Result<FunctionDecl> {
    let name = node.ident("id")?;
    let mut params = Vec::new();
    for param in node.array("params")? {
        let param = Node::new(param).map_err(|_| node.invalid("params", "identifiers"))?;
        params.push(identifier(&param).ok_or_else(|| node.invalid("params", "identifiers"))?);
    }
    let body = node.node("body")?;
    if body.kind != "BlockStatement" {
        return Err(node.invalid("body", "a block statement"));
    }
    Ok(FunctionDecl {
        name,
        params,
        body: statements(&body, "body")?,
        span: node.span,
    })
}

fn statements(node: &Node<'_>, field: &'static str) -> Result<Vec<Stmt>> {
    let mut out = Vec::new();
    for value in node.array(field)? {
        let child = Node::new(value)?;
        if child.kind == "EmptyStatement" {
            continue;
        }
        out.push(statement(&child)?);
    }
    Ok(out)
}

fn statement(node: &Node<'_>) -> Result<Stmt> {
    let kind = match node.kind {
        "VariableDeclaration" => {
            let mut declarators = Vec::new();
            for value in node.array("declarations")? {
                let decl = Node::new(value)?;
                declarators.push(Declarator {
                    name: decl.ident("id")?,
                    init: decl.opt_node("init")?.map(|n| expression(&n)).transpose()?,
                    span: decl.span,
                });
            }
            StmtKind::VarDecl(declarators)
        }
        "ExpressionStatement" => StmtKind::Expr(expression(&node.node("expression")?)?),
        "ReturnStatement" => {
            StmtKind::Return(node.opt_node("argument")?.map(|n| expression(&n)).transpose()?)
        }
        "IfStatement" => StmtKind::If {
            test: expression(&node.node("test")?)?,
            consequent: Box::new(branch(&node.node("consequent")?)?),
            alternate: node
                .opt_node("alternate")?
                .map(|n| branch(&n).map(Box::new))
                .transpose()?,
        },
        "BlockStatement" => StmtKind::Block(statements(node, "body")?),
        kind => StmtKind::Unsupported {
            kind: kind.to_string(),
        },
    };
    Ok(Stmt::new(kind).with_span(node.span))
}

/// An if-branch; `if (x);` has an empty statement as its consequent.
fn branch(node: &Node<'_>) -> Result<Stmt> {
    if node.kind == "EmptyStatement" {
        return Ok(Stmt::new(StmtKind::Block(Vec::new())).with_span(node.span));
    }
    statement(node)
}

// ── Expressions ────────────────────────────────────────────────────────

fn boxed(node: &Node<'_>, field: &'static str) -> Result<Box<Expr>> {
    Ok(Box::new(expression(&node.node(field)?)?))
}

fn arguments(node: &Node<'_>) -> Result<Vec<Expr>> {
    node.array("arguments")?
        .iter()
        .map(|value| expression(&Node::new(value)?))
        .collect()
}

fn expression(node: &Node<'_>) -> Result<Expr> {
    let kind = match node.kind {
        "Literal" => literal(node)?,
        "Identifier" => ExprKind::Ident(node.str("name")?.to_string()),
        "MemberExpression" => {
            let object = boxed(node, "object")?;
            if node.bool("computed")? {
                ExprKind::Index {
                    object,
                    index: boxed(node, "property")?,
                }
            } else {
                ExprKind::Member {
                    object,
                    property: node.ident("property")?,
                }
            }
        }
        "CallExpression" => ExprKind::Call {
            callee: boxed(node, "callee")?,
            args: arguments(node)?,
        },
        "NewExpression" => ExprKind::New {
            callee: boxed(node, "callee")?,
            args: arguments(node)?,
        },
        "BinaryExpression" => {
            let op = node.str("operator")?;
            ExprKind::Binary {
                op: BinaryOp::from_estree(op).ok_or_else(|| node.unsupported_operator(op))?,
                left: boxed(node, "left")?,
                right: boxed(node, "right")?,
            }
        }
        "LogicalExpression" => {
            let op = node.str("operator")?;
            ExprKind::Logical {
                op: LogicalOp::from_estree(op).ok_or_else(|| node.unsupported_operator(op))?,
                left: boxed(node, "left")?,
                right: boxed(node, "right")?,
            }
        }
        "AssignmentExpression" => {
            let op = node.str("operator")?;
            ExprKind::Assign {
                op: AssignOp::from_estree(op).ok_or_else(|| node.unsupported_operator(op))?,
                target: boxed(node, "left")?,
                value: boxed(node, "right")?,
            }
        }
        "ConditionalExpression" => ExprKind::Conditional {
            test: boxed(node, "test")?,
            consequent: boxed(node, "consequent")?,
            alternate: boxed(node, "alternate")?,
        },
        "UnaryExpression" => {
            let op = node.str("operator")?;
            ExprKind::Unary {
                op: UnaryOp::from_estree(op).ok_or_else(|| node.unsupported_operator(op))?,
                argument: boxed(node, "argument")?,
            }
        }
        kind => ExprKind::Unsupported {
            kind: kind.to_string(),
        },
    };
    Ok(Expr::new(kind).with_span(node.span))
}

fn literal(node: &Node<'_>) -> Result<ExprKind> {
    if node.opt("regex").is_some() {
        return Ok(ExprKind::Unsupported {
            kind: "RegExpLiteral".to_string(),
        });
    }
    let value = match node.fields.get("value") {
        None | Some(Value::Null) => LitValue::Null,
        Some(Value::Bool(b)) => LitValue::Bool(*b),
        Some(Value::String(s)) => LitValue::String(s.clone()),
        Some(Value::Number(n)) => LitValue::Number(
            n.as_f64()
                .ok_or_else(|| node.invalid("value", "a finite number"))?,
        ),
        Some(_) => return Err(node.invalid("value", "a literal value")),
    };
    let raw = node.opt("raw").and_then(Value::as_str).map(str::to_string);
    Ok(ExprKind::Literal(Literal { value, raw }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn span_prefers_range_over_offsets() {
        let fields = json!({ "type": "Identifier", "range": [3, 7], "start": 0, "end": 1 });
        assert_eq!(span_of(fields.as_object().unwrap()), Some(Span::new(3, 7)));

        let fields = json!({ "type": "Identifier", "start": 2, "end": 4 });
        assert_eq!(span_of(fields.as_object().unwrap()), Some(Span::new(2, 4)));

        let fields = json!({ "type": "Identifier" });
        assert_eq!(span_of(fields.as_object().unwrap()), None);
    }

    #[test]
    fn computed_member_becomes_index() {
        let value = json!({
            "type": "MemberExpression",
            "computed": true,
            "object": { "type": "Identifier", "name": "a" },
            "property": { "type": "Literal", "value": 0, "raw": "0" }
        });
        let expr = expression(&Node::new(&value).unwrap()).unwrap();
        assert!(matches!(expr.kind, ExprKind::Index { .. }));
    }

    #[test]
    fn unknown_expression_kept_by_name() {
        let value = json!({ "type": "ThisExpression" });
        let expr = expression(&Node::new(&value).unwrap()).unwrap();
        assert_eq!(expr.kind_name(), "ThisExpression");
    }
}
