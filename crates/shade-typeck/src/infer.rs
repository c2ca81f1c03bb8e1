//! Recursive-descent inference over shader functions.
//!
//! A single forward pass. Each syntax node is visited once and produces its
//! typed counterpart, so the output tree is annotated by construction. The
//! first error aborts the function and no partial tree is returned.
//!
//! - Identifiers resolve through the scope stack, then the injection map,
//!   then the registry's namespace globals.
//! - Member access resolves injected dotted paths first, then the object
//!   kind's registry entry.
//! - Operators combine object kinds, promote numbers, and fold arithmetic
//!   on compile-time values.

use shade_ast::{
    AssignOp, BinaryOp, Declarator, Expr, ExprKind, FunctionDecl, Ident, LitValue, Literal,
    LogicalOp, Program, Stmt, StmtKind, UnaryOp,
};
use shade_common::Span;

use crate::annotation::Annotation;
use crate::env::{Binding, Frame, TypeEnv};
use crate::error::TypeError;
use crate::inject::InjectionMap;
use crate::registry::{Constructor, Registry};
use crate::ty::{ConstantValue, SemanticType, Signature};
use crate::typed::{
    TypedDeclarator, TypedExpr, TypedExprKind, TypedFunction, TypedParam, TypedProgram, TypedStmt,
};

type InferResult<T> = Result<T, TypeError>;

/// Per-function inference state.
struct InferCtx<'a> {
    registry: &'a Registry,
    injections: &'a InjectionMap,
    env: TypeEnv,
    /// Parameter names; their injected member paths stay visible.
    params: Vec<String>,
    /// The type of every `return` seen so far, in source order.
    returns: Vec<(SemanticType, Option<Span>)>,
}

/// Infer every function of a program against the same injection map.
pub fn infer_program(
    program: &Program,
    injections: &InjectionMap,
    registry: &Registry,
) -> InferResult<TypedProgram> {
    let functions = program
        .functions
        .iter()
        .map(|func| infer_function(func, injections, registry))
        .collect::<InferResult<Vec<_>>>()?;
    Ok(TypedProgram { functions })
}

/// Infer one shader function.
///
/// Parameters take their types from `injections`; the body is checked
/// against `registry`. Returns the fully annotated function or the first
/// error encountered.
pub fn infer_function(
    func: &FunctionDecl,
    injections: &InjectionMap,
    registry: &Registry,
) -> InferResult<TypedFunction> {
    let mut cx = InferCtx {
        registry,
        injections,
        env: TypeEnv::new(),
        params: func.params.iter().map(|p| p.name.clone()).collect(),
        returns: Vec::new(),
    };

    cx.env.push_scope();
    let mut params = Vec::with_capacity(func.params.len());
    for param in &func.params {
        let injected =
            injections
                .resolve(&param.name)
                .ok_or_else(|| TypeError::UntypedParameter {
                    function: func.name.name.clone(),
                    name: param.name.clone(),
                    span: param.span.or(func.span),
                })?;
        let binding = match &injected.value {
            Some(value) => Binding::Constant(injected.ty.clone(), value.clone()),
            None => Binding::Typed(injected.ty.clone()),
        };
        cx.env.insert(param.name.clone(), binding);
        params.push(TypedParam {
            name: param.name.clone(),
            ty: injected.ty,
            span: param.span,
        });
    }

    let body = infer_block(&mut cx, &func.body)?;
    cx.env.pop_scope();

    let return_type = unify_returns(&func.name, &cx.returns)?;
    let typed = TypedFunction {
        name: func.name.name.clone(),
        params,
        body,
        return_type,
        span: func.span,
    };
    log::debug!("inferred {}", typed.annotation());
    Ok(typed)
}

/// Fold the recorded return types into one. No `return` means `Undefined`.
fn unify_returns(
    name: &Ident,
    returns: &[(SemanticType, Option<Span>)],
) -> InferResult<SemanticType> {
    let Some(((first, _), rest)) = returns.split_first() else {
        return Ok(SemanticType::Undefined);
    };
    let mut unified = first.clone();
    for (ty, span) in rest {
        unified = unified
            .unify(ty)
            .ok_or_else(|| TypeError::ReturnTypeMismatch {
                function: name.name.clone(),
                first: unified.clone(),
                second: ty.clone(),
                span: *span,
            })?;
    }
    Ok(unified)
}

// ── Statements ─────────────────────────────────────────────────────────

/// Infer a statement list in a fresh scope, then settle the types of its
/// uninitialized declarations.
fn infer_block(cx: &mut InferCtx<'_>, stmts: &[Stmt]) -> InferResult<Vec<TypedStmt>> {
    cx.env.push_scope();
    let result = stmts
        .iter()
        .map(|stmt| infer_stmt(cx, stmt))
        .collect::<InferResult<Vec<_>>>();
    let frame = cx.env.pop_scope();
    let mut typed = result?;
    settle_declarations(&mut typed, &frame)?;
    Ok(typed)
}

/// An uninitialized `var` takes the type its slot ended the scope with.
fn settle_declarations(stmts: &mut [TypedStmt], frame: &Frame) -> InferResult<()> {
    for stmt in stmts {
        let TypedStmt::VarDecl(decls) = stmt else {
            continue;
        };
        for decl in decls.iter_mut().filter(|d| d.init.is_none()) {
            let ty = frame
                .get(&decl.name)
                .and_then(Binding::ty)
                .ok_or_else(|| TypeError::UntypedDeclaration {
                    name: decl.name.clone(),
                    span: decl.span,
                })?;
            decl.annotation = Annotation::new(ty.clone());
        }
    }
    Ok(())
}

fn infer_stmt(cx: &mut InferCtx<'_>, stmt: &Stmt) -> InferResult<TypedStmt> {
    match &stmt.kind {
        StmtKind::VarDecl(decls) => decls
            .iter()
            .map(|decl| infer_declarator(cx, decl))
            .collect::<InferResult<Vec<_>>>()
            .map(TypedStmt::VarDecl),
        StmtKind::Expr(expr) => Ok(TypedStmt::Expr(infer_expr(cx, expr)?)),
        StmtKind::Return(argument) => {
            let argument = argument
                .as_ref()
                .map(|expr| infer_expr(cx, expr))
                .transpose()?;
            let ty = argument
                .as_ref()
                .map_or(SemanticType::Undefined, |expr| expr.ty().clone());
            cx.returns.push((ty, stmt.span));
            Ok(TypedStmt::Return(argument))
        }
        StmtKind::If {
            test,
            consequent,
            alternate,
        } => {
            let test = infer_expr(cx, test)?;
            let consequent = infer_branch(cx, consequent)?;
            let alternate = alternate
                .as_deref()
                .map(|stmt| infer_branch(cx, stmt))
                .transpose()?;
            Ok(TypedStmt::If {
                test,
                consequent,
                alternate,
            })
        }
        StmtKind::Block(body) => Ok(TypedStmt::Block(infer_block(cx, body)?)),
        StmtKind::Unsupported { kind } => Err(TypeError::UnsupportedSyntax {
            kind: kind.clone(),
            span: stmt.span,
        }),
    }
}

/// An `if` branch is always its own scope, braced or not.
fn infer_branch(cx: &mut InferCtx<'_>, stmt: &Stmt) -> InferResult<Vec<TypedStmt>> {
    match &stmt.kind {
        StmtKind::Block(body) => infer_block(cx, body),
        _ => infer_block(cx, std::slice::from_ref(stmt)),
    }
}

fn infer_declarator(cx: &mut InferCtx<'_>, decl: &Declarator) -> InferResult<TypedDeclarator> {
    let init = decl
        .init
        .as_ref()
        .map(|expr| infer_expr(cx, expr))
        .transpose()?;
    let declared = match &init {
        Some(init) => Some(init.ty().clone()),
        None => cx.injections.get(&decl.name.name).map(|i| i.ty.clone()),
    };
    let (binding, annotation) = match declared {
        Some(ty) => (Binding::Typed(ty.clone()), Annotation::new(ty)),
        // Replaced once the scope ends and the slot has settled.
        None => (Binding::Pending, Annotation::new(SemanticType::Undefined)),
    };
    cx.env.insert(decl.name.name.clone(), binding);
    Ok(TypedDeclarator {
        name: decl.name.name.clone(),
        init,
        annotation,
        span: decl.span.or(decl.name.span),
    })
}

// ── Expressions ────────────────────────────────────────────────────────

fn infer_expr(cx: &mut InferCtx<'_>, expr: &Expr) -> InferResult<TypedExpr> {
    let span = expr.span;
    let (kind, annotation) = match &expr.kind {
        ExprKind::Literal(lit) => (TypedExprKind::Literal(lit.value.clone()), infer_literal(lit)),
        ExprKind::Ident(name) => (
            TypedExprKind::Ident(name.clone()),
            infer_ident(cx, name, span)?,
        ),
        ExprKind::Member { object, property } => infer_member(cx, expr, object, property)?,
        ExprKind::Index { .. } => {
            return Err(TypeError::UnsupportedSyntax {
                kind: "computed MemberExpression".to_string(),
                span,
            })
        }
        ExprKind::Call { callee, args } => infer_call(cx, callee, args, span)?,
        ExprKind::New { callee, args } => infer_new(cx, callee, args, span)?,
        ExprKind::Binary { op, left, right } => infer_binary(cx, *op, left, right, span)?,
        ExprKind::Logical { op, left, right } => infer_logical(cx, *op, left, right, span)?,
        ExprKind::Assign { op, target, value } => infer_assign(cx, *op, target, value, span)?,
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => infer_conditional(cx, test, consequent, alternate, span)?,
        ExprKind::Unary { op, argument } => infer_unary(cx, *op, argument, span)?,
        ExprKind::Unsupported { kind } => {
            return Err(TypeError::UnsupportedSyntax {
                kind: kind.clone(),
                span,
            })
        }
    };
    Ok(TypedExpr {
        kind,
        annotation,
        span,
    })
}

type Inferred = (TypedExprKind, Annotation);

fn infer_literal(lit: &Literal) -> Annotation {
    match &lit.value {
        LitValue::Number(value) => {
            let ty = if lit.is_integral() {
                SemanticType::Int
            } else {
                SemanticType::Number
            };
            Annotation::constant(ty, ConstantValue::Number(*value))
        }
        LitValue::String(s) => {
            Annotation::constant(SemanticType::String, ConstantValue::String(s.clone()))
        }
        LitValue::Bool(b) => Annotation::constant(SemanticType::Boolean, ConstantValue::Bool(*b)),
        LitValue::Null => Annotation::new(SemanticType::Undefined),
    }
}

fn infer_ident(cx: &InferCtx<'_>, name: &str, span: Option<Span>) -> InferResult<Annotation> {
    match cx.env.lookup(name) {
        Some(Binding::Typed(ty)) => return Ok(Annotation::new(ty.clone())),
        Some(Binding::Constant(ty, value)) => {
            return Ok(Annotation::constant(ty.clone(), value.clone()))
        }
        Some(Binding::Pending) => {
            return Err(TypeError::UntypedDeclaration {
                name: name.to_string(),
                span,
            })
        }
        None => {}
    }
    if let Some(injected) = cx.injections.resolve(name) {
        return Ok(Annotation {
            ty: injected.ty,
            static_value: injected.value,
        });
    }
    if let Some(ty) = cx.registry.global(name) {
        return Ok(Annotation::new(ty));
    }
    if name == "undefined" {
        return Ok(Annotation::new(SemanticType::Undefined));
    }
    Err(TypeError::UnresolvedIdentifier {
        name: name.to_string(),
        span,
    })
}

fn infer_member(
    cx: &mut InferCtx<'_>,
    expr: &Expr,
    object: &Expr,
    property: &Ident,
) -> InferResult<Inferred> {
    let object = infer_expr(cx, object)?;

    // Injected member paths, unless the root is a local variable. A path
    // assigned earlier in the function is no longer a constant.
    if let Some(path) = expr.dotted_path() {
        let root = path.split('.').next().unwrap_or_default();
        let injectable = cx.params.iter().any(|p| p == root) || cx.env.lookup(root).is_none();
        let annotation = if !injectable {
            None
        } else if let Some(ty) = cx.env.lookup(&path).and_then(Binding::ty) {
            Some(Annotation::new(ty.clone()))
        } else {
            cx.injections.resolve(&path).map(|injected| Annotation {
                ty: injected.ty,
                static_value: injected.value,
            })
        };
        if let Some(annotation) = annotation {
            let kind = TypedExprKind::Member {
                object: Box::new(object),
                property: property.name.clone(),
            };
            return Ok((kind, annotation));
        }
    }

    let object_ty = object.ty().clone();
    let member = object_ty
        .object_kind()
        .and_then(|kind| cx.registry.lookup_by_kind(kind))
        .and_then(|entry| entry.member(&property.name))
        .ok_or_else(|| TypeError::UnknownMember {
            object: object_ty.clone(),
            member: property.name.clone(),
            span: property.span.or(expr.span),
        })?;
    let annotation = Annotation::new(member.semantic_type());
    let kind = TypedExprKind::Member {
        object: Box::new(object),
        property: property.name.clone(),
    };
    Ok((kind, annotation))
}

fn infer_args(cx: &mut InferCtx<'_>, args: &[Expr]) -> InferResult<Vec<TypedExpr>> {
    args.iter().map(|arg| infer_expr(cx, arg)).collect()
}

/// Arity, then each argument against its parameter.
fn check_arguments(
    callee: &str,
    sig: &Signature,
    args: &[TypedExpr],
    span: Option<Span>,
) -> InferResult<()> {
    if !sig.accepts_arity(args.len()) {
        return Err(TypeError::ArityMismatch {
            callee: callee.to_string(),
            min: sig.required,
            max: sig.params.len(),
            found: args.len(),
            span,
        });
    }
    for (index, (param, arg)) in sig.params.iter().zip(args).enumerate() {
        if !param.accepts(arg.ty()) {
            return Err(TypeError::ArgumentTypeMismatch {
                callee: callee.to_string(),
                index,
                expected: param.clone(),
                found: arg.ty().clone(),
                span: arg.span.or(span),
            });
        }
    }
    Ok(())
}

fn infer_call(
    cx: &mut InferCtx<'_>,
    callee: &Expr,
    args: &[Expr],
    span: Option<Span>,
) -> InferResult<Inferred> {
    let name = callee
        .dotted_path()
        .unwrap_or_else(|| callee.kind_name().to_string());
    let typed_callee = infer_expr(cx, callee)?;
    let SemanticType::Function(sig) = typed_callee.ty().clone() else {
        return Err(TypeError::NotCallable {
            callee: name,
            ty: typed_callee.ty().clone(),
            span: callee.span.or(span),
        });
    };
    let args = infer_args(cx, args)?;
    check_arguments(&name, &sig, &args, span)?;
    let kind = TypedExprKind::Call {
        callee: Box::new(typed_callee),
        args,
    };
    Ok((kind, Annotation::new(sig.ret)))
}

fn infer_new(
    cx: &mut InferCtx<'_>,
    callee: &Expr,
    args: &[Expr],
    span: Option<Span>,
) -> InferResult<Inferred> {
    let ExprKind::Ident(name) = &callee.kind else {
        return Err(TypeError::UnsupportedSyntax {
            kind: format!("NewExpression with a {} callee", callee.kind_name()),
            span,
        });
    };
    let registry = cx.registry;
    let unknown = || TypeError::UnknownConstructor {
        name: name.clone(),
        span: callee.span.or(span),
    };
    let entry = registry.lookup_by_name(name).ok_or_else(unknown)?;
    if entry.constructor == Constructor::None {
        return Err(unknown());
    }
    let args = infer_args(cx, args)?;
    if let Constructor::Typed(sig) = &entry.constructor {
        check_arguments(name, sig, &args, span)?;
    }
    let kind = TypedExprKind::New {
        constructor: entry.name.clone(),
        args,
    };
    Ok((kind, Annotation::new(SemanticType::Object(entry.kind))))
}

/// Namespaces and method references are never operator operands.
fn is_operand(ty: &SemanticType) -> bool {
    match ty {
        SemanticType::Function(_) => false,
        SemanticType::Object(kind) => !kind.is_namespace(),
        _ => true,
    }
}

/// The result type of an arithmetic operator (also compound assignment).
fn arithmetic_type(
    op: &str,
    left: &SemanticType,
    right: &SemanticType,
    span: Option<Span>,
) -> InferResult<SemanticType> {
    let invalid = |ty: &SemanticType| TypeError::InvalidOperand {
        op: op.to_string(),
        ty: ty.clone(),
        span,
    };
    for ty in [left, right] {
        if !is_operand(ty) {
            return Err(invalid(ty));
        }
    }
    match (left.object_kind(), right.object_kind()) {
        (Some(a), Some(b)) if a == b => Ok(SemanticType::Object(a)),
        (Some(a), Some(b)) => Err(TypeError::IncompatibleOperandKinds {
            op: op.to_string(),
            left: a,
            right: b,
            span,
        }),
        (Some(kind), None) if right.is_numeric() => Ok(SemanticType::Object(kind)),
        (None, Some(kind)) if left.is_numeric() => Ok(SemanticType::Object(kind)),
        (Some(_), None) => Err(invalid(right)),
        (None, Some(_)) => Err(invalid(left)),
        (None, None) => left.promote(right).ok_or_else(|| {
            if left.is_numeric() {
                invalid(right)
            } else {
                invalid(left)
            }
        }),
    }
}

/// Integral values that convert to `i64` without saturating.
const I64_RANGE: std::ops::Range<f64> =
    -9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0;

fn fold_arithmetic(
    op: BinaryOp,
    ty: &SemanticType,
    left: &Annotation,
    right: &Annotation,
) -> Option<ConstantValue> {
    let (a, b) = (left.static_number()?, right.static_number()?);
    let value = match ty {
        SemanticType::Int => {
            if !(I64_RANGE.contains(&a) && I64_RANGE.contains(&b)) {
                return None;
            }
            let (a, b) = (a as i64, b as i64);
            let folded = match op {
                BinaryOp::Add => a.checked_add(b),
                BinaryOp::Sub => a.checked_sub(b),
                BinaryOp::Mul => a.checked_mul(b),
                BinaryOp::Div => a.checked_div(b),
                BinaryOp::Rem => a.checked_rem(b),
                _ => None,
            };
            folded? as f64
        }
        SemanticType::Number => match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
            _ => return None,
        },
        _ => return None,
    };
    value.is_finite().then_some(ConstantValue::Number(value))
}

fn infer_binary(
    cx: &mut InferCtx<'_>,
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    span: Option<Span>,
) -> InferResult<Inferred> {
    let left = infer_expr(cx, left)?;
    let right = infer_expr(cx, right)?;

    let annotation = if op.is_comparison() {
        for operand in [&left, &right] {
            if !is_operand(operand.ty()) {
                return Err(TypeError::InvalidOperand {
                    op: op.as_str().to_string(),
                    ty: operand.ty().clone(),
                    span,
                });
            }
        }
        Annotation::new(SemanticType::Boolean)
    } else {
        let ty = arithmetic_type(op.as_str(), left.ty(), right.ty(), span)?;
        match fold_arithmetic(op, &ty, &left.annotation, &right.annotation) {
            Some(value) => Annotation::constant(ty, value),
            None => Annotation::new(ty),
        }
    };

    let kind = TypedExprKind::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    };
    Ok((kind, annotation))
}

fn infer_logical(
    cx: &mut InferCtx<'_>,
    op: LogicalOp,
    left: &Expr,
    right: &Expr,
    span: Option<Span>,
) -> InferResult<Inferred> {
    let left = infer_expr(cx, left)?;
    let right = infer_expr(cx, right)?;

    for operand in [&left, &right] {
        if !is_operand(operand.ty()) {
            return Err(TypeError::InvalidOperand {
                op: op.as_str().to_string(),
                ty: operand.ty().clone(),
                span,
            });
        }
    }
    let ty = match (left.ty().object_kind(), right.ty().object_kind()) {
        (Some(a), Some(b)) if a != b => {
            return Err(TypeError::IncompatibleOperandKinds {
                op: op.as_str().to_string(),
                left: a,
                right: b,
                span,
            })
        }
        (Some(kind), _) | (None, Some(kind)) => SemanticType::Object(kind),
        (None, None) => left
            .ty()
            .promote(right.ty())
            .unwrap_or(SemanticType::Boolean),
    };

    let kind = TypedExprKind::Logical {
        op,
        left: Box::new(left),
        right: Box::new(right),
    };
    Ok((kind, Annotation::new(ty)))
}

fn infer_assign(
    cx: &mut InferCtx<'_>,
    op: AssignOp,
    target: &Expr,
    value: &Expr,
    span: Option<Span>,
) -> InferResult<Inferred> {
    let value = infer_expr(cx, value)?;
    let (target, result) = match &target.kind {
        ExprKind::Ident(name) => infer_assign_ident(cx, op, name, target.span, &value, span)?,
        ExprKind::Member { .. } => {
            let name = target
                .dotted_path()
                .unwrap_or_else(|| target.kind_name().to_string());
            let mut typed = infer_expr(cx, target)?;
            let result = assigned_type(op, &name, typed.ty(), value.ty(), span)?;
            // An assigned injected constant is a plain variable from here on.
            if typed.annotation.static_value.take().is_some() {
                cx.env.insert_outermost(name, Binding::Typed(typed.ty().clone()));
            }
            (typed, result)
        }
        _ => {
            return Err(TypeError::InvalidAssignmentTarget {
                kind: target.kind_name().to_string(),
                span: target.span.or(span),
            })
        }
    };
    let kind = TypedExprKind::Assign {
        op,
        target: Box::new(target),
        value: Box::new(value),
    };
    Ok((kind, Annotation::new(result)))
}

/// Assignment to a name. A first plain assignment settles a pending slot.
fn infer_assign_ident(
    cx: &mut InferCtx<'_>,
    op: AssignOp,
    name: &str,
    target_span: Option<Span>,
    value: &TypedExpr,
    span: Option<Span>,
) -> InferResult<(TypedExpr, SemanticType)> {
    let (declared, injected) = match cx.env.lookup(name) {
        Some(binding) => (binding.ty().cloned(), false),
        None => match cx.injections.resolve(name) {
            Some(injected) => (Some(injected.ty), true),
            None => {
                return Err(TypeError::UnresolvedIdentifier {
                    name: name.to_string(),
                    span: target_span.or(span),
                })
            }
        },
    };

    let (target_ty, result) = match declared {
        Some(ty) => {
            let result = assigned_type(op, name, &ty, value.ty(), span)?;
            (ty, result)
        }
        None if op == AssignOp::Assign => (value.ty().clone(), value.ty().clone()),
        None => {
            return Err(TypeError::UntypedDeclaration {
                name: name.to_string(),
                span: target_span.or(span),
            })
        }
    };

    if injected {
        cx.env.insert_outermost(name.to_string(), Binding::Typed(target_ty.clone()));
    } else if let Some(slot) = cx.env.lookup_mut(name) {
        if !matches!(slot, Binding::Typed(_)) {
            *slot = Binding::Typed(target_ty.clone());
        }
    }

    let target = TypedExpr {
        kind: TypedExprKind::Ident(name.to_string()),
        annotation: Annotation::new(target_ty),
        span: target_span,
    };
    Ok((target, result))
}

/// The type an assignment produces, checked against the target's type.
/// Numeric values may widen an `Int` into a `Number` slot but never narrow
/// a `Number` into an `Int` slot.
fn assigned_type(
    op: AssignOp,
    target: &str,
    target_ty: &SemanticType,
    value_ty: &SemanticType,
    span: Option<Span>,
) -> InferResult<SemanticType> {
    let result = match op.binary_op() {
        Some(_) => arithmetic_type(op.as_str(), target_ty, value_ty, span)?,
        None => value_ty.clone(),
    };
    let narrows = *target_ty == SemanticType::Int && result == SemanticType::Number;
    if narrows || !target_ty.accepts(&result) {
        return Err(TypeError::AssignmentTypeMismatch {
            target: target.to_string(),
            expected: target_ty.clone(),
            found: result,
            span,
        });
    }
    Ok(result)
}

fn infer_conditional(
    cx: &mut InferCtx<'_>,
    test: &Expr,
    consequent: &Expr,
    alternate: &Expr,
    span: Option<Span>,
) -> InferResult<Inferred> {
    let test = infer_expr(cx, test)?;
    let consequent = infer_expr(cx, consequent)?;
    let alternate = infer_expr(cx, alternate)?;
    let ty = consequent
        .ty()
        .unify(alternate.ty())
        .ok_or_else(|| TypeError::BranchTypeMismatch {
            consequent: consequent.ty().clone(),
            alternate: alternate.ty().clone(),
            span,
        })?;
    let kind = TypedExprKind::Conditional {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    };
    Ok((kind, Annotation::new(ty)))
}

fn infer_unary(
    cx: &mut InferCtx<'_>,
    op: UnaryOp,
    argument: &Expr,
    span: Option<Span>,
) -> InferResult<Inferred> {
    let argument = infer_expr(cx, argument)?;
    let ty = argument.ty().clone();
    let annotation = match op {
        UnaryOp::Not => {
            let value = match argument.annotation.static_value {
                Some(ConstantValue::Bool(b)) => Some(ConstantValue::Bool(!b)),
                _ => None,
            };
            Annotation {
                ty: SemanticType::Boolean,
                static_value: value,
            }
        }
        UnaryOp::Neg | UnaryOp::Plus if ty.is_numeric() => {
            let value = argument.annotation.static_number().and_then(|n| match op {
                UnaryOp::Neg if ty == SemanticType::Int => I64_RANGE
                    .contains(&n)
                    .then(|| (n as i64).checked_neg())
                    .flatten()
                    .map(|v| v as f64),
                UnaryOp::Neg => Some(-n),
                _ => Some(n),
            });
            Annotation {
                ty,
                static_value: value.map(ConstantValue::Number),
            }
        }
        UnaryOp::Neg | UnaryOp::Plus
            if ty.object_kind().is_some_and(|kind| !kind.is_namespace()) =>
        {
            Annotation::new(ty)
        }
        UnaryOp::Neg | UnaryOp::Plus => {
            return Err(TypeError::InvalidOperand {
                op: op.as_str().to_string(),
                ty,
                span,
            })
        }
    };
    let kind = TypedExprKind::Unary {
        op,
        argument: Box::new(argument),
    };
    Ok((kind, annotation))
}
