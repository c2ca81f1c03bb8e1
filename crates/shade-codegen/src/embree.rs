//! Embree material backend (C++).
//!
//! Emits a header-only material inside `namespace embree`. Unlike GLSL this
//! target keeps `if`/`else`, nested blocks, conditionals and unary
//! operators, and spells every float with a decimal point.

use serde::Deserialize;
use shade_typeck::typed::{TypedFunction, TypedProgram, TypedStmt};
use shade_typeck::{ObjectKind, SemanticType};

use crate::emit::LineBuffer;
use crate::error::CodegenError;
use crate::render::{host_number, Dialect, Renderer, Result};
use crate::Output;

const HEADER: &[&str] = &[
    "// Generated by shade.js",
    "#ifndef __EMBREE_SHADEJS_MATERIAL_H__",
    "#define __EMBREE_SHADEJS_MATERIAL_H__",
    "#include \"../materials/material.h\"",
    "#include \"../brdfs/lambertian.h\"",
    "#include \"../textures/texture.h\"",
    "",
    "namespace embree",
    "{",
];

const EPILOG: &[&str] = &["}", "#endif"];

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbreeOptions {
    /// Drop the include guard, includes, namespace and epilog.
    pub omit_header: bool,
}

pub struct Embree;

impl Dialect for Embree {
    fn name(&self) -> &'static str {
        "Embree"
    }

    fn map_type(&self, ty: &SemanticType) -> Result<&'static str> {
        match ty {
            SemanticType::Object(ObjectKind::Color) => Ok("vec4"),
            SemanticType::Object(ObjectKind::Float3) => Ok("vec3"),
            SemanticType::Object(ObjectKind::Float2) => Ok("vec2"),
            SemanticType::Number => Ok("float"),
            SemanticType::Int => Ok("int"),
            SemanticType::Boolean => Ok("bool"),
            SemanticType::Undefined => Ok("void"),
            _ => Err(CodegenError::UnsupportedTargetType {
                target: self.name(),
                ty: ty.clone(),
            }),
        }
    }

    /// `Number` values always carry a decimal point; `Int` values never do.
    fn number(&self, value: f64, ty: &SemanticType) -> Result<String> {
        match ty {
            SemanticType::Number => float_literal(value),
            _ => Ok(host_number(value)),
        }
    }

    fn supports_conditional(&self) -> bool {
        true
    }

    fn supports_unary(&self) -> bool {
        true
    }
}

/// A C++ float literal: `5` becomes `5.0`, `0.5` stays `0.5`. NaN and the
/// infinities have no literal form.
pub fn float_literal(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(CodegenError::InvalidFloatLiteral { value });
    }
    let mut text = host_number(value);
    if !text.contains('.') {
        text.push_str(".0");
    }
    Ok(text)
}

/// Generate an Embree material header for every function of a program.
pub fn generate(program: &TypedProgram, options: &EmbreeOptions) -> Result<Output> {
    emit(&program.functions, options)
}

/// Generate an Embree material header for a single function.
pub fn generate_function(func: &TypedFunction, options: &EmbreeOptions) -> Result<Output> {
    emit(std::slice::from_ref(func), options)
}

fn emit(functions: &[TypedFunction], options: &EmbreeOptions) -> Result<Output> {
    let mut out = LineBuffer::new();
    let mut renderer = Renderer::new(&Embree);

    if !options.omit_header {
        for line in HEADER {
            out.append_line(line);
        }
    }
    for (i, func) in functions.iter().enumerate() {
        if i > 0 {
            out.append_line("");
        }
        renderer.function(&mut out, func, |r, out| statements(r, out, &func.body))?;
    }
    if !options.omit_header {
        for line in EPILOG {
            out.append_line(line);
        }
    }

    Ok(Output {
        code: out.finish(),
        warnings: renderer.into_warnings(),
    })
}

fn statements(
    r: &mut Renderer<'_, Embree>,
    out: &mut LineBuffer,
    body: &[TypedStmt],
) -> Result<()> {
    for stmt in body {
        match stmt {
            TypedStmt::VarDecl(decls) => {
                for decl in decls {
                    out.append_line(r.declarator(decl)?);
                }
            }
            TypedStmt::Expr(expr) => out.append_line(format!("{};", r.expr(expr)?)),
            TypedStmt::Return(argument) => out.append_line(r.return_stmt(argument.as_ref())?),
            TypedStmt::If {
                test,
                consequent,
                alternate,
            } => {
                out.append_line(format!("if ({}) {{", r.expr(test)?));
                out.indent();
                statements(r, out, consequent)?;
                out.dedent();
                if let Some(alternate) = alternate {
                    out.append_line("} else {");
                    out.indent();
                    statements(r, out, alternate)?;
                    out.dedent();
                }
                out.append_line("}");
            }
            TypedStmt::Block(body) => {
                out.append_line("{");
                out.indent();
                statements(r, out, body)?;
                out.dedent();
                out.append_line("}");
            }
        }
    }
    Ok(())
}
