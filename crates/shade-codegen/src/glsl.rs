//! GLSL (ES fragment shader) backend.
//!
//! Straight-line functions only: declarations, assignments, expression
//! statements, and returns. Control flow is outside what this backend
//! translates; such statements become a visible marker line.

use serde::Deserialize;
use shade_typeck::typed::{TypedFunction, TypedProgram, TypedStmt};
use shade_typeck::{ObjectKind, SemanticType};

use crate::emit::LineBuffer;
use crate::error::CodegenError;
use crate::render::{host_number, Dialect, Renderer, Result};
use crate::Output;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlslOptions {
    pub omit_header: bool,
    /// Default float precision qualifier (`lowp`, `mediump`, `highp`).
    pub float_precision: String,
}

impl Default for GlslOptions {
    fn default() -> Self {
        GlslOptions {
            omit_header: false,
            float_precision: "mediump".to_string(),
        }
    }
}

pub struct Glsl;

impl Dialect for Glsl {
    fn name(&self) -> &'static str {
        "GLSL"
    }

    fn map_type(&self, ty: &SemanticType) -> Result<&'static str> {
        match ty {
            SemanticType::Object(ObjectKind::Color) => Ok("vec4"),
            SemanticType::Object(ObjectKind::Float3) => Ok("vec3"),
            SemanticType::Object(ObjectKind::Float2) => Ok("vec2"),
            SemanticType::Number => Ok("float"),
            SemanticType::Boolean => Ok("bool"),
            SemanticType::Undefined => Ok("void"),
            _ => Err(CodegenError::UnsupportedTargetType {
                target: self.name(),
                ty: ty.clone(),
            }),
        }
    }

    fn number(&self, value: f64, _ty: &SemanticType) -> Result<String> {
        Ok(host_number(value))
    }

    fn supports_conditional(&self) -> bool {
        false
    }

    fn supports_unary(&self) -> bool {
        false
    }
}

/// Generate GLSL for every function of a program.
pub fn generate(program: &TypedProgram, options: &GlslOptions) -> Result<Output> {
    emit(&program.functions, options)
}

/// Generate GLSL for a single function.
pub fn generate_function(func: &TypedFunction, options: &GlslOptions) -> Result<Output> {
    emit(std::slice::from_ref(func), options)
}

fn emit(functions: &[TypedFunction], options: &GlslOptions) -> Result<Output> {
    let mut out = LineBuffer::new();
    let mut renderer = Renderer::new(&Glsl);

    if !options.omit_header {
        out.append_line("// Generated by shade.js");
        out.append_line(format!("precision {} float;", options.float_precision));
    }
    for (i, func) in functions.iter().enumerate() {
        if i > 0 {
            out.append_line("");
        }
        renderer.function(&mut out, func, |r, out| statements(r, out, &func.body))?;
    }

    Ok(Output {
        code: out.finish(),
        warnings: renderer.into_warnings(),
    })
}

fn statements(r: &mut Renderer<'_, Glsl>, out: &mut LineBuffer, body: &[TypedStmt]) -> Result<()> {
    for stmt in body {
        match stmt {
            TypedStmt::VarDecl(decls) => {
                for decl in decls {
                    out.append_line(r.declarator(decl)?);
                }
            }
            TypedStmt::Expr(expr) => out.append_line(format!("{};", r.expr(expr)?)),
            TypedStmt::Return(argument) => out.append_line(r.return_stmt(argument.as_ref())?),
            TypedStmt::If { .. } | TypedStmt::Block(_) => {
                let kind = stmt.kind_name();
                r.warn(format!("unsupported statement {} left as a marker", kind));
                out.append_line(format!("<unsupported statement: {}>", kind));
            }
        }
    }
    Ok(())
}
