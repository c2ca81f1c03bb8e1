//! Ariadne-based diagnostic rendering for inference errors.
//!
//! Output is colorless unless asked otherwise, so rendered diagnostics are
//! stable enough to snapshot. Errors from trees without source ranges render
//! as a bare message.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use shade_common::{LineIndex, Span};

use crate::error::TypeError;

/// How the CLI reports diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagnosticOptions {
    pub color: bool,
    /// One JSON object per diagnostic instead of a rendered report.
    pub json: bool,
}

/// The label under the failing span.
fn label_message(error: &TypeError) -> String {
    match error {
        TypeError::UnresolvedIdentifier { .. } => "not found in scope or injections".to_string(),
        TypeError::UnknownMember { object, .. } => format!("not a member of {}", object),
        TypeError::UnknownConstructor { .. } => "not constructible".to_string(),
        TypeError::ArgumentTypeMismatch {
            expected, found, ..
        } => format!("expected {}, found {}", expected, found),
        TypeError::ArityMismatch { found, .. } => format!("{} argument(s) given", found),
        TypeError::NotCallable { ty, .. } => format!("has type {}", ty),
        TypeError::IncompatibleOperandKinds { left, right, .. } => {
            format!("Object({}) and Object({})", left, right)
        }
        TypeError::InvalidOperand { ty, .. } => format!("operand of type {}", ty),
        TypeError::BranchTypeMismatch {
            consequent,
            alternate,
            ..
        } => format!("{} vs {}", consequent, alternate),
        TypeError::AssignmentTypeMismatch { found, .. } => format!("this is {}", found),
        TypeError::InvalidAssignmentTarget { .. } => "not assignable".to_string(),
        TypeError::UntypedDeclaration { .. } => "declared here".to_string(),
        TypeError::UntypedParameter { .. } => "parameter without a type".to_string(),
        TypeError::ReturnTypeMismatch { second, .. } => format!("this returns {}", second),
        TypeError::UnsupportedSyntax { .. } => "outside the shader subset".to_string(),
    }
}

fn help_message(error: &TypeError) -> Option<String> {
    match error {
        TypeError::UntypedParameter { name, .. } => Some(format!(
            "add `{} = \"<type>\"` to the [inject] table",
            name
        )),
        TypeError::UntypedDeclaration { name, .. } => Some(format!(
            "initialize `{}` or assign to it before the end of its block",
            name
        )),
        TypeError::ReturnTypeMismatch { first, .. } => {
            Some(format!("earlier returns produce {}", first))
        }
        TypeError::IncompatibleOperandKinds { .. } => {
            Some("operands of one operator must share an object kind".to_string())
        }
        _ => None,
    }
}

/// Render a type error with source excerpts.
pub fn render_diagnostic(error: &TypeError, source: &str, filename: &str) -> String {
    render_with(error, source, filename, DiagnosticOptions::default())
}

pub fn render_with(
    error: &TypeError,
    source: &str,
    filename: &str,
    options: DiagnosticOptions,
) -> String {
    let code = error.code();
    let Some(span) = error.span() else {
        return format!("error[{}]: {} ({})\n", code, error, filename);
    };
    let range: Range<usize> = span.to_range(source.len());
    let config = Config::default().with_color(options.color);

    let mut builder = Report::build(ReportKind::Error, range.clone())
        .with_code(code)
        .with_message(error.to_string())
        .with_config(config)
        .with_label(
            Label::new(range)
                .with_message(label_message(error))
                .with_color(Color::Red),
        );
    if let Some(help) = help_message(error) {
        builder.set_help(help);
    }

    let mut buf = Vec::new();
    if builder
        .finish()
        .write(Source::from(source), &mut buf)
        .is_err()
    {
        return format!("error[{}]: {}\n", code, error);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A machine-readable diagnostic. Line and column are 1-based and present
/// only when both the error span and the source text are known.
pub fn render_json(error: &TypeError, source: Option<&str>, filename: &str) -> serde_json::Value {
    let spans: Vec<serde_json::Value> = error
        .span()
        .map(|span: Span| {
            let mut value = serde_json::json!({
                "file": filename,
                "start": span.start,
                "end": span.end,
                "label": label_message(error),
            });
            if let Some(source) = source {
                let (line, column) = LineIndex::new(source).line_col(span.start);
                value["line"] = line.into();
                value["column"] = column.into();
            }
            value
        })
        .into_iter()
        .collect();

    serde_json::json!({
        "code": error.code(),
        "severity": "error",
        "message": error.to_string(),
        "file": filename,
        "spans": spans,
        "help": help_message(error),
    })
}
