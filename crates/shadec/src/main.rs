//! The shade compiler CLI.
//!
//! Provides the `shadec` command with the following subcommands:
//!
//! - `shadec compile <ast.json>` - Infer types and generate GLSL or Embree code
//! - `shadec check <ast.json>` - Infer types only and print function signatures
//!
//! The input is the ESTree JSON a JavaScript parser produces for the shader
//! source. Options:
//! - `--config` - `shade.toml` with `[inject]`, `[glsl]` and `[embree]` tables
//! - `--source` - The original JavaScript, for diagnostics with excerpts
//! - `--json` - Output diagnostics as JSON (one object per line)

mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use shade_ast::Program;
use shade_codegen::{embree, glsl, Output};
use shade_typeck::diagnostics::{render_json, render_with, DiagnosticOptions};
use shade_typeck::{infer_program, Registry, TypeError, TypedProgram};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "shadec", version, about = "The shade shader compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Target {
    Glsl,
    Embree,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer types and generate target code
    Compile {
        /// ESTree JSON of the shader program
        input: PathBuf,

        /// Configuration file with injections and backend options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Target language
        #[arg(short, long, value_enum, default_value = "glsl")]
        target: Target,

        /// Write the generated code here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Omit the generated-file header (and the Embree epilog)
        #[arg(long = "omit-header")]
        omit_header: bool,

        /// GLSL default float precision (lowp, mediump, highp)
        #[arg(long = "float-precision")]
        float_precision: Option<String>,

        /// JavaScript source the AST was parsed from, for diagnostics
        #[arg(long)]
        source: Option<PathBuf>,

        /// Output diagnostics as JSON (one object per line)
        #[arg(long)]
        json: bool,

        /// Accept output that contains placeholders for untranslated code
        #[arg(long = "allow-placeholders")]
        allow_placeholders: bool,
    },
    /// Infer types and print each function's signature
    Check {
        /// ESTree JSON of the shader program
        input: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        source: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

/// Backend settings after the config file and command-line flags are merged.
struct CompileOptions {
    target: Target,
    output: Option<PathBuf>,
    omit_header: bool,
    float_precision: Option<String>,
    allow_placeholders: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let (result, json) = match cli.command {
        Commands::Compile {
            input,
            config,
            target,
            output,
            omit_header,
            float_precision,
            source,
            json,
            allow_placeholders,
        } => {
            let options = CompileOptions {
                target,
                output,
                omit_header,
                float_precision,
                allow_placeholders,
            };
            let diag_opts = DiagnosticOptions { color: false, json };
            let result = compile(
                &input,
                config.as_deref(),
                source.as_deref(),
                &options,
                &diag_opts,
            );
            (result, json)
        }
        Commands::Check {
            input,
            config,
            source,
            json,
        } => {
            let diag_opts = DiagnosticOptions { color: false, json };
            let result = check(&input, config.as_deref(), source.as_deref(), &diag_opts);
            (result, json)
        }
    };

    if let Err(e) = result {
        if json {
            let msg = serde_json::json!({
                "code": "C0001",
                "severity": "error",
                "message": e,
                "file": "",
                "spans": [],
                "help": null
            });
            eprintln!("{}", msg);
        } else {
            eprintln!("error: {}", e);
        }
        process::exit(1);
    }
}

/// Execute the compile pipeline: load AST -> infer -> generate -> write.
fn compile(
    input: &Path,
    config: Option<&Path>,
    source: Option<&Path>,
    options: &CompileOptions,
    diag_opts: &DiagnosticOptions,
) -> Result<(), String> {
    let config = load_config(config)?;
    let typed = analyze(input, &config, source, diag_opts)?;

    let output = match options.target {
        Target::Glsl => {
            let mut glsl_opts = config.glsl.clone();
            glsl_opts.omit_header |= options.omit_header;
            if let Some(precision) = &options.float_precision {
                glsl_opts.float_precision = precision.clone();
            }
            glsl::generate(&typed, &glsl_opts)
        }
        Target::Embree => {
            let mut embree_opts = config.embree.clone();
            embree_opts.omit_header |= options.omit_header;
            embree::generate(&typed, &embree_opts)
        }
    }
    .map_err(|e| format!("Code generation failed: {}", e))?;

    report_warnings(&output, options.allow_placeholders)?;

    let mut code = output.code;
    code.push('\n');
    match &options.output {
        Some(path) => {
            std::fs::write(path, code)
                .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
            eprintln!("  Compiled: {}", path.display());
        }
        None => print!("{}", code),
    }
    Ok(())
}

/// Execute inference only and print the signature of every function.
fn check(
    input: &Path,
    config: Option<&Path>,
    source: Option<&Path>,
    diag_opts: &DiagnosticOptions,
) -> Result<(), String> {
    let config = load_config(config)?;
    let typed = analyze(input, &config, source, diag_opts)?;
    for func in &typed.functions {
        println!("{}", func.annotation());
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

/// Load the AST and run inference, reporting a type error as a diagnostic.
fn analyze(
    input: &Path,
    config: &Config,
    source: Option<&Path>,
    diag_opts: &DiagnosticOptions,
) -> Result<TypedProgram, String> {
    let text = std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read '{}': {}", input.display(), e))?;
    let program: Program = shade_ast::estree::from_json(&text)
        .map_err(|e| format!("Failed to load '{}': {}", input.display(), e))?;
    let injections = config.injections()?;

    let source_text = match source {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?,
        ),
        None => None,
    };
    let file_name = source.unwrap_or(input).display().to_string();

    infer_program(&program, &injections, &Registry::builtin()).map_err(|error| {
        report_type_error(&error, source_text.as_deref(), &file_name, diag_opts);
        "Type inference failed due to errors above.".to_string()
    })
}

/// Print a type error to stderr.
///
/// With the shader source available the error is rendered with an excerpt;
/// without it, as a one-line message.
fn report_type_error(
    error: &TypeError,
    source: Option<&str>,
    file_name: &str,
    diag_opts: &DiagnosticOptions,
) {
    if diag_opts.json {
        eprintln!("{}", render_json(error, source, file_name));
        return;
    }
    match source {
        Some(source) => eprint!("{}", render_with(error, source, file_name, *diag_opts)),
        None => eprintln!("error[{}]: {} ({})", error.code(), error, file_name),
    }
}

/// Print backend warnings; they fail the command unless placeholders are
/// allowed.
fn report_warnings(output: &Output, allow_placeholders: bool) -> Result<(), String> {
    for warning in &output.warnings {
        eprintln!("warning: {}", warning);
    }
    if output.is_clean() || allow_placeholders {
        return Ok(());
    }
    Err(format!(
        "{} placeholder(s) in generated code; pass --allow-placeholders to accept",
        output.warnings.len()
    ))
}
