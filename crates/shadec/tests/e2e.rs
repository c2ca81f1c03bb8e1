//! End-to-end tests for the shadec CLI.
//!
//! Each test writes an ESTree JSON program (and optionally a config file)
//! into a temp directory, invokes the binary, and checks its output.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::json;

// ── Helpers ────────────────────────────────────────────────────────────

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}

fn shadec(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shadec"))
        .args(args)
        .output()
        .expect("failed to invoke shadec")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "shadec failed:\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

fn ident(name: &str) -> serde_json::Value {
    json!({ "type": "Identifier", "name": name })
}

fn function(name: &str, params: &[&str], body: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "type": "Program",
        "body": [{
            "type": "FunctionDeclaration",
            "id": ident(name),
            "params": params.iter().map(|p| ident(p)).collect::<Vec<_>>(),
            "body": { "type": "BlockStatement", "body": body }
        }]
    })
}

fn ret(argument: serde_json::Value) -> serde_json::Value {
    json!({ "type": "ReturnStatement", "argument": argument })
}

/// `function shade(env) { return env; }`
fn identity_shader() -> String {
    function("shade", &["env"], vec![ret(ident("env"))]).to_string()
}

// ── compile ────────────────────────────────────────────────────────────

#[test]
fn compile_glsl_to_stdout() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = write_file(dir.path(), "shade.json", &identity_shader());
    let config = write_file(dir.path(), "shade.toml", "[inject]\nenv = \"vec3\"\n");

    let output = shadec(&[
        "compile",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "// Generated by shade.js\nprecision mediump float;\nvec3 shade(env) {\n    return env;\n}\n"
    );
}

#[test]
fn flags_override_config() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = write_file(dir.path(), "shade.json", &identity_shader());
    let config = write_file(
        dir.path(),
        "shade.toml",
        "[inject]\nenv = \"color\"\n\n[glsl]\nfloat_precision = \"lowp\"\n",
    );

    let output = shadec(&[
        "compile",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--float-precision",
        "highp",
    ]);
    assert_success(&output);
    assert!(stdout(&output).contains("precision highp float;"));
    assert!(stdout(&output).contains("vec4 shade(env) {"));
}

#[test]
fn compile_embree_to_file() {
    // function scale() { return 2.5 * 2; }
    let program = function(
        "scale",
        &[],
        vec![ret(json!({
            "type": "BinaryExpression",
            "operator": "*",
            "left": { "type": "Literal", "value": 2.5, "raw": "2.5" },
            "right": { "type": "Literal", "value": 2, "raw": "2" }
        }))],
    );
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = write_file(dir.path(), "scale.json", &program.to_string());
    let out_path = dir.path().join("material.h");

    let output = shadec(&[
        "compile",
        input.to_str().unwrap(),
        "--target",
        "embree",
        "--omit-header",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert_success(&output);
    assert!(stdout(&output).is_empty());
    let code = std::fs::read_to_string(&out_path).expect("output file");
    assert_eq!(code, "float scale(void) {\n    return 5.0;\n}\n");
}

#[test]
fn placeholders_fail_unless_allowed() {
    // function shade(x) { return -x; }
    let program = function(
        "shade",
        &["x"],
        vec![ret(json!({
            "type": "UnaryExpression",
            "operator": "-",
            "prefix": true,
            "argument": ident("x")
        }))],
    );
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = write_file(dir.path(), "shade.json", &program.to_string());
    let config = write_file(dir.path(), "shade.toml", "[inject]\nx = \"number\"\n");
    let base = [
        "compile",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--omit-header",
    ];

    let output = shadec(&base);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("warning: unhandled UnaryExpression rendered as a placeholder"));
    // Reported once, not again through the log.
    assert_eq!(err.matches("unhandled UnaryExpression").count(), 1, "got: {}", err);
    assert!(err.contains("--allow-placeholders"), "got: {}", err);

    let mut allowed = base.to_vec();
    allowed.push("--allow-placeholders");
    let output = shadec(&allowed);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "float shade(x) {\n    return <unhandled: UnaryExpression>;\n}\n"
    );

    // Embree translates unary minus directly.
    let mut embree = base.to_vec();
    embree.extend(["--target", "embree"]);
    let output = shadec(&embree);
    assert_success(&output);
    assert_eq!(stdout(&output), "float shade(x) {\n    return -x;\n}\n");
}

// ── check ──────────────────────────────────────────────────────────────

#[test]
fn check_prints_signatures() {
    // function mix(env) { return env.frequency % 1.0; }
    let program = function(
        "mix",
        &["env"],
        vec![ret(json!({
            "type": "BinaryExpression",
            "operator": "%",
            "left": {
                "type": "MemberExpression",
                "computed": false,
                "object": ident("env"),
                "property": ident("frequency")
            },
            "right": { "type": "Literal", "value": 1.0, "raw": "1.0" }
        }))],
    );
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = write_file(dir.path(), "mix.json", &program.to_string());
    let config = write_file(
        dir.path(),
        "shade.toml",
        "[inject]\nenv = \"vec3\"\n\"env.frequency\" = \"number\"\n",
    );

    let output = shadec(&[
        "check",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output), "mix(env: Object(Float3)) -> Number\n");
}

// ── Diagnostics ────────────────────────────────────────────────────────

const TEXTURE_SOURCE: &str = "function shade(env) {\n    return new Texture(env);\n}\n";

/// The ESTree of `TEXTURE_SOURCE`, with ranges.
fn texture_program() -> String {
    json!({
        "type": "Program",
        "range": [0, 51],
        "body": [{
            "type": "FunctionDeclaration",
            "range": [0, 51],
            "id": { "type": "Identifier", "name": "shade", "range": [9, 14] },
            "params": [{ "type": "Identifier", "name": "env", "range": [15, 18] }],
            "body": {
                "type": "BlockStatement",
                "range": [20, 51],
                "body": [{
                    "type": "ReturnStatement",
                    "range": [26, 50],
                    "argument": {
                        "type": "NewExpression",
                        "range": [33, 49],
                        "callee": { "type": "Identifier", "name": "Texture", "range": [37, 44] },
                        "arguments": [{ "type": "Identifier", "name": "env", "range": [45, 48] }]
                    }
                }]
            }
        }]
    })
    .to_string()
}

#[test]
fn type_error_with_source_excerpt() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = write_file(dir.path(), "shade.json", &texture_program());
    let source = write_file(dir.path(), "shade.js", TEXTURE_SOURCE);
    let config = write_file(dir.path(), "shade.toml", "[inject]\nenv = \"vec3\"\n");

    let output = shadec(&[
        "check",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--source",
        source.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("[S0003]"), "got: {}", err);
    assert!(err.contains("`Texture` is not a known constructor"), "got: {}", err);
    assert!(err.contains("return new Texture(env);"), "got: {}", err);
    assert!(err.contains("error: Type inference failed"), "got: {}", err);
}

#[test]
fn type_error_as_json() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = write_file(dir.path(), "shade.json", &texture_program());
    let source = write_file(dir.path(), "shade.js", TEXTURE_SOURCE);
    let config = write_file(dir.path(), "shade.toml", "[inject]\nenv = \"vec3\"\n");

    let output = shadec(&[
        "compile",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--source",
        source.to_str().unwrap(),
        "--json",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    let lines: Vec<&str> = err.lines().collect();
    assert_eq!(lines.len(), 2, "got: {}", err);

    let diag: serde_json::Value = serde_json::from_str(lines[0]).expect("JSON diagnostic");
    assert_eq!(diag["code"], "S0003");
    assert_eq!(diag["severity"], "error");
    assert_eq!(diag["spans"][0]["line"], 2);

    let summary: serde_json::Value = serde_json::from_str(lines[1]).expect("JSON summary");
    assert_eq!(summary["code"], "C0001");
}

#[test]
fn missing_injection_without_source() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = write_file(dir.path(), "shade.json", &identity_shader());

    let output = shadec(&["check", input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(
        err.contains("error[S0013]: parameter `env` of `shade` has no injected type"),
        "got: {}",
        err
    );
}

#[test]
fn unreadable_input_is_an_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let missing = dir.path().join("missing.json");
    let output = shadec(&["compile", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: Failed to read"));
}

#[test]
fn malformed_ast_is_an_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = write_file(dir.path(), "bad.json", "{ \"type\": \"Program\" ");
    let output = shadec(&["check", input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load"));
}
