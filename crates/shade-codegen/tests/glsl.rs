//! GLSL backend output tests.

use shade_ast::build::*;
use shade_ast::{BinaryOp, FunctionDecl, UnaryOp};
use shade_codegen::glsl::{generate, generate_function};
use shade_codegen::{CodegenError, GlslOptions};
use shade_typeck::{
    infer, ConstantValue, InjectionMap, ObjectKind, Registry, SemanticType, TypedFunction,
};

// ── Helpers ────────────────────────────────────────────────────────────

fn typed(func: FunctionDecl, injections: InjectionMap) -> TypedFunction {
    match infer(&func, &injections) {
        Ok(typed) => typed,
        Err(err) => panic!("inference failed: {}", err),
    }
}

fn no_header() -> GlslOptions {
    GlslOptions {
        omit_header: true,
        ..GlslOptions::default()
    }
}

fn float3() -> SemanticType {
    SemanticType::Object(ObjectKind::Float3)
}

// ── Functions ──────────────────────────────────────────────────────────

#[test]
fn identity_shader_with_header() {
    let func = typed(
        function("shade", &["env"], vec![ret(ident("env"))]),
        InjectionMap::new().with("env", float3()),
    );
    let output = generate_function(&func, &GlslOptions::default()).unwrap();
    assert!(output.is_clean());
    insta::assert_snapshot!(output.code, @r"
    // Generated by shade.js
    precision mediump float;
    vec3 shade(env) {
        return env;
    }
    ");
}

#[test]
fn header_respects_options() {
    let func = typed(function("main", &[], vec![]), InjectionMap::new());

    let highp = GlslOptions {
        float_precision: "highp".into(),
        ..GlslOptions::default()
    };
    let output = generate_function(&func, &highp).unwrap();
    assert_eq!(
        output.code,
        "// Generated by shade.js\nprecision highp float;\nvoid main(void) {\n}"
    );

    let output = generate_function(&func, &no_header()).unwrap();
    assert_eq!(output.code, "void main(void) {\n}");
}

#[test]
fn declarations_calls_and_constructors() {
    // var n = Shade.normalize(env.normal);
    // var c = new Color(env.frequency % 1.0, 0.5, 1);
    // c = c * 2;
    // return c;
    let func = function(
        "shade",
        &["env"],
        vec![
            var("n", call(path("Shade.normalize"), vec![path("env.normal")])),
            var(
                "c",
                new(
                    "Color",
                    vec![
                        binary(BinaryOp::Rem, path("env.frequency"), num(1.0)),
                        num(0.5),
                        int(1),
                    ],
                ),
            ),
            expr_stmt(assign(
                ident("c"),
                binary(BinaryOp::Mul, ident("c"), int(2)),
            )),
            ret(ident("c")),
        ],
    );
    let injections = InjectionMap::new()
        .with("env.normal", float3())
        .with("env.frequency", SemanticType::Number);
    let output = generate_function(&typed(func, injections), &no_header()).unwrap();
    assert!(output.is_clean());
    insta::assert_snapshot!(output.code, @r"
    vec4 shade(env) {
        vec3 n = Shade.normalize(env.normal);
        vec4 c = vec4(env.frequency % 1, 0.5, 1);
        c = c * 2;
        return c;
    }
    ");
}

#[test]
fn constants_propagate_into_output() {
    let func = function(
        "shade",
        &["env"],
        vec![ret(binary(BinaryOp::Mul, path("env.scale"), num(1.5)))],
    );
    let injections = InjectionMap::new().with_constant(
        "env.scale",
        SemanticType::Number,
        ConstantValue::Number(2.0),
    );
    let output = generate_function(&typed(func, injections), &no_header()).unwrap();
    assert_eq!(output.code, "float shade(env) {\n    return 3;\n}");
}

#[test]
fn assigned_constant_path_is_written_by_name() {
    // function f(env) { env.scale = 3.0; return env.scale; }
    let func = function(
        "f",
        &["env"],
        vec![
            expr_stmt(assign(path("env.scale"), num(3.0))),
            ret(path("env.scale")),
        ],
    );
    let injections = InjectionMap::new().with_constant(
        "env.scale",
        SemanticType::Number,
        ConstantValue::Number(2.0),
    );
    let output = generate_function(&typed(func, injections), &no_header()).unwrap();
    assert!(output.is_clean());
    insta::assert_snapshot!(output.code, @r"
    float f(env) {
        env.scale = 3;
        return env.scale;
    }
    ");
}

#[test]
fn assigned_free_constant_is_written_by_name() {
    // function f() { var a = scale * 2.0; scale = 3.0; return scale * 2.0; }
    let func = function(
        "f",
        &[],
        vec![
            var("a", binary(BinaryOp::Mul, ident("scale"), num(2.0))),
            expr_stmt(assign(ident("scale"), num(3.0))),
            ret(binary(BinaryOp::Mul, ident("scale"), num(2.0))),
        ],
    );
    let injections =
        InjectionMap::new().with_constant("scale", SemanticType::Number, ConstantValue::Number(2.0));
    let output = generate_function(&typed(func, injections), &no_header()).unwrap();
    insta::assert_snapshot!(output.code, @r"
    float f(void) {
        float a = 4;
        scale = 3;
        return scale * 2;
    }
    ");
}

#[test]
fn nested_operators_keep_their_grouping() {
    let func = function(
        "f",
        &["a", "b", "c"],
        vec![ret(binary(
            BinaryOp::Mul,
            binary(BinaryOp::Add, ident("a"), ident("b")),
            ident("c"),
        ))],
    );
    let injections = InjectionMap::new()
        .with("a", SemanticType::Number)
        .with("b", SemanticType::Number)
        .with("c", SemanticType::Number);
    let output = generate_function(&typed(func, injections), &no_header()).unwrap();
    assert_eq!(output.code, "float f(a, b, c) {\n    return (a + b) * c;\n}");
}

#[test]
fn program_functions_are_separated_by_a_blank_line() {
    let program = program(vec![
        function("first", &[], vec![ret(num(0.5))]),
        function("second", &[], vec![]),
    ]);
    let typed = shade_typeck::infer_program(&program, &InjectionMap::new(), &Registry::builtin())
        .expect("inference");
    let output = generate(&typed, &no_header()).unwrap();
    insta::assert_snapshot!(output.code, @r"
    float first(void) {
        return 0.5;
    }

    void second(void) {
    }
    ");
}

// ── Unsupported forms ──────────────────────────────────────────────────

#[test]
fn control_flow_becomes_a_marker() {
    let func = function(
        "shade",
        &["flag"],
        vec![
            if_(ident("flag"), vec![ret(num(1.0))], None),
            ret(num(0.0)),
        ],
    );
    let output = generate_function(
        &typed(func, InjectionMap::new().with("flag", SemanticType::Boolean)),
        &no_header(),
    )
    .unwrap();
    assert!(!output.is_clean());
    assert_eq!(
        output.warnings,
        ["unsupported statement IfStatement left as a marker"]
    );
    insta::assert_snapshot!(output.code, @r"
    float shade(flag) {
        <unsupported statement: IfStatement>
        return 0;
    }
    ");
}

#[test]
fn conditional_and_unary_are_placeholders() {
    let func = function(
        "shade",
        &["flag", "x"],
        vec![
            var("y", unary(UnaryOp::Neg, ident("x"))),
            ret(conditional(ident("flag"), ident("x"), ident("y"))),
        ],
    );
    let injections = InjectionMap::new()
        .with("flag", SemanticType::Boolean)
        .with("x", SemanticType::Number);
    let output = generate_function(&typed(func, injections), &no_header()).unwrap();
    assert_eq!(output.warnings.len(), 2);
    insta::assert_snapshot!(output.code, @r"
    float shade(flag, x) {
        float y = <unhandled: UnaryExpression>;
        return <unhandled: ConditionalExpression>;
    }
    ");
}

#[test]
fn int_has_no_glsl_type() {
    let func = typed(function("count", &[], vec![ret(int(3))]), InjectionMap::new());
    assert_eq!(
        generate_function(&func, &no_header()),
        Err(CodegenError::UnsupportedTargetType {
            target: "GLSL",
            ty: SemanticType::Int,
        })
    );
}

#[test]
fn matrices_have_no_glsl_type() {
    let func = typed(
        function("m", &[], vec![var("t", new("Matrix4", vec![]))]),
        InjectionMap::new(),
    );
    let err = generate_function(&func, &no_header()).unwrap_err();
    assert_eq!(err.to_string(), "GLSL has no type for Object(Matrix4)");
}
