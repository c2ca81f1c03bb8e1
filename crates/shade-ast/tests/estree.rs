//! Integration tests for the ESTree JSON loader.
//!
//! The inputs mirror what esprima produces with `{ range: true, raw: true }`.

use serde_json::json;
use shade_ast::estree::{from_json, from_value};
use shade_ast::{BinaryOp, EstreeError, ExprKind, LitValue, StmtKind};
use shade_common::Span;

/// `function mix(env) { var m = env.frequency % 1.0; return m; }`
fn mix_function() -> serde_json::Value {
    json!({
        "type": "Program",
        "range": [0, 60],
        "body": [{
            "type": "FunctionDeclaration",
            "range": [0, 60],
            "id": { "type": "Identifier", "name": "mix", "range": [9, 12] },
            "params": [{ "type": "Identifier", "name": "env", "range": [13, 16] }],
            "body": {
                "type": "BlockStatement",
                "range": [18, 60],
                "body": [
                    {
                        "type": "VariableDeclaration",
                        "kind": "var",
                        "range": [20, 47],
                        "declarations": [{
                            "type": "VariableDeclarator",
                            "range": [24, 46],
                            "id": { "type": "Identifier", "name": "m", "range": [24, 25] },
                            "init": {
                                "type": "BinaryExpression",
                                "operator": "%",
                                "range": [28, 46],
                                "left": {
                                    "type": "MemberExpression",
                                    "computed": false,
                                    "range": [28, 41],
                                    "object": { "type": "Identifier", "name": "env", "range": [28, 31] },
                                    "property": { "type": "Identifier", "name": "frequency", "range": [32, 41] }
                                },
                                "right": { "type": "Literal", "value": 1.0, "raw": "1.0", "range": [43, 46] }
                            }
                        }]
                    },
                    { "type": "EmptyStatement", "range": [47, 48] },
                    {
                        "type": "ReturnStatement",
                        "range": [49, 58],
                        "argument": { "type": "Identifier", "name": "m", "range": [56, 57] }
                    }
                ]
            }
        }]
    })
}

#[test]
fn loads_function_with_spans() {
    let program = from_value(&mix_function()).expect("valid ESTree");
    assert_eq!(program.functions.len(), 1);

    let func = program.function("mix").expect("function `mix`");
    assert_eq!(func.span, Some(Span::new(0, 60)));
    assert_eq!(func.params.len(), 1);
    assert_eq!(func.params[0].name, "env");
    // The empty statement is dropped.
    assert_eq!(func.body.len(), 2);

    let StmtKind::VarDecl(decls) = &func.body[0].kind else {
        panic!("expected a variable declaration, got {:?}", func.body[0]);
    };
    assert_eq!(decls[0].name.name, "m");
    let init = decls[0].init.as_ref().expect("initializer");
    assert_eq!(init.span, Some(Span::new(28, 46)));
    let ExprKind::Binary { op, left, right } = &init.kind else {
        panic!("expected a binary expression, got {:?}", init);
    };
    assert_eq!(*op, BinaryOp::Rem);
    assert_eq!(left.dotted_path().as_deref(), Some("env.frequency"));
    let ExprKind::Literal(lit) = &right.kind else {
        panic!("expected a literal");
    };
    assert_eq!(lit.value, LitValue::Number(1.0));
    assert!(!lit.is_integral());

    assert!(matches!(func.body[1].kind, StmtKind::Return(Some(_))));
}

#[test]
fn loads_bare_function_declaration() {
    let value = mix_function()["body"][0].clone();
    let program = from_value(&value).expect("valid ESTree");
    assert_eq!(program.functions[0].name.name, "mix");
}

#[test]
fn loads_from_json_text_with_offsets() {
    let text = r#"{
        "type": "FunctionDeclaration", "start": 0, "end": 30,
        "id": { "type": "Identifier", "name": "shade", "start": 9, "end": 14 },
        "params": [],
        "body": { "type": "BlockStatement", "body": [
            { "type": "IfStatement",
              "test": { "type": "Identifier", "name": "flag" },
              "consequent": { "type": "EmptyStatement" },
              "alternate": null },
            { "type": "ForStatement" }
        ] }
    }"#;
    let program = from_json(text).expect("valid ESTree");
    let func = &program.functions[0];
    assert_eq!(func.name.span, Some(Span::new(9, 14)));

    let StmtKind::If {
        consequent,
        alternate,
        ..
    } = &func.body[0].kind
    else {
        panic!("expected an if statement");
    };
    assert_eq!(consequent.kind, StmtKind::Block(vec![]));
    assert!(alternate.is_none());

    assert_eq!(func.body[1].kind_name(), "ForStatement");
}

#[test]
fn rejects_malformed_trees() {
    assert!(matches!(from_json("{ not json"), Err(EstreeError::InvalidJson(_))));

    let missing_id = json!({
        "type": "FunctionDeclaration",
        "params": [],
        "body": { "type": "BlockStatement", "body": [] }
    });
    assert_eq!(
        from_value(&missing_id),
        Err(EstreeError::MissingField {
            node: "FunctionDeclaration".into(),
            field: "id",
            span: None,
        })
    );

    let top_level_var = json!({
        "type": "Program",
        "body": [{ "type": "VariableDeclaration", "declarations": [] }]
    });
    let err = from_value(&top_level_var).unwrap_err();
    assert_eq!(
        err.to_string(),
        "only function declarations may appear at top level, found `VariableDeclaration`"
    );
}

#[test]
fn rejects_operators_outside_the_subset() {
    let value = json!({
        "type": "FunctionDeclaration",
        "id": { "type": "Identifier", "name": "f" },
        "params": [],
        "body": { "type": "BlockStatement", "body": [{
            "type": "ReturnStatement",
            "argument": {
                "type": "BinaryExpression", "operator": "<<",
                "left": { "type": "Literal", "value": 1, "raw": "1" },
                "right": { "type": "Literal", "value": 2, "raw": "2" }
            }
        }] }
    });
    let err = from_value(&value).unwrap_err();
    assert_eq!(err.to_string(), "unsupported operator `<<` in `BinaryExpression`");
}
