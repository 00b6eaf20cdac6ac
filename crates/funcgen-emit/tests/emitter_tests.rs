use funcgen_core::{
    AsmFunction, BinaryOp, Expr, FuncType, FunctionAttribute, FunctionDefinition, FunctionInfo,
    FunctionRegistry, Param, Placement, Stmt,
};
use funcgen_emit::{EmitterConfig, Emitter, FuncEmitter, FunctionEmitter, OutputFormat};
use pretty_assertions::assert_eq;

fn sample_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry
        .register_ordinary(
            FunctionDefinition::new(
                "recv_internal",
                vec![Param::new("in_msg", FuncType::Cell)],
                FuncType::Unit,
                vec![
                    Stmt::let_(
                        FuncType::Hole,
                        "total",
                        Expr::call(
                            "add",
                            vec![Expr::int(1), Expr::call("__tact_my_balance", vec![])],
                        ),
                    ),
                    Stmt::expr(Expr::call("__tact_context", vec![])),
                ],
            )
            .with_attrs(vec![FunctionAttribute::Impure]),
            FunctionInfo::new().as_entry_point(),
        )
        .unwrap();
    registry
        .register_ordinary(
            FunctionDefinition::new(
                "add",
                vec![Param::new("a", FuncType::Int), Param::new("b", FuncType::Int)],
                FuncType::Int,
                vec![Stmt::ret(Expr::binary(
                    BinaryOp::Add,
                    Expr::id("a"),
                    Expr::id("b"),
                ))],
            )
            .with_attrs(vec![FunctionAttribute::Inline]),
            FunctionInfo::new().with_placement(Placement::of_type("Math")),
        )
        .unwrap();
    registry
        .register_assembly(
            AsmFunction::new("__tact_my_balance", vec![], FuncType::Int, "BALANCE FIRST"),
            FunctionInfo::new().with_placement(Placement::stdlib()),
        )
        .unwrap();
    registry
        .register_placeholder(
            "__tact_context",
            FunctionInfo::new().with_placement(Placement::stdlib()),
        )
        .unwrap();
    registry
        .register_ordinary(
            FunctionDefinition::new("unused", vec![], FuncType::Unit, vec![]),
            FunctionInfo::new(),
        )
        .unwrap();
    registry
}

#[test]
fn test_flat_emission_follows_extraction_order() {
    let registry = sample_registry();
    let output = FuncEmitter::new(registry.extract()).emit_to_string().unwrap();

    assert_eq!(
        output,
        "\
int add(int a, int b) inline {
    return a + b;
}

int __tact_my_balance() asm \"BALANCE FIRST\";

() recv_internal(cell in_msg) impure {
    var total = add(1, __tact_my_balance());
    __tact_context();
}

;; === entry points ===
;; recv_internal
"
    );
}

#[test]
fn test_grouped_emission_by_placement() {
    let registry = sample_registry();
    let config = EmitterConfig {
        group_by_placement: true,
        annotate_placeholders: true,
        ..EmitterConfig::default()
    };
    let output = FuncEmitter::new(registry.extract())
        .with_config(config)
        .emit_to_string()
        .unwrap();

    assert_eq!(
        output,
        "\
;; === declarations ===
int add(int a, int b) inline;
int __tact_my_balance() asm \"BALANCE FIRST\";
() recv_internal(cell in_msg) impure;

;; === stdlib ===

;; placeholder: __tact_context

;; === type:Math ===

int add(int a, int b) inline {
    return a + b;
}

;; === unplaced ===

() recv_internal(cell in_msg) impure {
    var total = add(1, __tact_my_balance());
    __tact_context();
}

;; === entry points ===
;; recv_internal
"
    );
}

#[test]
fn test_grouped_asm_precedes_callers_in_earlier_sections() {
    let mut registry = FunctionRegistry::new();
    registry
        .register_ordinary(
            FunctionDefinition::new(
                "helper",
                vec![],
                FuncType::Int,
                vec![Stmt::ret(Expr::call("not_null", vec![]))],
            ),
            FunctionInfo::new()
                .with_placement(Placement::stdlib())
                .as_entry_point(),
        )
        .unwrap();
    registry
        .register_assembly(
            AsmFunction::new("not_null", vec![], FuncType::Int, "DUP ISNULL 128 THROWIF"),
            FunctionInfo::new().with_placement(Placement::of_type("Foo")),
        )
        .unwrap();

    let config = EmitterConfig {
        group_by_placement: true,
        ..EmitterConfig::default()
    };
    let output = FuncEmitter::new(registry.extract())
        .with_config(config)
        .emit_to_string()
        .unwrap();

    let defined_at = output.find("not_null() asm").unwrap();
    let used_at = output.find("return not_null();").unwrap();
    assert!(defined_at < used_at);
    assert_eq!(output.matches("asm \"DUP ISNULL 128 THROWIF\"").count(), 1);
    assert!(!output.contains(";; === type:Foo ==="));
}

#[test]
fn test_sections_are_ranked() {
    let registry = sample_registry();
    let emitter = FuncEmitter::new(registry.extract());
    let titles: Vec<String> = emitter.sections().iter().map(|s| s.title()).collect();

    assert_eq!(titles, vec!["stdlib", "type:Math", "unplaced"]);
    assert_eq!(emitter.sections()[0].functions.len(), 2);
}

#[test]
fn test_json_output_lists_every_extracted_function() {
    let registry = sample_registry();
    let json = FuncEmitter::new(registry.extract())
        .render(OutputFormat::Json)
        .unwrap();
    let records: serde_json::Value = serde_json::from_str(&json).unwrap();
    let records = records.as_array().unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["name"], "add");
    assert_eq!(records[0]["placement"], "type:Math");
    assert_eq!(records[2]["name"], "__tact_context");
    assert_eq!(records[2]["kind"], "placeholder");
    assert_eq!(records[3]["entry_point"], true);
    assert_eq!(
        records[3]["dependencies"],
        serde_json::json!(["add", "__tact_my_balance", "__tact_context"])
    );
}

#[test]
fn test_control_flow_statements() {
    let def = FunctionDefinition::new(
        "loop",
        vec![Param::new("n", FuncType::Int)],
        FuncType::Int,
        vec![
            Stmt::Let {
                ty: FuncType::Int,
                target: Expr::id("acc"),
                value: None,
            },
            Stmt::Repeat {
                count: Expr::id("n"),
                body: vec![Stmt::Assign {
                    target: Expr::id("acc"),
                    op: Some(BinaryOp::Add),
                    value: Expr::int(2),
                }],
            },
            Stmt::If {
                cond: Expr::binary(BinaryOp::Gt, Expr::id("acc"), Expr::int(10)),
                negated: true,
                then: vec![Stmt::Block(vec![Stmt::expr(Expr::call(
                    "throw",
                    vec![Expr::int(5)],
                ))])],
                otherwise: Some(vec![Stmt::assign(Expr::id("acc"), Expr::int(0))]),
            },
            Stmt::While {
                cond: Expr::binary(BinaryOp::Lt, Expr::id("acc"), Expr::id("n")),
                body: vec![Stmt::expr(Expr::modifying(Expr::id("acc"), "inc", vec![]))],
            },
            Stmt::DoUntil {
                body: vec![Stmt::expr(Expr::call("step", vec![]))],
                cond: Expr::Bool(true),
            },
            Stmt::TryCatch {
                body: vec![Stmt::expr(Expr::call("risky", vec![]))],
                catch_vars: vec!["_".to_string(), "code".to_string()],
                handler: vec![Stmt::ret(Expr::id("code"))],
            },
            Stmt::ret(Expr::id("acc")),
        ],
    );

    let mut registry = FunctionRegistry::new();
    registry
        .register_ordinary(def, FunctionInfo::new().as_entry_point())
        .unwrap();
    let extracted = registry.extract();

    let output = FunctionEmitter::default()
        .emit_to_string(extracted[0])
        .unwrap();

    assert_eq!(
        output,
        "\
int loop(int n) {
    int acc;
    repeat (n) {
        acc += 2;
    }
    ifnot (acc > 10) {
        {
            throw(5);
        }
    } else {
        acc = 0;
    }
    while (acc < n) {
        acc~inc();
    }
    do {
        step();
    } until (true);
    try {
        risky();
    } catch (_, code) {
        return code;
    }
    return acc;
}
"
    );
}

#[test]
fn test_placeholders_are_silent_by_default() {
    let mut registry = FunctionRegistry::new();
    registry
        .register_placeholder("only", FunctionInfo::new().as_entry_point())
        .unwrap();

    let config = EmitterConfig {
        emit_entry_points: false,
        ..EmitterConfig::default()
    };
    let output = FuncEmitter::new(registry.extract())
        .with_config(config)
        .emit_to_string()
        .unwrap();
    assert_eq!(output, "");
}
