use funcgen_core::{
    BodyKind, FuncGenError, FunctionInfo, Manifest, Placement, Registration, RegistrationPolicy,
};
use pretty_assertions::assert_eq;
use std::io::Write;

const MANIFEST: &str = r#"{
  "functions": [
    {
      "kind": "ordinary",
      "definition": {
        "name": "recv_internal",
        "params": [{ "name": "msg", "ty": "cell" }],
        "return_ty": "unit",
        "body": [
          { "expr": { "call": { "fun": { "id": "handle" }, "args": [{ "id": "msg" }] } } }
        ]
      },
      "info": { "entry_point": true }
    },
    {
      "kind": "ordinary",
      "definition": {
        "name": "handle",
        "params": [{ "name": "msg", "ty": "cell" }],
        "return_ty": "int",
        "body": [{ "return": { "call": { "fun": { "id": "__tact_now" } } } }]
      },
      "info": { "placement": "type:Clock" }
    },
    {
      "kind": "asm",
      "definition": { "name": "__tact_now", "return_ty": "int", "asm": "NOW" },
      "info": { "placement": "stdlib" }
    },
    { "kind": "placeholder", "name": "__tact_context" }
  ]
}"#;

#[test]
fn test_manifest_builds_registry() {
    let registry = Manifest::from_json(MANIFEST)
        .unwrap()
        .into_registry()
        .unwrap();

    assert_eq!(registry.len(), 4);
    assert_eq!(registry.policy(), RegistrationPolicy::Overwrite);
    assert_eq!(
        registry.get("handle").unwrap().placement,
        Some(Placement::of_type("Clock"))
    );
    assert_eq!(registry.get("__tact_now").unwrap().kind(), BodyKind::Asm);
    assert!(registry.get("__tact_context").unwrap().is_placeholder());

    let names: Vec<_> = registry.extract().iter().map(|f| f.name.clone()).collect();
    assert_eq!(names, vec!["__tact_now", "handle", "recv_internal"]);
}

#[test]
fn test_manifest_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MANIFEST.as_bytes()).unwrap();

    let manifest = Manifest::from_path(file.path()).unwrap();
    assert_eq!(manifest.functions.len(), 4);
    assert_eq!(manifest.functions[3].name(), "__tact_context");
}

#[test]
fn test_manifest_json_roundtrip_preserves_registrations() {
    let manifest = Manifest::from_json(MANIFEST).unwrap();
    let json = manifest.to_json_pretty().unwrap();
    assert_eq!(Manifest::from_json(&json).unwrap(), manifest);
}

#[test]
fn test_strict_manifest_rejects_duplicates() {
    let manifest = Manifest {
        policy: RegistrationPolicy::Strict,
        functions: vec![
            Registration::Placeholder {
                name: "dup".to_string(),
                info: FunctionInfo::new(),
            },
            Registration::Placeholder {
                name: "dup".to_string(),
                info: FunctionInfo::new().as_entry_point(),
            },
        ],
    };

    assert!(matches!(
        manifest.into_registry(),
        Err(FuncGenError::DuplicateFunction(_))
    ));
}

#[test]
fn test_malformed_manifest_reports_error() {
    assert!(matches!(
        Manifest::from_json("{ \"functions\": [ { \"kind\": \"inline\" } ] }"),
        Err(FuncGenError::Manifest(_))
    ));
    assert!(matches!(
        Manifest::from_path("/nonexistent/funcgen/manifest.json"),
        Err(FuncGenError::Io(_))
    ));
}
