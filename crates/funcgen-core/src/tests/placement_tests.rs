use crate::placement::Placement;
use crate::FuncGenError;
use pretty_assertions::assert_eq;

#[test]
fn test_placement_string_form() {
    assert_eq!(Placement::stdlib().to_string(), "stdlib");
    assert_eq!(Placement::constants().to_string(), "constants");
    assert_eq!(Placement::of_type("Wallet").to_string(), "type:Wallet");
}

#[test]
fn test_placement_parse() {
    assert_eq!("stdlib".parse::<Placement>().unwrap(), Placement::Stdlib);
    assert_eq!(
        "type:Deploy".parse::<Placement>().unwrap(),
        Placement::of_type("Deploy")
    );
    assert!(matches!(
        "type:".parse::<Placement>(),
        Err(FuncGenError::InvalidPlacement(_))
    ));
    assert!(matches!(
        "global".parse::<Placement>(),
        Err(FuncGenError::InvalidPlacement(_))
    ));
}

#[test]
fn test_placement_equality() {
    assert_eq!(Placement::of_type("A"), Placement::of_type("A"));
    assert_ne!(Placement::of_type("A"), Placement::of_type("B"));
    assert_ne!(Placement::stdlib(), Placement::constants());
    assert_eq!(Placement::of_type("A").type_name(), Some("A"));
    assert_eq!(Placement::stdlib().type_name(), None);
}

#[test]
fn test_placement_serializes_as_string() {
    let json = serde_json::to_string(&Placement::of_type("Counter")).unwrap();
    assert_eq!(json, "\"type:Counter\"");

    let parsed: Placement = serde_json::from_str("\"constants\"").unwrap();
    assert_eq!(parsed, Placement::Constants);
    assert!(serde_json::from_str::<Placement>("\"nowhere\"").is_err());
}
