#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn GeneratorConfig___default___uses_tab_indent_and_adapter_suffix() {
    let config = GeneratorConfig::default();

    assert_eq!(config.indent, "\t");
    assert_eq!(config.adapter_suffix, "Adapter");
    assert_eq!(config.factory_suffix, "AdapterFactory");
    assert_eq!(config.javadoc, "Generated by moshigen");
}

#[test]
fn GeneratorConfig___from_json_empty___returns_default() {
    let config = GeneratorConfig::from_json(b"").unwrap();

    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn GeneratorConfig___from_json_partial___fills_defaults() {
    let json = br#"{"indent": "    ", "nullable_annotations": ["com.acme.Maybe"]}"#;

    let config = GeneratorConfig::from_json(json).unwrap();

    assert_eq!(config.indent, "    ");
    assert_eq!(config.nullable_annotations, vec!["com.acme.Maybe".to_string()]);
    assert_eq!(config.adapter_suffix, "Adapter");
}

#[test]
fn GeneratorConfig___from_json_invalid___returns_error() {
    let result = GeneratorConfig::from_json(b"{not json");

    assert!(result.is_err());
}

#[test_case("org.jetbrains.annotations.Nullable", true ; "qualified jetbrains")]
#[test_case("android.support.annotation.Nullable", true ; "qualified android support")]
#[test_case("Nullable", true ; "simple name")]
#[test_case("@Nullable", true ; "with at sign")]
#[test_case("com.acme.Nullable", false ; "unknown qualified")]
#[test_case("NotNull", false ; "other annotation")]
fn GeneratorConfig___is_nullable_marker___matches_configured_names(
    annotation: &str,
    expected: bool,
) {
    let config = GeneratorConfig::default();

    assert_eq!(config.is_nullable_marker(annotation), expected);
}
