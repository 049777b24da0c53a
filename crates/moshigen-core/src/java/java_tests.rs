#![allow(non_snake_case)]

use super::*;
use std::path::PathBuf;
use test_case::test_case;

#[test_case("plain", "\"plain\"" ; "plain")]
#[test_case("a \"quoted\" word", "\"a \\\"quoted\\\" word\"" ; "quotes")]
#[test_case("back\\slash", "\"back\\\\slash\"" ; "backslash")]
#[test_case("\tGot name: {0}", "\"\\tGot name: {0}\"" ; "tab")]
fn string_literal___escapes(input: &str, expected: &str) {
    assert_eq!(string_literal(input), expected);
}

#[test]
fn CodeBlock___control_flow___tracks_depth() {
    let mut block = CodeBlock::new();
    block
        .add_statement("reader.beginObject()")
        .begin_control_flow("while (reader.hasNext())")
        .begin_control_flow("switch (_name)")
        .add_line("case \"x\":")
        .indent()
        .add_statement("x = reader.nextInt()")
        .add_statement("break")
        .unindent()
        .end_control_flow()
        .end_control_flow();

    let depths: Vec<_> = block.lines().iter().map(|l| l.depth).collect();
    assert_eq!(depths, vec![0, 0, 1, 2, 3, 3, 1, 0]);
    assert!(block.has_line("x = reader.nextInt();"));
}

#[test]
fn CodeBlock___next_control_flow___renders_else() {
    let mut block = CodeBlock::new();
    block
        .begin_control_flow("if (a)")
        .add_statement("return 1")
        .next_control_flow("else")
        .add_statement("return 2")
        .end_control_flow();

    assert_eq!(
        block.render("\t", 0),
        "if (a) {\n\treturn 1;\n} else {\n\treturn 2;\n}\n"
    );
}

#[test]
fn CodeBlock___empty_header___opens_bare_block() {
    let mut block = CodeBlock::new();
    block.begin_control_flow("").add_statement("x = 1").end_control_flow();

    assert_eq!(block.render("  ", 1), "  {\n    x = 1;\n  }\n");
}

#[test]
fn CodeBlock___add_block___nests_at_current_depth() {
    let mut inner = CodeBlock::new();
    inner.begin_control_flow("").add_statement("y = 2").end_control_flow();

    let mut outer = CodeBlock::new();
    outer.indent().add_block(&inner);

    let depths: Vec<_> = outer.lines().iter().map(|l| l.depth).collect();
    assert_eq!(depths, vec![1, 2, 1]);
}

#[test]
fn TypeSpec___render___orders_fields_and_methods() {
    let mut body = CodeBlock::new();
    body.add_statement("this.moshi = moshi");

    let spec = TypeSpec::class("PointAdapter")
        .modifiers(&[Modifier::Public])
        .javadoc("Generated by moshigen")
        .superclass("JsonAdapter<com.example.Point>")
        .field(FieldSpec::new("Moshi", "moshi", &[Modifier::Final, Modifier::Private]))
        .method(
            MethodSpec::constructor()
                .modifiers(&[Modifier::Public])
                .parameter(ParameterSpec::new("Moshi", "moshi"))
                .body(body),
        );

    let expected = "\
/**
 * Generated by moshigen
 */
public class PointAdapter extends JsonAdapter<com.example.Point> {
\tprivate final Moshi moshi;

\tpublic PointAdapter(final Moshi moshi) {
\t\tthis.moshi = moshi;
\t}
}
";
    assert_eq!(spec.render("\t"), expected);
}

#[test]
fn MethodSpec___render___annotations_and_throws() {
    let mut body = CodeBlock::new();
    body.add_statement("return null");
    let spec = TypeSpec::class("A").method(
        MethodSpec::method("fromJson")
            .annotation("Override")
            .modifiers(&[Modifier::Public])
            .returns("com.example.Point")
            .parameter(ParameterSpec::new("JsonReader", "reader"))
            .exception("IOException")
            .body(body),
    );

    let rendered = spec.render("    ");

    assert!(rendered.contains(
        "    @Override\n    public com.example.Point fromJson(final JsonReader reader) throws IOException {\n        return null;\n    }\n"
    ));
    assert!(spec.find_method("fromJson").is_some());
    assert!(spec.find_constructor().is_none());
}

#[test]
fn FieldSpec___modifiers___render_in_canonical_order() {
    let spec = TypeSpec::class("A").field(
        FieldSpec::new(
            "Logger",
            "LOGGER",
            &[Modifier::Final, Modifier::Static, Modifier::Private],
        )
        .initializer("Logger.getLogger(\"a.A\")"),
    );

    assert!(
        spec.render("\t")
            .contains("\tprivate static final Logger LOGGER = Logger.getLogger(\"a.A\");\n")
    );
}

#[test]
fn JavaFile___render___sorts_imports_and_skips_own_package() {
    let spec = TypeSpec::class("PointAdapter")
        .import("java.io.IOException")
        .import("com.squareup.moshi.JsonAdapter")
        .import("com.example.Sibling");
    let file = JavaFile::new("com.example", spec);

    let rendered = file.render("\t");

    assert!(rendered.starts_with(
        "package com.example;\n\nimport com.squareup.moshi.JsonAdapter;\nimport java.io.IOException;\n\nclass PointAdapter {\n"
    ));
    assert!(!rendered.contains("import com.example.Sibling;"));
}

#[test]
fn JavaFile___default_package___omits_declaration() {
    let file = JavaFile::new("", TypeSpec::class("MoshiFactory"));

    assert_eq!(file.render("\t"), "class MoshiFactory {\n}\n");
    assert_eq!(file.qualified_name(), "MoshiFactory");
    assert_eq!(file.relative_path(), PathBuf::from("MoshiFactory.java"));
}

#[test]
fn JavaFile___relative_path___follows_package() {
    let file = JavaFile::new("com.example.json", TypeSpec::class("UserAdapter"));

    assert_eq!(
        file.relative_path(),
        PathBuf::from("com").join("example").join("json").join("UserAdapter.java")
    );
    assert_eq!(file.qualified_name(), "com.example.json.UserAdapter");
}
