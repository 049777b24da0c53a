//! `JsonAdapter.Factory` emission, shared by per-type and aggregate factories.

use super::{ANNOTATION, ANNOTATIONS_TYPE, JSON_ADAPTER, MOSHI, REFLECT_TYPE, SET};
use crate::config::GeneratorConfig;
use crate::java::{CodeBlock, MethodSpec, Modifier, ParameterSpec, TypeSpec};
use crate::naming;

/// A target type and the adapter that decodes it, both qualified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterRef {
    pub target: String,
    pub adapter: String,
}

/// Build a factory class `name` in `package` dispatching on each registered type.
///
/// Unregistered types fall through to `return null`, which tells Moshi to
/// keep looking.
pub fn build_factory(
    name: &str,
    package: &str,
    adapters: &[AdapterRef],
    config: &GeneratorConfig,
) -> TypeSpec {
    let mut body = CodeBlock::new();
    for adapter in adapters {
        body.begin_control_flow(format!("if (type == {}.class)", adapter.target))
            .add_statement(format!(
                "return new {}(moshi, this, type, annotations)",
                local_reference(package, &adapter.adapter)
            ))
            .end_control_flow();
    }
    body.add_statement("return null");

    let create = MethodSpec::method("create")
        .annotation("Override")
        .modifiers(&[Modifier::Public])
        .returns("JsonAdapter<?>")
        .parameter(ParameterSpec::new("Type", "type"))
        .parameter(ParameterSpec::new(ANNOTATIONS_TYPE, "annotations"))
        .parameter(ParameterSpec::new("Moshi", "moshi"))
        .body(body);

    TypeSpec::class(name)
        .modifiers(&[Modifier::Public])
        .javadoc(config.javadoc.clone())
        .interface("JsonAdapter.Factory")
        .method(create)
        .import(JSON_ADAPTER)
        .import(MOSHI)
        .import(ANNOTATION)
        .import(REFLECT_TYPE)
        .import(SET)
}

/// Drop the package from `qualified` when it lives in `package`
fn local_reference<'a>(package: &str, qualified: &'a str) -> &'a str {
    match naming::package_of(qualified) {
        Some(p) if p == package => naming::simple_name(qualified),
        _ => qualified,
    }
}
