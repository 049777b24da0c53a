//! `<Name>Adapter extends JsonAdapter<Name>` emission.

use super::{
    ANNOTATION, ANNOTATIONS_TYPE, IO_EXCEPTION, JSON_ADAPTER, JSON_READER, JSON_WRITER, LEVEL,
    LOGGER, MOSHI, REFLECT_TYPE, SET, adapter_name,
};
use crate::config::GeneratorConfig;
use crate::error::missing_field_message;
use crate::java::{
    CodeBlock, FieldSpec, MethodSpec, Modifier, ParameterSpec, TypeSpec, string_literal,
};
use crate::model::{Field, TargetType};
use crate::naming;
use crate::strategy::{DecodePlan, DecodeStrategy, FieldPlan};
use crate::type_expr::TYPES_CLASS;
use std::collections::{HashMap, HashSet};

/// Identifiers the decoder body relies on; a local with one of these names
/// would shadow or obscure it.
///
/// Package roots are listed because the body names classes by their
/// qualified name, and a local `com` obscures the package `com`.
const RESERVED_LOCALS: &[&str] = &[
    "reader",
    "moshi",
    "_name",
    "_adapter",
    "LOGGER",
    "Level",
    "Types",
    "JsonReader",
    "IOException",
    "com",
    "java",
    "javax",
    "org",
    "android",
    "androidx",
    "Boolean",
    "Byte",
    "Short",
    "Integer",
    "Long",
    "Character",
    "Float",
    "Double",
    "String",
    "Object",
];

/// Build the adapter class for `target` from its decode plan
pub fn build_adapter(
    target: &TargetType,
    package: &str,
    plan: &DecodePlan,
    config: &GeneratorConfig,
) -> TypeSpec {
    let name = adapter_name(target.simple_name(), config);
    let debug_logs = target.flags.debug_logs;
    let locals = local_names(&plan.fields, target);

    let mut spec = TypeSpec::class(&name)
        .modifiers(&[Modifier::Public])
        .javadoc(config.javadoc.clone())
        .superclass(format!("JsonAdapter<{}>", target.qualified_name))
        .import(JSON_ADAPTER)
        .import(JSON_READER)
        .import(JSON_WRITER)
        .import(MOSHI)
        .import(IO_EXCEPTION)
        .import(ANNOTATION)
        .import(REFLECT_TYPE)
        .import(SET);

    if plan.uses_types_helper() {
        spec = spec.import(TYPES_CLASS);
    }

    if debug_logs {
        let logger_name = naming::qualify(package, &name);
        spec = spec
            .import(LEVEL)
            .import(LOGGER)
            .field(
                FieldSpec::new(
                    "Logger",
                    "LOGGER",
                    &[Modifier::Private, Modifier::Static, Modifier::Final],
                )
                .initializer(format!("Logger.getLogger({})", string_literal(&logger_name))),
            );
    }

    spec.field(FieldSpec::new("Moshi", "moshi", &[Modifier::Private, Modifier::Final]))
        .field(FieldSpec::new(
            "JsonAdapter.Factory",
            "factory",
            &[Modifier::Private, Modifier::Final],
        ))
        .field(FieldSpec::new("Type", "type", &[Modifier::Private, Modifier::Final]))
        .field(FieldSpec::new(
            ANNOTATIONS_TYPE,
            "annotations",
            &[Modifier::Private, Modifier::Final],
        ))
        .method(constructor(&name, debug_logs))
        .method(from_json(target, plan, &locals, debug_logs))
        .method(to_json(target))
}

fn constructor(adapter_name: &str, debug_logs: bool) -> MethodSpec {
    let mut body = CodeBlock::new();
    if debug_logs {
        body.add_statement(format!(
            "LOGGER.log(Level.FINE, {})",
            string_literal(&format!("Constructing {adapter_name}"))
        ));
    }
    body.add_statement("this.moshi = moshi")
        .add_statement("this.factory = factory")
        .add_statement("this.type = type")
        .add_statement("this.annotations = annotations");

    MethodSpec::constructor()
        .modifiers(&[Modifier::Public])
        .parameter(ParameterSpec::new("Moshi", "moshi"))
        .parameter(ParameterSpec::new("JsonAdapter.Factory", "factory"))
        .parameter(ParameterSpec::new("Type", "type"))
        .parameter(ParameterSpec::new(ANNOTATIONS_TYPE, "annotations"))
        .body(body)
}

fn from_json(
    target: &TargetType,
    plan: &DecodePlan,
    locals: &HashMap<&str, String>,
    debug_logs: bool,
) -> MethodSpec {
    let local = |field: &Field| -> String {
        locals
            .get(field.name.as_str())
            .cloned()
            .unwrap_or_else(|| field.name.clone())
    };

    let mut body = CodeBlock::new();
    if debug_logs {
        body.add_statement("LOGGER.log(Level.FINE, \"Reading json\")");
    }

    for field_plan in &plan.fields {
        let field = &field_plan.field;
        body.add_statement(format!("{} {} = null", field.ty.boxed(), local(field)));
    }

    body.add_statement("reader.beginObject()")
        .begin_control_flow("while (reader.hasNext())")
        .add_statement("final String _name = reader.nextName()");
    if debug_logs {
        body.add_statement(format!(
            "LOGGER.log(Level.FINE, {}, _name)",
            string_literal("\tGot name: {0}")
        ));
    }

    body.begin_control_flow("switch (_name)");
    for field_plan in &plan.fields {
        body.add_line(format!("case {}:", string_literal(&field_plan.field.json_name)))
            .indent()
            .add_block(&read_arm(field_plan, &local(&field_plan.field), debug_logs))
            .add_statement("break")
            .unindent();
    }
    body.add_line("default:")
        .indent()
        .add_statement("reader.skipValue()")
        .unindent()
        .end_control_flow()
        .end_control_flow()
        .add_statement("reader.endObject()");

    for field in plan.required_fields() {
        body.begin_control_flow(format!("if ({} == null)", local(field)))
            .add_statement(format!(
                "throw new IOException({})",
                string_literal(&missing_field_message(&field.json_name))
            ))
            .end_control_flow();
    }

    let args = plan
        .fields
        .iter()
        .map(|p| local(&p.field))
        .collect::<Vec<_>>()
        .join(", ");
    body.add_statement(format!("return new {}({args})", target.qualified_name));

    MethodSpec::method("fromJson")
        .annotation("Override")
        .modifiers(&[Modifier::Public])
        .returns(target.qualified_name.clone())
        .parameter(ParameterSpec::new("JsonReader", "reader"))
        .exception("IOException")
        .body(body)
}

/// Statements of one `case` arm, without the trailing `break`
fn read_arm(field_plan: &FieldPlan, local: &str, debug_logs: bool) -> CodeBlock {
    let field = &field_plan.field;
    let mut arm = CodeBlock::new();

    match &field_plan.strategy {
        DecodeStrategy::Primitive {
            kind,
            method,
            narrow_to,
        } => {
            let read = match narrow_to {
                Some(narrow) => format!("({}) reader.{}()", narrow.keyword(), method.name()),
                None => format!("reader.{}()", method.name()),
            };
            if field.nullable {
                let boxed = kind.boxed_name();
                arm.add_statement(format!(
                    "{local} = (reader.peek() == JsonReader.Token.NULL) ? reader.<{boxed}>nextNull() : {boxed}.valueOf({read})"
                ));
            } else {
                arm.add_statement(format!("{local} = {read}"));
            }
        }
        DecodeStrategy::String => {
            if field.nullable {
                arm.add_statement(format!(
                    "{local} = (reader.peek() == JsonReader.Token.NULL) ? reader.<String>nextNull() : reader.nextString()"
                ));
            } else {
                arm.add_statement(format!("{local} = reader.nextString()"));
            }
        }
        DecodeStrategy::Delegated { ty, expr } => {
            arm.begin_control_flow("")
                .add_statement(format!(
                    "final JsonAdapter<{}> _adapter = moshi.adapter({expr})",
                    ty.boxed()
                ));
            if debug_logs {
                arm.add_statement(format!(
                    "LOGGER.log(Level.FINE, {}, _adapter)",
                    string_literal("\tGot delegate adapter: {0}")
                ));
            }
            arm.add_statement(format!("{local} = _adapter.fromJson(reader)"));
            if debug_logs {
                arm.add_statement(format!(
                    "LOGGER.log(Level.FINE, {}, {local})",
                    string_literal("\tGot model data: {0}")
                ));
            }
            arm.end_control_flow();
        }
    }

    arm
}

fn to_json(target: &TargetType) -> MethodSpec {
    let mut body = CodeBlock::new();
    body.add_statement("moshi.nextAdapter(factory, type, annotations).toJson(writer, value)");

    MethodSpec::method("toJson")
        .annotation("Override")
        .modifiers(&[Modifier::Public])
        .parameter(ParameterSpec::new("JsonWriter", "writer"))
        .parameter(ParameterSpec::new(target.qualified_name.clone(), "value"))
        .exception("IOException")
        .body(body)
}

/// Decoder local for each field, renamed with trailing underscores when it
/// would clash with a reserved identifier or another field.
///
/// The package roots of the target and of every field type are reserved as
/// well, since the body names those classes by their qualified name.
fn local_names<'a>(fields: &'a [FieldPlan], target: &TargetType) -> HashMap<&'a str, String> {
    let mut roots: HashSet<String> = HashSet::new();
    roots.extend(package_roots(&target.qualified_name));
    for plan in fields {
        roots.extend(package_roots(&plan.field.ty.boxed().to_string()));
    }
    let reserved = |name: &str| RESERVED_LOCALS.contains(&name) || roots.contains(name);

    let mut taken: HashSet<String> = fields.iter().map(|p| p.field.name.clone()).collect();
    let mut locals = HashMap::with_capacity(fields.len());

    for plan in fields {
        let name = plan.field.name.as_str();
        let mut local = name.to_string();
        if reserved(name) {
            while reserved(&local) || taken.contains(&local) {
                local.push('_');
            }
            taken.insert(local.clone());
        }
        locals.insert(name, local);
    }

    locals
}

/// First segment of each qualified name in a Java type expression
fn package_roots(type_expr: &str) -> impl Iterator<Item = String> + '_ {
    type_expr
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '.'))
        .filter(|name| name.contains('.'))
        .filter_map(|name| name.split('.').next())
        .map(str::to_string)
}
