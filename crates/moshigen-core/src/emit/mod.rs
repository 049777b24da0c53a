//! Adapter and factory emission.
//!
//! [`emit_target`] runs one target type through the whole pipeline:
//! visibility gate, package resolution, field extraction, strategy selection
//! and finally the adapter (and optional per-type factory) type specs.
//! Everything is built in memory; nothing is persisted here, so a failure
//! leaves no partial output behind.

mod adapter;
mod factory;

pub use adapter::build_adapter;
pub use factory::{AdapterRef, build_factory};

use crate::config::GeneratorConfig;
use crate::error::GenerateResult;
use crate::extract::{check_visibility, extract_fields, resolve_namespace};
use crate::java::{JavaFile, TypeSpec};
use crate::model::TargetType;
use crate::naming;
use crate::strategy::DecodePlan;
use std::fmt;
use tracing::debug;

pub(crate) const JSON_ADAPTER: &str = "com.squareup.moshi.JsonAdapter";
pub(crate) const JSON_READER: &str = "com.squareup.moshi.JsonReader";
pub(crate) const JSON_WRITER: &str = "com.squareup.moshi.JsonWriter";
pub(crate) const MOSHI: &str = "com.squareup.moshi.Moshi";
pub(crate) const IO_EXCEPTION: &str = "java.io.IOException";
pub(crate) const ANNOTATION: &str = "java.lang.annotation.Annotation";
pub(crate) const REFLECT_TYPE: &str = "java.lang.reflect.Type";
pub(crate) const SET: &str = "java.util.Set";
pub(crate) const LEVEL: &str = "java.util.logging.Level";
pub(crate) const LOGGER: &str = "java.util.logging.Logger";

/// Declared type of the `annotations` parameter shared by adapters and factories
pub(crate) const ANNOTATIONS_TYPE: &str = "Set<? extends Annotation>";

/// What a generated unit is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Adapter,
    Factory,
    AggregateFactory,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Adapter => write!(f, "adapter"),
            UnitKind::Factory => write!(f, "factory"),
            UnitKind::AggregateFactory => write!(f, "aggregate factory"),
        }
    }
}

/// A generated compilation unit waiting to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedUnit {
    pub kind: UnitKind,
    pub package: String,
    pub type_spec: TypeSpec,
}

impl EmittedUnit {
    pub fn qualified_name(&self) -> String {
        naming::qualify(&self.package, &self.type_spec.name)
    }

    pub fn to_java_file(&self) -> JavaFile {
        JavaFile::new(self.package.clone(), self.type_spec.clone())
    }
}

/// Everything generated for one target type
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedTarget {
    /// Qualified name of the target type
    pub target: String,
    pub plan: DecodePlan,
    pub units: Vec<EmittedUnit>,
}

impl EmittedTarget {
    pub fn adapter(&self) -> Option<&EmittedUnit> {
        self.units.iter().find(|u| u.kind == UnitKind::Adapter)
    }

    pub fn factory(&self) -> Option<&EmittedUnit> {
        self.units.iter().find(|u| u.kind == UnitKind::Factory)
    }
}

/// Simple name of the adapter generated for `target_simple_name`
pub fn adapter_name(target_simple_name: &str, config: &GeneratorConfig) -> String {
    format!("{target_simple_name}{}", config.adapter_suffix)
}

/// Simple name of the per-type factory generated for `target_simple_name`
pub fn factory_name(target_simple_name: &str, config: &GeneratorConfig) -> String {
    format!("{target_simple_name}{}", config.factory_suffix)
}

/// Build every unit for `target`, or the first error that stops it
pub fn emit_target(target: &TargetType, config: &GeneratorConfig) -> GenerateResult<EmittedTarget> {
    check_visibility(target)?;
    let package = resolve_namespace(target)?;
    let fields = extract_fields(target, config)?;
    let plan = DecodePlan::build(&target.qualified_name, fields)?;

    if !target.flags.generate_writer {
        debug!(
            target_type = %target.qualified_name,
            "generate_writer is off; the encoder is a pass-through either way"
        );
    }

    let adapter = build_adapter(target, package, &plan, config);
    let mut units = vec![EmittedUnit {
        kind: UnitKind::Adapter,
        package: package.to_string(),
        type_spec: adapter,
    }];

    if target.flags.generate_factory {
        let adapter_ref = AdapterRef {
            target: target.qualified_name.clone(),
            adapter: naming::qualify(package, &adapter_name(target.simple_name(), config)),
        };
        let factory = build_factory(
            &factory_name(target.simple_name(), config),
            package,
            &[adapter_ref],
            config,
        );
        units.push(EmittedUnit {
            kind: UnitKind::Factory,
            package: package.to_string(),
            type_spec: factory,
        });
    }

    Ok(EmittedTarget {
        target: target.qualified_name.clone(),
        plan,
        units,
    })
}
