//! Aggregate factories and registration consistency.
//!
//! A [`FactoryRegistration`] names several target types; one factory class
//! dispatching to all of their adapters is generated for it. Once every
//! target of a round has been generated, [`check_consistency`] looks for
//! types registered more than once and generated adapters nothing registers.

use crate::config::GeneratorConfig;
use crate::emit::{AdapterRef, EmittedUnit, UnitKind, adapter_name, build_factory};
use crate::error::{GenerateError, GenerateResult};
use crate::model::{FactoryRegistration, TargetType};
use crate::naming;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A registration problem found after the round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyWarning {
    /// The type appears in more than one registration (or twice in one)
    RegisteredInMultipleFactories { type_name: String, count: usize },

    /// A generated adapter without its own factory that no registration names
    NotRegistered { type_name: String },
}

impl ConsistencyWarning {
    pub fn type_name(&self) -> &str {
        match self {
            ConsistencyWarning::RegisteredInMultipleFactories { type_name, .. }
            | ConsistencyWarning::NotRegistered { type_name } => type_name,
        }
    }
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyWarning::RegisteredInMultipleFactories { type_name, .. } => {
                write!(f, "Class '{type_name}' is registered in multiple factories")
            }
            ConsistencyWarning::NotRegistered { type_name } => {
                write!(f, "Class '{type_name}' is not registered in any factory")
            }
        }
    }
}

/// Qualified adapter name for a registered type.
///
/// Known targets use their resolved package; anything else is a best guess
/// from the qualified name.
fn adapter_for(type_name: &str, known: &[TargetType], config: &GeneratorConfig) -> String {
    let target = known.iter().find(|t| t.qualified_name == type_name);
    let simple = naming::simple_name(type_name);
    let package = target
        .and_then(|t| t.namespace.as_deref())
        .or_else(|| naming::package_of(type_name))
        .unwrap_or("");
    naming::qualify(package, &adapter_name(simple, config))
}

/// Build the aggregate factory for `registration`
pub fn emit_aggregate_factory(
    registration: &FactoryRegistration,
    known: &[TargetType],
    config: &GeneratorConfig,
) -> GenerateResult<EmittedUnit> {
    let package = registration
        .resolved_package()
        .ok_or_else(|| GenerateError::NamespaceResolution {
            type_name: registration.target_class_name.clone(),
        })?;

    let adapters: Vec<AdapterRef> = registration
        .types
        .iter()
        .map(|type_name| AdapterRef {
            target: type_name.clone(),
            adapter: adapter_for(type_name, known, config),
        })
        .collect();

    let type_spec = build_factory(&registration.target_class_name, package, &adapters, config);

    Ok(EmittedUnit {
        kind: UnitKind::AggregateFactory,
        package: package.to_string(),
        type_spec,
    })
}

/// Registration problems across the whole round.
///
/// `generated` holds the targets whose adapters were generated successfully.
/// Warnings come out in a stable order: multiple registrations first, sorted
/// by type name, then unregistered types in `generated` order.
pub fn check_consistency(
    generated: &[&TargetType],
    registrations: &[FactoryRegistration],
) -> Vec<ConsistencyWarning> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for registration in registrations {
        for type_name in &registration.types {
            *counts.entry(type_name.as_str()).or_default() += 1;
        }
    }

    let mut warnings: Vec<ConsistencyWarning> = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(type_name, count)| ConsistencyWarning::RegisteredInMultipleFactories {
            type_name: type_name.to_string(),
            count: *count,
        })
        .collect();

    let registered: HashSet<&str> = counts.keys().copied().collect();
    warnings.extend(
        generated
            .iter()
            .filter(|t| !t.flags.generate_factory)
            .filter(|t| !registered.contains(t.qualified_name.as_str()))
            .map(|t| ConsistencyWarning::NotRegistered {
                type_name: t.qualified_name.clone(),
            }),
    );

    warnings
}
