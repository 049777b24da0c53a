//! Field extraction from a target type's designated constructor.
//!
//! A target type is generated only when it is public, non-abstract, has a
//! resolvable package and declares exactly one constructor taking at least
//! one parameter. The constructor's parameters, in declaration order, are the
//! fields: the same order is used for the `switch` arms, the required-field
//! checks and the final `new Target(...)` call.

use crate::config::GeneratorConfig;
use crate::error::{GenerateError, GenerateResult, VisibilityViolation};
use crate::model::{Field, TargetType};

/// Reject types that are not public or are abstract
pub fn check_visibility(target: &TargetType) -> GenerateResult<()> {
    let violation = if !target.visibility.public {
        Some(VisibilityViolation::NotPublic)
    } else if target.visibility.is_abstract {
        Some(VisibilityViolation::Abstract)
    } else {
        None
    };

    match violation {
        Some(violation) => Err(GenerateError::InvalidVisibility {
            type_name: target.qualified_name.clone(),
            violation,
        }),
        None => Ok(()),
    }
}

/// The package generated units for `target` are written into
pub fn resolve_namespace(target: &TargetType) -> GenerateResult<&str> {
    target
        .namespace
        .as_deref()
        .ok_or_else(|| GenerateError::NamespaceResolution {
            type_name: target.qualified_name.clone(),
        })
}

/// Ordered fields of the target's single constructor
pub fn extract_fields(target: &TargetType, config: &GeneratorConfig) -> GenerateResult<Vec<Field>> {
    let constructor = match target.constructors.as_slice() {
        [] => {
            return Err(GenerateError::MissingConstructor {
                type_name: target.qualified_name.clone(),
            });
        }
        [constructor] => constructor,
        constructors => {
            return Err(GenerateError::MultipleConstructors {
                type_name: target.qualified_name.clone(),
                count: constructors.len(),
            });
        }
    };

    if constructor.parameters.is_empty() {
        return Err(GenerateError::EmptyConstructor {
            type_name: target.qualified_name.clone(),
        });
    }

    let fields = constructor
        .parameters
        .iter()
        .map(|param| Field {
            name: param.name.clone(),
            json_name: param.json_name.clone().unwrap_or_else(|| param.name.clone()),
            ty: param.ty.clone(),
            nullable: param
                .annotations
                .iter()
                .any(|annotation| config.is_nullable_marker(annotation)),
        })
        .collect();

    Ok(fields)
}

#[cfg(test)]
#[path = "extract/extract_tests.rs"]
mod extract_tests;
