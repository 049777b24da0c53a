//! Decode-strategy selection.
//!
//! Each field decodes in one of three ways, picked from its type descriptor:
//!
//! | Field type | Strategy |
//! |------------|----------|
//! | `boolean` / `Boolean` | `reader.nextBoolean()` |
//! | `short` / `Short` | `(short) reader.nextInt()` |
//! | `int` / `Integer` | `reader.nextInt()` |
//! | `long` / `Long` | `reader.nextLong()` |
//! | `float` / `Float` | `(float) reader.nextDouble()` |
//! | `double` / `Double` | `reader.nextDouble()` |
//! | `byte`, `char` | rejected |
//! | `String` | `reader.nextString()` |
//! | primitive array | rejected |
//! | anything else | delegated to `moshi.adapter(<type expr>)` |
//!
//! A [`DecodePlan`] is the per-key dispatch table the emitter lowers into a
//! Java `switch`.

use crate::error::{GenerateError, GenerateResult};
use crate::model::{Field, PrimitiveKind, TypeDescriptor};
use crate::type_expr::TypeExpr;
use std::collections::HashSet;
use tracing::debug;

/// `JsonReader` method used to read a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderMethod {
    NextBoolean,
    NextInt,
    NextLong,
    NextDouble,
    NextString,
}

impl ReaderMethod {
    pub fn name(self) -> &'static str {
        match self {
            ReaderMethod::NextBoolean => "nextBoolean",
            ReaderMethod::NextInt => "nextInt",
            ReaderMethod::NextLong => "nextLong",
            ReaderMethod::NextDouble => "nextDouble",
            ReaderMethod::NextString => "nextString",
        }
    }
}

/// How a single field is read from the current JSON value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// A primitive read, optionally narrowed with a cast
    Primitive {
        kind: PrimitiveKind,
        method: ReaderMethod,
        narrow_to: Option<PrimitiveKind>,
    },

    /// `reader.nextString()`
    String,

    /// A nested adapter obtained for the full field type
    Delegated { ty: TypeDescriptor, expr: TypeExpr },
}

impl DecodeStrategy {
    /// Select the strategy for `field` of `type_name`
    pub fn select(type_name: &str, field: &Field) -> GenerateResult<DecodeStrategy> {
        let unsupported = |kind: PrimitiveKind| GenerateError::UnsupportedPrimitive {
            type_name: type_name.to_string(),
            field: field.name.clone(),
            kind: kind.keyword().to_string(),
        };

        let strategy = match &field.ty {
            TypeDescriptor::Primitive(kind) | TypeDescriptor::Boxed(kind) => {
                let (method, narrow_to) = match kind {
                    PrimitiveKind::Boolean => (ReaderMethod::NextBoolean, None),
                    PrimitiveKind::Short => (ReaderMethod::NextInt, Some(PrimitiveKind::Short)),
                    PrimitiveKind::Int => (ReaderMethod::NextInt, None),
                    PrimitiveKind::Long => (ReaderMethod::NextLong, None),
                    PrimitiveKind::Float => (ReaderMethod::NextDouble, Some(PrimitiveKind::Float)),
                    PrimitiveKind::Double => (ReaderMethod::NextDouble, None),
                    PrimitiveKind::Byte | PrimitiveKind::Char => return Err(unsupported(*kind)),
                };
                DecodeStrategy::Primitive {
                    kind: *kind,
                    method,
                    narrow_to,
                }
            }
            TypeDescriptor::String => DecodeStrategy::String,
            TypeDescriptor::Array(component)
                if matches!(**component, TypeDescriptor::Primitive(_)) =>
            {
                return Err(GenerateError::UnsupportedPrimitiveArray {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                    ty: field.ty.to_string(),
                });
            }
            ty => DecodeStrategy::Delegated {
                ty: ty.clone(),
                expr: TypeExpr::build(ty),
            },
        };

        Ok(strategy)
    }

    /// Whether this strategy obtains a nested adapter
    pub fn is_delegated(&self) -> bool {
        matches!(self, DecodeStrategy::Delegated { .. })
    }
}

/// A field together with the strategy that reads it
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlan {
    pub field: Field,
    pub strategy: DecodeStrategy,
}

/// Dispatch table from JSON key to field read, in constructor order
#[derive(Debug, Clone, PartialEq)]
pub struct DecodePlan {
    /// Qualified name of the decoded type
    pub target: String,
    pub fields: Vec<FieldPlan>,
}

impl DecodePlan {
    /// Select a strategy for every field, failing on the first unsupported one
    pub fn build(target: &str, fields: Vec<Field>) -> GenerateResult<DecodePlan> {
        let mut seen = HashSet::new();
        let mut plans = Vec::with_capacity(fields.len());

        for field in fields {
            if !seen.insert(field.json_name.clone()) {
                return Err(GenerateError::DuplicateJsonKey {
                    type_name: target.to_string(),
                    key: field.json_name,
                });
            }

            let strategy = DecodeStrategy::select(target, &field)?;
            debug!(
                target_type = target,
                field = %field.name,
                ty = %field.ty,
                nullable = field.nullable,
                ?strategy,
                "selected decode strategy"
            );
            plans.push(FieldPlan { field, strategy });
        }

        Ok(DecodePlan {
            target: target.to_string(),
            fields: plans,
        })
    }

    /// The arm a JSON key dispatches to; `None` means the value is skipped
    pub fn arm_for(&self, json_key: &str) -> Option<&FieldPlan> {
        self.fields.iter().find(|plan| plan.field.json_name == json_key)
    }

    /// Fields checked for presence after the object scan, in order
    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .map(|plan| &plan.field)
            .filter(|field| !field.nullable)
    }

    /// Whether any field reads through a nested adapter
    pub fn has_delegates(&self) -> bool {
        self.fields.iter().any(|plan| plan.strategy.is_delegated())
    }

    /// Whether any field needs `com.squareup.moshi.Types`
    pub fn uses_types_helper(&self) -> bool {
        self.fields.iter().any(|plan| match &plan.strategy {
            DecodeStrategy::Delegated { expr, .. } => expr.uses_types_helper(),
            _ => false,
        })
    }

    /// Whether any nullable scalar read peeks for an explicit JSON null
    pub fn peeks_for_null(&self) -> bool {
        self.fields
            .iter()
            .any(|plan| plan.field.nullable && !plan.strategy.is_delegated())
    }
}
