//! Intermediate representation for target types.
//!
//! Metadata providers (a TOML model, a Rust source scanner, ...) translate
//! whatever they read into these plain values once, up front. Everything
//! downstream works on this model only.
//!
//! # Structure
//!
//! - [`TargetType`]: a data-holder class selected for adapter generation
//! - [`Constructor`] / [`Parameter`]: its declared constructors, as read
//! - [`Field`]: one parameter of the designated constructor, after extraction
//! - [`TypeDescriptor`]: the shape of a field's type
//! - [`FactoryRegistration`]: an aggregate factory naming several target types

pub mod types;

pub use types::{PrimitiveKind, TypeDescriptor, TypeParseError};

use crate::naming;
use serde::{Deserialize, Serialize};

/// Flags carried by the per-type generation marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateFlags {
    /// Emit a standalone `<Name>AdapterFactory`
    #[serde(default)]
    pub generate_factory: bool,

    /// Emit field-by-field writer code.
    ///
    /// Kept on the model, but the encoder is always a pass-through to the
    /// next adapter.
    #[serde(default = "default_true")]
    pub generate_writer: bool,

    /// Emit `java.util.logging` statements into the adapter
    #[serde(default)]
    pub debug_logs: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GenerateFlags {
    fn default() -> Self {
        Self {
            generate_factory: false,
            generate_writer: true,
            debug_logs: false,
        }
    }
}

/// Declared modifiers relevant to generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub public: bool,
    pub is_abstract: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            public: true,
            is_abstract: false,
        }
    }
}

/// A declared constructor parameter, as reported by the metadata provider
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeDescriptor,
    /// Qualified (or simple) names of the annotations on the parameter
    pub annotations: Vec<String>,
    /// JSON key override; the parameter name is used when absent
    pub json_name: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
            json_name: None,
        }
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn json(mut self, json_name: impl Into<String>) -> Self {
        self.json_name = Some(json_name.into());
        self
    }
}

/// A declared constructor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constructor {
    pub parameters: Vec<Parameter>,
}

impl Constructor {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self { parameters }
    }
}

/// A data-holder class selected for adapter generation
#[derive(Debug, Clone, PartialEq)]
pub struct TargetType {
    /// Fully qualified class name (`com.example.Point`)
    pub qualified_name: String,

    /// Enclosing package; `None` when the provider could not determine it
    pub namespace: Option<String>,

    pub visibility: Visibility,

    /// Every constructor the class declares, in declaration order
    pub constructors: Vec<Constructor>,

    pub flags: GenerateFlags,
}

impl TargetType {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            namespace: None,
            visibility: Visibility::default(),
            constructors: Vec::new(),
            flags: GenerateFlags::default(),
        }
    }

    pub fn in_package(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_flags(mut self, flags: GenerateFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Class name without its package or enclosing classes
    pub fn simple_name(&self) -> &str {
        naming::simple_name(&self.qualified_name)
    }
}

/// One constructor parameter of a target type, in constructor order
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Parameter name, used for the generated local
    pub name: String,
    /// Key matched in the JSON object
    pub json_name: String,
    pub ty: TypeDescriptor,
    pub nullable: bool,
}

/// An aggregate factory registering adapters for several target types
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryRegistration {
    /// Package of the element carrying the registration marker
    pub declared_in: Option<String>,
    pub target_class_name: String,
    /// Explicit package for the generated factory
    pub target_package: Option<String>,
    /// Qualified names of the registered target types
    pub types: Vec<String>,
}

/// Default class name of an aggregate factory
pub const DEFAULT_FACTORY_CLASS: &str = "MoshiFactory";

impl FactoryRegistration {
    pub fn new(types: Vec<String>) -> Self {
        Self {
            declared_in: None,
            target_class_name: DEFAULT_FACTORY_CLASS.to_string(),
            target_package: None,
            types,
        }
    }

    /// Package the factory is generated into
    pub fn resolved_package(&self) -> Option<&str> {
        self.target_package
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .or(self.declared_in.as_deref())
    }

    /// Qualified name of the generated factory, when its package resolves
    pub fn qualified_name(&self) -> Option<String> {
        self.resolved_package()
            .map(|package| naming::qualify(package, &self.target_class_name))
    }
}
