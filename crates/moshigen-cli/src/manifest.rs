//! Model manifest parsing and validation
//!
//! A `moshigen.toml` describes target classes directly:
//!
//! ```toml
//! [generator]
//! indent = "    "
//!
//! [[class]]
//! name = "com.example.User"
//! generate_factory = true
//!
//! [[class.constructor]]
//! params = [
//!     { name = "name", type = "String" },
//!     { name = "email", type = "String", nullable = true },
//!     { name = "tags", type = "java.util.List<String>", json = "tag_list" },
//! ]
//!
//! [[factory]]
//! package = "com.example"
//! types = ["com.example.User"]
//! ```

use anyhow::{Context, Result};
use moshigen_core::model::DEFAULT_FACTORY_CLASS;
use moshigen_core::naming;
use moshigen_core::{
    Constructor, FactoryRegistration, GenerateFlags, GeneratorConfig, Parameter, TargetType,
    TypeDescriptor, Visibility,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// moshigen.toml manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default, rename = "class")]
    pub classes: Vec<ClassDefinition>,

    #[serde(default, rename = "factory")]
    pub factories: Vec<FactoryDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Qualified class name
    pub name: String,

    /// Package; guessed from `name` when absent
    #[serde(default)]
    pub package: Option<String>,

    #[serde(default = "default_true")]
    pub public: bool,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(flatten)]
    pub flags: GenerateFlags,

    #[serde(default, rename = "constructor")]
    pub constructors: Vec<ConstructorDefinition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstructorDefinition {
    #[serde(default)]
    pub params: Vec<ParamDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDefinition {
    pub name: String,

    /// Java type, e.g. `int` or `java.util.Map<String, Long>`
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub annotations: Vec<String>,

    /// JSON key override
    #[serde(default)]
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryDefinition {
    /// Package the registration is declared in
    #[serde(default)]
    pub package: Option<String>,

    #[serde(default = "default_factory_class")]
    pub target_class_name: String,

    #[serde(default)]
    pub target_package: Option<String>,

    pub types: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_factory_class() -> String {
    DEFAULT_FACTORY_CLASS.to_string()
}

/// Everything a round needs, translated from a manifest or a source scan
#[derive(Debug, Clone, Default)]
pub struct LoadedModel {
    pub config: GeneratorConfig,
    pub targets: Vec<TargetType>,
    pub registrations: Vec<FactoryRegistration>,
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        for class in &self.classes {
            if class.name.trim().is_empty() {
                anyhow::bail!("Class name cannot be empty");
            }

            for constructor in &class.constructors {
                for param in &constructor.params {
                    if param.name.trim().is_empty() {
                        anyhow::bail!("Parameter name cannot be empty in class '{}'", class.name);
                    }
                    if param.ty.trim().is_empty() {
                        anyhow::bail!(
                            "Parameter '{}' of class '{}' has no type",
                            param.name,
                            class.name
                        );
                    }
                    if param.nullable && self.generator.nullable_annotations.is_empty() {
                        anyhow::bail!(
                            "Parameter '{}' of class '{}' is nullable but [generator] \
                             nullable_annotations is empty",
                            param.name,
                            class.name
                        );
                    }
                }
            }
        }

        for factory in &self.factories {
            if factory.target_class_name.trim().is_empty() {
                anyhow::bail!("Factory class name cannot be empty");
            }
            if factory.types.is_empty() {
                anyhow::bail!(
                    "Factory '{}' does not register any types",
                    factory.target_class_name
                );
            }
        }

        Ok(())
    }

    /// Translate into the generator model.
    ///
    /// `default_package` applies to classes whose package is neither given
    /// nor derivable from their name.
    pub fn into_model(self, default_package: Option<&str>) -> Result<LoadedModel> {
        let marker = nullable_marker(&self.generator);

        let targets = self
            .classes
            .iter()
            .map(|class| class_to_target(class, default_package, marker.as_deref()))
            .collect::<Result<Vec<_>>>()?;

        let registrations = self
            .factories
            .into_iter()
            .map(|factory| FactoryRegistration {
                declared_in: factory.package.or_else(|| default_package.map(str::to_string)),
                target_class_name: factory.target_class_name,
                target_package: factory.target_package,
                types: factory.types,
            })
            .collect();

        Ok(LoadedModel {
            config: self.generator,
            targets,
            registrations,
        })
    }
}

/// Annotation added to parameters declared `nullable = true`; `None` when no
/// nullable annotation is configured
pub fn nullable_marker(config: &GeneratorConfig) -> Option<String> {
    config.nullable_annotations.first().cloned()
}

fn class_to_target(
    class: &ClassDefinition,
    default_package: Option<&str>,
    marker: Option<&str>,
) -> Result<TargetType> {
    let name = class.name.trim();
    let package = class
        .package
        .as_deref()
        .or_else(|| naming::package_of(name))
        .or(default_package);

    let qualified_name = match package {
        Some(package) if !name.contains('.') => naming::qualify(package, name),
        _ => name.to_string(),
    };

    let mut target = TargetType::new(qualified_name)
        .with_visibility(Visibility {
            public: class.public,
            is_abstract: class.is_abstract,
        })
        .with_flags(class.flags);
    target.namespace = package.map(str::to_string);

    for constructor in &class.constructors {
        let params = constructor
            .params
            .iter()
            .map(|param| {
                param_to_parameter(param, marker).with_context(|| {
                    format!("Invalid parameter '{}' in class '{name}'", param.name)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        target = target.with_constructor(Constructor::new(params));
    }

    Ok(target)
}

fn param_to_parameter(param: &ParamDefinition, marker: Option<&str>) -> Result<Parameter> {
    let ty = TypeDescriptor::parse(&param.ty)?;

    let mut parameter = Parameter::new(param.name.trim(), ty);
    for annotation in &param.annotations {
        parameter = parameter.annotated(annotation.clone());
    }
    if param.nullable {
        let marker = marker.context("nullable requires a configured nullable annotation")?;
        parameter = parameter.annotated(marker);
    }
    if let Some(json) = &param.json {
        parameter = parameter.json(json.clone());
    }

    Ok(parameter)
}
