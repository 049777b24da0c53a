//! Generator configuration

use serde::{Deserialize, Serialize};

/// Settings shared by every target type in a generation round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Indentation unit used when rendering Java source
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Annotations that mark a constructor parameter as nullable
    ///
    /// A parameter carrying none of these is required, and the generated
    /// decoder fails if its key never appears in the JSON object.
    #[serde(default = "default_nullable_annotations")]
    pub nullable_annotations: Vec<String>,

    /// Suffix appended to the target's simple name for the adapter class
    #[serde(default = "default_adapter_suffix")]
    pub adapter_suffix: String,

    /// Suffix appended to the target's simple name for the per-type factory class
    #[serde(default = "default_factory_suffix")]
    pub factory_suffix: String,

    /// Javadoc placed on every generated type
    #[serde(default = "default_javadoc")]
    pub javadoc: String,
}

fn default_indent() -> String {
    "\t".to_string()
}

fn default_nullable_annotations() -> Vec<String> {
    vec![
        "org.jetbrains.annotations.Nullable".to_string(),
        "android.support.annotation.Nullable".to_string(),
        "androidx.annotation.Nullable".to_string(),
        "javax.annotation.Nullable".to_string(),
    ]
}

fn default_adapter_suffix() -> String {
    "Adapter".to_string()
}

fn default_factory_suffix() -> String {
    "AdapterFactory".to_string()
}

fn default_javadoc() -> String {
    "Generated by moshigen".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            nullable_annotations: default_nullable_annotations(),
            adapter_suffix: default_adapter_suffix(),
            factory_suffix: default_factory_suffix(),
            javadoc: default_javadoc(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Whether `annotation` is one of the configured nullable markers.
    ///
    /// Accepts either the qualified annotation name or its simple name,
    /// so `Nullable` matches `org.jetbrains.annotations.Nullable`.
    pub fn is_nullable_marker(&self, annotation: &str) -> bool {
        let annotation = annotation.trim_start_matches('@');
        self.nullable_annotations.iter().any(|marker| {
            marker == annotation
                || (!annotation.contains('.')
                    && marker.rsplit('.').next() == Some(annotation))
        })
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
