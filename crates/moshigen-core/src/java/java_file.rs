//! A compilation unit: package, imports and one top-level type.

use super::TypeSpec;
use crate::naming;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    pub package: String,
    pub type_spec: TypeSpec,
}

impl JavaFile {
    pub fn new(package: impl Into<String>, type_spec: TypeSpec) -> Self {
        Self {
            package: package.into(),
            type_spec,
        }
    }

    /// Qualified name of the declared type
    pub fn qualified_name(&self) -> String {
        naming::qualify(&self.package, &self.type_spec.name)
    }

    /// Path of the file relative to a source root, e.g. `com/example/PointAdapter.java`
    pub fn relative_path(&self) -> PathBuf {
        naming::package_path(&self.package).join(format!("{}.java", self.type_spec.name))
    }

    /// Render the complete source file
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::new();

        if !self.package.is_empty() {
            out.push_str(&format!("package {};\n\n", self.package));
        }

        // Types from the file's own package need no import
        let imports: Vec<_> = self
            .type_spec
            .imports
            .iter()
            .filter(|import| naming::package_of(import) != Some(self.package.as_str()))
            .collect();
        if !imports.is_empty() {
            for import in imports {
                out.push_str(&format!("import {import};\n"));
            }
            out.push('\n');
        }

        out.push_str(&self.type_spec.render(indent));
        out
    }
}
