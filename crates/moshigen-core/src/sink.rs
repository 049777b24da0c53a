//! Destinations for generated units.

use crate::error::{GenerateError, GenerateResult};
use crate::java::{JavaFile, TypeSpec};
use crate::naming;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persists generated type specs
pub trait CodeSink {
    fn persist(&mut self, package: &str, type_spec: TypeSpec) -> GenerateResult<()>;

    /// Remove a unit persisted earlier in the round
    fn discard(&mut self, package: &str, type_name: &str);

    /// Persist every unit or none of them.
    ///
    /// When one unit fails, the units already persisted from `units` are
    /// discarded in reverse order and the failure is returned.
    fn persist_all(&mut self, units: Vec<(String, TypeSpec)>) -> GenerateResult<()> {
        let mut persisted: Vec<(String, String)> = Vec::with_capacity(units.len());
        for (package, type_spec) in units {
            let type_name = type_spec.name.clone();
            if let Err(err) = self.persist(&package, type_spec) {
                for (package, type_name) in persisted.iter().rev() {
                    self.discard(package, type_name);
                }
                return Err(err);
            }
            persisted.push((package, type_name));
        }
        Ok(())
    }
}

/// Writes `<root>/<package path>/<Name>.java`, creating directories as needed
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
    indent: String,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>, indent: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            indent: indent.into(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl CodeSink for FileSink {
    fn persist(&mut self, package: &str, type_spec: TypeSpec) -> GenerateResult<()> {
        let file = JavaFile::new(package, type_spec);
        let path = self.root.join(file.relative_path());
        let persistence = |source| GenerateError::Persistence {
            unit: file.qualified_name(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(persistence)?;
        }
        fs::write(&path, file.render(&self.indent)).map_err(persistence)?;

        debug!(path = %path.display(), "wrote generated source");
        self.written.push(path);
        Ok(())
    }

    fn discard(&mut self, package: &str, type_name: &str) {
        let path = self
            .root
            .join(naming::package_path(package))
            .join(format!("{type_name}.java"));

        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "removed generated source"),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to remove generated source")
            }
        }
        self.written.retain(|written| written != &path);
    }
}

/// Keeps rendered files in memory, for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    indent: String,
    files: Vec<JavaFile>,
}

impl MemorySink {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            files: Vec::new(),
        }
    }

    pub fn files(&self) -> &[JavaFile] {
        &self.files
    }

    /// The unit persisted under `qualified_name`
    pub fn get(&self, qualified_name: &str) -> Option<&JavaFile> {
        self.files.iter().find(|f| f.qualified_name() == qualified_name)
    }

    /// Rendered source of the unit persisted under `qualified_name`
    pub fn source(&self, qualified_name: &str) -> Option<String> {
        self.get(qualified_name).map(|f| f.render(&self.indent))
    }

    pub fn qualified_names(&self) -> Vec<String> {
        self.files.iter().map(JavaFile::qualified_name).collect()
    }
}

impl CodeSink for MemorySink {
    fn persist(&mut self, package: &str, type_spec: TypeSpec) -> GenerateResult<()> {
        self.files.push(JavaFile::new(package, type_spec));
        Ok(())
    }

    fn discard(&mut self, package: &str, type_name: &str) {
        self.files
            .retain(|f| f.package != package || f.type_spec.name != type_name);
    }
}
