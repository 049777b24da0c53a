//! A small structured model of Java source.
//!
//! Emitters build [`TypeSpec`]s out of [`MethodSpec`]s, [`FieldSpec`]s and
//! [`CodeBlock`]s; nothing is rendered to text until a [`JavaFile`] is
//! written. Tests inspect the structure directly.
//!
//! Types inside the model are plain strings as they should appear in source.
//! Imports are declared on the [`TypeSpec`] and emitted sorted.

mod code_block;
mod java_file;
mod type_spec;

pub use code_block::{CodeBlock, CodeLine};
pub use java_file::JavaFile;
pub use type_spec::{FieldSpec, MethodSpec, ParameterSpec, TypeSpec};

use std::fmt;

/// Java declaration modifiers, in canonical source order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Quote `value` as a Java string literal
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render modifiers sorted and space-separated, with a trailing space when non-empty
fn render_modifiers(modifiers: &[Modifier]) -> String {
    let mut sorted = modifiers.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
        .iter()
        .map(|m| format!("{m} "))
        .collect::<String>()
}

#[cfg(test)]
#[path = "java_tests.rs"]
mod java_tests;
