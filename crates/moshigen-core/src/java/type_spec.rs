//! Class, method, field and parameter declarations.

use super::{CodeBlock, Modifier, render_modifiers};
use std::collections::BTreeSet;

/// A field declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: String,
    pub modifiers: Vec<Modifier>,
    pub initializer: Option<String>,
}

impl FieldSpec {
    pub fn new(ty: impl Into<String>, name: impl Into<String>, modifiers: &[Modifier]) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: modifiers.to_vec(),
            initializer: None,
        }
    }

    pub fn initializer(mut self, expression: impl Into<String>) -> Self {
        self.initializer = Some(expression.into());
        self
    }

    fn render(&self) -> String {
        let mut out = format!("{}{} {}", render_modifiers(&self.modifiers), self.ty, self.name);
        if let Some(init) = &self.initializer {
            out.push_str(" = ");
            out.push_str(init);
        }
        out.push(';');
        out
    }
}

/// A method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: String,
    pub modifiers: Vec<Modifier>,
}

impl ParameterSpec {
    /// A `final` parameter
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: vec![Modifier::Final],
        }
    }

    fn render(&self) -> String {
        format!("{}{} {}", render_modifiers(&self.modifiers), self.ty, self.name)
    }
}

/// A method or constructor declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<String>,
    /// `None` for constructors
    pub returns: Option<String>,
    pub parameters: Vec<ParameterSpec>,
    pub exceptions: Vec<String>,
    pub body: CodeBlock,
}

impl MethodSpec {
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            returns: Some("void".to_string()),
            parameters: Vec::new(),
            exceptions: Vec::new(),
            body: CodeBlock::new(),
        }
    }

    /// A constructor; the name is filled in from the enclosing type when rendered
    pub fn constructor() -> Self {
        Self {
            returns: None,
            ..Self::method("<init>")
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.returns.is_none()
    }

    pub fn modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn exception(mut self, ty: impl Into<String>) -> Self {
        self.exceptions.push(ty.into());
        self
    }

    pub fn body(mut self, body: CodeBlock) -> Self {
        self.body = body;
        self
    }

    fn render(&self, type_name: &str, indent: &str, depth: usize) -> String {
        let pad = indent.repeat(depth);
        let mut out = String::new();

        for annotation in &self.annotations {
            out.push_str(&format!("{pad}@{annotation}\n"));
        }

        let name = if self.is_constructor() { type_name } else { &self.name };
        let params = self
            .parameters
            .iter()
            .map(ParameterSpec::render)
            .collect::<Vec<_>>()
            .join(", ");

        out.push_str(&pad);
        out.push_str(&render_modifiers(&self.modifiers));
        if let Some(returns) = &self.returns {
            out.push_str(returns);
            out.push(' ');
        }
        out.push_str(&format!("{name}({params})"));
        if !self.exceptions.is_empty() {
            out.push_str(" throws ");
            out.push_str(&self.exceptions.join(", "));
        }
        out.push_str(" {\n");
        out.push_str(&self.body.render(indent, depth + 1));
        out.push_str(&format!("{pad}}}\n"));
        out
    }
}

/// A top-level class declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub javadoc: Option<String>,
    pub superclass: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldSpec>,
    pub methods: Vec<MethodSpec>,
    /// Qualified names imported by the enclosing file
    pub imports: BTreeSet<String>,
}

impl TypeSpec {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            javadoc: None,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            imports: BTreeSet::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn javadoc(mut self, doc: impl Into<String>) -> Self {
        self.javadoc = Some(doc.into());
        self
    }

    pub fn superclass(mut self, ty: impl Into<String>) -> Self {
        self.superclass = Some(ty.into());
        self
    }

    pub fn interface(mut self, ty: impl Into<String>) -> Self {
        self.interfaces.push(ty.into());
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn import(mut self, qualified_name: impl Into<String>) -> Self {
        self.imports.insert(qualified_name.into());
        self
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn find_constructor(&self) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.is_constructor())
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render the declaration, without package or imports
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::new();

        if let Some(doc) = &self.javadoc {
            out.push_str("/**\n");
            for line in doc.lines() {
                if line.is_empty() {
                    out.push_str(" *\n");
                } else {
                    out.push_str(&format!(" * {line}\n"));
                }
            }
            out.push_str(" */\n");
        }

        out.push_str(&render_modifiers(&self.modifiers));
        out.push_str("class ");
        out.push_str(&self.name);
        if let Some(superclass) = &self.superclass {
            out.push_str(" extends ");
            out.push_str(superclass);
        }
        if !self.interfaces.is_empty() {
            out.push_str(" implements ");
            out.push_str(&self.interfaces.join(", "));
        }
        out.push_str(" {\n");

        for field in &self.fields {
            out.push_str(indent);
            out.push_str(&field.render());
            out.push('\n');
        }

        for method in &self.methods {
            out.push('\n');
            out.push_str(&method.render(&self.name, indent, 1));
        }

        out.push_str("}\n");
        out
    }
}
