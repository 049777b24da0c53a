//! Reified type expressions for nested adapter lookup.
//!
//! A delegated field asks Moshi for an adapter with `moshi.adapter(<expr>)`,
//! where `<expr>` evaluates to a `java.lang.reflect.Type`. [`TypeExpr`] is that
//! expression as structured data; its shape mirrors the [`TypeDescriptor`] it
//! was built from, one `Parameterized` node per parameterized reference.
//!
//! ```
//! use moshigen_core::model::TypeDescriptor;
//! use moshigen_core::type_expr::TypeExpr;
//!
//! let ty = TypeDescriptor::parse("java.util.List<String>").unwrap();
//! assert_eq!(
//!     TypeExpr::build(&ty).to_string(),
//!     "Types.newParameterizedType(java.util.List.class, String.class)"
//! );
//! ```

use crate::model::TypeDescriptor;
use std::fmt;

/// Qualified name of Moshi's reflective type helper
pub const TYPES_CLASS: &str = "com.squareup.moshi.Types";

/// An expression yielding a reified type handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `<type>.class`
    ClassLiteral(String),

    /// `Types.newParameterizedType(<raw>.class, <args>...)`
    Parameterized { raw: String, args: Vec<TypeExpr> },

    /// `Types.arrayOf(<component>)`, for arrays of parameterized types
    ArrayOf(Box<TypeExpr>),
}

impl TypeExpr {
    /// Mirror a descriptor into the expression that reifies it
    pub fn build(ty: &TypeDescriptor) -> TypeExpr {
        match ty {
            TypeDescriptor::Reference { name, args } if !args.is_empty() => {
                TypeExpr::Parameterized {
                    raw: name.clone(),
                    args: args.iter().map(TypeExpr::build).collect(),
                }
            }
            TypeDescriptor::Wildcard { upper_bound } => TypeExpr::build(upper_bound),
            TypeDescriptor::Array(component) => match TypeExpr::build(component) {
                TypeExpr::ClassLiteral(literal) => TypeExpr::ClassLiteral(format!("{literal}[]")),
                generic => TypeExpr::ArrayOf(Box::new(generic)),
            },
            TypeDescriptor::Primitive(_) | TypeDescriptor::Boxed(_) | TypeDescriptor::String => {
                TypeExpr::ClassLiteral(ty.to_string())
            }
            TypeDescriptor::Reference { name, .. } => TypeExpr::ClassLiteral(name.clone()),
        }
    }

    /// Nesting depth; a class literal is 1
    pub fn depth(&self) -> usize {
        match self {
            TypeExpr::ClassLiteral(_) => 1,
            TypeExpr::Parameterized { args, .. } => {
                1 + args.iter().map(TypeExpr::depth).max().unwrap_or(0)
            }
            TypeExpr::ArrayOf(component) => component.depth(),
        }
    }

    /// Whether rendering references the `Types` helper
    pub fn uses_types_helper(&self) -> bool {
        !matches!(self, TypeExpr::ClassLiteral(_))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::ClassLiteral(name) => write!(f, "{name}.class"),
            TypeExpr::Parameterized { raw, args } => {
                write!(f, "Types.newParameterizedType({raw}.class")?;
                for arg in args {
                    write!(f, ", {arg}")?;
                }
                f.write_str(")")
            }
            TypeExpr::ArrayOf(component) => write!(f, "Types.arrayOf({component})"),
        }
    }
}
