//! Target types from annotated Rust structs
//!
//! Structs marked `#[generate_moshi]` describe Java data classes. Named
//! fields become constructor parameters in declaration order:
//!
//! ```ignore
//! #[java_package("com.example")]
//! mod model {
//!     #[generate_moshi(generate_factory, debug_logs)]
//!     pub struct User {
//!         pub name: String,
//!         pub email: Option<String>,
//!         #[json(name = "user_age")]
//!         pub age: i32,
//!         pub tags: Vec<String>,
//!     }
//!
//!     #[generate_moshi_factory(types(User), target_class_name = "ModelFactory")]
//!     pub struct Registry;
//! }
//! ```
//!
//! | Rust | Java |
//! |------|------|
//! | `bool` | `boolean` |
//! | `i8` | `byte` |
//! | `i16` | `short` |
//! | `i32`, `u8`, `u16`, `u32` | `int` |
//! | `i64`, `u64`, `isize`, `usize` | `long` |
//! | `f32` / `f64` | `float` / `double` |
//! | `char` | `char` |
//! | `String`, `&str` | `String` |
//! | `Option<T>` | boxed `T`, nullable |
//! | `Box<T>` | `T` |
//! | `Vec<T>`, `VecDeque<T>` | `java.util.List<T>` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>` | `java.util.Map<K, V>` |
//! | `HashSet<T>`, `BTreeSet<T>` | `java.util.Set<T>` |
//! | `[T; N]` | `T[]` |
//! | other paths | `<package>.<Name>` |

use anyhow::{Context, Result};
use darling::FromMeta;
use darling::util::PathList;
use moshigen_core::naming;
use moshigen_core::{
    Constructor, FactoryRegistration, GenerateFlags, Parameter, PrimitiveKind, TargetType,
    TypeDescriptor, Visibility,
};
use std::collections::HashMap;
use std::path::Path;
use syn::{Attribute, Fields, GenericArgument, Item, PathArguments, Type};

const GENERATE_MOSHI: &str = "generate_moshi";
const GENERATE_MOSHI_FACTORY: &str = "generate_moshi_factory";
const JAVA_PACKAGE: &str = "java_package";

/// Options of `#[generate_moshi(...)]`
#[derive(Debug, Default, FromMeta)]
struct GenerateMoshiArgs {
    #[darling(default)]
    generate_factory: bool,

    #[darling(default)]
    generate_writer: Option<bool>,

    #[darling(default)]
    debug_logs: bool,
}

impl From<GenerateMoshiArgs> for GenerateFlags {
    fn from(args: GenerateMoshiArgs) -> Self {
        GenerateFlags {
            generate_factory: args.generate_factory,
            generate_writer: args.generate_writer.unwrap_or(true),
            debug_logs: args.debug_logs,
        }
    }
}

/// Options of `#[generate_moshi_factory(...)]`
#[derive(Debug, FromMeta)]
struct GenerateFactoryArgs {
    types: PathList,

    #[darling(default)]
    target_class_name: Option<String>,

    #[darling(default)]
    target_package: Option<String>,
}

/// Options of `#[json(...)]` on a field
#[derive(Debug, FromMeta)]
struct JsonArgs {
    name: String,
}

/// A scanned struct, before its field types are resolved
struct Candidate<'a> {
    item: &'a syn::ItemStruct,
    package: Option<String>,
    flags: GenerateFlags,
}

/// A scanned registration, before its type paths are resolved
struct PendingFactory {
    declared_in: Option<String>,
    args: GenerateFactoryArgs,
}

/// Scans Rust source for target types and factory registrations
pub struct SourceScanner {
    default_package: Option<String>,
    nullable_marker: Option<String>,
}

impl SourceScanner {
    /// `nullable_marker` annotates `Option` and `#[nullable]` fields; without
    /// one such fields are rejected
    pub fn new(default_package: Option<String>, nullable_marker: Option<String>) -> Self {
        Self {
            default_package,
            nullable_marker,
        }
    }

    /// Parse a Rust source file
    pub fn scan_file(&self, path: &Path) -> Result<(Vec<TargetType>, Vec<FactoryRegistration>)> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;

        self.scan_source(&content).with_context(|| format!("Failed to scan {path:?}"))
    }

    /// Parse Rust source code
    pub fn scan_source(&self, source: &str) -> Result<(Vec<TargetType>, Vec<FactoryRegistration>)> {
        let file = syn::parse_file(source).context("Failed to parse Rust source")?;

        let mut candidates = Vec::new();
        let mut factories = Vec::new();
        self.collect(
            &file.items,
            self.default_package.clone(),
            &mut candidates,
            &mut factories,
        )?;

        // Rust type name -> Java qualified name, for cross references
        let known: HashMap<String, String> = candidates
            .iter()
            .map(|c| {
                let ident = c.item.ident.to_string();
                let qualified = qualify(c.package.as_deref(), &ident);
                (ident, qualified)
            })
            .collect();

        let targets = candidates
            .iter()
            .map(|c| self.to_target(c, &known))
            .collect::<Result<Vec<_>>>()?;

        let registrations = factories
            .into_iter()
            .map(|pending| resolve_factory(pending, &known))
            .collect();

        Ok((targets, registrations))
    }

    fn collect<'a>(
        &self,
        items: &'a [Item],
        package: Option<String>,
        candidates: &mut Vec<Candidate<'a>>,
        factories: &mut Vec<PendingFactory>,
    ) -> Result<()> {
        for item in items {
            match item {
                Item::Struct(s) => {
                    let package = java_package(&s.attrs)?.or_else(|| package.clone());
                    push_factories(&s.attrs, &package, factories)?;
                    if let Some(flags) = generate_flags(&s.attrs)
                        .with_context(|| format!("Invalid #[{GENERATE_MOSHI}] on {}", s.ident))?
                    {
                        candidates.push(Candidate {
                            item: s,
                            package,
                            flags,
                        });
                    }
                }
                Item::Mod(m) => {
                    let package = java_package(&m.attrs)?.or_else(|| package.clone());
                    push_factories(&m.attrs, &package, factories)?;
                    if let Some((_, content)) = &m.content {
                        self.collect(content, package, candidates, factories)?;
                    }
                }
                Item::Enum(e) => push_factories(&e.attrs, &package, factories)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn to_target(
        &self,
        candidate: &Candidate<'_>,
        known: &HashMap<String, String>,
    ) -> Result<TargetType> {
        let s = candidate.item;
        let package = candidate.package.as_deref();
        let mut target = TargetType::new(qualify(package, &s.ident.to_string()))
            .with_visibility(Visibility {
                public: matches!(s.vis, syn::Visibility::Public(_)),
                is_abstract: false,
            })
            .with_flags(candidate.flags);
        target.namespace = package.map(str::to_string);

        let resolver = TypeResolver { package, known };

        match &s.fields {
            Fields::Named(fields) => {
                let params = fields
                    .named
                    .iter()
                    .map(|f| self.to_parameter(f, &resolver))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("Unsupported field in struct {}", s.ident))?;
                target = target.with_constructor(Constructor::new(params));
            }
            // A unit struct has a constructor without parameters
            Fields::Unit => target = target.with_constructor(Constructor::default()),
            // A tuple struct has no named constructor parameters to bind JSON keys to
            Fields::Unnamed(_) => {}
        }

        Ok(target)
    }

    fn to_parameter(&self, field: &syn::Field, resolver: &TypeResolver<'_>) -> Result<Parameter> {
        let rust_name = field
            .ident
            .as_ref()
            .context("Field must have a name")?
            .to_string();
        let rust_name = rust_name.trim_start_matches("r#").to_string();

        let (ty, optional) = resolver.resolve_field(&field.ty)?;
        let name = naming::to_camel_case(&rust_name);

        let mut parameter = Parameter::new(name.clone(), ty);
        if optional || has_marker(&field.attrs, "nullable") {
            let marker = self.nullable_marker.clone().with_context(|| {
                format!("Field '{rust_name}' is nullable but no nullable annotation is configured")
            })?;
            parameter = parameter.annotated(marker);
        }

        let json_name = match json_rename(&field.attrs)? {
            Some(json_name) => Some(json_name),
            None => serde_rename(&field.attrs)?,
        }
        .or_else(|| (name != rust_name).then(|| rust_name.clone()));
        if let Some(json_name) = json_name {
            parameter = parameter.json(json_name);
        }

        Ok(parameter)
    }
}

fn qualify(package: Option<&str>, simple: &str) -> String {
    match package {
        Some(package) => naming::qualify(package, simple),
        None => simple.to_string(),
    }
}

/// `None` when the struct is not marked for generation
fn generate_flags(attrs: &[Attribute]) -> Result<Option<GenerateFlags>> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident(GENERATE_MOSHI)) else {
        return Ok(None);
    };

    let args = match &attr.meta {
        syn::Meta::Path(_) => GenerateMoshiArgs::default(),
        meta => GenerateMoshiArgs::from_meta(meta).map_err(attribute_error)?,
    };

    Ok(Some(args.into()))
}

/// darling errors carry a span, which is neither `Send` nor `Sync`
fn attribute_error(err: darling::Error) -> anyhow::Error {
    anyhow::anyhow!("{err}")
}

fn java_package(attrs: &[Attribute]) -> Result<Option<String>> {
    attrs
        .iter()
        .find(|a| a.path().is_ident(JAVA_PACKAGE))
        .map(|attr| {
            attr.parse_args::<syn::LitStr>()
                .map(|lit| lit.value())
                .with_context(|| format!("#[{JAVA_PACKAGE}] expects a string literal"))
        })
        .transpose()
}

fn push_factories(
    attrs: &[Attribute],
    declared_in: &Option<String>,
    factories: &mut Vec<PendingFactory>,
) -> Result<()> {
    for attr in attrs.iter().filter(|a| a.path().is_ident(GENERATE_MOSHI_FACTORY)) {
        let args = GenerateFactoryArgs::from_meta(&attr.meta)
            .map_err(attribute_error)
            .with_context(|| format!("Invalid #[{GENERATE_MOSHI_FACTORY}]"))?;
        factories.push(PendingFactory {
            declared_in: declared_in.clone(),
            args,
        });
    }
    Ok(())
}

fn resolve_factory(
    pending: PendingFactory,
    known: &HashMap<String, String>,
) -> FactoryRegistration {
    let types = pending
        .args
        .types
        .iter()
        .map(|path| {
            let rendered = path
                .segments
                .iter()
                .map(|s| s.ident.to_string())
                .collect::<Vec<_>>();
            let last = rendered.last().cloned().unwrap_or_default();
            match known.get(&last) {
                Some(qualified) if rendered.len() == 1 => qualified.clone(),
                _ if rendered.len() > 1 => rendered.join("."),
                _ => qualify(pending.declared_in.as_deref(), &last),
            }
        })
        .collect();

    let mut registration = FactoryRegistration::new(types);
    registration.declared_in = pending.declared_in;
    if let Some(name) = pending.args.target_class_name {
        registration.target_class_name = name;
    }
    registration.target_package = pending.args.target_package;
    registration
}

fn has_marker(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|a| a.path().is_ident(name))
}

/// `#[json(name = "...")]`
fn json_rename(attrs: &[Attribute]) -> Result<Option<String>> {
    attrs
        .iter()
        .find(|a| a.path().is_ident("json"))
        .map(|attr| {
            JsonArgs::from_meta(&attr.meta)
                .map(|args| args.name)
                .map_err(attribute_error)
                .context("#[json] expects name = \"...\"")
        })
        .transpose()
}

/// The JSON key from `#[serde(rename = "...")]` or
/// `#[serde(rename(deserialize = "..."))]`
fn serde_rename(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut rename = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") && meta.input.peek(syn::Token![=]) {
                let lit: syn::LitStr = meta.value()?.parse()?;
                rename = Some(lit.value());
            } else if meta.path.is_ident("rename") {
                meta.parse_nested_meta(|inner| {
                    let lit: syn::LitStr = inner.value()?.parse()?;
                    if inner.path.is_ident("deserialize") {
                        rename = Some(lit.value());
                    }
                    Ok(())
                })?;
            } else if meta.input.peek(syn::Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let _: proc_macro2::Group = meta.input.parse()?;
            }
            Ok(())
        })
        .context("Invalid #[serde] attribute")?;
    }
    Ok(rename)
}

/// Maps Rust field types to Java type descriptors
struct TypeResolver<'a> {
    package: Option<&'a str>,
    known: &'a HashMap<String, String>,
}

impl TypeResolver<'_> {
    /// The descriptor and whether the field is optional
    fn resolve_field(&self, ty: &Type) -> Result<(TypeDescriptor, bool)> {
        if let Some(inner) = generic_arg(ty, "Option") {
            return Ok((self.resolve(inner)?.boxed(), true));
        }
        Ok((self.resolve(ty)?, false))
    }

    fn resolve(&self, ty: &Type) -> Result<TypeDescriptor> {
        match ty {
            Type::Path(type_path) => self.resolve_path(&type_path.path, ty),
            Type::Reference(reference) => match &*reference.elem {
                Type::Path(p) if p.path.is_ident("str") => Ok(TypeDescriptor::String),
                _ => anyhow::bail!("Unsupported field type: {}", quote::quote!(#ty)),
            },
            Type::Array(array) => Ok(TypeDescriptor::array(self.resolve(&array.elem)?)),
            Type::Paren(paren) => self.resolve(&paren.elem),
            _ => anyhow::bail!("Unsupported field type: {}", quote::quote!(#ty)),
        }
    }

    /// Type arguments are always reference types in Java
    fn resolve_arg(&self, ty: &Type) -> Result<TypeDescriptor> {
        Ok(self.resolve(ty)?.boxed())
    }

    fn resolve_path(&self, path: &syn::Path, ty: &Type) -> Result<TypeDescriptor> {
        let segment = path
            .segments
            .last()
            .with_context(|| format!("Unsupported field type: {}", quote::quote!(#ty)))?;
        let ident = segment.ident.to_string();

        if let Some(kind) = primitive(&ident) {
            return Ok(TypeDescriptor::Primitive(kind));
        }

        let args = type_args(&segment.arguments);
        let descriptor = match (ident.as_str(), args.as_slice()) {
            ("String", []) => TypeDescriptor::String,
            ("Box", [inner]) => self.resolve(inner)?,
            ("Option", [inner]) => self.resolve_arg(inner)?,
            ("Vec" | "VecDeque" | "LinkedList", [inner]) => {
                TypeDescriptor::parameterized("java.util.List", vec![self.resolve_arg(inner)?])
            }
            ("HashSet" | "BTreeSet", [inner]) => {
                TypeDescriptor::parameterized("java.util.Set", vec![self.resolve_arg(inner)?])
            }
            ("HashMap" | "BTreeMap", [key, value]) => TypeDescriptor::parameterized(
                "java.util.Map",
                vec![self.resolve_arg(key)?, self.resolve_arg(value)?],
            ),
            _ => {
                let name = if path.segments.len() > 1 {
                    path.segments
                        .iter()
                        .map(|s| s.ident.to_string())
                        .collect::<Vec<_>>()
                        .join(".")
                } else {
                    self.known
                        .get(&ident)
                        .cloned()
                        .unwrap_or_else(|| qualify(self.package, &ident))
                };
                let args = args
                    .iter()
                    .map(|arg| self.resolve_arg(arg))
                    .collect::<Result<Vec<_>>>()?;
                TypeDescriptor::parameterized(name, args)
            }
        };

        Ok(descriptor)
    }
}

fn primitive(ident: &str) -> Option<PrimitiveKind> {
    let kind = match ident {
        "bool" => PrimitiveKind::Boolean,
        "i8" => PrimitiveKind::Byte,
        "i16" => PrimitiveKind::Short,
        "i32" | "u8" | "u16" | "u32" => PrimitiveKind::Int,
        "i64" | "u64" | "isize" | "usize" => PrimitiveKind::Long,
        "f32" => PrimitiveKind::Float,
        "f64" => PrimitiveKind::Double,
        "char" => PrimitiveKind::Char,
        _ => return None,
    };
    Some(kind)
}

fn type_args(arguments: &PathArguments) -> Vec<&Type> {
    match arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// The single type argument of `ty` when its last segment is `wrapper`
fn generic_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    match type_args(&segment.arguments).as_slice() {
        [inner] => Some(*inner),
        _ => None,
    }
}
