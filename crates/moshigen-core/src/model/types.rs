//! Type descriptors for constructor parameters.
//!
//! A [`TypeDescriptor`] is a language-neutral view of a Java field type. It is
//! what the strategy selector switches on and what the type-expression
//! builder mirrors when a nested adapter has to be looked up.
//!
//! Descriptors can be parsed from Java type syntax:
//!
//! ```
//! use moshigen_core::model::{PrimitiveKind, TypeDescriptor};
//!
//! let ty = TypeDescriptor::parse("java.util.Map<String, java.util.List<Integer>>").unwrap();
//! assert_eq!(ty.to_string(), "java.util.Map<String, java.util.List<Integer>>");
//!
//! assert_eq!(
//!     TypeDescriptor::parse("short").unwrap(),
//!     TypeDescriptor::Primitive(PrimitiveKind::Short)
//! );
//! ```

use std::fmt;
use thiserror::Error;

/// Name of the implicit upper bound of an unbounded wildcard
pub const OBJECT: &str = "java.lang.Object";

/// Java primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Char,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// The Java keyword (`int`, `boolean`, ...)
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// The `java.lang` wrapper class (`Integer`, `Boolean`, ...)
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Match a wrapper class by simple or `java.lang`-qualified name
    pub fn from_boxed_name(name: &str) -> Option<Self> {
        let simple = name.strip_prefix("java.lang.").unwrap_or(name);
        Self::ALL.into_iter().find(|kind| kind.boxed_name() == simple)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Shape of a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A primitive (`int`, `boolean`, ...)
    Primitive(PrimitiveKind),

    /// A primitive wrapper (`Integer`, `java.lang.Boolean`, ...)
    Boxed(PrimitiveKind),

    /// `java.lang.String`
    String,

    /// Any other class or interface, with its type arguments in order
    Reference {
        name: String,
        args: Vec<TypeDescriptor>,
    },

    /// A wildcard type argument, reduced to its single upper bound
    Wildcard { upper_bound: Box<TypeDescriptor> },

    /// An array of the component type
    Array(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// A reference type without type arguments
    pub fn reference(name: impl Into<String>) -> Self {
        TypeDescriptor::Reference {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parameterized reference type
    pub fn parameterized(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Reference {
            name: name.into(),
            args,
        }
    }

    /// `java.lang.Object`
    pub fn object() -> Self {
        Self::reference(OBJECT)
    }

    /// `? extends <bound>`
    pub fn wildcard(upper_bound: TypeDescriptor) -> Self {
        TypeDescriptor::Wildcard {
            upper_bound: Box::new(upper_bound),
        }
    }

    pub fn array(component: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(component))
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, TypeDescriptor::Reference { args, .. } if !args.is_empty())
    }

    /// Nesting depth: leaves are 1, each level of type arguments adds 1
    pub fn depth(&self) -> usize {
        match self {
            TypeDescriptor::Reference { args, .. } => {
                1 + args.iter().map(TypeDescriptor::depth).max().unwrap_or(0)
            }
            TypeDescriptor::Wildcard { upper_bound } => upper_bound.depth(),
            TypeDescriptor::Array(component) => component.depth(),
            _ => 1,
        }
    }

    /// The type usable as a nullable local: primitives become their wrapper
    pub fn boxed(&self) -> TypeDescriptor {
        match self {
            TypeDescriptor::Primitive(kind) => TypeDescriptor::Boxed(*kind),
            other => other.clone(),
        }
    }

    /// Parse Java type syntax into a descriptor
    pub fn parse(input: &str) -> Result<Self, TypeParseError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(TypeParseError::Empty);
        }

        let mut parser = Parser {
            input,
            tokens,
            pos: 0,
        };
        let ty = parser.parse_type(false)?;
        if let Some((offset, token)) = parser.tokens.get(parser.pos) {
            return Err(TypeParseError::TrailingInput {
                input: input.to_string(),
                position: *offset,
                found: token.to_string(),
            });
        }
        Ok(ty)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(kind) => f.write_str(kind.keyword()),
            TypeDescriptor::Boxed(kind) => f.write_str(kind.boxed_name()),
            TypeDescriptor::String => f.write_str("String"),
            TypeDescriptor::Reference { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeDescriptor::Wildcard { upper_bound } => {
                if **upper_bound == TypeDescriptor::object() {
                    f.write_str("?")
                } else {
                    write!(f, "? extends {upper_bound}")
                }
            }
            TypeDescriptor::Array(component) => write!(f, "{component}[]"),
        }
    }
}

/// Error parsing Java type syntax
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    #[error("empty type")]
    Empty,

    #[error("unexpected '{found}' at offset {position} in type '{input}'")]
    UnexpectedToken {
        input: String,
        position: usize,
        found: String,
    },

    #[error("unexpected end of type '{input}'")]
    UnexpectedEnd { input: String },

    #[error("primitive '{primitive}' cannot be used as a type argument in '{input}'")]
    PrimitiveTypeArgument { input: String, primitive: String },

    #[error("trailing '{found}' at offset {position} in type '{input}'")]
    TrailingInput {
        input: String,
        position: usize,
        found: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// A possibly dotted identifier (`java.util.List`, `extends`)
    Name(String),
    Lt,
    Gt,
    Comma,
    Question,
    /// `[]`
    Dims,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(name) => f.write_str(name),
            Token::Lt => f.write_str("<"),
            Token::Gt => f.write_str(">"),
            Token::Comma => f.write_str(","),
            Token::Question => f.write_str("?"),
            Token::Dims => f.write_str("[]"),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, TypeParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '<' => Token::Lt,
            '>' => Token::Gt,
            ',' => Token::Comma,
            '?' => Token::Question,
            '[' => {
                chars.next();
                while chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
                match chars.peek() {
                    Some(&(_, ']')) => {}
                    Some(&(position, found)) => {
                        return Err(TypeParseError::UnexpectedToken {
                            input: input.to_string(),
                            position,
                            found: found.to_string(),
                        });
                    }
                    None => {
                        return Err(TypeParseError::UnexpectedEnd {
                            input: input.to_string(),
                        });
                    }
                }
                Token::Dims
            }
            c if is_name_char(c) => {
                let mut name = String::new();
                while let Some((_, c)) = chars.next_if(|&(_, c)| is_name_char(c)) {
                    name.push(c);
                }
                tokens.push((offset, Token::Name(name)));
                continue;
            }
            other => {
                return Err(TypeParseError::UnexpectedToken {
                    input: input.to_string(),
                    position: offset,
                    found: other.to_string(),
                });
            }
        };
        chars.next();
        tokens.push((offset, token));
    }

    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, token)| token)
    }

    fn next(&mut self) -> Result<(usize, Token), TypeParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| TypeParseError::UnexpectedEnd {
                input: self.input.to_string(),
            })?;
        self.pos += 1;
        Ok(token)
    }

    fn unexpected(&self, position: usize, token: &Token) -> TypeParseError {
        TypeParseError::UnexpectedToken {
            input: self.input.to_string(),
            position,
            found: token.to_string(),
        }
    }

    fn parse_type(&mut self, is_argument: bool) -> Result<TypeDescriptor, TypeParseError> {
        let (offset, token) = self.next()?;
        let base = match token {
            Token::Question if is_argument => return self.parse_wildcard(),
            Token::Name(name) => self.parse_named(offset, name)?,
            other => return Err(self.unexpected(offset, &other)),
        };

        let mut ty = base;
        while self.peek() == Some(&Token::Dims) {
            self.pos += 1;
            ty = TypeDescriptor::array(ty);
        }

        if let (true, TypeDescriptor::Primitive(kind)) = (is_argument, &ty) {
            return Err(TypeParseError::PrimitiveTypeArgument {
                input: self.input.to_string(),
                primitive: kind.keyword().to_string(),
            });
        }
        Ok(ty)
    }

    fn parse_named(
        &mut self,
        offset: usize,
        name: String,
    ) -> Result<TypeDescriptor, TypeParseError> {
        if name == "void" || name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.unexpected(offset, &Token::Name(name)));
        }

        let base = if let Some(kind) = PrimitiveKind::from_keyword(&name) {
            TypeDescriptor::Primitive(kind)
        } else if name == "String" || name == "java.lang.String" {
            TypeDescriptor::String
        } else if let Some(kind) = PrimitiveKind::from_boxed_name(&name) {
            TypeDescriptor::Boxed(kind)
        } else {
            TypeDescriptor::reference(name)
        };

        if self.peek() != Some(&Token::Lt) {
            return Ok(base);
        }

        let TypeDescriptor::Reference { name, .. } = base else {
            let (position, token) = self.next()?;
            return Err(self.unexpected(position, &token));
        };

        self.pos += 1;
        let mut args = vec![self.parse_type(true)?];
        loop {
            let (position, token) = self.next()?;
            match token {
                Token::Comma => args.push(self.parse_type(true)?),
                Token::Gt => break,
                other => return Err(self.unexpected(position, &other)),
            }
        }
        Ok(TypeDescriptor::parameterized(name, args))
    }

    fn parse_wildcard(&mut self) -> Result<TypeDescriptor, TypeParseError> {
        match self.peek() {
            Some(Token::Name(keyword)) if keyword == "extends" => {
                self.pos += 1;
                let bound = self.parse_type(true)?;
                Ok(TypeDescriptor::wildcard(bound))
            }
            Some(Token::Name(keyword)) if keyword == "super" => {
                // Lower-bounded wildcards keep Object as their upper bound
                self.pos += 1;
                self.parse_type(true)?;
                Ok(TypeDescriptor::wildcard(TypeDescriptor::object()))
            }
            _ => Ok(TypeDescriptor::wildcard(TypeDescriptor::object())),
        }
    }
}
