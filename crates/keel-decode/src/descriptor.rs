//! Type descriptors.
//!
//! A [`TypeDescriptor`] names the type a decoder should produce. It replaces
//! runtime type reflection: descriptors are plain values built at the call
//! site and matched structurally by decoders. Collection descriptors box
//! exactly the element types they need, so a list without an element type
//! cannot be expressed.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Bit width of an integer descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    Bits8,
    Bits16,
    Bits32,
    Bits64,
    /// Pointer-sized (`isize`/`usize`).
    Size,
}

impl IntWidth {
    fn suffix(self) -> &'static str {
        match self {
            IntWidth::Bits8 => "8",
            IntWidth::Bits16 => "16",
            IntWidth::Bits32 => "32",
            IntWidth::Bits64 => "64",
            IntWidth::Size => "size",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    String,
    Bool,
    Int(IntWidth),
    UInt(IntWidth),
    Float,
    Path,
    IpAddr,
    SocketAddr,
    Duration,
    List(Box<TypeDescriptor>),
    Set(Box<TypeDescriptor>),
    Map(Box<TypeDescriptor>, Box<TypeDescriptor>),
    Optional(Box<TypeDescriptor>),
    /// A user-registered record type.
    Named(String),
}

impl TypeDescriptor {
    pub fn list(elem: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(elem))
    }

    pub fn set(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Set(Box::new(elem))
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map(Box::new(key), Box::new(value))
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(inner))
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Named(name.into())
    }

    /// Short label of the descriptor's kind, e.g. `"List"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeDescriptor::String => "String",
            TypeDescriptor::Bool => "Bool",
            TypeDescriptor::Int(_) => "Int",
            TypeDescriptor::UInt(_) => "UInt",
            TypeDescriptor::Float => "Float",
            TypeDescriptor::Path => "Path",
            TypeDescriptor::IpAddr => "IpAddr",
            TypeDescriptor::SocketAddr => "SocketAddr",
            TypeDescriptor::Duration => "Duration",
            TypeDescriptor::List(_) => "List",
            TypeDescriptor::Set(_) => "Set",
            TypeDescriptor::Map(_, _) => "Map",
            TypeDescriptor::Optional(_) => "Optional",
            TypeDescriptor::Named(_) => "Named",
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::String => f.write_str("string"),
            TypeDescriptor::Bool => f.write_str("bool"),
            TypeDescriptor::Int(width) => write!(f, "i{}", width.suffix()),
            TypeDescriptor::UInt(width) => write!(f, "u{}", width.suffix()),
            TypeDescriptor::Float => f.write_str("float"),
            TypeDescriptor::Path => f.write_str("path"),
            TypeDescriptor::IpAddr => f.write_str("ipaddr"),
            TypeDescriptor::SocketAddr => f.write_str("socketaddr"),
            TypeDescriptor::Duration => f.write_str("duration"),
            TypeDescriptor::List(elem) => write!(f, "list<{}>", elem),
            TypeDescriptor::Set(elem) => write!(f, "set<{}>", elem),
            TypeDescriptor::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            TypeDescriptor::Optional(inner) => write!(f, "option<{}>", inner),
            TypeDescriptor::Named(name) => f.write_str(name),
        }
    }
}

/// Errors from parsing the textual descriptor form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorParseError {
    #[error("unexpected end of type descriptor")]
    UnexpectedEnd,

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("'{name}' takes {expected} type argument(s) but {found} were given (at offset {offset})")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
        offset: usize,
    },

    #[error("type descriptor nests deeper than {limit} levels (at offset {offset})")]
    TooDeep { limit: usize, offset: usize },
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorParseError;

    /// Parse `ident ('<' desc (',' desc)* '>')?`.
    ///
    /// Unknown identifiers become [`TypeDescriptor::Named`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = DescriptorParser {
            input: s,
            offset: 0,
            depth: 0,
        };
        let descriptor = parser.descriptor()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(descriptor),
            Some(found) => Err(DescriptorParseError::UnexpectedChar {
                found,
                offset: parser.offset,
            }),
        }
    }
}

/// Deepest `<..>` nesting accepted in descriptor text.
pub const MAX_DESCRIPTOR_DEPTH: usize = 64;

struct DescriptorParser<'a> {
    input: &'a str,
    offset: usize,
    depth: usize,
}

impl<'a> DescriptorParser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.offset += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.bump(c);
        }
    }

    fn ident(&mut self) -> Result<&'a str, DescriptorParseError> {
        let start = self.offset;
        while let Some(c) = self.peek().filter(|c| c.is_alphanumeric() || *c == '_') {
            self.bump(c);
        }
        if self.offset > start {
            Ok(&self.input[start..self.offset])
        } else {
            match self.peek() {
                Some(found) => Err(DescriptorParseError::UnexpectedChar {
                    found,
                    offset: self.offset,
                }),
                None => Err(DescriptorParseError::UnexpectedEnd),
            }
        }
    }

    fn descriptor(&mut self) -> Result<TypeDescriptor, DescriptorParseError> {
        self.skip_whitespace();
        let start = self.offset;
        let name = self.ident()?;
        self.skip_whitespace();

        let mut args = Vec::new();
        if self.peek() == Some('<') {
            if self.depth >= MAX_DESCRIPTOR_DEPTH {
                return Err(DescriptorParseError::TooDeep {
                    limit: MAX_DESCRIPTOR_DEPTH,
                    offset: self.offset,
                });
            }
            self.bump('<');
            self.depth += 1;
            args.push(self.descriptor()?);
            loop {
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => {
                        self.bump(',');
                        args.push(self.descriptor()?);
                    }
                    Some('>') => {
                        self.bump('>');
                        self.depth -= 1;
                        break;
                    }
                    Some(found) => {
                        return Err(DescriptorParseError::UnexpectedChar {
                            found,
                            offset: self.offset,
                        });
                    }
                    None => return Err(DescriptorParseError::UnexpectedEnd),
                }
            }
        }

        resolve(name, args, start)
    }
}

fn resolve(
    name: &str,
    args: Vec<TypeDescriptor>,
    offset: usize,
) -> Result<TypeDescriptor, DescriptorParseError> {
    let wrong_arity = |expected: usize, found: usize| DescriptorParseError::WrongArity {
        name: name.to_string(),
        expected,
        found,
        offset,
    };

    let scalar = match name {
        "string" => Some(TypeDescriptor::String),
        "bool" => Some(TypeDescriptor::Bool),
        "int" | "i64" => Some(TypeDescriptor::Int(IntWidth::Bits64)),
        "i8" => Some(TypeDescriptor::Int(IntWidth::Bits8)),
        "i16" => Some(TypeDescriptor::Int(IntWidth::Bits16)),
        "i32" => Some(TypeDescriptor::Int(IntWidth::Bits32)),
        "isize" => Some(TypeDescriptor::Int(IntWidth::Size)),
        "uint" | "u64" => Some(TypeDescriptor::UInt(IntWidth::Bits64)),
        "u8" => Some(TypeDescriptor::UInt(IntWidth::Bits8)),
        "u16" => Some(TypeDescriptor::UInt(IntWidth::Bits16)),
        "u32" => Some(TypeDescriptor::UInt(IntWidth::Bits32)),
        "usize" => Some(TypeDescriptor::UInt(IntWidth::Size)),
        "float" | "f64" => Some(TypeDescriptor::Float),
        "path" => Some(TypeDescriptor::Path),
        "ipaddr" => Some(TypeDescriptor::IpAddr),
        "socketaddr" => Some(TypeDescriptor::SocketAddr),
        "duration" => Some(TypeDescriptor::Duration),
        _ => None,
    };

    match name {
        "list" | "set" | "option" => {
            let [elem]: [TypeDescriptor; 1] = args
                .try_into()
                .map_err(|args: Vec<TypeDescriptor>| wrong_arity(1, args.len()))?;
            Ok(match name {
                "list" => TypeDescriptor::list(elem),
                "set" => TypeDescriptor::set(elem),
                _ => TypeDescriptor::optional(elem),
            })
        }
        "map" => {
            let [key, value]: [TypeDescriptor; 2] = args
                .try_into()
                .map_err(|args: Vec<TypeDescriptor>| wrong_arity(2, args.len()))?;
            Ok(TypeDescriptor::map(key, value))
        }
        _ if !args.is_empty() => Err(wrong_arity(0, args.len())),
        _ => Ok(scalar.unwrap_or_else(|| TypeDescriptor::named(name))),
    }
}
