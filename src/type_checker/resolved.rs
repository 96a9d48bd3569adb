use std::fmt::{self, Display};

/// A fully resolved type, attached to every expression by the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Boolean,
    Integer { width: u32, signed: bool },
    Array(Box<ResolvedType>),
    Map {
        key: Box<ResolvedType>,
        value: Box<ResolvedType>,
    },
    Reference(Box<ResolvedType>),
    Struct { name: String },
    Enum { name: String },
    Function {
        params: Vec<ResolvedType>,
        returns: Vec<ResolvedType>,
    },
    /// Result of calling a function with zero or several returns.
    Tuple(Vec<ResolvedType>),
}

impl ResolvedType {
    pub fn int(width: u32, signed: bool) -> Self {
        ResolvedType::Integer { width, signed }
    }

    pub fn array(element: ResolvedType) -> Self {
        ResolvedType::Array(Box::new(element))
    }

    pub fn map(key: ResolvedType, value: ResolvedType) -> Self {
        ResolvedType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn reference(referent: ResolvedType) -> Self {
        ResolvedType::Reference(Box::new(referent))
    }

    /// Looks up a primitive type name.
    pub fn primitive(name: &str) -> Option<Self> {
        let ty = match name {
            "bool" => ResolvedType::Boolean,
            "i8" => ResolvedType::int(8, true),
            "i16" => ResolvedType::int(16, true),
            "int" => ResolvedType::int(32, true),
            "i64" => ResolvedType::int(64, true),
            "i128" => ResolvedType::int(128, true),
            "byte" => ResolvedType::int(8, false),
            "u16" => ResolvedType::int(16, false),
            "u32" => ResolvedType::int(32, false),
            "u64" => ResolvedType::int(64, false),
            "u128" => ResolvedType::int(128, false),
            _ => return None,
        };

        Some(ty)
    }

    /// Type of an integer literal with magnitude `value`.
    ///
    /// Literals are always signed. Anything from 8 up to 31 bits lands in
    /// `i16`, so no literal is ever typed `int`. `None` when 128 bits or
    /// more are needed.
    pub fn for_literal(value: u128) -> Option<Self> {
        let bits = (u128::BITS - value.leading_zeros()).max(1);

        let width = match bits {
            b if b < 8 => 8,
            b if b < 16 => 16,
            b if b < 32 => 16,
            b if b < 64 => 64,
            b if b < 128 => 128,
            _ => return None,
        };

        Some(ResolvedType::int(width, true))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, ResolvedType::Integer { .. })
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, ResolvedType::Boolean)
    }

    /// Strips any number of reference layers.
    pub fn dereferenced(&self) -> &ResolvedType {
        match self {
            ResolvedType::Reference(referent) => referent.dereferenced(),
            other => other,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[ResolvedType]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

impl Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Boolean => write!(f, "bool"),
            ResolvedType::Integer { width: 32, signed: true } => write!(f, "int"),
            ResolvedType::Integer { width: 8, signed: false } => write!(f, "byte"),
            ResolvedType::Integer { width, signed: true } => write!(f, "i{}", width),
            ResolvedType::Integer { width, signed: false } => write!(f, "u{}", width),
            ResolvedType::Array(element) => write!(f, "[]{}", element),
            ResolvedType::Map { key, value } => write!(f, "map[{}]{}", key, value),
            ResolvedType::Reference(referent) => write!(f, "&{}", referent),
            ResolvedType::Struct { name } | ResolvedType::Enum { name } => write!(f, "{}", name),
            ResolvedType::Function { params, returns } => {
                write!(f, "fn (")?;
                write_list(f, params)?;
                write!(f, ")")?;
                match returns.len() {
                    0 => Ok(()),
                    1 => write!(f, " {}", returns[0]),
                    _ => {
                        write!(f, " (")?;
                        write_list(f, returns)?;
                        write!(f, ")")
                    }
                }
            }
            ResolvedType::Tuple(types) => {
                write!(f, "(")?;
                write_list(f, types)?;
                write!(f, ")")
            }
        }
    }
}
