//! Type declarations as written in source.
//!
//! These are the unresolved spellings that appear in parameter lists, return
//! lists and struct fields:
//!
//! - `name` - a base type, resolved later by name
//! - `[]T` - an array of `T`
//! - `&T` - a reference to `T`
//! - `map[K]V` - a map from `K` to `V`
//!
//! The type checker turns them into [`crate::type_checker::resolved::ResolvedType`].

use std::fmt::Display;

use crate::Position;

use super::ast::{AstNode, Node};

/// A named type that needs resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolType {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub underlying: Box<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceType {
    pub referent: Box<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub key: Box<TypeDecl>,
    pub value: Box<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDecl {
    Base(SymbolType),
    Array(ArrayType),
    Reference(ReferenceType),
    Map(MapType),
}

impl TypeDecl {
    pub fn base(name: impl Into<String>, position: Position) -> Self {
        TypeDecl::Base(SymbolType {
            name: name.into(),
            position,
        })
    }

    /// Position of the innermost named type, used when it fails to resolve.
    pub fn get_position(&self) -> &Position {
        match self {
            TypeDecl::Base(symbol) => &symbol.position,
            TypeDecl::Array(array) => array.underlying.get_position(),
            TypeDecl::Reference(reference) => reference.referent.get_position(),
            TypeDecl::Map(map) => map.key.get_position(),
        }
    }
}

impl Display for TypeDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeDecl::Base(symbol) => write!(f, "{}", symbol.name),
            TypeDecl::Array(array) => write!(f, "[]{}", array.underlying),
            TypeDecl::Reference(reference) => write!(f, "&{}", reference.referent),
            TypeDecl::Map(map) => write!(f, "map[{}]{}", map.key, map.value),
        }
    }
}

impl AstNode for TypeDecl {
    fn node_name(&self) -> &'static str {
        match self {
            TypeDecl::Base(_) => "BaseType",
            TypeDecl::Array(_) => "ArrayType",
            TypeDecl::Reference(_) => "ReferenceType",
            TypeDecl::Map(_) => "MapType",
        }
    }

    fn children(&self) -> Vec<(&'static str, Node<'_>)> {
        match self {
            TypeDecl::Base(symbol) => vec![("name", Node::Leaf(symbol.name.clone()))],
            TypeDecl::Array(array) => vec![("element", Node::Type(&array.underlying))],
            TypeDecl::Reference(reference) => vec![("referent", Node::Type(&reference.referent))],
            TypeDecl::Map(map) => vec![
                ("key", Node::Type(&map.key)),
                ("value", Node::Type(&map.value)),
            ],
        }
    }
}
