//! Type parsing implementation.
//!
//! This module handles parsing of type declarations. It supports:
//!
//! - Base types (identifiers)
//! - Array types (`[]T`)
//! - Reference types (`&T`)
//! - Map types (`map[K]V`)
//!
//! Every form starts with its own token, so only NUD handlers are needed.

use std::collections::HashMap;

use crate::{
    ast::types::{ArrayType, MapType, ReferenceType, TypeDecl},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeDecl, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::OpenBracket, parse_array_type);
    parser.type_nud(TokenKind::Ampersand, parse_reference_type);
    parser.type_nud(TokenKind::Map, parse_map_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeDecl, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(TypeDecl::base(token.value, token.span.start))
}

pub fn parse_array_type(parser: &mut Parser) -> Result<TypeDecl, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;
    let underlying = parse_type(parser)?;

    Ok(TypeDecl::Array(ArrayType {
        underlying: Box::new(underlying),
    }))
}

pub fn parse_reference_type(parser: &mut Parser) -> Result<TypeDecl, Error> {
    parser.expect(TokenKind::Ampersand)?;
    let referent = parse_type(parser)?;

    Ok(TypeDecl::Reference(ReferenceType {
        referent: Box::new(referent),
    }))
}

pub fn parse_map_type(parser: &mut Parser) -> Result<TypeDecl, Error> {
    parser.expect(TokenKind::Map)?;
    parser.expect(TokenKind::OpenBracket)?;
    let key = parse_type(parser)?;
    parser.expect(TokenKind::CloseBracket)?;
    let value = parse_type(parser)?;

    Ok(TypeDecl::Map(MapType {
        key: Box::new(key),
        value: Box::new(value),
    }))
}

/// Whether the current token can start a type declaration.
pub fn starts_type(parser: &Parser) -> bool {
    parser
        .get_type_nud_lookup()
        .contains_key(&parser.current_token_kind())
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeDecl, Error> {
    let token_kind = parser.current_token_kind();
    match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => {
            let nud = *nud;
            nud(parser)
        }
        None => Err(parser.unexpected()),
    }
}
