//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a module AST. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Top-level declarations (functions, structs, enums, module/import)
//! - Statement parsing (declarations, assignments, control flow)
//! - Compound assignment desugaring through temporaries
//! - Expression parsing (binary ops, calls, index, member, `in`, literals)
//! - Type declarations for parameters, returns and struct fields
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
