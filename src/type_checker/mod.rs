//! Type resolution for a parsed module.
//!
//! This module walks the AST produced by the parser and annotates every
//! expression with its resolved type while:
//!
//! - Registering struct, enum and function declarations up front
//! - Resolving names through a chain of lexical scopes
//! - Checking operator, call, index, member and `in` operand types
//! - Binding loop variables and compound-assignment temporaries
//! - Checking return statements against the enclosing function
//!
//! Resolution stops at the first error.

pub mod environment;
pub mod resolved;
pub mod type_checker;
