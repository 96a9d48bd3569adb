/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Introspection trait, node kinds and the module root
/// - expressions: Definitions for various expression types
/// - statements: Statements and top-level declarations
/// - types: Type declarations as written in source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
