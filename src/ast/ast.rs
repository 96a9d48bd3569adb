use std::fmt::Debug;

use crate::Span;

use super::{
    expressions::ExprWrapper,
    statements::{BlockStmt, Item, Param, Stmt, StructField},
    types::TypeDecl,
};

/// Item Types
///
/// The kinds of top-level declarations a module can hold.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ItemType {
    FnDecl,
    StructDecl,
    EnumDecl,
    Module,
    Import,
}

impl ItemType {
    pub const ALL: [ItemType; 5] = [
        ItemType::FnDecl,
        ItemType::StructDecl,
        ItemType::EnumDecl,
        ItemType::Module,
        ItemType::Import,
    ];
}

/// Statement Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    VarDeclStmt,
    ExpressionStmt,
    IfStmt,
    ForeverStmt,
    ForEachStmt,
    ForEachPairStmt,
    ReturnStmt,
    AssignStmt,
    CompoundAssignStmt,
    BreakStmt,
    ContinueStmt,
    DeferStmt,
    AssertStmt,
    BlockStmt,
}

impl StmtType {
    pub const ALL: [StmtType; 14] = [
        StmtType::VarDeclStmt,
        StmtType::ExpressionStmt,
        StmtType::IfStmt,
        StmtType::ForeverStmt,
        StmtType::ForEachStmt,
        StmtType::ForEachPairStmt,
        StmtType::ReturnStmt,
        StmtType::AssignStmt,
        StmtType::CompoundAssignStmt,
        StmtType::BreakStmt,
        StmtType::ContinueStmt,
        StmtType::DeferStmt,
        StmtType::AssertStmt,
        StmtType::BlockStmt,
    ];
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Number,
    Boolean,
    String,
    Char,
    Symbol,
    Binary,
    Index,
    Call,
    Member,
    In,
    Array,
    Temp,
}

impl ExprType {
    pub const ALL: [ExprType; 12] = [
        ExprType::Number,
        ExprType::Boolean,
        ExprType::String,
        ExprType::Char,
        ExprType::Symbol,
        ExprType::Binary,
        ExprType::Index,
        ExprType::Call,
        ExprType::Member,
        ExprType::In,
        ExprType::Array,
        ExprType::Temp,
    ];
}

/// A borrowed view of any child in the tree.
///
/// Scalar fields (names, flags, literal values) come back as `Leaf` with
/// their source spelling.
#[derive(Debug, Clone)]
pub enum Node<'a> {
    Module(&'a Module),
    Item(&'a Item),
    Stmt(&'a Stmt),
    Block(&'a BlockStmt),
    Expr(&'a ExprWrapper),
    Type(&'a TypeDecl),
    Param(&'a Param),
    Field(&'a StructField),
    List(Vec<Node<'a>>),
    Leaf(String),
}

impl<'a> Node<'a> {
    pub fn node_name(&self) -> &'static str {
        match self {
            Node::Module(node) => node.node_name(),
            Node::Item(node) => node.node_name(),
            Node::Stmt(node) => node.node_name(),
            Node::Block(node) => node.node_name(),
            Node::Expr(node) => node.node_name(),
            Node::Type(node) => node.node_name(),
            Node::Param(node) => node.node_name(),
            Node::Field(node) => node.node_name(),
            Node::List(_) => "List",
            Node::Leaf(_) => "Leaf",
        }
    }

    pub fn children(&self) -> Vec<(&'static str, Node<'a>)> {
        match self {
            Node::Module(node) => node.children(),
            Node::Item(node) => node.children(),
            Node::Stmt(node) => node.children(),
            Node::Block(node) => node.children(),
            Node::Expr(node) => node.children(),
            Node::Type(node) => node.children(),
            Node::Param(node) => node.children(),
            Node::Field(node) => node.children(),
            Node::List(nodes) => nodes.iter().map(|n| ("item", n.clone())).collect(),
            Node::Leaf(_) => vec![],
        }
    }

    /// Visits this node and every descendant, parents first.
    pub fn walk(&self, visit: &mut dyn FnMut(&Node<'a>)) {
        visit(self);
        for (_, child) in self.children() {
            child.walk(visit);
        }
    }
}

/// Structural introspection shared by every node.
///
/// A dump or debug printer only needs these two methods: the node's name and
/// its children in declaration order, each keyed by field name.
pub trait AstNode: Debug {
    fn node_name(&self) -> &'static str;
    fn children(&self) -> Vec<(&'static str, Node<'_>)>;

    /// Looks a child up by its field name.
    fn child(&self, field: &str) -> Option<Node<'_>> {
        self.children()
            .into_iter()
            .find(|(name, _)| *name == field)
            .map(|(_, node)| node)
    }
}

/// The ordered top-level declarations of one source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub items: Vec<Item>,
    pub span: Span,
}

impl AstNode for Module {
    fn node_name(&self) -> &'static str {
        "Module"
    }

    fn children(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![("items", Node::List(self.items.iter().map(Node::Item).collect()))]
    }
}
