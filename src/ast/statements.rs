use std::slice::{Iter, IterMut};

use crate::Span;

use super::{
    ast::{AstNode, ItemType, Node, StmtType},
    expressions::{BinaryOperator, ExprWrapper},
    types::TypeDecl,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub id: usize,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, Stmt> {
        self.body.iter_mut()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: ExprWrapper,
    pub span: Span,
}

/// `name := value` or `mut name := value`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub is_mutable: bool,
    pub value: ExprWrapper,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: ExprWrapper,
    pub then_body: BlockStmt,
    pub else_body: Option<BlockStmt>,
    pub span: Span,
}

/// `for { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForeverStmt {
    pub body: BlockStmt,
    pub span: Span,
}

/// `for item in iterable { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStmt {
    pub binding: String,
    pub iterable: ExprWrapper,
    pub body: BlockStmt,
    pub span: Span,
}

/// `for key, value in iterable { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachPairStmt {
    pub first: String,
    pub second: String,
    pub iterable: ExprWrapper,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub values: Vec<ExprWrapper>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub assignee: ExprWrapper,
    pub value: ExprWrapper,
    pub span: Span,
}

/// Binds the place written on the left of a compound assignment to a
/// temporary, so the place expression is evaluated once.
#[derive(Debug, Clone, PartialEq)]
pub struct TempDeclStmt {
    pub id: usize,
    pub target: ExprWrapper,
    pub span: Span,
}

/// `lhs op= rhs`, already split into a temporary binding of `lhs` and the
/// assignment `temp = temp op rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundAssignStmt {
    pub operator: BinaryOperator,
    pub temp: TempDeclStmt,
    pub assignment: AssignStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeferStmt {
    pub expression: ExprWrapper,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssertStmt {
    pub condition: ExprWrapper,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Expression(ExpressionStmt),
    If(IfStmt),
    Forever(ForeverStmt),
    ForEach(ForEachStmt),
    ForEachPair(ForEachPairStmt),
    Return(ReturnStmt),
    Assign(AssignStmt),
    CompoundAssign(CompoundAssignStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Defer(DeferStmt),
    Assert(AssertStmt),
    Block(BlockStmt),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::VarDecl(_) => StmtType::VarDeclStmt,
            Stmt::Expression(_) => StmtType::ExpressionStmt,
            Stmt::If(_) => StmtType::IfStmt,
            Stmt::Forever(_) => StmtType::ForeverStmt,
            Stmt::ForEach(_) => StmtType::ForEachStmt,
            Stmt::ForEachPair(_) => StmtType::ForEachPairStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
            Stmt::Assign(_) => StmtType::AssignStmt,
            Stmt::CompoundAssign(_) => StmtType::CompoundAssignStmt,
            Stmt::Break(_) => StmtType::BreakStmt,
            Stmt::Continue(_) => StmtType::ContinueStmt,
            Stmt::Defer(_) => StmtType::DeferStmt,
            Stmt::Assert(_) => StmtType::AssertStmt,
            Stmt::Block(_) => StmtType::BlockStmt,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::Forever(stmt) => &stmt.span,
            Stmt::ForEach(stmt) => &stmt.span,
            Stmt::ForEachPair(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::CompoundAssign(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Continue(stmt) => &stmt.span,
            Stmt::Defer(stmt) => &stmt.span,
            Stmt::Assert(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
        }
    }
}

// DECLARATIONS

/// A function parameter: `name [mut] [?] type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub is_mutable: bool,
    pub is_optional: bool,
    pub ty: TypeDecl,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<Param>,
    pub return_types: Vec<TypeDecl>,
    pub body: BlockStmt,
    pub span: Span,
}

/// A struct field. An empty name marks an embedded field.
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: String,
    pub ty: TypeDecl,
}

impl StructField {
    pub fn is_embedded(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclStmt {
    pub name: String,
    pub fields: Vec<StructField>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclStmt {
    pub name: String,
    pub members: Vec<String>,
    pub span: Span,
}

/// `module name`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleStmt {
    pub name: String,
    pub span: Span,
}

/// `import name`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    FnDecl(FnDeclStmt),
    StructDecl(StructDeclStmt),
    EnumDecl(EnumDeclStmt),
    Module(ModuleStmt),
    Import(ImportStmt),
}

impl Item {
    pub fn get_item_type(&self) -> ItemType {
        match self {
            Item::FnDecl(_) => ItemType::FnDecl,
            Item::StructDecl(_) => ItemType::StructDecl,
            Item::EnumDecl(_) => ItemType::EnumDecl,
            Item::Module(_) => ItemType::Module,
            Item::Import(_) => ItemType::Import,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Item::FnDecl(item) => &item.span,
            Item::StructDecl(item) => &item.span,
            Item::EnumDecl(item) => &item.span,
            Item::Module(item) => &item.span,
            Item::Import(item) => &item.span,
        }
    }
}

// INTROSPECTION

fn block_node(block: &BlockStmt) -> Node<'_> {
    Node::Block(block)
}

fn expr_list(exprs: &[ExprWrapper]) -> Node<'_> {
    Node::List(exprs.iter().map(Node::Expr).collect())
}

impl AstNode for BlockStmt {
    fn node_name(&self) -> &'static str {
        "BlockStmt"
    }

    fn children(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![("body", Node::List(self.body.iter().map(Node::Stmt).collect()))]
    }
}

impl AstNode for Stmt {
    fn node_name(&self) -> &'static str {
        match self {
            Stmt::VarDecl(_) => "VarDeclStmt",
            Stmt::Expression(_) => "ExpressionStmt",
            Stmt::If(_) => "IfStmt",
            Stmt::Forever(_) => "ForeverStmt",
            Stmt::ForEach(_) => "ForEachStmt",
            Stmt::ForEachPair(_) => "ForEachPairStmt",
            Stmt::Return(_) => "ReturnStmt",
            Stmt::Assign(_) => "AssignStmt",
            Stmt::CompoundAssign(_) => "CompoundAssignStmt",
            Stmt::Break(_) => "BreakStmt",
            Stmt::Continue(_) => "ContinueStmt",
            Stmt::Defer(_) => "DeferStmt",
            Stmt::Assert(_) => "AssertStmt",
            Stmt::Block(_) => "BlockStmt",
        }
    }

    fn children(&self) -> Vec<(&'static str, Node<'_>)> {
        match self {
            Stmt::VarDecl(stmt) => vec![
                ("mutable", Node::Leaf(stmt.is_mutable.to_string())),
                ("name", Node::Leaf(stmt.identifier.clone())),
                ("value", Node::Expr(&stmt.value)),
            ],
            Stmt::Expression(stmt) => vec![("expression", Node::Expr(&stmt.expression))],
            Stmt::If(stmt) => {
                let mut children = vec![
                    ("condition", Node::Expr(&stmt.condition)),
                    ("then", block_node(&stmt.then_body)),
                ];
                if let Some(else_body) = &stmt.else_body {
                    children.push(("else", block_node(else_body)));
                }
                children
            }
            Stmt::Forever(stmt) => vec![("body", block_node(&stmt.body))],
            Stmt::ForEach(stmt) => vec![
                ("binding", Node::Leaf(stmt.binding.clone())),
                ("iterable", Node::Expr(&stmt.iterable)),
                ("body", block_node(&stmt.body)),
            ],
            Stmt::ForEachPair(stmt) => vec![
                ("first", Node::Leaf(stmt.first.clone())),
                ("second", Node::Leaf(stmt.second.clone())),
                ("iterable", Node::Expr(&stmt.iterable)),
                ("body", block_node(&stmt.body)),
            ],
            Stmt::Return(stmt) => vec![("values", expr_list(&stmt.values))],
            Stmt::Assign(stmt) => vec![
                ("assignee", Node::Expr(&stmt.assignee)),
                ("value", Node::Expr(&stmt.value)),
            ],
            Stmt::CompoundAssign(stmt) => vec![
                ("temp", Node::Leaf(stmt.temp.id.to_string())),
                ("target", Node::Expr(&stmt.temp.target)),
                ("assignee", Node::Expr(&stmt.assignment.assignee)),
                ("value", Node::Expr(&stmt.assignment.value)),
            ],
            Stmt::Break(_) | Stmt::Continue(_) => vec![],
            Stmt::Defer(stmt) => vec![("expression", Node::Expr(&stmt.expression))],
            Stmt::Assert(stmt) => vec![("condition", Node::Expr(&stmt.condition))],
            Stmt::Block(block) => block.children(),
        }
    }
}

impl AstNode for Param {
    fn node_name(&self) -> &'static str {
        "Param"
    }

    fn children(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![
            ("name", Node::Leaf(self.name.clone())),
            ("mutable", Node::Leaf(self.is_mutable.to_string())),
            ("optional", Node::Leaf(self.is_optional.to_string())),
            ("type", Node::Type(&self.ty)),
        ]
    }
}

impl AstNode for StructField {
    fn node_name(&self) -> &'static str {
        "StructField"
    }

    fn children(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![
            ("name", Node::Leaf(self.name.clone())),
            ("type", Node::Type(&self.ty)),
        ]
    }
}

impl AstNode for Item {
    fn node_name(&self) -> &'static str {
        match self {
            Item::FnDecl(_) => "FnDeclStmt",
            Item::StructDecl(_) => "StructDeclStmt",
            Item::EnumDecl(_) => "EnumDeclStmt",
            Item::Module(_) => "ModuleStmt",
            Item::Import(_) => "ImportStmt",
        }
    }

    fn children(&self) -> Vec<(&'static str, Node<'_>)> {
        match self {
            Item::FnDecl(decl) => vec![
                ("name", Node::Leaf(decl.identifier.clone())),
                (
                    "parameters",
                    Node::List(decl.parameters.iter().map(Node::Param).collect()),
                ),
                (
                    "returns",
                    Node::List(decl.return_types.iter().map(Node::Type).collect()),
                ),
                ("body", block_node(&decl.body)),
            ],
            Item::StructDecl(decl) => vec![
                ("name", Node::Leaf(decl.name.clone())),
                (
                    "fields",
                    Node::List(decl.fields.iter().map(Node::Field).collect()),
                ),
            ],
            Item::EnumDecl(decl) => vec![
                ("name", Node::Leaf(decl.name.clone())),
                (
                    "members",
                    Node::List(
                        decl.members
                            .iter()
                            .map(|member| Node::Leaf(member.clone()))
                            .collect(),
                    ),
                ),
            ],
            Item::Module(directive) => vec![("name", Node::Leaf(directive.name.clone()))],
            Item::Import(directive) => vec![("name", Node::Leaf(directive.name.clone()))],
        }
    }
}
