use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, type_checker::resolved::ResolvedType, Span};

use super::ast::{AstNode, ExprType, Node};

// LITERALS

/// Number Expression
/// An unsigned decimal magnitude; its width is decided during resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: u128,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
}

/// String Expression
/// Holds the raw text between the quotes, escapes undecoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharExpr {
    pub value: char,
}

/// Symbol Expression
/// Represents an identifier in the AST. This includes functions.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
}

// COMPLEX

/// Category an operator belongs to for operand checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCategory {
    Arithmetic,
    Bitwise,
    Shift,
    Logical,
    Equality,
    Relational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    ShiftLeft,
    ShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOperator> {
        let operator = match kind {
            TokenKind::LogicalOr => BinaryOperator::LogicalOr,
            TokenKind::LogicalAnd => BinaryOperator::LogicalAnd,
            TokenKind::Pipe => BinaryOperator::BitwiseOr,
            TokenKind::Caret => BinaryOperator::BitwiseXor,
            TokenKind::Ampersand => BinaryOperator::BitwiseAnd,
            TokenKind::Equals => BinaryOperator::Equals,
            TokenKind::NotEquals => BinaryOperator::NotEquals,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::LessEquals => BinaryOperator::LessEquals,
            TokenKind::GreaterEquals => BinaryOperator::GreaterEquals,
            TokenKind::ShiftLeft => BinaryOperator::ShiftLeft,
            TokenKind::ShiftRight => BinaryOperator::ShiftRight,
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Dash => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Percent => BinaryOperator::Modulo,
            _ => return None,
        };

        Some(operator)
    }

    /// The operator a compound assignment token applies (`+=` gives `+`).
    pub fn from_compound(kind: TokenKind) -> Option<BinaryOperator> {
        let operator = match kind {
            TokenKind::PlusEquals => BinaryOperator::Add,
            TokenKind::MinusEquals => BinaryOperator::Subtract,
            TokenKind::StarEquals => BinaryOperator::Multiply,
            TokenKind::SlashEquals => BinaryOperator::Divide,
            TokenKind::PercentEquals => BinaryOperator::Modulo,
            TokenKind::AmpersandEquals => BinaryOperator::BitwiseAnd,
            TokenKind::PipeEquals => BinaryOperator::BitwiseOr,
            TokenKind::CaretEquals => BinaryOperator::BitwiseXor,
            TokenKind::ShiftLeftEquals => BinaryOperator::ShiftLeft,
            TokenKind::ShiftRightEquals => BinaryOperator::ShiftRight,
            _ => return None,
        };

        Some(operator)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }

    pub fn category(&self) -> OperatorCategory {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Modulo => OperatorCategory::Arithmetic,
            BinaryOperator::BitwiseOr | BinaryOperator::BitwiseXor | BinaryOperator::BitwiseAnd => {
                OperatorCategory::Bitwise
            }
            BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight => OperatorCategory::Shift,
            BinaryOperator::LogicalOr | BinaryOperator::LogicalAnd => OperatorCategory::Logical,
            BinaryOperator::Equals | BinaryOperator::NotEquals => OperatorCategory::Equality,
            BinaryOperator::Less
            | BinaryOperator::Greater
            | BinaryOperator::LessEquals
            | BinaryOperator::GreaterEquals => OperatorCategory::Relational,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binary Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<ExprWrapper>,
    pub operator: BinaryOperator,
    pub right: Box<ExprWrapper>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub base: Box<ExprWrapper>,
    pub index: Box<ExprWrapper>,
}

/// Call Expression
/// Represents a function call in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<ExprWrapper>,
    pub arguments: Vec<ExprWrapper>,
}

/// Member Expression
/// `base.member`, with the member kept as a plain name.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub base: Box<ExprWrapper>,
    pub member: String,
}

/// `item in collection`
#[derive(Debug, Clone, PartialEq)]
pub struct InExpr {
    pub item: Box<ExprWrapper>,
    pub collection: Box<ExprWrapper>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub elements: Vec<ExprWrapper>,
}

/// Temp Expression
/// A reference to a temporary introduced by compound assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct TempExpr {
    pub id: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    Boolean(BooleanExpr),
    String(StringExpr),
    Char(CharExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Index(IndexExpr),
    Call(CallExpr),
    Member(MemberExpr),
    In(InExpr),
    Array(ArrayExpr),
    Temp(TempExpr),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Number(_) => ExprType::Number,
            Expr::Boolean(_) => ExprType::Boolean,
            Expr::String(_) => ExprType::String,
            Expr::Char(_) => ExprType::Char,
            Expr::Symbol(_) => ExprType::Symbol,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Index(_) => ExprType::Index,
            Expr::Call(_) => ExprType::Call,
            Expr::Member(_) => ExprType::Member,
            Expr::In(_) => ExprType::In,
            Expr::Array(_) => ExprType::Array,
            Expr::Temp(_) => ExprType::Temp,
        }
    }
}

/// An expression together with its span and, after resolution, its type.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprWrapper {
    pub expr: Expr,
    pub span: Span,
    pub resolved_type: Option<ResolvedType>,
}

impl ExprWrapper {
    pub fn new(expr: Expr, span: Span) -> Self {
        ExprWrapper {
            expr,
            span,
            resolved_type: None,
        }
    }

    pub fn get_expr_type(&self) -> ExprType {
        self.expr.get_expr_type()
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// The type attached by the resolver, if it has run.
    pub fn get_type(&self) -> Option<&ResolvedType> {
        self.resolved_type.as_ref()
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match &self.expr {
            Expr::Symbol(symbol) => Some(&symbol.value),
            _ => None,
        }
    }
}

impl AstNode for ExprWrapper {
    fn node_name(&self) -> &'static str {
        match &self.expr {
            Expr::Number(_) => "NumberExpr",
            Expr::Boolean(_) => "BooleanExpr",
            Expr::String(_) => "StringExpr",
            Expr::Char(_) => "CharExpr",
            Expr::Symbol(_) => "SymbolExpr",
            Expr::Binary(_) => "BinaryExpr",
            Expr::Index(_) => "IndexExpr",
            Expr::Call(_) => "CallExpr",
            Expr::Member(_) => "MemberExpr",
            Expr::In(_) => "InExpr",
            Expr::Array(_) => "ArrayExpr",
            Expr::Temp(_) => "TempExpr",
        }
    }

    fn children(&self) -> Vec<(&'static str, Node<'_>)> {
        match &self.expr {
            Expr::Number(number) => vec![("value", Node::Leaf(number.value.to_string()))],
            Expr::Boolean(boolean) => vec![("value", Node::Leaf(boolean.value.to_string()))],
            Expr::String(string) => vec![("value", Node::Leaf(string.value.clone()))],
            Expr::Char(character) => vec![("value", Node::Leaf(character.value.to_string()))],
            Expr::Symbol(symbol) => vec![("name", Node::Leaf(symbol.value.clone()))],
            Expr::Binary(binary) => vec![
                ("left", Node::Expr(&binary.left)),
                ("operator", Node::Leaf(binary.operator.symbol().to_string())),
                ("right", Node::Expr(&binary.right)),
            ],
            Expr::Index(index) => vec![
                ("base", Node::Expr(&index.base)),
                ("index", Node::Expr(&index.index)),
            ],
            Expr::Call(call) => vec![
                ("callee", Node::Expr(&call.callee)),
                (
                    "arguments",
                    Node::List(call.arguments.iter().map(Node::Expr).collect()),
                ),
            ],
            Expr::Member(member) => vec![
                ("base", Node::Expr(&member.base)),
                ("member", Node::Leaf(member.member.clone())),
            ],
            Expr::In(in_expr) => vec![
                ("item", Node::Expr(&in_expr.item)),
                ("collection", Node::Expr(&in_expr.collection)),
            ],
            Expr::Array(array) => vec![(
                "elements",
                Node::List(array.elements.iter().map(Node::Expr).collect()),
            )],
            Expr::Temp(temp) => vec![("id", Node::Leaf(temp.id.to_string()))],
        }
    }
}
