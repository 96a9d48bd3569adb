use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("assert", TokenKind::Assert);
        map.insert("break", TokenKind::Break);
        map.insert("const", TokenKind::Const);
        map.insert("continue", TokenKind::Continue);
        map.insert("defer", TokenKind::Defer);
        map.insert("else", TokenKind::Else);
        map.insert("enum", TokenKind::Enum);
        map.insert("false", TokenKind::False);
        map.insert("fn", TokenKind::Fn);
        map.insert("for", TokenKind::For);
        map.insert("go", TokenKind::Go);
        map.insert("goto", TokenKind::Goto);
        map.insert("if", TokenKind::If);
        map.insert("import", TokenKind::Import);
        map.insert("in", TokenKind::In);
        map.insert("interface", TokenKind::Interface);
        map.insert("map", TokenKind::Map);
        map.insert("match", TokenKind::Match);
        map.insert("module", TokenKind::Module);
        map.insert("mut", TokenKind::Mut);
        map.insert("or", TokenKind::Or);
        map.insert("pub", TokenKind::Pub);
        map.insert("return", TokenKind::Return);
        map.insert("struct", TokenKind::Struct);
        map.insert("true", TokenKind::True);
        map.insert("type", TokenKind::Type);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Newline,
    Number,
    String,
    Char,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Declare,    // :=
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    ShiftLeft,
    ShiftRight,

    LogicalAnd,
    LogicalOr,
    Ampersand,
    Pipe,
    Caret,

    Dot,
    Comma,
    Semicolon,
    Question,

    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    AmpersandEquals,
    PipeEquals,
    CaretEquals,
    ShiftLeftEquals,
    ShiftRightEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Assert,
    Break,
    Const,
    Continue,
    Defer,
    Else,
    Enum,
    False,
    Fn,
    For,
    Go,
    Goto,
    If,
    Import,
    In,
    Interface,
    Map,
    Match,
    Module,
    Mut,
    Or,
    Pub,
    Return,
    Struct,
    True,
    Type,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Char,
            TokenKind::Identifier,
            TokenKind::Number,
        ]) {
            write!(f, "{} ({})", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// Line the token starts on, 1-based.
    pub fn line(&self) -> usize {
        self.span.start.line
    }
}
