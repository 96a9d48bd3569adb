//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and the identifier boundary rule
//! - Numeric, string and char literals
//! - Greedy operator matching
//! - Newline collapsing and line tracking
//! - Comments
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};
use crate::errors::errors::ErrorKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.v".to_string()))
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "fn struct enum module import mut if else for in return break continue defer assert map true false";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Fn,
            TokenKind::Struct,
            TokenKind::Enum,
            TokenKind::Module,
            TokenKind::Import,
            TokenKind::Mut,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::For,
            TokenKind::In,
            TokenKind::Return,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::Defer,
            TokenKind::Assert,
            TokenKind::Map,
            TokenKind::True,
            TokenKind::False,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let tokens = tokenize("formula iffy in_range mutable", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "formula");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "iffy");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "in_range");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "mutable");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_keyword_followed_by_punctuation() {
    assert_eq!(
        kinds("for{"),
        vec![TokenKind::For, TokenKind::OpenCurly, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase", None).unwrap();

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar", "baz_123", "_underscore", "CamelCase", "EOF"]);
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 0 1000000", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "1000000");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_number_has_no_fraction() {
    assert_eq!(
        kinds("3.14"),
        vec![TokenKind::Number, TokenKind::Dot, TokenKind::Number, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_strings_keep_raw_text() {
    let tokens = tokenize(r#""hello" 'world' "tab\there" "quote\"inside""#, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, r"tab\there");
    assert_eq!(tokens[3].value, r#"quote\"inside"#);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_char() {
    let tokens = tokenize("`a` `}`", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::Char);
    assert_eq!(tokens[1].value, "}");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % == != < > <= >= = && || & | ^ << >>"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::LogicalAnd,
            TokenKind::LogicalOr,
            TokenKind::Ampersand,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_compound_operators() {
    assert_eq!(
        kinds("+= -= *= /= %= &= |= ^= <<= >>= :="),
        vec![
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::AmpersandEquals,
            TokenKind::PipeEquals,
            TokenKind::CaretEquals,
            TokenKind::ShiftLeftEquals,
            TokenKind::ShiftRightEquals,
            TokenKind::Declare,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_shift_assign_is_one_token() {
    let tokens = tokenize(">>=", None).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::ShiftRightEquals);
    assert_eq!(tokens[0].value, ">>=");
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; ?"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Question,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_newlines_collapse_and_count_lines() {
    let tokens = tokenize("a\n\n\r\nb\nc", None).unwrap();

    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[0].line(), 1);
    assert_eq!(tokens[1].line(), 1);
    assert_eq!(tokens[2].line(), 4);
    assert_eq!(tokens[4].line(), 5);
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("x := 5 // this is a comment\ny := 10", None).unwrap();

    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Identifier,
            TokenKind::Declare,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Declare,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[4].value, "y");
    assert_eq!(tokens[4].line(), 2);
}

#[test]
fn test_tabs_and_spaces_are_ignored() {
    assert_eq!(
        kinds("\t a \t  b"),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("ab  cd", Some("pos.v".to_string())).unwrap();

    assert_eq!(tokens[1].span.start.offset, 4);
    assert_eq!(tokens[1].span.end.offset, 6);
    assert_eq!(tokens[1].span.start.file.as_str(), "pos.v");
}

#[test]
fn test_unrecognised_character_reports_line() {
    let error = tokenize("a := 1\nb := @", None).unwrap_err();

    assert_eq!(error.get_error_kind(), ErrorKind::Lexical);
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_unterminated_string_is_rejected() {
    let error = tokenize("s := \"open", None).unwrap_err();
    assert_eq!(error.get_error_kind(), ErrorKind::Lexical);
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}
