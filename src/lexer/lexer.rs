use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

/// Anchors `source` at the current position; patterns are tried in order and
/// the first one that matches wins, so longer operators come first.
fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(&format!("^(?:{})", source)).expect("lexer pattern must compile"),
        handler,
    }
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"[\r\n]+", newline_handler),
        pattern(r"[ \t]+", skip_handler),
        pattern(r"//[^\r\n]*", skip_handler),
        pattern(r"[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern(r"[0-9]+", number_handler),
        pattern(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#, string_handler),
        pattern(r"`.`", char_handler),
        pattern(r"<<=", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeftEquals)),
        pattern(r">>=", MK_DEFAULT_HANDLER!(TokenKind::ShiftRightEquals)),
        pattern(r"<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft)),
        pattern(r">>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight)),
        pattern(r"<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals)),
        pattern(r">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals)),
        pattern(r"==", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        pattern(r"!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals)),
        pattern(r"&&", MK_DEFAULT_HANDLER!(TokenKind::LogicalAnd)),
        pattern(r"\|\|", MK_DEFAULT_HANDLER!(TokenKind::LogicalOr)),
        pattern(r":=", MK_DEFAULT_HANDLER!(TokenKind::Declare)),
        pattern(r"\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals)),
        pattern(r"-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals)),
        pattern(r"\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals)),
        pattern(r"/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals)),
        pattern(r"%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals)),
        pattern(r"&=", MK_DEFAULT_HANDLER!(TokenKind::AmpersandEquals)),
        pattern(r"\|=", MK_DEFAULT_HANDLER!(TokenKind::PipeEquals)),
        pattern(r"\^=", MK_DEFAULT_HANDLER!(TokenKind::CaretEquals)),
        pattern(r"\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket)),
        pattern(r"\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket)),
        pattern(r"\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        pattern(r"\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
        pattern(r"\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        pattern(r"\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
        pattern(r"=", MK_DEFAULT_HANDLER!(TokenKind::Assignment)),
        pattern(r"<", MK_DEFAULT_HANDLER!(TokenKind::Less)),
        pattern(r">", MK_DEFAULT_HANDLER!(TokenKind::Greater)),
        pattern(r"&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand)),
        pattern(r"\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe)),
        pattern(r"\^", MK_DEFAULT_HANDLER!(TokenKind::Caret)),
        pattern(r"\.", MK_DEFAULT_HANDLER!(TokenKind::Dot)),
        pattern(r",", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        pattern(r";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        pattern(r"\?", MK_DEFAULT_HANDLER!(TokenKind::Question)),
        pattern(r"\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        pattern(r"-", MK_DEFAULT_HANDLER!(TokenKind::Dash)),
        pattern(r"/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
        pattern(r"\*", MK_DEFAULT_HANDLER!(TokenKind::Star)),
        pattern(r"%", MK_DEFAULT_HANDLER!(TokenKind::Percent)),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from(crate::config::DEFAULT_SOURCE_NAME))
        };

        Lexer {
            tokens: vec![],
            source: source.to_string(),
            pos: 0,
            line: 1,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        tracing::trace!(token = %token, line = token.line(), "token");
        self.tokens.push(token);
    }

    /// Pushes a token whose value is the matched text and moves past it.
    pub fn push_matched(&mut self, kind: TokenKind, matched: &str) {
        let span = self.span_of(matched.len());
        self.push(MK_TOKEN!(kind, matched.to_string(), span));
        self.advance_n(matched.len());
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn get_position(&self) -> Position {
        Position::new(self.pos, self.line, Rc::clone(&self.file))
    }

    fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.get_position(),
            end: Position::new(self.pos + len, self.line, Rc::clone(&self.file)),
        }
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) {
    lexer.advance_n(matched.len());
}

// A run of line breaks is one significant token.
fn newline_handler(lexer: &mut Lexer, matched: &str) {
    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Newline, String::from("\\n"), span));
    lexer.advance_n(matched.len());
    lexer.line += matched.matches('\n').count();
}

fn number_handler(lexer: &mut Lexer, matched: &str) {
    lexer.push_matched(TokenKind::Number, matched);
}

fn string_handler(lexer: &mut Lexer, matched: &str) {
    // Escapes are kept verbatim; only the quotes are dropped.
    let inner = &matched[1..matched.len() - 1];
    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::String, inner.to_string(), span));
    lexer.advance_n(matched.len());
    lexer.line += matched.matches('\n').count();
}

fn char_handler(lexer: &mut Lexer, matched: &str) {
    let inner = &matched[1..matched.len() - 1];
    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Char, inner.to_string(), span));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) {
    if let Some(kind) = RESERVED_LOOKUP.get(matched) {
        lexer.push_matched(*kind, matched);
    } else {
        lexer.push_matched(TokenKind::Identifier, matched);
    }
}

/// Splits `source` into tokens, ending with `EOF`.
///
/// Fails on the first character no pattern accepts.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    tracing::debug!(file = %lex.file, bytes = source.len(), "lexing");

    while !lex.at_eof() {
        let found = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(lex.remainder())
                .map(|m| (pattern.handler, m.as_str().to_string()))
        });

        match found {
            Some((handler, matched)) => handler(&mut lex, &matched),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().to_string(),
                    },
                    lex.get_position(),
                ));
            }
        }
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    tracing::debug!(tokens = lex.tokens.len(), "lexing finished");
    Ok(lex.tokens)
}
