#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Module,
    config::FrontendConfig,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A point in the source: byte offset, 1-based line and the source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: usize, line: usize, file: Rc<String>) -> Self {
        Position { offset, line, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs lexing, parsing and type resolution over one source text.
///
/// Either the whole module comes back annotated or the first error is
/// returned; nothing partial escapes.
pub fn compile_source(source: &str, config: &FrontendConfig) -> Result<Module, Error> {
    let file = config.source_name();
    tracing::debug!(file = %file, bytes = source.len(), "compiling source");

    let tokens = tokenize(source, Some(file.clone()))?;
    let mut module = parse(tokens, Rc::new(file))?;

    if config.resolve_types {
        type_check(&mut module)?;
    }

    Ok(module)
}

/// Returns the line number, the text of that line and the column of `offset`.
pub fn get_line_at_position(source: &str, offset: usize) -> Option<(usize, String, usize)> {
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&offset) {
            return Some((line_number, line.to_string(), offset - start));
        }

        start = end;
        line_number += 1;
    }

    None
}

/// Formats an error against the source it came from.
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `}`, ...)
/// -> main.v
///    |
/// 20 | x := }
///    | -----^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();

    let mut out = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };
    out.push_str(&format!("-> {}\n", position.file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
