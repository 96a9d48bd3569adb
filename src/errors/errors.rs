use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Which phase rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Resolution,
    Type,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "LexicalError"),
            ErrorKind::Syntax => write!(f, "SyntaxError"),
            ErrorKind::Resolution => write!(f, "ResolutionError"),
            ErrorKind::Type => write!(f, "TypeError"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} (line {})", .internal_error, .position.line)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> usize {
        self.position.line
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::Syntax,
            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::FunctionAlreadyDeclared { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::UnknownMember { .. } => ErrorKind::Resolution,
            ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::InvalidOperandType { .. }
            | ErrorImpl::LiteralWidthUndefined { .. }
            | ErrorImpl::NotIndexable { .. }
            | ErrorImpl::NotCallable { .. }
            | ErrorImpl::NotIterable { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::MissingArguments { .. }
            | ErrorImpl::ArgumentTypeMatchError { .. }
            | ErrorImpl::ReturnCountMismatch { .. }
            | ErrorImpl::UninferableType { .. }
            | ErrorImpl::NotImplementedError { .. } => ErrorKind::Type,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::UnknownMember { .. } => "UnknownMember",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::InvalidOperandType { .. } => "InvalidOperandType",
            ErrorImpl::LiteralWidthUndefined { .. } => "LiteralWidthUndefined",
            ErrorImpl::NotIndexable { .. } => "NotIndexable",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::NotIterable { .. } => "NotIterable",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::ReturnCountMismatch { .. } => "ReturnCountMismatch",
            ErrorImpl::UninferableType { .. } => "UninferableType",
            ErrorImpl::NotImplementedError { .. } => "NotImplementedError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a newline?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` already declared in this block",
                variable
            )),
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::UnknownMember { type_, member } => {
                ErrorTip::Suggestion(format!("`{}` has no member `{}`", type_, member))
            }
            ErrorImpl::TypeMatchError { operator, expected, received } => {
                ErrorTip::Suggestion(format!(
                    "`{}` expects matching types, found `{}` and `{}`",
                    operator, expected, received
                ))
            }
            ErrorImpl::InvalidOperandType { operator, type_ } => ErrorTip::Suggestion(format!(
                "Operator `{}` can't be used on `{}`",
                operator, type_
            )),
            ErrorImpl::LiteralWidthUndefined { literal } => ErrorTip::Suggestion(format!(
                "Literal `{}` needs 128 bits or more, no integer type holds it",
                literal
            )),
            ErrorImpl::NotIndexable { type_ } => {
                ErrorTip::Suggestion(format!("`{}` can't be indexed", type_))
            }
            ErrorImpl::NotCallable { type_ } => {
                ErrorTip::Suggestion(format!("`{}` is not a function", type_))
            }
            ErrorImpl::NotIterable { type_ } => {
                ErrorTip::Suggestion(format!("`{}` can't be iterated", type_))
            }
            ErrorImpl::UnexpectedArguments { expected, received }
            | ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::ReturnCountMismatch { expected, received } => ErrorTip::Suggestion(
                format!("Expected {} return values, received {}", expected, received),
            ),
            ErrorImpl::UninferableType { what } => {
                ErrorTip::Suggestion(format!("Can't infer the type of {}", what))
            }
            ErrorImpl::NotImplementedError { feature } => ErrorTip::Suggestion(format!(
                "{} is expected to be handled, but has not yet been implemented",
                feature
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("type {type_} has no member {member:?}")]
    UnknownMember { type_: String, member: String },
    #[error("operator `{operator}` needs matching types: got `{expected}` and `{received}`")]
    TypeMatchError {
        operator: String,
        expected: String,
        received: String,
    },
    #[error("operator `{operator}` can't be used on `{type_}`")]
    InvalidOperandType { operator: String, type_: String },
    #[error("no integer width holds literal {literal}")]
    LiteralWidthUndefined { literal: u128 },
    #[error("type `{type_}` can't be indexed")]
    NotIndexable { type_: String },
    #[error("type `{type_}` is not callable")]
    NotCallable { type_: String },
    #[error("type `{type_}` can't be iterated")]
    NotIterable { type_: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("argument types do not match: expected {expected:?}, received {received:?}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("return value count: expected {expected:?}, received {received:?}")]
    ReturnCountMismatch { expected: usize, received: usize },
    #[error("can't infer the type of {what}")]
    UninferableType { what: String },
    #[error("{feature} is not implemented")]
    NotImplementedError { feature: String },
}
