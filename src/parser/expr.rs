use crate::{
    ast::expressions::{
        ArrayExpr, BinaryExpr, BinaryOperator, BooleanExpr, CallExpr, CharExpr, Expr,
        ExprWrapper, InExpr, IndexExpr, MemberExpr, NumberExpr, StringExpr, SymbolExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprWrapper, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    let expr = match token.kind {
        TokenKind::Number => match token.value.parse::<u128>() {
            Ok(value) => Expr::Number(NumberExpr { value }),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::Identifier => Expr::Symbol(SymbolExpr { value: token.value }),
        TokenKind::String => Expr::String(StringExpr { value: token.value }),
        TokenKind::Char => match token.value.chars().next() {
            Some(value) => Expr::Char(CharExpr { value }),
            None => return Err(parser.unexpected()),
        },
        TokenKind::True => Expr::Boolean(BooleanExpr { value: true }),
        TokenKind::False => Expr::Boolean(BooleanExpr { value: false }),
        _ => return Err(parser.unexpected()),
    };

    parser.advance();
    Ok(ExprWrapper::new(expr, token.span))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    let operator_token = parser.advance().clone();
    let operator = match BinaryOperator::from_token_kind(operator_token.kind) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    let span = Span {
        start: left.get_span().start.clone(),
        end: right.get_span().end.clone(),
    };

    Ok(ExprWrapper::new(
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }),
        span,
    ))
}

/// `( expr )` yields the inner expression; no grouping node is kept.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses `expr {, expr}` up to (not including) `closing`.
fn parse_expr_list(parser: &mut Parser, closing: TokenKind) -> Result<Vec<ExprWrapper>, Error> {
    let mut exprs = vec![];

    if parser.current_token_kind() == closing {
        return Ok(exprs);
    }

    loop {
        exprs.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    Ok(exprs)
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.advance().span.start.clone();
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(ExprWrapper::new(
        Expr::Array(ArrayExpr { elements }),
        Span {
            start,
            end: parser.previous_end(),
        },
    ))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;

    let span = Span {
        start: left.get_span().start.clone(),
        end: parser.previous_end(),
    };

    Ok(ExprWrapper::new(
        Expr::Call(CallExpr {
            callee: Box::new(left),
            arguments,
        }),
        span,
    ))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let span = Span {
        start: left.get_span().start.clone(),
        end: parser.previous_end(),
    };

    Ok(ExprWrapper::new(
        Expr::Index(IndexExpr {
            base: Box::new(left),
            index: Box::new(index),
        }),
        span,
    ))
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();

    let error = parser.unexpected_detailed("expected member name after `.`");
    let member = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let span = Span {
        start: left.get_span().start.clone(),
        end: member.span.end.clone(),
    };

    Ok(ExprWrapper::new(
        Expr::Member(MemberExpr {
            base: Box::new(left),
            member: member.value,
        }),
        span,
    ))
}

pub fn parse_in_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();
    let collection = parse_expr(parser, bp)?;

    let span = Span {
        start: left.get_span().start.clone(),
        end: collection.get_span().end.clone(),
    };

    Ok(ExprWrapper::new(
        Expr::In(InExpr {
            item: Box::new(left),
            collection: Box::new(collection),
        }),
        span,
    ))
}
