use crate::{
    ast::{
        expressions::{BinaryExpr, BinaryOperator, Expr, ExprWrapper, TempExpr},
        statements::{
            AssertStmt, AssignStmt, BlockStmt, BreakStmt, CompoundAssignStmt, ContinueStmt,
            DeferStmt, EnumDeclStmt, ExpressionStmt, FnDeclStmt, ForEachPairStmt, ForEachStmt,
            ForeverStmt, IfStmt, ImportStmt, Item, ModuleStmt, Param, ReturnStmt, Stmt,
            StructDeclStmt, StructField, TempDeclStmt, VarDeclStmt,
        },
        types::TypeDecl,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Position, Span,
};

use super::{
    parser::Parser,
    types::{parse_type, starts_type},
};

// ITEMS

pub fn parse_item(parser: &mut Parser) -> Result<Item, Error> {
    let kind = parser.current_token_kind();
    let handler = match parser.get_item_lookup().get(&kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected()),
    };

    let item = handler(parser)?;
    tracing::trace!(item = ?item.get_item_type(), line = item.get_span().start.line, "item");
    Ok(item)
}

fn span_from(parser: &Parser, start: Position) -> Span {
    Span {
        start,
        end: parser.previous_end(),
    }
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Item, Error> {
    let start = parser.advance().span.start.clone();

    let identifier = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_parameters(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let return_types = match parser.current_token_kind() {
        TokenKind::OpenCurly => vec![],
        TokenKind::OpenParen => parse_return_list(parser)?,
        _ => vec![parse_type(parser)?],
    };

    let body = parse_block(parser)?;

    Ok(Item::FnDecl(FnDeclStmt {
        span: span_from(parser, start),
        identifier,
        parameters,
        return_types,
        body,
    }))
}

/// `name [mut] [?] type {, name [mut] [?] type}`, possibly empty.
fn parse_parameters(parser: &mut Parser) -> Result<Vec<Param>, Error> {
    let mut parameters = Vec::new();

    if parser.current_token_kind() == TokenKind::CloseParen {
        return Ok(parameters);
    }

    loop {
        let name = parser.expect(TokenKind::Identifier)?;

        let is_mutable = parser.current_token_kind() == TokenKind::Mut;
        if is_mutable {
            parser.advance();
        }

        let is_optional = parser.current_token_kind() == TokenKind::Question;
        if is_optional {
            parser.advance();
        }

        let ty = parse_type(parser)?;

        parameters.push(Param {
            name: name.value,
            is_mutable,
            is_optional,
            ty,
            span: span_from(parser, name.span.start),
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    Ok(parameters)
}

/// `( name {, type} )`: the first entry is always a bare type name.
fn parse_return_list(parser: &mut Parser) -> Result<Vec<TypeDecl>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let error = parser.unexpected_detailed("expected a type name to open the return list");
    let first = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let mut return_types = vec![TypeDecl::base(first.value, first.span.start)];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        return_types.push(parse_type(parser)?);
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(return_types)
}

pub fn parse_struct_decl_stmt(parser: &mut Parser) -> Result<Item, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = Vec::new();
    loop {
        parser.skip_newlines();
        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }

        // `Name` alone on its line is an embedded field, `name T` a named one
        let named = parser.current_token_kind() == TokenKind::Identifier
            && parser.peek_kind() != TokenKind::Newline;

        let field_name = if named {
            parser.advance().value.clone()
        } else if starts_type(parser) {
            String::new()
        } else {
            return Err(parser.unexpected_detailed("expected a struct field"));
        };

        let ty = parse_type(parser)?;
        parser.expect(TokenKind::Newline)?;

        fields.push(StructField {
            name: field_name,
            ty,
        });
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Item::StructDecl(StructDeclStmt {
        span: span_from(parser, start),
        name,
        fields,
    }))
}

pub fn parse_enum_decl_stmt(parser: &mut Parser) -> Result<Item, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenCurly)?;

    let mut members = Vec::new();
    loop {
        parser.skip_newlines();
        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }

        let error = parser.unexpected_detailed("expected an enum member name");
        members.push(parser.expect_error(TokenKind::Identifier, Some(error))?.value);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Item::EnumDecl(EnumDeclStmt {
        span: span_from(parser, start),
        name,
        members,
    }))
}

pub fn parse_module_stmt(parser: &mut Parser) -> Result<Item, Error> {
    let start = parser.advance().span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?.value;

    Ok(Item::Module(ModuleStmt {
        name,
        span: span_from(parser, start),
    }))
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<Item, Error> {
    let start = parser.advance().span.start.clone();
    let name = parser.expect(TokenKind::Identifier)?.value;

    Ok(Item::Import(ImportStmt {
        name,
        span: span_from(parser, start),
    }))
}

// STATEMENTS

/// `{` statements `}`; blank lines inside produce nothing.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    loop {
        parser.skip_newlines();
        match parser.current_token_kind() {
            TokenKind::CloseCurly => break,
            TokenKind::EOF => return Err(parser.unexpected()),
            _ => body.push(parse_stmt(parser)?),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        id: parser.advance_id(),
        span: span_from(parser, start),
    })
}

/// Every statement ends at a newline.
fn expect_newline(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Newline)?;
    Ok(())
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();
    if let Some(handler) = parser.get_stmt_lookup().get(&kind) {
        let handler = *handler;
        return handler(parser);
    }

    // `name := expr` is only ever a bare name, never a parenthesised one
    if kind == TokenKind::Identifier && parser.peek_kind() == TokenKind::Declare {
        return parse_short_var_decl_stmt(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    let start = expr.get_span().start.clone();

    let stmt = match parser.current_token_kind() {
        TokenKind::Declare => {
            return Err(parser.unexpected_detailed("expected an identifier on the left of `:=`"))
        }
        TokenKind::Assignment => {
            if !matches!(
                expr.expr,
                Expr::Symbol(_) | Expr::Index(_) | Expr::Member(_)
            ) {
                return Err(parser.unexpected_detailed(
                    "only a name, an index or a member can be assigned to",
                ));
            }
            parser.advance();
            let value = parse_expr(parser, BindingPower::Default)?;

            Stmt::Assign(AssignStmt {
                assignee: expr,
                value,
                span: span_from(parser, start),
            })
        }
        kind => match BinaryOperator::from_compound(kind) {
            Some(operator) => {
                parser.advance();
                let value = parse_expr(parser, BindingPower::Default)?;
                desugar_compound_assignment(parser, expr, operator, value)
            }
            None => Stmt::Expression(ExpressionStmt {
                span: expr.get_span().clone(),
                expression: expr,
            }),
        },
    };

    expect_newline(parser)?;
    Ok(stmt)
}

/// Rewrites `target op= value` into a temporary bound to `target` followed by
/// `temp = temp op value`. `target` is moved into the temporary declaration
/// and is not repeated anywhere else.
fn desugar_compound_assignment(
    parser: &mut Parser,
    target: ExprWrapper,
    operator: BinaryOperator,
    value: ExprWrapper,
) -> Stmt {
    let id = parser.advance_id();
    let target_span = target.get_span().clone();
    let span = Span {
        start: target_span.start.clone(),
        end: value.get_span().end.clone(),
    };

    let temp = || ExprWrapper::new(Expr::Temp(TempExpr { id }), target_span.clone());

    let binary = ExprWrapper::new(
        Expr::Binary(BinaryExpr {
            left: Box::new(temp()),
            operator,
            right: Box::new(value),
        }),
        span.clone(),
    );

    Stmt::CompoundAssign(CompoundAssignStmt {
        operator,
        temp: TempDeclStmt {
            id,
            target,
            span: target_span.clone(),
        },
        assignment: AssignStmt {
            assignee: temp(),
            value: binary,
            span: span.clone(),
        },
        span,
    })
}

fn parse_short_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Declare)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    let span = span_from(parser, name.span.start);

    expect_newline(parser)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        identifier: name.value,
        is_mutable: false,
        value,
        span,
    }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Mut)?.span.start;

    let error = parser.unexpected_detailed("expected identifier during variable declaration");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::Declare)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    let span = span_from(parser, start);

    expect_newline(parser)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        identifier,
        is_mutable: true,
        value,
        span,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };

    let span = span_from(parser, start);
    expect_newline(parser)?;

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        else_body,
        span,
    }))
}

/// `for {}`, `for x in e {}` or `for a, b in e {}`.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    if parser.current_token_kind() == TokenKind::OpenCurly {
        let body = parse_block(parser)?;
        let span = span_from(parser, start);
        expect_newline(parser)?;

        return Ok(Stmt::Forever(ForeverStmt { body, span }));
    }

    let first = parser.expect(TokenKind::Identifier)?.value;
    let second = if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        Some(parser.expect(TokenKind::Identifier)?.value)
    } else {
        None
    };

    parser.expect(TokenKind::In)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;
    let span = span_from(parser, start);

    expect_newline(parser)?;

    Ok(match second {
        Some(second) => Stmt::ForEachPair(ForEachPairStmt {
            first,
            second,
            iterable,
            body,
            span,
        }),
        None => Stmt::ForEach(ForEachStmt {
            binding: first,
            iterable,
            body,
            span,
        }),
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let mut values = vec![];
    if parser.current_token_kind() != TokenKind::Newline {
        loop {
            values.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    let span = span_from(parser, start);
    expect_newline(parser)?;

    Ok(Stmt::Return(ReturnStmt { values, span }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span.clone();
    expect_newline(parser)?;

    Ok(Stmt::Break(BreakStmt { span }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span.clone();
    expect_newline(parser)?;

    Ok(Stmt::Continue(ContinueStmt { span }))
}

pub fn parse_defer_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let expression = parse_expr(parser, BindingPower::Default)?;
    let span = span_from(parser, start);

    expect_newline(parser)?;

    Ok(Stmt::Defer(DeferStmt { expression, span }))
}

pub fn parse_assert_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let condition = parse_expr(parser, BindingPower::Default)?;
    let span = span_from(parser, start);

    expect_newline(parser)?;

    Ok(Stmt::Assert(AssertStmt { condition, span }))
}

/// A bare `{ ... }` inside a body. The newline after `}` is optional.
pub fn parse_nested_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let block = parse_block(parser)?;

    if parser.current_token_kind() == TokenKind::Newline {
        parser.advance();
    }

    Ok(Stmt::Block(block))
}
