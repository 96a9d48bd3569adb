use std::collections::HashMap;

use crate::{
    ast::{
        ast::Module,
        expressions::{BinaryExpr, Expr, ExprWrapper, OperatorCategory},
        statements::{BlockStmt, FnDeclStmt, Item, Stmt},
        types::TypeDecl,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    environment::{Environment, ScopeKind, Symbol},
    resolved::ResolvedType,
};

/// Per-run resolution state: declared types and the live scope chain.
#[derive(Debug)]
pub struct TypeChecker {
    /// Declared structs and their fields in source order.
    pub structs: HashMap<String, Vec<(String, ResolvedType)>>,
    /// Declared enums and their members.
    pub enums: HashMap<String, Vec<String>>,
    /// Scope chain; the first entry is the module scope.
    pub environments: Vec<Environment>,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            structs: HashMap::new(),
            enums: HashMap::new(),
            environments: vec![Environment::new(ScopeKind::Module, 0)],
        }
    }

    pub fn push_environment(&mut self, environment: Environment) {
        tracing::trace!(kind = ?environment.kind, id = environment.id, depth = self.environments.len(), "push scope");
        self.environments.push(environment);
    }

    pub fn pop_environment(&mut self) -> Option<Environment> {
        // The module scope stays for the lifetime of the checker
        if self.environments.len() <= 1 {
            return None;
        }
        let environment = self.environments.pop();
        if let Some(environment) = &environment {
            tracing::trace!(kind = ?environment.kind, id = environment.id, symbols = environment.len(), "pop scope");
        }
        environment
    }

    pub fn get_current_environment(&mut self) -> &mut Environment {
        let last = self.environments.len() - 1;
        &mut self.environments[last]
    }

    pub fn get_module_environment(&self) -> &Environment {
        &self.environments[0]
    }

    /// Innermost to outermost; the first match wins.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_symbol(name))
    }

    fn lookup_temporary(&self, id: usize) -> Option<&ResolvedType> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_temporary(id))
    }

    /// Return types of the innermost enclosing function.
    fn current_returns(&self) -> Vec<ResolvedType> {
        self.environments
            .iter()
            .rev()
            .find(|environment| environment.kind == ScopeKind::Function)
            .and_then(|environment| environment.returns.clone())
            .unwrap_or_default()
    }

    /// Resolves a written type: primitives first, then structs, then enums.
    pub fn convert_type(&self, ty: &TypeDecl) -> Result<ResolvedType, Error> {
        match ty {
            TypeDecl::Base(symbol) => {
                if let Some(primitive) = ResolvedType::primitive(&symbol.name) {
                    Ok(primitive)
                } else if self.structs.contains_key(&symbol.name) {
                    Ok(ResolvedType::Struct {
                        name: symbol.name.clone(),
                    })
                } else if self.enums.contains_key(&symbol.name) {
                    Ok(ResolvedType::Enum {
                        name: symbol.name.clone(),
                    })
                } else {
                    Err(Error::new(
                        ErrorImpl::UnknownType {
                            type_: symbol.name.clone(),
                        },
                        symbol.position.clone(),
                    ))
                }
            }
            TypeDecl::Array(array) => Ok(ResolvedType::array(self.convert_type(&array.underlying)?)),
            TypeDecl::Reference(reference) => {
                Ok(ResolvedType::reference(self.convert_type(&reference.referent)?))
            }
            TypeDecl::Map(map) => Ok(ResolvedType::map(
                self.convert_type(&map.key)?,
                self.convert_type(&map.value)?,
            )),
        }
    }

    /// Fills the struct and enum tables and seeds the module scope with every
    /// function signature, before any body is looked at.
    pub fn declare_items(&mut self, items: &[Item]) -> Result<(), Error> {
        for item in items {
            match item {
                Item::StructDecl(decl) => {
                    self.declare_type_name(&decl.name, &decl.span.start)?;
                    self.structs.insert(decl.name.clone(), vec![]);
                }
                Item::EnumDecl(decl) => {
                    self.declare_type_name(&decl.name, &decl.span.start)?;
                    self.enums.insert(decl.name.clone(), decl.members.clone());
                }
                _ => {}
            }
        }

        for item in items {
            if let Item::StructDecl(decl) = item {
                let mut fields = Vec::with_capacity(decl.fields.len());
                for field in decl.fields.iter() {
                    fields.push((field.name.clone(), self.convert_type(&field.ty)?));
                }
                self.structs.insert(decl.name.clone(), fields);
            }
        }

        for item in items {
            if let Item::FnDecl(decl) = item {
                let signature = self.function_type(decl)?;
                self.environments[0].declare_function(
                    decl.identifier.clone(),
                    signature,
                    decl.span.start.clone(),
                )?;
            }
        }

        Ok(())
    }

    fn declare_type_name(&self, name: &str, position: &Position) -> Result<(), Error> {
        if self.structs.contains_key(name) || self.enums.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: name.to_string(),
                },
                position.clone(),
            ));
        }
        Ok(())
    }

    pub fn function_type(&self, decl: &FnDeclStmt) -> Result<ResolvedType, Error> {
        let params = decl
            .parameters
            .iter()
            .map(|param| self.convert_type(&param.ty))
            .collect::<Result<Vec<_>, _>>()?;
        let returns = decl
            .return_types
            .iter()
            .map(|ty| self.convert_type(ty))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedType::Function { params, returns })
    }

    /// Field lookup through embedded fields, depth first.
    fn find_field(
        &self,
        struct_name: &str,
        member: &str,
        visited: &mut Vec<String>,
    ) -> Option<ResolvedType> {
        if visited.iter().any(|name| name == struct_name) {
            return None;
        }
        visited.push(struct_name.to_string());

        let fields = self.structs.get(struct_name)?;
        for (name, ty) in fields {
            if name == member {
                return Some(ty.clone());
            }

            if name.is_empty() {
                if let ResolvedType::Struct { name: inner } = ty.dereferenced() {
                    // An embedded field is reachable under its type name
                    if inner == member {
                        return Some(ty.clone());
                    }
                    if let Some(found) = self.find_field(inner, member, visited) {
                        return Some(found);
                    }
                }
            }
        }

        None
    }

    pub fn check_fn(&mut self, decl: &mut FnDeclStmt) -> Result<(), Error> {
        tracing::debug!(function = %decl.identifier, "checking function");

        let mut environment = Environment::new(ScopeKind::Function, decl.body.id);
        for param in decl.parameters.iter() {
            let ty = self.convert_type(&param.ty)?;
            environment.declare_variable(
                param.name.clone(),
                ty,
                param.is_mutable,
                param.span.start.clone(),
            )?;
        }
        environment.returns = Some(
            decl.return_types
                .iter()
                .map(|ty| self.convert_type(ty))
                .collect::<Result<Vec<_>, _>>()?,
        );

        self.push_environment(environment);
        let result = self.check_block(&mut decl.body, vec![]);
        self.pop_environment();

        result
    }

    /// Checks `block` in a fresh child scope pre-seeded with `bindings`.
    pub fn check_block(
        &mut self,
        block: &mut BlockStmt,
        bindings: Vec<(String, ResolvedType)>,
    ) -> Result<(), Error> {
        let mut environment = Environment::new(ScopeKind::Block, block.id);
        for (name, ty) in bindings {
            environment.declare_variable(name, ty, false, block.span.start.clone())?;
        }

        self.push_environment(environment);
        let result = block
            .iter_mut()
            .try_for_each(|stmt| self.check_stmt(stmt));
        self.pop_environment();

        result
    }

    fn expect_boolean(
        &mut self,
        condition: &mut ExprWrapper,
        keyword: &str,
    ) -> Result<(), Error> {
        let ty = self.check_expr(condition)?;
        if !ty.is_boolean() {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    operator: keyword.to_string(),
                    expected: ResolvedType::Boolean.to_string(),
                    received: ty.to_string(),
                },
                condition.span.start.clone(),
            ));
        }
        Ok(())
    }

    pub fn check_stmt(&mut self, stmt: &mut Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::VarDecl(decl) => {
                let ty = self.check_expr(&mut decl.value)?;
                let position = decl.span.start.clone();
                self.get_current_environment().declare_variable(
                    decl.identifier.clone(),
                    ty,
                    decl.is_mutable,
                    position,
                )
            }
            Stmt::Expression(expression) => self.check_expr(&mut expression.expression).map(|_| ()),
            Stmt::If(if_stmt) => {
                self.expect_boolean(&mut if_stmt.condition, "if")?;
                self.check_block(&mut if_stmt.then_body, vec![])?;
                if let Some(else_body) = &mut if_stmt.else_body {
                    self.check_block(else_body, vec![])?;
                }
                Ok(())
            }
            Stmt::Forever(forever) => self.check_block(&mut forever.body, vec![]),
            Stmt::ForEach(for_each) => {
                let iterable = self.check_expr(&mut for_each.iterable)?;
                let element = match iterable.dereferenced() {
                    ResolvedType::Array(element) => (**element).clone(),
                    ResolvedType::Map { value, .. } => (**value).clone(),
                    other => {
                        return Err(Error::new(
                            ErrorImpl::NotIterable {
                                type_: other.to_string(),
                            },
                            for_each.iterable.span.start.clone(),
                        ))
                    }
                };

                let bindings = vec![(for_each.binding.clone(), element)];
                self.check_block(&mut for_each.body, bindings)
            }
            Stmt::ForEachPair(for_each) => {
                let iterable = self.check_expr(&mut for_each.iterable)?;
                let (first, second) = match iterable.dereferenced() {
                    ResolvedType::Array(element) => (ResolvedType::int(32, true), (**element).clone()),
                    ResolvedType::Map { key, value } => ((**key).clone(), (**value).clone()),
                    other => {
                        return Err(Error::new(
                            ErrorImpl::NotIterable {
                                type_: other.to_string(),
                            },
                            for_each.iterable.span.start.clone(),
                        ))
                    }
                };

                let bindings = vec![
                    (for_each.first.clone(), first),
                    (for_each.second.clone(), second),
                ];
                self.check_block(&mut for_each.body, bindings)
            }
            Stmt::Return(return_stmt) => {
                let expected = self.current_returns();
                if expected.len() != return_stmt.values.len() {
                    return Err(Error::new(
                        ErrorImpl::ReturnCountMismatch {
                            expected: expected.len(),
                            received: return_stmt.values.len(),
                        },
                        return_stmt.span.start.clone(),
                    ));
                }

                for (value, expected) in return_stmt.values.iter_mut().zip(expected.iter()) {
                    let received = self.check_expr(value)?;
                    if &received != expected {
                        return Err(Error::new(
                            ErrorImpl::TypeMatchError {
                                operator: String::from("return"),
                                expected: expected.to_string(),
                                received: received.to_string(),
                            },
                            value.span.start.clone(),
                        ));
                    }
                }
                Ok(())
            }
            Stmt::Assign(assign) => {
                let assignee = self.check_expr(&mut assign.assignee)?;
                let value = self.check_expr(&mut assign.value)?;
                if assignee != value {
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            operator: String::from("="),
                            expected: assignee.to_string(),
                            received: value.to_string(),
                        },
                        assign.value.span.start.clone(),
                    ));
                }
                Ok(())
            }
            Stmt::CompoundAssign(compound) => {
                let target = self.check_expr(&mut compound.temp.target)?;
                self.get_current_environment()
                    .declare_temporary(compound.temp.id, target.clone());

                self.check_expr(&mut compound.assignment.assignee)?;
                let value = self.check_expr(&mut compound.assignment.value)?;
                if value != target {
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            operator: format!("{}=", compound.operator),
                            expected: target.to_string(),
                            received: value.to_string(),
                        },
                        compound.span.start.clone(),
                    ));
                }
                Ok(())
            }
            Stmt::Break(_) | Stmt::Continue(_) => Ok(()),
            Stmt::Defer(defer) => self.check_expr(&mut defer.expression).map(|_| ()),
            Stmt::Assert(assert) => self.expect_boolean(&mut assert.condition, "assert"),
            Stmt::Block(block) => self.check_block(block, vec![]),
        }
    }

    /// Resolves `expr`, stores the result in its type slot and returns it.
    pub fn check_expr(&mut self, expr: &mut ExprWrapper) -> Result<ResolvedType, Error> {
        let position = expr.span.start.clone();

        let ty = match &mut expr.expr {
            Expr::Number(number) => match ResolvedType::for_literal(number.value) {
                Some(ty) => ty,
                None => {
                    return Err(Error::new(
                        ErrorImpl::LiteralWidthUndefined {
                            literal: number.value,
                        },
                        position,
                    ))
                }
            },
            Expr::Boolean(_) => ResolvedType::Boolean,
            Expr::String(_) => {
                return Err(Error::new(
                    ErrorImpl::NotImplementedError {
                        feature: String::from("String literals"),
                    },
                    position,
                ))
            }
            Expr::Char(_) => {
                return Err(Error::new(
                    ErrorImpl::NotImplementedError {
                        feature: String::from("Char literals"),
                    },
                    position,
                ))
            }
            Expr::Symbol(symbol) => match self.lookup(&symbol.value) {
                Some(found) => found.get_type().clone(),
                None => {
                    return Err(Error::new(
                        ErrorImpl::VariableNotDeclared {
                            variable: symbol.value.clone(),
                        },
                        position,
                    ))
                }
            },
            Expr::Binary(binary) => self.check_binary(binary, position)?,
            Expr::Index(index) => {
                let base = self.check_expr(&mut index.base)?;
                let key = self.check_expr(&mut index.index)?;

                match base.dereferenced() {
                    ResolvedType::Array(element) => {
                        if !key.is_integer() {
                            return Err(Error::new(
                                ErrorImpl::InvalidOperandType {
                                    operator: String::from("[]"),
                                    type_: key.to_string(),
                                },
                                index.index.span.start.clone(),
                            ));
                        }
                        (**element).clone()
                    }
                    ResolvedType::Map { key: expected, value } => {
                        if **expected != key {
                            return Err(Error::new(
                                ErrorImpl::TypeMatchError {
                                    operator: String::from("[]"),
                                    expected: expected.to_string(),
                                    received: key.to_string(),
                                },
                                index.index.span.start.clone(),
                            ));
                        }
                        (**value).clone()
                    }
                    other => {
                        return Err(Error::new(
                            ErrorImpl::NotIndexable {
                                type_: other.to_string(),
                            },
                            position,
                        ))
                    }
                }
            }
            Expr::Call(call) => {
                let callee = self.check_expr(&mut call.callee)?;
                let (params, returns) = match callee {
                    ResolvedType::Function { params, returns } => (params, returns),
                    other => {
                        return Err(Error::new(
                            ErrorImpl::NotCallable {
                                type_: other.to_string(),
                            },
                            position,
                        ))
                    }
                };

                if call.arguments.len() > params.len() {
                    return Err(Error::new(
                        ErrorImpl::UnexpectedArguments {
                            expected: params.len(),
                            received: call.arguments.len(),
                        },
                        call.arguments[params.len()].span.start.clone(),
                    ));
                } else if call.arguments.len() < params.len() {
                    return Err(Error::new(
                        ErrorImpl::MissingArguments {
                            expected: params.len(),
                            received: call.arguments.len(),
                        },
                        expr.span.end.clone(),
                    ));
                }

                for (argument, param) in call.arguments.iter_mut().zip(params.iter()) {
                    let received = self.check_expr(argument)?;
                    if &received != param {
                        return Err(Error::new(
                            ErrorImpl::ArgumentTypeMatchError {
                                expected: param.to_string(),
                                received: received.to_string(),
                            },
                            argument.span.start.clone(),
                        ));
                    }
                }

                if returns.len() == 1 {
                    returns[0].clone()
                } else {
                    ResolvedType::Tuple(returns)
                }
            }
            Expr::Member(member) => {
                // A bare enum name is only a member base, never a value
                let enum_name = member
                    .base
                    .as_symbol()
                    .filter(|name| self.lookup(name).is_none() && self.enums.contains_key(*name))
                    .map(str::to_string);

                let base = match enum_name {
                    Some(name) => {
                        let ty = ResolvedType::Enum { name };
                        member.base.resolved_type = Some(ty.clone());
                        ty
                    }
                    None => self.check_expr(&mut member.base)?,
                };

                let found = match base.dereferenced() {
                    ResolvedType::Struct { name } => {
                        self.find_field(name, &member.member, &mut vec![])
                    }
                    ResolvedType::Enum { name } => self
                        .enums
                        .get(name)
                        .filter(|members| members.contains(&member.member))
                        .map(|_| ResolvedType::Enum { name: name.clone() }),
                    _ => None,
                };

                match found {
                    Some(ty) => ty,
                    None => {
                        return Err(Error::new(
                            ErrorImpl::UnknownMember {
                                type_: base.to_string(),
                                member: member.member.clone(),
                            },
                            position,
                        ))
                    }
                }
            }
            Expr::In(in_expr) => {
                let item = self.check_expr(&mut in_expr.item)?;
                let collection = self.check_expr(&mut in_expr.collection)?;

                let expected = match collection.dereferenced() {
                    ResolvedType::Array(element) => (**element).clone(),
                    ResolvedType::Map { key, .. } => (**key).clone(),
                    other => {
                        return Err(Error::new(
                            ErrorImpl::NotIterable {
                                type_: other.to_string(),
                            },
                            in_expr.collection.span.start.clone(),
                        ))
                    }
                };

                if item != expected {
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            operator: String::from("in"),
                            expected: expected.to_string(),
                            received: item.to_string(),
                        },
                        position,
                    ));
                }
                ResolvedType::Boolean
            }
            Expr::Array(array) => {
                let mut element: Option<ResolvedType> = None;
                for value in array.elements.iter_mut() {
                    let ty = self.check_expr(value)?;
                    match &element {
                        None => element = Some(ty),
                        Some(first) if *first != ty => {
                            return Err(Error::new(
                                ErrorImpl::TypeMatchError {
                                    operator: String::from("[]"),
                                    expected: first.to_string(),
                                    received: ty.to_string(),
                                },
                                value.span.start.clone(),
                            ))
                        }
                        Some(_) => {}
                    }
                }

                match element {
                    Some(element) => ResolvedType::array(element),
                    None => {
                        return Err(Error::new(
                            ErrorImpl::UninferableType {
                                what: String::from("an empty array literal"),
                            },
                            position,
                        ))
                    }
                }
            }
            Expr::Temp(temp) => match self.lookup_temporary(temp.id) {
                Some(ty) => ty.clone(),
                None => {
                    return Err(Error::new(
                        ErrorImpl::VariableNotDeclared {
                            variable: format!("temporary {}", temp.id),
                        },
                        position,
                    ))
                }
            },
        };

        expr.resolved_type = Some(ty.clone());
        Ok(ty)
    }

    fn check_binary(
        &mut self,
        binary: &mut BinaryExpr,
        position: Position,
    ) -> Result<ResolvedType, Error> {
        let left = self.check_expr(&mut binary.left)?;
        let right = self.check_expr(&mut binary.right)?;
        let operator = binary.operator.symbol().to_string();

        if left != right {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    operator,
                    expected: left.to_string(),
                    received: right.to_string(),
                },
                position,
            ));
        }

        let category = binary.operator.category();
        let allowed = match category {
            OperatorCategory::Arithmetic | OperatorCategory::Bitwise | OperatorCategory::Shift => {
                left.is_integer()
            }
            OperatorCategory::Logical => left.is_boolean(),
            OperatorCategory::Equality | OperatorCategory::Relational => {
                left.is_integer() || left.is_boolean()
            }
        };

        if !allowed {
            return Err(Error::new(
                ErrorImpl::InvalidOperandType {
                    operator,
                    type_: left.to_string(),
                },
                position,
            ));
        }

        match category {
            OperatorCategory::Equality | OperatorCategory::Relational => Ok(ResolvedType::Boolean),
            _ => Ok(left),
        }
    }
}

/// Resolves every expression in `module` in place.
///
/// Returns the checker so callers can inspect the module scope and the
/// declared types. The first failure aborts the run.
pub fn type_check(module: &mut Module) -> Result<TypeChecker, Error> {
    tracing::debug!(items = module.items.len(), "type checking");

    let mut type_checker = TypeChecker::new();
    type_checker.declare_items(&module.items)?;

    for item in module.items.iter_mut() {
        if let Item::FnDecl(decl) = item {
            type_checker.check_fn(decl)?;
        }
    }

    tracing::debug!(
        functions = type_checker.get_module_environment().len(),
        structs = type_checker.structs.len(),
        enums = type_checker.enums.len(),
        "type checking finished"
    );
    Ok(type_checker)
}
