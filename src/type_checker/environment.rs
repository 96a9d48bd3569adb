use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::resolved::ResolvedType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Variable { ty: ResolvedType, is_mutable: bool },
    Function { ty: ResolvedType },
}

impl Symbol {
    pub fn get_type(&self) -> &ResolvedType {
        match self {
            Symbol::Variable { ty, .. } | Symbol::Function { ty } => ty,
        }
    }
}

/// One namespace in the scope chain.
#[derive(Debug)]
pub struct Environment {
    pub kind: ScopeKind,
    pub id: usize,
    symbols: HashMap<String, Symbol>,
    temporaries: HashMap<usize, ResolvedType>,
    /// Declared return types, set on function scopes only.
    pub returns: Option<Vec<ResolvedType>>,
}

impl Environment {
    pub fn new(kind: ScopeKind, id: usize) -> Self {
        Environment {
            kind,
            id,
            symbols: HashMap::new(),
            temporaries: HashMap::new(),
            returns: None,
        }
    }

    pub fn declare_variable(
        &mut self,
        variable_name: String,
        variable_type: ResolvedType,
        is_mutable: bool,
        current_position: Position,
    ) -> Result<(), Error> {
        if self.symbols.contains_key(&variable_name) {
            Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: variable_name,
                },
                current_position,
            ))
        } else {
            self.symbols.insert(
                variable_name,
                Symbol::Variable {
                    ty: variable_type,
                    is_mutable,
                },
            );
            Ok(())
        }
    }

    pub fn declare_function(
        &mut self,
        function_name: String,
        function_type: ResolvedType,
        current_position: Position,
    ) -> Result<(), Error> {
        if self.symbols.contains_key(&function_name) {
            Err(Error::new(
                ErrorImpl::FunctionAlreadyDeclared {
                    function: function_name,
                },
                current_position,
            ))
        } else {
            self.symbols
                .insert(function_name, Symbol::Function { ty: function_type });
            Ok(())
        }
    }

    pub fn declare_temporary(&mut self, id: usize, ty: ResolvedType) {
        self.temporaries.insert(id, ty);
    }

    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn get_temporary(&self, id: usize) -> Option<&ResolvedType> {
        self.temporaries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
