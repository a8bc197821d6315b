//! Lexical scopes
//!
//! Each scope has three independent namespaces: variables, functions and
//! types. A child scope borrows its parent, so the chain lives on the call
//! stack of whoever is walking the tree and unwinds with it. Record layouts
//! are kept alongside the type a record introduces.

use crate::types::{FunctionDeclaration, RecordDeclaration, Type};
use std::collections::HashMap;

/// What a name in value position resolves to at its nearest level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueEntry<'s> {
    Variable(&'s Option<Type>),
    Function(&'s Option<FunctionDeclaration>),
}

/// One level of the scope chain
#[derive(Debug, Default)]
pub struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    /// `None` marks an untyped binding
    variables: HashMap<String, Option<Type>>,
    /// `None` marks an untyped function
    functions: HashMap<String, Option<FunctionDeclaration>>,
    types: HashMap<String, Type>,
    records: HashMap<String, RecordDeclaration>,
}

impl<'p> Scope<'p> {
    /// An empty scope with no parent
    pub fn root() -> Self {
        Self {
            parent: None,
            variables: HashMap::new(),
            functions: HashMap::new(),
            types: HashMap::new(),
            records: HashMap::new(),
        }
    }

    /// An empty scope nested in `parent`
    pub fn child(parent: &'p Scope<'p>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::root()
        }
    }

    pub fn parent(&self) -> Option<&'p Scope<'p>> {
        self.parent
    }

    /// Number of ancestors
    pub fn depth(&self) -> usize {
        self.parent.map_or(0, |parent| parent.depth() + 1)
    }

    // ==================== Declarations ====================

    pub fn add_variable(&mut self, name: impl Into<String>, ty: Option<Type>) {
        self.variables.insert(name.into(), ty);
    }

    pub fn add_function(&mut self, name: impl Into<String>, declaration: Option<FunctionDeclaration>) {
        self.functions.insert(name.into(), declaration);
    }

    pub fn add_type(&mut self, name: impl Into<String>, ty: Type) {
        self.types.insert(name.into(), ty);
    }

    /// Register a record's type and layout
    pub fn add_record(&mut self, record: RecordDeclaration) {
        self.types.insert(record.name.clone(), record.record_type());
        self.records.insert(record.name.clone(), record);
    }

    // ==================== Current level ====================

    pub fn is_variable_in_current_scope(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn is_function_in_current_scope(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn is_type_in_current_scope(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    // ==================== Whole chain ====================

    pub fn is_variable_in_scope(&self, name: &str) -> bool {
        self.variable_entry(name).is_some()
    }

    pub fn is_function_in_scope(&self, name: &str) -> bool {
        self.function_entry(name).is_some()
    }

    pub fn is_variable_or_function_in_scope(&self, name: &str) -> bool {
        self.value_entry(name).is_some()
    }

    /// Is `name` taken in either value namespace of this level?
    pub fn is_value_in_current_scope(&self, name: &str) -> bool {
        self.is_variable_in_current_scope(name) || self.is_function_in_current_scope(name)
    }

    /// Type of the nearest variable named `name`, if it is declared and typed
    pub fn variable_type(&self, name: &str) -> Option<&Type> {
        self.variable_entry(name).and_then(Option::as_ref)
    }

    /// Declaration of the nearest function named `name`, if declared and typed
    pub fn function_declaration(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.function_entry(name).and_then(Option::as_ref)
    }

    pub fn get_type(&self, name: &str) -> Option<&Type> {
        match self.types.get(name) {
            Some(ty) => Some(ty),
            None => self.parent.and_then(|parent| parent.get_type(name)),
        }
    }

    /// Layout of the record a type names, if that type is a visible record
    pub fn record(&self, ty: &Type) -> Option<&RecordDeclaration> {
        let Type::Simple(name) = ty else {
            return None;
        };
        self.record_named(name)
    }

    fn record_named(&self, name: &str) -> Option<&RecordDeclaration> {
        // A nearer type of the same name hides the record
        if self.types.contains_key(name) {
            return self.records.get(name);
        }
        self.parent.and_then(|parent| parent.record_named(name))
    }

    /// Nearest variable entry; the inner `Option` is its (possibly absent) type
    pub fn variable_entry(&self, name: &str) -> Option<&Option<Type>> {
        match self.variables.get(name) {
            Some(entry) => Some(entry),
            None => self.parent.and_then(|parent| parent.variable_entry(name)),
        }
    }

    /// Nearest binding of `name` in either value namespace. Levels are searched
    /// innermost first; within a level a variable is found before a function.
    pub fn value_entry(&self, name: &str) -> Option<ValueEntry<'_>> {
        if let Some(entry) = self.variables.get(name) {
            return Some(ValueEntry::Variable(entry));
        }
        if let Some(entry) = self.functions.get(name) {
            return Some(ValueEntry::Function(entry));
        }
        self.parent.and_then(|parent| parent.value_entry(name))
    }

    /// Nearest function entry; the inner `Option` is its (possibly absent) declaration
    pub fn function_entry(&self, name: &str) -> Option<&Option<FunctionDeclaration>> {
        match self.functions.get(name) {
            Some(entry) => Some(entry),
            None => self.parent.and_then(|parent| parent.function_entry(name)),
        }
    }
}
