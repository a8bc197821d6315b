//! Record declarations

use super::{FunctionDeclaration, Type};

/// A record's name and typed fields, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDeclaration {
    pub name: String,
    pub fields: Vec<(String, Type)>,
}

impl RecordDeclaration {
    pub fn new(name: impl Into<String>, fields: Vec<(String, Type)>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// The type values of this record have
    pub fn record_type(&self) -> Type {
        Type::simple(self.name.clone())
    }

    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, ty)| ty)
    }

    /// `Name(field, ...) -> Name`
    pub fn constructor(&self) -> FunctionDeclaration {
        let (names, types) = self.fields.iter().cloned().unzip();
        FunctionDeclaration::declared(self.name.clone(), names, types, self.record_type())
    }
}
