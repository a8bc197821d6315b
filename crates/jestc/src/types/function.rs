//! Function declarations
//!
//! A declaration is the signature calls are checked against. Generic
//! declarations additionally know which parameter positions mention each of
//! their generic parameters.

use super::{GenericParameter, Type};
use crate::common::InternalError;

/// Signature of a typed function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionDeclaration {
    Declared {
        name: String,
        param_names: Vec<String>,
        param_types: Vec<Type>,
        return_type: Type,
    },
    Generic {
        name: String,
        generic_parameters: Vec<GenericParameter>,
        param_names: Vec<String>,
        param_types: Vec<Type>,
        return_type: Type,
    },
}

impl FunctionDeclaration {
    /// Panics when names and types disagree in length
    pub fn declared(
        name: impl Into<String>,
        param_names: Vec<String>,
        param_types: Vec<Type>,
        return_type: Type,
    ) -> Self {
        let name = name.into();
        check_arity(&name, &param_names, &param_types);
        FunctionDeclaration::Declared {
            name,
            param_names,
            param_types,
            return_type,
        }
    }

    /// Panics when names and types disagree in length
    pub fn generic(
        name: impl Into<String>,
        generic_parameters: Vec<GenericParameter>,
        param_names: Vec<String>,
        param_types: Vec<Type>,
        return_type: Type,
    ) -> Self {
        let name = name.into();
        check_arity(&name, &param_names, &param_types);
        FunctionDeclaration::Generic {
            name,
            generic_parameters,
            param_names,
            param_types,
            return_type,
        }
    }

    /// Wrap a function type as a declaration with positional parameter names
    pub fn from_function_type(name: impl Into<String>, ty: &Type) -> Option<Self> {
        match ty {
            Type::FunctionType { params, ret } => Some(Self::declared(
                name,
                positional_names(params.len()),
                params.clone(),
                ret.as_ref().clone(),
            )),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FunctionDeclaration::Declared { name, .. }
            | FunctionDeclaration::Generic { name, .. } => name,
        }
    }

    pub fn param_names(&self) -> &[String] {
        match self {
            FunctionDeclaration::Declared { param_names, .. }
            | FunctionDeclaration::Generic { param_names, .. } => param_names,
        }
    }

    pub fn param_types(&self) -> &[Type] {
        match self {
            FunctionDeclaration::Declared { param_types, .. }
            | FunctionDeclaration::Generic { param_types, .. } => param_types,
        }
    }

    pub fn return_type(&self) -> &Type {
        match self {
            FunctionDeclaration::Declared { return_type, .. }
            | FunctionDeclaration::Generic { return_type, .. } => return_type,
        }
    }

    pub fn arity(&self) -> usize {
        self.param_types().len()
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, FunctionDeclaration::Generic { .. })
    }

    /// Declared generic parameters (empty for `Declared`)
    pub fn generic_parameters(&self) -> &[GenericParameter] {
        match self {
            FunctionDeclaration::Declared { .. } => &[],
            FunctionDeclaration::Generic {
                generic_parameters, ..
            } => generic_parameters,
        }
    }

    /// The declaration seen as a value
    pub fn function_type(&self) -> Type {
        Type::function(self.param_types().to_vec(), self.return_type().clone())
    }

    /// For each generic parameter, the parameter positions mentioning it.
    ///
    /// Follows declaration order; parameters no position mentions are left out.
    pub fn generic_type_indices(&self) -> Vec<(GenericParameter, Vec<usize>)> {
        self.generic_parameters()
            .iter()
            .filter_map(|param| {
                let needle = Type::GenericParameter(param.clone());
                let indices: Vec<usize> = self
                    .param_types()
                    .iter()
                    .enumerate()
                    .filter(|(_, ty)| ty.contains(&needle))
                    .map(|(index, _)| index)
                    .collect();
                (!indices.is_empty()).then(|| (param.clone(), indices))
            })
            .collect()
    }

    /// A copy whose generic parameters are fresh unknowns for one use at `site`.
    ///
    /// Inside the function's own body its parameters are ordinary rigid
    /// types; renaming keeps them apart from the unknowns of a recursive call.
    pub fn instantiate(&self, site: &str) -> Self {
        let FunctionDeclaration::Generic {
            name,
            generic_parameters,
            param_names,
            param_types,
            return_type,
        } = self
        else {
            return self.clone();
        };

        let fresh = |param: &GenericParameter| {
            generic_parameters
                .contains(param)
                .then(|| Type::GenericParameter(param.instance(site)))
        };

        FunctionDeclaration::Generic {
            name: name.clone(),
            generic_parameters: generic_parameters.iter().map(|param| param.instance(site)).collect(),
            param_names: param_names.clone(),
            param_types: param_types.iter().map(|ty| ty.substitute(&fresh)).collect(),
            return_type: return_type.substitute(&fresh),
        }
    }

    /// Does `param` belong to this declaration?
    pub fn owns(&self, param: &GenericParameter) -> bool {
        self.generic_parameters().contains(param)
    }
}

/// `"0"`, `"1"`, ... for parameters that have no source name
pub fn positional_names(count: usize) -> Vec<String> {
    (0..count).map(|i| i.to_string()).collect()
}

fn check_arity(name: &str, param_names: &[String], param_types: &[Type]) {
    if param_names.len() != param_types.len() {
        InternalError::MalformedDeclaration {
            name: name.to_string(),
            names: param_names.len(),
            types: param_types.len(),
        }
        .raise();
    }
}
