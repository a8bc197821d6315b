//! The prelude every program starts from

use super::Scope;
use crate::types::{FunctionDeclaration, Type};

/// Primitive types
pub const PRIMITIVE_TYPES: &[&str] = &["Any", "Number", "String", "Symbol", "Boolean", "Nil"];

/// Host collection types; usable bare or applied (`Vector<Number>`)
pub const COLLECTION_TYPES: &[&str] = &["Vector", "Map", "List"];

/// Core library functions known by name only
pub const UNTYPED_CORE_FUNCTIONS: &[&str] = &[
    "apply", "assoc", "assoc_in", "atom", "boolean", "butlast", "char", "comp", "compare",
    "complement", "concat", "conj", "cons", "constantly", "contains?", "count", "cycle", "dec",
    "deref", "disj", "dissoc", "distinct", "distinct?", "drop", "drop_while", "empty", "empty?",
    "even?", "every?", "false?", "ffirst", "filter", "filterv", "find", "first", "flatten",
    "float", "fnil", "format", "frequencies", "get", "get_in", "group_by", "hash", "hash_map",
    "hash_set", "identity", "inc", "int", "interleave", "interpose", "into", "iterate", "juxt",
    "keep", "key", "keys", "keyword", "keyword?", "last", "list", "list?", "long", "map",
    "map?", "mapcat", "mapv", "max", "memoize", "merge", "min", "mod", "name", "neg?", "next",
    "nil?", "not", "nth", "number?", "odd?", "partial", "partition", "peek", "pop", "pos?",
    "pr", "print", "println", "prn", "quot", "rand", "rand_int", "reduce", "rem", "remove",
    "repeat", "reset!", "rest", "reverse", "second", "seq", "seq?", "set", "set?", "some",
    "some?", "sort", "sort_by", "split_at", "str", "string?", "subs", "subvec", "swap!",
    "symbol", "symbol?", "take", "take_while", "true?", "update", "update_in", "val", "vals",
    "vec", "vector", "vector?", "zero?", "zipmap",
];

/// Seed a root scope with the prelude
pub fn install(scope: &mut Scope<'_>) {
    for name in PRIMITIVE_TYPES.iter().chain(COLLECTION_TYPES) {
        scope.add_type(*name, Type::simple(*name));
    }

    scope.add_function("range", Some(range_declaration()));

    for name in UNTYPED_CORE_FUNCTIONS {
        scope.add_function(*name, None);
    }
}

/// `range(start: Number, stop: Number, step: Number) -> List<Number>`
fn range_declaration() -> FunctionDeclaration {
    FunctionDeclaration::declared(
        "range",
        vec!["start".to_string(), "stop".to_string(), "step".to_string()],
        vec![Type::number(), Type::number(), Type::number()],
        Type::generic("List", vec![Type::number()]),
    )
}

/// A root scope holding only the prelude
pub fn prelude() -> Scope<'static> {
    let mut scope = Scope::root();
    install(&mut scope);
    scope
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_types() {
        let scope = prelude();
        for name in ["Number", "String", "Symbol", "Boolean", "Nil", "Vector", "Map", "List"] {
            assert_eq!(scope.get_type(name), Some(&Type::simple(name)));
        }
    }

    #[test]
    fn test_range_is_typed() {
        let scope = prelude();
        let range = scope.function_declaration("range").unwrap();
        assert_eq!(range.arity(), 3);
        assert_eq!(range.return_type().to_string(), "List<Number>");
    }

    #[test]
    fn test_core_functions_are_untyped() {
        let scope = prelude();
        assert!(scope.is_function_in_scope("println"));
        assert!(scope.function_declaration("println").is_none());
        assert!(scope.is_function_in_scope("nil?"));
    }
}
