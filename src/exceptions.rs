//! Declaration-time errors and call-time conditions

use crate::symbols::Symbol;

/// A record declaration failed. No record type is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeclarationError {
    /// A dunder name was looked up, was not bound by the body, and the
    /// declaration machinery could not supply it either.
    #[error("name `{0}` is not defined")]
    NameNotFound(Symbol),
    #[error("class attribute `{0}` must be assigned some value")]
    UndeclaredAttribute(Symbol),
    #[error("`{0}` is a mode-toggle token and cannot be bound")]
    ReservedName(Symbol),
}

impl DeclarationError {
    pub fn name_not_found(name: Symbol) -> Self {
        Self::NameNotFound(name)
    }

    pub fn undeclared_attribute(name: Symbol) -> Self {
        Self::UndeclaredAttribute(name)
    }

    pub fn reserved_name(name: Symbol) -> Self {
        Self::ReservedName(name)
    }
}

/// Raised while calling procedures, constructing records or accessing them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Condition {
    #[error("Expected {expected} arguments, provided {provided}")]
    WrongNumberOfArgs { expected: usize, provided: usize },
    #[error("{callee}() missing required arguments: {}", fmt_names(.missing))]
    MissingArguments { callee: Symbol, missing: Vec<Symbol> },
    #[error("{callee}() got an unexpected keyword argument `{keyword}`")]
    UnexpectedKeyword { callee: Symbol, keyword: Symbol },
    #[error("{callee}() got multiple values for argument `{argument}`")]
    DuplicateArgument { callee: Symbol, argument: Symbol },
    #[error("`{type_name}` record has no attribute `{attribute}`")]
    AttributeNotFound { type_name: Symbol, attribute: Symbol },
    #[error("Expected value of type {expected}, provided {provided}")]
    InvalidType { expected: String, provided: String },
    #[error("Invalid operator, expected procedure, provided {0}")]
    NotCallable(String),
    #[error("{type_name}() accepts {accepted} positional sub-patterns ({provided} given)")]
    Destructure {
        type_name: Symbol,
        accepted: usize,
        provided: usize,
    },
}

impl Condition {
    pub fn wrong_num_of_args(expected: usize, provided: usize) -> Self {
        Self::WrongNumberOfArgs { expected, provided }
    }

    pub fn missing_arguments(callee: Symbol, missing: Vec<Symbol>) -> Self {
        Self::MissingArguments { callee, missing }
    }

    pub fn unexpected_keyword(callee: Symbol, keyword: Symbol) -> Self {
        Self::UnexpectedKeyword { callee, keyword }
    }

    pub fn duplicate_argument(callee: Symbol, argument: Symbol) -> Self {
        Self::DuplicateArgument { callee, argument }
    }

    pub fn attribute_not_found(type_name: Symbol, attribute: Symbol) -> Self {
        Self::AttributeNotFound {
            type_name,
            attribute,
        }
    }

    pub fn invalid_type(expected: &str, provided: &str) -> Self {
        Self::InvalidType {
            expected: expected.to_string(),
            provided: provided.to_string(),
        }
    }

    pub fn not_callable(provided: &str) -> Self {
        Self::NotCallable(provided.to_string())
    }

    pub fn destructure(type_name: Symbol, accepted: usize, provided: usize) -> Self {
        Self::Destructure {
            type_name,
            accepted,
            provided,
        }
    }
}

fn fmt_names(names: &[Symbol]) -> String {
    names
        .iter()
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
