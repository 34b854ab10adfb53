//! Native procedures and the arguments they are applied to.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{exceptions::Condition, symbols::Symbol, value::Value};

pub type PositionalFn = dyn Fn(&[Value]) -> Result<Value, Condition> + Send + Sync;

pub type KeywordFn = dyn Fn(Arguments) -> Result<Value, Condition> + Send + Sync;

#[derive(Clone)]
pub(crate) enum FuncPtr {
    /// Arity is checked before the function is entered; keywords are rejected.
    Positional {
        func: Arc<PositionalFn>,
        num_required_args: usize,
        variadic: bool,
    },
    /// The function binds its own arguments.
    Keywords(Arc<KeywordFn>),
}

#[derive(Clone, derive_more::Debug)]
pub struct Procedure {
    name: Symbol,
    #[debug(skip)]
    pub(crate) func: FuncPtr,
}

impl Procedure {
    pub fn new(
        name: &str,
        num_required_args: usize,
        variadic: bool,
        func: impl Fn(&[Value]) -> Result<Value, Condition> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Symbol::intern(name),
            func: FuncPtr::Positional {
                func: Arc::new(func),
                num_required_args,
                variadic,
            },
        }
    }

    pub fn with_keywords(
        name: &str,
        func: impl Fn(Arguments) -> Result<Value, Condition> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Symbol::intern(name),
            func: FuncPtr::Keywords(Arc::new(func)),
        }
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn call(&self, args: Arguments) -> Result<Value, Condition> {
        match &self.func {
            FuncPtr::Keywords(func) => func(args),
            FuncPtr::Positional {
                func,
                num_required_args,
                variadic,
            } => {
                if let Some(keyword) = args.keywords.keys().next() {
                    return Err(Condition::unexpected_keyword(self.name, *keyword));
                }
                let provided = args.positional.len();
                // Error if the number of arguments provided is incorrect
                if provided < *num_required_args || (!variadic && provided > *num_required_args)
                {
                    return Err(Condition::wrong_num_of_args(*num_required_args, provided));
                }
                func(&args.positional)
            }
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.func, &other.func) {
            (FuncPtr::Positional { func: a, .. }, FuncPtr::Positional { func: b, .. }) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (FuncPtr::Keywords(a), FuncPtr::Keywords(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

/// Positional arguments followed by keyword arguments, in call order.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    pub(crate) positional: Vec<Value>,
    pub(crate) keywords: IndexMap<Symbol, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a keyword argument. Passing the same keyword twice keeps the last
    /// value.
    pub fn kwarg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.keywords.insert(Symbol::intern(name), value.into());
        self
    }

    /// Prepends the receiver of a method call.
    pub fn with_receiver(mut self, receiver: Value) -> Self {
        self.positional.insert(0, receiver);
        self
    }

    pub fn into_parts(self) -> (Vec<Value>, IndexMap<Symbol, Value>) {
        (self.positional, self.keywords)
    }
}
