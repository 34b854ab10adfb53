//! Record bodies: the statements a declaration executes, and the context it
//! falls back on.

use indexmap::IndexMap;

use crate::{
    markers::{ATTRS, FIELDS},
    proc::Procedure,
    symbols::Symbol,
    value::Value,
};

#[derive(Clone, Debug, derive_more::From)]
pub enum Expr {
    Literal(Value),
    /// Resolved against the body being declared, then the declaration context.
    Name(Symbol),
    List(Vec<Expr>),
}

impl Expr {
    pub fn name(name: &str) -> Self {
        Self::Name(Symbol::intern(name))
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }
}

#[derive(Clone, Debug)]
pub enum Statement {
    /// `name = expr`
    Bind { name: Symbol, expr: Expr },
    /// A name on its own: declares a required field, or toggles the mode.
    Reference(Symbol),
}

/// An ordered list of statements making up a record body.
///
/// ```
/// use autorecord::body::Body;
///
/// let body = Body::new()
///     .name("x")
///     .assign("y", 0)
///     .attrs()
///     .assign("ORIGIN_LABEL", "origin");
/// assert_eq!(body.statements().len(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Body {
    statements: Vec<Statement>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(self, name: &str) -> Self {
        self.push(Statement::Reference(Symbol::intern(name)))
    }

    pub fn assign(self, name: &str, value: impl Into<Value>) -> Self {
        self.assign_expr(name, Expr::Literal(value.into()))
    }

    pub fn assign_expr(self, name: &str, expr: impl Into<Expr>) -> Self {
        self.push(Statement::Bind {
            name: Symbol::intern(name),
            expr: expr.into(),
        })
    }

    /// Binds a procedure. Outside of the member-defining mode this still
    /// follows the declaration's callable policy.
    pub fn def(self, name: &str, proc: Procedure) -> Self {
        self.assign(name, proc)
    }

    /// Stop collecting fields.
    pub fn attrs(self) -> Self {
        self.name(ATTRS)
    }

    /// Resume collecting fields.
    pub fn fields(self) -> Self {
        self.name(FIELDS)
    }

    fn push(mut self, stmt: Statement) -> Self {
        self.statements.push(stmt);
        self
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// Read-only names a declaration may refer to without binding them itself.
#[derive(Clone, Debug, Default)]
pub struct Context {
    bindings: IndexMap<Symbol, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.bindings.insert(Symbol::intern(name), value.into());
        self
    }

    pub fn get(&self, name: Symbol) -> Option<&Value> {
        self.bindings.get(&name)
    }
}

impl<'a> FromIterator<(&'a str, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (&'a str, Value)>>(iter: I) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(name, value)| (Symbol::intern(name), value))
                .collect(),
        }
    }
}
