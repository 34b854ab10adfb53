//! Declaring record types.
//!
//! A [`Declaration`] is a record type whose body is still executing. Each
//! statement runs against its [`Recorder`]; [`Declaration::finalize`] consumes
//! it, merges the captured fields with the parents' and installs the
//! synthesized members. A declaration whose body fails is simply dropped, so
//! no partially built type can escape.

use std::sync::Arc;

use crate::{
    body::{Body, Context, Expr, Statement},
    constructor,
    exceptions::DeclarationError,
    fields::FieldTable,
    records::RecordType,
    recorder::{Captured, Recorder},
    repr,
    symbols::Symbol,
    value::Value,
};

/// Whether a procedure or record type bound while collecting fields becomes a
/// field default or an ordinary member.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CallablePolicy {
    #[default]
    Member,
    Field,
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    pub callable_policy: CallablePolicy,
}

pub struct Declaration<'a> {
    name: Symbol,
    parents: Vec<Arc<RecordType>>,
    recorder: Recorder<'a>,
}

impl<'a> Declaration<'a> {
    pub fn new(name: &str, parents: &[Arc<RecordType>], context: Option<&'a Context>) -> Self {
        Self::with_options(name, parents, context, &Options::default())
    }

    pub fn with_options(
        name: &str,
        parents: &[Arc<RecordType>],
        context: Option<&'a Context>,
        options: &Options,
    ) -> Self {
        Self {
            name: Symbol::intern(name),
            parents: parents.to_vec(),
            recorder: Recorder::new(context, options.callable_policy),
        }
    }

    /// Runs one statement of the body. A failing statement consumes the
    /// declaration, so whatever it recorded so far can never be finalized.
    pub fn execute(mut self, stmt: &Statement) -> Result<Self, DeclarationError> {
        match stmt {
            Statement::Bind { name, expr } => {
                let value = self.evaluate(expr)?;
                self.recorder.bind(*name, value)?;
            }
            Statement::Reference(name) => {
                self.resolve(*name)?;
            }
        }
        Ok(self)
    }

    pub fn execute_body(self, body: &Body) -> Result<Self, DeclarationError> {
        body.statements()
            .iter()
            .try_fold(self, |decl, stmt| decl.execute(stmt))
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, DeclarationError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Name(name) => self.resolve(*name),
            Expr::List(items) => items
                .iter()
                .map(|item| self.evaluate(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::list),
        }
    }

    /// Special names the body did not bind itself are supplied here.
    fn resolve(&mut self, name: Symbol) -> Result<Value, DeclarationError> {
        match self.recorder.lookup(name) {
            Err(DeclarationError::NameNotFound(name)) => self
                .special(name)
                .ok_or(DeclarationError::name_not_found(name)),
            result => result,
        }
    }

    fn special(&self, name: Symbol) -> Option<Value> {
        if name == "__name__" {
            Some(Value::from(&*self.name.to_str()))
        } else if name == "__bases__" {
            Some(Value::list(self.parents.iter().cloned().map(Value::from)))
        } else {
            None
        }
    }

    pub fn finalize(self) -> Arc<RecordType> {
        let Captured {
            mut namespace,
            fields: local,
        } = self.recorder.finish();
        let fields = FieldTable::merge(self.parents.iter().map(|parent| parent.fields()), local);

        let init_name = Symbol::intern("__init__");
        if !fields.is_empty() && !namespace.contains_key(&init_name) {
            namespace.insert(init_name, Value::from(constructor::synthesize(self.name, &fields)));
        }
        let repr_name = Symbol::intern("__repr__");
        if !namespace.contains_key(&repr_name) {
            namespace.insert(repr_name, Value::from(repr::synthesize(self.name, &fields)));
        }

        let match_args: Arc<[Symbol]> = fields.names().collect();
        namespace.insert(
            Symbol::intern("__match_args__"),
            Value::list(match_args.iter().map(|name| Value::from(&*name.to_str()))),
        );

        tracing::debug!(record = %self.name, fields = ?match_args, "record type declared");
        Arc::new(RecordType::new(
            self.name,
            self.parents,
            fields,
            namespace,
            match_args,
        ))
    }
}

/// Declares a record type in one step.
pub fn declare(
    name: &str,
    parents: &[Arc<RecordType>],
    context: Option<&Context>,
    body: &Body,
) -> Result<Arc<RecordType>, DeclarationError> {
    declare_with(name, parents, context, body, &Options::default())
}

pub fn declare_with(
    name: &str,
    parents: &[Arc<RecordType>],
    context: Option<&Context>,
    body: &Body,
    options: &Options,
) -> Result<Arc<RecordType>, DeclarationError> {
    Ok(Declaration::with_options(name, parents, context, options)
        .execute_body(body)?
        .finalize())
}
