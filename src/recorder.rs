//! The namespace a record body executes against.
//!
//! Every binding passes through [`Recorder::bind`], which decides whether it
//! declares a field; every read passes through [`Recorder::lookup`], which
//! decides what an unbound name means.

use indexmap::IndexMap;

use crate::{
    body::Context,
    declare::CallablePolicy,
    exceptions::DeclarationError,
    markers::{self, Mode},
    symbols::Symbol,
    value::Value,
};

pub struct Recorder<'a> {
    namespace: IndexMap<Symbol, Value>,
    /// Treated as an ordered set with defaults; re-binding a field keeps its
    /// first position.
    fields: IndexMap<Symbol, Value>,
    context: Option<&'a Context>,
    mode: Mode,
    policy: CallablePolicy,
}

/// What a record body left behind once it finished executing.
#[derive(Debug, Default)]
pub struct Captured {
    pub namespace: IndexMap<Symbol, Value>,
    pub fields: IndexMap<Symbol, Value>,
}

impl<'a> Recorder<'a> {
    pub fn new(context: Option<&'a Context>, policy: CallablePolicy) -> Self {
        Self {
            namespace: IndexMap::new(),
            fields: IndexMap::new(),
            context,
            mode: Mode::default(),
            policy,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn bind(&mut self, name: Symbol, value: Value) -> Result<(), DeclarationError> {
        if markers::is_marker(name) {
            return Err(DeclarationError::reserved_name(name));
        }
        if self.captures(name, &value) {
            self.fields.insert(name, value.clone());
        }
        self.namespace.insert(name, value);
        Ok(())
    }

    fn captures(&self, name: Symbol, value: &Value) -> bool {
        self.mode == Mode::CollectingFields
            && !name.is_dunder()
            && (self.policy == CallablePolicy::Field || !value.is_callable())
    }

    pub fn lookup(&mut self, name: Symbol) -> Result<Value, DeclarationError> {
        match self.namespace.get(&name) {
            Some(value) => Ok(value.clone()),
            None => self.missing(name),
        }
    }

    fn missing(&mut self, name: Symbol) -> Result<Value, DeclarationError> {
        if let Some(mode) = Mode::from_marker(name) {
            tracing::trace!(marker = %name, ?mode, "record body mode switched");
            self.mode = mode;
            Ok(Value::Unspecified)
        } else if name.is_dunder() {
            Err(DeclarationError::name_not_found(name))
        } else if let Some(value) = self.context.and_then(|ctx| ctx.get(name)) {
            Ok(value.clone())
        } else if self.mode == Mode::CollectingFields {
            self.bind(name, Value::NoDefault)?;
            Ok(Value::NoDefault)
        } else {
            Err(DeclarationError::undeclared_attribute(name))
        }
    }

    pub fn finish(self) -> Captured {
        Captured {
            namespace: self.namespace,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proc::Procedure;

    fn sym(s: &str) -> Symbol {
        Symbol::intern(s)
    }

    fn noop() -> Value {
        Value::from(Procedure::new("noop", 1, false, |_| Ok(Value::Null)))
    }

    #[test]
    fn unbound_name_declares_required_field() {
        let mut rec = Recorder::new(None, CallablePolicy::Member);
        assert_eq!(rec.lookup(sym("x")).unwrap(), Value::NoDefault);
        // A second reference sees the local binding and records nothing new.
        assert_eq!(rec.lookup(sym("x")).unwrap(), Value::NoDefault);
        let captured = rec.finish();
        assert_eq!(captured.fields.len(), 1);
        assert_eq!(captured.fields[&sym("x")], Value::NoDefault);
    }

    #[test]
    fn rebinding_keeps_first_position() {
        let mut rec = Recorder::new(None, CallablePolicy::Member);
        rec.lookup(sym("a")).unwrap();
        rec.bind(sym("b"), Value::from(1)).unwrap();
        rec.bind(sym("a"), Value::from(5)).unwrap();
        let captured = rec.finish();
        let names: Vec<_> = captured.fields.keys().copied().collect();
        assert_eq!(names, vec![sym("a"), sym("b")]);
        assert_eq!(captured.fields[&sym("a")], Value::from(5));
    }

    #[test]
    fn dunder_and_callable_bindings_are_members() {
        let mut rec = Recorder::new(None, CallablePolicy::Member);
        rec.bind(sym("__doc__"), Value::from("docs")).unwrap();
        rec.bind(sym("area"), noop()).unwrap();
        let captured = rec.finish();
        assert!(captured.fields.is_empty());
        assert!(captured.namespace.contains_key(&sym("__doc__")));
        assert!(captured.namespace.contains_key(&sym("area")));
    }

    #[test]
    fn field_policy_captures_callables() {
        let mut rec = Recorder::new(None, CallablePolicy::Field);
        rec.bind(sym("callback"), noop()).unwrap();
        let captured = rec.finish();
        assert!(captured.fields.contains_key(&sym("callback")));
    }

    #[test]
    fn markers_switch_mode() {
        let mut rec = Recorder::new(None, CallablePolicy::Member);
        assert_eq!(rec.lookup(sym(markers::ATTRS)).unwrap(), Value::Unspecified);
        assert_eq!(rec.mode(), Mode::DefiningMembers);
        rec.bind(sym("limit"), Value::from(3)).unwrap();
        rec.lookup(sym(markers::FIELDS)).unwrap();
        assert_eq!(rec.mode(), Mode::CollectingFields);
        let captured = rec.finish();
        assert!(captured.fields.is_empty());
        assert!(!captured.namespace.contains_key(&sym(markers::ATTRS)));
    }

    #[test]
    fn markers_cannot_be_bound() {
        let mut rec = Recorder::new(None, CallablePolicy::Member);
        assert_eq!(
            rec.bind(sym(markers::FIELDS), Value::Null),
            Err(DeclarationError::ReservedName(sym(markers::FIELDS)))
        );
    }

    #[test]
    fn unbound_dunder_is_not_found() {
        let mut rec = Recorder::new(None, CallablePolicy::Member);
        assert_eq!(
            rec.lookup(sym("__name__")),
            Err(DeclarationError::NameNotFound(sym("__name__")))
        );
    }

    #[test]
    fn context_is_consulted_but_never_written() {
        let ctx = Context::new().with("origin", 0);
        let mut rec = Recorder::new(Some(&ctx), CallablePolicy::Member);
        assert_eq!(rec.lookup(sym("origin")).unwrap(), Value::from(0));
        let captured = rec.finish();
        assert!(captured.fields.is_empty());
        assert!(captured.namespace.is_empty());
    }

    #[test]
    fn member_mode_rejects_undeclared_names() {
        let mut rec = Recorder::new(None, CallablePolicy::Member);
        rec.lookup(sym(markers::ATTRS)).unwrap();
        assert_eq!(
            rec.lookup(sym("undefined_thing")),
            Err(DeclarationError::UndeclaredAttribute(sym("undefined_thing")))
        );
    }
}
