//! Dynamically typed values

use std::{fmt, sync::Arc};

use parking_lot::RwLock;

use crate::{
    exceptions::Condition,
    proc::{Arguments, Procedure},
    records::{Record, RecordType},
    repr,
};

/// A value a record body can bind, a field can default to, or a record can
/// hold.
#[derive(Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(Arc<str>),
    /// Lists are shared: cloning the value clones the handle, not the items.
    List(Arc<RwLock<Vec<Value>>>),
    Procedure(Procedure),
    RecordType(Arc<RecordType>),
    Record(Record),
    /// The "no default" sentinel, see [`crate::markers::NO_DEFAULT`].
    NoDefault,
    /// The inert value produced by evaluating a mode-toggle token.
    Unspecified,
}

impl Value {
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(Arc::new(RwLock::new(items.into_iter().collect())))
    }

    pub fn is_no_default(&self) -> bool {
        matches!(self, Self::NoDefault)
    }

    /// Procedures and record types can be called.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Procedure(_) | Self::RecordType(_))
    }

    pub fn call(&self, args: Arguments) -> Result<Value, Condition> {
        match self {
            Self::Procedure(proc) => proc.call(args),
            Self::RecordType(rt) => rt.construct(args).map(Value::from),
            x => Err(Condition::not_callable(x.type_name())),
        }
    }

    /// Renders the value in its printable debug form. Records render through
    /// their own `__repr__` member, which may fail. A record or list that
    /// contains itself renders the inner occurrence as `...` or `[...]`.
    pub fn repr(&self) -> Result<String, Condition> {
        Ok(match self {
            Self::Null => "null".to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Real(r) => format!("{r:?}"),
            Self::String(s) => format!("{:?}", &**s),
            Self::List(items) => repr::guarded(Arc::as_ptr(items), "[...]", || {
                let items = items
                    .read()
                    .iter()
                    .map(Value::repr)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("[{}]", items.join(", ")))
            })?,
            Self::Procedure(proc) => format!("<procedure {}>", proc.name()),
            Self::RecordType(rt) => format!("<record type {}>", rt.name()),
            Self::Record(record) => record.repr()?,
            Self::NoDefault => "NO_DEFAULT".to_string(),
            Self::Unspecified => "<unspecified>".to_string(),
        })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Procedure(_) => "procedure",
            Self::RecordType(_) => "record type",
            Self::Record(_) => "record",
            Self::NoDefault => "no default",
            Self::Unspecified => "unspecified",
        }
    }
}

impl PartialEq for Value {
    /// Scalars and lists compare by content. Procedures, record types and
    /// records compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b) || *a.read() == *b.read(),
            (Self::Procedure(a), Self::Procedure(b)) => a.ptr_eq(b),
            (Self::RecordType(a), Self::RecordType(b)) => Arc::ptr_eq(a, b),
            (Self::Record(a), Self::Record(b)) => a.ptr_eq(b),
            (Self::NoDefault, Self::NoDefault) => true,
            (Self::Unspecified, Self::Unspecified) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr() {
            Ok(repr) => f.write_str(&repr),
            Err(_) => write!(f, "<{}>", self.type_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Self::Real(r)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::list(items)
    }
}

impl From<Procedure> for Value {
    fn from(proc: Procedure) -> Self {
        Self::Procedure(proc)
    }
}

impl From<Arc<RecordType>> for Value {
    fn from(rt: Arc<RecordType>) -> Self {
        Self::RecordType(rt)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl<'a> TryFrom<&'a Value> for &'a Record {
    type Error = Condition;

    fn try_from(v: &'a Value) -> Result<&'a Record, Self::Error> {
        match v {
            Value::Record(record) => Ok(record),
            x => Err(Condition::invalid_type("record", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for i64 {
    type Error = Condition;

    fn try_from(v: &'a Value) -> Result<i64, Self::Error> {
        match v {
            Value::Integer(i) => Ok(*i),
            x => Err(Condition::invalid_type("integer", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = Condition;

    fn try_from(v: &'a Value) -> Result<&'a str, Self::Error> {
        match v {
            Value::String(s) => Ok(&**s),
            x => Err(Condition::invalid_type("string", x.type_name())),
        }
    }
}
