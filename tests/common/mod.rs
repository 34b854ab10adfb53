//! Scaffolding shared by the record tests
#![allow(dead_code)]

use std::sync::Arc;

use autorecord::{
    body::Body,
    declare::declare,
    exceptions::Condition,
    method,
    proc::Arguments,
    records::{Record, RecordType},
    symbols::Symbol,
    value::Value,
};

pub fn sym(s: &str) -> Symbol {
    Symbol::intern(s)
}

pub fn field_names(rt: &RecordType) -> Vec<String> {
    rt.fields().names().map(|name| name.to_string()).collect()
}

pub fn record(name: &str, parents: &[Arc<RecordType>], body: Body) -> Arc<RecordType> {
    declare(name, parents, None, &body).expect(&format!("declaring {name} failed"))
}

pub fn construct(rt: &Arc<RecordType>, args: Arguments) -> Record {
    rt.construct(args)
        .expect(&format!("constructing {} failed", rt.name()))
}

/// A two-dimensional point with a member section.
pub fn point() -> Arc<RecordType> {
    record(
        "Point",
        &[],
        Body::new()
            .name("x")
            .name("y")
            .attrs()
            .def("magnitude_squared", magnitude_squared_method())
            .def("scaled", scaled_method())
            .def("sum_with", sum_with_method()),
    )
}

fn int(this: &Record, field: &str) -> Result<i64, Condition> {
    i64::try_from(&this.get(sym(field))?)
}

#[method]
pub fn magnitude_squared(this: &Record) -> Result<Value, Condition> {
    let (x, y) = (int(this, "x")?, int(this, "y")?);
    Ok(Value::from(x * x + y * y))
}

#[method]
pub fn scaled(this: &Record, factor: &Value) -> Result<Value, Condition> {
    let factor = i64::try_from(factor)?;
    let rt = this.record_type().clone();
    rt.construct(
        Arguments::new()
            .arg(int(this, "x")? * factor)
            .arg(int(this, "y")? * factor),
    )
    .map(Value::from)
}

#[method("sum_with")]
pub fn sum_with(this: &Record, rest: Vec<Value>) -> Result<Value, Condition> {
    let mut total = int(this, "x")? + int(this, "y")?;
    for value in &rest {
        total += i64::try_from(value)?;
    }
    Ok(Value::from(total))
}

macro_rules! assert_fields {
    ($rt:expr, [$($name:literal),* $(,)?]) => {
        let expected: Vec<String> = vec![$($name.to_string()),*];
        assert_eq!($crate::common::field_names(&$rt), expected);
    };
}

pub(crate) use assert_fields;
