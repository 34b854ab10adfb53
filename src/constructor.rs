//! Synthesized `__init__`: binds call arguments to a field table and assigns
//! each field on the new record.

use indexmap::IndexMap;

use crate::{
    exceptions::Condition,
    fields::FieldTable,
    proc::Procedure,
    records::Record,
    symbols::Symbol,
    value::Value,
};

/// Parameters in field table order: required first, then defaulted. Every
/// parameter may be passed positionally or by name.
#[derive(Clone, Debug)]
pub struct Signature {
    callee: Symbol,
    params: Vec<(Symbol, Value)>,
}

impl Signature {
    pub fn from_table(callee: Symbol, table: &FieldTable) -> Self {
        Self {
            callee,
            params: table
                .iter()
                .map(|(name, default)| (name, default.clone()))
                .collect(),
        }
    }

    /// Returns one value per parameter, in parameter order. Parameters that
    /// were not passed take their default; the default is shared, not copied.
    pub fn bind(
        &self,
        positional: Vec<Value>,
        keywords: IndexMap<Symbol, Value>,
    ) -> Result<Vec<(Symbol, Value)>, Condition> {
        if positional.len() > self.params.len() {
            return Err(Condition::wrong_num_of_args(
                self.params.len(),
                positional.len(),
            ));
        }

        let mut bound: Vec<Option<Value>> = vec![None; self.params.len()];
        for (slot, value) in bound.iter_mut().zip(positional) {
            *slot = Some(value);
        }

        for (keyword, value) in keywords {
            let Some(idx) = self.params.iter().position(|(name, _)| *name == keyword) else {
                return Err(Condition::unexpected_keyword(self.callee, keyword));
            };
            if bound[idx].is_some() {
                return Err(Condition::duplicate_argument(self.callee, keyword));
            }
            bound[idx] = Some(value);
        }

        let missing: Vec<_> = self
            .params
            .iter()
            .zip(&bound)
            .filter(|((_, default), value)| value.is_none() && default.is_no_default())
            .map(|((name, _), _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(Condition::missing_arguments(self.callee, missing));
        }

        Ok(self
            .params
            .iter()
            .zip(bound)
            .map(|((name, default), value)| (*name, value.unwrap_or_else(|| default.clone())))
            .collect())
    }
}

/// Builds the `__init__` member for a record type named `name`. The first
/// positional argument is the record under construction.
pub fn synthesize(name: Symbol, table: &FieldTable) -> Procedure {
    let signature = Signature::from_table(name, table);
    Procedure::with_keywords("__init__", move |args| {
        let (mut positional, keywords) = args.into_parts();
        if positional.is_empty() {
            return Err(Condition::wrong_num_of_args(1, 0));
        }
        let receiver = positional.remove(0);
        let this: &Record = (&receiver).try_into()?;
        for (field, value) in signature.bind(positional, keywords)? {
            this.set(field, value);
        }
        Ok(Value::Null)
    })
}
