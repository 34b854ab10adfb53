//! Field tables, and how a record type's table is built from its parents'.

use indexmap::IndexMap;

use crate::{symbols::Symbol, value::Value};

/// The ordered fields of one record type, each mapped to its default or to
/// [`Value::NoDefault`]. Required fields always precede defaulted ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldTable {
    fields: IndexMap<Symbol, Value>,
}

impl FieldTable {
    /// Folds the parents' tables in the order they are listed, then the local
    /// declarations on top. When a name is already present its default is
    /// overwritten in place, so the name keeps the position at which it was
    /// first seen.
    pub fn merge<'a>(
        parents: impl IntoIterator<Item = &'a FieldTable>,
        local: IndexMap<Symbol, Value>,
    ) -> Self {
        let mut acc = IndexMap::new();
        for parent in parents {
            for (name, default) in parent.iter() {
                acc.insert(name, default.clone());
            }
        }
        acc.extend(local);
        Self::required_first(acc)
    }

    /// A constructor cannot take a required parameter after an optional one,
    /// so required fields are moved to the front. The partition is stable.
    fn required_first(fields: IndexMap<Symbol, Value>) -> Self {
        let (required, defaulted): (Vec<_>, Vec<_>) = fields
            .into_iter()
            .partition(|(_, default)| default.is_no_default());
        Self {
            fields: required.into_iter().chain(defaulted).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: Symbol) -> bool {
        self.fields.contains_key(&name)
    }

    pub fn get(&self, name: Symbol) -> Option<&Value> {
        self.fields.get(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Value)> {
        self.fields.iter().map(|(name, default)| (*name, default))
    }

    pub fn names(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.fields.keys().copied()
    }

    pub fn required(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.iter()
            .filter(|(_, default)| default.is_no_default())
            .map(|(name, _)| name)
    }

    pub fn defaulted(&self) -> impl Iterator<Item = (Symbol, &Value)> {
        self.iter().filter(|(_, default)| !default.is_no_default())
    }
}
