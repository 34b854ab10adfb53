//! Record types and the records they construct.

use std::{
    fmt,
    sync::{Arc, LazyLock},
};

use by_address::ByAddress;
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;

use crate::{
    declare::Declaration,
    exceptions::Condition,
    fields::FieldTable,
    proc::Arguments,
    repr,
    symbols::Symbol,
    value::Value,
};

/// A finalized record type. Nothing about it changes after declaration;
/// subtypes build their own field table from this one.
#[derive(derive_more::Debug)]
pub struct RecordType {
    name: Symbol,
    #[debug(skip)]
    parents: Vec<Arc<RecordType>>,
    /// Every ancestor, nearest first: each parent in the order listed,
    /// followed by its own ancestors. The first occurrence of an ancestor
    /// fixes its position.
    #[debug(skip)]
    inherits: IndexSet<ByAddress<Arc<RecordType>>>,
    fields: FieldTable,
    #[debug(skip)]
    namespace: IndexMap<Symbol, Value>,
    match_args: Arc<[Symbol]>,
}

/// The zero-field record type, `Record`. Useful as a common base.
static ROOT: LazyLock<Arc<RecordType>> =
    LazyLock::new(|| Declaration::new("Record", &[], None).finalize());

pub fn root() -> Arc<RecordType> {
    ROOT.clone()
}

impl RecordType {
    pub(crate) fn new(
        name: Symbol,
        parents: Vec<Arc<RecordType>>,
        fields: FieldTable,
        namespace: IndexMap<Symbol, Value>,
        match_args: Arc<[Symbol]>,
    ) -> Self {
        let mut inherits = IndexSet::new();
        for parent in &parents {
            inherits.insert(ByAddress(parent.clone()));
            inherits.extend(parent.inherits.iter().cloned());
        }
        Self {
            name,
            parents,
            inherits,
            fields,
            namespace,
            match_args,
        }
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn parents(&self) -> &[Arc<RecordType>] {
        &self.parents
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// Field names in table order, for positional destructuring.
    pub fn match_args(&self) -> &[Symbol] {
        &self.match_args
    }

    /// Looks `name` up in this type's namespace, then in each ancestor's.
    pub fn attribute(&self, name: Symbol) -> Option<Value> {
        self.namespace.get(&name).cloned().or_else(|| {
            self.inherits
                .iter()
                .find_map(|ancestor| ancestor.namespace.get(&name).cloned())
        })
    }

    /// Whether `name` was bound by this type's own body or synthesized for it.
    pub fn defines(&self, name: Symbol) -> bool {
        self.namespace.contains_key(&name)
    }

    pub fn is_subtype_of(&self, other: &Arc<RecordType>) -> bool {
        std::ptr::eq(self, Arc::as_ptr(other)) || self.inherits.contains(&ByAddress(other.clone()))
    }

    /// Creates a record and runs the nearest `__init__` on it. A type with no
    /// `__init__` anywhere in its ancestry accepts no arguments.
    pub fn construct(self: &Arc<Self>, args: Arguments) -> Result<Record, Condition> {
        let record = Record::new(self.clone());
        match self.attribute(Symbol::intern("__init__")) {
            Some(init) => {
                init.call(args.with_receiver(Value::from(record.clone())))?;
            }
            None if !args.positional.is_empty() || !args.keywords.is_empty() => {
                return Err(Condition::wrong_num_of_args(
                    0,
                    args.positional.len() + args.keywords.len(),
                ));
            }
            None => (),
        }
        Ok(record)
    }
}

/// An instance of a record type. Cloning a record clones the handle, so
/// attribute writes are visible through every clone.
#[derive(Clone)]
pub struct Record(Arc<RecordInner>);

struct RecordInner {
    rtd: Arc<RecordType>,
    attrs: RwLock<IndexMap<Symbol, Value>>,
}

impl Record {
    pub(crate) fn new(rtd: Arc<RecordType>) -> Self {
        Self(Arc::new(RecordInner {
            rtd,
            attrs: RwLock::new(IndexMap::new()),
        }))
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.0.rtd
    }

    pub fn is_instance_of(&self, rtd: &Arc<RecordType>) -> bool {
        self.0.rtd.is_subtype_of(rtd)
    }

    /// Reads an attribute of the record, falling back to its type's
    /// namespace.
    pub fn get(&self, name: Symbol) -> Result<Value, Condition> {
        let own = self.0.attrs.read().get(&name).cloned();
        own.or_else(|| self.0.rtd.attribute(name))
            .ok_or_else(|| Condition::attribute_not_found(self.0.rtd.name, name))
    }

    pub fn set(&self, name: Symbol, value: Value) {
        self.0.attrs.write().insert(name, value);
    }

    /// Calls a member. Members found on the record type receive the record as
    /// their first argument; procedures stored on the record itself do not.
    pub fn call_method(&self, name: Symbol, args: Arguments) -> Result<Value, Condition> {
        let own = self.0.attrs.read().get(&name).cloned();
        match own {
            Some(attr) => attr.call(args),
            None => {
                let member = self
                    .0
                    .rtd
                    .attribute(name)
                    .ok_or_else(|| Condition::attribute_not_found(self.0.rtd.name, name))?;
                member.call(args.with_receiver(Value::from(self.clone())))
            }
        }
    }

    pub fn repr(&self) -> Result<String, Condition> {
        repr::guarded(Arc::as_ptr(&self.0), "...", || {
            let repr = self.call_method(Symbol::intern("__repr__"), Arguments::new())?;
            let repr: &str = (&repr).try_into()?;
            Ok(repr.to_string())
        })
    }

    /// The values of the first `n` fields in `match_args` order, as a
    /// positional pattern with `n` sub-patterns would bind them.
    pub fn destructure(&self, n: usize) -> Result<Vec<Value>, Condition> {
        let match_args = self.0.rtd.match_args();
        if n > match_args.len() {
            return Err(Condition::destructure(self.0.rtd.name, match_args.len(), n));
        }
        match_args[..n].iter().map(|name| self.get(*name)).collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type", &self.0.rtd.name)
            .field("attrs", &*self.0.attrs.read())
            .finish()
    }
}
