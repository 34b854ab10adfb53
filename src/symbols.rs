//! Interned names

use std::{
    fmt,
    sync::{Arc, LazyLock},
};

use indexmap::IndexSet;
use parking_lot::RwLock;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) u32);

static SYMTAB: LazyLock<RwLock<IndexSet<Arc<str>>>> =
    LazyLock::new(|| RwLock::new(IndexSet::new()));

impl Symbol {
    pub fn intern(s: &str) -> Self {
        if let Some(id) = SYMTAB.read().get_index_of(s) {
            return Self::from_index(id);
        }
        let (id, _) = SYMTAB.write().insert_full(Arc::from(s));
        Self::from_index(id)
    }

    fn from_index(id: usize) -> Self {
        Self(u32::try_from(id).expect("symbol table exceeds u32::MAX entries"))
    }

    pub fn to_str(self) -> Arc<str> {
        SYMTAB.read()[self.0 as usize].clone()
    }

    /// Names both prefixed and suffixed by a double underscore, e.g.
    /// `__init__`, are reserved for special members and never become fields.
    pub fn is_dunder(self) -> bool {
        let s = self.to_str();
        s.starts_with("__") && s.ends_with("__")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl PartialEq<&'_ str> for Symbol {
    fn eq(&self, rhs: &&str) -> bool {
        self.to_str().as_ref() == *rhs
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::intern(s)
    }
}

impl From<&String> for Symbol {
    fn from(s: &String) -> Self {
        Self::intern(s)
    }
}
