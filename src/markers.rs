//! The "no default" sentinel and the two reserved mode-toggle tokens.
//!
//! A bare reference to [`ATTRS`] inside a record body stops field collection
//! so that ordinary members can be defined; a bare reference to [`FIELDS`]
//! resumes it. Neither token may be bound as a name.

use crate::{symbols::Symbol, value::Value};

/// Stop collecting fields and define ordinary members from here on.
pub const ATTRS: &str = "__attrs__";

/// Resume collecting fields.
pub const FIELDS: &str = "__fields__";

/// The marker for a field with no default value. It is its own [`Value`]
/// variant, so no user value can ever compare equal to it.
pub const NO_DEFAULT: Value = Value::NoDefault;

/// What a binding in a record body currently means.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    CollectingFields,
    DefiningMembers,
}

impl Mode {
    /// Returns the mode a mode-toggle token switches to, or `None` if the
    /// symbol is not a mode-toggle token.
    pub fn from_marker(sym: Symbol) -> Option<Self> {
        if sym == ATTRS {
            Some(Self::DefiningMembers)
        } else if sym == FIELDS {
            Some(Self::CollectingFields)
        } else {
            None
        }
    }
}

pub fn is_marker(sym: Symbol) -> bool {
    Mode::from_marker(sym).is_some()
}
