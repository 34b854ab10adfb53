//! Synthesized `__repr__`

use std::{cell::RefCell, sync::Arc};

use indexmap::IndexSet;

use crate::{
    exceptions::Condition,
    fields::FieldTable,
    proc::Procedure,
    records::Record,
    symbols::Symbol,
    value::Value,
};

/// Builds the `__repr__` member rendering `Name(field=value, ...)`, fields in
/// table order. The name is that of the declaring record type.
pub fn synthesize(name: Symbol, table: &FieldTable) -> Procedure {
    let fields: Arc<[Symbol]> = table.names().collect();
    Procedure::new("__repr__", 1, false, move |args| {
        let this: &Record = (&args[0]).try_into()?;
        render(name, &fields, this).map(Value::from)
    })
}

fn render(name: Symbol, fields: &[Symbol], this: &Record) -> Result<String, Condition> {
    let rendered = fields
        .iter()
        .map(|field| -> Result<String, Condition> {
            Ok(format!("{field}={}", this.get(*field)?.repr()?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{name}({})", rendered.join(", ")))
}

thread_local! {
    /// Addresses of the records and lists currently being rendered on this
    /// thread.
    static RENDERING: RefCell<IndexSet<usize>> = RefCell::new(IndexSet::new());
}

/// Runs `render` for the container at `addr`, unless that container is
/// already being rendered further up the stack. A revisited container renders
/// as `placeholder` instead of recursing forever.
pub(crate) fn guarded<T: ?Sized>(
    addr: *const T,
    placeholder: &str,
    render: impl FnOnce() -> Result<String, Condition>,
) -> Result<String, Condition> {
    let key = addr.cast::<()>() as usize;
    if !RENDERING.with_borrow_mut(|rendering| rendering.insert(key)) {
        return Ok(placeholder.to_string());
    }
    let _leave = Leave(key);
    render()
}

/// Removes its key from the rendering set on drop, even when rendering fails.
struct Leave(usize);

impl Drop for Leave {
    fn drop(&mut self) {
        RENDERING.with_borrow_mut(|rendering| rendering.swap_remove(&self.0));
    }
}
