//! Record types declared by listing their fields.
//!
//! A record body is a list of statements. While the body collects fields,
//! every name it binds (or merely mentions) becomes a field; after the
//! [`markers::ATTRS`] token it defines ordinary members instead. Finalizing
//! the declaration merges inherited fields, moves required fields in front of
//! defaulted ones, and synthesizes `__init__` and `__repr__`.
//!
//! ```
//! use autorecord::{body::Body, declare::declare, proc::Arguments};
//!
//! let point = declare("Point", &[], None, &Body::new().assign("z", 0).name("x").name("y")).unwrap();
//! let p = point.construct(Arguments::new().arg(1).arg(2)).unwrap();
//! assert_eq!(p.repr().unwrap(), "Point(x=1, y=2, z=0)");
//! ```

extern crate self as autorecord;

pub mod body;
pub mod constructor;
pub mod declare;
pub mod exceptions;
pub mod fields;
pub mod markers;
pub mod proc;
pub mod recorder;
pub mod records;
pub mod repr;
pub mod symbols;
pub mod value;

pub use autorecord_macros::method;
pub use declare::{declare, Declaration};
