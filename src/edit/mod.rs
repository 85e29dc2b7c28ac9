//! String edit model: operations, scripts, bindings and formulas

pub mod operation;
pub mod script;

pub use operation::{EditKind, EditOperation, Param, Sort, Symbol};
pub use script::{BindingTable, EditScript, Formula, Value};
