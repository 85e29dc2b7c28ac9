//! SMT-LIB document assembly

pub mod backend;
pub mod document;
pub mod literal;

pub use backend::StringBackend;
pub use document::{assemble, assemble_named, operator_cases, sanity_check_document};
pub use literal::{check_representable, MAX_CODE_POINT};
