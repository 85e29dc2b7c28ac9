//! Edit-script synthesis
//!
//! Builds formulas whose satisfiability is known in advance: a minimal script
//! with its ground truth (satisfiable) or a script one edit too short
//! (unsatisfiable).

pub mod context;
pub mod distance;
pub mod minimal;
pub mod sub_minimal;

pub use context::SynthesisContext;
pub use distance::edit_distance;
pub use minimal::{synthesize_minimal, synthesize_minimal_with, MinimalScript, TieBreak};
pub use sub_minimal::{synthesize_sub_minimal, SubMinimalScript};
