//! Sub-minimal edit scripts (the UNSAT oracle)
//!
//! A script of `d - 1` edits cannot turn `s1` into `s2` when their edit
//! distance is `d`, whatever values the solver picks for the positions and
//! characters. The edit kinds are drawn from a seeded generator so a reported
//! case can be replayed.

use crate::edit::{EditKind, EditScript, Formula};
use crate::error::{OracleError, Result};
use crate::synthesis::context::SynthesisContext;
use crate::synthesis::distance::edit_distance;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// A sub-minimal script with the seed that produced it
#[derive(Debug, Clone)]
pub struct SubMinimalScript {
    /// Symbolic formula; every constant is unconstrained
    pub formula: Formula,
    /// Seed of the edit-kind generator
    pub seed: u64,
    /// Levenshtein distance between the two words
    pub distance: usize,
}

/// Build `d - 1` unconstrained edits from `s1` towards `s2`.
///
/// Uses `seed` when given, otherwise draws a fresh one from OS entropy.
/// Fails with [`OracleError::IdenticalWords`] when the words are equal.
pub fn synthesize_sub_minimal(s1: &str, s2: &str, seed: Option<u64>) -> Result<SubMinimalScript> {
    let distance = edit_distance(s1, s2);
    if distance == 0 {
        return Err(OracleError::IdenticalWords(s1.to_string()));
    }

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ctx = SynthesisContext::new();
    let mut script = EditScript::new(s1);

    for _ in 0..distance - 1 {
        let kind = EditKind::ALL[rng.random_range(0..EditKind::ALL.len())];
        script.push(ctx.free_edit(kind));
    }

    debug!(s1, s2, distance, seed, "synthesized sub-minimal script");

    Ok(SubMinimalScript {
        formula: ctx.finish(script, s2),
        seed,
        distance,
    })
}
