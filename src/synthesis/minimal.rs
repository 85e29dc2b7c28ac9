//! Minimal edit scripts (the SAT oracle)
//!
//! Fills the classical Levenshtein table and, alongside the cost, keeps for
//! every cell the edits that transform `s1[..i]` into `s2[..j]` while leaving
//! `s1[i..]` untouched behind it. Each cell therefore describes the string
//! `s2[..j] ++ s1[i..]`, and the cell at `(|s2|, |s1|)` describes `s2`.
//!
//! Edit positions index the partially edited string, not `s1`. A cell's
//! cursor is `consumed + insertions - removals`: the number of characters
//! already produced in front of the untouched suffix. Every edit is placed at
//! the cursor of the cell it extends.

use crate::edit::{EditKind, EditScript, Formula};
use crate::error::Result;
use crate::synthesis::context::SynthesisContext;
use std::rc::Rc;

/// Priority among predecessor cells of equal cost.
///
/// Different orders produce different, equally short scripts. The default
/// prefers Replace, then Insert, then Remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TieBreak([EditKind; 3]);

impl TieBreak {
    pub const REPLACE_FIRST: TieBreak =
        TieBreak([EditKind::Replace, EditKind::Insert, EditKind::Remove]);
    pub const INSERT_FIRST: TieBreak =
        TieBreak([EditKind::Insert, EditKind::Remove, EditKind::Replace]);
    pub const REMOVE_FIRST: TieBreak =
        TieBreak([EditKind::Remove, EditKind::Insert, EditKind::Replace]);

    /// Build a custom order. Returns `None` unless every kind appears once.
    pub fn new(order: [EditKind; 3]) -> Option<Self> {
        let complete = EditKind::ALL.iter().all(|kind| order.contains(kind));
        complete.then_some(TieBreak(order))
    }

    pub fn order(&self) -> [EditKind; 3] {
        self.0
    }
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::REPLACE_FIRST
    }
}

/// Concrete edit recorded during the table fill
#[derive(Debug, Clone, Copy)]
struct GroundEdit {
    kind: EditKind,
    position: i64,
    character: Option<char>,
}

/// Persistent list of edits; cells share their common prefix.
#[derive(Debug)]
struct Trail {
    edit: GroundEdit,
    previous: Option<Rc<Trail>>,
}

#[derive(Debug, Clone, Default)]
struct Cell {
    cost: usize,
    insertions: usize,
    removals: usize,
    trail: Option<Rc<Trail>>,
}

impl Cell {
    /// Position in the partially edited string where the next edit applies.
    fn cursor(&self, consumed: usize) -> i64 {
        consumed as i64 + self.insertions as i64 - self.removals as i64
    }

    /// This cell followed by one more edit.
    fn extend(&self, edit: GroundEdit) -> Cell {
        let (insertions, removals) = match edit.kind {
            EditKind::Insert => (self.insertions + 1, self.removals),
            EditKind::Remove => (self.insertions, self.removals + 1),
            EditKind::Replace => (self.insertions, self.removals),
        };
        Cell {
            cost: self.cost + 1,
            insertions,
            removals,
            trail: Some(Rc::new(Trail {
                edit,
                previous: self.trail.clone(),
            })),
        }
    }

    /// Edits in application order.
    fn edits(&self) -> Vec<GroundEdit> {
        let mut edits = Vec::with_capacity(self.cost);
        let mut node = self.trail.as_deref();
        while let Some(trail) = node {
            edits.push(trail.edit);
            node = trail.previous.as_deref();
        }
        edits.reverse();
        edits
    }
}

/// A minimal script and its length
#[derive(Debug, Clone)]
pub struct MinimalScript {
    /// Symbolic formula with its ground-truth bindings
    pub formula: Formula,
    /// Levenshtein distance between the two words
    pub distance: usize,
}

/// Minimal script turning `s1` into `s2`, ties broken Replace, Insert, Remove.
pub fn synthesize_minimal(s1: &str, s2: &str) -> Result<MinimalScript> {
    synthesize_minimal_with(s1, s2, TieBreak::default())
}

/// Minimal script turning `s1` into `s2` with an explicit tie-break order.
pub fn synthesize_minimal_with(s1: &str, s2: &str, tie_break: TieBreak) -> Result<MinimalScript> {
    let source: Vec<char> = s1.chars().collect();
    let target: Vec<char> = s2.chars().collect();

    // table[j][i] transforms source[..i] into target[..j]
    let mut table = vec![vec![Cell::default(); source.len() + 1]; target.len() + 1];

    for i in 1..=source.len() {
        let previous = &table[0][i - 1];
        table[0][i] = previous.extend(GroundEdit {
            kind: EditKind::Remove,
            position: previous.cursor(i - 1),
            character: None,
        });
    }
    for j in 1..=target.len() {
        let previous = &table[j - 1][0];
        table[j][0] = previous.extend(GroundEdit {
            kind: EditKind::Insert,
            position: previous.cursor(0),
            character: Some(target[j - 1]),
        });
    }

    for i in 1..=source.len() {
        for j in 1..=target.len() {
            table[j][i] = if source[i - 1] == target[j - 1] {
                table[j - 1][i - 1].clone()
            } else {
                best_edit(&table, i, j, target[j - 1], tie_break)
            };
        }
    }

    let last = &table[target.len()][source.len()];
    let mut ctx = SynthesisContext::new();
    let mut script = EditScript::new(s1);
    for edit in last.edits() {
        script.push(ctx.bound_edit(edit.kind, edit.position, edit.character)?);
    }

    Ok(MinimalScript {
        formula: ctx.finish(script, s2),
        distance: last.cost,
    })
}

/// Cheapest way to reach cell `(i, j)` by one more edit.
fn best_edit(table: &[Vec<Cell>], i: usize, j: usize, wanted: char, tie_break: TieBreak) -> Cell {
    let order = tie_break.order();
    let mut chosen = order[0];
    for &kind in &order[1..] {
        if predecessor(table, kind, i, j).0.cost < predecessor(table, chosen, i, j).0.cost {
            chosen = kind;
        }
    }

    let (previous, consumed) = predecessor(table, chosen, i, j);
    previous.extend(GroundEdit {
        kind: chosen,
        position: previous.cursor(consumed),
        character: chosen.takes_character().then_some(wanted),
    })
}

/// Cell an edit of `kind` extends to reach `(i, j)`, with the number of
/// source characters it has consumed.
fn predecessor(table: &[Vec<Cell>], kind: EditKind, i: usize, j: usize) -> (&Cell, usize) {
    match kind {
        EditKind::Insert => (&table[j - 1][i], i),
        EditKind::Remove => (&table[j][i - 1], i - 1),
        EditKind::Replace => (&table[j - 1][i - 1], i - 1),
    }
}
