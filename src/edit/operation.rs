//! Edit operations and their reference semantics
//!
//! The functions at the bottom of this module are the concrete counterpart of
//! the solver-side `insert`/`remove`/`replace` definitions: a position outside
//! the valid range leaves the source untouched.

use crate::smt::literal::{int_literal, string_literal};
use std::fmt;

/// Name of a declared solver constant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Solver sort of a declared constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Int,
    String,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Int => write!(f, "Int"),
            Sort::String => write!(f, "String"),
        }
    }
}

/// An operation argument: either a literal value or a named constant whose
/// value lives in a binding table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param<T> {
    Concrete(T),
    Symbolic(Symbol),
}

impl<T> Param<T> {
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Param::Symbolic(symbol) => Some(symbol),
            Param::Concrete(_) => None,
        }
    }
}

impl Param<i64> {
    fn render(&self) -> String {
        match self {
            Param::Concrete(value) => int_literal(*value),
            Param::Symbolic(symbol) => symbol.to_string(),
        }
    }
}

impl Param<char> {
    fn render(&self) -> String {
        match self {
            Param::Concrete(value) => string_literal(&value.to_string()),
            Param::Symbolic(symbol) => symbol.to_string(),
        }
    }
}

/// The three elementary string edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Insert,
    Remove,
    Replace,
}

impl EditKind {
    pub const ALL: [EditKind; 3] = [EditKind::Insert, EditKind::Remove, EditKind::Replace];

    /// Name of the solver-side function implementing this edit
    pub fn operator_name(&self) -> &'static str {
        match self {
            EditKind::Insert => "insert",
            EditKind::Remove => "remove",
            EditKind::Replace => "replace",
        }
    }

    /// Whether the edit carries a character argument
    pub fn takes_character(&self) -> bool {
        !matches!(self, EditKind::Remove)
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator_name())
    }
}

/// One string edit with concrete or symbolic arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    /// Insert `character` before index `position`
    Insert {
        position: Param<i64>,
        character: Param<char>,
    },
    /// Remove the character at `position`
    Remove { position: Param<i64> },
    /// Overwrite the character at `position`
    Replace {
        position: Param<i64>,
        character: Param<char>,
    },
}

impl EditOperation {
    pub fn insert(position: i64, character: char) -> Self {
        EditOperation::Insert {
            position: Param::Concrete(position),
            character: Param::Concrete(character),
        }
    }

    pub fn remove(position: i64) -> Self {
        EditOperation::Remove {
            position: Param::Concrete(position),
        }
    }

    pub fn replace(position: i64, character: char) -> Self {
        EditOperation::Replace {
            position: Param::Concrete(position),
            character: Param::Concrete(character),
        }
    }

    pub fn kind(&self) -> EditKind {
        match self {
            EditOperation::Insert { .. } => EditKind::Insert,
            EditOperation::Remove { .. } => EditKind::Remove,
            EditOperation::Replace { .. } => EditKind::Replace,
        }
    }

    pub fn position(&self) -> &Param<i64> {
        match self {
            EditOperation::Insert { position, .. }
            | EditOperation::Remove { position }
            | EditOperation::Replace { position, .. } => position,
        }
    }

    pub fn character(&self) -> Option<&Param<char>> {
        match self {
            EditOperation::Insert { character, .. } | EditOperation::Replace { character, .. } => {
                Some(character)
            }
            EditOperation::Remove { .. } => None,
        }
    }

    /// Render this edit as a solver term applied to an already rendered
    /// `source` term.
    pub fn render_around(&self, source: &str) -> String {
        let name = self.kind().operator_name();
        match self.character() {
            Some(character) => format!(
                "({} {} {} {})",
                name,
                character.render(),
                self.position().render(),
                source
            ),
            None => format!("({} {} {})", name, self.position().render(), source),
        }
    }
}

/// Insert `character` before index `position`. Valid positions are
/// `0..=len`.
pub fn insert(source: &[char], position: i64, character: char) -> Vec<char> {
    let mut result = source.to_vec();
    if (0..=source.len() as i64).contains(&position) {
        result.insert(position as usize, character);
    }
    result
}

/// Remove the character at `position`. Valid positions are `0..len`.
pub fn remove(source: &[char], position: i64) -> Vec<char> {
    let mut result = source.to_vec();
    if (0..source.len() as i64).contains(&position) {
        result.remove(position as usize);
    }
    result
}

/// Overwrite the character at `position`. Valid positions are `0..len`.
pub fn replace(source: &[char], position: i64, character: char) -> Vec<char> {
    let mut result = source.to_vec();
    if (0..source.len() as i64).contains(&position) {
        result[position as usize] = character;
    }
    result
}
