//! Edit scripts, binding tables and formulas

use crate::edit::operation::{self, EditOperation, Param, Sort, Symbol};
use crate::error::{OracleError, Result};
use crate::smt::literal::{int_literal, string_literal};
use std::fmt;

/// Ground-truth value of a symbolic constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Char(char),
}

impl Value {
    pub fn sort(&self) -> Sort {
        match self {
            Value::Int(_) => Sort::Int,
            Value::Char(_) => Sort::String,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => f.write_str(&int_literal(*value)),
            Value::Char(value) => f.write_str(&string_literal(&value.to_string())),
        }
    }
}

/// Mapping from symbolic constant to its ground-truth value, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    entries: Vec<(Symbol, Value)>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `symbol` to `value`. Each symbol may be bound once.
    pub fn bind(&mut self, symbol: Symbol, value: Value) -> Result<()> {
        if self.get(&symbol).is_some() {
            return Err(OracleError::DuplicateBinding(symbol.to_string()));
        }
        self.entries.push((symbol, value));
        Ok(())
    }

    pub fn get(&self, symbol: &Symbol) -> Option<Value> {
        self.entries
            .iter()
            .find(|(bound, _)| bound == symbol)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, Value)> {
        self.entries.iter().map(|(symbol, value)| (symbol, *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn int(&self, param: &Param<i64>) -> Result<i64> {
        match param {
            Param::Concrete(value) => Ok(*value),
            Param::Symbolic(symbol) => match self.get(symbol) {
                Some(Value::Int(value)) => Ok(value),
                _ => Err(OracleError::UnboundSymbol(symbol.to_string())),
            },
        }
    }

    fn char(&self, param: &Param<char>) -> Result<char> {
        match param {
            Param::Concrete(value) => Ok(*value),
            Param::Symbolic(symbol) => match self.get(symbol) {
                Some(Value::Char(value)) => Ok(value),
                _ => Err(OracleError::UnboundSymbol(symbol.to_string())),
            },
        }
    }
}

/// A literal source string and the edits applied to it, first to last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScript {
    source: String,
    operations: Vec<EditOperation>,
}

impl EditScript {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            operations: Vec::new(),
        }
    }

    pub fn push(&mut self, operation: EditOperation) {
        self.operations.push(operation);
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn operations(&self) -> &[EditOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply every edit in order, resolving symbols through `bindings`.
    pub fn apply(&self, bindings: &BindingTable) -> Result<String> {
        let mut current: Vec<char> = self.source.chars().collect();
        for op in &self.operations {
            let position = bindings.int(op.position())?;
            current = match op {
                EditOperation::Insert { character, .. } => {
                    operation::insert(&current, position, bindings.char(character)?)
                }
                EditOperation::Remove { .. } => operation::remove(&current, position),
                EditOperation::Replace { character, .. } => {
                    operation::replace(&current, position, bindings.char(character)?)
                }
            };
        }
        Ok(current.into_iter().collect())
    }

    /// Replace every symbol with its bound value.
    pub fn ground(&self, bindings: &BindingTable) -> Result<EditScript> {
        let mut grounded = EditScript::new(self.source.clone());
        for op in &self.operations {
            let position = bindings.int(op.position())?;
            grounded.push(match op {
                EditOperation::Insert { character, .. } => {
                    EditOperation::insert(position, bindings.char(character)?)
                }
                EditOperation::Remove { .. } => EditOperation::remove(position),
                EditOperation::Replace { character, .. } => {
                    EditOperation::replace(position, bindings.char(character)?)
                }
            });
        }
        Ok(grounded)
    }

    /// Nested solver term; the last edit is the outermost application.
    pub fn to_term(&self) -> String {
        self.operations
            .iter()
            .fold(string_literal(&self.source), |term, op| op.render_around(&term))
    }

    /// Symbols in first-use order, position before character.
    pub fn symbols(&self) -> Vec<(Symbol, Sort)> {
        let mut symbols = Vec::new();
        for op in &self.operations {
            if let Some(symbol) = op.position().symbol() {
                symbols.push((symbol.clone(), Sort::Int));
            }
            if let Some(symbol) = op.character().and_then(Param::symbol) {
                symbols.push((symbol.clone(), Sort::String));
            }
        }
        symbols
    }
}

/// An edit script asserted equal to a target string, together with the
/// ground truth of its bound symbols and the list of unconstrained ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    script: EditScript,
    target: String,
    bindings: BindingTable,
    unconstrained: Vec<Symbol>,
}

impl Formula {
    pub fn new(
        script: EditScript,
        target: impl Into<String>,
        bindings: BindingTable,
        unconstrained: Vec<Symbol>,
    ) -> Self {
        Self {
            script,
            target: target.into(),
            bindings,
            unconstrained,
        }
    }

    pub fn script(&self) -> &EditScript {
        &self.script
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn unconstrained(&self) -> &[Symbol] {
        &self.unconstrained
    }

    pub fn edit_count(&self) -> usize {
        self.script.len()
    }

    /// Constants to declare, in first-use order.
    pub fn declarations(&self) -> Vec<(Symbol, Sort)> {
        self.script.symbols()
    }

    /// Character constants; each needs a length-one constraint.
    pub fn character_symbols(&self) -> Vec<Symbol> {
        self.declarations()
            .into_iter()
            .filter(|(_, sort)| *sort == Sort::String)
            .map(|(symbol, _)| symbol)
            .collect()
    }

    /// `(assert (= <term> "<target>"))`
    pub fn assertion(&self) -> String {
        format!(
            "(assert (= {} {}))",
            self.script.to_term(),
            string_literal(&self.target)
        )
    }

    /// The assertion with every symbol replaced by its ground truth. Fails
    /// for formulas with unconstrained symbols.
    pub fn reference_assertion(&self) -> Result<String> {
        let grounded = self.script.ground(&self.bindings)?;
        Ok(format!(
            "(assert (= {} {}))",
            grounded.to_term(),
            string_literal(&self.target)
        ))
    }

    /// Evaluate the script under its ground truth.
    pub fn evaluate(&self) -> Result<String> {
        self.script.apply(&self.bindings)
    }
}
