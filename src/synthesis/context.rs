//! Constant naming and ground-truth bookkeeping for one synthesis call

use crate::edit::{BindingTable, EditKind, EditOperation, EditScript, Formula, Param, Symbol, Value};
use crate::error::Result;

/// Mints uniquely named constants for the edits of a single formula.
///
/// Constants are numbered by edit step: edit `k` uses `idx_k` for its
/// position and `ch_k` for its character.
#[derive(Debug, Default)]
pub struct SynthesisContext {
    next_step: usize,
    bindings: BindingTable,
    unconstrained: Vec<Symbol>,
}

impl SynthesisContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_symbols(&mut self) -> (Symbol, Symbol) {
        let step = self.next_step;
        self.next_step += 1;
        (
            Symbol::new(format!("idx_{step}")),
            Symbol::new(format!("ch_{step}")),
        )
    }

    /// Symbolic edit whose constants are bound to `position` and `character`.
    pub fn bound_edit(
        &mut self,
        kind: EditKind,
        position: i64,
        character: Option<char>,
    ) -> Result<EditOperation> {
        let (position_symbol, character_symbol) = self.next_symbols();
        self.bindings
            .bind(position_symbol.clone(), Value::Int(position))?;
        let character = match (kind.takes_character(), character) {
            (true, Some(value)) => {
                self.bindings
                    .bind(character_symbol.clone(), Value::Char(value))?;
                Some(Param::Symbolic(character_symbol))
            }
            (true, None) => {
                self.unconstrained.push(character_symbol.clone());
                Some(Param::Symbolic(character_symbol))
            }
            (false, _) => None,
        };
        Ok(build(kind, Param::Symbolic(position_symbol), character))
    }

    /// Symbolic edit with fresh, unconstrained constants.
    pub fn free_edit(&mut self, kind: EditKind) -> EditOperation {
        let (position_symbol, character_symbol) = self.next_symbols();
        self.unconstrained.push(position_symbol.clone());
        let character = if kind.takes_character() {
            self.unconstrained.push(character_symbol.clone());
            Some(Param::Symbolic(character_symbol))
        } else {
            None
        };
        build(kind, Param::Symbolic(position_symbol), character)
    }

    /// Close the context over a finished script.
    pub fn finish(self, script: EditScript, target: &str) -> Formula {
        Formula::new(script, target, self.bindings, self.unconstrained)
    }
}

fn build(kind: EditKind, position: Param<i64>, character: Option<Param<char>>) -> EditOperation {
    match (kind, character) {
        (EditKind::Insert, Some(character)) => EditOperation::Insert {
            position,
            character,
        },
        (EditKind::Replace, Some(character)) => EditOperation::Replace {
            position,
            character,
        },
        _ => EditOperation::Remove { position },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_numbered_by_step() {
        let mut ctx = SynthesisContext::new();
        let first = ctx.bound_edit(EditKind::Remove, 0, None).unwrap();
        let second = ctx.bound_edit(EditKind::Insert, 3, Some('x')).unwrap();

        assert_eq!(first.position().symbol(), Some(&Symbol::new("idx_0")));
        assert_eq!(second.position().symbol(), Some(&Symbol::new("idx_1")));
        assert_eq!(
            second.character().and_then(Param::symbol),
            Some(&Symbol::new("ch_1"))
        );
    }

    #[test]
    fn test_bound_edits_record_ground_truth() {
        let mut ctx = SynthesisContext::new();
        let op = ctx.bound_edit(EditKind::Replace, 2, Some('r')).unwrap();
        let mut script = EditScript::new("foo");
        script.push(op);
        let formula = ctx.finish(script, "for");

        assert_eq!(formula.bindings().len(), 2);
        assert_eq!(formula.bindings().get(&Symbol::new("idx_0")), Some(Value::Int(2)));
        assert_eq!(
            formula.bindings().get(&Symbol::new("ch_0")),
            Some(Value::Char('r'))
        );
        assert!(formula.unconstrained().is_empty());
        assert_eq!(formula.evaluate().unwrap(), "for");
    }

    #[test]
    fn test_free_edits_are_unconstrained() {
        let mut ctx = SynthesisContext::new();
        let remove = ctx.free_edit(EditKind::Remove);
        let insert = ctx.free_edit(EditKind::Insert);
        assert_eq!(remove.kind(), EditKind::Remove);
        assert_eq!(insert.kind(), EditKind::Insert);

        let mut script = EditScript::new("ab");
        script.push(remove);
        script.push(insert);
        let formula = ctx.finish(script, "ba");
        assert!(formula.bindings().is_empty());
        assert_eq!(
            formula.unconstrained(),
            &[Symbol::new("idx_0"), Symbol::new("idx_1"), Symbol::new("ch_1")]
        );
    }
}
