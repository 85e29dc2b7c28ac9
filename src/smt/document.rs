//! Complete solver input documents

use crate::edit::{EditOperation, Formula};
use crate::error::Result;
use crate::smt::backend::StringBackend;
use crate::smt::literal::string_literal;

/// `insert c i s`: `c` placed before index `i`; identity unless `0 <= i <= len`.
pub const INSERT_DEFINITION: &str = concat!(
    "(define-fun insert ((to_insert String) (index Int) (source String)) String ",
    "(ite (and (>= index 0) (<= index (str.len source))) ",
    "(str.++ (str.substr source 0 index) to_insert (str.substr source index (str.len source))) ",
    "source))",
);

/// `remove i s`: character at `i` dropped; identity unless `0 <= i < len`.
pub const REMOVE_DEFINITION: &str = concat!(
    "(define-fun remove ((index Int) (source String)) String ",
    "(ite (and (>= index 0) (< index (str.len source))) ",
    "(str.++ (str.substr source 0 index) (str.substr source (+ index 1) (str.len source))) ",
    "source))",
);

/// `replace c i s`: character at `i` overwritten; identity unless `0 <= i < len`.
pub const REPLACE_DEFINITION: &str = concat!(
    "(define-fun replace ((to_insert String) (index Int) (source String)) String ",
    "(ite (and (>= index 0) (< index (str.len source))) ",
    "(str.++ (str.substr source 0 index) to_insert ",
    "(str.substr source (+ index 1) (str.len source))) ",
    "source))",
);

const CHECK_SAT: &str = "(check-sat)";

fn header(backend: StringBackend) -> String {
    let mut out = String::new();
    for line in [
        backend.option_line().as_str(),
        INSERT_DEFINITION,
        REMOVE_DEFINITION,
        REPLACE_DEFINITION,
    ] {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Render `formula` as a full solver document for `backend`.
///
/// Line order: backend option, operator definitions, declarations in
/// first-use order, one length constraint per character constant, the
/// equality assertion, `(check-sat)`.
pub fn assemble(formula: &Formula, backend: StringBackend) -> String {
    let mut out = header(backend);
    for (symbol, sort) in formula.declarations() {
        out.push_str(&format!("(declare-const {symbol} {sort})\n"));
    }
    for symbol in formula.character_symbols() {
        out.push_str(&format!("(assert (= (str.len {symbol}) 1))\n"));
    }
    out.push_str(&formula.assertion());
    out.push('\n');
    out.push_str(CHECK_SAT);
    out.push('\n');
    out
}

/// [`assemble`] with the backend given by name.
pub fn assemble_named(formula: &Formula, backend: &str) -> Result<String> {
    Ok(assemble(formula, backend.parse()?))
}

/// One operator application with its documented result
#[derive(Debug, Clone)]
pub struct OperatorCase {
    pub source: &'static str,
    pub edit: EditOperation,
    pub expected: &'static str,
}

impl OperatorCase {
    fn new(source: &'static str, edit: EditOperation, expected: &'static str) -> Self {
        Self {
            source,
            edit,
            expected,
        }
    }

    /// `(= (<op> ... "<source>") "<expected>")`
    pub fn to_term(&self) -> String {
        format!(
            "(= {} {})",
            self.edit.render_around(&string_literal(self.source)),
            string_literal(self.expected)
        )
    }
}

/// Boundary and interior behaviour of the three operators.
pub fn operator_cases() -> Vec<OperatorCase> {
    use EditOperation as Op;
    vec![
        OperatorCase::new("", Op::insert(0, 'a'), "a"),
        OperatorCase::new("", Op::insert(1, 'a'), ""),
        OperatorCase::new("", Op::insert(-1, 'a'), ""),
        OperatorCase::new("b", Op::insert(0, 'a'), "ab"),
        OperatorCase::new("b", Op::insert(1, 'a'), "ba"),
        OperatorCase::new("b", Op::insert(2, 'a'), "b"),
        OperatorCase::new("b", Op::insert(-1, 'a'), "b"),
        OperatorCase::new("a", Op::insert(1, 'b'), "ab"),
        OperatorCase::new("foo", Op::insert(-242, 'b'), "foo"),
        OperatorCase::new("foo", Op::insert(0, 'b'), "bfoo"),
        OperatorCase::new("foo", Op::insert(1, 'b'), "fboo"),
        OperatorCase::new("foo", Op::insert(2, 'b'), "fobo"),
        OperatorCase::new("foo", Op::insert(3, 'b'), "foob"),
        OperatorCase::new("a", Op::remove(0), ""),
        OperatorCase::new("a", Op::remove(1), "a"),
        OperatorCase::new("a", Op::remove(-1), "a"),
        OperatorCase::new("", Op::remove(0), ""),
        OperatorCase::new("ab", Op::remove(-1), "ab"),
        OperatorCase::new("ab", Op::remove(0), "b"),
        OperatorCase::new("ab", Op::remove(1), "a"),
        OperatorCase::new("ab", Op::remove(2), "ab"),
        OperatorCase::new("foo", Op::remove(-242), "foo"),
        OperatorCase::new("foo", Op::remove(0), "oo"),
        OperatorCase::new("foo", Op::remove(1), "fo"),
        OperatorCase::new("foo", Op::remove(2), "fo"),
        OperatorCase::new("a", Op::replace(0, 'b'), "b"),
        OperatorCase::new("a", Op::replace(1, 'b'), "a"),
        OperatorCase::new("a", Op::replace(-1, 'b'), "a"),
        OperatorCase::new("", Op::replace(0, 'b'), ""),
        OperatorCase::new("ab", Op::replace(0, 'a'), "ab"),
        OperatorCase::new("ab", Op::replace(1, 'a'), "aa"),
        OperatorCase::new("ab", Op::replace(1, 'b'), "ab"),
        OperatorCase::new("foo", Op::replace(-242, 'b'), "foo"),
        OperatorCase::new("foo", Op::replace(0, 'b'), "boo"),
        OperatorCase::new("foo", Op::replace(1, 'b'), "fbo"),
        OperatorCase::new("foo", Op::replace(2, 'b'), "fob"),
    ]
}

/// Regression document for the operator definitions. A correct solver
/// answers `sat`.
pub fn sanity_check_document(backend: StringBackend) -> String {
    let terms: Vec<String> = operator_cases().iter().map(OperatorCase::to_term).collect();
    let mut out = header(backend);
    out.push_str(&format!("(assert (and {}))\n", terms.join(" ")));
    out.push_str(CHECK_SAT);
    out.push('\n');
    out
}
