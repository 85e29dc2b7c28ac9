use edit_oracle::edit::{EditKind, Param};
use edit_oracle::oracle::{build_document, Mode, OracleConfig};
use edit_oracle::smt::{assemble, StringBackend, MAX_CODE_POINT};
use edit_oracle::synthesis::{
    edit_distance, synthesize_minimal_with, synthesize_sub_minimal, TieBreak,
};
use edit_oracle::OracleError;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn tie_breaks() -> impl Strategy<Value = TieBreak> {
    prop_oneof![
        Just(TieBreak::REPLACE_FIRST),
        Just(TieBreak::INSERT_FIRST),
        Just(TieBreak::REMOVE_FIRST),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The ground truth of a minimal script turns the first word into the second.
    #[test]
    fn minimal_script_reaches_target(
        s1 in "[a-d]{0,8}",
        s2 in "[a-d]{0,8}",
        tie_break in tie_breaks(),
    ) {
        let script = synthesize_minimal_with(&s1, &s2, tie_break).unwrap();
        prop_assert_eq!(script.formula.evaluate().unwrap(), s2);
    }

    /// A minimal script has exactly as many edits as the edit distance.
    #[test]
    fn minimal_script_length_is_distance(
        s1 in "[a-z]{0,10}",
        s2 in "[a-z]{0,10}",
        tie_break in tie_breaks(),
    ) {
        let script = synthesize_minimal_with(&s1, &s2, tie_break).unwrap();
        let distance = edit_distance(&s1, &s2);
        prop_assert_eq!(script.distance, distance);
        prop_assert_eq!(script.formula.edit_count(), distance);
    }

    /// Round trip holds for arbitrary Unicode text, not just ASCII.
    #[test]
    fn minimal_script_handles_unicode(s1 in "\\PC{0,6}", s2 in "\\PC{0,6}") {
        let script = synthesize_minimal_with(&s1, &s2, TieBreak::default()).unwrap();
        prop_assert_eq!(script.formula.evaluate().unwrap(), s2);
    }

    /// Every edit lands inside the string it is applied to.
    #[test]
    fn minimal_positions_are_in_range(s1 in "[a-c]{0,8}", s2 in "[a-c]{0,8}") {
        let script = synthesize_minimal_with(&s1, &s2, TieBreak::default()).unwrap();
        let grounded = script.formula.script().ground(script.formula.bindings()).unwrap();
        let mut length = s1.chars().count() as i64;
        for op in grounded.operations() {
            let position = match op.position() {
                Param::Concrete(p) => *p,
                Param::Symbolic(_) => unreachable!(),
            };
            match op.kind() {
                EditKind::Insert => {
                    prop_assert!((0..=length).contains(&position));
                    length += 1;
                }
                EditKind::Remove => {
                    prop_assert!((0..length).contains(&position));
                    length -= 1;
                }
                EditKind::Replace => {
                    prop_assert!((0..length).contains(&position));
                }
            }
        }
    }

    /// Sub-minimal scripts are one edit short and leave every constant free.
    #[test]
    fn sub_minimal_is_one_short(
        s1 in "[a-z]{0,8}",
        s2 in "[a-z]{0,8}",
        seed in any::<u64>(),
    ) {
        prop_assume!(s1 != s2);
        let script = synthesize_sub_minimal(&s1, &s2, Some(seed)).unwrap();
        prop_assert_eq!(script.formula.edit_count() + 1, edit_distance(&s1, &s2));
        prop_assert!(script.formula.bindings().is_empty());
        prop_assert_eq!(script.seed, seed);
    }

    /// Documents only escape characters inside the SMT-LIB string alphabet;
    /// words outside it are refused up front.
    #[test]
    fn document_escapes_stay_in_alphabet(s1 in "\\PC{0,6}", s2 in "\\PC{0,6}") {
        let config = OracleConfig::new(Mode::Sat, StringBackend::Seq);
        let representable = s1.chars().chain(s2.chars()).all(|c| c as u32 <= MAX_CODE_POINT);
        match build_document(&s1, &s2, config, None, TieBreak::default()) {
            Ok(case) => {
                prop_assert!(representable);
                for (start, _) in case.document.match_indices("\\u{") {
                    let digits = &case.document[start + 3..];
                    let end = digits.find('}').unwrap();
                    let code = u32::from_str_radix(&digits[..end], 16).unwrap();
                    prop_assert!(code <= MAX_CODE_POINT);
                }
            }
            Err(e) => {
                prop_assert!(!representable);
                prop_assert!(matches!(e, OracleError::Configuration(_)));
            }
        }
    }

    /// The document declares each constant once and constrains each character.
    #[test]
    fn document_declares_every_symbol(
        s1 in "[a-z]{0,8}",
        s2 in "[a-z]{0,8}",
        seed in any::<u64>(),
    ) {
        prop_assume!(s1 != s2);
        let script = synthesize_sub_minimal(&s1, &s2, Some(seed)).unwrap();
        let document = assemble(&script.formula, StringBackend::Seq);
        let declarations = script.formula.declarations();
        prop_assert_eq!(document.matches("(declare-const ").count(), declarations.len());
        prop_assert_eq!(
            document.matches("(assert (= (str.len ").count(),
            script.formula.character_symbols().len()
        );
        prop_assert_eq!(document.matches("(check-sat)").count(), 1);
    }
}
