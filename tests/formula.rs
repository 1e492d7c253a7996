// tests/formula.rs
use cubist_core::{
    CubeError, FormulaConfig, FormulaConverter, Move, convert, convert_steps, invert_move,
    invert_moves, invert_steps, join_moves, solved_state_string, state_string_from_moves,
};

fn notation(formula: &str) -> Vec<String> {
    convert(formula, 1)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_wide_short_and_long_moves_are_normalized() {
    assert_eq!(notation("r"), vec!["r"]);
    assert_eq!(notation("Rw"), vec!["r"]);
    assert_eq!(notation("rw"), vec!["r"]);
    assert_eq!(notation("f2"), vec!["f2"]);
    assert_eq!(notation("Uw'"), vec!["u'"]);
    assert_eq!(notation("X y2 Z'"), vec!["x", "y2", "z'"]);
}

#[test]
fn test_group_repeat_and_power_repeat() {
    assert_eq!(notation("(R U)2"), vec!["R", "U", "R", "U"]);
    assert_eq!(notation("(R U)3"), vec!["R", "U", "R", "U", "R", "U"]);
    assert_eq!(notation("R^3"), vec!["R", "R", "R"]);
    assert_eq!(notation("(R (U F)^2)2").len(), 10);
    assert_eq!(notation("(R U)^2 F"), vec!["R", "U", "R", "U", "F"]);
}

#[test]
fn test_formula_repeat_argument_applies_after_parse() {
    let moves = convert("R U", 3).unwrap();
    assert_eq!(join_moves(&moves), "R U R U R U");
}

#[test]
fn test_empty_formula_is_empty_sequence() {
    assert!(convert("", 1).unwrap().is_empty());
    assert!(convert("   ", 2).unwrap().is_empty());
}

#[test]
fn test_steps_keep_one_move_per_step() {
    let steps = convert_steps("(R U')2 x", 1).unwrap();
    assert_eq!(steps.len(), 5);
    assert!(steps.iter().all(|step| step.len() == 1));
}

#[test]
fn test_inverse_moves_are_built_in_reverse_order() {
    let moves = convert("R U2 F'", 1).unwrap();
    assert_eq!(join_moves(&invert_moves(&moves)), "F U2 R'");

    let moves = convert("(R U)2", 1).unwrap();
    assert_eq!(join_moves(&invert_moves(&moves)), "U' R' U' R'");
}

#[test]
fn test_invert_steps_reverses_steps_and_moves_within_steps() {
    let r: Move = "R".parse().unwrap();
    let u2: Move = "U2".parse().unwrap();
    let x: Move = "x'".parse().unwrap();
    let steps = vec![vec![r], vec![u2, x]];

    let inverse = invert_steps(&steps);
    assert_eq!(inverse, vec![vec![x.inverse(), u2], vec![r.inverse()]]);
}

#[test]
fn test_inverse_steps_undo_the_formula_on_the_cube() {
    let steps = convert_steps("(R U f)2 M' x y2 d'", 1).unwrap();
    let moves: Vec<Move> = steps
        .iter()
        .chain(&invert_steps(&steps))
        .flatten()
        .copied()
        .collect();
    assert!(moves.len() > 2 * 6);
    assert_eq!(state_string_from_moves(&moves), solved_state_string());
    assert_ne!(
        state_string_from_moves(&steps.concat()),
        solved_state_string()
    );
}

#[test]
fn test_invert_move_strings() {
    assert_eq!(invert_move("R").unwrap(), "R'");
    assert_eq!(invert_move("u'").unwrap(), "u");
    assert_eq!(invert_move("M2").unwrap(), "M2");
    assert!(matches!(invert_move("R3"), Err(CubeError::InvalidMove(_))));
    assert!(matches!(invert_move(""), Err(CubeError::InvalidMove(_))));
}

#[test]
fn test_fail_fast_on_unknown_token() {
    let err = convert("R Q", 1).unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.position(), Some(2));
    assert!(err.to_string().contains("Unknown move token 'Q'"), "{err}");
}

#[test]
fn test_fail_fast_on_unsupported_character() {
    let err = convert("R U + F", 1).unwrap_err();
    assert_eq!(err.position(), Some(4));
}

#[test]
fn test_fail_fast_on_unbalanced_parentheses() {
    let err = convert("(R U", 1).unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.position(), Some(4), "missing ')' is reported at end of input");

    let err = convert("R U)", 1).unwrap_err();
    assert_eq!(err.position(), Some(3));
}

#[test]
fn test_fail_fast_on_invalid_repeat() {
    let err = convert("R^0", 1).unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.position(), Some(2));

    let err = convert("(R U)0", 1).unwrap_err();
    assert_eq!(err.position(), Some(5));

    let err = convert("R^", 1).unwrap_err();
    assert_eq!(err.position(), Some(1));

    // A bare integer only repeats groups.
    let err = convert("R 2", 1).unwrap_err();
    assert_eq!(err.position(), Some(2));
}

#[test]
fn test_api_repeat_zero_is_a_validation_error() {
    let err = convert("R U", 0).unwrap_err();
    assert!(matches!(err, CubeError::Validation(_)));
    assert_eq!(err.position(), None);
}

#[test]
fn test_custom_config_limits() {
    let converter = FormulaConverter::new(FormulaConfig {
        max_group_depth: 1,
        max_moves: 4,
    });
    assert_eq!(converter.convert("(R U)2", 1).unwrap().len(), 4);
    assert!(converter.convert("((R))", 1).unwrap_err().is_syntax());
    assert!(converter.convert("R^5", 1).unwrap_err().is_syntax());
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: FormulaConfig = serde_json::from_str(r#"{"max_moves": 12}"#).unwrap();
    assert_eq!(config.max_moves, 12);
    assert_eq!(config.max_group_depth, FormulaConfig::default().max_group_depth);
}
