//! Parser that turns formula text such as `(R U R' U')2 x' Rw^2` into move steps.
//!
//! The entry point is [`FormulaConverter`]. Configure it with a [`FormulaConfig`]
//! and call [`FormulaConverter::convert_steps`] or [`FormulaConverter::convert`].
//! The free functions [`convert`] and [`convert_steps`] use the default config.
//!
//! Grammar:
//!
//! ```text
//! sequence := (atom repeat?)*
//! atom     := move | '(' sequence ')'
//! repeat   := '^' INT | INT        (bare INT only after a group)
//! move     := LETTER ('w' | 'W')? ('\'' | '2')?
//! ```

use crate::error::{CubeError, CubeResult, FormulaSyntaxError};
use crate::moves::{Modifier, Move, MoveBase, MoveStep};
use serde::{Deserialize, Serialize};

const WIDE_BASES: &str = "udrlfb";
const FACE_BASES: &str = "URFDLB";
const SLICE_BASES: &str = "MES";
const ROTATION_BASES: &str = "xyz";

/// Configuration for formula parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaConfig {
    /// Maximum nesting depth of parenthesized groups.
    pub max_group_depth: usize,
    /// Maximum number of moves a formula may expand to, repeats included.
    pub max_moves: usize,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            max_group_depth: 64,
            max_moves: 100_000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
    LParen,
    RParen,
    Caret,
    Int,
    Move,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    text: String,
    /// Character offset of the first character.
    start: usize,
}

fn tokenize(formula: &str) -> Result<Vec<Token>, FormulaSyntaxError> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        let kind = match c {
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '^' => Some(TokenKind::Caret),
            _ => None,
        };
        if let Some(kind) = kind {
            tokens.push(Token {
                kind,
                text: c.to_string(),
                start,
            });
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Int,
                text: chars[start..i].iter().collect(),
                start,
            });
            continue;
        }

        if c.is_alphabetic() {
            i += 1;
            // Wide marker only binds to a face letter: `Rw`, `rw`.
            if i < chars.len()
                && matches!(chars[i], 'w' | 'W')
                && FACE_BASES.contains(c.to_ascii_uppercase())
            {
                i += 1;
            }
            if i < chars.len() && matches!(chars[i], '\'' | '2') {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Move,
                text: chars[start..i].iter().collect(),
                start,
            });
            continue;
        }

        return Err(FormulaSyntaxError::new(
            format!("Unsupported character '{c}'"),
            i,
        ));
    }

    Ok(tokens)
}

fn split_modifier(raw: &str) -> (&str, Modifier) {
    if let Some(base) = raw.strip_suffix('2') {
        (base, Modifier::Double)
    } else if let Some(base) = raw.strip_suffix('\'') {
        (base, Modifier::Prime)
    } else {
        (raw, Modifier::None)
    }
}

/// Maps a raw move token to its canonical single-letter base.
fn expand_move(token: &Token) -> Result<Move, FormulaSyntaxError> {
    let (base, modifier) = split_modifier(&token.text);
    let letters: Vec<char> = base.chars().collect();

    let canonical = match letters.as_slice() {
        [c] if WIDE_BASES.contains(*c) => Some(*c),
        [c, 'w' | 'W'] if WIDE_BASES.contains(c.to_ascii_lowercase()) => {
            Some(c.to_ascii_lowercase())
        }
        [c] if FACE_BASES.contains(*c) || SLICE_BASES.contains(*c) => Some(*c),
        [c] if ROTATION_BASES.contains(c.to_ascii_lowercase()) => Some(c.to_ascii_lowercase()),
        _ => None,
    };

    canonical
        .and_then(MoveBase::from_char)
        .map(|base| Move::new(base, modifier))
        .ok_or_else(|| {
            FormulaSyntaxError::new(
                format!("Unknown move token '{}'", token.text),
                token.start,
            )
        })
}

struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    /// Character length of the formula; reported for errors at end of input.
    end: usize,
    config: &'a FormulaConfig,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    fn parse_sequence(
        &mut self,
        depth: usize,
        inside_group: bool,
    ) -> Result<Vec<MoveStep>, FormulaSyntaxError> {
        let mut steps: Vec<MoveStep> = Vec::new();
        let mut move_count = 0usize;

        while let Some(token) = self.peek() {
            if token.kind == TokenKind::RParen {
                if inside_group {
                    break;
                }
                return Err(FormulaSyntaxError::new("Unexpected ')'", token.start));
            }

            let atom_start = token.start;
            let atom = self.parse_atom(depth)?;
            let (repeat, repeat_pos) = self.parse_repeat(atom.is_group)?;

            let atom_moves: usize = atom.steps.iter().map(Vec::len).sum();
            let total = atom_moves
                .checked_mul(repeat)
                .and_then(|n| n.checked_add(move_count))
                .filter(|&n| n <= self.config.max_moves);
            let Some(total) = total else {
                return Err(FormulaSyntaxError::new(
                    format!(
                        "Formula expands to more than {} moves",
                        self.config.max_moves
                    ),
                    repeat_pos.unwrap_or(atom_start),
                ));
            };
            move_count = total;

            for _ in 0..repeat {
                steps.extend(atom.steps.iter().cloned());
            }
        }

        if inside_group {
            match self.peek() {
                Some(token) if token.kind == TokenKind::RParen => {
                    self.index += 1;
                }
                _ => return Err(FormulaSyntaxError::new("Missing closing ')'", self.end)),
            }
        }

        Ok(steps)
    }

    fn parse_atom(&mut self, depth: usize) -> Result<Atom, FormulaSyntaxError> {
        let Some(token) = self.advance() else {
            return Err(FormulaSyntaxError::new("Expected move or '('", self.end));
        };

        match token.kind {
            TokenKind::LParen => {
                if depth >= self.config.max_group_depth {
                    return Err(FormulaSyntaxError::new(
                        format!(
                            "Groups nested deeper than {} levels",
                            self.config.max_group_depth
                        ),
                        token.start,
                    ));
                }
                let steps = self.parse_sequence(depth + 1, true)?;
                Ok(Atom {
                    steps,
                    is_group: true,
                })
            }
            TokenKind::Move => Ok(Atom {
                steps: vec![vec![expand_move(token)?]],
                is_group: false,
            }),
            _ => Err(FormulaSyntaxError::new(
                format!("Expected move or '(' but got '{}'", token.text),
                token.start,
            )),
        }
    }

    /// Returns the repeat count and the offset of its integer, if one was written.
    fn parse_repeat(
        &mut self,
        is_group: bool,
    ) -> Result<(usize, Option<usize>), FormulaSyntaxError> {
        let Some(token) = self.peek() else {
            return Ok((1, None));
        };

        match token.kind {
            TokenKind::Caret => {
                self.index += 1;
                match self.advance() {
                    Some(int) if int.kind == TokenKind::Int => {
                        Ok((parse_repeat_count(int)?, Some(int.start)))
                    }
                    _ => Err(FormulaSyntaxError::new(
                        "Expected integer after '^'",
                        token.start,
                    )),
                }
            }
            TokenKind::Int if is_group => {
                self.index += 1;
                Ok((parse_repeat_count(token)?, Some(token.start)))
            }
            _ => Ok((1, None)),
        }
    }
}

struct Atom {
    steps: Vec<MoveStep>,
    is_group: bool,
}

fn parse_repeat_count(token: &Token) -> Result<usize, FormulaSyntaxError> {
    let repeat: usize = token
        .text
        .parse()
        .map_err(|_| FormulaSyntaxError::new("Repeat count is too large", token.start))?;
    if repeat < 1 {
        return Err(FormulaSyntaxError::new("Repeat must be >= 1", token.start));
    }
    Ok(repeat)
}

/// Converts formula text into moves.
#[derive(Clone, Debug, Default)]
pub struct FormulaConverter {
    config: FormulaConfig,
}

impl FormulaConverter {
    pub fn new(config: FormulaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormulaConfig {
        &self.config
    }

    /// Parses `formula` into animation steps, then repeats the whole result `repeat` times.
    ///
    /// In-formula repeats (`^N`, `(...)N`) are local to their atom; `repeat` applies to
    /// the complete sequence afterwards.
    ///
    /// # Errors
    ///
    /// [`CubeError::Syntax`] with the offending character offset for malformed text,
    /// [`CubeError::Validation`] when `repeat` is zero or the result would exceed
    /// [`FormulaConfig::max_moves`].
    #[tracing::instrument(skip(self))]
    pub fn convert_steps(&self, formula: &str, repeat: usize) -> CubeResult<Vec<MoveStep>> {
        if repeat < 1 {
            return Err(CubeError::validation("repeat must be >= 1"));
        }

        let tokens = tokenize(formula)?;
        let mut parser = Parser {
            tokens: &tokens,
            index: 0,
            end: formula.chars().count(),
            config: &self.config,
        };
        let steps = parser.parse_sequence(0, false)?;

        if let Some(token) = parser.peek() {
            return Err(FormulaSyntaxError::new(
                format!("Unexpected token '{}'", token.text),
                token.start,
            )
            .into());
        }

        let move_count: usize = steps.iter().map(Vec::len).sum();
        if move_count
            .checked_mul(repeat)
            .is_none_or(|n| n > self.config.max_moves)
        {
            return Err(CubeError::validation(format!(
                "formula repeated {repeat} times exceeds {} moves",
                self.config.max_moves
            )));
        }

        tracing::trace!(
            tokens = tokens.len(),
            steps = steps.len(),
            repeat,
            "parsed formula"
        );

        let mut repeated = Vec::with_capacity(steps.len() * repeat);
        for _ in 0..repeat {
            repeated.extend(steps.iter().cloned());
        }
        Ok(repeated)
    }

    /// Like [`convert_steps`](Self::convert_steps) with the step grouping flattened away.
    pub fn convert(&self, formula: &str, repeat: usize) -> CubeResult<Vec<Move>> {
        let steps = self.convert_steps(formula, repeat)?;
        Ok(steps.into_iter().flatten().collect())
    }
}

/// [`FormulaConverter::convert_steps`] with the default configuration.
pub fn convert_steps(formula: &str, repeat: usize) -> CubeResult<Vec<MoveStep>> {
    FormulaConverter::default().convert_steps(formula, repeat)
}

/// [`FormulaConverter::convert`] with the default configuration.
pub fn convert(formula: &str, repeat: usize) -> CubeResult<Vec<Move>> {
    FormulaConverter::default().convert(formula, repeat)
}

/// Inverts one canonical move string: `R` <-> `R'`, `R2` stays `R2`.
///
/// # Errors
///
/// [`CubeError::InvalidMove`] if `mv` is not canonical notation.
pub fn invert_move(mv: &str) -> CubeResult<String> {
    let parsed: Move = mv.parse()?;
    Ok(parsed.inverse().to_string())
}

/// Reverses the sequence and inverts every move.
pub fn invert_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.inverse()).collect()
}

/// Reverses the step order and the move order inside each step, inverting every move.
pub fn invert_steps(steps: &[MoveStep]) -> Vec<MoveStep> {
    steps.iter().rev().map(|step| invert_moves(step)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(formula: &str) -> Vec<TokenKind> {
        tokenize(formula)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizer_splits_groups_repeats_and_moves() {
        use TokenKind::*;
        assert_eq!(
            kinds("(R Uw')12 x^2"),
            vec![LParen, Move, Move, RParen, Int, Move, Caret, Int]
        );
    }

    #[test]
    fn tokenizer_binds_wide_marker_only_to_face_letters() {
        let tokens = tokenize("Rw xw").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Rw", "x", "w"]);
    }

    #[test]
    fn tokenizer_reports_unsupported_character_offset() {
        let err = tokenize("R U, F").unwrap_err();
        assert_eq!(err.position, 3);
        assert!(err.message.contains("','"));
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let err = convert("R ü", 1).unwrap_err();
        assert_eq!(err.position(), Some(2));
        let err = convert("(ü", 1).unwrap_err();
        assert_eq!(err.position(), Some(1));
    }

    #[test]
    fn nesting_limit_is_enforced() {
        let converter = FormulaConverter::new(FormulaConfig {
            max_group_depth: 2,
            ..Default::default()
        });
        assert!(converter.convert("((R))", 1).is_ok());
        let err = converter.convert("(((R)))", 1).unwrap_err();
        assert_eq!(err.position(), Some(2));
    }

    #[test]
    fn expansion_limit_is_enforced() {
        let converter = FormulaConverter::new(FormulaConfig {
            max_moves: 10,
            ..Default::default()
        });
        assert_eq!(converter.convert("(R U)5", 1).unwrap().len(), 10);
        let err = converter.convert("(R U)6", 1).unwrap_err();
        assert_eq!(err.position(), Some(5));
        assert!(matches!(
            converter.convert("R U", 6),
            Err(CubeError::Validation(_))
        ));
    }

    #[test]
    fn oversized_repeat_is_a_syntax_error() {
        let err = convert("R^99999999999999999999999", 1).unwrap_err();
        assert_eq!(err.position(), Some(2));
    }
}
