//! Text helpers for showing formulas: whitespace normalization, display chunks,
//! overlay wrapping and file-name slugs.

use crate::error::{CubeError, CubeResult};

pub const DEFAULT_SLUG_MAX_LEN: usize = 80;

/// Collapses every whitespace run to one space and trims both ends.
pub fn normalize_formula_text(formula: &str) -> String {
    formula.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Consumes a digit run starting at `from`, returning the index after it.
fn skip_digits(chars: &[char], from: usize) -> usize {
    let mut i = from;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// Consumes a parenthesized group starting at `start` plus its repeat suffix.
fn parenthesized_chunk_end(chars: &[char], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    i += 1;
                    break;
                }
            }
            _ => {}
        }
        i += 1;
    }

    if i < chars.len() && chars[i] == '^' {
        let end = skip_digits(chars, i + 1);
        if end > i + 1 {
            return end;
        }
        return i;
    }
    skip_digits(chars, i)
}

/// Splits a formula into display chunks that must not be broken across lines.
///
/// A parenthesized group with its repeat (`(R U)2`, `(R U)^3`) is one chunk;
/// everything else splits on whitespace and before `(`.
pub fn formula_display_chunks(formula: &str) -> Vec<String> {
    let chars: Vec<char> = normalize_formula_text(formula).chars().collect();
    let mut chunks = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        if chars[i] == '(' {
            i = parenthesized_chunk_end(&chars, i);
            let chunk = normalize_formula_text(&chars[start..i].iter().collect::<String>());
            if !chunk.is_empty() {
                chunks.push(chunk);
            }
            continue;
        }

        while i < chars.len() && !chars[i].is_whitespace() && chars[i] != '(' {
            i += 1;
        }
        chunks.push(chars[start..i].iter().collect());
    }

    chunks
}

/// Greedily wraps chunks into at most `max_lines` lines of `max_chars_per_line`.
///
/// A chunk longer than the limit gets a line of its own. Lines past `max_lines`
/// are folded into the last line.
///
/// # Errors
///
/// [`CubeError::Validation`] if either limit is zero.
pub fn wrap_formula_for_overlay(
    formula: &str,
    max_chars_per_line: usize,
    max_lines: usize,
) -> CubeResult<String> {
    if max_lines < 1 {
        return Err(CubeError::validation("max_lines must be >= 1"));
    }
    if max_chars_per_line < 1 {
        return Err(CubeError::validation("max_chars_per_line must be >= 1"));
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for chunk in formula_display_chunks(formula) {
        if current.is_empty() {
            current = chunk;
            continue;
        }
        let candidate_len = current.chars().count() + 1 + chunk.chars().count();
        if candidate_len <= max_chars_per_line {
            current.push(' ');
            current.push_str(&chunk);
        } else {
            lines.push(std::mem::replace(&mut current, chunk));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        let tail = lines.split_off(max_lines - 1).join(" ");
        lines.push(tail);
    }
    Ok(lines.join("\n"))
}

/// Builds a file-name friendly slug: `R U R' U'` -> `r_u_rp_up`.
///
/// Primes become `p`, whitespace runs `_`, other runs outside `[a-z0-9_]` a
/// single `-`. Truncated to `max_len` characters; never empty.
pub fn slugify_formula(formula: &str, max_len: usize) -> String {
    let text = formula.trim().to_lowercase().replace('\'', "p");
    let text = replace_runs(&text, char::is_whitespace, '_');
    let text = replace_runs(
        &text,
        |c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
        '-',
    );

    let is_separator = |c: char| c == '-' || c == '_';
    let slug = text.trim_matches(is_separator);
    if slug.is_empty() {
        return "formula".to_string();
    }
    if slug.chars().count() > max_len {
        let truncated: String = slug.chars().take(max_len).collect();
        return truncated.trim_end_matches(is_separator).to_string();
    }
    slug.to_string()
}

/// Replaces every maximal run of characters matching `pred` with one `with`.
fn replace_runs(text: &str, pred: impl Fn(char) -> bool, with: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if pred(c) {
            if !in_run {
                out.push(with);
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_formula_text("  R\tU \n R'  "), "R U R'");
        assert_eq!(normalize_formula_text("   "), "");
    }

    #[test]
    fn chunks_keep_parenthesized_groups_together() {
        assert_eq!(
            formula_display_chunks("R' F' (R U R' U') F (R U2 R')"),
            vec!["R'", "F'", "(R U R' U')", "F", "(R U2 R')"]
        );
        assert_eq!(
            formula_display_chunks("(R U)2 x (R U)^3 y"),
            vec!["(R U)2", "x", "(R U)^3", "y"]
        );
        assert_eq!(formula_display_chunks("R(U R')"), vec!["R", "(U R')"]);
    }

    #[test]
    fn overlay_wrap_never_breaks_groups() {
        let wrapped = wrap_formula_for_overlay("R' F' (R U R' U') F (R U2 R') U", 18, 2).unwrap();
        let lines: Vec<&str> = wrapped.lines().collect();
        assert!(lines.len() <= 2);
        for line in &lines {
            assert_eq!(line.matches('(').count(), line.matches(')').count(), "{line}");
        }
    }

    #[test]
    fn overlay_wrap_folds_surplus_into_last_line() {
        let wrapped = wrap_formula_for_overlay("R U R' U'", 1, 2).unwrap();
        assert_eq!(wrapped, "R\nU R' U'");
        assert_eq!(wrap_formula_for_overlay("", 10, 2).unwrap(), "");
        assert!(wrap_formula_for_overlay("R", 0, 2).is_err());
        assert!(wrap_formula_for_overlay("R", 10, 0).is_err());
    }

    #[test]
    fn slug_generation() {
        assert_eq!(slugify_formula("R U R' U'", DEFAULT_SLUG_MAX_LEN), "r_u_rp_up");
        assert_eq!(slugify_formula("(R U)2", DEFAULT_SLUG_MAX_LEN), "r_u-2");
        assert_eq!(slugify_formula(" ()' ", DEFAULT_SLUG_MAX_LEN), "p");
        assert_eq!(slugify_formula("()", DEFAULT_SLUG_MAX_LEN), "formula");
        assert_eq!(slugify_formula("R U R' U'", 4), "r_u");
    }
}
