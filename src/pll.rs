//! PLL recognition: top-layer colors plus arrows showing how pieces cycle.
//!
//! Pieces are identified relative to the side centers, so a state that is solved
//! apart from a whole-cube rotation about U/D still reads correctly.

use crate::error::{CubeError, CubeResult};
use crate::formula::convert_steps;
use crate::moves::{Face, Modifier, Move, MoveBase};
use crate::notation::normalize_formula_text;
use crate::state::{Facelets, describe_position, solved_state_string, state_string_from_moves};
use crate::top_view::{TopView, grid_cell};
use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::LazyLock;

/// Order of the cube's rotation group.
pub const ROTATION_GROUP_ORDER: usize = 24;

/// Top-layer corners in canonical order (BL, BR, FR, FL on screen).
const CORNER_POSITIONS: [IVec3; 4] = [
    IVec3::new(1, 1, 1),
    IVec3::new(1, -1, 1),
    IVec3::new(-1, -1, 1),
    IVec3::new(-1, 1, 1),
];

/// Top-layer edges in canonical order (B, R, F, L).
const EDGE_POSITIONS: [IVec3; 4] = [
    IVec3::new(1, 0, 1),
    IVec3::new(0, -1, 1),
    IVec3::new(-1, 0, 1),
    IVec3::new(0, 1, 1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Corner,
    Edge,
}

/// An arrow between two grid cells of the top view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PllArrow {
    pub start: (usize, usize),
    pub end: (usize, usize),
    /// Two-way arrow for a swap; otherwise the piece at `start` moves to `end`.
    pub bidirectional: bool,
    pub piece_type: PieceType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PllTopView {
    #[serde(flatten)]
    pub colors: TopView<Face>,
    pub corner_arrows: Vec<PllArrow>,
    pub edge_arrows: Vec<PllArrow>,
}

/// Checks that U and D are solved and every side sticker below the top layer
/// matches that side's center.
///
/// # Errors
///
/// [`CubeError::Validation`] naming the first offending sticker.
pub fn validate_pll_start_state(state: &str) -> CubeResult<()> {
    let facelets = Facelets::parse(state)?;

    for (index, slot, color) in facelets.iter() {
        if matches!(slot.face, Face::U | Face::D) && color != slot.face {
            return Err(CubeError::validation(format!(
                "Invalid PLL start state: {} face must be solved, but index {index} at {} is {color}",
                slot.face,
                describe_position(slot.position)
            )));
        }

        if Face::SIDES.contains(&slot.face) && slot.position.z != 1 {
            let center = facelets.center(slot.face)?;
            if color != center {
                return Err(CubeError::validation(format!(
                    "Invalid PLL start state: F2L must match side centers, but {} face index {index} at {} is {color} (expected {center})",
                    slot.face,
                    describe_position(slot.position)
                )));
            }
        }
    }

    Ok(())
}

static ORIENTATION_CORRECTIONS: LazyLock<Vec<Vec<Move>>> = LazyLock::new(|| {
    let rotations = [MoveBase::X, MoveBase::Y, MoveBase::Z]
        .into_iter()
        .flat_map(|base| {
            [
                Move::new(base, Modifier::None),
                Move::new(base, Modifier::Prime),
            ]
        })
        .collect::<Vec<_>>();

    let mut queue: VecDeque<Vec<Move>> = VecDeque::from([Vec::new()]);
    let mut seen: HashSet<String> = HashSet::from([solved_state_string()]);
    let mut sequences: Vec<Vec<Move>> = vec![Vec::new()];

    'search: while let Some(current) = queue.pop_front() {
        for &rotation in &rotations {
            if seen.len() >= ROTATION_GROUP_ORDER {
                break 'search;
            }
            let mut candidate = current.clone();
            candidate.push(rotation);
            if !seen.insert(state_string_from_moves(&candidate)) {
                continue;
            }
            sequences.push(candidate.clone());
            queue.push_back(candidate);
        }
    }

    sequences.sort_by_key(Vec::len);
    tracing::debug!(count = sequences.len(), "built orientation corrections");
    sequences
});

/// Whole-cube rotation sequences reaching each of the 24 orientations, shortest first.
///
/// The first entry is the empty sequence.
pub fn orientation_corrections() -> &'static [Vec<Move>] {
    &ORIENTATION_CORRECTIONS
}

/// Simulates `inverse_moves` and, if needed, re-orients the cube so the result
/// passes [`validate_pll_start_state`].
///
/// Each correction is tried appended, then each prepended. If none validates the
/// uncorrected state is returned.
#[tracing::instrument(skip(inverse_moves), fields(moves = inverse_moves.len()))]
pub fn resolve_valid_pll_start_state(inverse_moves: &[Move]) -> String {
    let corrections = orientation_corrections();

    for correction in corrections {
        let moves: Vec<Move> = inverse_moves.iter().chain(correction).copied().collect();
        let state = state_string_from_moves(&moves);
        if validate_pll_start_state(&state).is_ok() {
            tracing::debug!(correction = ?correction, "appended orientation correction");
            return state;
        }
    }
    for correction in corrections {
        let moves: Vec<Move> = correction.iter().chain(inverse_moves).copied().collect();
        let state = state_string_from_moves(&moves);
        if validate_pll_start_state(&state).is_ok() {
            tracing::debug!(correction = ?correction, "prepended orientation correction");
            return state;
        }
    }

    tracing::warn!("no orientation correction yields a valid PLL start state");
    state_string_from_moves(inverse_moves)
}

/// Appends the shortest rotation suffix that undoes the formula's net cube rotation.
///
/// Whitespace is normalized. Formulas without rotations, or whose rotations
/// already cancel, come back unchanged.
///
/// # Errors
///
/// [`CubeError::Syntax`] if the formula does not parse.
#[tracing::instrument]
pub fn balance_pll_formula_rotations(formula: &str) -> CubeResult<String> {
    let normalized = normalize_formula_text(formula);
    if normalized.is_empty() {
        return Ok(normalized);
    }

    let rotations: Vec<Move> = convert_steps(&normalized, 1)?
        .into_iter()
        .flatten()
        .filter(|m| m.is_rotation())
        .collect();
    if rotations.is_empty() {
        return Ok(normalized);
    }

    let solved = solved_state_string();
    for correction in orientation_corrections() {
        let moves: Vec<Move> = rotations.iter().chain(correction).copied().collect();
        if state_string_from_moves(&moves) == solved {
            if correction.is_empty() {
                return Ok(normalized);
            }
            let suffix: Vec<String> = correction.iter().map(ToString::to_string).collect();
            return Ok(format!("{normalized} {}", suffix.join(" ")));
        }
    }

    Ok(normalized)
}

/// Side faces a top-layer cubie touches.
fn touching_sides(position: IVec3) -> impl Iterator<Item = Face> {
    [
        (position.x == -1, Face::F),
        (position.x == 1, Face::B),
        (position.y == -1, Face::R),
        (position.y == 1, Face::L),
    ]
    .into_iter()
    .filter_map(|(touches, face)| touches.then_some(face))
}

fn solved_signature(position: IVec3) -> Vec<Face> {
    let mut sides: Vec<Face> = touching_sides(position).collect();
    sides.sort();
    sides
}

/// Which sides the piece currently at `position` belongs to, judged by the centers.
fn current_signature(
    facelets: &Facelets,
    position: IVec3,
    color_to_side: &HashMap<Face, Face>,
) -> CubeResult<Vec<Face>> {
    let mut sides = Vec::with_capacity(2);
    for face in touching_sides(position) {
        let color = facelets.color_at(face, position)?;
        let side = color_to_side.get(&color).ok_or_else(|| {
            CubeError::validation(format!(
                "Invalid PLL start state: {face} sticker at {} is {color}, which is not a side center color",
                describe_position(position)
            ))
        })?;
        sides.push(*side);
    }
    sides.sort();
    Ok(sides)
}

/// `permutation[i] = j`: the piece at `positions[i]` belongs at `positions[j]`.
fn permutation_for_positions(
    facelets: &Facelets,
    positions: &[IVec3],
    color_to_side: &HashMap<Face, Face>,
) -> CubeResult<Vec<usize>> {
    let solved: Vec<Vec<Face>> = positions.iter().map(|&p| solved_signature(p)).collect();

    let mut permutation = Vec::with_capacity(positions.len());
    for &position in positions {
        let signature = current_signature(facelets, position, color_to_side)?;
        let target = solved.iter().position(|s| *s == signature).ok_or_else(|| {
            CubeError::validation(format!(
                "Invalid PLL start state: piece at {} matches no top-layer slot",
                describe_position(position)
            ))
        })?;
        permutation.push(target);
    }

    let distinct: HashSet<usize> = permutation.iter().copied().collect();
    if distinct.len() != permutation.len() {
        return Err(CubeError::validation(
            "Invalid PLL start state: top-layer pieces are duplicated",
        ));
    }
    Ok(permutation)
}

/// Disjoint cycles of a permutation, fixed points dropped. Each cycle starts at
/// its lowest index, cycles ordered by that start.
pub(crate) fn cycles_from_permutation(permutation: &[usize]) -> Vec<Vec<usize>> {
    let mut visited = vec![false; permutation.len()];
    let mut cycles = Vec::new();

    for start in 0..permutation.len() {
        if visited[start] || permutation[start] == start {
            continue;
        }
        let mut cycle = vec![start];
        visited[start] = true;
        let mut current = permutation[start];
        while current != start {
            visited[current] = true;
            cycle.push(current);
            current = permutation[current];
        }
        cycles.push(cycle);
    }

    cycles
}

fn arrows_from_cycles(
    cycles: &[Vec<usize>],
    positions: &[IVec3],
    piece_type: PieceType,
) -> Vec<PllArrow> {
    let cell = |index: usize| grid_cell(positions[index]);
    let mut arrows = Vec::new();

    for cycle in cycles {
        if let [a, b] = cycle.as_slice() {
            arrows.push(PllArrow {
                start: cell(*a),
                end: cell(*b),
                bidirectional: true,
                piece_type,
            });
            continue;
        }

        for (i, &from) in cycle.iter().enumerate() {
            let to = cycle[(i + 1) % cycle.len()];
            arrows.push(PllArrow {
                start: cell(from),
                end: cell(to),
                bidirectional: false,
                piece_type,
            });
        }
    }

    arrows
}

fn arrows_for(
    facelets: &Facelets,
    positions: &[IVec3],
    color_to_side: &HashMap<Face, Face>,
    piece_type: PieceType,
) -> CubeResult<Vec<PllArrow>> {
    let permutation = permutation_for_positions(facelets, positions, color_to_side)?;
    let cycles = cycles_from_permutation(&permutation);
    Ok(arrows_from_cycles(&cycles, positions, piece_type))
}

/// Builds the colored top view and the corner/edge cycle arrows.
///
/// # Errors
///
/// [`CubeError::Validation`] for malformed states, duplicate side centers, or
/// top-layer stickers that do not belong to any side.
pub fn build_pll_top_view_data(state: &str) -> CubeResult<PllTopView> {
    let facelets = Facelets::parse(state)?;

    let mut color_to_side = HashMap::new();
    for side in Face::SIDES {
        color_to_side.insert(facelets.center(side)?, side);
    }
    if color_to_side.len() != Face::SIDES.len() {
        return Err(CubeError::validation(
            "Invalid PLL start state: side center colors must be unique",
        ));
    }

    Ok(PllTopView {
        colors: TopView::read(&facelets)?,
        corner_arrows: arrows_for(
            &facelets,
            &CORNER_POSITIONS,
            &color_to_side,
            PieceType::Corner,
        )?,
        edge_arrows: arrows_for(&facelets, &EDGE_POSITIONS, &color_to_side, PieceType::Edge)?,
    })
}
