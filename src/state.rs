//! Facelet simulator: 54 oriented stickers turned by moves, read out as a state string.
//!
//! A state string has one character per sticker, U face first, then R, F, D, L, B.
//! Each face is read row by row as seen from outside the cube: side faces with U
//! up, U with B up, D with F up.

use crate::error::{CubeError, CubeResult};
use crate::moves::{Face, Move};
use glam::{IVec3, Quat};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::f32::consts::FRAC_PI_2;
use std::sync::LazyLock;

/// Number of visible stickers on a 3x3x3 cube.
pub const FACELET_COUNT: usize = 54;

/// A sticker position in state-string order: the cubie it sits on and the face it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceletSlot {
    pub position: IVec3,
    pub face: Face,
}

static SLOTS: LazyLock<Vec<FaceletSlot>> = LazyLock::new(|| {
    let mut slots = Vec::with_capacity(FACELET_COUNT);
    for face in Face::ALL {
        for row in 0..3 {
            for col in 0..3 {
                slots.push(FaceletSlot {
                    position: slot_position(face, row, col),
                    face,
                });
            }
        }
    }
    slots
});

static SLOT_INDEX: LazyLock<HashMap<(IVec3, Face), usize>> = LazyLock::new(|| {
    SLOTS
        .iter()
        .enumerate()
        .map(|(index, slot)| ((slot.position, slot.face), index))
        .collect()
});

/// Cubie position of the sticker at `row`, `col` (each `0..3`) of `face`.
fn slot_position(face: Face, row: i32, col: i32) -> IVec3 {
    match face {
        Face::U => IVec3::new(1 - row, 1 - col, 1),
        Face::R => IVec3::new(col - 1, -1, 1 - row),
        Face::F => IVec3::new(-1, 1 - col, 1 - row),
        Face::D => IVec3::new(row - 1, 1 - col, -1),
        Face::L => IVec3::new(1 - col, 1, 1 - row),
        Face::B => IVec3::new(1, col - 1, 1 - row),
    }
}

/// Slots in state-string order. Index `i` describes character `i` of every state string.
pub fn state_slots_metadata() -> &'static [FaceletSlot] {
    &SLOTS
}

fn slot_index(position: IVec3, face: Face) -> Option<usize> {
    SLOT_INDEX.get(&(position, face)).copied()
}

/// The state string of a solved cube.
pub fn solved_state_string() -> String {
    Face::ALL
        .iter()
        .flat_map(|face| std::iter::repeat_n(face.as_char(), 9))
        .collect()
}

/// Applies `moves` in order to a solved cube and returns the resulting state string.
pub fn state_string_from_moves(moves: &[Move]) -> String {
    let mut cube = StickerCube::solved();
    cube.apply_all(moves);
    cube.state_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Sticker {
    position: IVec3,
    normal: IVec3,
    /// Face this sticker started on, i.e. its color.
    color: Face,
}

/// The 54 stickers of one cube, turned in place.
#[derive(Clone, Debug)]
pub struct StickerCube {
    stickers: Vec<Sticker>,
}

impl Default for StickerCube {
    fn default() -> Self {
        Self::solved()
    }
}

impl StickerCube {
    pub fn solved() -> Self {
        let mut stickers = Vec::with_capacity(FACELET_COUNT);
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    let position = IVec3::new(x, y, z);
                    for face in Face::ALL {
                        // The sticker exists when the cubie lies in the face's outer layer.
                        if position.dot(face.normal()) == 1 {
                            stickers.push(Sticker {
                                position,
                                normal: face.normal(),
                                color: face,
                            });
                        }
                    }
                }
            }
        }
        Self { stickers }
    }

    /// Turns the layers selected by `mv`, one quarter turn at a time.
    pub fn apply(&mut self, mv: Move) {
        let turns = mv.quarter_turns();
        if turns == 0 {
            return;
        }

        let axis = mv.base.axis();
        let rotation = Quat::from_axis_angle(axis.unit(), turns.signum() as f32 * FRAC_PI_2);

        for _ in 0..turns.unsigned_abs() {
            for sticker in &mut self.stickers {
                if mv.base.selects(sticker.position) {
                    sticker.position = quarter_turn(rotation, sticker.position);
                    sticker.normal = quarter_turn(rotation, sticker.normal);
                }
            }
        }
    }

    pub fn apply_all(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// Reads the sticker colors out in state-string order.
    pub fn state_string(&self) -> String {
        let mut facelets = ['?'; FACELET_COUNT];
        for sticker in &self.stickers {
            let index = Face::from_normal(sticker.normal)
                .and_then(|face| slot_index(sticker.position, face));
            if let Some(index) = index {
                facelets[index] = sticker.color.as_char();
            }
        }
        debug_assert!(
            !facelets.contains(&'?'),
            "every slot must be covered by a sticker"
        );
        facelets.iter().collect()
    }
}

/// Rotates an integer lattice vector and snaps it back onto the lattice.
fn quarter_turn(rotation: Quat, v: IVec3) -> IVec3 {
    (rotation * v.as_vec3()).round().as_ivec3()
}

pub(crate) fn describe_position(p: IVec3) -> String {
    format!("(x={}, y={}, z={})", p.x, p.y, p.z)
}

/// A validated state string with lookups by slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Facelets {
    colors: Vec<Face>,
}

impl Facelets {
    /// Validates length and alphabet of `state`.
    ///
    /// # Errors
    ///
    /// [`CubeError::Validation`] unless `state` is exactly 54 characters from `URFDLB`.
    pub fn parse(state: &str) -> CubeResult<Self> {
        let count = state.chars().count();
        if count != FACELET_COUNT {
            return Err(CubeError::validation(format!(
                "State must contain exactly {FACELET_COUNT} facelets, got {count}"
            )));
        }

        let colors: Option<Vec<Face>> = state.chars().map(Face::from_char).collect();
        let Some(colors) = colors else {
            let seen: BTreeSet<char> = state.chars().collect();
            return Err(CubeError::validation(format!(
                "State must contain only face colors URFDLB (got: {})",
                seen.into_iter().collect::<String>()
            )));
        };
        Ok(Self { colors })
    }

    /// Every facelet with its index and slot, in state-string order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, FaceletSlot, Face)> + '_ {
        SLOTS
            .iter()
            .zip(&self.colors)
            .enumerate()
            .map(|(index, (&slot, &color))| (index, slot, color))
    }

    /// Color of the `face` sticker on the cubie at `position`.
    pub fn color_at(&self, face: Face, position: IVec3) -> CubeResult<Face> {
        slot_index(position, face)
            .and_then(|index| self.colors.get(index).copied())
            .ok_or_else(|| {
                CubeError::validation(format!(
                    "no {face} facelet at {}",
                    describe_position(position)
                ))
            })
    }

    /// Color currently shown by the center sticker of `face`.
    pub fn center(&self, face: Face) -> CubeResult<Face> {
        self.color_at(face, face.normal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_cover_every_sticker_once() {
        let slots = state_slots_metadata();
        assert_eq!(slots.len(), FACELET_COUNT);
        let unique: std::collections::HashSet<_> = slots.iter().collect();
        assert_eq!(unique.len(), FACELET_COUNT);
        for slot in slots {
            assert_eq!(slot.position.dot(slot.face.normal()), 1, "{slot:?}");
        }
    }

    #[test]
    fn slot_order_follows_face_reading_order() {
        let slots = state_slots_metadata();
        assert_eq!(slots[0].position, IVec3::new(1, 1, 1));
        assert_eq!(slots[8].position, IVec3::new(-1, -1, 1));
        assert_eq!(slots[9], FaceletSlot { position: IVec3::new(-1, -1, 1), face: Face::R });
        assert_eq!(slots[22], FaceletSlot { position: IVec3::NEG_X, face: Face::F });
        assert_eq!(slots[27].position, IVec3::new(-1, 1, -1));
        assert_eq!(slots[53], FaceletSlot { position: IVec3::new(1, 1, -1), face: Face::B });
    }

    #[test]
    fn solved_cube_reads_as_solved_string() {
        assert_eq!(StickerCube::solved().state_string(), solved_state_string());
    }

    #[test]
    fn every_slot_is_filled_after_mixed_moves() {
        let mut cube = StickerCube::solved();
        for text in ["r", "M'", "x", "E2", "b'", "S", "z'"] {
            cube.apply(text.parse().unwrap());
        }
        let state = cube.state_string();
        assert_eq!(state.chars().count(), FACELET_COUNT);
        assert!(Facelets::parse(&state).is_ok(), "{state}");
    }

    #[test]
    fn quarter_turn_stays_on_lattice() {
        let rotation = Quat::from_axis_angle(glam::Vec3::Z, FRAC_PI_2);
        assert_eq!(quarter_turn(rotation, IVec3::new(1, 0, 1)), IVec3::new(0, 1, 1));
        assert_eq!(quarter_turn(rotation, IVec3::new(1, -1, 0)), IVec3::new(1, 1, 0));
    }

    #[test]
    fn facelets_reject_bad_input() {
        assert!(Facelets::parse("UUU").is_err());
        let mut state = solved_state_string();
        state.replace_range(0..1, "X");
        let err = Facelets::parse(&state).unwrap_err();
        assert!(err.to_string().contains("only face colors"));
    }

    #[test]
    fn facelets_expose_centers() {
        let facelets = Facelets::parse(&solved_state_string()).unwrap();
        for face in Face::ALL {
            assert_eq!(facelets.center(face).unwrap(), face);
        }
    }
}
