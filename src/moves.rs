//! Move notation: faces, turn bases, modifiers and their geometry.
//!
//! The cube frame used everywhere in this crate is right-handed with `+x`
//! pointing toward the B face, `+y` toward L and `+z` toward U. Cubie
//! coordinates are in `{-1, 0, 1}` on every axis.

use crate::error::{CubeError, CubeResult};
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

/// One of the six faces, also used as a sticker color (the color a face shows when solved).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    /// Canonical facelet order of a state string.
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// The four faces around the U/D axis.
    pub const SIDES: [Face; 4] = [Face::F, Face::R, Face::B, Face::L];

    pub fn as_char(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    /// Outward unit normal of the face. Also the position of its center cubie.
    pub fn normal(self) -> IVec3 {
        match self {
            Face::U => IVec3::Z,
            Face::R => IVec3::NEG_Y,
            Face::F => IVec3::NEG_X,
            Face::D => IVec3::NEG_Z,
            Face::L => IVec3::Y,
            Face::B => IVec3::X,
        }
    }

    pub fn from_normal(normal: IVec3) -> Option<Self> {
        Face::ALL.into_iter().find(|face| face.normal() == normal)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A principal axis of the cube frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// The coordinate of `v` along this axis.
    pub fn component(self, v: IVec3) -> i32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// The letter part of a move: outer face, slice, whole-cube rotation or wide turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveBase {
    // --- Outer faces ---
    U,
    R,
    F,
    D,
    L,
    B,

    // --- Middle slices ---
    M,
    E,
    S,

    // --- Whole-cube rotations (`x`, `y`, `z`) ---
    X,
    Y,
    Z,

    // --- Wide turns (`u`, `r`, ... or `Uw`, `Rw`, ...) ---
    Uw,
    Rw,
    Fw,
    Dw,
    Lw,
    Bw,
}

impl MoveBase {
    /// Parses the canonical single-character spelling.
    pub fn from_char(c: char) -> Option<Self> {
        let base = match c {
            'U' => MoveBase::U,
            'R' => MoveBase::R,
            'F' => MoveBase::F,
            'D' => MoveBase::D,
            'L' => MoveBase::L,
            'B' => MoveBase::B,
            'M' => MoveBase::M,
            'E' => MoveBase::E,
            'S' => MoveBase::S,
            'x' => MoveBase::X,
            'y' => MoveBase::Y,
            'z' => MoveBase::Z,
            'u' => MoveBase::Uw,
            'r' => MoveBase::Rw,
            'f' => MoveBase::Fw,
            'd' => MoveBase::Dw,
            'l' => MoveBase::Lw,
            'b' => MoveBase::Bw,
            _ => return None,
        };
        Some(base)
    }

    pub fn as_char(self) -> char {
        match self {
            MoveBase::U => 'U',
            MoveBase::R => 'R',
            MoveBase::F => 'F',
            MoveBase::D => 'D',
            MoveBase::L => 'L',
            MoveBase::B => 'B',
            MoveBase::M => 'M',
            MoveBase::E => 'E',
            MoveBase::S => 'S',
            MoveBase::X => 'x',
            MoveBase::Y => 'y',
            MoveBase::Z => 'z',
            MoveBase::Uw => 'u',
            MoveBase::Rw => 'r',
            MoveBase::Fw => 'f',
            MoveBase::Dw => 'd',
            MoveBase::Lw => 'l',
            MoveBase::Bw => 'b',
        }
    }

    /// Axis the selected layers turn around.
    pub fn axis(self) -> Axis {
        use MoveBase::*;
        match self {
            F | B | S | Fw | Bw | Z => Axis::X,
            L | R | M | Lw | Rw | X => Axis::Y,
            U | D | E | Uw | Dw | Y => Axis::Z,
        }
    }

    /// Layers (coordinates along [`axis`](Self::axis)) that a move of this base turns.
    pub fn layers(self) -> &'static [i32] {
        use MoveBase::*;
        match self {
            U | L | B => &[1],
            D | R | F => &[-1],
            M | E | S => &[0],
            Uw | Lw | Bw => &[0, 1],
            Dw | Rw | Fw => &[-1, 0],
            X | Y | Z => &[-1, 0, 1],
        }
    }

    /// `+1` when the plain move is a right-handed quarter turn about `+axis`, `-1` otherwise.
    pub fn direction(self) -> i32 {
        use MoveBase::*;
        match self {
            R | F | D | E | S | Rw | Fw | Dw | X | Z => 1,
            U | L | B | M | Uw | Lw | Bw | Y => -1,
        }
    }

    pub fn is_rotation(self) -> bool {
        matches!(self, MoveBase::X | MoveBase::Y | MoveBase::Z)
    }

    /// Whether a sticker at `position` is carried along by this base.
    pub fn selects(self, position: IVec3) -> bool {
        self.layers().contains(&self.axis().component(position))
    }
}

/// Turn amount written after the base.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Quarter turn in the base's conventional direction.
    #[default]
    None,
    /// `'` - quarter turn the other way.
    Prime,
    /// `2` - half turn, its own inverse.
    Double,
}

impl Modifier {
    pub fn suffix(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Prime => "'",
            Modifier::Double => "2",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Modifier::None),
            "'" => Some(Modifier::Prime),
            "2" => Some(Modifier::Double),
            _ => None,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Modifier::None => Modifier::Prime,
            Modifier::Prime => Modifier::None,
            Modifier::Double => Modifier::Double,
        }
    }
}

/// A single move in canonical notation, e.g. `R`, `u'`, `x2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub base: MoveBase,
    pub modifier: Modifier,
}

/// Moves animated together as one beat. The simulator applies them in order.
pub type MoveStep = Vec<Move>;

impl Move {
    pub const fn new(base: MoveBase, modifier: Modifier) -> Self {
        Self { base, modifier }
    }

    pub fn inverse(self) -> Self {
        Self {
            base: self.base,
            modifier: self.modifier.inverse(),
        }
    }

    pub fn is_rotation(self) -> bool {
        self.base.is_rotation()
    }

    /// Signed number of right-handed quarter turns about the base's axis.
    pub fn quarter_turns(self) -> i32 {
        let direction = self.base.direction();
        match self.modifier {
            Modifier::None => direction,
            Modifier::Prime => -direction,
            Modifier::Double => 2 * direction,
        }
    }

    /// Rotation axis and signed angle in radians, for animating the move.
    pub fn axis_angle(self) -> (Vec3, f32) {
        (
            self.base.axis().unit(),
            self.quarter_turns() as f32 * FRAC_PI_2,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base.as_char(), self.modifier.suffix())
    }
}

impl FromStr for Move {
    type Err = CubeError;

    /// Parses canonical notation only (`r`, not `Rw`); use the formula parser for free text.
    fn from_str(s: &str) -> CubeResult<Self> {
        let mut chars = s.chars();
        let base = chars
            .next()
            .and_then(MoveBase::from_char)
            .ok_or_else(|| CubeError::invalid_move(format!("unsupported move '{s}'")))?;
        let modifier = Modifier::from_suffix(chars.as_str())
            .ok_or_else(|| CubeError::invalid_move(format!("unsupported move modifier in '{s}'")))?;
        Ok(Self { base, modifier })
    }
}

/// Parses a list of canonical move strings.
pub fn moves_from_strs<I, S>(moves: I) -> CubeResult<Vec<Move>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    moves.into_iter().map(|m| m.as_ref().parse()).collect()
}

/// Space-separated canonical notation.
pub fn join_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
