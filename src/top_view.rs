//! Top-down screen layout shared by the OLL and PLL views.
//!
//! The camera looks down at U with B at the top of the screen, F at the bottom,
//! L on the left and R on the right. Grid cells are `(row, col)`.

use crate::error::CubeResult;
use crate::moves::Face;
use crate::state::Facelets;
use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Cubie `x` for each screen row (B to F).
const ROW_X: [i32; 3] = [1, 0, -1];
/// Cubie `y` for each screen column (L to R).
const COL_Y: [i32; 3] = [1, 0, -1];

/// The U face grid plus the top-layer stickers of the four side faces.
///
/// Side strips run left-to-right for B and F, top-to-bottom for R and L.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopView<T> {
    pub u_grid: [[T; 3]; 3],
    pub top_b: [T; 3],
    pub right_r: [T; 3],
    pub bottom_f: [T; 3],
    pub left_l: [T; 3],
}

impl TopView<Face> {
    pub(crate) fn read(facelets: &Facelets) -> CubeResult<Self> {
        let mut view = TopView {
            u_grid: [[Face::U; 3]; 3],
            top_b: [Face::B; 3],
            right_r: [Face::R; 3],
            bottom_f: [Face::F; 3],
            left_l: [Face::L; 3],
        };

        for (row, &x) in ROW_X.iter().enumerate() {
            for (col, &y) in COL_Y.iter().enumerate() {
                view.u_grid[row][col] = facelets.color_at(Face::U, IVec3::new(x, y, 1))?;
            }
        }
        for (i, &y) in COL_Y.iter().enumerate() {
            view.top_b[i] = facelets.color_at(Face::B, IVec3::new(1, y, 1))?;
            view.bottom_f[i] = facelets.color_at(Face::F, IVec3::new(-1, y, 1))?;
        }
        for (i, &x) in ROW_X.iter().enumerate() {
            view.right_r[i] = facelets.color_at(Face::R, IVec3::new(x, -1, 1))?;
            view.left_l[i] = facelets.color_at(Face::L, IVec3::new(x, 1, 1))?;
        }

        Ok(view)
    }
}

impl<T: Copy> TopView<T> {
    pub fn map<V>(self, f: impl Fn(T) -> V) -> TopView<V> {
        TopView {
            u_grid: self.u_grid.map(|row| row.map(&f)),
            top_b: self.top_b.map(&f),
            right_r: self.right_r.map(&f),
            bottom_f: self.bottom_f.map(&f),
            left_l: self.left_l.map(&f),
        }
    }

    /// Side strips in screen order: top, right, bottom, left.
    pub fn sides(&self) -> [[T; 3]; 4] {
        [self.top_b, self.right_r, self.bottom_f, self.left_l]
    }
}

/// Grid cell of a top-layer cubie.
pub(crate) fn grid_cell(position: IVec3) -> (usize, usize) {
    ((1 - position.x) as usize, (1 - position.y) as usize)
}
