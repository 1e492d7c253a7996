//! OLL recognition: which last-layer stickers already show the U color.

use crate::error::{CubeError, CubeResult};
use crate::moves::Face;
use crate::state::{Facelets, describe_position};
use crate::top_view::TopView;

/// `true` where a sticker shows the U color (oriented).
pub type OllTopView = TopView<bool>;

/// Checks that only the last layer is unsolved: D is all `D` and every side
/// sticker below the top layer shows its own face letter.
///
/// # Errors
///
/// [`CubeError::Validation`] naming the first offending sticker.
pub fn validate_oll_f2l_start_state(state: &str) -> CubeResult<()> {
    let facelets = Facelets::parse(state)?;

    for (index, slot, color) in facelets.iter() {
        if slot.face == Face::D && color != Face::D {
            return Err(CubeError::validation(format!(
                "Invalid OLL start state: D face must be solved, but index {index} at {} is {color}",
                describe_position(slot.position)
            )));
        }

        let is_side = Face::SIDES.contains(&slot.face);
        if is_side && slot.position.z != 1 && color != slot.face {
            return Err(CubeError::validation(format!(
                "Invalid OLL start state: F2L must be solved, but {} face index {index} at {} is {color}",
                slot.face,
                describe_position(slot.position)
            )));
        }
    }

    Ok(())
}

/// Builds the oriented/unoriented map of the last layer as seen from above.
pub fn build_oll_top_view_data(state: &str) -> CubeResult<OllTopView> {
    let facelets = Facelets::parse(state)?;
    Ok(TopView::read(&facelets)?.map(|color| color == Face::U))
}
