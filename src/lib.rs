//! # cubist-core
//!
//! The cube-state engine behind a speedcubing case-card and video pipeline.
//!
//! It parses move formulas (`(R U R' U')2`, `Rw`, `M2`, `x'`), simulates the 54
//! facelets of a 3x3x3 cube, and derives the recognition data that case cards
//! show: which last-layer stickers are oriented (OLL) and how last-layer pieces
//! cycle (PLL). Everything is pure and synchronous; renderers, databases and
//! UIs consume the returned values.
//!
//! ```
//! use cubist_core::{build_pll_top_view_data, convert, invert_moves, resolve_valid_pll_start_state};
//!
//! let moves = convert("M2 U M U2 M' U M2", 1)?;
//! let state = resolve_valid_pll_start_state(&invert_moves(&moves));
//! let view = build_pll_top_view_data(&state)?;
//! assert_eq!(view.edge_arrows.len(), 3);
//! # Ok::<(), cubist_core::CubeError>(())
//! ```

pub mod error;
pub mod formula;
pub mod moves;
pub mod notation;
pub mod oll;
pub mod palette;
pub mod pll;
pub mod presets;
pub mod state;
pub mod top_view;

pub use error::*;
pub use formula::*;
pub use moves::*;
pub use notation::*;
pub use oll::*;
pub use palette::*;
pub use pll::*;
pub use presets::*;
pub use state::*;
pub use top_view::*;
