//! TUI widgets for makeupify-tui.
//!
//! # Widgets in Use
//!
//! - [`Picture`] - Half-block image, optionally split into before/after
//! - [`render_chip`] - Selectable chip for presets, tags and method tabs
//! - [`DividerBar`] - Readout of the comparison divider position
//!
//! # Utilities
//!
//! - [`fit_to_cells`] - Scale an image to fit a cell area
//! - [`picture_rect`] - Where a fitted image lands inside an area

mod chip;
mod picture;
mod slider;

pub use chip::{ChipStyle, render_chip};
pub use picture::{Picture, fit_to_cells, picture_rect};
pub use slider::DividerBar;
