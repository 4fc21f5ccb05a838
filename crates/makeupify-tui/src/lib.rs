//! Terminal widgets for the Makeupify wizard.
//!
//! This crate provides the ratatui widgets the makeover wizard draws with:
//! half-block image rendering with a before/after split, chips for presets
//! and tags, and the divider readout bar.

pub mod widgets;
