//! Test module for makeupify-core
//!
//! This module contains tests for:
//! - Wizard navigation, method configuration and the generate gate
//! - End-to-end makeover scenarios against a fake generator
//! - Stale and duplicate generation handling
//! - Configuration loading and defaults

// Test modules use exact float comparisons
#![allow(clippy::float_cmp)]

mod scenario_tests;
mod wizard_tests;
