pub mod acquire;
pub mod ad_gate;
pub mod catalog;
pub mod config;
pub mod generation;
pub mod preferences;
pub mod slider;
pub mod wizard;

mod error;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use wizard::{Effect, GenerationTicket, Session, WizardController};

pub use makeupify_types::*;
