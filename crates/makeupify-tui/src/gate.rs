//! In-terminal ad presentation.

use makeupify_core::ad_gate::Presenter;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Shows the "ad playing" overlay by raising a flag the renderer watches.
/// When disabled in config the overlay never opens and gated actions run
/// straight away.
pub struct OverlayPresenter {
    enabled: bool,
    showing: Arc<AtomicBool>,
}

impl OverlayPresenter {
    pub fn new(enabled: bool, showing: Arc<AtomicBool>) -> Self {
        Self { enabled, showing }
    }
}

impl Presenter for OverlayPresenter {
    fn open(&self) -> bool {
        if !self.enabled {
            return false;
        }
        debug!("Ad overlay opened");
        self.showing.store(true, Ordering::SeqCst);
        true
    }

    fn close(&self) {
        debug!("Ad overlay closed");
        self.showing.store(false, Ordering::SeqCst);
    }
}
