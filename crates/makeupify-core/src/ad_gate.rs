//! Ad interstitial: open a transient presentation, wait, then run the
//! deferred action.
//!
//! The gate is fire-and-forget for the caller. If the presentation opens, the
//! continuation runs once after the dwell time; if it cannot open, the
//! continuation runs immediately. Either way it runs exactly once.

use makeupify_types::PendingAction;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Something that can show the "watching an ad" presentation
pub trait Presenter: Send + Sync {
    /// Returns false when the presentation cannot be shown
    fn open(&self) -> bool;
    fn close(&self);
}

/// One-shot timer
pub trait Timer: Send + Sync {
    fn schedule(&self, after: Duration, fire: Box<dyn FnOnce() + Send>);
}

/// Timer backed by a spawned tokio task. Must be used inside a runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn schedule(&self, after: Duration, fire: Box<dyn FnOnce() + Send>) {
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            fire();
        });
    }
}

/// How the gate resolved when shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdOutcome {
    /// Presentation is open; continuation fires after the dwell time
    Scheduled,
    /// Presentation could not open; continuation already ran
    Immediate,
}

pub type Continuation = Box<dyn FnOnce(PendingAction) + Send>;

#[derive(Clone)]
pub struct AdGate {
    presenter: Arc<dyn Presenter>,
    timer: Arc<dyn Timer>,
    dwell: Duration,
}

impl AdGate {
    pub fn new(presenter: Arc<dyn Presenter>, timer: Arc<dyn Timer>, dwell: Duration) -> Self {
        Self {
            presenter,
            timer,
            dwell,
        }
    }

    #[must_use]
    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Show the interstitial for `action` and hand it to `continuation` when done.
    pub fn show(&self, action: PendingAction, continuation: Continuation) -> AdOutcome {
        if !self.presenter.open() {
            info!("Ad presentation unavailable, continuing with {action:?}");
            continuation(action);
            return AdOutcome::Immediate;
        }

        debug!("Ad presentation open for {:?} ({action:?})", self.dwell);
        let presenter = Arc::clone(&self.presenter);
        self.timer.schedule(
            self.dwell,
            Box::new(move || {
                presenter.close();
                continuation(action);
            }),
        );
        AdOutcome::Scheduled
    }
}
