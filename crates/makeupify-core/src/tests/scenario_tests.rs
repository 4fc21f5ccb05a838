//! End-to-end makeover flows
//!
//! Drives the controller through the ad gate and a fake generator the same
//! way the terminal front end does: accept the prompt, wait for the gate to
//! resolve, dispatch the action, run the ticket and feed the outcome back.

use super::fixtures::{
    FakeGenerator, controller_at_method, controller_with_prompt, photo, result_image,
};
use crate::ad_gate::{AdGate, AdOutcome, Presenter, TokioTimer};
use crate::generation::GenerationError;
use crate::wizard::{Effect, WizardController};
use makeupify_types::{Gender, MakeupMethod, PendingAction, Step};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

struct Overlay {
    available: bool,
    showing: AtomicBool,
}

impl Overlay {
    fn new(available: bool) -> Arc<Self> {
        Arc::new(Self {
            available,
            showing: AtomicBool::new(false),
        })
    }
}

impl Presenter for Overlay {
    fn open(&self) -> bool {
        if self.available {
            self.showing.store(true, Ordering::SeqCst);
        }
        self.available
    }

    fn close(&self) {
        self.showing.store(false, Ordering::SeqCst);
    }
}

/// Accept the pending prompt, wait for the gate, and run whatever it dispatches.
async fn accept_and_run(
    wizard: &mut WizardController,
    gate: &AdGate,
    generator: &FakeGenerator,
) -> Option<Effect> {
    let action = wizard.accept_ad()?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    gate.show(
        action,
        Box::new(move |a| {
            let _ = tx.send(a);
        }),
    );
    let resolved = rx.recv().await?;
    let effect = wizard.dispatch(resolved)?;
    if let Effect::Generate(ticket) = &effect {
        let (seq, outcome) = ticket.clone().run(generator).await;
        wizard.complete_generation(seq, outcome);
    }
    Some(effect)
}

fn gate(overlay: Arc<Overlay>) -> AdGate {
    AdGate::new(overlay, Arc::new(TokioTimer), Duration::from_secs(5))
}

#[tokio::test(start_paused = true)]
async fn test_preset_flow_sends_preset_prompt() {
    let mut wizard = WizardController::new();
    wizard.image_acquired(photo());
    wizard.select_gender(Gender::Female);
    wizard.select_method(MakeupMethod::Preset);
    assert!(!wizard.can_submit());
    assert!(wizard.select_preset("glam"));
    assert!(wizard.can_submit());

    let generator = FakeGenerator::succeeding("glam");
    assert!(wizard.request_generate());
    let effect = accept_and_run(&mut wizard, &gate(Overlay::new(true)), &generator).await;

    assert!(matches!(effect, Some(Effect::Generate(_))));
    assert_eq!(generator.call_count(), 1);
    let request = generator.last_request();
    let preset = crate::catalog::find_preset("glam").unwrap();
    assert_eq!(request.user_instruction(), preset.prompt);
    assert_eq!(request.gender, Gender::Female);
    assert_eq!(request.source, photo());
}

#[test]
fn test_blank_prompt_never_enables_submit() {
    for prompt in ["", " ", "\t\n", "   \u{3000}"] {
        let mut wizard = controller_at_method(Gender::Male);
        wizard.select_method(MakeupMethod::Text);
        wizard.select_preset("gothic");
        wizard.set_text_prompt(prompt);
        assert!(!wizard.can_submit(), "prompt {prompt:?}");
        assert!(!wizard.request_generate());
        assert!(wizard.start_generation().is_none());
    }
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_failure_shows_specific_message() {
    let mut wizard = controller_with_prompt("bold red lips");
    let generator = FakeGenerator::with_outcomes([Err(GenerationError::classify(
        "429 Too Many Requests: RESOURCE_EXHAUSTED",
    ))]);
    wizard.request_generate();
    accept_and_run(&mut wizard, &gate(Overlay::new(true)), &generator).await;

    let session = wizard.session();
    assert_eq!(session.step, Step::Result);
    assert!(!session.is_loading);
    assert_eq!(
        session.error.as_deref(),
        Some("Our servers are currently busy. Please wait about a minute and try again.")
    );
    assert_ne!(
        session.error.as_deref(),
        Some(GenerationError::Generic(String::new()).user_message().as_str())
    );
}

#[tokio::test(start_paused = true)]
async fn test_success_shows_comparison() {
    let mut wizard = controller_with_prompt("soft glam");
    let generator = FakeGenerator::succeeding("after");
    wizard.request_generate();
    accept_and_run(&mut wizard, &gate(Overlay::new(true)), &generator).await;

    let session = wizard.session();
    assert!(session.has_result());
    assert_eq!(session.original_image, Some(photo()));
    assert_eq!(session.generated_image, Some(result_image("after")));
}

#[tokio::test(start_paused = true)]
async fn test_gate_waits_for_dwell_before_generating() {
    let mut wizard = controller_with_prompt("soft glam");
    let overlay = Overlay::new(true);
    let gate = gate(overlay.clone());
    wizard.request_generate();
    let action = wizard.accept_ad().unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    assert_eq!(
        gate.show(action, Box::new(move |a| drop(tx.send(a)))),
        AdOutcome::Scheduled
    );
    tokio::task::yield_now().await;
    assert!(overlay.showing.load(Ordering::SeqCst));
    assert_eq!(wizard.step(), Step::MethodConfig);
    assert!(rx.try_recv().is_err());

    assert_eq!(rx.recv().await, Some(PendingAction::Generate));
    assert!(!overlay.showing.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_unavailable_overlay_dispatches_immediately() {
    let mut wizard = controller_with_prompt("soft glam");
    let generator = FakeGenerator::succeeding("after");
    wizard.request_generate();
    accept_and_run(&mut wizard, &gate(Overlay::new(false)), &generator).await;
    assert!(wizard.session().has_result());
}

#[tokio::test(start_paused = true)]
async fn test_download_dispatches_generated_image() {
    let mut wizard = controller_with_prompt("soft glam");
    let generator = FakeGenerator::succeeding("after");
    let gate = gate(Overlay::new(true));
    wizard.request_generate();
    accept_and_run(&mut wizard, &gate, &generator).await;

    let before = wizard.session().clone();
    assert!(wizard.request_download());
    let effect = accept_and_run(&mut wizard, &gate, &generator).await;
    assert_eq!(effect, Some(Effect::Download(result_image("after"))));
    assert_eq!(*wizard.session(), before);
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retry_after_error() {
    let mut wizard = controller_with_prompt("soft glam");
    let generator = FakeGenerator::with_outcomes([
        Err(GenerationError::classify("failed to connect")),
        Ok(result_image("second")),
    ]);
    let gate = gate(Overlay::new(true));

    wizard.request_generate();
    accept_and_run(&mut wizard, &gate, &generator).await;
    assert_eq!(
        wizard.session().error.as_deref(),
        Some("Please check your internet connection and try again.")
    );

    assert!(wizard.request_generate());
    accept_and_run(&mut wizard, &gate, &generator).await;
    assert!(wizard.session().error.is_none());
    assert_eq!(wizard.session().generated_image, Some(result_image("second")));
    assert_eq!(generator.call_count(), 2);
}

#[test]
fn test_stale_result_is_discarded() {
    let mut wizard = controller_with_prompt("first look");
    let first = wizard.start_generation().unwrap();
    wizard.back();
    wizard.set_text_prompt("second look");
    let second = wizard.start_generation().unwrap();
    assert!(second.seq > first.seq);

    assert!(!wizard.complete_generation(first.seq, Ok(result_image("first"))));
    assert!(wizard.session().is_loading);
    assert!(wizard.session().generated_image.is_none());

    assert!(wizard.complete_generation(second.seq, Ok(result_image("second"))));
    assert_eq!(wizard.session().generated_image, Some(result_image("second")));

    assert!(!wizard.complete_generation(second.seq, Ok(result_image("again"))));
    assert_eq!(wizard.session().generated_image, Some(result_image("second")));
}

#[tokio::test]
async fn test_double_accept_generates_once() {
    let mut wizard = controller_with_prompt("soft glam");
    wizard.request_generate();
    let action = wizard.accept_ad().unwrap();
    assert!(wizard.accept_ad().is_none());

    let first = wizard.dispatch(action);
    let second = wizard.dispatch(action);
    assert!(matches!(first, Some(Effect::Generate(_))));
    assert!(second.is_none());
}

#[tokio::test]
async fn test_missing_credential_message() {
    let mut wizard = controller_with_prompt("soft glam");
    let generator = FakeGenerator::with_outcomes([Err(GenerationError::classify(
        "API key not found. Please pass a valid API key.",
    ))]);
    wizard.request_generate();
    accept_and_run(&mut wizard, &gate(Overlay::new(false)), &generator).await;
    assert_eq!(
        wizard.session().error.as_deref(),
        Some("System configuration error (Missing API Key).")
    );
}
