//! Tests for the wizard controller
//!
//! Covers:
//! - Step navigation and back behavior
//! - Gender-aware preset selection
//! - Text prompt and quick tag editing
//! - Generate/download gating and the interstitial prompt
//! - Reset to the initial session

use super::fixtures::{controller_at_method, controller_with_prompt, photo, reference_photo};
use crate::generation::GenerationError;
use crate::wizard::{Effect, Session, WizardController};
use makeupify_types::{Gender, GenerationMethod, MakeupMethod, PendingAction, Step};

#[test]
fn test_starts_on_upload() {
    let wizard = WizardController::new();
    assert_eq!(wizard.step(), Step::Upload);
    assert_eq!(*wizard.session(), Session::default());
    assert!(wizard.pending_action().is_none());
    assert!(wizard.in_flight().is_none());
}

#[test]
fn test_upload_advances_to_gender() {
    let mut wizard = WizardController::new();
    assert!(wizard.image_acquired(photo()));
    assert_eq!(wizard.step(), Step::GenderSelect);
    assert_eq!(wizard.session().original_image, Some(photo()));
}

#[test]
fn test_upload_ignored_outside_step_one() {
    let mut wizard = controller_at_method(Gender::Female);
    assert!(!wizard.image_acquired(reference_photo()));
    assert_eq!(wizard.session().original_image, Some(photo()));
}

#[test]
fn test_gender_requires_photo() {
    let mut wizard = WizardController::new();
    assert!(!wizard.select_gender(Gender::Male));
    assert!(wizard.session().gender.is_none());
    assert_eq!(wizard.step(), Step::Upload);
}

#[test]
fn test_back_walks_steps_and_keeps_data() {
    let mut wizard = controller_at_method(Gender::Male);
    assert!(wizard.back());
    assert_eq!(wizard.step(), Step::GenderSelect);
    assert_eq!(wizard.session().gender, Some(Gender::Male));
    assert!(wizard.back());
    assert_eq!(wizard.step(), Step::Upload);
    assert!(wizard.session().original_image.is_some());
    assert!(!wizard.back());
    assert_eq!(wizard.step(), Step::Upload);
}

#[test]
fn test_preset_selection_respects_gender() {
    let mut wizard = controller_at_method(Gender::Male);
    assert!(!wizard.select_preset("bridal"));
    assert!(wizard.session().selected_preset.is_none());
    assert!(wizard.select_preset("grooming"));
    assert!(wizard.select_preset("gothic"));
    assert_eq!(wizard.session().selected_preset.as_deref(), Some("gothic"));
    assert!(!wizard.select_preset("does-not-exist"));
    assert_eq!(wizard.session().selected_preset.as_deref(), Some("gothic"));
}

#[test]
fn test_changing_gender_drops_inapplicable_preset() {
    let mut wizard = controller_at_method(Gender::Female);
    assert!(wizard.select_preset("bridal"));
    wizard.back();
    wizard.select_gender(Gender::Male);
    assert!(wizard.session().selected_preset.is_none());

    wizard.select_preset("editorial");
    wizard.back();
    wizard.select_gender(Gender::Female);
    assert_eq!(wizard.session().selected_preset.as_deref(), Some("editorial"));
}

#[test]
fn test_select_method_clears_error() {
    let mut wizard = controller_with_prompt("bold lips");
    wizard.request_generate();
    let action = wizard.accept_ad().unwrap();
    let Some(Effect::Generate(ticket)) = wizard.dispatch(action) else {
        panic!("expected generate effect");
    };
    wizard.complete_generation(ticket.seq, Err(GenerationError::classify("boom")));
    wizard.back();
    assert!(wizard.session().error.is_some());

    wizard.select_method(MakeupMethod::Transfer);
    assert!(wizard.session().error.is_none());
    assert_eq!(wizard.session().method, MakeupMethod::Transfer);
}

#[test]
fn test_quick_tags_append() {
    let mut wizard = controller_at_method(Gender::Female);
    wizard.select_method(MakeupMethod::Text);
    wizard.add_quick_tag("red lipstick");
    assert_eq!(wizard.session().text_prompt, "red lipstick");
    wizard.add_quick_tag("cat eye liner");
    assert_eq!(wizard.session().text_prompt, "red lipstick, cat eye liner");

    wizard.set_text_prompt("soft look,");
    wizard.add_quick_tag("contour");
    assert_eq!(wizard.session().text_prompt, "soft look, contour");
}

#[test]
fn test_reference_set_and_clear() {
    let mut wizard = controller_at_method(Gender::Female);
    wizard.select_method(MakeupMethod::Transfer);
    assert!(!wizard.can_submit());
    wizard.set_reference_image(reference_photo());
    assert!(wizard.can_submit());
    wizard.clear_reference_image();
    assert!(!wizard.can_submit());
}

#[test]
fn test_recommendation_toggle() {
    let mut wizard = controller_at_method(Gender::Female);
    wizard.toggle_recommendation();
    assert!(wizard.session().recommendation_open);
    wizard.toggle_recommendation();
    assert!(!wizard.session().recommendation_open);
}

#[test]
fn test_generate_gated_on_valid_inputs() {
    let mut wizard = controller_at_method(Gender::Female);
    assert!(!wizard.request_generate());
    assert!(wizard.pending_action().is_none());

    wizard.select_method(MakeupMethod::Text);
    wizard.set_text_prompt("   ");
    assert!(!wizard.request_generate());

    wizard.set_text_prompt("smokey eyes");
    assert!(wizard.request_generate());
    assert_eq!(wizard.pending_action(), Some(PendingAction::Generate));
    assert!(wizard.ad_prompt_visible());
}

#[test]
fn test_decline_clears_pending_only() {
    let mut wizard = controller_with_prompt("smokey eyes");
    let before = wizard.session().clone();
    wizard.request_generate();
    wizard.decline_ad();
    assert!(wizard.pending_action().is_none());
    assert_eq!(*wizard.session(), before);
    assert!(wizard.in_flight().is_none());
}

#[test]
fn test_accept_returns_action_and_clears_pending() {
    let mut wizard = controller_with_prompt("smokey eyes");
    wizard.request_generate();
    assert_eq!(wizard.accept_ad(), Some(PendingAction::Generate));
    assert!(wizard.pending_action().is_none());
    assert_eq!(wizard.accept_ad(), None);
}

#[test]
fn test_start_generation_enters_loading_result() {
    let mut wizard = controller_with_prompt("  smokey eyes  ");
    let ticket = wizard.start_generation().unwrap();

    assert_eq!(wizard.step(), Step::Result);
    assert!(wizard.session().is_loading);
    assert_eq!(wizard.in_flight(), Some(ticket.seq));
    assert_eq!(ticket.request.method, GenerationMethod::Text);
    assert_eq!(ticket.request.user_instruction(), "smokey eyes");
    assert_eq!(ticket.request.gender, Gender::Female);
    assert!(ticket.request.reference.is_none());
}

#[test]
fn test_preset_request_uses_catalog_prompt() {
    let mut wizard = controller_at_method(Gender::Female);
    wizard.select_preset("bridal");
    let ticket = wizard.start_generation().unwrap();
    let preset = crate::catalog::find_preset("bridal").unwrap();
    assert_eq!(ticket.request.instruction.as_deref(), Some(preset.prompt));
    assert_eq!(ticket.request.method, GenerationMethod::Text);
}

#[test]
fn test_transfer_request_carries_reference() {
    let mut wizard = controller_at_method(Gender::Male);
    wizard.select_method(MakeupMethod::Transfer);
    wizard.set_text_prompt("ignored text");
    wizard.set_reference_image(reference_photo());
    let ticket = wizard.start_generation().unwrap();
    assert_eq!(ticket.request.method, GenerationMethod::Transfer);
    assert_eq!(ticket.request.reference, Some(reference_photo()));
    assert!(ticket.request.instruction.is_none());
    assert_eq!(ticket.request.images().len(), 2);
}

#[test]
fn test_single_request_in_flight() {
    let mut wizard = controller_with_prompt("glitter");
    assert!(wizard.start_generation().is_some());
    assert!(wizard.start_generation().is_none());
    assert!(!wizard.request_generate());
    assert!(!wizard.can_submit());
}

#[test]
fn test_download_requires_result() {
    let mut wizard = controller_with_prompt("glitter");
    assert!(!wizard.request_download());
    assert!(wizard.perform_download().is_none());
    assert_eq!(wizard.dispatch(PendingAction::Download), None);

    let ticket = wizard.start_generation().unwrap();
    assert!(!wizard.request_download());
    wizard.complete_generation(ticket.seq, Err(GenerationError::classify("429")));
    assert!(!wizard.request_download());
}

#[test]
fn test_back_from_result_abandons_request() {
    let mut wizard = controller_with_prompt("glitter");
    let ticket = wizard.start_generation().unwrap();
    assert!(wizard.back());
    assert_eq!(wizard.step(), Step::MethodConfig);
    assert!(!wizard.session().is_loading);
    assert!(wizard.in_flight().is_none());

    assert!(!wizard.complete_generation(ticket.seq, Ok(photo())));
    assert!(wizard.session().generated_image.is_none());
    assert_eq!(wizard.step(), Step::MethodConfig);
}

#[test]
fn test_reset_from_any_state() {
    let mut wizard = controller_with_prompt("glitter");
    wizard.set_reference_image(reference_photo());
    wizard.toggle_recommendation();
    wizard.start_generation();
    wizard.request_generate();
    wizard.reset();

    assert_eq!(*wizard.session(), Session::default());
    assert!(wizard.pending_action().is_none());
    assert!(wizard.in_flight().is_none());

    let mut fresh = controller_at_method(Gender::Female);
    fresh.reset();
    assert_eq!(*fresh.session(), Session::default());
}
