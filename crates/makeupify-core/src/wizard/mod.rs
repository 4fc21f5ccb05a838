//! Wizard controller: the four-step state machine.
//!
//! The controller performs no I/O. Operations that need the outside world
//! return an [`Effect`] for the front end to execute, and outcomes come back
//! through [`WizardController::complete_generation`].

mod session;

pub use session::{Session, join_quick_tag};

use crate::catalog;
use crate::generation::{GenerationError, GenerationRequest, ImageGenerator};
use makeupify_types::{
    EncodedImage, Gender, GenerationMethod, MakeupMethod, PendingAction, Step,
};
use tracing::{debug, info, warn};

/// Work the front end must carry out on the controller's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the generator and report back with the ticket's sequence number
    Generate(GenerationTicket),
    /// Save this image under the download filename
    Download(EncodedImage),
}

/// One issued generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub seq: u64,
    pub request: GenerationRequest,
}

impl GenerationTicket {
    /// Run the request and pair the outcome with this ticket's sequence number.
    pub async fn run(
        self,
        generator: &dyn ImageGenerator,
    ) -> (u64, Result<EncodedImage, GenerationError>) {
        let outcome = generator.generate(&self.request).await;
        (self.seq, outcome)
    }
}

#[derive(Debug, Default)]
pub struct WizardController {
    session: Session,
    pending: Option<PendingAction>,
    last_seq: u64,
    in_flight: Option<u64>,
}

impl WizardController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.session.step
    }

    /// Action waiting on the interstitial, if it is showing
    #[must_use]
    pub fn pending_action(&self) -> Option<PendingAction> {
        self.pending
    }

    #[must_use]
    pub fn ad_prompt_visible(&self) -> bool {
        self.pending.is_some()
    }

    /// Sequence number of the request whose result will be applied
    #[must_use]
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session.can_submit() && self.in_flight.is_none()
    }

    // Step 1

    /// Store the photo and move on to gender selection.
    pub fn image_acquired(&mut self, image: EncodedImage) -> bool {
        if self.session.step != Step::Upload {
            return false;
        }
        debug!("Photo acquired ({})", image.mime_type());
        self.session.original_image = Some(image);
        self.session.step = Step::GenderSelect;
        true
    }

    // Step 2

    pub fn select_gender(&mut self, gender: Gender) -> bool {
        if self.session.step != Step::GenderSelect || self.session.original_image.is_none() {
            return false;
        }
        self.session.gender = Some(gender);
        let stale_preset = self
            .session
            .selected_preset
            .as_deref()
            .and_then(catalog::find_preset)
            .is_some_and(|p| !p.applies_to(gender));
        if stale_preset {
            self.session.selected_preset = None;
        }
        self.session.step = Step::MethodConfig;
        debug!("Gender selected: {gender}");
        true
    }

    // Step 3

    pub fn select_method(&mut self, method: MakeupMethod) {
        self.session.method = method;
        self.session.error = None;
    }

    /// Select a preset if it exists and applies to the chosen gender.
    pub fn select_preset(&mut self, id: &str) -> bool {
        let Some(gender) = self.session.gender else {
            return false;
        };
        match catalog::find_preset(id) {
            Some(preset) if preset.applies_to(gender) => {
                self.session.selected_preset = Some(preset.id.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn set_text_prompt(&mut self, prompt: impl Into<String>) {
        self.session.text_prompt = prompt.into();
    }

    pub fn text_prompt_mut(&mut self) -> &mut String {
        &mut self.session.text_prompt
    }

    pub fn add_quick_tag(&mut self, value: &str) {
        self.session.text_prompt = join_quick_tag(&self.session.text_prompt, value);
    }

    pub fn set_reference_image(&mut self, image: EncodedImage) {
        self.session.reference_image = Some(image);
    }

    pub fn clear_reference_image(&mut self) {
        self.session.reference_image = None;
    }

    pub fn toggle_recommendation(&mut self) {
        self.session.recommendation_open = !self.session.recommendation_open;
    }

    // Navigation

    /// Go back one step. Leaving the result view abandons any in-flight
    /// request; its eventual outcome is discarded.
    pub fn back(&mut self) -> bool {
        let target = match self.session.step {
            Step::Upload => return false,
            Step::GenderSelect => Step::Upload,
            Step::MethodConfig => Step::GenderSelect,
            Step::Result => {
                if let Some(seq) = self.in_flight.take() {
                    info!("Abandoning in-flight generation #{seq}");
                }
                self.session.is_loading = false;
                Step::MethodConfig
            }
        };
        debug!("Back: {:?} -> {target:?}", self.session.step);
        self.session.step = target;
        true
    }

    /// Return to the initial session from any state.
    pub fn reset(&mut self) {
        debug!("Reset from {:?}", self.session.step);
        self.session = Session::default();
        self.pending = None;
        self.in_flight = None;
    }

    // Ad-gated actions

    /// Ask to generate. Shows the interstitial when inputs are valid and
    /// nothing is in flight; otherwise a no-op.
    pub fn request_generate(&mut self) -> bool {
        if self.pending.is_some() || !self.can_submit() {
            return false;
        }
        if !matches!(self.session.step, Step::MethodConfig | Step::Result) {
            return false;
        }
        self.pending = Some(PendingAction::Generate);
        true
    }

    /// Ask to download the current result.
    pub fn request_download(&mut self) -> bool {
        if self.pending.is_some() || !self.session.has_result() {
            return false;
        }
        self.pending = Some(PendingAction::Download);
        true
    }

    /// Dismiss the interstitial without running anything.
    pub fn decline_ad(&mut self) {
        if let Some(action) = self.pending.take() {
            debug!("Ad declined, dropping {action:?}");
        }
    }

    /// Accept the interstitial. Returns the action to run once it resolves;
    /// the pending slot is cleared.
    pub fn accept_ad(&mut self) -> Option<PendingAction> {
        let action = self.pending.take();
        if let Some(action) = action {
            debug!("Ad accepted for {action:?}");
        }
        action
    }

    /// Run the action the interstitial was guarding.
    pub fn dispatch(&mut self, action: PendingAction) -> Option<Effect> {
        match action {
            PendingAction::Generate => self.start_generation().map(Effect::Generate),
            PendingAction::Download => self.perform_download().map(Effect::Download),
        }
    }

    /// Enter the result view in loading state and issue a request.
    pub fn start_generation(&mut self) -> Option<GenerationTicket> {
        if let Some(seq) = self.in_flight {
            warn!("Generation #{seq} still in flight, ignoring start");
            return None;
        }
        let request = self.build_request()?;

        self.last_seq += 1;
        let seq = self.last_seq;
        self.in_flight = Some(seq);
        self.session.step = Step::Result;
        self.session.is_loading = true;
        self.session.error = None;
        info!("Starting generation #{seq} ({:?})", self.session.method);
        Some(GenerationTicket { seq, request })
    }

    fn build_request(&self) -> Option<GenerationRequest> {
        let s = &self.session;
        if !s.can_submit() {
            return None;
        }
        let (method, instruction, reference) = match s.method {
            MakeupMethod::Preset => {
                let preset = s.selected_preset.as_deref().and_then(catalog::find_preset)?;
                (GenerationMethod::Text, Some(preset.prompt.to_string()), None)
            }
            MakeupMethod::Text => (GenerationMethod::Text, Some(s.text_prompt.clone()), None),
            MakeupMethod::Transfer => (
                GenerationMethod::Transfer,
                None,
                s.reference_image.clone(),
            ),
        };
        Some(GenerationRequest {
            source: s.original_image.clone()?,
            method,
            instruction,
            reference,
            gender: s.gender?,
        })
    }

    /// Apply a generation outcome. Returns false for stale or abandoned
    /// requests, which leave the session untouched.
    pub fn complete_generation(
        &mut self,
        seq: u64,
        outcome: Result<EncodedImage, GenerationError>,
    ) -> bool {
        if self.in_flight != Some(seq) {
            warn!(
                "Discarding stale generation #{seq} (current: {:?})",
                self.in_flight
            );
            return false;
        }
        self.in_flight = None;
        self.session.is_loading = false;
        match outcome {
            Ok(image) => {
                info!("Generation #{seq} succeeded");
                self.session.generated_image = Some(image);
                self.session.error = None;
            }
            Err(e) => {
                warn!("Generation #{seq} failed: {}", e.detail());
                self.session.error = Some(e.user_message());
            }
        }
        true
    }

    /// Image to save for a download, if there is a finished result.
    pub fn perform_download(&self) -> Option<EncodedImage> {
        let image = self.session.generated_image.clone();
        if image.is_none() {
            debug!("Download requested with no result");
        }
        image
    }
}
