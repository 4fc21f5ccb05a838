//! Application state and input handling for the TUI.
//!
//! `App` owns the wizard controller and everything the terminal needs on top
//! of it (text inputs, cursors, decoded previews). Input handlers return a
//! [`Command`] when the outside world must be involved; `main` runs it and
//! reports back through [`AppEvent`].

use crate::state::{AcquireTarget, ErrorState, MethodFocus, Previews, TextInput};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use image::RgbaImage;
use makeupify_core::acquire::expand_path;
use makeupify_core::catalog::{self, QUICK_TAGS};
use makeupify_core::generation::GenerationError;
use makeupify_core::preferences::{Preferences, PreferencesCell};
use makeupify_core::slider::{Bounds, ComparisonSlider};
use makeupify_core::{
    EncodedImage, Effect, Gender, MakeupMethod, PendingAction, Preset, Step, WizardController,
};
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Work `main` carries out for the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Acquire {
        target: AcquireTarget,
        path: PathBuf,
    },
    ShowAd(PendingAction),
    Perform(Effect),
}

/// Results of background work
#[derive(Debug)]
pub enum AppEvent {
    Acquired {
        target: AcquireTarget,
        result: Result<(EncodedImage, RgbaImage), String>,
    },
    AdFinished(PendingAction),
    Generated {
        seq: u64,
        outcome: Result<EncodedImage, GenerationError>,
        preview: Option<RgbaImage>,
    },
    Saved(Result<PathBuf, String>),
}

/// Main application state
pub struct App {
    pub wizard: WizardController,
    pub prefs: PreferencesCell,
    pub slider: ComparisonSlider,
    pub slider_step: f64,
    pub path_input: TextInput,
    pub reference_input: TextInput,
    pub prompt_input: TextInput,
    pub gender_cursor: usize,
    pub preset_cursor: usize,
    pub tag_cursor: usize,
    pub method_focus: MethodFocus,
    pub previews: Previews,
    pub error: Option<ErrorState>,
    pub status_message: Option<String>,
    pub acquiring: Option<AcquireTarget>,
    pub ad_showing: Arc<AtomicBool>,
    pub ad_until: Option<Instant>,
    pub ad_dwell: Duration,
    /// Where the comparison was last drawn, for mouse hit-testing
    pub comparison_area: Option<Rect>,
    pub tick: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(prefs: Preferences, slider_step: f64) -> Self {
        Self {
            wizard: WizardController::new(),
            prefs: PreferencesCell::new(prefs),
            slider: ComparisonSlider::new(),
            slider_step,
            path_input: TextInput::default(),
            reference_input: TextInput::default(),
            prompt_input: TextInput::default(),
            gender_cursor: 0,
            preset_cursor: 0,
            tag_cursor: 0,
            method_focus: MethodFocus::Main,
            previews: Previews::default(),
            error: None,
            status_message: None,
            acquiring: None,
            ad_showing: Arc::new(AtomicBool::new(false)),
            ad_until: None,
            ad_dwell: Duration::ZERO,
            comparison_area: None,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn ad_playing(&self) -> bool {
        self.ad_showing.load(Ordering::SeqCst)
    }

    /// Presets offered for the chosen gender, styles first
    pub fn visible_presets(&self) -> Vec<&'static Preset> {
        self.wizard
            .session()
            .gender
            .map(catalog::presets_for_gender)
            .unwrap_or_default()
    }

    pub fn highlighted_preset(&self) -> Option<&'static Preset> {
        self.visible_presets().get(self.preset_cursor).copied()
    }

    /// Return everything to a fresh wizard
    pub fn start_over(&mut self) {
        self.wizard.reset();
        self.slider.reset();
        self.previews.clear();
        self.path_input.clear();
        self.reference_input.clear();
        self.prompt_input.clear();
        self.gender_cursor = 0;
        self.preset_cursor = 0;
        self.tag_cursor = 0;
        self.method_focus = MethodFocus::Main;
        self.status_message = None;
        self.comparison_area = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }
        if self.ad_playing() {
            return None;
        }
        if self.error.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error = None;
            }
            return None;
        }
        if self.wizard.ad_prompt_visible() {
            return self.handle_ad_prompt_key(key.code);
        }
        if ctrl {
            self.handle_ctrl_key(key.code);
            return None;
        }

        self.status_message = None;
        match self.wizard.step() {
            Step::Upload => self.handle_upload_key(key.code),
            Step::GenderSelect => {
                self.handle_gender_key(key.code);
                None
            }
            Step::MethodConfig => self.handle_method_key(key.code),
            Step::Result => {
                self.handle_result_key(key.code);
                None
            }
        }
    }

    fn handle_ctrl_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('t') => {
                let theme = self.prefs.toggle_theme();
                debug!("Theme toggled to {theme:?}");
            }
            KeyCode::Char('l') => {
                let language = self.prefs.cycle_language();
                debug!("Language set to {language:?}");
            }
            KeyCode::Char('r') => self.start_over(),
            _ => {}
        }
    }

    fn handle_ad_prompt_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                self.wizard.accept_ad().map(Command::ShowAd)
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.wizard.decline_ad();
                None
            }
            _ => None,
        }
    }

    fn handle_upload_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => return self.acquire(AcquireTarget::Photo),
            _ => edit_input(&mut self.path_input, code),
        }
        None
    }

    fn handle_gender_key(&mut self, code: KeyCode) {
        let count = Gender::ALL.len();
        match code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.wizard.back();
            }
            KeyCode::Left | KeyCode::Up | KeyCode::BackTab => {
                self.gender_cursor = (self.gender_cursor + count - 1) % count;
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                self.gender_cursor = (self.gender_cursor + 1) % count;
            }
            KeyCode::Char('f' | 'F') => self.choose_gender(Gender::Female),
            KeyCode::Char('m' | 'M') => self.choose_gender(Gender::Male),
            KeyCode::Enter => self.choose_gender(Gender::ALL[self.gender_cursor]),
            _ => {}
        }
    }

    fn choose_gender(&mut self, gender: Gender) {
        if self.wizard.select_gender(gender) {
            self.gender_cursor = Gender::ALL.iter().position(|g| *g == gender).unwrap_or(0);
            let presets = self.visible_presets();
            self.preset_cursor = self
                .wizard
                .session()
                .selected_preset
                .as_deref()
                .and_then(|id| presets.iter().position(|p| p.id == id))
                .unwrap_or(0);
        }
    }

    fn handle_method_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Esc => {
                self.wizard.back();
                return None;
            }
            KeyCode::Tab => {
                self.switch_method(self.wizard.session().method.next());
                return None;
            }
            KeyCode::BackTab => {
                self.switch_method(self.wizard.session().method.prev());
                return None;
            }
            KeyCode::F(1) => {
                self.wizard.toggle_recommendation();
                return None;
            }
            _ => {}
        }

        match self.wizard.session().method {
            MakeupMethod::Preset => self.handle_preset_key(code),
            MakeupMethod::Text => self.handle_text_key(code),
            MakeupMethod::Transfer => return self.handle_transfer_key(code),
        }
        None
    }

    fn switch_method(&mut self, method: MakeupMethod) {
        self.wizard.select_method(method);
        self.method_focus = MethodFocus::Main;
    }

    fn handle_preset_key(&mut self, code: KeyCode) {
        let count = self.visible_presets().len();
        if count == 0 {
            return;
        }
        match code {
            KeyCode::Up | KeyCode::Left => {
                self.preset_cursor = (self.preset_cursor + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Right => {
                self.preset_cursor = (self.preset_cursor + 1) % count;
            }
            KeyCode::Char(' ') => {
                if let Some(preset) = self.highlighted_preset() {
                    self.wizard.select_preset(preset.id);
                }
            }
            KeyCode::Enter => {
                if let Some(preset) = self.highlighted_preset() {
                    self.wizard.select_preset(preset.id);
                }
                self.wizard.request_generate();
            }
            _ => {}
        }
    }

    fn handle_text_key(&mut self, code: KeyCode) {
        if self.method_focus == MethodFocus::Tags {
            let count = QUICK_TAGS.len();
            match code {
                KeyCode::Left => self.tag_cursor = (self.tag_cursor + count - 1) % count,
                KeyCode::Right => self.tag_cursor = (self.tag_cursor + 1) % count,
                KeyCode::Up => self.method_focus = MethodFocus::Main,
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(tag) = QUICK_TAGS.get(self.tag_cursor) {
                        self.wizard.add_quick_tag(tag.value);
                        self.prompt_input.set(self.wizard.session().text_prompt.clone());
                    }
                }
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Down => self.method_focus = MethodFocus::Tags,
            KeyCode::Enter => {
                self.wizard.request_generate();
            }
            _ => {
                edit_input(&mut self.prompt_input, code);
                self.wizard.set_text_prompt(self.prompt_input.value());
            }
        }
    }

    fn handle_transfer_key(&mut self, code: KeyCode) -> Option<Command> {
        if self.wizard.session().reference_image.is_some() {
            match code {
                KeyCode::Delete | KeyCode::Backspace => {
                    self.wizard.clear_reference_image();
                    self.previews.reference = None;
                }
                KeyCode::Enter => {
                    self.wizard.request_generate();
                }
                _ => {}
            }
            return None;
        }
        if code == KeyCode::Enter {
            return self.acquire(AcquireTarget::Reference);
        }
        edit_input(&mut self.reference_input, code);
        None
    }

    fn handle_result_key(&mut self, code: KeyCode) {
        let session = self.wizard.session();
        if session.is_loading {
            if code == KeyCode::Esc {
                self.wizard.back();
            }
            return;
        }
        if session.error.is_some() {
            match code {
                KeyCode::Esc | KeyCode::Char('b') => {
                    self.wizard.back();
                }
                KeyCode::Enter | KeyCode::Char('r') => {
                    self.wizard.request_generate();
                }
                _ => {}
            }
            return;
        }
        match code {
            KeyCode::Left => self.slider.nudge(-self.slider_step),
            KeyCode::Right => self.slider.nudge(self.slider_step),
            KeyCode::Home => self.slider.reset(),
            KeyCode::Char('d') => {
                self.wizard.request_download();
            }
            KeyCode::Char('n') => self.start_over(),
            KeyCode::Esc => {
                self.wizard.back();
            }
            _ => {}
        }
    }

    fn acquire(&mut self, target: AcquireTarget) -> Option<Command> {
        if self.acquiring.is_some() {
            return None;
        }
        let input = match target {
            AcquireTarget::Photo => &self.path_input,
            AcquireTarget::Reference => &self.reference_input,
        };
        if input.value().trim().is_empty() {
            return None;
        }
        let path = expand_path(input.value());
        self.acquiring = Some(target);
        self.status_message = Some(format!("Loading {}...", path.display()));
        Some(Command::Acquire { target, path })
    }

    /// Mouse handling for the comparison divider
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let Some(area) = self.comparison_area else {
            return;
        };
        if !self.wizard.session().has_result() || self.wizard.ad_prompt_visible() {
            self.slider.release();
            return;
        }
        // First column maps to 0% and last column to 100%
        let bounds = Bounds::new(
            f64::from(area.x),
            f64::from(area.width.saturating_sub(1).max(1)),
        );
        let x = f64::from(event.column);
        let inside = event.column >= area.x
            && event.column < area.x + area.width
            && event.row >= area.y
            && event.row < area.y + area.height;

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.slider.press(x, bounds);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                // Leaving the picture pins the divider to the nearest edge first
                self.slider.move_to(x, bounds);
                if !inside {
                    self.slider.release();
                }
            }
            MouseEventKind::Up(_) => self.slider.release(),
            _ => {}
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::Acquired { target, result } => {
                self.acquiring = None;
                self.status_message = None;
                match result {
                    Ok((image, pixels)) => self.image_loaded(target, image, pixels),
                    Err(message) => {
                        warn!("Image acquisition failed: {message}");
                        self.error = Some(ErrorState::new(
                            "Could not load image".to_string(),
                            message,
                            None,
                        ));
                    }
                }
                None
            }
            AppEvent::AdFinished(action) => {
                self.ad_until = None;
                self.wizard.dispatch(action).map(Command::Perform)
            }
            AppEvent::Generated {
                seq,
                outcome,
                preview,
            } => {
                let succeeded = outcome.is_ok();
                if self.wizard.complete_generation(seq, outcome) && succeeded {
                    self.previews.set_generated(preview);
                    self.slider.reset();
                }
                None
            }
            AppEvent::Saved(result) => {
                match result {
                    Ok(path) => {
                        self.status_message = Some(format!("Saved to {}", path.display()));
                    }
                    Err(message) => {
                        self.error = Some(ErrorState::new(
                            "Download failed".to_string(),
                            message,
                            None,
                        ));
                    }
                }
                None
            }
        }
    }

    fn image_loaded(&mut self, target: AcquireTarget, image: EncodedImage, pixels: RgbaImage) {
        match target {
            AcquireTarget::Photo => {
                if self.wizard.image_acquired(image) {
                    self.previews.set_original(pixels);
                    self.previews.set_generated(None);
                    self.path_input.clear();
                }
            }
            AcquireTarget::Reference => {
                if self.wizard.step() == Step::MethodConfig {
                    self.wizard.set_reference_image(image);
                    self.previews.reference = Some(pixels);
                    self.reference_input.clear();
                }
            }
        }
    }
}

/// Shared single-line editing keys
fn edit_input(input: &mut TextInput, code: KeyCode) {
    match code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.delete_char(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use makeupify_core::Theme;

    fn app() -> App {
        App::new(Preferences::default(), 5.0)
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Command> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> Option<Command> {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn photo() -> EncodedImage {
        EncodedImage::from_base64("image/png", "AAAA")
    }

    fn loaded(app: &mut App, target: AcquireTarget) {
        app.handle_event(AppEvent::Acquired {
            target,
            result: Ok((photo(), RgbaImage::new(4, 4))),
        });
    }

    /// App sitting on the method step for `gender`
    fn at_method(gender: Gender) -> App {
        let mut app = app();
        loaded(&mut app, AcquireTarget::Photo);
        app.choose_gender(gender);
        assert_eq!(app.wizard.step(), Step::MethodConfig);
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_enter_on_path_requests_acquire() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        type_str(&mut app, "/tmp/me.png");
        let cmd = press(&mut app, KeyCode::Enter);
        assert_eq!(
            cmd,
            Some(Command::Acquire {
                target: AcquireTarget::Photo,
                path: PathBuf::from("/tmp/me.png"),
            })
        );
        assert_eq!(press(&mut app, KeyCode::Enter), None);
    }

    #[test]
    fn test_acquired_photo_advances() {
        let mut app = app();
        app.acquiring = Some(AcquireTarget::Photo);
        loaded(&mut app, AcquireTarget::Photo);
        assert_eq!(app.wizard.step(), Step::GenderSelect);
        assert!(app.previews.original.is_some());
        assert!(app.acquiring.is_none());
    }

    #[test]
    fn test_acquire_failure_shows_error() {
        let mut app = app();
        app.handle_event(AppEvent::Acquired {
            target: AcquireTarget::Photo,
            result: Err("not an image".to_string()),
        });
        assert!(app.error.is_some());
        assert_eq!(app.wizard.step(), Step::Upload);
        press(&mut app, KeyCode::Esc);
        assert!(app.error.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_gender_keys() {
        let mut app = app();
        loaded(&mut app, AcquireTarget::Photo);
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.wizard.session().gender, Some(Gender::Male));
        assert_eq!(app.gender_cursor, 1);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.wizard.step(), Step::GenderSelect);
    }

    #[test]
    fn test_preset_enter_selects_and_gates() {
        let mut app = at_method(Gender::Female);
        press(&mut app, KeyCode::Down);
        let expected = app.highlighted_preset().unwrap().id;
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert_eq!(app.wizard.session().selected_preset.as_deref(), Some(expected));
        assert_eq!(app.wizard.pending_action(), Some(PendingAction::Generate));

        assert_eq!(
            press(&mut app, KeyCode::Char('y')),
            Some(Command::ShowAd(PendingAction::Generate))
        );
        assert!(!app.wizard.ad_prompt_visible());
    }

    #[test]
    fn test_declining_ad_runs_nothing() {
        let mut app = at_method(Gender::Female);
        press(&mut app, KeyCode::Enter);
        assert!(app.wizard.ad_prompt_visible());
        assert_eq!(press(&mut app, KeyCode::Char('n')), None);
        assert!(!app.wizard.ad_prompt_visible());
        assert_eq!(app.wizard.step(), Step::MethodConfig);
    }

    #[test]
    fn test_text_prompt_and_tags() {
        let mut app = at_method(Gender::Female);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.wizard.session().method, MakeupMethod::Text);

        press(&mut app, KeyCode::Enter);
        assert!(!app.wizard.ad_prompt_visible());

        type_str(&mut app, "glossy");
        assert_eq!(app.wizard.session().text_prompt, "glossy");

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        let expected = format!("glossy, {}", QUICK_TAGS[0].value);
        assert_eq!(app.wizard.session().text_prompt, expected);
        assert_eq!(app.prompt_input.value(), expected);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert!(app.wizard.ad_prompt_visible());
    }

    #[test]
    fn test_transfer_reference_flow() {
        let mut app = at_method(Gender::Male);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.wizard.session().method, MakeupMethod::Transfer);

        type_str(&mut app, "ref.jpg");
        let cmd = press(&mut app, KeyCode::Enter);
        assert!(matches!(
            cmd,
            Some(Command::Acquire {
                target: AcquireTarget::Reference,
                ..
            })
        ));
        loaded(&mut app, AcquireTarget::Reference);
        assert!(app.wizard.session().reference_image.is_some());

        press(&mut app, KeyCode::Delete);
        assert!(app.wizard.session().reference_image.is_none());
        assert!(app.previews.reference.is_none());
    }

    #[test]
    fn test_generation_roundtrip_through_events() {
        let mut app = at_method(Gender::Female);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        let cmd = app.handle_event(AppEvent::AdFinished(PendingAction::Generate));
        let Some(Command::Perform(Effect::Generate(ticket))) = cmd else {
            panic!("expected generation");
        };
        assert!(app.wizard.session().is_loading);

        app.handle_event(AppEvent::Generated {
            seq: ticket.seq,
            outcome: Ok(photo()),
            preview: Some(RgbaImage::new(4, 4)),
        });
        assert!(app.wizard.session().has_result());
        assert!(app.previews.generated.is_some());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.wizard.pending_action(), Some(PendingAction::Download));
        press(&mut app, KeyCode::Enter);
        let cmd = app.handle_event(AppEvent::AdFinished(PendingAction::Download));
        assert_eq!(cmd, Some(Command::Perform(Effect::Download(photo()))));
    }

    #[test]
    fn test_arrow_keys_nudge_divider() {
        let mut app = at_method(Gender::Female);
        let ticket = {
            app.wizard.select_preset("glam");
            app.wizard.start_generation().unwrap()
        };
        app.handle_event(AppEvent::Generated {
            seq: ticket.seq,
            outcome: Ok(photo()),
            preview: None,
        });
        press(&mut app, KeyCode::Right);
        assert!((app.slider.position() - 55.0).abs() < f64::EPSILON);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert!((app.slider.position() - 45.0).abs() < f64::EPSILON);
        press(&mut app, KeyCode::Home);
        assert!((app.slider.position() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mouse_drag_moves_divider_and_release_outside_ends_it() {
        let mut app = at_method(Gender::Female);
        app.wizard.select_preset("glam");
        let ticket = app.wizard.start_generation().unwrap();
        app.wizard.complete_generation(ticket.seq, Ok(photo()));
        app.comparison_area = Some(Rect::new(10, 2, 40, 10));

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30, 5));
        assert!(app.slider.is_dragging());
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 23, 5));
        assert!((app.slider.position() - 100.0 / 3.0).abs() < 1e-9);

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 70, 5));
        assert!(!app.slider.is_dragging());
        assert!((app.slider.position() - 100.0).abs() < f64::EPSILON);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 5));
        assert!((app.slider.position() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mouse_reaches_both_edge_columns() {
        let mut app = at_method(Gender::Female);
        app.wizard.select_preset("glam");
        let ticket = app.wizard.start_generation().unwrap();
        app.wizard.complete_generation(ticket.seq, Ok(photo()));
        app.comparison_area = Some(Rect::new(10, 2, 40, 10));

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30, 5));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 5));
        assert_eq!(app.slider.split_column(40), 0);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 49, 5));
        assert_eq!(app.slider.split_column(40), 40);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 49, 5));

        // Divider parked on the last column is still grabbable
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 49, 5));
        assert!(app.slider.is_dragging());
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 11, 5));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 5));
        assert!(!app.slider.is_dragging());
        assert_eq!(app.slider.split_column(40), 0);
    }

    #[test]
    fn test_second_generation_recenters_divider() {
        let mut app = at_method(Gender::Female);
        app.wizard.select_preset("glam");
        let first = app.wizard.start_generation().unwrap();
        app.handle_event(AppEvent::Generated {
            seq: first.seq,
            outcome: Ok(photo()),
            preview: Some(RgbaImage::new(4, 4)),
        });
        press(&mut app, KeyCode::Right);
        assert!((app.slider.position() - 55.0).abs() < f64::EPSILON);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.wizard.step(), Step::MethodConfig);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        let cmd = app.handle_event(AppEvent::AdFinished(PendingAction::Generate));
        let Some(Command::Perform(Effect::Generate(second))) = cmd else {
            panic!("expected generation");
        };
        assert!(second.seq > first.seq);
        assert!((app.slider.position() - 55.0).abs() < f64::EPSILON);
        app.handle_event(AppEvent::Generated {
            seq: second.seq,
            outcome: Ok(photo()),
            preview: Some(RgbaImage::new(4, 4)),
        });
        assert!(app.wizard.session().has_result());
        assert!((app.slider.position() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stale_generation_keeps_previews() {
        let mut app = at_method(Gender::Female);
        app.wizard.select_preset("glam");
        let ticket = app.wizard.start_generation().unwrap();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.wizard.step(), Step::MethodConfig);
        app.handle_event(AppEvent::Generated {
            seq: ticket.seq,
            outcome: Ok(photo()),
            preview: Some(RgbaImage::new(2, 2)),
        });
        assert!(app.previews.generated.is_none());
    }

    #[test]
    fn test_ctrl_keys() {
        let mut app = at_method(Gender::Female);
        ctrl(&mut app, 't');
        assert_eq!(app.prefs.get().theme, Theme::Dark);
        ctrl(&mut app, 'l');
        assert_ne!(app.prefs.get().language, Preferences::default().language);
        ctrl(&mut app, 'r');
        assert_eq!(app.wizard.step(), Step::Upload);
        assert!(app.previews.original.is_none());
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }

    #[test]
    fn test_keys_ignored_while_ad_plays() {
        let mut app = at_method(Gender::Female);
        app.ad_showing.store(true, Ordering::SeqCst);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.wizard.step(), Step::MethodConfig);
    }
}
