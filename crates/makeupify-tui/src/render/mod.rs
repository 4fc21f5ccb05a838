//! Rendering functions for the TUI.
//!
//! This module contains all UI rendering logic, organized by wizard step.
//! Overlays (ad interstitial, error modal) are drawn last on top of the step.

mod error;
mod helpers;
mod method;
mod modal;
mod result;
mod steps;

use crate::app::App;
use crate::colors::{self, Palette};
use helpers::{hint, text_alignment};
use makeupify_core::Step;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// Draw the whole screen
pub fn ui(f: &mut Frame, app: &mut App) {
    let prefs = app.prefs.get();
    let palette = colors::palette(prefs.theme);
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.on_surface)),
        area,
    );

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(2),
    ])
    .areas(area);

    render_header(f, app, palette, header);

    app.comparison_area = None;
    match app.wizard.step() {
        Step::Upload => steps::render_upload(f, app, palette, body),
        Step::GenderSelect => steps::render_gender(f, app, palette, body),
        Step::MethodConfig => method::render_method(f, app, palette, body),
        Step::Result => result::render_result(f, app, palette, body),
    }

    render_footer(f, app, palette, footer);

    if app.ad_playing() {
        modal::render_ad_playing(f, app, palette);
    } else if app.wizard.ad_prompt_visible() {
        modal::render_ad_prompt(f, app, palette);
    }
    if let Some(error_state) = &app.error {
        error::render_error(f, error_state, palette);
    }
}

fn render_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let prefs = app.prefs.get();
    let step = app.wizard.step();

    let mut spans = vec![
        Span::styled(
            " Makeupify ",
            Style::default()
                .fg(palette.bg)
                .bg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  Step {}/4 · {}", step.number(), step.title()),
            Style::default()
                .fg(palette.on_surface)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    let theme = match prefs.theme {
        makeupify_core::Theme::Light => "light",
        makeupify_core::Theme::Dark => "dark",
    };
    spans.push(Span::styled(
        format!("   {} · {theme}", prefs.language.native_name()),
        Style::default().fg(palette.subtext),
    ));

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(text_alignment(prefs.language)),
        area,
    );
}

fn render_footer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let prefs = app.prefs.get();
    let [status_area, hints_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    if let Some(status) = &app.status_message {
        f.render_widget(
            Paragraph::new(Span::styled(
                status.as_str(),
                Style::default().fg(palette.success),
            ))
            .alignment(text_alignment(prefs.language)),
            status_area,
        );
    }

    let mut spans = Vec::new();
    for (key, label) in footer_hints(app) {
        spans.extend(hint(key, label, palette));
    }
    spans.extend(hint("^T", "Theme", palette));
    spans.extend(hint("^L", "Language", palette));
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(text_alignment(prefs.language)),
        hints_area,
    );
}

fn footer_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let session = app.wizard.session();
    match session.step {
        Step::Upload => vec![("Enter", "Open"), ("Esc", "Quit")],
        Step::GenderSelect => vec![("←/→", "Move"), ("Enter", "Choose"), ("Esc", "Back")],
        Step::MethodConfig => vec![
            ("Tab", "Method"),
            ("F1", "Tips"),
            ("Enter", "Generate"),
            ("Esc", "Back"),
        ],
        Step::Result if session.is_loading => vec![("Esc", "Back")],
        Step::Result if session.error.is_some() => vec![("Enter", "Retry"), ("Esc", "Back")],
        Step::Result => vec![
            ("←/→", "Slide"),
            ("d", "Download"),
            ("n", "New"),
            ("Esc", "Back"),
        ],
    }
}
