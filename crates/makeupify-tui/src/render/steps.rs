//! Upload and gender steps.

use super::helpers::{card, centered_rect, input_line, place_cursor, spinner, text_alignment};
use crate::app::App;
use crate::colors::Palette;
use makeupify_core::Gender;
use makeupify_tui::widgets::{Picture, picture_rect};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

pub fn render_upload(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let alignment = text_alignment(app.prefs.get().language);
    let area = centered_rect(area, 72, 11);
    let block = card("Upload your photo", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [intro, _, label, input, _, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(
            "Pick a clear, front-facing photo. It stays on this machine until you \
             generate a makeover. JPEG, PNG and WebP work.",
        )
        .style(Style::default().fg(palette.subtext))
        .alignment(alignment)
        .wrap(Wrap { trim: true }),
        intro,
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "Image path",
            Style::default().fg(palette.primary),
        )),
        label,
    );
    f.render_widget(
        Paragraph::new(input_line(
            &app.path_input,
            "~/Pictures/selfie.jpg",
            input.width,
            palette,
        ))
        .style(Style::default().bg(palette.surface_high)),
        input,
    );
    if app.acquiring.is_some() {
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("{} Reading image...", spinner(app.tick)),
                Style::default().fg(palette.accent),
            )),
            status,
        );
    } else if !app.wizard.ad_prompt_visible() && app.error.is_none() {
        place_cursor(f, &app.path_input, input);
    }
}

pub fn render_gender(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let alignment = text_alignment(app.prefs.get().language);
    let [preview_area, choice_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let block = card("Your photo", palette);
    let inner = block.inner(preview_area);
    f.render_widget(block, preview_area);
    if let Some((before, _)) = app.previews.fitted(inner.width, inner.height) {
        f.render_widget(Picture::new(before), picture_rect(inner, before));
    }

    let area = centered_rect(choice_area, choice_area.width.saturating_sub(4), 9);
    let block = card("Who is in the photo?", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let selected = app.wizard.session().gender;
    let mut lines = vec![
        Line::from(Span::styled(
            "Presets are tailored to the choice.",
            Style::default().fg(palette.subtext),
        )),
        Line::from(""),
    ];
    for (i, gender) in Gender::ALL.iter().enumerate() {
        let focused = i == app.gender_cursor;
        let marker = if selected == Some(*gender) { "●" } else { "○" };
        let key = match gender {
            Gender::Female => 'f',
            Gender::Male => 'm',
        };
        let mut style = Style::default().fg(palette.on_surface);
        if focused {
            style = style
                .bg(palette.surface_high)
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} {} ", gender.label()), style),
            Span::styled(format!("  [{key}]"), Style::default().fg(palette.subtext)),
        ]));
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines).alignment(alignment), inner);
}
