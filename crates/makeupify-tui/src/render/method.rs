//! Method configuration step: preset list, free-text prompt, or reference.

use super::helpers::{card, input_line, place_cursor, text_alignment};
use crate::app::App;
use crate::colors::Palette;
use crate::state::MethodFocus;
use makeupify_core::catalog::QUICK_TAGS;
use makeupify_core::{MakeupMethod, PresetCategory};
use makeupify_tui::widgets::{ChipStyle, Picture, fit_to_cells, picture_rect, render_chip};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

const RECOMMENDATION: &str = "Best results come from a well-lit, front-facing photo with \
    the whole face visible. Avoid heavy filters, sunglasses and strong shadows. \
    For reference transfer, pick a close-up where the makeup is clearly visible.";

pub fn render_method(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let session = app.wizard.session();
    let tip_height = if session.recommendation_open { 4 } else { 1 };

    let [tabs, tip, content, button] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(tip_height),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(area);

    render_tabs(f, app, palette, tabs);
    render_tip(f, app, palette, tip);

    match session.method {
        MakeupMethod::Preset => render_presets(f, app, palette, content),
        MakeupMethod::Text => render_text(f, app, palette, content),
        MakeupMethod::Transfer => render_transfer(f, app, palette, content),
    }

    render_generate_button(f, app, palette, button);
}

fn chip_style(palette: &Palette) -> ChipStyle {
    ChipStyle {
        normal: palette.subtext,
        selected: palette.primary,
        focused_bg: palette.surface_high,
    }
}

fn render_tabs(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let current = app.wizard.session().method;
    let mut spans = vec![Span::raw(" ")];
    for method in MakeupMethod::ALL {
        spans.push(render_chip(
            method.label(),
            None,
            method == current,
            false,
            chip_style(palette),
        ));
        spans.push(Span::raw(" "));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(text_alignment(app.prefs.get().language)),
        area,
    );
}

fn render_tip(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let open = app.wizard.session().recommendation_open;
    let marker = if open { "▾" } else { "▸" };
    let mut lines = vec![Line::from(Span::styled(
        format!(" {marker} Photo tips [F1]"),
        Style::default().fg(palette.accent),
    ))];
    if open {
        lines.push(Line::from(Span::styled(
            format!("   {RECOMMENDATION}"),
            Style::default().fg(palette.subtext),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_presets(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = card("Choose a look", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let selected = app.wizard.session().selected_preset.as_deref();
    let presets = app.visible_presets();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;
    let mut category = None;

    for (i, preset) in presets.iter().enumerate() {
        if category != Some(preset.category) {
            if category.is_some() {
                lines.push(Line::from(""));
            }
            category = Some(preset.category);
            let color = match preset.category {
                PresetCategory::Style => palette.primary,
                PresetCategory::Retouch => palette.retouch,
            };
            lines.push(Line::from(Span::styled(
                preset.category.heading(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }

        let is_selected = selected == Some(preset.id);
        let focused = i == app.preset_cursor;
        if focused {
            cursor_line = lines.len();
        }
        let accent = match preset.category {
            PresetCategory::Style => palette.primary,
            PresetCategory::Retouch => palette.retouch,
        };
        let mut style = Style::default().fg(if is_selected {
            accent
        } else {
            palette.on_surface
        });
        if is_selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        if focused {
            style = style.bg(palette.surface_high);
        }
        let marker = if is_selected { "●" } else { "○" };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} {:<22}", preset.label), style),
            Span::styled(
                format!(" {}", preset.prompt),
                Style::default().fg(palette.subtext),
            ),
        ]));
    }

    let visible = usize::from(inner.height.max(1));
    let scroll = cursor_line.saturating_sub(visible - 1);
    // Scroll offset is bounded by the preset catalog
    #[allow(clippy::cast_possible_truncation)]
    let scroll = scroll as u16;
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn render_text(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = card("Describe the look", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [label, input, _, tags_label, tags] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Prompt",
            Style::default().fg(palette.primary),
        )),
        label,
    );
    f.render_widget(
        Paragraph::new(input_line(
            &app.prompt_input,
            "e.g. soft smoky eyes with a nude lip",
            input.width,
            palette,
        ))
        .style(Style::default().bg(palette.surface_high)),
        input,
    );

    let tags_focused = app.method_focus == MethodFocus::Tags;
    f.render_widget(
        Paragraph::new(Span::styled(
            if tags_focused {
                "Quick tags (←/→ move, Space add, ↑ back to prompt)"
            } else {
                "Quick tags (↓ to browse)"
            },
            Style::default().fg(palette.subtext),
        )),
        tags_label,
    );

    let mut spans = Vec::new();
    for (i, tag) in QUICK_TAGS.iter().enumerate() {
        spans.push(render_chip(
            tag.label,
            Some("+"),
            false,
            tags_focused && i == app.tag_cursor,
            chip_style(palette),
        ));
        spans.push(Span::raw(" "));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }),
        tags,
    );

    if !tags_focused && !overlay_open(app) {
        place_cursor(f, &app.prompt_input, input);
    }
}

fn render_transfer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = card("Reference look", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(reference) = &app.previews.reference {
        let [preview, caption] =
            Layout::vertical([Constraint::Min(2), Constraint::Length(1)]).areas(inner);
        let fitted = fit_to_cells(reference, preview.width, preview.height);
        f.render_widget(Picture::new(&fitted), picture_rect(preview, &fitted));
        f.render_widget(
            Paragraph::new(Span::styled(
                "Makeup from this photo will be applied to yours. [Del] Remove",
                Style::default().fg(palette.subtext),
            ))
            .alignment(Alignment::Center),
            caption,
        );
        return;
    }

    if app.wizard.session().reference_image.is_some() {
        f.render_widget(
            Paragraph::new("Reference image attached. [Del] Remove")
                .style(Style::default().fg(palette.on_surface)),
            inner,
        );
        return;
    }

    let [intro, label, input] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    f.render_widget(
        Paragraph::new("Choose a photo of someone wearing the makeup you want to copy.")
            .style(Style::default().fg(palette.subtext))
            .wrap(Wrap { trim: true }),
        intro,
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "Reference path",
            Style::default().fg(palette.primary),
        )),
        label,
    );
    f.render_widget(
        Paragraph::new(input_line(
            &app.reference_input,
            "~/Pictures/inspiration.png",
            input.width,
            palette,
        ))
        .style(Style::default().bg(palette.surface_high)),
        input,
    );
    if app.acquiring.is_none() && !overlay_open(app) {
        place_cursor(f, &app.reference_input, input);
    }
}

fn render_generate_button(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let enabled = app.wizard.can_submit();
    let style = if enabled {
        Style::default()
            .fg(palette.bg)
            .bg(palette.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(palette.subtext)
            .bg(palette.surface)
            .add_modifier(Modifier::DIM)
    };
    f.render_widget(
        Paragraph::new(Span::styled("  ✦ Generate makeover [Enter]  ", style))
            .alignment(Alignment::Center),
        area,
    );
}

fn overlay_open(app: &App) -> bool {
    app.wizard.ad_prompt_visible() || app.ad_playing() || app.error.is_some()
}
