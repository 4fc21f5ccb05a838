//! Result step: loading, error, or the before/after comparison.

use super::helpers::{card, centered_rect, spinner, text_alignment};
use crate::app::App;
use crate::colors::Palette;
use makeupify_tui::widgets::{DividerBar, Picture, picture_rect};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

pub fn render_result(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let session = app.wizard.session();
    if session.is_loading {
        render_loading(f, app, palette, area);
    } else if let Some(message) = session.error.clone() {
        render_failure(f, app, palette, area, &message);
    } else {
        render_comparison(f, app, palette, area);
    }
}

fn render_loading(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let area = centered_rect(area, 50, 5);
    let block = card("Your makeover", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let lines = vec![
        Line::from(Span::styled(
            format!("{} Applying makeup...", spinner(app.tick)),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "This can take a few seconds.",
            Style::default().fg(palette.subtext),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn render_failure(f: &mut Frame, app: &App, palette: &Palette, area: Rect, message: &str) {
    let area = centered_rect(area, 60, 8);
    let block = card("Something went wrong", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(palette.error))),
        Line::from(""),
        Line::from(Span::styled(
            "[Esc] Back   [Enter] Try again",
            Style::default().fg(palette.subtext),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(text_alignment(app.prefs.get().language))
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_comparison(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let block = card("Before / After", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [picture_area, bar_area] =
        Layout::vertical([Constraint::Min(2), Constraint::Length(1)]).areas(inner);

    let dragging = app.slider.is_dragging();
    let divider = if dragging {
        palette.accent
    } else {
        palette.primary
    };

    let Some((before, after)) = app.previews.fitted(picture_area.width, picture_area.height)
    else {
        return;
    };
    let rect = picture_rect(picture_area, before);
    let Some(after) = after else {
        f.render_widget(
            Paragraph::new("Result ready, but it could not be previewed. [d] Download")
                .style(Style::default().fg(palette.subtext))
                .alignment(Alignment::Center),
            picture_area,
        );
        return;
    };
    let split = app.slider.split_column(rect.width);
    f.render_widget(
        Picture::new(before).with_after(after, split).divider(divider),
        rect,
    );
    app.comparison_area = Some(rect);

    let bar = DividerBar::new(
        app.slider.position(),
        palette.primary,
        palette.outline,
        divider,
    )
    .dragging(dragging)
    .render_inline(usize::from(bar_area.width));
    f.render_widget(
        Paragraph::new(Line::from(bar)).alignment(Alignment::Center),
        bar_area,
    );
}
