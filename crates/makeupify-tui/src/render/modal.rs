//! Ad interstitial overlays.

use super::helpers::{centered_rect, render_progress_bar};
use crate::app::App;
use crate::colors::Palette;
use makeupify_core::PendingAction;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use std::time::Instant;

fn overlay_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.surface).fg(palette.on_surface))
}

/// Offer to watch an ad before the pending action runs
pub fn render_ad_prompt(f: &mut Frame, app: &App, palette: &Palette) {
    let action = match app.wizard.pending_action() {
        Some(PendingAction::Download) => "download your makeover",
        _ => "generate your makeover",
    };
    let area = centered_rect(f.area(), 52, 7);
    let lines = vec![
        Line::from(Span::styled(
            "A short ad keeps Makeupify free.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Watch it to {action}."),
            Style::default().fg(palette.subtext),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " [y] Watch ad ",
                Style::default()
                    .fg(palette.bg)
                    .bg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("[n] Not now", Style::default().fg(palette.subtext)),
        ]),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(overlay_block("Sponsored", palette))
            .alignment(Alignment::Center),
        area,
    );
}

/// Ad is playing: count down until the action runs
pub fn render_ad_playing(f: &mut Frame, app: &App, palette: &Palette) {
    let area = centered_rect(f.area(), 52, 6);
    let remaining = app
        .ad_until
        .map(|until| until.saturating_duration_since(Instant::now()));

    let mut lines = vec![
        Line::from(Span::styled(
            "Your ad is playing",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(remaining) = remaining {
        let width = usize::from(area.width.saturating_sub(12));
        let total = app.ad_dwell.as_secs_f64();
        let secs = remaining.as_secs_f64();
        lines.push(Line::from(vec![
            Span::styled(
                render_progress_bar(total - secs, total, width),
                Style::default().fg(palette.primary),
            ),
            Span::styled(
                format!(" {:.0}s", secs.ceil()),
                Style::default().fg(palette.subtext),
            ),
        ]));
    }
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(overlay_block("Sponsored", palette))
            .alignment(Alignment::Center),
        area,
    );
}
