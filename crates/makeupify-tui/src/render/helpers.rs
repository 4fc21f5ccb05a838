//! Helper rendering functions shared across views.

use crate::colors::Palette;
use crate::state::TextInput;
use makeupify_core::Language;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

const SPINNER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

/// Text alignment for the interface language
pub fn text_alignment(language: Language) -> Alignment {
    if language.is_rtl() {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

// Tick counter is unbounded, only its remainder matters
#[allow(clippy::cast_possible_truncation)]
pub fn spinner(tick: u64) -> char {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

/// Rect of at most `width` x `height`, centered in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Rounded card with a title
pub fn card(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(palette.outline))
        .style(Style::default().bg(palette.surface).fg(palette.on_surface))
}

/// One-line text input with placeholder, scrolled so the cursor stays visible
pub fn input_line(
    input: &TextInput,
    placeholder: &str,
    width: u16,
    palette: &Palette,
) -> Line<'static> {
    if input.is_empty() {
        return Line::from(Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(palette.subtext)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    let skip = input_scroll(input, width);
    let visible: String = input.value().chars().skip(skip).collect();
    Line::from(Span::styled(visible, Style::default().fg(palette.on_surface)))
}

/// Chars hidden off the left edge so the cursor fits in `width`
pub fn input_scroll(input: &TextInput, width: u16) -> usize {
    let width = usize::from(width.max(1));
    input.cursor().saturating_sub(width - 1)
}

/// Place the terminal cursor inside an input drawn at `area`
// Cursor offset is bounded by the input width
#[allow(clippy::cast_possible_truncation)]
pub fn place_cursor(f: &mut Frame, input: &TextInput, area: Rect) {
    let offset = input.cursor() - input_scroll(input, area.width);
    f.set_cursor_position((area.x + offset as u16, area.y));
}

/// Render a progress bar as a string.
// Progress percentage is f64, width is bounded by terminal size
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn render_progress_bar(value: f64, max: f64, width: usize) -> String {
    let pct = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (pct * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), "-".repeat(empty))
}

/// Key hint like `[Enter] Generate`
pub fn hint(key: &str, label: &str, palette: &Palette) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!("[{key}]"),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {label}  "), Style::default().fg(palette.subtext)),
    ]
}
