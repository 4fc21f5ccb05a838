//! Chip widget for TUI.
//!
//! Chips are pill-shaped labels for catalog entries. The selected chip is
//! bracketed and the focused chip is highlighted.
//!
//! ASCII representation: `(Natural Glow) [Evening Glam] (+ red lipstick)`

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Colors a chip is drawn with
#[derive(Debug, Clone, Copy)]
pub struct ChipStyle {
    pub normal: Color,
    pub selected: Color,
    pub focused_bg: Color,
}

struct Chip<'a> {
    text: &'a str,
    prefix: Option<&'a str>,
    selected: bool,
    focused: bool,
}

impl Chip<'_> {
    fn content(&self) -> String {
        let inner = match self.prefix {
            Some(prefix) => format!("{prefix} {}", self.text),
            None => self.text.to_string(),
        };
        if self.selected {
            format!("[{inner}]")
        } else {
            format!("({inner})")
        }
    }

    fn to_span(&self, style: ChipStyle) -> Span<'static> {
        if self.text.is_empty() {
            return Span::raw("");
        }
        let mut s = Style::default().fg(if self.selected {
            style.selected
        } else {
            style.normal
        });
        if self.selected {
            s = s.add_modifier(Modifier::BOLD);
        }
        if self.focused {
            s = s.bg(style.focused_bg);
        }
        Span::styled(self.content(), s)
    }
}

/// Render a chip as a Span.
#[must_use]
pub fn render_chip(
    text: &str,
    prefix: Option<&str>,
    selected: bool,
    focused: bool,
    style: ChipStyle,
) -> Span<'static> {
    Chip {
        text,
        prefix,
        selected,
        focused,
    }
    .to_span(style)
}
