//! Divider readout for the before/after comparison.
//!
//! Renders the divider position as a bar with a handle and percentage.
//!
//! # Example
//!
//! ```text
//! after [#########|.........] 50% before
//! ```

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

const FILLED_CHAR: char = '\u{2588}'; // Full block
const EMPTY_CHAR: char = '\u{2591}'; // Light shade
const HANDLE_CHAR: char = '\u{2503}'; // Heavy vertical

/// Bar showing how much of the comparison is the "after" image
pub struct DividerBar {
    position: f64,
    dragging: bool,
    fill: Color,
    track: Color,
    handle: Color,
}

impl DividerBar {
    #[must_use]
    pub fn new(position: f64, fill: Color, track: Color, handle: Color) -> Self {
        Self {
            position,
            dragging: false,
            fill,
            track,
            handle,
        }
    }

    #[must_use]
    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    fn fraction(&self) -> f64 {
        (self.position / 100.0).clamp(0.0, 1.0)
    }

    fn format_value(&self) -> String {
        format!("{:.0}%", self.position.clamp(0.0, 100.0))
    }

    // Fraction is 0..=1, bar width is bounded by terminal size
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn render_inline(&self, available_width: usize) -> Vec<Span<'static>> {
        let value_str = self.format_value();
        let labels = "after  before".len();
        let bar_width = available_width
            .saturating_sub(labels + 4)
            .saturating_sub(value_str.len() + 1)
            .max(5);

        let filled = (self.fraction() * bar_width as f64).round() as usize;
        let filled = filled.min(bar_width.saturating_sub(1));
        let empty = bar_width.saturating_sub(filled + 1);

        let handle_style = if self.dragging {
            Style::default()
                .fg(self.handle)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.handle)
        };

        vec![
            Span::styled("after ", Style::default().fg(self.track)),
            Span::styled("[", Style::default().fg(self.track)),
            Span::styled(
                FILLED_CHAR.to_string().repeat(filled),
                Style::default().fg(self.fill),
            ),
            Span::styled(HANDLE_CHAR.to_string(), handle_style),
            Span::styled(
                EMPTY_CHAR.to_string().repeat(empty),
                Style::default().fg(self.track),
            ),
            Span::styled("]", Style::default().fg(self.track)),
            Span::styled(format!(" {value_str}"), handle_style),
            Span::styled(" before", Style::default().fg(self.track)),
        ]
    }
}
