//! Half-block image rendering.
//!
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half block with the top pixel as foreground and the bottom pixel as
//! background. A [`Picture`] can carry a second image; columns left of the
//! split show it instead, which is how the before/after comparison is drawn.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

const UPPER_HALF: char = '\u{2580}';
const DIVIDER: char = '\u{2503}';

/// Scale `image` to fit `max_cols` x `max_rows` cells, keeping its aspect.
// Dimensions are bounded by the terminal size
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn fit_to_cells(image: &RgbaImage, max_cols: u16, max_rows: u16) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 || max_cols == 0 || max_rows == 0 {
        return RgbaImage::new(0, 0);
    }
    let max_w = u32::from(max_cols);
    let max_h = u32::from(max_rows) * 2;
    let scale = (f64::from(max_w) / f64::from(w)).min(f64::from(max_h) / f64::from(h));
    let target_w = ((f64::from(w) * scale).floor() as u32).clamp(1, max_w);
    let target_h = ((f64::from(h) * scale).floor() as u32).clamp(1, max_h);
    imageops::resize(image, target_w, target_h, FilterType::Triangle)
}

/// Cell rectangle a fitted image occupies when centered in `area`
// Fitted images never exceed the area they were fitted to
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn picture_rect(area: Rect, image: &RgbaImage) -> Rect {
    let cols = (image.width() as u16).min(area.width);
    let rows = (image.height().div_ceil(2) as u16).min(area.height);
    Rect {
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        width: cols,
        height: rows,
    }
}

fn pixel_color(image: &RgbaImage, x: u32, y: u32) -> Color {
    match image.get_pixel_checked(x, y) {
        Some(p) if p.0[3] > 0 => Color::Rgb(p.0[0], p.0[1], p.0[2]),
        _ => Color::Reset,
    }
}

/// An image, or a before/after pair split at a column
pub struct Picture<'a> {
    before: &'a RgbaImage,
    after: Option<&'a RgbaImage>,
    split: u16,
    divider: Option<Color>,
}

impl<'a> Picture<'a> {
    #[must_use]
    pub fn new(image: &'a RgbaImage) -> Self {
        Self {
            before: image,
            after: None,
            split: 0,
            divider: None,
        }
    }

    /// Show `after` in the columns left of `split`
    #[must_use]
    pub fn with_after(mut self, after: &'a RgbaImage, split: u16) -> Self {
        self.after = Some(after);
        self.split = split;
        self
    }

    #[must_use]
    pub fn divider(mut self, color: Color) -> Self {
        self.divider = Some(color);
        self
    }

    /// Color at cell pixel (`x`, `y`), mapping into the after image's own size
    fn sample(&self, x: u32, y: u32) -> Color {
        match self.after {
            Some(after) if x < u32::from(self.split) => {
                let (bw, bh) = self.before.dimensions();
                let (aw, ah) = after.dimensions();
                if bw == 0 || bh == 0 {
                    return Color::Reset;
                }
                pixel_color(after, x * aw / bw, y * ah / bh)
            }
            _ => pixel_color(self.before, x, y),
        }
    }
}

impl Widget for Picture<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = picture_rect(area, self.before);
        for row in 0..rect.height {
            for col in 0..rect.width {
                let top = self.sample(u32::from(col), u32::from(row) * 2);
                let bottom = self.sample(u32::from(col), u32::from(row) * 2 + 1);
                if let Some(cell) = buf.cell_mut((rect.x + col, rect.y + row)) {
                    cell.set_char(UPPER_HALF).set_fg(top).set_bg(bottom);
                }
            }
        }

        if let (Some(color), Some(_)) = (self.divider, self.after)
            && rect.width > 0
        {
            let col = self.split.min(rect.width - 1);
            for row in 0..rect.height {
                if let Some(cell) = buf.cell_mut((rect.x + col, rect.y + row)) {
                    cell.set_char(DIVIDER).set_fg(color);
                }
            }
        }
    }
}
