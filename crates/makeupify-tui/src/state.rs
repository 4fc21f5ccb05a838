//! View state types for the TUI.

use image::RgbaImage;

#[derive(Debug, Clone)]
pub struct ErrorState {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

impl ErrorState {
    pub fn new(title: String, message: String, details: Option<String>) -> Self {
        Self {
            title,
            message,
            details,
        }
    }
}

/// Single-line editable text with a char-based cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the content and put the cursor at the end
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Backspace
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.value.remove(idx);
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

/// Which part of the method step takes arrow keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MethodFocus {
    /// Preset list, prompt field or reference path, depending on method
    #[default]
    Main,
    /// Quick tag row under the text prompt
    Tags,
}

/// Which image slot a file path is loaded into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireTarget {
    Photo,
    Reference,
}

/// Decoded pixels for the images in the session
#[derive(Debug, Default)]
pub struct Previews {
    pub original: Option<RgbaImage>,
    pub reference: Option<RgbaImage>,
    pub generated: Option<RgbaImage>,
    fitted: Option<Fitted>,
}

#[derive(Debug)]
struct Fitted {
    cols: u16,
    rows: u16,
    before: RgbaImage,
    after: Option<RgbaImage>,
}

impl Previews {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_original(&mut self, image: RgbaImage) {
        self.original = Some(image);
        self.fitted = None;
    }

    pub fn set_generated(&mut self, image: Option<RgbaImage>) {
        self.generated = image;
        self.fitted = None;
    }

    /// Original and generated images scaled to a cell area, cached per size
    pub fn fitted(&mut self, cols: u16, rows: u16) -> Option<(&RgbaImage, Option<&RgbaImage>)> {
        let original = self.original.as_ref()?;
        let stale = self
            .fitted
            .as_ref()
            .is_none_or(|f| f.cols != cols || f.rows != rows);
        if stale {
            let before = makeupify_tui::widgets::fit_to_cells(original, cols, rows);
            let after = self.generated.as_ref().map(|g| {
                image::imageops::resize(
                    g,
                    before.width().max(1),
                    before.height().max(1),
                    image::imageops::FilterType::Triangle,
                )
            });
            self.fitted = Some(Fitted {
                cols,
                rows,
                before,
                after,
            });
        }
        self.fitted.as_ref().map(|f| (&f.before, f.after.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_state_creation() {
        let error = ErrorState::new(
            "Could not load photo".to_string(),
            "Something went wrong".to_string(),
            Some("Details here".to_string()),
        );

        assert_eq!(error.title, "Could not load photo");
        assert_eq!(error.message, "Something went wrong");
        assert_eq!(error.details, Some("Details here".to_string()));
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::default();
        for c in "lips".chars() {
            input.insert_char(c);
        }
        input.home();
        input.insert_char('>');
        assert_eq!(input.value(), ">lips");
        input.end();
        input.delete_char();
        assert_eq!(input.value(), ">lip");
        input.home();
        input.delete_forward();
        assert_eq!(input.value(), "lip");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_text_input_multibyte() {
        let mut input = TextInput::default();
        input.set("güzel");
        input.move_left();
        input.move_left();
        input.delete_char();
        assert_eq!(input.value(), "güel");
        input.insert_char('ß');
        assert_eq!(input.value(), "güßel");
        input.move_right();
        input.move_right();
        input.move_right();
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_previews_fit_is_cached_until_changed() {
        let mut previews = Previews::default();
        assert!(previews.fitted(10, 5).is_none());

        previews.set_original(RgbaImage::new(20, 20));
        let (before, after) = previews.fitted(10, 5).unwrap();
        assert_eq!(before.dimensions(), (10, 10));
        assert!(after.is_none());

        previews.set_generated(Some(RgbaImage::new(40, 40)));
        let (before, after) = previews.fitted(10, 5).unwrap();
        assert_eq!(after.unwrap().dimensions(), before.dimensions());
    }
}
