//! Before/after comparison slider state.
//!
//! Holds the divider percentage and whether it is being dragged. Renderers
//! supply container bounds in their own units (terminal columns, pixels).

pub const DEFAULT_POSITION: f64 = 50.0;

/// Horizontal extent of the slider container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub width: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Inclusive of the right edge, where a divider at 100% sits
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.left && x <= self.left + self.width
    }
}

/// Divider percentage for pointer `x`: `clamp(x - left, 0, width) / width * 100`.
/// `None` for a zero-width container.
#[must_use]
pub fn percent_at(x: f64, bounds: Bounds) -> Option<f64> {
    if bounds.width <= 0.0 || !bounds.width.is_finite() || !x.is_finite() {
        return None;
    }
    let offset = (x - bounds.left).clamp(0.0, bounds.width);
    Some(offset / bounds.width * 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSlider {
    position: f64,
    dragging: bool,
    grab_tolerance: f64,
}

impl Default for ComparisonSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonSlider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: DEFAULT_POSITION,
            dragging: false,
            grab_tolerance: 1.0,
        }
    }

    /// Distance from the divider, in container units, that still grabs it
    #[must_use]
    pub fn with_grab_tolerance(mut self, tolerance: f64) -> Self {
        self.grab_tolerance = tolerance.max(0.0);
        self
    }

    /// Divider position, 0..=100
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Divider location in container units
    #[must_use]
    pub fn divider_x(&self, bounds: Bounds) -> f64 {
        bounds.left + bounds.width * self.position / 100.0
    }

    /// Pointer/touch press. Starts a drag when it lands on the divider.
    pub fn press(&mut self, x: f64, bounds: Bounds) -> bool {
        if !bounds.contains(x) {
            return false;
        }
        if (x - self.divider_x(bounds)).abs() <= self.grab_tolerance {
            self.dragging = true;
        }
        self.dragging
    }

    /// Pointer/touch movement. Only moves the divider while dragging.
    pub fn move_to(&mut self, x: f64, bounds: Bounds) -> bool {
        if !self.dragging {
            return false;
        }
        match percent_at(x, bounds) {
            Some(p) => {
                self.position = p;
                true
            }
            None => false,
        }
    }

    /// Release anywhere, including outside the container
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Keyboard nudge by `delta` percent
    pub fn nudge(&mut self, delta: f64) {
        if delta.is_finite() {
            self.position = (self.position + delta).clamp(0.0, 100.0);
        }
    }

    pub fn reset(&mut self) {
        self.position = DEFAULT_POSITION;
        self.dragging = false;
    }

    /// Number of leading columns that show the "after" image
    // Position is 0..=100 so the product is within 0..=width
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    #[must_use]
    pub fn split_column(&self, width: u16) -> u16 {
        ((f64::from(width) * self.position / 100.0).round() as u16).min(width)
    }
}
