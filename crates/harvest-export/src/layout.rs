//! Page geometry and text wrapping.
//!
//! All vertical positions are measured in millimetres from the top edge of
//! the page, the way the content flows. Conversion to PDF user space (origin
//! bottom-left) happens only when drawing.

use serde::{Deserialize, Serialize};

pub const MM_PER_PT: f32 = 25.4 / 72.0;
pub const MM_PER_INCH: f32 = 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    /// Distance from the bottom edge at which content must stop.
    pub margin_bottom_mm: f32,
    /// Horizontal inset of text inside a cell.
    pub cell_margin_mm: f32,
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_left_mm: 10.0,
            margin_right_mm: 10.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 20.0,
            cell_margin_mm: 1.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Lowest y any content may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.height_mm - self.margin_bottom_mm
    }

    /// True when a block of height `h` starting at `y` would cross the
    /// bottom margin and must move to a fresh page.
    pub fn needs_break(&self, y: f32, h: f32) -> bool {
        y + h > self.bottom_limit()
    }

    /// Height of an image of `px_width` x `px_height` drawn `width_mm` wide.
    pub fn scaled_height(&self, px_width: u32, px_height: u32, width_mm: f32) -> f32 {
        if px_width == 0 {
            return 0.0;
        }
        width_mm * px_height as f32 / px_width as f32
    }

    /// Flip a top-down position into PDF user space.
    pub fn pdf_y(&self, y_from_top: f32) -> f32 {
        self.height_mm - y_from_top
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Greedy word wrap.
///
/// `measure` returns the rendered width of a string in the same unit as
/// `max_width`. Words wider than a full line are split by character. An
/// empty input produces a single empty line so blank lines keep their
/// vertical space.
pub fn wrap_words<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if measure(word) <= max_width {
            current = word.to_string();
        } else {
            for ch in word.chars() {
                current.push(ch);
                if measure(&current) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
