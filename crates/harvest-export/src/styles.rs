use serde::{Deserialize, Serialize};

use crate::fonts::FontStyle;
use crate::layout::PageGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TextColor {
    pub const BLACK: TextColor = TextColor::new(0, 0, 0);
    pub const GRAY: TextColor = TextColor::new(128, 128, 128);
    pub const DARK_PURPLE: TextColor = TextColor::new(102, 0, 204);
    pub const LIGHT_PURPLE: TextColor = TextColor::new(153, 102, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_pdf(self) -> printpdf::Color {
        printpdf::Color::Rgb(printpdf::Rgb::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            None,
        ))
    }
}

/// Font, size and color of one kind of text run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size_pt: f32,
    pub color: TextColor,
}

impl TextStyle {
    pub const fn new(font: FontStyle, size_pt: f32, color: TextColor) -> Self {
        Self {
            font,
            size_pt,
            color,
        }
    }
}

/// Document styling for report exports. Lengths are in millimetres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    pub page: PageGeometry,

    /// Report title repeated at the top of every page.
    pub header_title: TextStyle,
    pub header_title_y_mm: f32,
    pub header_cell_mm: f32,
    /// Space between the header title and the first content line.
    pub header_gap_mm: f32,

    pub logo_x_mm: f32,
    pub logo_y_mm: f32,
    pub logo_width_mm: f32,

    /// `Page N` marker, measured up from the bottom edge.
    pub footer: TextStyle,
    pub footer_offset_mm: f32,

    pub section_title: TextStyle,
    pub body: TextStyle,
    /// Used for both the title and the body of disclaimer sections.
    pub disclaimer: TextStyle,

    pub title_cell_mm: f32,
    pub title_gap_mm: f32,
    pub section_gap_mm: f32,

    pub prose_line_mm: f32,
    pub prose_gap_mm: f32,

    /// Space after an embedded table image.
    pub image_gap_mm: f32,
    /// Additional space after a whole table block.
    pub table_gap_mm: f32,
}

impl DocumentStyles {
    /// Top of the content area once the header chrome is drawn.
    pub fn content_top(&self) -> f32 {
        self.header_title_y_mm + self.header_cell_mm + self.header_gap_mm
    }
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            page: PageGeometry::a4(),
            header_title: TextStyle::new(FontStyle::Bold, 16.0, TextColor::DARK_PURPLE),
            header_title_y_mm: 25.0,
            header_cell_mm: 10.0,
            header_gap_mm: 10.0,
            logo_x_mm: 10.0,
            logo_y_mm: 8.0,
            logo_width_mm: 30.0,
            footer: TextStyle::new(FontStyle::Italic, 8.0, TextColor::GRAY),
            footer_offset_mm: 15.0,
            section_title: TextStyle::new(FontStyle::Bold, 12.0, TextColor::LIGHT_PURPLE),
            body: TextStyle::new(FontStyle::Regular, 10.0, TextColor::BLACK),
            disclaimer: TextStyle::new(FontStyle::Italic, 8.0, TextColor::BLACK),
            title_cell_mm: 10.0,
            title_gap_mm: 3.0,
            section_gap_mm: 5.0,
            prose_line_mm: 8.0,
            prose_gap_mm: 5.0,
            image_gap_mm: 5.0,
            table_gap_mm: 10.0,
        }
    }
}
