use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{Font, FontArc, PxScale};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::layout::MM_PER_PT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Regular,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            FontStyle::Regular => "DejaVuSans.ttf",
            FontStyle::Bold => "DejaVuSans-Bold.ttf",
            FontStyle::Italic => "DejaVuSans-Oblique.ttf",
            FontStyle::BoldItalic => "DejaVuSans-BoldOblique.ttf",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            FontStyle::Regular => 0,
            FontStyle::Bold => 1,
            FontStyle::Italic => 2,
            FontStyle::BoldItalic => 3,
        }
    }
}

struct LoadedFace {
    bytes: Arc<[u8]>,
    font: FontArc,
}

/// The four DejaVu Sans faces, kept both as raw bytes for PDF embedding and
/// parsed for glyph measurement and rasterization.
pub struct FontSet {
    dir: PathBuf,
    faces: Vec<LoadedFace>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet").field("dir", &self.dir).finish()
    }
}

impl FontSet {
    /// Load every face from `dir`. A missing file is fatal.
    pub fn load(dir: &Path) -> Result<Self, ExportError> {
        let mut faces = Vec::with_capacity(FontStyle::ALL.len());

        for style in FontStyle::ALL {
            let path = dir.join(style.file_name());
            if !path.is_file() {
                tracing::error!(path = %path.display(), "font file missing");
                return Err(ExportError::AssetMissing { path });
            }

            let bytes = std::fs::read(&path)?;
            let font = FontArc::try_from_vec(bytes.clone()).map_err(|e| ExportError::FontLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            faces.push(LoadedFace {
                bytes: Arc::from(bytes),
                font,
            });
        }

        tracing::info!(dir = %dir.display(), "all DejaVu fonts loaded");
        Ok(Self {
            dir: dir.to_path_buf(),
            faces,
        })
    }

    pub fn bytes(&self, style: FontStyle) -> &[u8] {
        &self.faces[style.index()].bytes
    }

    pub fn face(&self, style: FontStyle) -> &FontArc {
        &self.faces[style.index()].font
    }

    /// Advance width of `text` in millimetres at `size_pt`, without kerning.
    pub fn text_width_mm(&self, style: FontStyle, size_pt: f32, text: &str) -> f32 {
        let font = self.face(style);
        let units_per_em = font.units_per_em().unwrap_or(1000.0);
        let units: f32 = text
            .chars()
            .map(|c| font.h_advance_unscaled(font.glyph_id(c)))
            .sum();
        units / units_per_em * size_pt * MM_PER_PT
    }
}

/// Pixel scale rendering `font` at `size_pt` on a `dpi` raster.
pub fn px_scale(font: &FontArc, size_pt: f32, dpi: f32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    let em_px = size_pt / 72.0 * dpi;
    PxScale::from(em_px * font.height_unscaled() / units_per_em)
}
