use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};

use crate::error::ExportError;
use crate::fonts::{FontSet, FontStyle};
use crate::raster::{RasterSettings, TableRasterizer};
use crate::styles::DocumentStyles;

pub const FONT_DIR: &str = "fonts";
pub const LOGO_FILE: &str = "logo.png";

/// Everything a report render reads from disk, loaded once at startup and
/// shared read-only by every render.
#[derive(Debug)]
pub struct ReportAssets {
    pub fonts: FontSet,
    /// Header logo, already flattened onto white.
    pub logo: Option<DynamicImage>,
    pub logo_path: PathBuf,
    pub styles: DocumentStyles,
    pub raster: RasterSettings,
    /// Where table images are written during a render; the system temp
    /// directory when unset.
    pub scratch_dir: Option<PathBuf>,
}

impl ReportAssets {
    /// Load fonts from `<resource_dir>/fonts` and the optional logo from
    /// `<resource_dir>/logo.png`.
    pub fn load(resource_dir: &Path) -> Result<Self, ExportError> {
        let fonts = FontSet::load(&resource_dir.join(FONT_DIR))?;
        let logo_path = resource_dir.join(LOGO_FILE);
        let logo = load_logo(&logo_path)?;

        Ok(Self {
            fonts,
            logo,
            logo_path,
            styles: DocumentStyles::default(),
            raster: RasterSettings::default(),
            scratch_dir: None,
        })
    }

    #[must_use]
    pub fn with_styles(mut self, styles: DocumentStyles) -> Self {
        self.styles = styles;
        self
    }

    #[must_use]
    pub fn with_raster(mut self, raster: RasterSettings) -> Self {
        self.raster = raster;
        self
    }

    #[must_use]
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Table rasterizer drawing with the regular face.
    pub fn rasterizer(&self) -> TableRasterizer {
        TableRasterizer::new(
            self.fonts.face(FontStyle::Regular).clone(),
            self.raster.clone(),
        )
    }
}

fn load_logo(path: &Path) -> Result<Option<DynamicImage>, ExportError> {
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "logo file not found, header renders without it");
        return Ok(None);
    }

    let logo = flatten_on_white(&image::open(path)?);
    tracing::info!(
        path = %path.display(),
        width = logo.width(),
        height = logo.height(),
        "logo loaded"
    );
    Ok(Some(DynamicImage::ImageRgb8(logo)))
}

/// Composite any alpha channel over white; PDF image XObjects here carry no
/// soft mask.
pub fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = f32::from(a) / 255.0;
        let blend = |c: u8| (f32::from(c) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
