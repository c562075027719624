use image::{DynamicImage, GenericImageView};
use printpdf::{
    Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use harvest_core::content::REPORT_TITLE;
use harvest_core::models::section::Section;

use crate::assets::ReportAssets;
use crate::content::{self, BlockSink};
use crate::error::ExportError;
use crate::fonts::FontStyle;
use crate::layout::{MM_PER_INCH, MM_PER_PT, PageGeometry, wrap_words};
use crate::raster::TableRasterizer;
use crate::styles::{DocumentStyles, TextStyle};
use crate::table::parse_markdown_table;

const LAYER_NAME: &str = "Layer 1";
/// File name prefix of the per-table images written during a render.
pub const TABLE_IMAGE_PREFIX: &str = "harvest-table-";
/// Resolution images are declared at before scaling to their target width.
const IMAGE_DPI: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// Turns ordered sections into a finished document.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, sections: &[Section]) -> Result<Vec<u8>, ExportError>;
}

impl ReportRenderer for ReportAssets {
    fn render(&self, sections: &[Section]) -> Result<Vec<u8>, ExportError> {
        generate_pdf(sections, self)
    }
}

/// Generate the full report PDF from ordered sections.
///
/// Any failure (a malformed table, an image that cannot be written or read
/// back, a font that cannot be embedded) aborts the whole document.
pub fn generate_pdf(sections: &[Section], assets: &ReportAssets) -> Result<Vec<u8>, ExportError> {
    let mut writer = ReportWriter::new(assets, REPORT_TITLE)?;
    for section in sections {
        writer.add_section(section)?;
    }

    let pages = writer.page_count();
    let bytes = writer.finish()?;
    tracing::info!(
        sections = sections.len(),
        pages,
        size = bytes.len(),
        "report PDF generated"
    );
    Ok(bytes)
}

/// A flowing, paginated report document.
///
/// Owns page lifecycle and header/footer chrome, and tracks the vertical
/// cursor (mm from the top of the current page) that content is placed at.
pub struct ReportWriter<'a> {
    doc: PdfDocumentReference,
    assets: &'a ReportAssets,
    /// Faces are embedded on first use, indexed by [`FontStyle`].
    fonts: [Option<IndirectFontRef>; 4],
    rasterizer: TableRasterizer,
    title: String,
    layer: PdfLayerReference,
    body_style: TextStyle,
    y: f32,
    page_count: usize,
}

impl<'a> ReportWriter<'a> {
    /// Start a document with its first page and header already drawn.
    pub fn new(assets: &'a ReportAssets, title: &str) -> Result<Self, ExportError> {
        let page = assets.styles.page;
        let (doc, page_idx, layer_idx) =
            PdfDocument::new(title, Mm(page.width_mm), Mm(page.height_mm), LAYER_NAME);

        if assets.logo.is_none() {
            tracing::warn!(
                path = %assets.logo_path.display(),
                "logo file not found, header renders without it"
            );
        }

        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        let mut writer = Self {
            doc,
            assets,
            fonts: Default::default(),
            rasterizer: assets.rasterizer(),
            title: title.to_string(),
            layer,
            body_style: assets.styles.body,
            y: 0.0,
            page_count: 1,
        };
        writer.draw_chrome()?;
        Ok(writer)
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Current vertical position in mm from the top of the page.
    pub fn cursor_y(&self) -> f32 {
        self.y
    }

    fn styles(&self) -> &'a DocumentStyles {
        &self.assets.styles
    }

    fn geometry(&self) -> PageGeometry {
        self.assets.styles.page
    }

    /// Begin a new page and redraw the header and footer on it.
    pub fn add_page(&mut self) -> Result<(), ExportError> {
        let page = self.geometry();
        let (page_idx, layer_idx) =
            self.doc
                .add_page(Mm(page.width_mm), Mm(page.height_mm), LAYER_NAME);
        self.layer = self.doc.get_page(page_idx).get_layer(layer_idx);
        self.page_count += 1;
        self.draw_chrome()?;
        tracing::debug!(page = self.page_count, "page added");
        Ok(())
    }

    /// Render one section: title, body blocks, trailing space.
    pub fn add_section(&mut self, section: &Section) -> Result<(), ExportError> {
        let styles = self.styles();
        let (title_style, body_style) = if section.is_disclaimer {
            (styles.disclaimer, styles.disclaimer)
        } else {
            (styles.section_title, styles.body)
        };

        self.break_if_needed(styles.title_cell_mm)?;
        self.draw_cell(&section.title, &title_style, styles.title_cell_mm, Align::Left)?;
        self.y += styles.title_cell_mm + styles.title_gap_mm;

        self.body_style = body_style;
        content::render_content(self, &section.body).inspect_err(|e| {
            tracing::error!(section = %section.title, error = %e, "error adding section");
        })?;
        self.y += styles.section_gap_mm;

        tracing::info!(section = %section.title, page = self.page_count, "section added");
        Ok(())
    }

    /// Serialize the finished document with every stream Flate-compressed.
    pub fn finish(self) -> Result<Vec<u8>, ExportError> {
        let raw = self
            .doc
            .save_to_bytes()
            .map_err(|e| ExportError::Pdf(format!("{e:?}")))?;
        compress_pdf(&raw)
    }

    /// Wrapped multi-line text block in `style`, breaking pages line by line.
    pub fn write_paragraph(&mut self, text: &str, style: &TextStyle) -> Result<(), ExportError> {
        let styles = self.styles();
        let page = self.geometry();
        let line_h = styles.prose_line_mm;
        let max_width = page.content_width() - 2.0 * page.cell_margin_mm;
        let assets = self.assets;
        let fonts = &assets.fonts;

        for raw_line in text.split('\n') {
            let lines = wrap_words(raw_line, max_width, |s| {
                fonts.text_width_mm(style.font, style.size_pt, s)
            });
            for line in lines {
                self.break_if_needed(line_h)?;
                self.draw_cell(&line, style, line_h, Align::Left)?;
                self.y += line_h;
            }
        }
        Ok(())
    }

    /// Parse, clean, rasterize and place one table block.
    pub fn write_table(&mut self, markdown: &str) -> Result<(), ExportError> {
        let grid = parse_markdown_table(markdown)?.without_blank_columns();

        let mut builder = tempfile::Builder::new();
        builder.prefix(TABLE_IMAGE_PREFIX).suffix(".png");
        let image_file = match &self.assets.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let path = image_file.path().to_path_buf();

        if !self.rasterizer.write_png(&grid, &path)? {
            image_file.close()?;
            return Ok(());
        }
        tracing::info!(path = %path.display(), "table image created");

        let page = self.geometry();
        let (px_w, px_h) = image::image_dimensions(&path)?;
        let width = page.content_width();
        let height = page.scaled_height(px_w, px_h, width);

        if page.needs_break(self.y, height) {
            self.add_page()?;
            tracing::info!(page = self.page_count, "added new page for table");
        }

        let table_image = image::open(&path)?;
        self.place_image(&table_image, page.margin_left_mm, self.y, width);
        self.y += height + self.styles().image_gap_mm;

        image_file.close()?;
        tracing::debug!(path = %path.display(), "temporary table image removed");
        Ok(())
    }

    fn break_if_needed(&mut self, height: f32) -> Result<(), ExportError> {
        if self.geometry().needs_break(self.y, height) {
            self.add_page()?;
        }
        Ok(())
    }

    fn draw_chrome(&mut self) -> Result<(), ExportError> {
        let styles = self.styles();
        let assets = self.assets;

        if let Some(logo) = &assets.logo {
            self.place_image(logo, styles.logo_x_mm, styles.logo_y_mm, styles.logo_width_mm);
        }

        self.y = styles.header_title_y_mm;
        let title = self.title.clone();
        self.draw_cell(&title, &styles.header_title, styles.header_cell_mm, Align::Center)?;

        self.y = styles.page.height_mm - styles.footer_offset_mm;
        let footer = format!("Page {}", self.page_count);
        self.draw_cell(&footer, &styles.footer, 0.0, Align::Center)?;

        self.y = styles.content_top();
        Ok(())
    }

    /// The embedded face for `style`, embedding it on first use.
    fn font(&mut self, style: FontStyle) -> Result<IndirectFontRef, ExportError> {
        if let Some(font) = &self.fonts[style.index()] {
            return Ok(font.clone());
        }
        let font = self
            .doc
            .add_external_font(self.assets.fonts.bytes(style))
            .map_err(|e| ExportError::Pdf(format!("embedding {style:?} font: {e:?}")))?;
        tracing::debug!(?style, "font face embedded");
        self.fonts[style.index()] = Some(font.clone());
        Ok(font)
    }

    /// Draw single-line `text` in a cell of `height` starting at the cursor.
    /// The baseline sits mid-cell, lowered by 30% of the font size.
    fn draw_cell(
        &mut self,
        text: &str,
        style: &TextStyle,
        height: f32,
        align: Align,
    ) -> Result<(), ExportError> {
        if text.is_empty() {
            return Ok(());
        }
        let font = self.font(style.font)?;
        let page = self.geometry();
        let x = match align {
            Align::Left => page.margin_left_mm + page.cell_margin_mm,
            Align::Center => {
                let width = self
                    .assets
                    .fonts
                    .text_width_mm(style.font, style.size_pt, text);
                page.margin_left_mm + (page.content_width() - width) / 2.0
            }
        };
        let baseline = self.y + height / 2.0 + 0.3 * style.size_pt * MM_PER_PT;

        self.layer.set_fill_color(style.color.to_pdf());
        self.layer.use_text(
            text,
            style.size_pt,
            Mm(x),
            Mm(page.pdf_y(baseline)),
            &font,
        );
        Ok(())
    }

    /// Place `image` with its top-left corner at (`x`, `y_top`), scaled to
    /// `width` mm with its aspect ratio kept. Returns the drawn height.
    fn place_image(&self, image: &DynamicImage, x: f32, y_top: f32, width: f32) -> f32 {
        let page = self.geometry();
        let (px_w, px_h) = image.dimensions();
        let height = page.scaled_height(px_w, px_h, width);
        let natural_width = px_w as f32 / IMAGE_DPI * MM_PER_INCH;
        let scale = if natural_width > 0.0 {
            width / natural_width
        } else {
            1.0
        };

        Image::from_dynamic_image(image).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(page.pdf_y(y_top + height))),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
        height
    }
}

impl BlockSink for ReportWriter<'_> {
    fn prose(&mut self, text: &str) -> Result<(), ExportError> {
        let style = self.body_style;
        self.write_paragraph(text, &style)?;
        self.y += self.styles().prose_gap_mm;
        Ok(())
    }

    fn table(&mut self, markdown: &str) -> Result<(), ExportError> {
        self.write_table(markdown).inspect_err(|e| {
            tracing::error!(error = %e, "error rendering table");
        })?;
        self.y += self.styles().table_gap_mm;
        Ok(())
    }
}

/// Reload serialized PDF bytes, drop unreferenced objects and Flate-encode
/// every stream that carries no filter yet (content, font files, images).
pub fn compress_pdf(raw: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut doc = lopdf::Document::load_mem(raw)
        .map_err(|e| ExportError::Pdf(format!("reloading for compression: {e}")))?;
    doc.prune_objects();
    doc.compress();

    let mut buffer = Vec::with_capacity(raw.len() / 2);
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Pdf(format!("saving compressed PDF: {e}")))?;
    tracing::debug!(raw = raw.len(), compressed = buffer.len(), "PDF streams compressed");
    Ok(buffer)
}
