//! Table rasterization.
//!
//! Sizing is driven by character counts rather than measured glyph widths:
//! each column gets a share of the figure width proportional to its longest
//! cell, and the figure width grows with the total character count up to a
//! fixed cap. Text inside cells is measured for real so it can be centered
//! and wrapped. The canvas is sized from the laid-out table, so row count
//! only bounds the image through the pixel buffer limit.

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use image::{ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::fonts::px_scale;
use crate::layout::wrap_words;
use crate::table::TableGrid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterSettings {
    pub max_width_in: f32,
    pub width_per_char_in: f32,
    pub height_per_row_in: f32,
    pub dpi: f32,
    pub font_size_pt: f32,
    /// Row height as a multiple of one line of text.
    pub row_scale: f32,
    /// Cells with more characters than this wrap inside their column.
    pub wrap_threshold_chars: usize,
    pub header_fill: [u8; 3],
    pub grid_color: [u8; 3],
    pub border_px: u32,
    pub cell_padding_px: u32,
    /// White border kept around the table after cropping.
    pub pad_in: f32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            max_width_in: 15.0,
            width_per_char_in: 0.5,
            height_per_row_in: 0.5,
            dpi: 300.0,
            font_size_pt: 8.0,
            row_scale: 1.5,
            wrap_threshold_chars: 30,
            header_fill: [211, 211, 211],
            grid_color: [0, 0, 0],
            border_px: 2,
            cell_padding_px: 12,
            pad_in: 0.1,
        }
    }
}

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
/// Largest canvas allocated for one table (about 768 MB of RGB).
pub const MAX_CANVAS_PIXELS: u64 = 256_000_000;

/// Renders cleaned table grids into bitmaps.
pub struct TableRasterizer {
    font: FontArc,
    settings: RasterSettings,
}

/// Pixel layout of one table, computed before anything is drawn.
struct TablePlan {
    column_px: Vec<u32>,
    row_px: Vec<u32>,
    cells: Vec<Vec<Vec<String>>>,
}

impl TablePlan {
    fn width(&self) -> u32 {
        self.column_px.iter().sum()
    }

    fn height(&self) -> u32 {
        self.row_px.iter().sum()
    }
}

impl TableRasterizer {
    pub fn new(font: FontArc, settings: RasterSettings) -> Self {
        Self { font, settings }
    }

    pub fn settings(&self) -> &RasterSettings {
        &self.settings
    }

    /// Figure size in pixels. The width is shared among the columns; the
    /// height is nominal, the drawn rows decide the image height.
    pub fn figure_size_px(&self, grid: &TableGrid) -> (u32, u32) {
        let total_chars: usize = grid.column_char_widths().iter().sum();
        let s = &self.settings;
        let width_in = (total_chars as f32 * s.width_per_char_in).min(s.max_width_in);
        let height_in = grid.row_count() as f32 * s.height_per_row_in;
        (
            ((width_in * s.dpi).round() as u32).max(1),
            ((height_in * s.dpi).round() as u32).max(1),
        )
    }

    /// Render `grid`, or `None` when there is nothing to draw.
    pub fn render(&self, grid: &TableGrid) -> Result<Option<RgbImage>, ExportError> {
        if grid.is_empty() {
            tracing::warn!("empty data for table image");
            return Ok(None);
        }

        let plan = self.plan(grid);
        let margin = (self.settings.pad_in * self.settings.dpi).round() as u32 * 2;
        let border = self.settings.border_px;
        let canvas_w = plan.width() + border + margin * 2;
        let canvas_h = plan.height() + border + margin * 2;
        if u64::from(canvas_w) * u64::from(canvas_h) > MAX_CANVAS_PIXELS {
            return Err(ExportError::Raster(format!(
                "table image too large: {canvas_w}x{canvas_h}px"
            )));
        }

        let mut canvas = RgbImage::from_pixel(canvas_w, canvas_h, WHITE);
        self.draw(&mut canvas, &plan, margin, margin);

        let pad = (self.settings.pad_in * self.settings.dpi).round() as u32;
        Ok(Some(crop_to_content(&canvas, pad)))
    }

    /// Render `grid` to a PNG at `path`. Returns `false` for an empty grid,
    /// in which case nothing is written.
    pub fn write_png(&self, grid: &TableGrid, path: &Path) -> Result<bool, ExportError> {
        let Some(image) = self.render(grid)? else {
            return Ok(false);
        };
        image.save_with_format(path, ImageFormat::Png)?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "table image written"
        );
        Ok(true)
    }

    fn scale(&self) -> PxScale {
        px_scale(&self.font, self.settings.font_size_pt, self.settings.dpi)
    }

    fn line_height_px(&self) -> f32 {
        self.font.as_scaled(self.scale()).height() * 1.2
    }

    fn measure_px(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale());
        text.chars().map(|c| scaled.h_advance(scaled.glyph_id(c))).sum()
    }

    fn plan(&self, grid: &TableGrid) -> TablePlan {
        let (fig_w, _) = self.figure_size_px(grid);
        let widths: Vec<u32> = grid
            .column_char_widths()
            .into_iter()
            .map(|w| w.max(1) as u32)
            .collect();
        let total: u32 = widths.iter().sum();

        let mut column_px: Vec<u32> = widths
            .iter()
            .map(|&w| ((u64::from(fig_w) * u64::from(w)) / u64::from(total)) as u32)
            .collect();
        let assigned: u32 = column_px.iter().sum();
        if let Some(last) = column_px.last_mut() {
            *last += fig_w - assigned;
        }
        let min_col = self.settings.cell_padding_px * 2 + 1;
        for px in &mut column_px {
            *px = (*px).max(min_col);
        }

        let padding = self.settings.cell_padding_px;
        let line_h = self.line_height_px();
        let base_row = (line_h * self.settings.row_scale).ceil() as u32;

        let mut cells = Vec::with_capacity(grid.row_count());
        let mut row_px = Vec::with_capacity(grid.row_count());
        for row in grid.rows() {
            let lines: Vec<Vec<String>> = row
                .iter()
                .zip(&column_px)
                .enumerate()
                .map(|(column, (cell, &col_w))| {
                    let inner = col_w.saturating_sub(padding * 2) as f32;
                    if cell.chars().count() > self.settings.wrap_threshold_chars {
                        return wrap_words(cell, inner, |s| self.measure_px(s));
                    }
                    let text_px = self.measure_px(cell);
                    if text_px > inner {
                        tracing::debug!(column, text_px, inner, "cell text wider than its column");
                    }
                    vec![cell.clone()]
                })
                .collect();

            let max_lines = lines.iter().map(Vec::len).max().unwrap_or(1);
            let needed = (max_lines as f32 * line_h).ceil() as u32 + padding * 2;
            row_px.push(base_row.max(needed));
            cells.push(lines);
        }

        TablePlan {
            column_px,
            row_px,
            cells,
        }
    }

    fn draw(&self, canvas: &mut RgbImage, plan: &TablePlan, origin_x: u32, origin_y: u32) {
        let grid_color = Rgb(self.settings.grid_color);
        let border = self.settings.border_px;
        let table_w = plan.width();
        let table_h = plan.height();

        if let Some(&header_h) = plan.row_px.first() {
            fill_rect(
                canvas,
                origin_x,
                origin_y,
                table_w,
                header_h,
                Rgb(self.settings.header_fill),
            );
        }

        let mut y = origin_y;
        for (row_idx, lines) in plan.cells.iter().enumerate() {
            let row_h = plan.row_px[row_idx];
            let mut x = origin_x;
            for (col_idx, cell_lines) in lines.iter().enumerate() {
                let col_w = plan.column_px[col_idx];
                self.draw_lines(canvas, cell_lines, x + col_w / 2, y + row_h / 2);
                x += col_w;
            }
            y += row_h;
        }

        // Grid lines over the fills.
        let mut y = origin_y;
        for &row_h in &plan.row_px {
            fill_rect(canvas, origin_x, y, table_w, border, grid_color);
            y += row_h;
        }
        fill_rect(canvas, origin_x, origin_y + table_h, table_w + border, border, grid_color);

        let mut x = origin_x;
        for &col_w in &plan.column_px {
            fill_rect(canvas, x, origin_y, border, table_h, grid_color);
            x += col_w;
        }
        fill_rect(canvas, origin_x + table_w, origin_y, border, table_h + border, grid_color);
    }

    /// Draw `lines` centered on (`cx`, `cy`).
    fn draw_lines(&self, canvas: &mut RgbImage, lines: &[String], cx: u32, cy: u32) {
        let scale = self.scale();
        let scaled = self.font.as_scaled(scale);
        let line_h = self.line_height_px();
        let block_h = line_h * lines.len() as f32;
        let top = cy as f32 - block_h / 2.0;
        let text_offset = (line_h - scaled.height()) / 2.0 + scaled.ascent();

        for (i, line) in lines.iter().enumerate() {
            let baseline = top + i as f32 * line_h + text_offset;
            let mut pen_x = cx as f32 - self.measure_px(line) / 2.0;
            for c in line.chars() {
                let id = scaled.glyph_id(c);
                let glyph = id.with_scale_and_position(scale, point(pen_x, baseline));
                pen_x += scaled.h_advance(id);
                let Some(outlined) = self.font.outline_glyph(glyph) else {
                    continue;
                };
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i64 + i64::from(gx);
                    let py = bounds.min.y as i64 + i64::from(gy);
                    if px < 0 || py < 0 {
                        return;
                    }
                    let (px, py) = (px as u32, py as u32);
                    if px >= canvas.width() || py >= canvas.height() {
                        return;
                    }
                    let pixel = canvas.get_pixel_mut(px, py);
                    let keep = 1.0 - coverage.clamp(0.0, 1.0);
                    for channel in pixel.0.iter_mut() {
                        *channel = (f32::from(*channel) * keep).round() as u8;
                    }
                });
            }
        }
    }
}

fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = (x + w).min(canvas.width());
    let y_end = (y + h).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

/// Crop to the bounding box of non-white pixels plus `pad` pixels on every
/// side. An all-white image is returned unchanged.
pub fn crop_to_content(image: &RgbImage, pad: u32) -> RgbImage {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;

    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel != WHITE {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if min_x == u32::MAX {
        return image.clone();
    }

    let x0 = min_x.saturating_sub(pad);
    let y0 = min_y.saturating_sub(pad);
    let x1 = (max_x + pad + 1).min(image.width());
    let y1 = (max_y + pad + 1).min(image.height());
    image::imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0).to_image()
}
