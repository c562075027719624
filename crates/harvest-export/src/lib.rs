//! harvest-export
//!
//! Report PDF generation: markdown tables are parsed, rasterized, and laid out
//! between prose blocks on paginated A4 pages.

pub mod assets;
pub mod content;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod pdf;
pub mod raster;
pub mod styles;
pub mod table;

pub use assets::ReportAssets;
pub use error::ExportError;
pub use pdf::{ReportRenderer, ReportWriter, generate_pdf};
