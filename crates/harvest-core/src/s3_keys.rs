//! Object key conventions.
//!
//! Pure string functions, no SDK dependency. Every generated report lands at
//! the bucket root under a unique name.

use uuid::Uuid;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

pub fn report_pdf(id: Uuid) -> String {
    format!("Portfolio_Optimization_Report_{id}.pdf")
}
