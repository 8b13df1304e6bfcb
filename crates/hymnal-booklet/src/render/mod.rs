//! Drawing the booklet
//!
//! Rendering goes through the [`DrawingBackend`] trait so page drawing can be
//! exercised without producing a PDF. [`PdfBackend`] is the printpdf
//! implementation used for real output.

mod backend;
mod marks;
mod metrics;
mod page;
mod pdf;
mod qr;

pub use backend::*;
pub use marks::{draw_fold_line, draw_staple_marks};
pub use metrics::helvetica_width_mm;
pub use page::*;
pub use pdf::PdfBackend;
pub use qr::qr_image;
