//! Folding and stapling guides

use super::backend::{DrawColor, DrawingBackend};
use crate::constants::{
    FOLD_LINE_DASH_MM, FOLD_LINE_GRAY, FOLD_LINE_WIDTH_MM, STAPLE_MARK_GRAY,
    STAPLE_MARK_LENGTH_MM, STAPLE_MARK_WIDTH_MM, STAPLE_POSITIONS,
};
use crate::options::BookletOptions;

/// Dashed vertical line down the center of the sheet, inside the side margins
pub fn draw_fold_line<B: DrawingBackend + ?Sized>(backend: &mut B, options: &BookletOptions) {
    let center_x = options.sheet_width_mm() / 2.0;

    backend.set_draw_color(DrawColor::gray(FOLD_LINE_GRAY));
    backend.set_line_width(FOLD_LINE_WIDTH_MM);
    backend.set_line_dash(Some((FOLD_LINE_DASH_MM, FOLD_LINE_DASH_MM)));
    backend.draw_line(
        center_x,
        options.side_margin_mm,
        center_x,
        options.sheet_height_mm() - options.side_margin_mm,
    );
    backend.set_line_dash(None);
}

/// Short horizontal ticks across the fold where the staples go
pub fn draw_staple_marks<B: DrawingBackend + ?Sized>(backend: &mut B, options: &BookletOptions) {
    let center_x = options.sheet_width_mm() / 2.0;
    let half = STAPLE_MARK_LENGTH_MM / 2.0;

    backend.set_draw_color(DrawColor::gray(STAPLE_MARK_GRAY));
    backend.set_line_width(STAPLE_MARK_WIDTH_MM);
    backend.set_line_dash(None);

    for fraction in STAPLE_POSITIONS {
        let y = options.sheet_height_mm() * fraction;
        backend.draw_line(center_x - half, y, center_x + half, y);
    }
}
