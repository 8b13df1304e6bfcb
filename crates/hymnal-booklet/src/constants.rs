//! Shared constants for booklet generation
//!
//! The booklet format is fixed: US Letter, landscape, two columns per side,
//! folded once down the middle.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Sheet Dimensions
// =============================================================================

/// Sheet width in mm (US Letter, landscape)
pub const SHEET_WIDTH_MM: f32 = 279.4;

/// Sheet height in mm (US Letter, landscape)
pub const SHEET_HEIGHT_MM: f32 = 215.9;

/// Logical pages per physical sheet (two per side, folded once)
pub const PAGES_PER_SHEET: usize = 4;

// =============================================================================
// Guide Marks
// =============================================================================

/// Fold line gray level (0-255)
pub const FOLD_LINE_GRAY: u8 = 180;

/// Fold line width in mm
pub const FOLD_LINE_WIDTH_MM: f32 = 0.3;

/// Fold line dash and gap length in mm
pub const FOLD_LINE_DASH_MM: f32 = 2.0;

/// Staple tick gray level (0-255)
pub const STAPLE_MARK_GRAY: u8 = 150;

/// Staple tick width in mm
pub const STAPLE_MARK_WIDTH_MM: f32 = 0.4;

/// Length of each staple tick in mm
pub const STAPLE_MARK_LENGTH_MM: f32 = 8.0;

/// Staple positions as a fraction of sheet height
pub const STAPLE_POSITIONS: [f32; 2] = [0.15, 0.85];

// =============================================================================
// Content Layout
// =============================================================================

/// Vertical space reserved for the rule under a song's author
pub const DIVIDER_GAP_MM: f32 = 2.0;

/// Vertical space a blank lyric line takes
pub const BLANK_LINE_GAP_MM: f32 = 1.5;

/// Spacing after each section in the height estimate
pub const ESTIMATED_SECTION_SPACING_MM: f32 = 1.5;

/// Spacing after each section when rendering
pub const RENDERED_SECTION_SPACING_MM: f32 = 2.5;

/// Characters per line assumed by the height estimate
pub const ESTIMATED_CHARS_PER_LINE: usize = 50;
