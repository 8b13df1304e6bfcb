use crate::types::Result;

/// Font style within the Helvetica family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

/// Horizontal anchoring of drawn text relative to its x coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DrawColor {
    pub const BLACK: DrawColor = DrawColor::gray(0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }
}

/// An 8-bit grayscale raster, row-major from the top-left pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// 2D drawing surface the page renderer draws onto.
///
/// Coordinates are millimeters from the top-left corner of the sheet with y
/// growing downward. Text y is the baseline. Font sizes are in points.
pub trait DrawingBackend {
    fn set_font(&mut self, size_pt: f32, style: FontStyle);
    fn set_text_color(&mut self, color: DrawColor);
    fn set_draw_color(&mut self, color: DrawColor);
    fn set_line_width(&mut self, width_mm: f32);
    /// Dash and gap lengths in mm, or `None` for a solid line
    fn set_line_dash(&mut self, dash: Option<(f32, f32)>);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign);
    /// Width of `text` in mm at the current font
    fn text_width(&self, text: &str) -> f32;
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// Stroke a rectangle outline
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Place an image scaled into the given box
    fn draw_image(
        &mut self,
        image: &RasterImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()>;
    /// Finish the current page and start a new one
    fn new_page(&mut self);
}
