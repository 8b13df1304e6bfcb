//! printpdf implementation of the drawing backend

use super::backend::{DrawColor, DrawingBackend, FontStyle, RasterImage, TextAlign};
use super::metrics::{helvetica_width_mm, to_win_ansi};
use crate::constants::{SHEET_HEIGHT_MM, SHEET_WIDTH_MM, mm_to_pt};
use crate::types::Result;
use printpdf::*;

/// Builds a PDF page by page from drawing calls
///
/// Top-left millimeter coordinates are flipped into PDF space (bottom-left
/// origin, points) as operations are recorded.
pub struct PdfBackend {
    doc: PdfDocument,
    finished: Vec<Vec<Op>>,
    ops: Vec<Op>,
    font_size_pt: f32,
    font_style: FontStyle,
    text_color: DrawColor,
}

impl PdfBackend {
    pub fn new(title: &str) -> Self {
        Self {
            doc: PdfDocument::new(title),
            finished: Vec::new(),
            ops: Vec::new(),
            font_size_pt: 12.0,
            font_style: FontStyle::Normal,
            text_color: DrawColor::BLACK,
        }
    }

    /// Close the last page and serialize the document
    pub fn finish(mut self) -> Vec<u8> {
        self.finished.push(std::mem::take(&mut self.ops));

        self.doc.pages = self
            .finished
            .into_iter()
            .map(|ops| PdfPage::new(Mm(SHEET_WIDTH_MM), Mm(SHEET_HEIGHT_MM), ops))
            .collect();

        // Text is written as raw `Tj` operations, which secure mode drops
        let options = PdfSaveOptions {
            secure: false,
            ..Default::default()
        };
        let mut warnings = Vec::new();
        self.doc.save(&options, &mut warnings)
    }

    fn point(x_mm: f32, y_mm: f32) -> Point {
        Point {
            x: Mm(x_mm).into_pt(),
            y: Mm(SHEET_HEIGHT_MM - y_mm).into_pt(),
        }
    }

    fn color(color: DrawColor) -> Color {
        Color::Rgb(Rgb::new(
            f32::from(color.r) / 255.0,
            f32::from(color.g) / 255.0,
            f32::from(color.b) / 255.0,
            None,
        ))
    }

    fn builtin_font(&self) -> BuiltinFont {
        match self.font_style {
            FontStyle::Normal => BuiltinFont::Helvetica,
            FontStyle::Bold => BuiltinFont::HelveticaBold,
            FontStyle::Italic => BuiltinFont::HelveticaOblique,
            FontStyle::BoldItalic => BuiltinFont::HelveticaBoldOblique,
        }
    }

    fn stroke_path(&mut self, points: &[(f32, f32)], is_closed: bool) {
        let points = points
            .iter()
            .map(|&(x, y)| LinePoint {
                p: Self::point(x, y),
                bezier: false,
            })
            .collect();
        self.ops.push(Op::DrawLine {
            line: Line { points, is_closed },
        });
    }
}

impl DrawingBackend for PdfBackend {
    fn set_font(&mut self, size_pt: f32, style: FontStyle) {
        self.font_size_pt = size_pt;
        self.font_style = style;
    }

    fn set_text_color(&mut self, color: DrawColor) {
        self.text_color = color;
    }

    fn set_draw_color(&mut self, color: DrawColor) {
        self.ops.push(Op::SetOutlineColor {
            col: Self::color(color),
        });
    }

    fn set_line_width(&mut self, width_mm: f32) {
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(mm_to_pt(width_mm)),
        });
    }

    fn set_line_dash(&mut self, dash: Option<(f32, f32)>) {
        let pattern = match dash {
            Some((dash_mm, gap_mm)) => LineDashPattern {
                dash_1: Some(mm_to_pt(dash_mm).round() as i64),
                gap_1: Some(mm_to_pt(gap_mm).round() as i64),
                ..Default::default()
            },
            None => LineDashPattern::default(),
        };
        self.ops.push(Op::SetLineDashPattern { dash: pattern });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign) {
        if text.is_empty() {
            return;
        }

        let x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - self.text_width(text) / 2.0,
            TextAlign::Right => x - self.text_width(text),
        };
        let font = self.builtin_font();

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetFillColor {
            col: Self::color(self.text_color),
        });
        self.ops.push(Op::SetTextCursor {
            pos: Self::point(x, y),
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            font,
            size: Pt(self.font_size_pt),
        });
        // printpdf passes builtin-font strings through as UTF-8, so the
        // cp1252 bytes go out as a raw `Tj`. The empty write keeps the font
        // in the page resources.
        self.ops.push(Op::WriteTextBuiltinFont {
            items: Vec::new(),
            font,
        });
        self.ops.push(Op::Unknown {
            key: "Tj".to_string(),
            value: vec![DictItem::String {
                data: to_win_ansi(text),
                literal: false,
            }],
        });
        self.ops.push(Op::EndTextSection);
    }

    fn text_width(&self, text: &str) -> f32 {
        helvetica_width_mm(text, self.font_style, self.font_size_pt)
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.stroke_path(&[(x1, y1), (x2, y2)], false);
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.stroke_path(
            &[
                (x, y),
                (x + width, y),
                (x + width, y + height),
                (x, y + height),
            ],
            true,
        );
    }

    fn draw_image(
        &mut self,
        image: &RasterImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        if image.width == 0 || image.height == 0 || image.pixels.len() != image.width * image.height
        {
            return Err(crate::types::BookletError::Image(format!(
                "malformed {}x{} raster with {} bytes",
                image.width,
                image.height,
                image.pixels.len()
            )));
        }

        let raw = RawImage {
            pixels: RawImageData::U8(image.pixels.clone()),
            width: image.width,
            height: image.height,
            data_format: RawImageFormat::R8,
            tag: Vec::new(),
        };
        let id = self.doc.add_image(&raw);

        // At 72 dpi one pixel is one point
        let origin = Self::point(x, y + height);
        self.ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(origin.x),
                translate_y: Some(origin.y),
                scale_x: Some(mm_to_pt(width) / image.width as f32),
                scale_y: Some(mm_to_pt(height) / image.height as f32),
                dpi: Some(72.0),
                ..Default::default()
            },
        });
        Ok(())
    }

    fn new_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.ops));
    }
}
