//! Drawing a single logical page into one column of a sheet side

use super::backend::{DrawColor, DrawingBackend, FontStyle, RasterImage, TextAlign};
use super::qr::qr_image;
use crate::constants::{BLANK_LINE_GAP_MM, RENDERED_SECTION_SPACING_MM};
use crate::layout::{LogicalPage, PreparedSongContent, Section, SongPlacement, wrap_text};
use crate::options::{BookletOptions, QrLink};
use crate::types::TocEntry;
use log::error;

// =============================================================================
// Title page layout
// =============================================================================

const TITLE_TOP_MM: f32 = 25.0;
const TITLE_FONT_PT: f32 = 24.0;
const DATE_FONT_PT: f32 = 10.0;
const HEADING_FONT_PT: f32 = 14.0;
const FOOTER_FONT_PT: f32 = 8.0;
/// Song list indent from the column edge
const TOC_INDENT_MM: f32 = 20.0;
const TOC_LINE_HEIGHT_MM: f32 = 4.5;
/// Distance of the quote's baseline from the bottom of the sheet
const FOOTER_OFFSET_MM: f32 = 15.0;

// =============================================================================
// Back cover layout
// =============================================================================

const BACK_COVER_TOP_MM: f32 = 30.0;
const BACK_HEADING_FONT_PT: f32 = 12.0;
const CAPTION_FONT_PT: f32 = 8.0;
const CREDITS_HEADING_FONT_PT: f32 = 10.0;
const CREDIT_FONT_PT: f32 = 8.0;
const CREDIT_LINE_HEIGHT_MM: f32 = 4.0;
/// Distance of the credits heading from the bottom of the sheet
const CREDITS_OFFSET_MM: f32 = 45.0;

/// QR rasters for the back cover, generated once per booklet
///
/// A missing image is drawn as a placeholder box.
#[derive(Debug, Clone, Default)]
pub struct BackCoverArt {
    pub mailing_list: Option<RasterImage>,
    pub website: Option<RasterImage>,
}

impl BackCoverArt {
    pub fn generate(options: &BookletOptions) -> Self {
        Self {
            mailing_list: encode_link(&options.mailing_list),
            website: encode_link(&options.website),
        }
    }
}

fn encode_link(link: &QrLink) -> Option<RasterImage> {
    match qr_image(&link.url) {
        Ok(image) => Some(image),
        Err(e) => {
            error!("Failed to encode QR code for {}: {}", link.url, e);
            None
        }
    }
}

/// Draws logical pages for one print job
pub struct PageRenderer<'a> {
    options: &'a BookletOptions,
    date_label: String,
    art: BackCoverArt,
}

impl<'a> PageRenderer<'a> {
    pub fn new(options: &'a BookletOptions, date_label: impl Into<String>, art: BackCoverArt) -> Self {
        Self {
            options,
            date_label: date_label.into(),
            art,
        }
    }

    /// Draw `page` into the column whose left edge is `x`
    pub fn render_page<B: DrawingBackend + ?Sized>(&self, backend: &mut B, page: &LogicalPage, x: f32) {
        match page {
            LogicalPage::Title(toc) => self.render_title_page(backend, toc, x),
            LogicalPage::Content(placements) => {
                for SongPlacement { content, y_mm } in placements {
                    self.render_song(backend, content, x, *y_mm);
                }
            }
            LogicalPage::BackCover => self.render_back_cover(backend, x),
            LogicalPage::Blank => {}
        }
    }

    fn render_title_page<B: DrawingBackend + ?Sized>(
        &self,
        backend: &mut B,
        toc: &[TocEntry],
        x: f32,
    ) {
        let options = self.options;
        let column_width = options.column_width_mm();
        let center_x = x + column_width / 2.0;
        let mut y = TITLE_TOP_MM;

        backend.set_font(TITLE_FONT_PT, FontStyle::Bold);
        backend.set_text_color(DrawColor::BLACK);
        backend.draw_text(&options.title, center_x, y, TextAlign::Center);
        y += 10.0;

        backend.set_font(DATE_FONT_PT, FontStyle::Normal);
        backend.set_text_color(DrawColor::gray(150));
        backend.draw_text(&self.date_label, center_x, y, TextAlign::Center);
        y += 12.0;

        backend.set_font(HEADING_FONT_PT, FontStyle::Bold);
        backend.set_text_color(DrawColor::BLACK);
        backend.draw_text("Song List", center_x, y, TextAlign::Center);
        y += 8.0;

        backend.set_font(options.font_sizes.toc, FontStyle::Normal);
        let toc_x = x + TOC_INDENT_MM;
        let max_width = column_width - 2.0 * TOC_INDENT_MM;
        let shown = toc.len().min(options.max_toc_entries);

        for entry in &toc[..shown] {
            for line in wrap_text(&entry.label(), max_width, |s| backend.text_width(s)) {
                backend.draw_text(&line, toc_x, y, TextAlign::Left);
                y += TOC_LINE_HEIGHT_MM;
            }
        }

        if toc.len() > shown {
            backend.set_font(options.font_sizes.toc, FontStyle::Italic);
            backend.draw_text("...", center_x, y + 2.0, TextAlign::Center);
        }

        backend.set_font(FOOTER_FONT_PT, FontStyle::Italic);
        backend.set_text_color(DrawColor::gray(100));
        backend.draw_text(
            &options.quote,
            center_x,
            options.sheet_height_mm() - FOOTER_OFFSET_MM,
            TextAlign::Center,
        );
    }

    fn render_song<B: DrawingBackend + ?Sized>(
        &self,
        backend: &mut B,
        content: &PreparedSongContent,
        x: f32,
        top: f32,
    ) {
        let options = self.options;
        let fonts = &options.font_sizes;
        let line_height = options.line_height_mm;
        let column_width = options.column_width_mm();
        let lyrics_x = x + options.label_width_mm + 2.0;
        let lyrics_width = column_width - options.label_width_mm - 3.0;
        let mut y = top;

        backend.set_font(fonts.title, FontStyle::Bold);
        backend.set_text_color(DrawColor::BLACK);
        for line in wrap_text(&content.title, column_width, |s| backend.text_width(s)) {
            backend.draw_text(&line, x, y, TextAlign::Left);
            y += line_height;
        }

        backend.set_font(fonts.author, FontStyle::Italic);
        backend.set_text_color(DrawColor::gray(100));
        backend.draw_text(&content.author, x, y, TextAlign::Left);
        y += line_height + 1.0;

        backend.set_draw_color(DrawColor::gray(200));
        backend.set_line_width(0.1);
        backend.draw_line(x, y, x + column_width, y);
        y += 7.0;

        for section in &content.sections {
            match section {
                Section::Repeat { text, .. } => {
                    backend.set_font(fonts.section_label, FontStyle::Normal);
                    backend.set_text_color(DrawColor::gray(150));
                    backend.draw_text(section.label(), x, y, TextAlign::Left);

                    backend.set_font(fonts.lyrics, FontStyle::Italic);
                    backend.set_text_color(DrawColor::BLACK);
                    backend.draw_text(text, lyrics_x, y, TextAlign::Left);
                    y += line_height;
                }
                Section::Full { label, lines } => {
                    let mut label_drawn = false;
                    for line in lines {
                        if line.is_empty() {
                            y += BLANK_LINE_GAP_MM;
                            continue;
                        }

                        backend.set_font(fonts.lyrics, FontStyle::Normal);
                        let wrapped = wrap_text(line, lyrics_width, |s| backend.text_width(s));
                        for piece in wrapped {
                            if !label_drawn {
                                backend.set_font(fonts.section_label, FontStyle::Normal);
                                backend.set_text_color(DrawColor::gray(150));
                                backend.draw_text(label, x, y, TextAlign::Left);
                                label_drawn = true;
                            }

                            backend.set_font(fonts.lyrics, FontStyle::Normal);
                            backend.set_text_color(DrawColor::BLACK);
                            backend.draw_text(&piece, lyrics_x, y, TextAlign::Left);
                            y += line_height;
                        }
                    }
                }
            }
            y += RENDERED_SECTION_SPACING_MM;
        }
    }

    fn render_back_cover<B: DrawingBackend + ?Sized>(&self, backend: &mut B, x: f32) {
        let options = self.options;
        let center_x = x + options.column_width_mm() / 2.0;
        let qr_size = options.qr_size_mm;
        let qr_x = center_x - qr_size / 2.0;
        let mut y = BACK_COVER_TOP_MM;

        backend.set_font(BACK_HEADING_FONT_PT, FontStyle::Bold);
        backend.set_text_color(DrawColor::BLACK);
        backend.draw_text("Other Stuff", center_x, y, TextAlign::Center);
        y += 12.0;

        let links = [
            (&options.mailing_list, self.art.mailing_list.as_ref()),
            (&options.website, self.art.website.as_ref()),
        ];
        for (link, image) in links {
            self.draw_qr(backend, image, qr_x, y);
            y += qr_size + 6.0;

            backend.set_font(CAPTION_FONT_PT, FontStyle::Normal);
            backend.set_text_color(DrawColor::gray(60));
            backend.draw_text(&link.caption, center_x, y, TextAlign::Center);
            y += 10.0;
        }

        y = options.sheet_height_mm() - CREDITS_OFFSET_MM;
        backend.set_font(CREDITS_HEADING_FONT_PT, FontStyle::Bold);
        backend.set_text_color(DrawColor::BLACK);
        backend.draw_text("Thanks", center_x, y, TextAlign::Center);
        y += 6.0;

        backend.set_font(CREDIT_FONT_PT, FontStyle::Italic);
        backend.set_text_color(DrawColor::gray(60));
        for credit in &options.credits {
            let line = format!("{} - {}", credit.name, credit.role);
            backend.draw_text(&line, center_x, y, TextAlign::Center);
            y += CREDIT_LINE_HEIGHT_MM;
        }
    }

    fn draw_qr<B: DrawingBackend + ?Sized>(
        &self,
        backend: &mut B,
        image: Option<&RasterImage>,
        x: f32,
        y: f32,
    ) {
        let size = self.options.qr_size_mm;

        let drawn = match image {
            Some(image) => match backend.draw_image(image, x, y, size, size) {
                Ok(()) => true,
                Err(e) => {
                    error!("Failed to draw QR code: {}", e);
                    false
                }
            },
            None => false,
        };

        if !drawn {
            backend.set_draw_color(DrawColor::gray(200));
            backend.set_line_width(0.1);
            backend.draw_rect(x, y, size, size);
            backend.set_font(CAPTION_FONT_PT, FontStyle::Normal);
            backend.set_text_color(DrawColor::gray(150));
            backend.draw_text("QR Code", x + size / 2.0, y + size / 2.0, TextAlign::Center);
        }
    }
}
