#![allow(dead_code)]

use hymnal_booklet::render::{DrawColor, DrawingBackend, FontStyle, RasterImage, TextAlign};
use hymnal_booklet::{BookletError, Result, Song};
use std::collections::BTreeMap;

/// Width of every character in mm, regardless of font
pub const CHAR_WIDTH_MM: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Text {
        text: String,
        x: f32,
        y: f32,
        align: TextAlign,
        size: f32,
        style: FontStyle,
        color: DrawColor,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        dashed: bool,
        color: DrawColor,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    NewPage,
}

/// Drawing backend that records every call
#[derive(Debug)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    pub fail_images: bool,
    size: f32,
    style: FontStyle,
    text_color: DrawColor,
    draw_color: DrawColor,
    dashed: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_images: false,
            size: 12.0,
            style: FontStyle::Normal,
            text_color: DrawColor::BLACK,
            draw_color: DrawColor::BLACK,
            dashed: false,
        }
    }

    pub fn failing_images() -> Self {
        Self {
            fail_images: true,
            ..Self::new()
        }
    }

    /// Every drawn string, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_calls(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Text { .. }))
            .collect()
    }

    pub fn lines(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Line { .. }))
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Calls split at page breaks
    pub fn pages(&self) -> Vec<Vec<&Call>> {
        let mut pages = vec![Vec::new()];
        for call in &self.calls {
            match call {
                Call::NewPage => pages.push(Vec::new()),
                other => pages.last_mut().unwrap().push(other),
            }
        }
        pages
    }
}

impl DrawingBackend for RecordingBackend {
    fn set_font(&mut self, size_pt: f32, style: FontStyle) {
        self.size = size_pt;
        self.style = style;
    }

    fn set_text_color(&mut self, color: DrawColor) {
        self.text_color = color;
    }

    fn set_draw_color(&mut self, color: DrawColor) {
        self.draw_color = color;
    }

    fn set_line_width(&mut self, _width_mm: f32) {}

    fn set_line_dash(&mut self, dash: Option<(f32, f32)>) {
        self.dashed = dash.is_some();
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign) {
        self.calls.push(Call::Text {
            text: text.to_string(),
            x,
            y,
            align,
            size: self.size,
            style: self.style,
            color: self.text_color,
        });
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * CHAR_WIDTH_MM
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.calls.push(Call::Line {
            x1,
            y1,
            x2,
            y2,
            dashed: self.dashed,
            color: self.draw_color,
        });
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(Call::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_image(
        &mut self,
        _image: &RasterImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        if self.fail_images {
            return Err(BookletError::Image("image loading disabled".to_string()));
        }
        self.calls.push(Call::Image {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn new_page(&mut self) {
        self.calls.push(Call::NewPage);
    }
}

/// Build a song from an arrangement and `(key, lines)` pairs
pub fn song(id: &str, name: &str, arrangement: &[&str], elements: Vec<(&str, Vec<&str>)>) -> Song {
    Song {
        id: id.to_string(),
        name: name.to_string(),
        author: "Anonymous".to_string(),
        arrangement: arrangement.iter().map(|s| s.to_string()).collect(),
        elements: elements
            .into_iter()
            .map(|(key, lines)| (key.to_string(), lines.into_iter().map(String::from).collect()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// A short song with one verse
pub fn short_song(id: &str) -> Song {
    song(
        id,
        &format!("Song {}", id),
        &["verse1"],
        vec![("verse1", vec!["line one", "line two"])],
    )
}

pub fn song_yaml(name: &str, lines: &[&str]) -> String {
    let mut yaml = format!("name: {}\nauthor: Anonymous\narrangement: [verse1]\nelements:\n  verse1:\n", name);
    for line in lines {
        yaml.push_str(&format!("    - {}\n", line));
    }
    yaml
}
