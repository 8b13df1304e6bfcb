//! Song content as it is laid out in the booklet

use crate::constants::{
    BLANK_LINE_GAP_MM, DIVIDER_GAP_MM, ESTIMATED_CHARS_PER_LINE, ESTIMATED_SECTION_SPACING_MM,
};
use crate::options::BookletOptions;
use crate::song::{Song, spaced_key};
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

static KEY_PARTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\D+)(\d*)").unwrap());

/// Label printed beside a repeated section
pub const REPEAT_LABEL: &str = "REPEAT";

/// One block of a song as printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// First appearance of an element: label plus every lyric line
    Full { label: String, lines: Vec<String> },
    /// Later appearance of an element already printed in full
    Repeat {
        /// Element key being repeated
        key: String,
        /// Parenthesized key, e.g. `(chorus 1)`
        text: String,
    },
}

impl Section {
    pub fn label(&self) -> &str {
        match self {
            Section::Full { label, .. } => label,
            Section::Repeat { .. } => REPEAT_LABEL,
        }
    }

    pub fn is_repeat(&self) -> bool {
        matches!(self, Section::Repeat { .. })
    }
}

/// A song prepared for one print job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSongContent {
    /// `N. Name`
    pub title: String,
    pub author: String,
    pub sections: Vec<Section>,
}

/// Compose a song's printed sections.
///
/// Arrangement keys the song doesn't define are skipped. The first time a key
/// appears it is printed in full; later appearances become repeat markers.
pub fn prepare_content(song: &Song, number: usize) -> PreparedSongContent {
    let mut printed = HashSet::new();
    let mut sections = Vec::new();

    for key in &song.arrangement {
        let Some(lines) = song.lyrics(key) else {
            continue;
        };

        if printed.insert(key.as_str()) {
            sections.push(Section::Full {
                label: format_element_label(key),
                lines: lines.to_vec(),
            });
        } else {
            sections.push(Section::Repeat {
                key: key.clone(),
                text: format!("({})", spaced_key(key)),
            });
        }
    }

    PreparedSongContent {
        title: format!("{}. {}", number, song.name),
        author: song.author.clone(),
        sections,
    }
}

/// Human-readable label for an element key: `prechorus2` becomes `Pre-Chorus 2`.
///
/// Unknown element names pass through unchanged.
pub fn format_element_label(key: &str) -> String {
    KEY_PARTS
        .replacen(key, 1, |caps: &Captures| {
            let kind = &caps[1];
            let label = match kind.to_lowercase().as_str() {
                "verse" => "Verse",
                "chorus" => "Chorus",
                "bridge" => "Bridge",
                "prechorus" => "Pre-Chorus",
                "tag" => "Tag",
                "outro" => "Outro",
                "intro" => "Intro",
                "interlude" => "Interlude",
                "refrain" => "Refrain",
                _ => kind,
            };
            match &caps[2] {
                "" => label.to_string(),
                number => format!("{} {}", label, number),
            }
        })
        .into_owned()
}

/// Estimated vertical space a song needs, in mm.
///
/// This is a character-count heuristic, not a measurement: each lyric line is
/// assumed to wrap every 50 characters. Rendering wraps by measured width, so
/// the two can disagree.
pub fn estimate_height(content: &PreparedSongContent, options: &BookletOptions) -> f32 {
    let fonts = &options.font_sizes;
    let line_height = options.line_height_mm;

    let mut height = fonts.title * 0.4 + 1.5;
    height += fonts.author * 0.4 + 3.0;
    height += DIVIDER_GAP_MM;

    for section in &content.sections {
        match section {
            Section::Repeat { .. } => height += line_height,
            Section::Full { lines, .. } => {
                for line in lines {
                    if line.is_empty() {
                        height += BLANK_LINE_GAP_MM;
                    } else {
                        let wraps = line.chars().count().div_ceil(ESTIMATED_CHARS_PER_LINE);
                        height += wraps as f32 * line_height;
                    }
                }
            }
        }
        height += ESTIMATED_SECTION_SPACING_MM;
    }

    height
}
