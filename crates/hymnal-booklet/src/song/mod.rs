//! Song records and the sources they come from
//!
//! Songs are stored one per YAML file:
//!
//! ```yaml
//! name: Amazing Grace
//! author: John Newton
//! arrangement: [verse1, chorus, verse2, chorus]
//! elements:
//!   verse1:
//!     - Amazing grace how sweet the sound
//!     -
//!     - That saved a wretch like me
//! ```
//!
//! An empty `-` item is a blank spacing line.

mod convert;
mod repository;

pub use convert::{convert_file, parse_lyrics_text, to_yaml};
pub use repository::{
    DirectorySongRepository, FailedSong, LoadedSongs, SongCache, SongRepository, fetch_all,
};

use crate::types::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static KEY_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\D+)(\d+)").unwrap());

/// A parsed song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Identifier the song was requested by (its file stem)
    pub id: String,
    pub name: String,
    pub author: String,
    /// Element keys in performance order; keys may repeat
    pub arrangement: Vec<String>,
    /// Lyric lines per element key. Empty strings are blank spacing lines.
    pub elements: BTreeMap<String, Vec<String>>,
}

/// On-disk shape of a song file
#[derive(Debug, Deserialize)]
struct SongFile {
    name: Option<Value>,
    #[serde(default)]
    author: Option<Value>,
    arrangement: Option<Vec<Value>>,
    #[serde(default)]
    elements: Option<BTreeMap<String, Option<Vec<Value>>>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SongDocument<'a> {
    pub name: &'a str,
    pub author: &'a str,
    pub arrangement: &'a [String],
    pub elements: &'a BTreeMap<String, Vec<String>>,
}

impl Song {
    /// Parse a song from the contents of its YAML file
    pub fn from_yaml(id: impl Into<String>, text: &str) -> Result<Self> {
        let id = id.into();
        let file: SongFile = serde_yaml::from_str(text)?;
        let invalid = |reason: &str| BookletError::InvalidSong {
            id: id.clone(),
            reason: reason.to_string(),
        };

        let name = file
            .name
            .as_ref()
            .and_then(scalar_text)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| invalid("missing name"))?;
        let author = file.author.as_ref().and_then(scalar_text).unwrap_or_default();

        let arrangement = file
            .arrangement
            .ok_or_else(|| invalid("missing arrangement"))?
            .iter()
            .map(|key| scalar_text(key).ok_or_else(|| invalid("arrangement keys must be text")))
            .collect::<Result<Vec<_>>>()?;

        let mut elements = BTreeMap::new();
        for (key, lines) in file.elements.unwrap_or_default() {
            let lines = lines
                .unwrap_or_default()
                .iter()
                .map(|line| {
                    scalar_text(line)
                        .ok_or_else(|| invalid(&format!("element '{}' has a non-text line", key)))
                })
                .collect::<Result<Vec<_>>>()?;
            elements.insert(key, lines);
        }

        Ok(Self {
            id,
            name,
            author,
            arrangement,
            elements,
        })
    }

    pub(crate) fn document(&self) -> SongDocument<'_> {
        SongDocument {
            name: &self.name,
            author: &self.author,
            arrangement: &self.arrangement,
            elements: &self.elements,
        }
    }

    /// Lyrics for an element key, if the song defines it
    pub fn lyrics(&self, key: &str) -> Option<&[String]> {
        self.elements.get(key).map(Vec::as_slice)
    }
}

/// Text form of a YAML scalar; `None` for sequences and mappings
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Separate an element key's name from its number: `verse1` becomes `verse 1`.
///
/// Keys without a number are returned unchanged.
pub fn spaced_key(key: &str) -> String {
    KEY_NUMBER.replacen(key, 1, "$1 $2").into_owned()
}

/// Plain-text rendering of a song for reading on screen
///
/// Every arrangement entry is printed in full, repeats included; keys the
/// song doesn't define are skipped.
pub fn render_song_text(song: &Song) -> String {
    let mut out = String::new();
    out.push_str(&song.name);
    out.push('\n');
    if !song.author.is_empty() {
        out.push_str(&song.author);
        out.push('\n');
    }

    for key in &song.arrangement {
        let Some(lines) = song.lyrics(key) else {
            continue;
        };
        out.push('\n');
        out.push_str(&format!("[{}]\n", spaced_key(key)));
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}
