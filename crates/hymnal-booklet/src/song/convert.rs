//! Plain-text lyrics to song YAML
//!
//! Text input looks like:
//!
//! ```text
//! Amazing Grace
//! John Newton
//!
//! verse1, chorus, verse2, chorus
//!
//! Verse 1
//! Amazing grace how sweet the sound
//!
//! Chorus
//! ...
//! ```

use super::Song;
use crate::types::*;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ELEMENT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(verse|chorus|bridge|pre\s?chorus|tag|outro|intro|interlude)\s*(\d+)?$")
        .unwrap()
});

/// Element key for a header line, e.g. `Pre Chorus 2` gives `prechorus2`
fn element_key(line: &str) -> Option<String> {
    let caps = ELEMENT_HEADER.captures(line)?;
    let kind: String = caps[1]
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let number = caps.get(2).map_or("", |m| m.as_str());
    Some(format!("{}{}", kind, number))
}

/// Parse a plain-text lyrics sheet into a song
///
/// The id is left empty; callers that know the file name fill it in.
pub fn parse_lyrics_text(text: &str) -> Result<Song> {
    let invalid = |reason: &str| BookletError::InvalidSong {
        id: String::new(),
        reason: reason.to_string(),
    };

    let lines: Vec<&str> = text.trim().lines().map(str::trim).collect();

    // Name and author are positional; the author line may be blank
    let name = lines
        .first()
        .filter(|line| !line.is_empty())
        .ok_or_else(|| invalid("missing name"))?
        .to_string();
    let author = lines.get(1).copied().unwrap_or_default().to_string();

    let mut i = 2;
    while i < lines.len() && lines[i].is_empty() {
        i += 1;
    }
    let arrangement = lines
        .get(i)
        .ok_or_else(|| invalid("missing arrangement"))?
        .split(',')
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .collect();
    i += 1;

    let mut elements: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for &line in &lines[i..] {
        if let Some(key) = element_key(line) {
            if let Some(done) = current.take() {
                trim_trailing_blanks(elements.entry(done).or_default());
            }
            elements.insert(key.clone(), Vec::new());
            current = Some(key);
            continue;
        }

        let Some(key) = &current else {
            continue;
        };
        let block = elements.entry(key.clone()).or_default();
        // Blank lines only count once the block has started
        if !line.is_empty() || !block.is_empty() {
            block.push(line.to_string());
        }
    }

    if let Some(done) = current {
        trim_trailing_blanks(elements.entry(done).or_default());
    }

    Ok(Song {
        id: String::new(),
        name,
        author,
        arrangement,
        elements,
    })
}

fn trim_trailing_blanks(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
}

/// Serialize a song in the YAML format song files use
pub fn to_yaml(song: &Song) -> Result<String> {
    Ok(serde_yaml::to_string(&song.document())?)
}

/// Convert a text lyrics file to a `.yaml` file beside it
///
/// Returns the path written.
pub async fn convert_file(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;

    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut song = parse_lyrics_text(&text).map_err(|e| match e {
        BookletError::InvalidSong { reason, .. } => BookletError::InvalidSong {
            id: id.clone(),
            reason,
        },
        other => other,
    })?;
    song.id = id;

    let output = path.with_extension("yaml");
    tokio::fs::write(&output, to_yaml(&song)?).await?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "Amazing Grace
John Newton

verse1, chorus, verse2, chorus

Verse 1

Amazing grace how sweet the sound
That saved a wretch like me

I once was lost

Chorus
My chains are gone


Verse2
Twas grace that taught
";

    #[test]
    fn test_element_key() {
        assert_eq!(element_key("Verse 1").as_deref(), Some("verse1"));
        assert_eq!(element_key("Pre Chorus 2").as_deref(), Some("prechorus2"));
        assert_eq!(element_key("CHORUS").as_deref(), Some("chorus"));
        assert_eq!(element_key("Verse one"), None);
        assert_eq!(element_key("Coda"), None);
    }

    #[test]
    fn test_parse_lyrics_text() {
        let song = parse_lyrics_text(SHEET).unwrap();
        assert_eq!(song.name, "Amazing Grace");
        assert_eq!(song.author, "John Newton");
        assert_eq!(song.arrangement, vec!["verse1", "chorus", "verse2", "chorus"]);

        // Leading blank dropped, interior blank kept
        assert_eq!(
            song.elements["verse1"],
            vec![
                "Amazing grace how sweet the sound",
                "That saved a wretch like me",
                "",
                "I once was lost"
            ]
        );
        // Trailing blanks removed
        assert_eq!(song.elements["chorus"], vec!["My chains are gone"]);
        assert_eq!(song.elements["verse2"], vec!["Twas grace that taught"]);
    }

    #[test]
    fn test_parse_lyrics_text_too_short() {
        assert!(parse_lyrics_text("Only A Title\n").is_err());
    }

    #[test]
    fn test_yaml_round_trip_keeps_blank_lines() {
        let song = parse_lyrics_text(SHEET).unwrap();
        let yaml = to_yaml(&song).unwrap();
        let parsed = Song::from_yaml("", &yaml).unwrap();
        assert_eq!(parsed.elements, song.elements);
        assert_eq!(parsed.arrangement, song.arrangement);
    }
}
