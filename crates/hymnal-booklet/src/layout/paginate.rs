//! Greedy pagination of songs into logical pages

use super::content::{PreparedSongContent, estimate_height, prepare_content};
use crate::options::BookletOptions;
use crate::song::Song;
use crate::types::TocEntry;
use log::debug;

/// A song placed on a content page
#[derive(Debug, Clone, PartialEq)]
pub struct SongPlacement {
    pub content: PreparedSongContent,
    /// Baseline of the song title, in mm from the top of the sheet
    pub y_mm: f32,
}

/// One page of the booklet in reading order
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalPage {
    /// Cover with the song list
    Title(Vec<TocEntry>),
    /// Songs stacked top to bottom
    Content(Vec<SongPlacement>),
    /// Outside back cover with links and credits
    BackCover,
    Blank,
}

impl LogicalPage {
    pub fn is_blank(&self) -> bool {
        matches!(self, LogicalPage::Blank)
    }

    /// Number of songs placed on this page
    pub fn song_count(&self) -> usize {
        match self {
            LogicalPage::Content(placements) => placements.len(),
            _ => 0,
        }
    }
}

/// Lay out songs as logical pages: the title page first, then content pages.
///
/// Songs are numbered 1..k in the order given and packed first-fit: a song
/// that would run past the bottom margin starts a new page. A song taller than
/// a whole page is still placed, alone, at the top of its page. Songs are never
/// split across pages.
pub fn paginate(songs: &[Song], toc: Vec<TocEntry>, options: &BookletOptions) -> Vec<LogicalPage> {
    let mut pages = vec![LogicalPage::Title(toc)];
    let mut current: Vec<SongPlacement> = Vec::new();
    let mut y = options.top_margin_mm;
    let bottom = options.content_bottom_mm();

    for (i, song) in songs.iter().enumerate() {
        let content = prepare_content(song, i + 1);
        let height = estimate_height(&content, options);

        if y + height > bottom && !current.is_empty() {
            debug!(
                "Page {} full at {:.1}mm, '{}' ({:.1}mm) starts a new page",
                pages.len(),
                y,
                song.name,
                height
            );
            pages.push(LogicalPage::Content(std::mem::take(&mut current)));
            y = options.top_margin_mm;
        }

        current.push(SongPlacement { content, y_mm: y });
        y += height + options.song_gap_mm;
    }

    if !current.is_empty() {
        pages.push(LogicalPage::Content(current));
    }

    pages
}
