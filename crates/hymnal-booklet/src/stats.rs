use crate::constants::PAGES_PER_SHEET;
use crate::song::LoadedSongs;

/// Summary of a booklet, available before anything is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookletStatistics {
    /// Ids listed in the setlist
    pub songs_requested: usize,
    /// Songs that loaded and appear in the booklet
    pub songs_loaded: usize,
    /// Ids that were skipped
    pub failed_ids: Vec<String>,
    /// Title page plus content pages, before padding
    pub logical_pages: usize,
    /// Blank pages inserted before the back cover
    pub blank_pages_added: usize,
    /// Physical sheets to print
    pub sheets: usize,
    /// PDF pages (front and back of each sheet)
    pub output_pages: usize,
}

/// Calculate statistics for a paginated booklet
pub fn calculate_statistics(loaded: &LoadedSongs, logical_pages: usize) -> BookletStatistics {
    // Pad to one short of a whole sheet, the back cover fills the last slot
    let blank_pages_added =
        (PAGES_PER_SHEET - 1 + PAGES_PER_SHEET - logical_pages % PAGES_PER_SHEET) % PAGES_PER_SHEET;
    let total_pages = logical_pages + blank_pages_added + 1;
    let sheets = total_pages / PAGES_PER_SHEET;

    BookletStatistics {
        songs_requested: loaded.requested,
        songs_loaded: loaded.songs.len(),
        failed_ids: loaded.failed.iter().map(|f| f.id.clone()).collect(),
        logical_pages,
        blank_pages_added,
        sheets,
        output_pages: sheets * 2,
    }
}
