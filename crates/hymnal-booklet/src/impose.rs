//! Booklet imposition - arranging logical pages onto folded sheets
//!
//! Each sheet is printed duplex, folded once down the middle and nested inside
//! the previous one (saddle stitch). For `n` logical pages, sheet `i` carries:
//!
//! - front: left = page `n-1-2i`, right = page `2i`
//! - back:  left = page `2i+1`,   right = page `n-2-2i`
//!
//! **8 pages (2 sheets):**
//! - Sheet 1 front: [8, 1], back: [2, 7]
//! - Sheet 2 front: [6, 3], back: [4, 5]

use crate::constants::PAGES_PER_SHEET;
use crate::layout::LogicalPage;

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

/// Logical page indices for one sheet, in slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSlots {
    pub front_left: usize,
    pub front_right: usize,
    pub back_left: usize,
    pub back_right: usize,
}

impl SheetSlots {
    pub fn as_array(&self) -> [usize; 4] {
        [
            self.front_left,
            self.front_right,
            self.back_left,
            self.back_right,
        ]
    }
}

/// A physical sheet with its four logical pages
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub front_left: LogicalPage,
    pub front_right: LogicalPage,
    pub back_left: LogicalPage,
    pub back_right: LogicalPage,
}

impl Sheet {
    /// The (left, right) pages printed on one side
    pub fn side(&self, side: SheetSide) -> (&LogicalPage, &LogicalPage) {
        match side {
            SheetSide::Front => (&self.front_left, &self.front_right),
            SheetSide::Back => (&self.back_left, &self.back_right),
        }
    }
}

/// Pad to a whole number of sheets, ending with the back cover.
///
/// Blank pages are appended until one slot short of a multiple of four, then
/// the back cover takes the last slot. Returns the number of blanks added.
pub fn pad_pages(pages: &mut Vec<LogicalPage>) -> usize {
    let mut blanks = 0;
    while pages.len() % PAGES_PER_SHEET != PAGES_PER_SHEET - 1 {
        pages.push(LogicalPage::Blank);
        blanks += 1;
    }
    pages.push(LogicalPage::BackCover);
    blanks
}

/// Slot assignment for a padded sequence of `total_pages` pages.
///
/// `total_pages` must be a multiple of four.
pub fn calculate_sheet_order(total_pages: usize) -> Vec<SheetSlots> {
    debug_assert_eq!(total_pages % PAGES_PER_SHEET, 0);
    let n = total_pages;

    (0..n / PAGES_PER_SHEET)
        .map(|i| SheetSlots {
            front_left: n - 1 - 2 * i,
            front_right: 2 * i,
            back_left: 2 * i + 1,
            back_right: n - 2 - 2 * i,
        })
        .collect()
}

/// Pad the pages and distribute them onto sheets in print order
pub fn impose(mut pages: Vec<LogicalPage>) -> Vec<Sheet> {
    pad_pages(&mut pages);
    let order = calculate_sheet_order(pages.len());

    // Every index appears in exactly one slot, so each page is taken once
    let mut slots: Vec<Option<LogicalPage>> = pages.into_iter().map(Some).collect();
    let mut take = |index: usize| slots[index].take().unwrap_or(LogicalPage::Blank);

    order
        .iter()
        .map(|slot| Sheet {
            front_left: take(slot.front_left),
            front_right: take(slot.front_right),
            back_left: take(slot.back_left),
            back_right: take(slot.back_right),
        })
        .collect()
}
