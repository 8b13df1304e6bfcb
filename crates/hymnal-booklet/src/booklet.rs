//! Booklet generation - from a setlist to printable PDF bytes
//!
//! The pipeline runs in four steps:
//! 1. Resolve every song id in parallel, skipping the ones that fail
//! 2. Paginate the resolved songs behind a title page
//! 3. Pad and impose the logical pages onto folded sheets
//! 4. Render each sheet front then back, with fold and staple guides

use crate::impose::{Sheet, SheetSide, impose};
use crate::layout::{LogicalPage, paginate};
use crate::options::{BookletOptions, ColumnSide};
use crate::render::{
    BackCoverArt, DrawingBackend, PageRenderer, PdfBackend, draw_fold_line, draw_staple_marks,
};
use crate::song::{LoadedSongs, SongRepository};
use crate::stats::{BookletStatistics, calculate_statistics};
use crate::types::*;
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// One print job: the service date and the songs to sing, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setlist {
    pub date: NaiveDate,
    pub songs: Vec<String>,
}

impl Setlist {
    /// Load a setlist from a YAML file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Suggested output file name, e.g. `sing-for-joy-booklet-2026-10-19.pdf`
    pub fn file_name(&self) -> String {
        format!("sing-for-joy-booklet-{}.pdf", self.date.format("%Y-%m-%d"))
    }

    /// The date as printed on the title page, e.g. `October 19, 2026`
    pub fn date_label(&self) -> String {
        format_date(self.date)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Everything needed to render, computed without drawing anything
#[derive(Debug, Clone)]
pub struct BookletPlan {
    pub date: NaiveDate,
    pub pages: Vec<LogicalPage>,
    pub statistics: BookletStatistics,
}

/// A finished booklet
#[derive(Debug, Clone)]
pub struct Booklet {
    pub bytes: Vec<u8>,
    pub statistics: BookletStatistics,
    pub file_name: String,
}

/// Resolve the setlist's songs and lay them out as logical pages
///
/// Fails with [`BookletError::NoSongs`] when none of the songs could be loaded.
pub async fn plan_booklet<R>(
    repo: Arc<R>,
    setlist: &Setlist,
    options: &BookletOptions,
) -> Result<BookletPlan>
where
    R: SongRepository + 'static,
{
    options.validate()?;

    let loaded = LoadedSongs::load(repo, &setlist.songs).await;
    if loaded.is_empty() {
        return Err(BookletError::NoSongs);
    }

    let pages = paginate(&loaded.songs, loaded.toc_entries(), options);
    let statistics = calculate_statistics(&loaded, pages.len());
    info!(
        "Laid out {} songs on {} logical pages ({} sheets)",
        statistics.songs_loaded, statistics.logical_pages, statistics.sheets
    );

    Ok(BookletPlan {
        date: setlist.date,
        pages,
        statistics,
    })
}

/// Impose `pages` and draw every sheet side onto `backend`
///
/// Sheet sides are separated by page breaks, front before back. Returns the
/// sheets in print order.
pub fn assemble<B: DrawingBackend + ?Sized>(
    backend: &mut B,
    pages: Vec<LogicalPage>,
    options: &BookletOptions,
    date: NaiveDate,
) -> Vec<Sheet> {
    let sheets = impose(pages);
    let renderer = PageRenderer::new(options, format_date(date), BackCoverArt::generate(options));
    let left_x = options.column_x(ColumnSide::Left);
    let right_x = options.column_x(ColumnSide::Right);

    for (i, sheet) in sheets.iter().enumerate() {
        for side in [SheetSide::Front, SheetSide::Back] {
            if i > 0 || side == SheetSide::Back {
                backend.new_page();
            }

            draw_fold_line(backend, options);
            if i == 0 && side == SheetSide::Front {
                draw_staple_marks(backend, options);
            }

            let (left, right) = sheet.side(side);
            renderer.render_page(backend, left, left_x);
            renderer.render_page(backend, right, right_x);
        }
    }

    sheets
}

/// Generate the whole booklet as PDF bytes
pub async fn generate_booklet<R>(
    repo: Arc<R>,
    setlist: &Setlist,
    options: &BookletOptions,
) -> Result<Booklet>
where
    R: SongRepository + 'static,
{
    let plan = plan_booklet(repo, setlist, options).await?;
    let BookletPlan {
        date,
        pages,
        statistics,
    } = plan;
    let options = options.clone();

    // Rendering is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || {
        let mut backend = PdfBackend::new(&options.title);
        assemble(&mut backend, pages, &options, date);
        backend.finish()
    })
    .await?;

    info!(
        "Rendered {} output pages ({} bytes)",
        statistics.output_pages,
        bytes.len()
    );

    Ok(Booklet {
        bytes,
        statistics,
        file_name: setlist.file_name(),
    })
}

/// Write a generated booklet to disk
pub async fn save_booklet(booklet: &Booklet, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, &booklet.bytes).await?;
    Ok(())
}
