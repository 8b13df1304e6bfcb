mod common;

use chrono::NaiveDate;
use common::{short_song, song_yaml};
use hymnal_booklet::song::fetch_all;
use hymnal_booklet::*;
use lopdf::Document;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

fn songs_dir(songs: &[(&str, String)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (id, yaml) in songs {
        std::fs::write(dir.path().join(format!("{}.yaml", id)), yaml).unwrap();
    }
    dir
}

fn setlist(ids: &[&str]) -> Setlist {
    Setlist {
        date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        songs: ids.iter().map(|id| id.to_string()).collect(),
    }
}

/// Repository that counts lookups and knows a fixed set of ids
struct CountingRepository {
    known: Vec<String>,
    lookups: AtomicUsize,
}

impl CountingRepository {
    fn new(known: &[&str]) -> Self {
        Self {
            known: known.iter().map(|id| id.to_string()).collect(),
            lookups: AtomicUsize::new(0),
        }
    }
}

impl SongRepository for CountingRepository {
    async fn get(&self, id: &str) -> Result<Song> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        if self.known.iter().any(|known| known == id) {
            Ok(short_song(id))
        } else {
            Err(BookletError::SongNotFound(id.to_string()))
        }
    }
}

#[tokio::test]
async fn test_missing_song_is_skipped() {
    let dir = songs_dir(&[("a", song_yaml("A", &["line1", "line2"]))]);
    let repo = Arc::new(DirectorySongRepository::new(dir.path()));
    let options = BookletOptions::default();

    let plan = plan_booklet(repo, &setlist(&["a", "b"]), &options).await.unwrap();

    assert_eq!(
        plan.pages[0],
        LogicalPage::Title(vec![TocEntry {
            number: 1,
            name: "A".to_string(),
            id: "a".to_string(),
        }])
    );
    let placements: usize = plan.pages.iter().map(LogicalPage::song_count).sum();
    assert_eq!(placements, 1);

    let stats = &plan.statistics;
    assert_eq!(stats.songs_requested, 2);
    assert_eq!(stats.songs_loaded, 1);
    assert_eq!(stats.failed_ids, vec!["b".to_string()]);
    assert_eq!(stats.logical_pages, 2);
    assert_eq!(stats.blank_pages_added, 1);
    assert_eq!(stats.sheets, 1);
    assert_eq!(stats.output_pages, 2);
}

#[tokio::test]
async fn test_generate_booklet_pdf() {
    let dir = songs_dir(&[("a", song_yaml("A", &["line1", "line2"]))]);
    let repo = Arc::new(SongCache::new(DirectorySongRepository::new(dir.path())));

    let booklet = generate_booklet(repo, &setlist(&["a", "b"]), &BookletOptions::default())
        .await
        .unwrap();

    assert_eq!(booklet.file_name, "sing-for-joy-booklet-2026-10-19.pdf");
    assert!(booklet.bytes.starts_with(b"%PDF"));

    let doc = Document::load_mem(&booklet.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), booklet.statistics.output_pages);
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn test_save_booklet() {
    let dir = songs_dir(&[
        ("a", song_yaml("A", &["one"])),
        ("b", song_yaml("B", &["two"])),
    ]);
    let repo = Arc::new(DirectorySongRepository::new(dir.path()));
    let booklet = generate_booklet(repo, &setlist(&["a", "b"]), &BookletOptions::default())
        .await
        .unwrap();

    let output = dir.path().join(&booklet.file_name);
    save_booklet(&booklet, &output).await.unwrap();

    let saved = std::fs::read(&output).unwrap();
    assert_eq!(saved, booklet.bytes);
    assert_eq!(Document::load(&output).unwrap().get_pages().len(), 2);
}

#[tokio::test]
async fn test_many_songs_fill_several_sheets() {
    let ids: Vec<String> = (0..30).map(|i| format!("song{}", i)).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let repo = Arc::new(CountingRepository::new(&id_refs));

    let booklet = generate_booklet(repo, &setlist(&id_refs), &BookletOptions::default())
        .await
        .unwrap();

    let stats = &booklet.statistics;
    assert_eq!(stats.songs_loaded, 30);
    assert_eq!((stats.logical_pages + stats.blank_pages_added + 1) % 4, 0);
    let doc = Document::load_mem(&booklet.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), stats.sheets * 2);
}

#[tokio::test]
async fn test_no_songs_is_an_error() {
    let dir = songs_dir(&[]);
    let repo = Arc::new(DirectorySongRepository::new(dir.path()));

    let result = generate_booklet(repo, &setlist(&["x", "y"]), &BookletOptions::default()).await;

    assert!(matches!(result, Err(BookletError::NoSongs)));
}

#[tokio::test]
async fn test_empty_setlist_is_an_error() {
    let repo = Arc::new(CountingRepository::new(&[]));
    let result = plan_booklet(repo, &setlist(&[]), &BookletOptions::default()).await;
    assert!(matches!(result, Err(BookletError::NoSongs)));
}

#[tokio::test]
async fn test_invalid_options_rejected_before_loading() {
    let repo = Arc::new(CountingRepository::new(&["a"]));
    let options = BookletOptions {
        line_height_mm: 0.0,
        ..Default::default()
    };

    let result = plan_booklet(Arc::clone(&repo), &setlist(&["a"]), &options).await;

    assert!(matches!(result, Err(BookletError::Config(_))));
    assert_eq!(repo.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cache_single_flight() {
    let cache = Arc::new(SongCache::new(CountingRepository::new(&["hymn"])));
    let ids = vec!["hymn".to_string(); 16];

    let results = fetch_all(Arc::clone(&cache), &ids).await;

    assert!(results.iter().all(|(_, result)| result.is_ok()));
    assert!(cache.is_cached("hymn"));
    let again = cache.get("hymn").await.unwrap();
    assert_eq!(again.id, "hymn");
    assert_eq!(lookups(&cache), 1);
}

#[tokio::test]
async fn test_cache_remembers_missing_songs() {
    let cache = SongCache::new(CountingRepository::new(&[]));

    assert!(matches!(cache.get("gone").await, Err(BookletError::SongNotFound(_))));
    assert!(matches!(cache.get("gone").await, Err(BookletError::SongNotFound(_))));
    assert_eq!(lookups(&cache), 1);

    cache.clear();
    assert!(!cache.is_cached("gone"));
    let _ = cache.get("gone").await;
    assert_eq!(lookups(&cache), 2);
}

#[tokio::test]
async fn test_fetch_all_keeps_order_and_failures() {
    let repo = Arc::new(CountingRepository::new(&["a", "c"]));
    let ids: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

    let results = fetch_all(repo, &ids).await;

    let order: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c"]);
    assert!(results[0].1.is_ok());
    assert!(matches!(results[1].1, Err(BookletError::SongNotFound(_))));
    assert_eq!(results[2].1.as_ref().unwrap().name, "Song c");

    let loaded = LoadedSongs::from_results(results);
    assert_eq!(loaded.requested, 3);
    let toc = loaded.toc_entries();
    assert_eq!(toc.len(), 2);
    assert_eq!(toc[1].number, 2);
    assert_eq!(toc[1].id, "c");
}

fn lookups(cache: &SongCache<CountingRepository>) -> usize {
    cache.inner().lookups.load(Ordering::SeqCst)
}
