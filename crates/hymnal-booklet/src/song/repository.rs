//! Song lookup by identifier
//!
//! A repository resolves one song id at a time. [`SongCache`] wraps any
//! repository with a read-through cache, and [`fetch_all`] resolves a whole
//! setlist in parallel, keeping per-song failures instead of aborting.

use super::Song;
use crate::types::*;
use log::{info, warn};
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Source of parsed songs
pub trait SongRepository: Send + Sync {
    /// Resolve one song. A song that does not exist is [`BookletError::SongNotFound`].
    fn get(&self, id: &str) -> impl Future<Output = Result<Song>> + Send;
}

/// Songs stored as `<dir>/<id>.yaml`
#[derive(Debug, Clone)]
pub struct DirectorySongRepository {
    dir: PathBuf,
}

impl DirectorySongRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn song_path(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(BookletError::InvalidSong {
                id: id.to_string(),
                reason: "not a valid song identifier".to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.yaml", id)))
    }
}

impl SongRepository for DirectorySongRepository {
    async fn get(&self, id: &str) -> Result<Song> {
        let path = self.song_path(id)?;

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BookletError::SongNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        // YAML parsing is CPU-bound, spawn blocking
        let id = id.to_string();
        tokio::task::spawn_blocking(move || Song::from_yaml(id, &text)).await?
    }
}

#[derive(Debug, Clone)]
enum CachedSong {
    Found(Song),
    NotFound,
    Failed(String),
}

/// Read-through cache in front of another repository
///
/// Both hits and failures are remembered. Concurrent requests for the same id
/// share one lookup against the inner repository.
pub struct SongCache<R> {
    inner: R,
    entries: Mutex<HashMap<String, Arc<OnceCell<CachedSong>>>>,
}

impl<R: SongRepository> SongCache<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Whether a lookup for `id` has completed
    pub fn is_cached(&self, id: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.get(id).is_some_and(|cell| cell.initialized()))
            .unwrap_or(false)
    }

    /// Forget every cached song
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    fn cell(&self, id: &str) -> Result<Arc<OnceCell<CachedSong>>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| BookletError::SongLoad {
                id: id.to_string(),
                reason: "song cache lock poisoned".to_string(),
            })?;
        Ok(Arc::clone(entries.entry(id.to_string()).or_default()))
    }
}

impl<R: SongRepository> SongRepository for SongCache<R> {
    async fn get(&self, id: &str) -> Result<Song> {
        let cell = self.cell(id)?;

        let cached = cell
            .get_or_init(|| async {
                match self.inner.get(id).await {
                    Ok(song) => CachedSong::Found(song),
                    Err(BookletError::SongNotFound(_)) => CachedSong::NotFound,
                    Err(e) => CachedSong::Failed(e.to_string()),
                }
            })
            .await;

        match cached {
            CachedSong::Found(song) => Ok(song.clone()),
            CachedSong::NotFound => Err(BookletError::SongNotFound(id.to_string())),
            CachedSong::Failed(reason) => Err(BookletError::SongLoad {
                id: id.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Resolve every id in parallel and wait for all of them
///
/// Results come back in input order; one song failing never cancels the rest.
pub async fn fetch_all<R>(repo: Arc<R>, ids: &[String]) -> Vec<(String, Result<Song>)>
where
    R: SongRepository + 'static,
{
    let handles: Vec<_> = ids
        .iter()
        .map(|id| {
            let repo = Arc::clone(&repo);
            let id = id.clone();
            tokio::spawn(async move { repo.get(&id).await })
        })
        .collect();

    let mut results = Vec::with_capacity(ids.len());
    for (id, handle) in ids.iter().zip(handles) {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(e.into()),
        };
        results.push((id.clone(), result));
    }
    results
}

/// A song id that could not be resolved, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSong {
    pub id: String,
    pub reason: String,
}

/// Outcome of loading a setlist: the songs that resolved, in setlist order,
/// and the ids that didn't
#[derive(Debug, Clone, Default)]
pub struct LoadedSongs {
    pub requested: usize,
    pub songs: Vec<Song>,
    pub failed: Vec<FailedSong>,
}

impl LoadedSongs {
    /// Fetch every id and partition the results
    pub async fn load<R>(repo: Arc<R>, ids: &[String]) -> Self
    where
        R: SongRepository + 'static,
    {
        let loaded = Self::from_results(fetch_all(repo, ids).await);
        info!(
            "Loaded {} of {} songs",
            loaded.songs.len(),
            loaded.requested
        );
        loaded
    }

    pub fn from_results(results: Vec<(String, Result<Song>)>) -> Self {
        let mut loaded = Self {
            requested: results.len(),
            ..Default::default()
        };

        for (id, result) in results {
            match result {
                Ok(song) => loaded.songs.push(song),
                Err(e) => {
                    warn!("Skipping song '{}': {}", id, e);
                    loaded.failed.push(FailedSong {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        loaded
    }

    /// Song list for the title page, numbered over the loaded songs only
    pub fn toc_entries(&self) -> Vec<TocEntry> {
        self.songs
            .iter()
            .enumerate()
            .map(|(i, song)| TocEntry {
                number: i + 1,
                name: song.name.clone(),
                id: song.id.clone(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
