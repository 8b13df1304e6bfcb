use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Song not found: {0}")]
    SongNotFound(String),
    #[error("Invalid song '{id}': {reason}")]
    InvalidSong { id: String, reason: String },
    #[error("Failed to load song '{id}': {reason}")]
    SongLoad { id: String, reason: String },
    #[error("No songs could be loaded")]
    NoSongs,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Image error: {0}")]
    Image(String),
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// One line of the title page's song list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// 1-based position among the songs that loaded
    pub number: usize,
    pub name: String,
    pub id: String,
}

impl TocEntry {
    /// Text as printed on the title page, e.g. `3. Amazing Grace`
    pub fn label(&self) -> String {
        format!("{}. {}", self.number, self.name)
    }
}
