mod booklet;
pub mod constants;
pub mod impose;
pub mod layout;
mod options;
pub mod render;
pub mod song;
mod stats;
mod types;

pub use booklet::*;
pub use impose::{Sheet, SheetSide, impose};
pub use layout::{LogicalPage, paginate, prepare_content};
pub use options::*;
pub use song::{DirectorySongRepository, LoadedSongs, Song, SongCache, SongRepository};
pub use stats::{BookletStatistics, calculate_statistics};
pub use types::*;
