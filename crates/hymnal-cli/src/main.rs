use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hymnal_booklet::song::{convert_file, render_song_text};
use hymnal_booklet::{
    BookletOptions, DirectorySongRepository, Setlist, SongCache, SongRepository,
};
use log::{LevelFilter, info};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hymnal", about = "Printable hymnal booklets from song files", version)]
struct Cli {
    /// Log pagination details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a saddle-stitch booklet PDF for a setlist
    Booklet {
        /// Setlist YAML file (date, songs)
        #[arg(short, long)]
        setlist: PathBuf,

        /// Directory holding <id>.yaml song files
        #[arg(long, default_value = "songs")]
        songs_dir: PathBuf,

        /// Options JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output PDF file (defaults to sing-for-joy-booklet-<date>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// List the songs of a setlist
    List {
        /// Setlist YAML file
        #[arg(short, long)]
        setlist: PathBuf,

        /// Directory holding <id>.yaml song files
        #[arg(long, default_value = "songs")]
        songs_dir: PathBuf,
    },

    /// Print one song's lyrics
    Show {
        /// Song id (file name without .yaml)
        id: String,

        /// Directory holding <id>.yaml song files
        #[arg(long, default_value = "songs")]
        songs_dir: PathBuf,
    },

    /// Convert plain-text lyric files to song YAML
    Convert {
        /// Text files to convert
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Write the default options to a JSON file
    InitConfig {
        /// Output JSON file
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Booklet {
            setlist,
            songs_dir,
            config,
            output,
            stats_only,
        } => {
            let options = match config {
                Some(path) => BookletOptions::load(&path)
                    .await
                    .with_context(|| format!("Loading options from {}", path.display()))?,
                None => BookletOptions::default(),
            };
            let setlist = Setlist::load(&setlist)
                .await
                .with_context(|| format!("Loading setlist {}", setlist.display()))?;
            let repo = Arc::new(SongCache::new(DirectorySongRepository::new(songs_dir)));

            if stats_only {
                let plan = hymnal_booklet::plan_booklet(repo, &setlist, &options).await?;
                print_statistics(&plan.statistics);
                return Ok(());
            }

            let booklet = hymnal_booklet::generate_booklet(repo, &setlist, &options).await?;
            print_statistics(&booklet.statistics);

            let output = output.unwrap_or_else(|| PathBuf::from(&booklet.file_name));
            hymnal_booklet::save_booklet(&booklet, &output).await?;
            println!("Booklet → {}", output.display());
        }

        Commands::List { setlist, songs_dir } => {
            let setlist = Setlist::load(&setlist)
                .await
                .with_context(|| format!("Loading setlist {}", setlist.display()))?;
            let repo = Arc::new(DirectorySongRepository::new(songs_dir));
            let results = hymnal_booklet::song::fetch_all(repo, &setlist.songs).await;

            println!("Setlist for {}:", setlist.date_label());
            for (id, result) in results {
                match result {
                    Ok(song) => println!("  {}", song.name),
                    Err(_) => println!("  {} (NOT FOUND)", id),
                }
            }
        }

        Commands::Show { id, songs_dir } => {
            let repo = DirectorySongRepository::new(songs_dir);
            let song = repo.get(&id).await?;
            print!("{}", render_song_text(&song));
        }

        Commands::Convert { files } => {
            let mut failures = 0;
            for file in &files {
                match convert_file(file).await {
                    Ok(output) => println!("Converted {} → {}", file.display(), output.display()),
                    Err(e) => {
                        eprintln!("Failed to convert {}: {}", file.display(), e);
                        failures += 1;
                    }
                }
            }
            info!("Converted {} of {} files", files.len() - failures, files.len());
        }

        Commands::InitConfig { path } => {
            BookletOptions::default().save(&path).await?;
            println!("Default options → {}", path.display());
        }
    }

    Ok(())
}

fn print_statistics(stats: &hymnal_booklet::BookletStatistics) {
    println!("Booklet Statistics:");
    println!("  Songs requested: {}", stats.songs_requested);
    println!("  Songs loaded: {}", stats.songs_loaded);
    if !stats.failed_ids.is_empty() {
        println!("  Skipped: {}", stats.failed_ids.join(", "));
    }
    println!("  Logical pages: {}", stats.logical_pages);
    println!("  Blank pages added: {}", stats.blank_pages_added);
    println!("  Sheets: {}", stats.sheets);
    println!("  Output pages: {}", stats.output_pages);
}
