use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use genrecli::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Classify the tracks of a playlist into macro-genres
    Analyze(AnalyzeOptions),

    #[clap(about = "Create a playlist from genre buckets of the last analysis")]
    Playlist(PlaylistOptions),

    /// Remove the stored token and all derived caches
    Logout,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeOptions {
    /// Playlist share URL or bare playlist id
    playlist: String,

    /// Stop after this many tracks
    #[clap(long)]
    max_tracks: Option<usize>,

    /// Only keep tracks whose primary artist name contains this filter
    #[clap(long)]
    artist: Option<String>,

    /// Maximum cumulative seconds to wait out rate limits before giving up
    #[clap(long)]
    max_wait: Option<u64>,

    /// Show Spanish genre labels
    #[clap(long)]
    es: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Macro-genre to include; can be repeated
    #[clap(long = "genre", required = true)]
    genres: Vec<String>,

    /// Playlist name (defaults to the joined genre labels)
    #[clap(long)]
    name: Option<String>,

    /// Create the playlist as public
    #[clap(long)]
    public: bool,

    /// JPEG cover image to upload
    #[clap(long)]
    cover: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Analyze(opt) => {
            cli::analyze(opt.playlist, opt.max_tracks, opt.artist, opt.max_wait, opt.es).await
        }
        Command::Playlist(opt) => cli::playlist(opt.genres, opt.name, opt.public, opt.cover).await,
        Command::Logout => cli::logout().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
