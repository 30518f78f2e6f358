use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use albumwall::{cli, config, error, warning};

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
    /// List the unique albums of a playlist
    Albums(AlbumsOptions),

    /// Arrange a playlist's albums on a grid wall
    Wall(WallOptions),

    /// Fetch a token from the token broker
    Token(TokenOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumsOptions {
    /// Playlist URL, e.g. https://open.spotify.com/playlist/<id>
    pub url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct WallOptions {
    /// Playlist URL, e.g. https://open.spotify.com/playlist/<id>
    pub url: String,

    /// Number of rows (1-5)
    #[clap(long, env = "ALBUMWALL_GRID_ROWS")]
    pub rows: Option<u32>,

    /// Number of columns (1-6)
    #[clap(long, env = "ALBUMWALL_GRID_COLS")]
    pub cols: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct TokenOptions {
    /// Skip any cached token
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    match config::load_env().await {
        Ok(true) => {}
        Ok(false) => warning!(
            "No .env found at {}, using environment only",
            config::env_path().display()
        ),
        Err(e) => error!("Cannot load environment. Err: {}", e),
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Albums(opt) => cli::albums(opt.url).await,
        Command::Wall(opt) => cli::wall(opt.url, opt.rows, opt.cols).await,
        Command::Token(opt) => cli::token(opt.force).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
