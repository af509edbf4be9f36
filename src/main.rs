use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotilist::{
    Result, cli,
    config::{self, Config, LoginConfig},
    error, info, utils,
};

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
    Login,

    /// Delete the stored credentials
    Logout,

    /// Show the account behind the stored credentials
    Whoami,

    /// List or download playlists
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// List all playlists, or the tracks of one
    List(ListOpts),

    /// Save all playlists, or one, as <user id>/<playlist id>.json
    Download(DownloadOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct ListOpts {
    /// ID of the playlist you want to list the contents of
    #[clap(long)]
    pub id: Option<String>,

    /// Only list playlists owned by the current user
    #[clap(long, conflicts_with = "id")]
    pub owned: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadOpts {
    /// ID of the playlist you want to download the contents of
    #[clap(long)]
    pub id: Option<String>,

    /// Directory the per-user folder is created in
    #[clap(long, default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse_from(utils::normalize_flag_args(std::env::args_os()));

    let result = match config::load_env() {
        Ok(_) => run(cli.command).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("{}", e);
        if let Some(hint) = e.hint() {
            info!("{}", hint);
        }
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Login => cli::login(&Config::from_env()?, &LoginConfig::from_env()?).await,
        Command::Logout => cli::logout(&Config::from_env()?).await,
        Command::Whoami => cli::whoami(&Config::from_env()?).await,
        Command::Playlist(opt) => {
            let config = Config::from_env()?;
            match opt.command {
                PlaylistSubcommand::List(o) => cli::list_playlists(&config, o.id, o.owned).await,
                PlaylistSubcommand::Download(o) => {
                    cli::download_playlists(&config, o.id, &o.output_dir).await
                }
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
