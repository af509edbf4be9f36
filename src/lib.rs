//! Spotify Playlist Exporter Library
//!
//! This library backs the `spotilist` command-line tool. It authenticates a
//! user against the Spotify Web API through the OAuth2 authorization-code flow
//! and lists or downloads that user's playlists as simplified JSON documents.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback listener
//! - `cli` - Command implementations invoked by the binary
//! - `config` - Environment loading and typed configuration
//! - `error` - The crate-wide error type
//! - `management` - Credential cache and playlist document writer
//! - `server` - Short-lived callback listener used during login
//! - `spotify` - Spotify Web API client, authentication and pagination
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotilist::{config, management::CredentialCache, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spotilist::Result<()> {
//!     config::load_env()?;
//!     let config = config::Config::from_env()?;
//!     let cache = CredentialCache::new(&config.cache_file);
//!     let client = SpotifyClient::from_cache(&config, &cache).await?;
//!     let me = client.current_user().await?;
//!     println!("{}", me.id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist written to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark to stderr.
///
/// Reporting only. Deciding whether the process ends is left to the caller,
/// which in practice is the binary's top-level handler.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues or notices that don't abort the command.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
