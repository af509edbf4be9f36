//! # CLI Module
//!
//! Command implementations for the `spotilist` binary. Each function loads
//! what it needs from the credential cache, talks to Spotify through
//! [`crate::spotify`] and reports progress with the crate's status macros.
//!
//! ## Commands
//!
//! ### Authentication
//!
//! - [`login`] - Runs the OAuth authorization-code flow and caches the token
//! - [`logout`] - Deletes the cached token
//! - [`whoami`] - Shows the account the cached token belongs to
//!
//! ### Playlists
//!
//! - [`list_playlists`] - Lists all playlists, or the tracks of one
//! - [`download_playlists`] - Writes all playlists, or one, as JSON files
//!
//! ## Error Handling
//!
//! Nothing here exits the process. Every command returns
//! [`crate::Result`] and the first error aborts the command; the binary
//! reports it and sets the exit status.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotilist login                         # Authenticate with Spotify
//! spotilist playlist list                 # All playlists
//! spotilist playlist list -id <id>        # Tracks of one playlist
//! spotilist playlist download             # Every playlist to ./<user>/
//! spotilist playlist download -id <id>    # One playlist
//! ```

mod auth;
mod playlist;

pub use auth::login;
pub use auth::logout;
pub use auth::whoami;
pub use playlist::download as download_playlists;
pub use playlist::list as list_playlists;
