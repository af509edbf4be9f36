mod auth;
mod playlist;

pub use auth::CredentialCache;
pub use playlist::PlaylistWriter;
