use crate::{
    Result,
    config::{Config, LoginConfig},
    info,
    management::CredentialCache,
    spotify::{self, SpotifyClient},
    success,
};

pub async fn login(config: &Config, login: &LoginConfig) -> Result<()> {
    let cache = CredentialCache::new(&config.cache_file);
    let client = spotify::auth::login(config, login, &cache).await?;

    let user = client.current_user().await?;
    success!(
        "Now logged in as {} ({}).",
        user.display_name.as_deref().unwrap_or(&user.id),
        user.id
    );
    Ok(())
}

pub async fn logout(config: &Config) -> Result<()> {
    let cache = CredentialCache::new(&config.cache_file);
    if cache.clear().await? {
        success!("Logout successful! Deleted {}", cache.path().display());
    } else {
        info!("No credentials stored at {}", cache.path().display());
    }
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let cache = CredentialCache::new(&config.cache_file);
    let client = SpotifyClient::from_cache(config, &cache).await?;
    let user = client.current_user().await?;

    println!(
        "{}\t{}\t{}",
        user.display_name.as_deref().unwrap_or("-"),
        user.id,
        user.external_urls.spotify.as_deref().unwrap_or("-")
    );
    Ok(())
}
