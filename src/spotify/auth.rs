use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{Client, Url};

use crate::{
    Error, Result,
    config::{Config, LoginConfig},
    info,
    management::CredentialCache,
    server::start_callback_server,
    spotify::SpotifyClient,
    success,
    types::{Credential, TokenErrorResponse, TokenResponse},
    utils, warning,
};

/// Runs the complete OAuth 2.0 authorization-code flow with Spotify.
///
/// This function orchestrates the entire authentication process:
/// 1. Generating a random anti-CSRF `state` and the authorization URL
/// 2. Starting the local callback listener on `HTTP_PORT`
/// 3. Printing the authorization URL and trying to open it in the browser
/// 4. Waiting, at most `config.login_timeout`, for the redirect
/// 5. Exchanging the authorization code for a token
/// 6. Overwriting the credential cache with that token
///
/// # Arguments
///
/// * `config` - Endpoints and the login timeout
/// * `login` - Client credentials, redirect URI, listener port and scopes
/// * `cache` - Where the obtained token is written
///
/// # Returns
///
/// A [`SpotifyClient`] authenticated with the new token.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if the authorization endpoint is not a URL
/// - [`Error::Bind`] if the listener port is taken
/// - [`Error::StateMismatch`], [`Error::AuthorizationDenied`] or
///   [`Error::MissingCode`] if the redirect is not a valid grant
/// - [`Error::CallbackTimeout`] if nobody completes the redirect in time
/// - [`Error::TokenExchange`] if Spotify refuses the code
/// - [`Error::Io`] if the cache cannot be written
pub async fn login(
    config: &Config,
    login: &LoginConfig,
    cache: &CredentialCache,
) -> Result<SpotifyClient> {
    let credential = authorize(config, login, cache, |auth_url| {
        info!(
            "If your browser doesn't open, please log in to Spotify by visiting:\n{}",
            auth_url
        );
        if webbrowser::open(auth_url.as_str()).is_err() {
            warning!("Failed to open browser.");
        }
    })
    .await?;
    success!("Credentials saved to {}", cache.path().display());

    Ok(SpotifyClient::new(&config.api_url, &credential))
}

/// The login flow with the browser step supplied by the caller.
///
/// `open` receives the authorization URL once the listener is accepting
/// redirects. The credential is returned only after it has been written to
/// `cache`; on any error the cache is left as it was.
pub async fn authorize<F>(
    config: &Config,
    login: &LoginConfig,
    cache: &CredentialCache,
    open: F,
) -> Result<Credential>
where
    F: FnOnce(&Url),
{
    let state = utils::generate_random_string(utils::STATE_LENGTH);
    let auth_url = authorize_url(config, login, &state)?;

    let server = start_callback_server(login.http_port, &state).await?;
    open(&auth_url);

    let code = server.wait_for_code(config.login_timeout).await?;
    let credential = exchange_code(config, login, &code).await?;
    cache.save(&credential).await?;

    Ok(credential)
}

/// Builds the URL the user has to visit to grant access.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if the configured authorization endpoint
/// is not a valid URL.
pub fn authorize_url(config: &Config, login: &LoginConfig, state: &str) -> Result<Url> {
    let scope = login.scopes.join(" ");
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", login.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", login.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| Error::InvalidConfig {
        name: "SPOTIFY_API_AUTH_URL",
        reason: e.to_string(),
    })
}

/// Exchanges an authorization code for a token.
///
/// The client authenticates with HTTP Basic credentials as Spotify expects
/// for confidential clients.
///
/// # Errors
///
/// Returns [`Error::TokenExchange`] with the provider's description when the
/// token endpoint answers with a non-success status, and [`Error::Http`] on
/// transport failures or an unreadable body.
pub async fn exchange_code(config: &Config, login: &LoginConfig, code: &str) -> Result<Credential> {
    let response = Client::new()
        .post(&config.token_url)
        .basic_auth(&login.client_id, Some(&login.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", login.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(TokenErrorResponse {
                error,
                error_description: Some(description),
            }) => format!("{error}: {description}"),
            Ok(TokenErrorResponse { error, .. }) => error,
            Err(_) => format!("{} {}", status, body.trim()),
        };
        return Err(Error::TokenExchange(reason));
    }

    let token = response.json::<TokenResponse>().await?;
    Ok(credential_from_response(token, Utc::now()))
}

/// Turns a token response into the cached form; `expires_in` is counted
/// from `obtained_at`.
pub fn credential_from_response(token: TokenResponse, obtained_at: DateTime<Utc>) -> Credential {
    let lifetime = TimeDelta::try_seconds(token.expires_in).unwrap_or_else(TimeDelta::zero);

    Credential {
        access_token: token.access_token,
        token_type: token.token_type,
        refresh_token: token.refresh_token.unwrap_or_default(),
        expiry: obtained_at
            .checked_add_signed(lifetime)
            .unwrap_or(obtained_at),
    }
}
