//! Last.fm authentication commands.

use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::error::{self, Error};

use super::{require_credentials, scrobbler};

/// Print the URL the user must visit to authorize this application
pub fn cmd_auth_url(config: &Config) -> anyhow::Result<()> {
    let url = authorization_url(config)?;
    println!("Open this URL in a browser and approve access:");
    println!();
    println!("  {}", url);
    println!();
    println!("Then run `login <token>` with the token from the callback URL.");
    Ok(())
}

/// Authorization URL from the API key and callback alone
pub(crate) fn authorization_url(config: &Config) -> error::Result<String> {
    let has_key = config
        .lastfm
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty());
    if !has_key {
        return Err(Error::config(
            "Last.fm API key is required (use --api-key, LASTFM_API_KEY, or [lastfm] in config.toml)",
        ));
    }
    Ok(config.lastfm_config().auth_url())
}

/// Exchange an authorization token for a stored session
pub fn cmd_login(rt: &Runtime, config: &Config, token: &str) -> anyhow::Result<()> {
    let lastfm = require_credentials(config)?;
    rt.block_on(async {
        let client = scrobbler(config, &lastfm).await?;
        let session = client.complete_auth(token).await?;

        println!("✓ Logged in as {}", session.username);
        if let Some(image) = &session.profile_image_url {
            println!("  Profile image: {}", image);
        }
        Ok(())
    })
}

/// Show who is logged in
pub fn cmd_status(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    rt.block_on(async {
        let client = scrobbler(config, &config.lastfm_config()).await?;
        match client.current_session().await? {
            Some(session) => println!("Logged in as {}", session.username),
            None => println!("Not logged in. Run `auth-url` to start."),
        }
        if !config.has_credentials() {
            println!("Warning: Last.fm API key/secret are not configured.");
        }
        Ok(())
    })
}

/// Forget the stored session
pub fn cmd_logout(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    rt.block_on(async {
        let client = scrobbler(config, &config.lastfm_config()).await?;
        if !client.is_authenticated().await? {
            println!("Not logged in.");
            return Ok(());
        }
        client.logout().await?;
        println!("✓ Logged out");
        Ok(())
    })
}

/// Write the current settings to the config file
pub fn cmd_init_config(config: &Config, force: bool) -> anyhow::Result<()> {
    let existing = config::config_path().filter(|path| path.exists());
    if let (Some(path), false) = (existing, force) {
        println!("Config already exists at {:?} (use --force to overwrite)", path);
        return Ok(());
    }

    let path = config::save(config)?;
    println!("✓ Wrote {:?}", path);
    Ok(())
}
