//! Scrobble submission and history commands.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::lastfm::{ScrobbleError, plan_scrobbles};

use super::lookup::resolve;
use super::{format_timestamp, print_album, require_credentials, scrobbler};

/// Look up an album by barcode and scrobble it as just played
pub fn cmd_scrobble(rt: &Runtime, config: &Config, barcode: &str, dry_run: bool) -> anyhow::Result<()> {
    rt.block_on(async {
        let Some(album) = resolve(config, barcode).await? else {
            println!("✗ No release found for barcode {}.", barcode);
            return Ok(());
        };
        print_album(&album);
        println!();

        if dry_run {
            let plan = plan_scrobbles(&album, chrono::Utc::now().timestamp());
            println!("Would scrobble {} tracks:", plan.len());
            for scrobble in &plan {
                println!("  {}  {}", format_timestamp(scrobble.timestamp), scrobble.name);
            }
            return Ok(());
        }

        let lastfm = require_credentials(config)?;
        let client = scrobbler(config, &lastfm).await?;
        match client.submit_scrobble(&album).await {
            Ok(scrobbled) => {
                println!("✓ Scrobbled {} tracks", scrobbled.len());
                Ok(())
            }
            Err(ScrobbleError::NotAuthenticated) => {
                anyhow::bail!("Not logged in to Last.fm. Run `auth-url`, then `login <token>`.")
            }
            Err(e) => Err(e.into()),
        }
    })
}

/// List recently scrobbled albums, most recent first
pub fn cmd_history(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    rt.block_on(async {
        let client = scrobbler(config, &config.lastfm_config()).await?;
        let history = client.history().await?;

        if history.is_empty() {
            println!("No scrobbles yet.");
            return Ok(());
        }

        for record in &history {
            println!(
                "{}  {} - {} ({} tracks)",
                format_timestamp(record.submitted_at),
                record.album.artist,
                record.album.title,
                record.tracks.len()
            );
        }
        Ok(())
    })
}
