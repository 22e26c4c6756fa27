//! Barcode lookup command.

use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::{self, ResultExt};
use crate::lookup::{MetadataResolver, RateGate};
use crate::model::Album;

use super::print_album;

/// Resolve a barcode with a fresh resolver built from `config`
pub(crate) async fn resolve(config: &Config, barcode: &str) -> error::Result<Option<Album>> {
    let resolver = MetadataResolver::new(&config.resolver_config(), Arc::new(RateGate::new()));
    resolver
        .resolve(barcode)
        .await
        .with_context(format!("Lookup for {} failed", barcode))
}

/// Look up an album by barcode and print it
pub fn cmd_lookup(rt: &Runtime, config: &Config, barcode: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        println!("Looking up barcode {}...", barcode);
        println!();

        match resolve(config, barcode).await? {
            Some(album) => print_album(&album),
            None => {
                println!("✗ No release found for this barcode.");
                println!("  It may not be in MusicBrainz yet: https://musicbrainz.org/doc/How_to_Add_a_Release");
            }
        }
        Ok(())
    })
}
