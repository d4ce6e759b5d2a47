//! HearthstoneJSON client for downloading the collectible-card catalog
//!
//! One blocking GET per refresh; everything else in the crate reads the
//! file this writes.

use crate::catalog::Catalog;
use crate::error::{CollectionError, Result};
use crate::models::Card;
use std::fs;
use std::path::Path;

const CARDS_URL: &str = "https://api.hearthstonejson.com/v1/latest/enUS/cards.collectible.json";

// The endpoint rejects requests without a browser-looking user agent
const USER_AGENT: &str = "Mozilla/5.0";

/// Downloads the latest catalog and writes it to `dest`.
///
/// The body is fully validated (parse + index build) before the file is
/// touched, so a failed or garbled download never clobbers a working
/// catalog.
pub fn fetch_catalog<P: AsRef<Path>>(dest: P) -> Result<usize> {
    log::info!("Fetching card catalog from {}", CARDS_URL);

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()?;
    let response = client.get(CARDS_URL).send()?;
    if !response.status().is_success() {
        return Err(CollectionError::HttpStatus(response.status()));
    }
    let body = response.bytes()?;

    let cards: Vec<Card> = serde_json::from_slice(&body)?;
    let catalog = Catalog::from_cards(cards)?;

    fs::write(dest.as_ref(), &body)?;
    log::info!(
        "Wrote {} cards to {}",
        catalog.len(),
        dest.as_ref().display()
    );
    Ok(catalog.len())
}
