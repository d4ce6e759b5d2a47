//! Read-only index over the collectible-card catalog
//!
//! Loaded once per run from cards.collectible.json. Lookups go through
//! indices built at load time; nothing is added or removed afterwards.

use crate::error::{CollectionError, Result};
use crate::models::Card;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct Catalog {
    cards: Vec<Card>,
    by_id: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Loads the catalog from a JSON file.
    ///
    /// A missing or unreadable file is fatal: there is no partial-catalog
    /// mode, every other operation needs the full universe.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let cards: Vec<Card> = serde_json::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded catalog: {} cards from {}",
            cards.len(),
            path.as_ref().display()
        );
        Self::from_cards(cards)
    }

    /// Builds the id and name indices over an already-loaded card list.
    ///
    /// Duplicate dbfIds mean the catalog file is corrupt and fail the load.
    /// Duplicate names only break the secondary key; the first occurrence
    /// wins and the ambiguity is logged.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(cards.len());
        let mut by_name = HashMap::with_capacity(cards.len());

        for (idx, card) in cards.iter().enumerate() {
            if by_id.insert(card.dbf_id, idx).is_some() {
                return Err(CollectionError::DuplicateId(card.dbf_id));
            }
            if let Some(first) = by_name.insert(card.name.to_lowercase(), idx) {
                log::warn!(
                    "Duplicate card name in catalog: {} (keeping first)",
                    card.name
                );
                by_name.insert(card.name.to_lowercase(), first);
            }
        }

        Ok(Catalog {
            cards,
            by_id,
            by_name,
        })
    }

    pub fn find_by_id(&self, dbf_id: u32) -> Option<&Card> {
        self.by_id.get(&dbf_id).map(|&idx| &self.cards[idx])
    }

    /// Case-insensitive lookup by display name
    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.cards[idx])
    }

    /// All cards belonging to the given set tag
    pub fn cards_in_set<'a>(&'a self, set_id: &'a str) -> impl Iterator<Item = &'a Card> {
        self.cards
            .iter()
            .filter(move |c| c.card_set.as_deref() == Some(set_id))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
