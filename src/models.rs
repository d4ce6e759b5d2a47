use crate::error::{CollectionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of copies of a single card a collection may hold
pub const MAX_COPIES: u32 = 2;

/// Rarity tiers as they appear in the HearthstoneJSON card data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rarity {
    Free,
    Common,
    Rare,
    Epic,
    Legendary,
    /// Forward compatibility with tiers this build does not know about
    #[serde(other)]
    Unknown,
}

impl Rarity {
    /// Returns the rarity name (e.g., "Common", "Legendary")
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Free => "Free",
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Unknown => "Unknown",
        }
    }

    /// Dust cost to craft a single copy. Free cards cannot be crafted.
    pub fn craft_cost(&self) -> u64 {
        match self {
            Rarity::Free | Rarity::Unknown => 0,
            Rarity::Common => 40,
            Rarity::Rare => 100,
            Rarity::Epic => 400,
            Rarity::Legendary => 1600,
        }
    }
}

/// A single catalog card as loaded from cards.collectible.json.
///
/// Only the fields the tracker interprets are named; everything else the
/// catalog carries (cost, text, artist, ...) is kept in `extra` and written
/// back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "dbfId")]
    pub dbf_id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(rename = "set", default, skip_serializing_if = "Option::is_none")]
    pub card_set: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Card {
    /// Dust cost to craft one copy of this card, 0 if it has no rarity tier
    pub fn craft_cost(&self) -> u64 {
        self.rarity.map(|r| r.craft_cost()).unwrap_or(0)
    }
}

/// A card the user owns, with how many copies.
///
/// The persisted collection stores the full card object plus `count`, so an
/// entry stays displayable even if the catalog later drops the card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedCard {
    #[serde(flatten)]
    pub card: Card,
    count: u32,
}

impl OwnedCard {
    /// Creates an entry, enforcing the 1..=2 count domain
    pub fn new(card: Card, count: u32) -> Result<Self> {
        if count == 0 || count > MAX_COPIES {
            return Err(CollectionError::InvalidCount(count));
        }
        Ok(OwnedCard { card, count })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Raises the count to the two-copy cap. Counts outside 1..=2 mean the
    /// persisted collection is corrupt and are never silently repaired.
    pub fn raise_to_cap(&mut self) -> Result<()> {
        if self.count == 0 || self.count > MAX_COPIES {
            return Err(CollectionError::CorruptCount {
                name: self.card.name.clone(),
                count: self.count,
            });
        }
        self.count = MAX_COPIES;
        Ok(())
    }

    /// Lowers the count by `by`, which must be strictly less than the count
    pub(crate) fn decrement(&mut self, by: u32) {
        debug_assert!(by < self.count);
        self.count -= by;
    }
}

/// One required card of a deck, as produced by the deckstring decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckEntry {
    pub dbf_id: u32,
    pub count: u32,
}
