//! Deck reconciliation: what is owned, what is missing, what it costs
//!
//! Pure over its inputs; the collection is borrowed immutably and a deck can
//! be checked any number of times without observable effect.

use crate::catalog::Catalog;
use crate::collection::Collection;
use crate::models::{Card, DeckEntry};

/// Gap row for one required card, in deck order
#[derive(Debug, Clone, PartialEq)]
pub struct GapEntry<'a> {
    /// Resolved card metadata; `None` flags an id neither the collection
    /// nor the catalog knows
    pub card: Option<&'a Card>,
    pub dbf_id: u32,
    pub required: u32,
    pub owned: u32,
    pub missing: u32,
    pub dust: u64,
}

impl GapEntry<'_> {
    pub fn is_resolved(&self) -> bool {
        self.card.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeckReport<'a> {
    pub entries: Vec<GapEntry<'a>>,
    pub total_dust: u64,
}

impl DeckReport<'_> {
    /// Total copies missing across the whole deck
    pub fn missing_total(&self) -> u32 {
        self.entries.iter().map(|e| e.missing).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.missing == 0)
    }
}

/// Diffs a required-card list against the collection and catalog.
///
/// Rows come back in input order. Duplicate ids are each diffed against the
/// same snapshot, so two rows for one id do not split the owned copies
/// between them. Required counts outside 1..=2 are processed arithmetically;
/// deck legality is not this function's job.
pub fn reconcile<'a>(
    required: &[DeckEntry],
    collection: &'a Collection,
    catalog: &'a Catalog,
) -> DeckReport<'a> {
    let mut entries = Vec::with_capacity(required.len());
    let mut total_dust: u64 = 0;

    for req in required {
        let owned_entry = collection.find(req.dbf_id);
        let owned = owned_entry
            .map(|e| e.count().min(req.count))
            .unwrap_or(0);
        let missing = req.count - owned;

        // Prefer the collection's embedded card data: it stays displayable
        // even for cards the current catalog no longer carries
        let card = owned_entry
            .map(|e| &e.card)
            .or_else(|| catalog.find_by_id(req.dbf_id));

        let dust = match card {
            Some(card) if missing > 0 => card.craft_cost() * u64::from(missing),
            _ => 0,
        };
        total_dust += dust;

        entries.push(GapEntry {
            card,
            dbf_id: req.dbf_id,
            required: req.count,
            owned,
            missing,
            dust,
        });
    }

    DeckReport {
        entries,
        total_dust,
    }
}
