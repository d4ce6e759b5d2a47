//! The user's owned-card collection and its mutation operations
//!
//! The collection is an in-memory value: loaded whole, mutated zero or more
//! times, and written back whole at most once per run. Concurrent writers
//! are not serialized; the last save wins.

use crate::catalog::Catalog;
use crate::error::{CollectionError, Result};
use crate::models::{Card, OwnedCard, MAX_COPIES};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// What an `add` did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was created
    Added,
    /// An existing single copy was raised to the two-copy cap
    RaisedToCap,
    /// The entry was already at the cap; nothing changed
    AlreadyAtCap,
}

#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: Vec<OwnedCard>,
}

impl Collection {
    pub fn new() -> Self {
        Collection::default()
    }

    pub fn from_entries(entries: Vec<OwnedCard>) -> Self {
        Collection { entries }
    }

    /// Loads the collection file. An absent file is an empty collection,
    /// not an error: that is simply a user who owns nothing yet.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No collection at {}, initializing empty", path.display());
                return Ok(Collection::new());
            }
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<OwnedCard> = serde_json::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded collection: {} entries from {}",
            entries.len(),
            path.display()
        );
        Ok(Collection { entries })
    }

    /// Rewrites the whole collection file. Every entry goes out with its
    /// complete denormalized card object plus count.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer(BufWriter::new(file), &self.entries)?;
        log::info!(
            "Saved collection: {} entries to {}",
            self.entries.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn find(&self, dbf_id: u32) -> Option<&OwnedCard> {
        self.entries.iter().find(|e| e.card.dbf_id == dbf_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&OwnedCard> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|e| e.card.name.eq_ignore_ascii_case(name))
    }

    /// Adds `count` in 1..=2 copies of a catalog card.
    ///
    /// Adding saturates at two copies: a second single copy and a fresh pair
    /// both land on 2. An entry already at the cap is left alone and
    /// reported, not failed. An entry whose stored count is outside 1..=2
    /// is corrupt persisted state and fails fast.
    pub fn add(&mut self, card: &Card, count: u32) -> Result<AddOutcome> {
        if count == 0 || count > MAX_COPIES {
            return Err(CollectionError::InvalidCount(count));
        }

        match self
            .entries
            .iter_mut()
            .find(|e| e.card.dbf_id == card.dbf_id)
        {
            Some(entry) if entry.count() == MAX_COPIES => {
                log::info!("Already in collection: {} ({})", card.name, MAX_COPIES);
                Ok(AddOutcome::AlreadyAtCap)
            }
            Some(entry) => {
                entry.raise_to_cap()?;
                Ok(AddOutcome::RaisedToCap)
            }
            None => {
                self.entries.push(OwnedCard::new(card.clone(), count)?);
                Ok(AddOutcome::Added)
            }
        }
    }

    /// Removes `count` copies of the named card. Removal never goes
    /// negative: asking for more copies than owned fails and leaves the
    /// entry untouched. Returns the number of copies remaining.
    pub fn remove(&mut self, name: &str, count: u32) -> Result<u32> {
        let name = name.trim();
        let pos = self
            .entries
            .iter()
            .position(|e| e.card.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CollectionError::NotInCollection(name.to_string()))?;

        let owned = self.entries[pos].count();
        if owned < count {
            return Err(CollectionError::InsufficientCount {
                name: self.entries[pos].card.name.clone(),
                owned,
                requested: count,
            });
        }

        if owned == count {
            self.entries.remove(pos);
            Ok(0)
        } else {
            self.entries[pos].decrement(count);
            Ok(self.entries[pos].count())
        }
    }

    /// Applies a batch of (count, name) adds atomically.
    ///
    /// Every name is resolved and every add staged against a scratch copy;
    /// the live collection only changes if the whole batch succeeds, so the
    /// file written afterwards reflects either no line or every line.
    pub fn add_many(
        &mut self,
        catalog: &Catalog,
        items: &[(u32, String)],
    ) -> Result<Vec<(String, AddOutcome)>> {
        let mut staged = self.clone();
        let mut outcomes = Vec::with_capacity(items.len());

        for (count, name) in items {
            let card = catalog
                .find_by_name(name)
                .ok_or_else(|| CollectionError::CardNotFound(name.clone()))?;
            let outcome = staged.add(card, *count)?;
            outcomes.push((card.name.clone(), outcome));
        }

        *self = staged;
        Ok(outcomes)
    }

    /// Adds every catalog card of the given set at `count` copies, with the
    /// same saturating semantics as `add`. Returns how many entries were
    /// actually created or raised.
    pub fn merge_set(&mut self, catalog: &Catalog, set_id: &str, count: u32) -> Result<usize> {
        let cards: Vec<&Card> = catalog.cards_in_set(set_id).collect();
        if cards.is_empty() {
            return Err(CollectionError::UnknownSet(set_id.to_string()));
        }

        let mut changed = 0;
        for card in cards {
            if self.add(card, count)? != AddOutcome::AlreadyAtCap {
                changed += 1;
            }
        }
        log::info!("Merged set {}: {} entries changed", set_id, changed);
        Ok(changed)
    }

    /// Drops every entry. Irreversible within the session.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &OwnedCard> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total copies across all entries
    pub fn total_copies(&self) -> u32 {
        self.entries.iter().map(|e| e.count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rarity;
    use std::collections::BTreeMap;

    fn card(id: u32, name: &str) -> Card {
        Card {
            dbf_id: id,
            name: name.to_string(),
            rarity: Some(Rarity::Rare),
            card_set: Some("EXPERT1".to_string()),
            extra: BTreeMap::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_cards(vec![card(1, "Wisp"), card(2, "Doomsayer"), card(3, "Ysera")])
            .unwrap()
    }

    #[test]
    fn test_add_creates_entry() {
        let mut col = Collection::new();
        assert_eq!(col.add(&card(1, "Wisp"), 1).unwrap(), AddOutcome::Added);
        assert_eq!(col.find(1).unwrap().count(), 1);
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn test_add_saturates_at_two() {
        let mut col = Collection::new();
        let wisp = card(1, "Wisp");

        // 1 then 1 converges to 2
        col.add(&wisp, 1).unwrap();
        assert_eq!(col.add(&wisp, 1).unwrap(), AddOutcome::RaisedToCap);
        assert_eq!(col.find(1).unwrap().count(), 2);

        // Further adds are no-ops, never 3
        assert_eq!(col.add(&wisp, 1).unwrap(), AddOutcome::AlreadyAtCap);
        assert_eq!(col.add(&wisp, 2).unwrap(), AddOutcome::AlreadyAtCap);
        assert_eq!(col.find(1).unwrap().count(), 2);

        // 1 then 2 also converges to 2, not 3
        let mut col = Collection::new();
        col.add(&wisp, 1).unwrap();
        assert_eq!(col.add(&wisp, 2).unwrap(), AddOutcome::RaisedToCap);
        assert_eq!(col.find(1).unwrap().count(), 2);
    }

    #[test]
    fn test_add_rejects_bad_count() {
        let mut col = Collection::new();
        assert!(matches!(
            col.add(&card(1, "Wisp"), 0),
            Err(CollectionError::InvalidCount(0))
        ));
        assert!(matches!(
            col.add(&card(1, "Wisp"), 3),
            Err(CollectionError::InvalidCount(3))
        ));
        assert!(col.is_empty());
    }

    #[test]
    fn test_add_fails_fast_on_corrupt_count() {
        // A count of 3 can only come from a hand-edited or corrupt file
        let entries: Vec<OwnedCard> =
            serde_json::from_str(r#"[{"dbfId": 1, "name": "Wisp", "count": 3}]"#).unwrap();
        let mut col = Collection::from_entries(entries);

        assert!(matches!(
            col.add(&card(1, "Wisp"), 1),
            Err(CollectionError::CorruptCount { count: 3, .. })
        ));
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let mut col = Collection::new();
        col.add(&card(1, "Wisp"), 2).unwrap();

        assert_eq!(col.remove("Wisp", 1).unwrap(), 1);
        assert_eq!(col.find(1).unwrap().count(), 1);

        assert_eq!(col.remove("Wisp", 1).unwrap(), 0);
        assert!(col.find(1).is_none());
        assert!(col.is_empty());
    }

    #[test]
    fn test_remove_overdraw_fails_unchanged() {
        let mut col = Collection::new();
        col.add(&card(1, "Wisp"), 1).unwrap();

        let err = col.remove("Wisp", 2).unwrap_err();
        assert!(matches!(
            err,
            CollectionError::InsufficientCount {
                owned: 1,
                requested: 2,
                ..
            }
        ));
        assert_eq!(col.find(1).unwrap().count(), 1);
    }

    #[test]
    fn test_remove_missing_card_fails() {
        let mut col = Collection::new();
        assert!(matches!(
            col.remove("Ysera", 1),
            Err(CollectionError::NotInCollection(_))
        ));
    }

    #[test]
    fn test_add_many_is_atomic() {
        let mut col = Collection::new();
        col.add(&card(1, "Wisp"), 1).unwrap();

        let items = vec![
            (1, "Doomsayer".to_string()),
            (2, "Ysera".to_string()),
            (1, "No Such Card".to_string()),
            (1, "Wisp".to_string()),
        ];
        let err = col.add_many(&catalog(), &items).unwrap_err();
        assert!(matches!(err, CollectionError::CardNotFound(_)));

        // Nothing from the batch landed, including the lines before the bad one
        assert_eq!(col.len(), 1);
        assert_eq!(col.find(1).unwrap().count(), 1);
        assert!(col.find(2).is_none());
        assert!(col.find(3).is_none());
    }

    #[test]
    fn test_add_many_applies_all_on_success() {
        let mut col = Collection::new();
        let items = vec![(1, "Wisp".to_string()), (2, "ysera".to_string())];

        let outcomes = col.add_many(&catalog(), &items).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0], ("Wisp".to_string(), AddOutcome::Added));
        // Resolved names come back in catalog spelling
        assert_eq!(outcomes[1].0, "Ysera");
        assert_eq!(col.total_copies(), 3);
    }

    #[test]
    fn test_merge_set_saturates_and_counts() {
        let mut col = Collection::new();
        col.add(&card(1, "Wisp"), 2).unwrap();

        let changed = col.merge_set(&catalog(), "EXPERT1", 2).unwrap();
        // Wisp was already at cap, the other two were added
        assert_eq!(changed, 2);
        assert_eq!(col.len(), 3);
        assert!(col.iter().all(|e| e.count() == 2));
    }

    #[test]
    fn test_merge_set_unknown_set_fails() {
        let mut col = Collection::new();
        assert!(matches!(
            col.merge_set(&catalog(), "NAXX", 2),
            Err(CollectionError::UnknownSet(_))
        ));
        assert!(col.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut col = Collection::new();
        col.add(&card(1, "Wisp"), 2).unwrap();
        col.add(&card(2, "Doomsayer"), 1).unwrap();

        col.reset();
        assert!(col.is_empty());
        assert_eq!(col.total_copies(), 0);
    }
}
