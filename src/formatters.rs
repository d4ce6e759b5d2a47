use crate::reconcile::DeckReport;

/// Renders a deck report as plain text, one line per required card in deck
/// order, with a crafting summary at the end.
pub fn format_deck_report(report: &DeckReport) -> String {
    let mut output = String::new();

    for entry in &report.entries {
        match entry.card {
            Some(card) if entry.missing == 0 => {
                output.push_str(&format!("{} x {}\n", entry.required, card.name));
            }
            Some(card) => {
                let rarity = card
                    .rarity
                    .map(|r| r.as_str())
                    .unwrap_or("Unknown");
                output.push_str(&format!(
                    "{} x {} ({}/{} owned, {} dust to craft, {})\n",
                    entry.required, card.name, entry.owned, entry.required, entry.dust, rarity
                ));
            }
            None => {
                output.push_str(&format!(
                    "{} x #{} (not in catalog)\n",
                    entry.required, entry.dbf_id
                ));
            }
        }
    }

    if report.is_complete() {
        output.push_str("\nComplete: every card is in the collection\n");
    } else {
        output.push_str(&format!(
            "\nMissing {} cards, {} dust to craft\n",
            report.missing_total(),
            report.total_dust
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::collection::Collection;
    use crate::models::{Card, DeckEntry, Rarity};
    use crate::reconcile::reconcile;
    use std::collections::BTreeMap;

    fn card(id: u32, name: &str, rarity: Rarity) -> Card {
        Card {
            dbf_id: id,
            name: name.to_string(),
            rarity: Some(rarity),
            card_set: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_report_lines() {
        let catalog = Catalog::from_cards(vec![
            card(1, "Wisp", Rarity::Common),
            card(3, "Ysera", Rarity::Legendary),
        ])
        .unwrap();
        let mut col = Collection::new();
        col.add(catalog.find_by_name("Wisp").unwrap(), 2).unwrap();

        let required = [
            DeckEntry { dbf_id: 1, count: 2 },
            DeckEntry { dbf_id: 3, count: 1 },
            DeckEntry {
                dbf_id: 999,
                count: 2,
            },
        ];
        let report = reconcile(&required, &col, &catalog);
        let text = format_deck_report(&report);

        assert!(text.contains("2 x Wisp\n"));
        assert!(text.contains("1 x Ysera (0/1 owned, 1600 dust to craft, Legendary)"));
        assert!(text.contains("2 x #999 (not in catalog)"));
        assert!(text.contains("Missing 3 cards, 1600 dust to craft"));
    }

    #[test]
    fn test_report_complete_deck() {
        let catalog = Catalog::from_cards(vec![card(1, "Wisp", Rarity::Common)]).unwrap();
        let mut col = Collection::new();
        col.add(catalog.find_by_name("Wisp").unwrap(), 2).unwrap();

        let report = reconcile(&[DeckEntry { dbf_id: 1, count: 2 }], &col, &catalog);
        let text = format_deck_report(&report);
        assert!(text.contains("Complete"));
        assert!(!text.contains("dust to craft,"));
    }
}
