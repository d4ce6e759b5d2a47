use crate::error::{CollectionError, Result};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

fn parse_cardlist_line(line: &str) -> Option<(u32, String)> {
    let parts: Vec<&str> = line.trim().splitn(2, ' ').collect();
    if parts.len() != 2 {
        return None;
    }

    let count = parts[0].parse().ok()?;
    let name = parts[1].trim().to_string();
    if name.is_empty() {
        return None;
    }
    Some((count, name))
}

/// Reads a card-list manifest: one `<count> <name>` per line, blank lines
/// and `#` comments skipped.
///
/// A line that fits neither shape is an error rather than a skip: the batch
/// built from this list persists atomically, so a silently dropped line
/// would mean a collection that quietly disagrees with the manifest.
pub fn read_cardlist<P: AsRef<Path>>(path: P) -> Result<Vec<(u32, String)>> {
    let file = File::open(path.as_ref())?;
    let reader = io::BufReader::new(file);
    let mut items = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_cardlist_line(trimmed) {
            Some(item) => items.push(item),
            None => {
                return Err(CollectionError::BadManifestLine {
                    line_no: idx + 1,
                    content: line,
                })
            }
        }
    }

    Ok(items)
}
