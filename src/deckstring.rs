//! Decoder for the shared deckstring format
//!
//! A deckstring is base64 over a stream of unsigned LEB128 varints: a
//! reserved zero byte, version (always 1), deck format, then a hero block
//! and three card blocks (single copies, double copies, explicit counts),
//! each preceded by its length. The game client wraps the token in
//! `#`-comment lines when sharing; those are stripped here.

use crate::error::{CollectionError, Result};
use crate::models::DeckEntry;
use base64::Engine;

const DECKSTRING_VERSION: u64 = 1;

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        ByteReader { bytes, pos: 0 }
    }

    fn read_byte(&mut self) -> Result<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| malformed("unexpected end of data"))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads one unsigned LEB128 varint
    fn read_varint(&mut self) -> Result<u64> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            let byte = self.read_byte()?;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift >= 35 {
                return Err(malformed("varint out of range"));
            }
        }
    }

    fn read_u32(&mut self) -> Result<u32> {
        let value = self.read_varint()?;
        u32::try_from(value).map_err(|_| malformed("value out of range"))
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

fn malformed(msg: &str) -> CollectionError {
    CollectionError::MalformedDeckstring(msg.to_string())
}

/// Pulls the base64 token out of a pasted share block: the first line that
/// is neither blank nor a `#` comment.
fn extract_token(input: &str) -> Result<&str> {
    input
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .ok_or_else(|| malformed("no deckstring line found"))
}

/// Decodes a deckstring into its required cards, in wire order.
///
/// Hero ids are read and discarded; the collection does not track heroes.
pub fn decode(input: &str) -> Result<Vec<DeckEntry>> {
    let token = extract_token(input)?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(token)
        .map_err(|e| malformed(&format!("bad base64: {}", e)))?;

    let mut reader = ByteReader::new(&bytes);

    if reader.read_byte()? != 0 {
        return Err(malformed("missing reserved byte"));
    }
    let version = reader.read_varint()?;
    if version != DECKSTRING_VERSION {
        return Err(malformed(&format!("unsupported version {}", version)));
    }
    // Deck format (wild/standard); not needed for reconciliation
    let _format = reader.read_varint()?;

    let heroes = reader.read_varint()?;
    for _ in 0..heroes {
        reader.read_u32()?;
    }

    let mut entries = Vec::new();
    for fixed_count in [1u32, 2] {
        let n = reader.read_varint()?;
        for _ in 0..n {
            entries.push(DeckEntry {
                dbf_id: reader.read_u32()?,
                count: fixed_count,
            });
        }
    }
    let n = reader.read_varint()?;
    for _ in 0..n {
        let dbf_id = reader.read_u32()?;
        let count = reader.read_u32()?;
        entries.push(DeckEntry { dbf_id, count });
    }

    if !reader.is_exhausted() {
        return Err(malformed("trailing data after card blocks"));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    // reserved 0, version 1, format 2, hero 7,
    // x1: ids 40 and 300, x2: id 5, explicit: id 9 x4
    const SAMPLE: &str = "AAECAQcCKKwCAQUBCQQ=";

    #[test]
    fn test_decode_sample() {
        let entries = decode(SAMPLE).unwrap();
        assert_eq!(
            entries,
            vec![
                DeckEntry { dbf_id: 40, count: 1 },
                DeckEntry {
                    dbf_id: 300,
                    count: 1
                },
                DeckEntry { dbf_id: 5, count: 2 },
                DeckEntry { dbf_id: 9, count: 4 },
            ]
        );
    }

    #[test]
    fn test_decode_skips_share_comments() {
        let pasted = format!("### My Deck\n# Class: Warrior\n\n{}\n#\n", SAMPLE);
        let entries = decode(&pasted).unwrap();
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(decode("not a deckstring!!").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_reserved_byte() {
        // base64 of [0x01]
        assert!(decode("AQ==").is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_stream() {
        // base64 of [0x00, 0x01]: ends before the format varint
        assert!(decode("AAE=").is_err());
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(decode("").is_err());
        assert!(decode("# only comments\n\n").is_err());
    }

    #[test]
    fn test_errors_are_reported_not_panicked() {
        let err = decode("AQ==").unwrap_err();
        assert!(err.to_string().contains("Invalid deck string"));
    }
}
