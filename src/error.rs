//! Error types for collection operations

use std::fmt;

/// Unified error type for catalog, collection and deck operations
#[derive(Debug)]
pub enum CollectionError {
    /// File I/O error
    Io(std::io::Error),
    /// Failed to parse or serialize JSON
    Parse(serde_json::Error),
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// Card name not present in the catalog
    CardNotFound(String),
    /// Set identifier matches no catalog card
    UnknownSet(String),
    /// Card count outside the allowed 1..=2 range
    InvalidCount(u32),
    /// An owned entry carries a count outside 1..=2 (corrupt collection file)
    CorruptCount { name: String, count: u32 },
    /// Two catalog cards share the same dbfId (corrupt catalog file)
    DuplicateId(u32),
    /// Card is not in the collection
    NotInCollection(String),
    /// Removal would drive an owned count below zero
    InsufficientCount {
        name: String,
        owned: u32,
        requested: u32,
    },
    /// Deckstring token could not be decoded
    MalformedDeckstring(String),
    /// A card-list manifest line is not `<count> <name>`
    BadManifestLine { line_no: usize, content: String },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::Io(e) => write!(f, "I/O error: {}", e),
            CollectionError::Parse(e) => write!(f, "Parse error: {}", e),
            CollectionError::Network(e) => write!(f, "Network error: {}", e),
            CollectionError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            CollectionError::CardNotFound(name) => write!(f, "Card not found: {}", name),
            CollectionError::UnknownSet(set) => write!(f, "No cards in set: {}", set),
            CollectionError::InvalidCount(count) => {
                write!(f, "Card count ({}) must be 1 or 2", count)
            }
            CollectionError::CorruptCount { name, count } => {
                write!(f, "Card {} count is unexpected: {}", name, count)
            }
            CollectionError::DuplicateId(id) => {
                write!(f, "Catalog contains duplicate dbfId: {}", id)
            }
            CollectionError::NotInCollection(name) => {
                write!(f, "Not in collection: {}", name)
            }
            CollectionError::InsufficientCount {
                name,
                owned,
                requested,
            } => write!(
                f,
                "Cannot remove {} of {} (only {} owned)",
                requested, name, owned
            ),
            CollectionError::MalformedDeckstring(msg) => {
                write!(f, "Invalid deck string: {}", msg)
            }
            CollectionError::BadManifestLine { line_no, content } => {
                write!(f, "Bad card list line {}: {:?}", line_no, content)
            }
        }
    }
}

impl std::error::Error for CollectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectionError::Io(e) => Some(e),
            CollectionError::Parse(e) => Some(e),
            CollectionError::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CollectionError {
    fn from(err: std::io::Error) -> Self {
        CollectionError::Io(err)
    }
}

impl From<serde_json::Error> for CollectionError {
    fn from(err: serde_json::Error) -> Self {
        CollectionError::Parse(err)
    }
}

impl From<reqwest::Error> for CollectionError {
    fn from(err: reqwest::Error) -> Self {
        CollectionError::Network(err)
    }
}

/// Result alias for collection operations
pub type Result<T> = std::result::Result<T, CollectionError>;
