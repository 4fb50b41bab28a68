use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub image: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// Ordered list of the items a game is dealt from, each one becomes a pair of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<CatalogEntry>);

impl Catalog {
    const BUILTIN: [(&'static str, &'static str); 6] = [
        ("Python", "./img/Python.svg"),
        ("JavaScript", "./img/JS.svg"),
        ("Java", "./img/Java.svg"),
        ("CSharp", "./img/CSharp.svg"),
        ("Go", "./img/Go.svg"),
        ("Ruby", "./img/Ruby.svg"),
    ];

    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self(entries)
    }

    pub fn builtin() -> Self {
        Self(
            Self::BUILTIN
                .iter()
                .map(|&(name, image)| CatalogEntry::new(name, image))
                .collect(),
        )
    }

    /// Parses a JSON array of `{"name": ..., "image": ...}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| GameError::InvalidCatalog(err.to_string()))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Two face-down cards per entry, in catalog order.
    pub fn deal(&self) -> Vec<Card> {
        let mut seen = BTreeSet::new();
        for entry in &self.0 {
            if !seen.insert(entry.name.as_str()) {
                log::warn!(
                    "Catalog lists {:?} more than once, its cards will match each other",
                    entry.name
                );
            }
        }

        self.0
            .iter()
            .flat_map(|entry| {
                [
                    Card::new(entry.name.clone(), entry.image.clone()),
                    Card::new(entry.name.clone(), entry.image.clone()),
                ]
            })
            .collect()
    }

    pub fn into_board(self) -> Result<Board> {
        Board::new(self.deal())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
