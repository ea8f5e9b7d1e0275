//! Deck files: the packages and words available to play.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{package_progress, unlocked_packages, PackageProgress, ProgressBook};
use crate::types::{Package, MAX_WORD_LEN};

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid deck JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("deck has no packages")]
    Empty,
    #[error("duplicate package id: {0}")]
    DuplicatePackage(String),
    #[error("duplicate word id: {0}")]
    DuplicateWord(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub packages: Vec<Package>,
}

impl Deck {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let deck = Self::from_json(&text)?;
        log::debug!(
            "loaded deck {} ({} packages)",
            path.display(),
            deck.packages.len()
        );
        Ok(deck)
    }

    pub fn from_json(text: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_json::from_str(text)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Package and word ids must be unique across the deck.
    ///
    /// Words whose answer cannot be laid out as tiles are kept but logged;
    /// sessions skip them.
    pub fn validate(&self) -> Result<(), DeckError> {
        if self.packages.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut package_ids = HashSet::new();
        let mut word_ids = HashSet::new();
        for package in &self.packages {
            if !package_ids.insert(package.id.as_str()) {
                return Err(DeckError::DuplicatePackage(package.id.clone()));
            }
            for word in &package.words {
                if !word_ids.insert(word.id.as_str()) {
                    return Err(DeckError::DuplicateWord(word.id.clone()));
                }
                let len = word.answer().chars().count();
                if len == 0 || len > MAX_WORD_LEN {
                    log::warn!(
                        "word {} ({:?}) has an unplayable answer of {} letters",
                        word.id,
                        word.english,
                        len
                    );
                }
            }
        }
        Ok(())
    }

    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    /// Packages in display order.
    pub fn ordered(&self) -> Vec<&Package> {
        let mut packages: Vec<&Package> = self.packages.iter().collect();
        packages.sort_by_key(|p| p.package_ref());
        packages
    }

    pub fn progress(&self, book: &ProgressBook) -> Vec<PackageProgress> {
        package_progress(&self.packages, book)
    }

    pub fn unlocked(&self, book: &ProgressBook) -> BTreeSet<String> {
        unlocked_packages(&self.packages, book)
    }

    /// The last unlocked package in display order; where a learner left off.
    pub fn frontier(&self, book: &ProgressBook) -> Option<&Package> {
        let unlocked = self.unlocked(book);
        self.ordered()
            .into_iter()
            .rev()
            .find(|p| unlocked.contains(&p.id))
    }
}
