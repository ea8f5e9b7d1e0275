//! Package unlock resolver.
//!
//! Packages open strictly in order: the first is always open, and each later
//! package opens only once every package before it is complete. A package
//! with no words is never complete, so it blocks everything after it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::progress::ProgressBook;
use crate::types::Package;

/// Mastery summary for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageProgress {
    pub package_id: String,
    pub total_words: u32,
    pub words_with_full_stars: u32,
}

impl PackageProgress {
    pub fn new(package_id: impl Into<String>, total_words: u32, words_with_full_stars: u32) -> Self {
        Self {
            package_id: package_id.into(),
            total_words,
            words_with_full_stars,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total_words > 0 && self.words_with_full_stars >= self.total_words
    }
}

/// Ids of the unlocked packages, given packages in display order.
///
/// ```
/// use wordfall_core::unlock::{resolve_unlocked, PackageProgress};
///
/// let unlocked = resolve_unlocked(&[
///     PackageProgress::new("A", 0, 0),
///     PackageProgress::new("B", 5, 5),
/// ]);
/// assert!(unlocked.contains("A"));
/// assert!(!unlocked.contains("B"));
/// ```
pub fn resolve_unlocked(packages: &[PackageProgress]) -> BTreeSet<String> {
    let mut unlocked = BTreeSet::new();
    for package in packages {
        unlocked.insert(package.package_id.clone());
        if !package.is_complete() {
            break;
        }
    }
    unlocked
}

/// Aggregate per-package mastery from a progress book, sorted by display order.
pub fn package_progress(packages: &[Package], book: &ProgressBook) -> Vec<PackageProgress> {
    let mut ordered: Vec<&Package> = packages.iter().collect();
    ordered.sort_by_key(|p| p.package_ref());

    ordered
        .into_iter()
        .map(|p| PackageProgress {
            package_id: p.id.clone(),
            total_words: p.words.len() as u32,
            words_with_full_stars: book.mastered_count(&p.words),
        })
        .collect()
}

/// Unlocked package ids for the user whose ratings are in `book`.
pub fn unlocked_packages(packages: &[Package], book: &ProgressBook) -> BTreeSet<String> {
    resolve_unlocked(&package_progress(packages, book))
}
