//! Integration tests for package progress and unlocking

use std::collections::BTreeSet;

use wordfall::core::{
    package_progress, resolve_unlocked, unlocked_packages, PackageProgress, ProgressBook,
    ProgressIntent,
};
use wordfall::types::{Package, Word};

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn progress(flags: &[bool]) -> Vec<PackageProgress> {
    flags
        .iter()
        .enumerate()
        .map(|(i, done)| PackageProgress::new(format!("P{i}"), 4, if *done { 4 } else { 1 }))
        .collect()
}

fn package(id: &str, order: i32, word_ids: &[&str]) -> Package {
    Package {
        id: id.into(),
        name: id.to_uppercase(),
        display_order: order,
        words: word_ids
            .iter()
            .map(|w| Word::new(*w, "word", "kelime", 1))
            .collect(),
    }
}

#[test]
fn test_no_packages_unlocks_nothing() {
    assert!(resolve_unlocked(&[]).is_empty());
}

#[test]
fn test_first_package_always_unlocked() {
    assert_eq!(resolve_unlocked(&progress(&[false])), set(&["P0"]));
    assert_eq!(resolve_unlocked(&progress(&[false, false])), set(&["P0"]));
}

#[test]
fn test_stops_after_first_incomplete() {
    // P1 opens because P0 is complete; P2 stays shut behind incomplete P1.
    assert_eq!(
        resolve_unlocked(&progress(&[true, false, true])),
        set(&["P0", "P1"])
    );
}

#[test]
fn test_all_complete_unlocks_all() {
    assert_eq!(
        resolve_unlocked(&progress(&[true, true, true])),
        set(&["P0", "P1", "P2"])
    );
}

#[test]
fn test_unlocked_set_is_a_prefix() {
    let cases: [&[bool]; 5] = [
        &[true, true, false, true],
        &[false, true, true],
        &[true, false],
        &[true, true, true, true, false],
        &[],
    ];
    for flags in cases {
        let unlocked = resolve_unlocked(&progress(flags));
        let expected = flags.iter().position(|done| !done).map_or(flags.len(), |i| i + 1);
        assert_eq!(unlocked.len(), expected, "flags {flags:?}");
        for i in 0..expected {
            assert!(unlocked.contains(&format!("P{i}")));
        }
    }
}

#[test]
fn test_empty_package_blocks_the_rest() {
    let packages = [
        PackageProgress::new("A", 0, 0),
        PackageProgress::new("B", 5, 5),
    ];
    assert_eq!(resolve_unlocked(&packages), set(&["A"]));
}

#[test]
fn test_book_drives_unlocking_in_display_order() {
    // Listed out of order on purpose.
    let packages = vec![
        package("food", 2, &["bread", "milk"]),
        package("animals", 1, &["cat", "dog"]),
        package("colors", 3, &["red"]),
    ];
    let mut book = ProgressBook::new();

    let rows = package_progress(&packages, &book);
    let ids: Vec<&str> = rows.iter().map(|p| p.package_id.as_str()).collect();
    assert_eq!(ids, vec!["animals", "food", "colors"]);
    assert_eq!(unlocked_packages(&packages, &book), set(&["animals"]));

    // Two stars is not mastery.
    book.set_rating("cat", 2);
    book.set_rating("dog", 5);
    assert_eq!(unlocked_packages(&packages, &book), set(&["animals"]));

    book.apply(&ProgressIntent::Increment("cat".into()));
    assert_eq!(book.rating("cat"), 3);
    assert_eq!(unlocked_packages(&packages, &book), set(&["animals", "food"]));

    book.set_rating("bread", 3);
    book.set_rating("milk", 4);
    assert_eq!(
        unlocked_packages(&packages, &book),
        set(&["animals", "food", "colors"])
    );

    // Failing a word relocks everything after its package.
    book.apply(&ProgressIntent::Reset("dog".into()));
    assert_eq!(book.rating("dog"), 1);
    assert_eq!(unlocked_packages(&packages, &book), set(&["animals"]));
}

#[test]
fn test_stars_cap_at_five() {
    let mut book = ProgressBook::new();
    for _ in 0..10 {
        book.apply(&ProgressIntent::Increment("w".into()));
    }
    assert_eq!(book.rating("w"), 5);
}
