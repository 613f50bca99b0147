//! Favorites store behaviour over the in-memory and file backends.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use zcountries::storage::{
    AddOutcome, FavoritesStore, FileStore, KeyValueStore, MemoryStore, FAVORITES_KEY, MAX_FAVORITES,
};

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
}

const POOL: [&str; 8] = ["Japan", "Peru", "Chile", "Kenya", "Norway", "Nepal", "Fiji", "Oman"];

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..POOL.len()).prop_map(Op::Add),
        1 => (0..POOL.len()).prop_map(Op::Remove),
    ]
}

fn store_with(backend: &MemoryStore) -> FavoritesStore {
    FavoritesStore::new(Box::new(backend.clone()))
}

fn persisted(backend: &MemoryStore) -> Vec<String> {
    backend
        .raw(FAVORITES_KEY)
        .map(|raw| serde_json::from_str(&raw).unwrap())
        .unwrap_or_default()
}

proptest! {
    #[test]
    fn never_exceeds_capacity_or_duplicates(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let backend = MemoryStore::new();
        let mut favorites = store_with(&backend);

        for op in ops {
            match op {
                Op::Add(i) => { favorites.add(POOL[i]).unwrap(); }
                Op::Remove(i) => favorites.remove(POOL[i]).unwrap(),
            }

            let names = favorites.names();
            prop_assert!(names.len() <= MAX_FAVORITES);
            let mut deduped = names.to_vec();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), names.len());
            prop_assert_eq!(persisted(&backend), names.to_vec());
        }
    }

    #[test]
    fn removed_names_are_gone(ops in proptest::collection::vec(op_strategy(), 0..30), target in 0..POOL.len()) {
        let backend = MemoryStore::new();
        let mut favorites = store_with(&backend);
        for op in ops {
            match op {
                Op::Add(i) => { favorites.add(POOL[i]).unwrap(); }
                Op::Remove(i) => favorites.remove(POOL[i]).unwrap(),
            }
        }

        let before: Vec<String> = favorites
            .names()
            .iter()
            .filter(|n| *n != POOL[target])
            .cloned()
            .collect();
        favorites.remove(POOL[target]).unwrap();
        prop_assert!(!favorites.contains(POOL[target]));
        prop_assert_eq!(favorites.names().to_vec(), before);
    }

    #[test]
    fn load_is_idempotent(raw in prop_oneof![
        Just(String::new()),
        Just("not json".to_string()),
        Just("{\"a\":1}".to_string()),
        proptest::collection::vec("[A-Z][a-z]{0,6}", 0..9)
            .prop_map(|names| serde_json::to_string(&names).unwrap()),
    ]) {
        let favorites = FavoritesStore::new(Box::new(MemoryStore::with_entry(FAVORITES_KEY, &raw)));
        let first = favorites.load();
        let second = favorites.load();
        prop_assert!(first.len() <= MAX_FAVORITES);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn full_list_rejects_sixth() {
    let backend = MemoryStore::with_entry(FAVORITES_KEY, r#"["A","B","C","D","E"]"#);
    let mut favorites = store_with(&backend);

    assert_eq!(favorites.add("F").unwrap(), AddOutcome::CapacityReached);
    assert_eq!(favorites.names(), ["A", "B", "C", "D", "E"]);
    assert_eq!(persisted(&backend), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn removing_persists_remaining_names() {
    let backend = MemoryStore::with_entry(FAVORITES_KEY, r#"["India","USA"]"#);
    let mut favorites = store_with(&backend);

    favorites.remove("India").unwrap();
    assert_eq!(backend.raw(FAVORITES_KEY).as_deref(), Some(r#"["USA"]"#));

    favorites.remove("Narnia").unwrap();
    assert_eq!(favorites.names(), ["USA"]);
}

#[test]
fn removing_an_unknown_name_rewrites_the_stored_list() {
    let backend = MemoryStore::with_entry(FAVORITES_KEY, r#"["USA", "USA"]"#);
    let mut favorites = store_with(&backend);

    favorites.remove("Narnia").unwrap();
    assert_eq!(backend.raw(FAVORITES_KEY).as_deref(), Some(r#"["USA"]"#));
}

#[test]
fn failed_write_keeps_previous_list() {
    let backend = MemoryStore::with_entry(FAVORITES_KEY, r#"["Peru"]"#);
    let mut favorites = store_with(&backend);

    backend.set_fail_writes(true);
    assert!(favorites.add("Chile").is_err());
    assert_eq!(favorites.names(), ["Peru"]);
    assert_eq!(persisted(&backend), vec!["Peru"]);
}

#[test]
fn file_store_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("favorites.json");

    {
        let mut favorites = FavoritesStore::new(Box::new(FileStore::open(&path).unwrap()));
        assert!(favorites.add("Japan").unwrap().is_added());
        assert!(favorites.add("Peru").unwrap().is_added());
        favorites.remove("Japan").unwrap();
    }

    let reopened = FavoritesStore::new(Box::new(FileStore::open(&path).unwrap()));
    assert_eq!(reopened.names(), ["Peru"]);

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["Peru"]"#));
}

#[test]
fn corrupt_file_starts_empty_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    std::fs::write(&path, "{ definitely not json").unwrap();

    let mut favorites = FavoritesStore::new(Box::new(FileStore::open(&path).unwrap()));
    assert!(favorites.is_empty());

    favorites.add("Chad").unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(doc["entries"][FAVORITES_KEY], r#"["Chad"]"#);
}

#[test]
fn file_store_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let mut store = FileStore::open(&path).unwrap();
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["favorites.json".to_string()]);
}
