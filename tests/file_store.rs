use cellar::allocator::PositionAllocator;
use cellar::api::CellarApi;
use cellar::error::CellarError;
use cellar::layout::{self, StorageLayout};
use cellar::lifecycle;
use cellar::model::NewWine;
use cellar::store::fs::FileStore;
use cellar::store::DataStore;
use std::fs;

fn api_in(dir: &std::path::Path) -> CellarApi<FileStore> {
    CellarApi::new(FileStore::new(dir.to_path_buf()), PositionAllocator::default())
}

#[test]
fn missing_catalog_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("not-yet-created"));

    assert!(!store.has_storage().unwrap());
    assert!(store.list_wines(true).unwrap().is_empty());
    assert!(store.list_positions().unwrap().is_empty());
}

#[test]
fn catalog_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut api = api_in(dir.path());
        api.setup_default().unwrap();
        api.add_wine(NewWine::new("Chablis", "Crisp white Burgundy"))
            .unwrap();
    }

    let store = FileStore::new(dir.path().to_path_buf());
    assert!(store.has_storage().unwrap());
    assert_eq!(store.list_positions().unwrap().len(), 12);

    let wines = store.list_wines(false).unwrap();
    assert_eq!(wines.len(), 1);
    let w1 = store.find_positions("W1").unwrap().remove(0);
    assert_eq!(wines[0].position_id, Some(w1.id));
    assert_eq!(w1.wine_id, Some(wines[0].id));
    assert!(w1.is_occupied);
}

#[test]
fn saving_leaves_only_the_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut api = api_in(dir.path());
    api.setup_default().unwrap();
    api.add_wine(NewWine::new("Malbec", "Mendoza")).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["catalog.json".to_string()]);
    assert_eq!(api.store().location(), dir.path().join("catalog.json"));
}

#[test]
fn corrupt_catalog_is_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("catalog.json"), "{ not json").unwrap();
    let store = FileStore::new(dir.path().to_path_buf());

    assert!(matches!(
        store.list_wines(false),
        Err(CellarError::StoreUnavailable(_))
    ));
}

#[test]
fn failed_operation_does_not_touch_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut api = api_in(dir.path());
    api.setup_default().unwrap();
    api.add_wine_at(NewWine::new("Chablis", "white"), "W1")
        .unwrap();
    let before = fs::read_to_string(dir.path().join("catalog.json")).unwrap();

    let err = api
        .add_wine_at(NewWine::new("Muscadet", "white"), "W1")
        .unwrap_err();
    assert!(matches!(err, CellarError::PositionUnavailable { .. }));

    let after = fs::read_to_string(dir.path().join("catalog.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn lifecycle_runs_against_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    let built = layout::build(&StorageLayout::default_grid()).unwrap();
    store
        .transaction(|catalog| {
            catalog.insert_storage(built.storage.clone());
            for position in &built.positions {
                catalog.insert_position(position.clone());
            }
            Ok(())
        })
        .unwrap();

    let r1 = store.find_positions("R1").unwrap().remove(0);
    let placed = lifecycle::add(&mut store, NewWine::new("Malbec", "red"), Some(r1.id)).unwrap();
    let released = lifecycle::mark_consumed(&mut store, &placed.wine.id).unwrap();
    assert_eq!(released.released.map(|p| p.id), Some(r1.id));

    let reopened = FileStore::new(dir.path().to_path_buf());
    assert!(reopened.get_position(&r1.id).unwrap().unwrap().is_available());
    assert!(reopened.get_wine(&placed.wine.id).unwrap().unwrap().consumed);
    assert!(reopened.snapshot().unwrap().occupancy_violations().is_empty());
}
