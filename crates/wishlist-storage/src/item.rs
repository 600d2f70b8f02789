//! Item storage - byte-level API for wishlist item persistence.

use crate::define_simple_storage;

define_simple_storage! {
    /// Wishlist item storage keyed by the caller-chosen item key.
    pub struct ItemStorage { table: "wishlist_items" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redb::Database;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn create_storage() -> (ItemStorage, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(Database::create(db_path).unwrap());
        (ItemStorage::new(db).unwrap(), temp_dir)
    }

    #[test]
    fn test_insert_and_get_raw() {
        let (storage, _tmp) = create_storage();

        assert!(storage.insert_new_raw("item-1", b"first").unwrap());

        let retrieved = storage.get_raw("item-1").unwrap();
        assert_eq!(retrieved.as_deref(), Some(&b"first"[..]));
        assert!(storage.get_raw("missing").unwrap().is_none());
    }

    #[test]
    fn test_insert_new_raw_keeps_existing_value() {
        let (storage, _tmp) = create_storage();

        assert!(storage.insert_new_raw("item-1", b"original").unwrap());
        assert!(!storage.insert_new_raw("item-1", b"replacement").unwrap());

        let retrieved = storage.get_raw("item-1").unwrap().unwrap();
        assert_eq!(retrieved, b"original");
        assert_eq!(storage.list_raw().unwrap().len(), 1);
    }

    #[test]
    fn test_replace_raw_requires_existing_key() {
        let (storage, _tmp) = create_storage();

        assert!(!storage.replace_raw("item-1", b"data").unwrap());
        assert!(storage.get_raw("item-1").unwrap().is_none());

        storage.insert_new_raw("item-1", b"old").unwrap();
        assert!(storage.replace_raw("item-1", b"new").unwrap());
        assert_eq!(storage.get_raw("item-1").unwrap().unwrap(), b"new");
    }

    #[test]
    fn test_list_raw_is_key_ordered() {
        let (storage, _tmp) = create_storage();

        storage.insert_new_raw("b", b"2").unwrap();
        storage.insert_new_raw("a", b"1").unwrap();
        storage.insert_new_raw("c", b"3").unwrap();

        let keys: Vec<String> = storage
            .list_raw()
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_delete() {
        let (storage, _tmp) = create_storage();

        assert!(!storage.delete("item-1").unwrap());

        storage.insert_new_raw("item-1", b"data").unwrap();
        assert!(storage.delete("item-1").unwrap());
        assert!(storage.get_raw("item-1").unwrap().is_none());
        assert!(storage.list_raw().unwrap().is_empty());
    }
}
