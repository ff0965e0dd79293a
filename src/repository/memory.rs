//! In-memory store, used for development runs and tests

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::Store;
use crate::{
    error::AppResult,
    models::{Record, RecordFilter, RecordId},
};

/// Records kept in insertion order behind an async lock
pub struct MemoryStore<R: Record> {
    records: RwLock<IndexMap<RecordId, R>>,
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
        }
    }
}

#[async_trait]
impl<R: Record> Store<R> for MemoryStore<R> {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<R>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_many(&self, filter: &R::Filter) -> AppResult<Vec<R>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn count_matching(&self, filter: &R::Filter) -> AppResult<i64> {
        let records = self.records.read().await;
        Ok(records.values().filter(|r| filter.matches(r)).count() as i64)
    }

    async fn insert(&self, data: R::Data) -> AppResult<R> {
        let record = R::from_parts(RecordId::generate(), data);
        self.records
            .write()
            .await
            .insert(record.id().clone(), record.clone());
        Ok(record)
    }

    async fn update_by_id(&self, id: &RecordId, data: R::Data) -> AppResult<Option<R>> {
        let mut records = self.records.write().await;
        let Some(slot) = records.get_mut(id) else {
            return Ok(None);
        };
        *slot = R::from_parts(id.clone(), data);
        Ok(Some(slot.clone()))
    }

    async fn remove_by_id(&self, id: &RecordId) -> AppResult<bool> {
        Ok(self.records.write().await.shift_remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, BookData, BookFilter, Genre, GenreData, GenreFilter};

    fn genre(name: &str) -> GenreData {
        GenreData {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_identity() {
        let store = MemoryStore::<Genre>::default();
        let poetry = store.insert(genre("Poetry")).await.unwrap();
        let drama = store.insert(genre("Drama")).await.unwrap();

        assert_ne!(poetry.id, drama.id);
        let found = store.find_by_id(&poetry.id).await.unwrap().unwrap();
        assert_eq!(found.data(), genre("Poetry"));
    }

    #[tokio::test]
    async fn test_find_many_keeps_insertion_order() {
        let store = MemoryStore::<Genre>::default();
        for name in ["Poetry", "Drama", "Essay"] {
            store.insert(genre(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .find_many(&GenreFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Poetry", "Drama", "Essay"]);
        assert_eq!(
            store.count_matching(&GenreFilter::named("Drama")).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let store = MemoryStore::<Genre>::default();
        let poetry = store.insert(genre("Poetry")).await.unwrap();

        let updated = store
            .update_by_id(&poetry.id, genre("Verse"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, poetry.id);
        assert_eq!(updated.name, "Verse");

        let missing = RecordId::new("missing");
        assert!(store.update_by_id(&missing, genre("X")).await.unwrap().is_none());

        assert!(store.remove_by_id(&poetry.id).await.unwrap());
        assert!(!store.remove_by_id(&poetry.id).await.unwrap());
        assert!(store.find_by_id(&poetry.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filter_by_reference() {
        let store = MemoryStore::<Book>::default();
        let author = RecordId::new("a1");
        for (title, by) in [("Foundation", "a1"), ("Dune", "a2"), ("I, Robot", "a1")] {
            store
                .insert(BookData {
                    title: title.to_string(),
                    author: RecordId::new(by),
                    summary: String::new(),
                    isbn: String::new(),
                    genre: Vec::new(),
                })
                .await
                .unwrap();
        }

        let books = store.find_many(&BookFilter::by_author(author)).await.unwrap();
        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Foundation", "I, Robot"]);
    }
}
