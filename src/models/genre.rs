//! Genre model

use serde::{Deserialize, Serialize};

use super::{Record, RecordFilter, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenreData {
    pub name: String,
}

impl Record for Genre {
    type Data = GenreData;
    type Filter = GenreFilter;

    const KIND: &'static str = "genre";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_parts(id: RecordId, data: GenreData) -> Self {
        Self { id, name: data.name }
    }

    fn data(&self) -> GenreData {
        GenreData {
            name: self.name.clone(),
        }
    }
}

/// Genre selection: by exact name, and/or restricted to a set of identities
#[derive(Debug, Clone, Default)]
pub struct GenreFilter {
    pub name: Option<String>,
    pub ids: Option<Vec<RecordId>>,
}

impl GenreFilter {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ids: None,
        }
    }

    pub fn with_ids(ids: Vec<RecordId>) -> Self {
        Self {
            name: None,
            ids: Some(ids),
        }
    }
}

impl RecordFilter<Genre> for GenreFilter {
    fn matches(&self, record: &Genre) -> bool {
        if let Some(ref name) = self.name {
            if &record.name != name {
                return false;
            }
        }
        if let Some(ref ids) = self.ids {
            if !ids.contains(&record.id) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter() {
        let genre = Genre::from_parts(
            RecordId::new("g1"),
            GenreData {
                name: "Poetry".to_string(),
            },
        );

        assert!(GenreFilter::default().matches(&genre));
        assert!(GenreFilter::named("Poetry").matches(&genre));
        assert!(!GenreFilter::named("poetry").matches(&genre));
        assert!(GenreFilter::with_ids(vec![RecordId::new("g1")]).matches(&genre));
        assert!(!GenreFilter::with_ids(vec![]).matches(&genre));
    }
}
