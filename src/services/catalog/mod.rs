//! Page operations: one per logical page and record kind.
//!
//! Each operation returns a [`Page`]: a view to render, a form to re-render
//! with errors, a refused delete, or a redirect target. Missing records and
//! store failures come back as [`AppError`](crate::error::AppError).

mod author;
mod book;
mod book_instance;
mod genre;

use crate::{error::AppResult, repository::Repository, views::{IndexView, Page}};

use super::{aggregation::AggregationService, mutation::MutationService};

#[derive(Clone)]
pub struct CatalogService {
    aggregation: AggregationService,
    mutation: MutationService,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        let aggregation = AggregationService::new(repository.clone());
        let mutation = MutationService::new(repository, aggregation.clone());
        Self {
            aggregation,
            mutation,
        }
    }

    /// Home page record counts
    pub async fn index(&self) -> AppResult<Page<IndexView>> {
        let counts = self.aggregation.counts().await?;
        tracing::debug!(?counts, "Loaded catalog counts");
        Ok(Page::Render(IndexView::from(counts)))
    }
}
