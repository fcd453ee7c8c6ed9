//! Books service

use crate::{
    error::{AppError, AppResult},
    messages,
    models::book::{Book, BookFilter, BookPayload, BookSummary},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new book, returning its id
    pub async fn create(&self, data: &BookPayload) -> AppResult<String> {
        if !data.has_name() {
            tracing::debug!("Rejected book creation: missing name");
            return Err(AppError::Validation(messages::BOOK_CREATE_MISSING_NAME.to_string()));
        }
        if data.read_page_exceeds_page_count() {
            tracing::debug!(
                "Rejected book creation: readPage {} > pageCount {}",
                data.read_page,
                data.page_count
            );
            return Err(AppError::Validation(
                messages::BOOK_CREATE_READ_PAGE_TOO_LARGE.to_string(),
            ));
        }

        let book = self.repository.books.create(data).await;
        if !self.repository.books.exists(&book.id).await {
            return Err(AppError::Internal(messages::BOOK_CREATE_FAILED.to_string()));
        }

        tracing::info!(book_id = %book.id, "Book created");
        Ok(book.id)
    }

    /// List book summaries matching a filter
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.repository.books.list(filter).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound(messages::BOOK_NOT_FOUND.to_string()))
    }

    /// Replace every mutable field of a book. Validation runs before the lookup.
    pub async fn update(&self, id: &str, data: &BookPayload) -> AppResult<Book> {
        if !data.has_name() {
            tracing::debug!(book_id = %id, "Rejected book update: missing name");
            return Err(AppError::Validation(messages::BOOK_UPDATE_MISSING_NAME.to_string()));
        }
        if data.read_page_exceeds_page_count() {
            tracing::debug!(book_id = %id, "Rejected book update: readPage > pageCount");
            return Err(AppError::Validation(
                messages::BOOK_UPDATE_READ_PAGE_TOO_LARGE.to_string(),
            ));
        }

        let book = self
            .repository
            .books
            .update(id, data)
            .await
            .ok_or_else(|| AppError::NotFound(messages::BOOK_UPDATE_NOT_FOUND.to_string()))?;

        tracing::info!(book_id = %id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.books.delete(id).await {
            return Err(AppError::NotFound(messages::BOOK_DELETE_NOT_FOUND.to_string()));
        }
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    /// Number of stored books (for readiness reporting)
    pub async fn count(&self) -> usize {
        self.repository.books.count().await
    }
}
