//! In-memory book storage

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tokio::sync::RwLock;

use crate::models::book::{Book, BookFilter, BookPayload, BookSummary};

/// URL-safe alphabet used for book identifiers
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";
pub const ID_LENGTH: usize = 16;

/// Ordered collection of books; insertion order is listing order.
///
/// Every operation takes the lock once, so operations are atomic with
/// respect to each other.
#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new book built from an already validated payload
    pub async fn create(&self, data: &BookPayload) -> Book {
        let mut books = self.books.write().await;

        let mut id = generate_id();
        while books.iter().any(|b| b.id == id) {
            id = generate_id();
        }

        let now = Utc::now();
        let book = Book {
            id,
            name: data.name.clone().unwrap_or_default(),
            year: data.year,
            author: data.author.clone(),
            summary: data.summary.clone(),
            publisher: data.publisher.clone(),
            page_count: data.page_count,
            read_page: data.read_page,
            finished: data.is_finished(),
            reading: data.reading,
            inserted_at: now,
            updated_at: now,
        };
        books.push(book.clone());
        book
    }

    pub async fn exists(&self, id: &str) -> bool {
        self.books.read().await.iter().any(|b| b.id == id)
    }

    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .read()
            .await
            .iter()
            .filter(|b| filter.matches(b))
            .map(BookSummary::from)
            .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Book> {
        self.books.read().await.iter().find(|b| b.id == id).cloned()
    }

    /// Replace the mutable fields of a book, returning the updated record
    pub async fn update(&self, id: &str, data: &BookPayload) -> Option<Book> {
        let mut books = self.books.write().await;
        let book = books.iter_mut().find(|b| b.id == id)?;
        book.apply(data, Utc::now());
        Some(book.clone())
    }

    /// Remove a book; returns `false` when no book has this id
    pub async fn delete(&self, id: &str) -> bool {
        let mut books = self.books.write().await;
        match books.iter().position(|b| b.id == id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }
}

fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
