//! Repository layer for book storage

pub mod books;

/// Main repository struct holding every store of the process
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            books: books::BooksRepository::new(),
        }
    }
}
