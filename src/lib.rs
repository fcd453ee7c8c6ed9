//! Bookshelf
//!
//! A small REST JSON API for keeping track of the books you own and how far
//! you got in each of them. Books live in memory for the lifetime of the
//! process.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod messages;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state around a fresh, empty book store
    pub fn new() -> Self {
        let repository = repository::Repository::new();
        Self {
            services: Arc::new(services::Services::new(repository)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
