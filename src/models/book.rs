//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    messages,
};

/// Full book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque 16 character identifier
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    /// Total number of pages
    pub page_count: u32,
    /// Pages read so far, never greater than `page_count`
    pub read_page: u32,
    /// Derived: `read_page == page_count`
    pub finished: bool,
    /// Whether the reader declared the book as currently being read
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Overwrite every mutable field from a payload and refresh derived ones
    pub fn apply(&mut self, data: &BookPayload, now: DateTime<Utc>) {
        self.name = data.name.clone().unwrap_or_default();
        self.year = data.year;
        self.author = data.author.clone();
        self.summary = data.summary.clone();
        self.publisher = data.publisher.clone();
        self.page_count = data.page_count;
        self.read_page = data.read_page;
        self.reading = data.reading;
        self.finished = data.is_finished();
        self.updated_at = now;
    }
}

/// Reduced projection used when listing books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update book request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    /// Required, must not be blank
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

impl BookPayload {
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.trim().is_empty())
    }

    pub fn read_page_exceeds_page_count(&self) -> bool {
        self.read_page > self.page_count
    }

    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// Raw query string of `GET /books`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1`/`true` or `0`/`false`
    pub reading: Option<String>,
    /// `1`/`true` or `0`/`false`
    pub finished: Option<String>,
}

/// Listing filter; at most one criterion applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    None,
    ByName(String),
    ByReading(bool),
    ByFinished(bool),
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::None => true,
            BookFilter::ByName(needle) => book.name.to_lowercase().contains(needle),
            BookFilter::ByReading(reading) => book.reading == *reading,
            BookFilter::ByFinished(finished) => book.finished == *finished,
        }
    }
}

impl TryFrom<&BookQuery> for BookFilter {
    type Error = AppError;

    /// `name` takes priority over `reading`, which takes priority over `finished`.
    /// Empty values count as absent.
    fn try_from(query: &BookQuery) -> AppResult<Self> {
        if let Some(name) = non_empty(&query.name) {
            return Ok(BookFilter::ByName(name.to_lowercase()));
        }
        if let Some(reading) = non_empty(&query.reading) {
            return parse_flag("reading", reading).map(BookFilter::ByReading);
        }
        if let Some(finished) = non_empty(&query.finished) {
            return parse_flag("finished", finished).map(BookFilter::ByFinished);
        }
        Ok(BookFilter::None)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_flag(param: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "{}: {} harus bernilai 0 atau 1",
            messages::INVALID_FILTER,
            param
        ))),
    }
}
