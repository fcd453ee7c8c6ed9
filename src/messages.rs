//! Client-facing message texts.
//!
//! Existing clients match on these strings, so the wording is kept verbatim.

pub const BOOK_CREATED: &str = "Buku berhasil ditambahkan";
pub const BOOK_CREATE_MISSING_NAME: &str = "Gagal menambahkan buku. Mohon isi nama buku";
pub const BOOK_CREATE_READ_PAGE_TOO_LARGE: &str =
    "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount";
pub const BOOK_CREATE_FAILED: &str = "Buku gagal ditambahkan";

pub const BOOK_NOT_FOUND: &str = "Buku tidak ditemukan";

pub const BOOK_UPDATED: &str = "Buku berhasil diperbarui";
pub const BOOK_UPDATE_MISSING_NAME: &str = "Gagal memperbarui buku. Mohon isi nama buku";
pub const BOOK_UPDATE_READ_PAGE_TOO_LARGE: &str =
    "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount";
pub const BOOK_UPDATE_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";

pub const BOOK_DELETED: &str = "Buku berhasil dihapus";
pub const BOOK_DELETE_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";

pub const INVALID_PAYLOAD: &str = "Payload tidak valid";
pub const INVALID_FILTER: &str = "Filter tidak valid";
