//! In-memory storage backend.
//!
//! Always compiled: it backs the server when the `inmemory` feature is
//! selected and serves as the store in handler tests.

mod repository;

pub use repository::InMemoryRepository;
