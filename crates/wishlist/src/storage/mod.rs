//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `wishlist_core::storage`. The backend used by the server is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//! - `inmemory`: process-local storage, lost on restart
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time. The in-memory backend is compiled regardless, since
//! handler tests run against it.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p wishlist
//! ```
//!
//! Build with the in-memory store:
//! ```bash
//! cargo build -p wishlist --no-default-features --features inmemory,memory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'sqlite' or 'inmemory' feature. \
    Example: cargo build -p wishlist --features sqlite"
);

mod cached;
#[cfg_attr(not(feature = "inmemory"), allow(dead_code))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cached::CachedWishlistStore;
#[cfg_attr(not(feature = "inmemory"), allow(unused_imports))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
