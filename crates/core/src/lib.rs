//! Functional core of the wishlist service.
//!
//! Domain types, status ledger rules, cache key planning, and the storage and
//! cache contracts. Nothing in this crate performs I/O.

pub mod auth;
pub mod cache;
pub mod serde;
pub mod storage;
pub mod wishlist;
