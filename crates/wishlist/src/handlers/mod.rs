mod authz;
pub mod error;
mod extract;
pub mod health;
pub mod items;
pub mod statuses;
pub mod wishlists;

pub use error::ApiError;
