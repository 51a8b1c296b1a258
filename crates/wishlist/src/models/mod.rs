mod item;
mod status;
mod wishlist;

pub use item::CreateItem;
pub use status::MarkResponse;
pub use wishlist::CreateWishList;
