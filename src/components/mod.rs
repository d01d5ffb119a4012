//! UI Components
//!
//! Reusable Leptos components.

mod pagination;
mod room_card;
mod search_bar;

pub use pagination::Pagination;
pub use room_card::{format_price, RoomCard};
pub use search_bar::SearchBar;
