//! Routed Views
//!
//! One component per route.

mod room_detail;
mod rooms_list;

pub use room_detail::RoomDetailView;
pub use rooms_list::RoomsListView;
