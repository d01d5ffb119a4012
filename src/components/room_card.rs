//! Room Card Component
//!
//! One listing in the results grid, linking to its detail page.

use leptos::prelude::*;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::models::Room;

/// Detail page path with the id percent-encoded
pub fn room_href(id: &str) -> String {
    format!("/property/{}", utf8_percent_encode(id, NON_ALPHANUMERIC))
}

/// Monthly price in hryvnias, rounded
pub fn format_price(price: f64) -> String {
    format!("{} ₴ / міс.", price.round())
}

#[component]
pub fn RoomCard(room: Room) -> impl IntoView {
    let href = room_href(&room.id);

    view! {
        <li class="room-card">
            <a class="room-card-link" href=href>
                <h3 class="room-name">{room.name}</h3>
                <p class="room-location">{room.location}</p>
                <p class="room-price">{format_price(room.price)}</p>
            </a>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_href() {
        assert_eq!(room_href("2"), "/property/2");
        assert_eq!(room_href("a b/c"), "/property/a%20b%2Fc");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(500.0), "500 ₴ / міс.");
        assert_eq!(format_price(649.6), "650 ₴ / міс.");
    }
}
