//! Room Detail View
//!
//! Resolves the `:id` route parameter against the store.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use percent_encoding::percent_decode_str;

use crate::components::format_price;
use crate::models::Room;
use crate::store::{store_get_by_id, use_rooms_store};

#[component]
pub fn RoomDetailView() -> impl IntoView {
    let store = use_rooms_store();
    let params = use_params_map();

    let room = move || {
        let raw = params.read().get("id").unwrap_or_default();
        let id = percent_decode_str(&raw).decode_utf8_lossy().into_owned();
        let found = store_get_by_id(&store, &id);
        if found.is_none() {
            log::debug!("[ROOMS] No room with id {:?}", id);
        }
        found
    };

    view! {
        <section class="room-detail">
            <a class="back-link" href="/">"← До списку"</a>
            {move || match room() {
                Some(room) => view! { <RoomDetails room=room /> }.into_any(),
                None => view! { <p class="room-not-found">"Оголошення не знайдено"</p> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn RoomDetails(room: Room) -> impl IntoView {
    let coordinates = format!(
        "Координати: {:.4}, {:.4}",
        room.geometry.latitude(),
        room.geometry.longitude()
    );

    view! {
        <article class="room-details">
            <h2 class="room-name">{room.name}</h2>
            <p class="room-location">{room.location}</p>
            <p class="room-price">{format_price(room.price)}</p>
            {room.area.map(|area| view! { <p class="room-area">{format!("Площа: {} м²", area)}</p> })}
            <p class="room-description">{room.description}</p>
            <p class="room-coordinates">{coordinates}</p>
            <ul class="room-tags">
                {room.tags.into_iter().map(|tag| view! { <li class="room-tag">{tag}</li> }).collect_view()}
            </ul>
        </article>
    }
}
