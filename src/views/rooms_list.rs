//! Rooms List View
//!
//! Search, results grid and pagination.

use leptos::prelude::*;

use crate::components::{Pagination, RoomCard, SearchBar};
use crate::stagger::{stagger_appear, StaggerOptions};
use crate::store::{store_filtered_count, store_paginated_rooms, use_rooms_store};

#[component]
pub fn RoomsListView() -> impl IntoView {
    let store = use_rooms_store();
    let count = move || store_filtered_count(&store);
    let grid_stagger = StaggerOptions::default().with_selector(":scope > .room-card");

    view! {
        <section class="rooms-list">
            <SearchBar />
            <p class="rooms-count">{move || format!("Знайдено: {}", count())}</p>
            <Show
                when=move || { count() > 0 }
                fallback=|| view! { <p class="rooms-empty">"Нічого не знайдено"</p> }
            >
                <ul class="room-grid" use:stagger_appear={grid_stagger.clone()}>
                    <For
                        each=move || store_paginated_rooms(&store)
                        key=|room| room.id.clone()
                        children=|room| view! { <RoomCard room=room /> }
                    />
                </ul>
            </Show>
            <Pagination />
        </section>
    }
}
