//! Search Bar Component
//!
//! Free-text query input with a hint for queries too short to filter.

use leptos::prelude::*;

use crate::search::MIN_QUERY_LEN;
use crate::store::{store_filters, store_query_too_short, store_reset_filters, store_set_query, use_rooms_store};

#[component]
pub fn SearchBar() -> impl IntoView {
    let store = use_rooms_store();

    view! {
        <div class="search-bar">
            <input
                type="search"
                class="search-input"
                placeholder="Пошук за назвою, адресою чи описом..."
                autocomplete="off"
                prop:value=move || store_filters(&store).query
                on:input=move |ev| store_set_query(&store, event_target_value(&ev))
            />
            <button type="button" class="search-reset" on:click=move |_| store_reset_filters(&store)>
                "Скинути"
            </button>
            <Show when=move || store_query_too_short(&store)>
                <p class="search-hint">{format!("Введіть щонайменше {} символи", MIN_QUERY_LEN)}</p>
            </Show>
        </div>
    }
}
