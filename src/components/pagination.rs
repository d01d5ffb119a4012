//! Pagination Component
//!
//! Previous/next controls, page status and page size selector.

use leptos::prelude::*;

use crate::models::DEFAULT_PER_PAGE;
use crate::store::{store_filters, store_set_page, store_set_per_page, store_total_pages, use_rooms_store};

/// Page sizes offered in the selector
pub const PER_PAGE_CHOICES: [usize; 3] = [3, 6, 12];

#[component]
pub fn Pagination() -> impl IntoView {
    let store = use_rooms_store();
    let page = move || store_filters(&store).page;
    let total = move || store_total_pages(&store);

    let on_per_page = move |ev: web_sys::Event| {
        let per_page = event_target_value(&ev).parse::<i64>().unwrap_or(DEFAULT_PER_PAGE as i64);
        store_set_per_page(&store, per_page);
    };

    view! {
        <nav class="pagination">
            <button
                type="button"
                class="pagination-prev"
                disabled=move || { page() <= 1 }
                on:click=move |_| store_set_page(&store, page() as i64 - 1)
            >
                "‹ Назад"
            </button>
            <span class="pagination-status">{move || format!("Сторінка {} з {}", page(), total())}</span>
            <button
                type="button"
                class="pagination-next"
                disabled=move || { page() >= total() }
                on:click=move |_| store_set_page(&store, page() as i64 + 1)
            >
                "Далі ›"
            </button>
            <label class="pagination-per-page">
                "На сторінці: "
                <select on:change=on_per_page>
                    {PER_PAGE_CHOICES
                        .iter()
                        .map(|&n| {
                            view! {
                                <option value=n.to_string() selected=move || { store_filters(&store).per_page == n }>
                                    {n}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
        </nav>
    }
}
