//! Rooms Rent App
//!
//! Composition root: owns the store and the stagger runtime, renders the
//! header and the routes.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::stagger::provide_stagger_context;
use crate::store::RoomsState;
use crate::views::{RoomDetailView, RoomsListView};

pub const APP_TITLE: &str = "Оренда приміщень";

#[component]
pub fn App() -> impl IntoView {
    let mut state = RoomsState::new();
    state.load();

    // Provide context to all children
    provide_context(Store::new(state));
    provide_stagger_context();

    view! {
        <Router>
            <header class="app-header">
                <a class="app-title" href="/">{APP_TITLE}</a>
            </header>
            <main class="app-main">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=RoomsListView />
                    <Route path=path!("/property/:id") view=RoomDetailView />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <section class="not-found">
            <p>"Сторінку не знайдено"</p>
            <a href="/">"На головну"</a>
        </section>
    }
}
