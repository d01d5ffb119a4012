//! Rooms Store
//!
//! Uses Leptos reactive_stores for reactivity. The plain `RoomsState`
//! carries all the logic; the `store_*` helpers run it against the reactive
//! handle the views hold.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Filters, Room};
use crate::search;
use crate::seed;

/// Listing collection plus the user's search/paging intent
#[derive(Clone, Debug, Default, Store)]
pub struct RoomsState {
    /// Full, unfiltered collection
    pub rooms: Vec<Room>,
    pub filters: Filters,
}

impl RoomsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill from the bundled seed; no-op once populated
    pub fn load(&mut self) {
        if !self.rooms.is_empty() {
            log::debug!("[ROOMS] Already loaded {} rooms", self.rooms.len());
            return;
        }
        match seed::mock_rooms() {
            Ok(rooms) => self.load_from(rooms),
            Err(err) => log::error!("[ROOMS] Seed data rejected: {}", err),
        }
    }

    /// Fill from any source; no-op once populated
    pub fn load_from(&mut self, rooms: Vec<Room>) {
        if self.rooms.is_empty() {
            log::info!("[ROOMS] Loaded {} rooms", rooms.len());
            self.rooms = rooms;
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.set_query(query);
        log::debug!("[ROOMS] Query {:?}", self.normalized_query());
    }

    pub fn set_page(&mut self, page: i64) {
        let total = self.total_pages();
        self.filters.set_page(page, total);
    }

    pub fn set_per_page(&mut self, per_page: i64) {
        self.filters.set_per_page(per_page);
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset();
    }

    pub fn normalized_query(&self) -> String {
        search::normalize(&self.filters.query)
    }

    pub fn query_too_short(&self) -> bool {
        search::query_too_short(&self.filters.query)
    }

    pub fn filtered_rooms(&self) -> Vec<&Room> {
        search::filter_rooms(&self.rooms, &self.filters.query)
    }

    pub fn total_pages(&self) -> usize {
        search::total_pages(self.filtered_rooms().len(), self.filters.per_page)
    }

    pub fn paginated_rooms(&self) -> Vec<&Room> {
        search::paginate(&self.filtered_rooms(), self.filters.page, self.filters.per_page)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }
}

/// Type alias for the store
pub type RoomsStore = Store<RoomsState>;

/// Get the rooms store from context
pub fn use_rooms_store() -> RoomsStore {
    expect_context::<RoomsStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_query(store: &RoomsStore, query: String) {
    store.write().set_query(query);
}

/// Clamp against the page count of the current result set
pub fn store_set_page(store: &RoomsStore, page: i64) {
    store.write().set_page(page);
}

pub fn store_set_per_page(store: &RoomsStore, per_page: i64) {
    store.write().set_per_page(per_page);
}

pub fn store_reset_filters(store: &RoomsStore) {
    store.write().reset_filters();
}

pub fn store_filters(store: &RoomsStore) -> Filters {
    store.filters().get()
}

pub fn store_query_too_short(store: &RoomsStore) -> bool {
    store.read().query_too_short()
}

pub fn store_filtered_count(store: &RoomsStore) -> usize {
    store.read().filtered_rooms().len()
}

pub fn store_total_pages(store: &RoomsStore) -> usize {
    store.read().total_pages()
}

pub fn store_paginated_rooms(store: &RoomsStore) -> Vec<Room> {
    store.read().paginated_rooms().into_iter().cloned().collect()
}

pub fn store_get_by_id(store: &RoomsStore, id: &str) -> Option<Room> {
    store.read().get_by_id(id).cloned()
}
