//! Frontend Models
//!
//! Rental listing records and the user's filter/pagination state.

use serde::{Deserialize, Serialize};

/// Page size used when nothing else was chosen
pub const DEFAULT_PER_PAGE: usize = 6;

/// One rental property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    /// Floor area in square metres
    #[serde(default)]
    pub area: Option<f64>,
    pub geometry: Geometry,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// GeoJSON geometry; only points are used for listings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `[longitude, latitude]`
    Point { coordinates: [f64; 2] },
}

impl Geometry {
    #[cfg(test)]
    pub fn point(longitude: f64, latitude: f64) -> Self {
        Geometry::Point { coordinates: [longitude, latitude] }
    }

    pub fn longitude(&self) -> f64 {
        match self {
            Geometry::Point { coordinates } => coordinates[0],
        }
    }

    pub fn latitude(&self) -> f64 {
        match self {
            Geometry::Point { coordinates } => coordinates[1],
        }
    }

    /// Both coordinates finite and inside WGS84 bounds
    pub fn is_valid(&self) -> bool {
        let (lon, lat) = (self.longitude(), self.latitude());
        lon.is_finite() && lat.is_finite() && (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
    }
}

/// Search and paging intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Raw query exactly as typed
    pub query: String,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Filters {
    /// Store the query verbatim and go back to the first page
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Clamp into `[1, total_pages]`
    pub fn set_page(&mut self, page: i64, total_pages: usize) {
        let total = total_pages.max(1);
        let max = i64::try_from(total).unwrap_or(i64::MAX);
        self.page = usize::try_from(page.clamp(1, max)).unwrap_or(total);
    }

    /// Clamp to at least 1 and go back to the first page
    pub fn set_per_page(&mut self, per_page: i64) {
        self.per_page = usize::try_from(per_page.max(1)).unwrap_or(usize::MAX);
        self.page = 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
