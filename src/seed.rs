//! Static Seed Data
//!
//! Mock listings embedded into the bundle. This is the only data source; a
//! real fetch would produce the same `Vec<Room>`.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::Room;

const ROOMS_JSON: &str = include_str!("seed/rooms.json");

/// Why a seed document was rejected
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to parse seed data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate listing id `{0}`")]
    DuplicateId(String),
    #[error("listing `{id}` has non-positive price {price}")]
    InvalidPrice { id: String, price: f64 },
    #[error("listing `{id}` has invalid position ({longitude}, {latitude})")]
    InvalidPosition { id: String, longitude: f64, latitude: f64 },
}

/// The bundled listings
pub fn mock_rooms() -> Result<Vec<Room>, SeedError> {
    parse_rooms(ROOMS_JSON)
}

/// Parse and validate a JSON array of rooms
pub fn parse_rooms(json: &str) -> Result<Vec<Room>, SeedError> {
    let rooms: Vec<Room> = serde_json::from_str(json)?;
    validate(&rooms)?;
    Ok(rooms)
}

fn validate(rooms: &[Room]) -> Result<(), SeedError> {
    let mut seen = HashSet::new();
    for room in rooms {
        if !seen.insert(room.id.as_str()) {
            return Err(SeedError::DuplicateId(room.id.clone()));
        }
        if !(room.price.is_finite() && room.price > 0.0) {
            return Err(SeedError::InvalidPrice { id: room.id.clone(), price: room.price });
        }
        if !room.geometry.is_valid() {
            return Err(SeedError::InvalidPosition {
                id: room.id.clone(),
                longitude: room.geometry.longitude(),
                latitude: room.geometry.latitude(),
            });
        }
    }
    Ok(())
}
