use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Catalog records consumed by the engine. The hotel/room CRUD itself lives in
// a separate subsystem; storage only exposes lookups and seed writes.

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub city: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub number: String,
    pub capacity: u32,
    pub nightly_rate: f64,
}
