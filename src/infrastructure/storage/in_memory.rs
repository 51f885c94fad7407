use crate::core::errors::GroupStayError;
use crate::core::models::{Group, Hotel, Room};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct InMemoryStorage {
    groups: Mutex<HashMap<Uuid, Group>>,
    codes: Mutex<HashMap<String, Uuid>>, // join code -> group_id
    hotels: Mutex<HashMap<Uuid, Hotel>>,
    rooms: Mutex<HashMap<Uuid, Room>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            groups: Mutex::new(HashMap::new()),
            codes: Mutex::new(HashMap::new()),
            hotels: Mutex::new(HashMap::new()),
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_group(&self, group: Group) -> Result<(), GroupStayError> {
        // For production: use database transactions and a unique index on code
        let mut groups = self.groups.lock().await;
        let mut codes = self.codes.lock().await;
        if let Some(existing) = codes.get(&group.code) {
            if *existing != group.id {
                return Err(GroupStayError::StorageError(format!(
                    "code {} already registered to group {}",
                    group.code, existing
                )));
            }
        }
        codes.insert(group.code.clone(), group.id);
        groups.insert(group.id, group);
        Ok(())
    }

    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, GroupStayError> {
        Ok(self.groups.lock().await.get(&group_id).cloned())
    }

    async fn get_group_by_code(&self, code: &str) -> Result<Option<Group>, GroupStayError> {
        // For production: use database index on code
        let group_id = self.codes.lock().await.get(code).copied();
        Ok(match group_id {
            Some(id) => self.groups.lock().await.get(&id).cloned(),
            None => None,
        })
    }

    async fn get_user_groups(&self, user_id: Uuid) -> Result<Vec<Group>, GroupStayError> {
        // For production: use database query with index
        Ok(self
            .groups
            .lock()
            .await
            .values()
            .filter(|g| g.participant_for(user_id).is_some())
            .cloned()
            .collect())
    }

    async fn get_hotel(&self, hotel_id: Uuid) -> Result<Option<Hotel>, GroupStayError> {
        Ok(self.hotels.lock().await.get(&hotel_id).cloned())
    }

    async fn get_room(&self, room_id: Uuid) -> Result<Option<Room>, GroupStayError> {
        Ok(self.rooms.lock().await.get(&room_id).cloned())
    }

    async fn save_hotel(&self, hotel: Hotel) -> Result<(), GroupStayError> {
        self.hotels.lock().await.insert(hotel.id, hotel);
        Ok(())
    }

    async fn save_room(&self, room: Room) -> Result<(), GroupStayError> {
        self.rooms.lock().await.insert(room.id, room);
        Ok(())
    }
}
