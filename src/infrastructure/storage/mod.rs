use crate::core::errors::GroupStayError;
use crate::core::models::{Group, Hotel, Room};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Upsert the group together with its full participant set. Fails if the
    /// group's code is already registered to a different group, so two
    /// concurrently created groups can never share a join code.
    async fn save_group(&self, group: Group) -> Result<(), GroupStayError>;
    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, GroupStayError>;
    async fn get_group_by_code(&self, code: &str) -> Result<Option<Group>, GroupStayError>;
    /// Groups in which the user is a non-cancelled participant.
    async fn get_user_groups(&self, user_id: Uuid) -> Result<Vec<Group>, GroupStayError>;

    async fn get_hotel(&self, hotel_id: Uuid) -> Result<Option<Hotel>, GroupStayError>;
    async fn get_room(&self, room_id: Uuid) -> Result<Option<Room>, GroupStayError>;
    async fn save_hotel(&self, hotel: Hotel) -> Result<(), GroupStayError>;
    async fn save_room(&self, room: Room) -> Result<(), GroupStayError>;
}

pub mod in_memory;
