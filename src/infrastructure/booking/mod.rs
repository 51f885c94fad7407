use crate::core::errors::GroupStayError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// What the engine sends to the individual-booking subsystem for one
/// participant: their room, the group's shared dates, their own guest count
/// and requests.
#[derive(Clone, Debug)]
pub struct BookingRequest {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_guests: u32,
    pub special_requests: Option<String>,
}

#[derive(Clone, Debug)]
pub struct BookingConfirmation {
    pub booking_id: Uuid,
    pub total_price: f64,
}

/// The individual booking subsystem, a potentially failing remote-like
/// collaborator. Both calls are non-transactional from this core's view.
#[async_trait]
pub trait BookingClient: Send + Sync {
    async fn create_booking_for_user(
        &self,
        request: BookingRequest,
    ) -> Result<BookingConfirmation, GroupStayError>;

    async fn cancel_booking(&self, booking_id: Uuid, reason: &str) -> Result<(), GroupStayError>;
}

pub mod in_memory;
