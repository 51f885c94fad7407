use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")] // Ensures JSON uses "PENDING" / "CONFIRMED" / "CANCELLED"
pub enum ParticipantStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParticipantStatus::Pending => "PENDING",
            ParticipantStatus::Confirmed => "CONFIRMED",
            ParticipantStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// One person's stake in a group stay. Owned exclusively by its [`Group`];
/// room and booking are plain foreign keys into externally-owned records.
///
/// [`Group`]: super::group::Group
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_organizer: bool,
    pub status: ParticipantStatus,
    pub room_id: Option<Uuid>,
    pub num_guests: u32,
    pub special_requests: Option<String>,
    /// Set only by a successful individual-booking creation during confirm.
    pub booking_id: Option<Uuid>,
    /// Price of the linked booking, recorded when the booking is created so a
    /// retried confirm can still total the group.
    pub booking_price: Option<f64>,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(user_id: Uuid, is_organizer: bool, joined_at: DateTime<Utc>) -> Self {
        Participant {
            id: Uuid::new_v4(),
            user_id,
            is_organizer,
            status: ParticipantStatus::Pending,
            room_id: None,
            num_guests: 1,
            special_requests: None,
            booking_id: None,
            booking_price: None,
            joined_at,
        }
    }

    /// Non-cancelled participants count towards capacity and room exclusivity.
    pub fn is_active(&self) -> bool {
        self.status != ParticipantStatus::Cancelled
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ParticipantStatus::Confirmed
    }
}
