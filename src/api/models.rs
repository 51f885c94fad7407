use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::errors::GroupStayError;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub organizer_id: Uuid,
    pub hotel_id: Uuid,
    pub name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub max_participants: u32,
    pub join_deadline: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct JoinGroupRequest {
    pub code: String,
    pub user_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct SelectRoomRequest {
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub num_guests: u32,
    pub special_requests: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LockGroupRequest {
    pub organizer_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct ConfirmGroupRequest {
    pub organizer_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct CancelGroupRequest {
    pub organizer_id: Uuid,
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LeaveGroupRequest {
    pub user_id: Uuid,
}

/// Optional `user_id` switches `GET /groups/{id}` to the membership-restricted view.
#[derive(Deserialize, ToSchema)]
pub struct GetGroupQuery {
    pub user_id: Option<Uuid>,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for GroupStayError to implement IntoResponse
pub struct ApiError(pub GroupStayError);

impl From<GroupStayError> for ApiError {
    fn from(err: GroupStayError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            GroupStayError::GroupNotFound(_)
            | GroupStayError::GroupCodeNotFound(_)
            | GroupStayError::HotelNotFound(_)
            | GroupStayError::RoomNotFound(_) => StatusCode::NOT_FOUND,

            GroupStayError::NotOrganizer(_)
            | GroupStayError::NotGroupMember(_)
            | GroupStayError::OrganizerCannotLeave => StatusCode::FORBIDDEN,

            GroupStayError::AlreadyGroupMember(_)
            | GroupStayError::RoomAlreadySelected(_, _)
            | GroupStayError::GroupFull(_, _)
            | GroupStayError::RoomCapacityExceeded(_, _)
            | GroupStayError::GroupAlreadyConfirmed(_) => StatusCode::CONFLICT,

            GroupStayError::GroupNotOpen(_, _)
            | GroupStayError::GroupCancelled(_)
            | GroupStayError::JoinDeadlinePassed(_)
            | GroupStayError::ParticipantHasBooking(_, _)
            | GroupStayError::RoomNotInHotel(_, _)
            | GroupStayError::InvalidDates(_)
            | GroupStayError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,

            GroupStayError::IncompleteSelection(_) => StatusCode::UNPROCESSABLE_ENTITY,

            GroupStayError::PartialConfirmation(_, _) => StatusCode::BAD_GATEWAY,

            GroupStayError::BookingFailed(_)
            | GroupStayError::StorageError(_)
            | GroupStayError::NotificationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}
