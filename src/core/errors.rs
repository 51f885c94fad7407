use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum GroupStayError {
    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("No group found for code {0}")]
    GroupCodeNotFound(String),

    #[error("Hotel {0} not found")]
    HotelNotFound(String),

    #[error("Room {0} not found")]
    RoomNotFound(String),

    /// Organizer-only operation attempted by another participant.
    #[error("User {0} is not the group organizer")]
    NotOrganizer(String),

    #[error("User {0} is not a group participant")]
    NotGroupMember(String),

    #[error("Organizer cannot leave the group, cancel it instead")]
    OrganizerCannotLeave,

    #[error("Group {0} is {1}, operation requires an open group")]
    GroupNotOpen(String, String),

    #[error("Group {0} is already confirmed")]
    GroupAlreadyConfirmed(String),

    #[error("Group {0} is cancelled")]
    GroupCancelled(String),

    #[error("Join deadline for group {0} has passed")]
    JoinDeadlinePassed(String),

    /// The participant's individual booking must be cancelled before leaving
    /// or changing the room selection.
    #[error("Participant {0} already holds booking {1}")]
    ParticipantHasBooking(String, String),

    #[error("User {0} is already a group participant")]
    AlreadyGroupMember(String),

    /// The concurrency-critical conflict: the room is held by another
    /// non-cancelled participant of the same group.
    #[error("Room {0} already selected by participant {1}")]
    RoomAlreadySelected(String, String),

    #[error("Room {0} does not belong to hotel {1}")]
    RoomNotInHotel(String, String),

    #[error("Group {0} is full ({1} participants max)")]
    GroupFull(String, u32),

    #[error("Room {0} sleeps at most {1} guests")]
    RoomCapacityExceeded(String, u32),

    /// Confirm refused before any booking is attempted: these participants
    /// have no room selected.
    #[error("Participants without a room selection: {0:?}")]
    IncompleteSelection(Vec<String>),

    /// Confirm aborted mid-loop: bookings created so far stand, the named
    /// participant's booking failed, the group is not confirmed.
    #[error("Booking for participant {0} failed: {1}")]
    PartialConfirmation(String, String),

    #[error("Invalid stay dates: {0}")]
    InvalidDates(String),

    #[error("Invalid input for field `{0}`: {1}")]
    InvalidInput(String, String),

    #[error("Booking subsystem error: {0}")]
    BookingFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Notification error: {0}")]
    NotificationError(String),
}
