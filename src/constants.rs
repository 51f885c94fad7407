// Event types published on a group's topic, in the order operations commit.
pub const PARTICIPANT_JOINED: &str = "PARTICIPANT_JOINED";
pub const ROOM_SELECTED: &str = "ROOM_SELECTED";
pub const GROUP_LOCKED: &str = "GROUP_LOCKED";
pub const GROUP_CONFIRMED: &str = "GROUP_CONFIRMED";
pub const GROUP_CANCELLED: &str = "GROUP_CANCELLED";
pub const PARTICIPANT_LEFT: &str = "PARTICIPANT_LEFT";

/// Length of the public join code generated at group creation.
pub const GROUP_CODE_LEN: usize = 8;

pub const MAX_GROUP_NAME_LEN: usize = 100;
pub const MAX_NOTES_LEN: usize = 500;
pub const MAX_SPECIAL_REQUESTS_LEN: usize = 500;
