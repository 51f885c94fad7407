use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::group::{Group, GroupStatus};
use crate::constants;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupEventType {
    ParticipantJoined,
    RoomSelected,
    GroupLocked,
    GroupConfirmed,
    GroupCancelled,
    ParticipantLeft,
}

impl GroupEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupEventType::ParticipantJoined => constants::PARTICIPANT_JOINED,
            GroupEventType::RoomSelected => constants::ROOM_SELECTED,
            GroupEventType::GroupLocked => constants::GROUP_LOCKED,
            GroupEventType::GroupConfirmed => constants::GROUP_CONFIRMED,
            GroupEventType::GroupCancelled => constants::GROUP_CANCELLED,
            GroupEventType::ParticipantLeft => constants::PARTICIPANT_LEFT,
        }
    }
}

/// Fan-out payload delivered to every group member on each committed state
/// change. Published on the topic named by the group's join code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupEvent {
    pub group_id: Uuid,
    pub group_code: String,
    pub event_type: GroupEventType,
    pub message: String,
    pub participant_count: u32,
    pub status: GroupStatus,
    pub timestamp: DateTime<Utc>,
}

impl GroupEvent {
    /// Snapshot the group's state after a committed transition.
    pub fn from_group(group: &Group, event_type: GroupEventType, message: impl Into<String>) -> Self {
        GroupEvent {
            group_id: group.id,
            group_code: group.code.clone(),
            event_type,
            message: message.into(),
            participant_count: group.current_participants(),
            status: group.status.clone(),
            timestamp: Utc::now(),
        }
    }
}
