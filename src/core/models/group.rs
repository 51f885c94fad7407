use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::participant::{Participant, ParticipantStatus};
use crate::core::errors::GroupStayError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")] // Ensures JSON uses "OPEN" / "LOCKED" / ...
pub enum GroupStatus {
    Open,
    Locked,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GroupStatus::Open => "OPEN",
            GroupStatus::Locked => "LOCKED",
            GroupStatus::Confirmed => "CONFIRMED",
            GroupStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// A jointly planned multi-room stay. The group exclusively owns its
/// participant records; hotel and rooms are referenced by id only.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    /// Short public join token, generated at creation, immutable.
    pub code: String,
    pub hotel_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub max_participants: u32,
    pub join_deadline: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub status: GroupStatus,
    /// Sum of the individual booking prices, set only at full confirmation.
    pub total_price: Option<f64>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<Participant>,
}

impl Group {
    // PARTICIPANT LEDGER

    pub fn active_participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_active())
    }

    pub fn current_participants(&self) -> u32 {
        self.active_participants().count() as u32
    }

    pub fn organizer(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_organizer)
    }

    pub fn is_organizer(&self, user_id: Uuid) -> bool {
        self.organizer().map(|p| p.user_id == user_id).unwrap_or(false)
    }

    /// The user's non-cancelled participant record, if any.
    pub fn participant_for(&self, user_id: Uuid) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.user_id == user_id && p.is_active())
    }

    pub fn participant_for_mut(&mut self, user_id: Uuid) -> Option<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|p| p.user_id == user_id && p.is_active())
    }

    /// The non-cancelled participant currently holding the room, if any.
    pub fn room_holder(&self, room_id: Uuid) -> Option<&Participant> {
        self.active_participants().find(|p| p.room_id == Some(room_id))
    }

    pub fn can_join(&self, now: DateTime<Utc>) -> bool {
        self.status == GroupStatus::Open
            && self.current_participants() < self.max_participants
            && self.join_deadline.map(|d| now <= d).unwrap_or(true)
    }

    /// Active participants that still lack a room selection.
    pub fn roomless_participants(&self) -> Vec<&Participant> {
        self.active_participants()
            .filter(|p| p.room_id.is_none())
            .collect()
    }

    // STATE MACHINE
    //
    // OPEN -> LOCKED -> CONFIRMED, OPEN|LOCKED -> CANCELLED. CONFIRMED and
    // CANCELLED are terminal.

    pub fn ensure_open(&self) -> Result<(), GroupStayError> {
        if self.status != GroupStatus::Open {
            return Err(GroupStayError::GroupNotOpen(
                self.id.to_string(),
                self.status.to_string(),
            ));
        }
        Ok(())
    }

    /// Open or Locked, i.e. not yet in a terminal state.
    pub fn ensure_not_finalized(&self) -> Result<(), GroupStayError> {
        match self.status {
            GroupStatus::Confirmed => {
                Err(GroupStayError::GroupAlreadyConfirmed(self.id.to_string()))
            }
            GroupStatus::Cancelled => Err(GroupStayError::GroupCancelled(self.id.to_string())),
            GroupStatus::Open | GroupStatus::Locked => Ok(()),
        }
    }

    pub fn ensure_organizer(&self, user_id: Uuid) -> Result<(), GroupStayError> {
        if !self.is_organizer(user_id) {
            return Err(GroupStayError::NotOrganizer(user_id.to_string()));
        }
        Ok(())
    }

    pub fn lock(&mut self) -> Result<(), GroupStayError> {
        self.ensure_open()?;
        self.status = GroupStatus::Locked;
        Ok(())
    }

    pub fn mark_confirmed(
        &mut self,
        total_price: f64,
        now: DateTime<Utc>,
    ) -> Result<(), GroupStayError> {
        self.ensure_not_finalized()?;
        self.status = GroupStatus::Confirmed;
        self.total_price = Some(total_price);
        self.confirmed_at = Some(now);
        Ok(())
    }

    pub fn mark_cancelled(&mut self) -> Result<(), GroupStayError> {
        self.ensure_not_finalized()?;
        for participant in &mut self.participants {
            participant.status = ParticipantStatus::Cancelled;
        }
        self.status = GroupStatus::Cancelled;
        Ok(())
    }
}
