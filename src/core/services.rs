use crate::config::CONFIG;
use crate::constants::{GROUP_CODE_LEN, MAX_GROUP_NAME_LEN, MAX_NOTES_LEN, MAX_SPECIAL_REQUESTS_LEN};
use crate::core::errors::GroupStayError;
use crate::core::models::{
    Group, GroupEvent, GroupEventType, GroupStatus, Participant, ParticipantStatus,
};
use crate::infrastructure::booking::{BookingClient, BookingRequest};
use crate::infrastructure::notify::Notifier;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateGroupInput {
    pub hotel_id: Uuid,
    pub name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub max_participants: u32,
    pub join_deadline: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct GroupView {
    pub group: Group,
    pub current_participants: u32,
    pub can_join: bool,
}

impl GroupView {
    fn new(group: Group) -> Self {
        let now = Utc::now();
        GroupView {
            current_participants: group.current_participants(),
            can_join: group.can_join(now),
            group,
        }
    }
}

/// The coordination engine facade. Every mutating operation acquires the
/// group's lock, re-reads the group inside it, applies the change, persists,
/// then publishes the event — so decisions never run on stale state and
/// per-group event order matches serialization order. Locks are per group:
/// operations on different groups never contend.
pub struct GroupStayService<S: Storage, B: BookingClient, N: Notifier> {
    storage: S,
    booking: B,
    notifier: N,
    group_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl<S: Storage, B: BookingClient, N: Notifier> GroupStayService<S, B, N> {
    pub fn new(storage: S, booking: B, notifier: N) -> Self {
        info!("Initializing GroupStayService");
        GroupStayService {
            storage,
            booking,
            notifier,
            group_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn booking(&self) -> &B {
        &self.booking
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // GROUP LIFECYCLE

    pub async fn create_group(
        &self,
        organizer_id: Uuid,
        input: CreateGroupInput,
    ) -> Result<Group, GroupStayError> {
        info!(
            "Creating group '{}' at hotel {} for organizer {}",
            input.name, input.hotel_id, organizer_id
        );
        self.validate_string_input("name", &input.name, MAX_GROUP_NAME_LEN)?;
        if let Some(notes) = &input.notes {
            self.validate_string_input("notes", notes, MAX_NOTES_LEN)?;
        }
        if input.max_participants < 1 {
            return Err(GroupStayError::InvalidInput(
                "max_participants".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let now = Utc::now();
        if input.check_out <= input.check_in {
            return Err(GroupStayError::InvalidDates(
                "check-out must be after check-in".to_string(),
            ));
        }
        if input.check_in < now.date_naive() {
            return Err(GroupStayError::InvalidDates(
                "check-in cannot be in the past".to_string(),
            ));
        }

        if self.storage.get_hotel(input.hotel_id).await?.is_none() {
            return Err(GroupStayError::HotelNotFound(input.hotel_id.to_string()));
        }

        let code = self.generate_group_code().await?;
        let group = Group {
            id: Uuid::new_v4(),
            name: input.name,
            code,
            hotel_id: input.hotel_id,
            check_in: input.check_in,
            check_out: input.check_out,
            max_participants: input.max_participants,
            join_deadline: input.join_deadline,
            notes: input.notes,
            status: GroupStatus::Open,
            total_price: None,
            confirmed_at: None,
            created_at: now,
            participants: vec![Participant::new(organizer_id, true, now)],
        };

        self.storage.save_group(group.clone()).await?;
        debug!("Group created with id {} and code {}", group.id, group.code);

        self.publish(
            &group,
            GroupEventType::ParticipantJoined,
            format!("User {} created the group and joined as organizer", organizer_id),
        )
        .await;

        Ok(group)
    }

    pub async fn join_group(&self, code: &str, user_id: Uuid) -> Result<Group, GroupStayError> {
        info!("User {} attempting to join group with code {}", user_id, code);
        let group_id = self
            .storage
            .get_group_by_code(code)
            .await?
            .ok_or_else(|| GroupStayError::GroupCodeNotFound(code.to_string()))?
            .id;

        let lock = self.lock_for(group_id).await;
        let _guard = lock.lock().await;

        let mut group = self.load_group(group_id).await?;
        group.ensure_open()?;
        let now = Utc::now();
        if group.join_deadline.map(|d| now > d).unwrap_or(false) {
            warn!("Join deadline passed for group {}", group.id);
            return Err(GroupStayError::JoinDeadlinePassed(group.id.to_string()));
        }
        if group.participant_for(user_id).is_some() {
            warn!("User {} already in group {}", user_id, group.id);
            return Err(GroupStayError::AlreadyGroupMember(user_id.to_string()));
        }
        if group.current_participants() >= group.max_participants {
            warn!("Group {} is full", group.id);
            return Err(GroupStayError::GroupFull(
                group.id.to_string(),
                group.max_participants,
            ));
        }

        group.participants.push(Participant::new(user_id, false, now));
        self.storage.save_group(group.clone()).await?;
        debug!("User {} joined group {}", user_id, group.id);

        self.publish(
            &group,
            GroupEventType::ParticipantJoined,
            format!("User {} joined the group", user_id),
        )
        .await;

        Ok(group)
    }

    /// A participant's exclusive claim on one room for the group's dates.
    /// The check-then-assign runs under the group's lock, so two concurrent
    /// selections of the same room cannot both pass the holder check.
    pub async fn select_room(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        room_id: Uuid,
        num_guests: u32,
        special_requests: Option<String>,
    ) -> Result<Group, GroupStayError> {
        info!(
            "User {} selecting room {} in group {}",
            user_id, room_id, group_id
        );
        if num_guests < 1 {
            return Err(GroupStayError::InvalidInput(
                "num_guests".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        if let Some(requests) = &special_requests {
            self.validate_string_input("special_requests", requests, MAX_SPECIAL_REQUESTS_LEN)?;
        }

        let lock = self.lock_for(group_id).await;
        let _guard = lock.lock().await;

        let mut group = self.load_group(group_id).await?;
        // Selection stays possible on a locked group; only terminal states refuse it.
        group.ensure_not_finalized()?;

        let participant = group
            .participant_for(user_id)
            .ok_or_else(|| GroupStayError::NotGroupMember(user_id.to_string()))?;
        if let Some(booking_id) = participant.booking_id {
            warn!(
                "Participant {} already booked, room change refused",
                user_id
            );
            return Err(GroupStayError::ParticipantHasBooking(
                user_id.to_string(),
                booking_id.to_string(),
            ));
        }

        let room = self
            .storage
            .get_room(room_id)
            .await?
            .ok_or_else(|| GroupStayError::RoomNotFound(room_id.to_string()))?;
        if room.hotel_id != group.hotel_id {
            return Err(GroupStayError::RoomNotInHotel(
                room_id.to_string(),
                group.hotel_id.to_string(),
            ));
        }
        if num_guests > room.capacity {
            return Err(GroupStayError::RoomCapacityExceeded(
                room_id.to_string(),
                room.capacity,
            ));
        }

        if let Some(holder) = group.room_holder(room_id) {
            if holder.user_id != user_id {
                warn!(
                    "Room {} in group {} already held by user {}",
                    room_id, group.id, holder.user_id
                );
                return Err(GroupStayError::RoomAlreadySelected(
                    room_id.to_string(),
                    holder.user_id.to_string(),
                ));
            }
        }

        if let Some(participant) = group.participant_for_mut(user_id) {
            participant.room_id = Some(room_id);
            participant.num_guests = num_guests;
            participant.special_requests = special_requests;
        }
        self.storage.save_group(group.clone()).await?;
        debug!("Room {} assigned to user {} in group {}", room_id, user_id, group.id);

        self.publish(
            &group,
            GroupEventType::RoomSelected,
            format!("User {} selected room {}", user_id, room.number),
        )
        .await;

        Ok(group)
    }

    pub async fn lock_group(
        &self,
        group_id: Uuid,
        organizer_id: Uuid,
    ) -> Result<Group, GroupStayError> {
        info!("User {} locking group {}", organizer_id, group_id);
        let lock = self.lock_for(group_id).await;
        let _guard = lock.lock().await;

        let mut group = self.load_group(group_id).await?;
        group.ensure_organizer(organizer_id)?;
        group.lock()?;
        self.storage.save_group(group.clone()).await?;

        self.publish(
            &group,
            GroupEventType::GroupLocked,
            "Group locked, no further participants can join".to_string(),
        )
        .await;

        Ok(group)
    }

    // CONFIRMATION ORCHESTRATION

    /// Converts the group into individual bookings, one participant at a time.
    ///
    /// No rollback on mid-loop failure: bookings created for earlier
    /// participants stand, the group stays unconfirmed, and the caller gets a
    /// `PartialConfirmation` naming the failed participant. Progress is
    /// persisted after every successful booking, so a retry (or a call
    /// cancelled at an await point) resumes with the remaining pending
    /// participants and never double-books a confirmed one.
    pub async fn confirm_group(
        &self,
        group_id: Uuid,
        organizer_id: Uuid,
    ) -> Result<Group, GroupStayError> {
        info!("User {} confirming group {}", organizer_id, group_id);
        let lock = self.lock_for(group_id).await;
        let _guard = lock.lock().await;

        let mut group = self.load_group(group_id).await?;
        group.ensure_organizer(organizer_id)?;
        group.ensure_not_finalized()?;

        let roomless: Vec<String> = group
            .roomless_participants()
            .iter()
            .map(|p| p.user_id.to_string())
            .collect();
        if !roomless.is_empty() {
            warn!(
                "Confirm refused for group {}: {} participants without a room",
                group.id,
                roomless.len()
            );
            return Err(GroupStayError::IncompleteSelection(roomless));
        }

        let pending: Vec<Uuid> = group
            .active_participants()
            .filter(|p| !p.is_confirmed())
            .map(|p| p.user_id)
            .collect();
        let timeout = Duration::from_secs(CONFIG.booking_timeout_secs);

        for user_id in pending {
            let Some(participant) = group.participant_for(user_id) else {
                continue;
            };
            let Some(room_id) = participant.room_id else {
                continue;
            };
            let request = BookingRequest {
                room_id,
                user_id,
                check_in: group.check_in,
                check_out: group.check_out,
                num_guests: participant.num_guests,
                special_requests: participant.special_requests.clone(),
            };

            let confirmation =
                match tokio::time::timeout(timeout, self.booking.create_booking_for_user(request))
                    .await
                {
                    Ok(Ok(confirmation)) => confirmation,
                    Ok(Err(e)) => {
                        warn!(
                            "Booking failed for participant {} in group {}: {}",
                            user_id, group.id, e
                        );
                        return Err(GroupStayError::PartialConfirmation(
                            user_id.to_string(),
                            e.to_string(),
                        ));
                    }
                    Err(_) => {
                        warn!(
                            "Booking timed out for participant {} in group {}",
                            user_id, group.id
                        );
                        return Err(GroupStayError::PartialConfirmation(
                            user_id.to_string(),
                            format!("booking call exceeded {}s", timeout.as_secs()),
                        ));
                    }
                };

            if let Some(participant) = group.participant_for_mut(user_id) {
                participant.booking_id = Some(confirmation.booking_id);
                participant.booking_price = Some(confirmation.total_price);
                participant.status = ParticipantStatus::Confirmed;
            }
            // Persist after each booking so partial progress survives a
            // failure or a cancelled request.
            self.storage.save_group(group.clone()).await?;
            debug!(
                "Participant {} confirmed with booking {} in group {}",
                user_id, confirmation.booking_id, group.id
            );
        }

        let total_price: f64 = group
            .active_participants()
            .filter_map(|p| p.booking_price)
            .sum();
        group.mark_confirmed(total_price, Utc::now())?;
        self.storage.save_group(group.clone()).await?;
        info!(
            "Group {} confirmed, total price {:.2}",
            group.id, total_price
        );

        self.publish(
            &group,
            GroupEventType::GroupConfirmed,
            format!("Group confirmed, total price {:.2}", total_price),
        )
        .await;
        self.drop_lock_entry(group_id).await;

        Ok(group)
    }

    pub async fn cancel_group(
        &self,
        group_id: Uuid,
        organizer_id: Uuid,
        reason: &str,
    ) -> Result<Group, GroupStayError> {
        info!(
            "User {} cancelling group {}: {}",
            organizer_id, group_id, reason
        );
        let lock = self.lock_for(group_id).await;
        let _guard = lock.lock().await;

        let mut group = self.load_group(group_id).await?;
        group.ensure_organizer(organizer_id)?;
        group.ensure_not_finalized()?;

        // Best-effort cascade: the group cancellation completes even when a
        // downstream booking cancellation fails.
        for participant in group.active_participants() {
            if let Some(booking_id) = participant.booking_id {
                if let Err(e) = self.booking.cancel_booking(booking_id, reason).await {
                    warn!(
                        "Failed to cancel booking {} for participant {}: {}",
                        booking_id, participant.user_id, e
                    );
                }
            }
        }

        group.mark_cancelled()?;
        self.storage.save_group(group.clone()).await?;

        self.publish(
            &group,
            GroupEventType::GroupCancelled,
            format!("Group cancelled: {}", reason),
        )
        .await;
        self.drop_lock_entry(group_id).await;

        Ok(group)
    }

    pub async fn leave_group(&self, group_id: Uuid, user_id: Uuid) -> Result<Group, GroupStayError> {
        info!("User {} leaving group {}", user_id, group_id);
        let lock = self.lock_for(group_id).await;
        let _guard = lock.lock().await;

        let mut group = self.load_group(group_id).await?;
        group.ensure_open()?;

        let participant = group
            .participant_for(user_id)
            .ok_or_else(|| GroupStayError::NotGroupMember(user_id.to_string()))?;
        if participant.is_organizer {
            warn!("Organizer {} attempted to leave group {}", user_id, group.id);
            return Err(GroupStayError::OrganizerCannotLeave);
        }
        if let Some(booking_id) = participant.booking_id {
            return Err(GroupStayError::ParticipantHasBooking(
                user_id.to_string(),
                booking_id.to_string(),
            ));
        }

        // Dropping the record releases the participant's room for others.
        group
            .participants
            .retain(|p| !(p.user_id == user_id && p.is_active()));
        self.storage.save_group(group.clone()).await?;
        debug!("User {} left group {}", user_id, group.id);

        self.publish(
            &group,
            GroupEventType::ParticipantLeft,
            format!("User {} left the group", user_id),
        )
        .await;

        Ok(group)
    }

    // QUERIES (no group lock; storage reads are internally consistent)

    pub async fn get_group(&self, group_id: Uuid) -> Result<GroupView, GroupStayError> {
        let group = self.load_group(group_id).await?;
        Ok(GroupView::new(group))
    }

    /// Membership-restricted view: non-members are refused.
    pub async fn get_group_for_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<GroupView, GroupStayError> {
        let group = self.load_group(group_id).await?;
        if group.participant_for(user_id).is_none() {
            return Err(GroupStayError::NotGroupMember(user_id.to_string()));
        }
        Ok(GroupView::new(group))
    }

    pub async fn get_group_by_code(&self, code: &str) -> Result<GroupView, GroupStayError> {
        let group = self
            .storage
            .get_group_by_code(code)
            .await?
            .ok_or_else(|| GroupStayError::GroupCodeNotFound(code.to_string()))?;
        Ok(GroupView::new(group))
    }

    pub async fn get_user_groups(&self, user_id: Uuid) -> Result<Vec<Group>, GroupStayError> {
        self.storage.get_user_groups(user_id).await
    }

    // HELPERS

    async fn lock_for(&self, group_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.group_locks.lock().await;
        locks
            .entry(group_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Evicts the per-group lock entry once the group reaches a terminal
    /// state. Late tasks still holding a cloned `Arc` re-read the group under
    /// their guard and bail out on the terminal status, so dropping the
    /// registry entry is safe.
    async fn drop_lock_entry(&self, group_id: Uuid) {
        self.group_locks.lock().await.remove(&group_id);
    }

    #[cfg(test)]
    pub(crate) async fn group_lock_count(&self) -> usize {
        self.group_locks.lock().await.len()
    }

    async fn load_group(&self, group_id: Uuid) -> Result<Group, GroupStayError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| GroupStayError::GroupNotFound(group_id.to_string()))
    }

    async fn publish(&self, group: &Group, event_type: GroupEventType, message: String) {
        let event = GroupEvent::from_group(group, event_type, message);
        if let Err(e) = self.notifier.publish(&group.code, event).await {
            warn!("Failed to publish event for group {}: {}", group.id, e);
        }
    }

    async fn generate_group_code(&self) -> Result<String, GroupStayError> {
        loop {
            let code = Uuid::new_v4().simple().to_string()[..GROUP_CODE_LEN].to_uppercase();
            if self.storage.get_group_by_code(&code).await?.is_none() {
                debug!("Generated group code {}", code);
                return Ok(code);
            }
        }
    }

    fn validate_string_input(
        &self,
        field: &str,
        value: &str,
        max_length: usize,
    ) -> Result<(), GroupStayError> {
        if value.trim().is_empty() {
            return Err(GroupStayError::InvalidInput(
                field.to_string(),
                "cannot be empty".to_string(),
            ));
        }
        if value.len() > max_length {
            return Err(GroupStayError::InvalidInput(
                field.to_string(),
                format!("cannot exceed {} characters", max_length),
            ));
        }
        Ok(())
    }
}
