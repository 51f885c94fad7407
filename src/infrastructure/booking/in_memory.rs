use crate::core::errors::GroupStayError;
use crate::infrastructure::booking::{BookingClient, BookingConfirmation, BookingRequest};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;
use uuid::Uuid;

const DEFAULT_NIGHTLY_RATE: f64 = 100.0;

#[derive(Clone, Debug)]
pub struct StoredBooking {
    pub id: Uuid,
    pub request: BookingRequest,
    pub total_price: f64,
    pub cancelled: bool,
}

/// In-memory stand-in for the individual booking subsystem. Prices a stay at
/// the seeded nightly rate times the night count. Failures can be scripted
/// per user so orchestration error paths are reachable from tests.
pub struct InMemoryBookingEngine {
    rates: Mutex<HashMap<Uuid, f64>>, // room_id -> nightly rate
    bookings: Mutex<HashMap<Uuid, StoredBooking>>,
    fail_create_for: Mutex<HashSet<Uuid>>, // user ids whose next create fails
    fail_cancel_for: Mutex<HashSet<Uuid>>, // booking ids whose cancel fails
    hang_create_for: Mutex<HashSet<Uuid>>, // user ids whose create never resolves
}

impl InMemoryBookingEngine {
    pub fn new() -> Self {
        InMemoryBookingEngine {
            rates: Mutex::new(HashMap::new()),
            bookings: Mutex::new(HashMap::new()),
            fail_create_for: Mutex::new(HashSet::new()),
            fail_cancel_for: Mutex::new(HashSet::new()),
            hang_create_for: Mutex::new(HashSet::new()),
        }
    }

    pub async fn set_room_rate(&self, room_id: Uuid, nightly_rate: f64) {
        self.rates.lock().await.insert(room_id, nightly_rate);
    }

    /// Make every booking attempt for this user fail until cleared.
    pub async fn fail_create_for_user(&self, user_id: Uuid) {
        self.fail_create_for.lock().await.insert(user_id);
    }

    pub async fn clear_create_failure(&self, user_id: Uuid) {
        self.fail_create_for.lock().await.remove(&user_id);
    }

    /// Make every booking attempt for this user block forever, standing in
    /// for an unresponsive downstream.
    pub async fn hang_create_for_user(&self, user_id: Uuid) {
        self.hang_create_for.lock().await.insert(user_id);
    }

    pub async fn fail_cancellation_of(&self, booking_id: Uuid) {
        self.fail_cancel_for.lock().await.insert(booking_id);
    }

    pub async fn booking_count(&self) -> usize {
        self.bookings.lock().await.len()
    }

    pub async fn get_booking(&self, booking_id: Uuid) -> Option<StoredBooking> {
        self.bookings.lock().await.get(&booking_id).cloned()
    }

    pub async fn bookings_for_user(&self, user_id: Uuid) -> Vec<StoredBooking> {
        self.bookings
            .lock()
            .await
            .values()
            .filter(|b| b.request.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryBookingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingClient for InMemoryBookingEngine {
    async fn create_booking_for_user(
        &self,
        request: BookingRequest,
    ) -> Result<BookingConfirmation, GroupStayError> {
        if self.hang_create_for.lock().await.contains(&request.user_id) {
            std::future::pending::<()>().await;
        }
        if self.fail_create_for.lock().await.contains(&request.user_id) {
            return Err(GroupStayError::BookingFailed(format!(
                "booking rejected for user {}",
                request.user_id
            )));
        }

        let nights = (request.check_out - request.check_in).num_days().max(1) as f64;
        let rate = self
            .rates
            .lock()
            .await
            .get(&request.room_id)
            .copied()
            .unwrap_or(DEFAULT_NIGHTLY_RATE);

        let booking = StoredBooking {
            id: Uuid::new_v4(),
            request,
            total_price: rate * nights,
            cancelled: false,
        };
        let confirmation = BookingConfirmation {
            booking_id: booking.id,
            total_price: booking.total_price,
        };
        self.bookings.lock().await.insert(booking.id, booking);
        Ok(confirmation)
    }

    async fn cancel_booking(&self, booking_id: Uuid, _reason: &str) -> Result<(), GroupStayError> {
        if self.fail_cancel_for.lock().await.contains(&booking_id) {
            return Err(GroupStayError::BookingFailed(format!(
                "cancellation rejected for booking {}",
                booking_id
            )));
        }
        let mut bookings = self.bookings.lock().await;
        match bookings.get_mut(&booking_id) {
            Some(booking) => {
                booking.cancelled = true;
                Ok(())
            }
            None => Err(GroupStayError::BookingFailed(format!(
                "booking {} not found",
                booking_id
            ))),
        }
    }
}
