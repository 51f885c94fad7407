mod confirm_tests;

use crate::core::models::{Hotel, Room};
use crate::core::services::{CreateGroupInput, GroupStayService};
use crate::infrastructure::booking::in_memory::InMemoryBookingEngine;
use crate::infrastructure::notify::in_memory::InMemoryNotifier;
use crate::infrastructure::storage::Storage;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use chrono::{Days, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub type TestService = GroupStayService<InMemoryStorage, InMemoryBookingEngine, InMemoryNotifier>;

pub struct TestContext {
    pub service: Arc<TestService>,
    pub hotel_id: Uuid,
    /// Rooms 101/201/202 of the seeded hotel: capacity 2, rates 100/150/200.
    pub rooms: [Uuid; 3],
    /// A room belonging to a different hotel.
    pub foreign_room: Uuid,
}

impl TestContext {
    /// Two-night stay a month out, shared by most tests.
    pub fn stay(&self) -> (NaiveDate, NaiveDate) {
        let check_in = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(30))
            .unwrap();
        let check_out = check_in.checked_add_days(Days::new(2)).unwrap();
        (check_in, check_out)
    }

    pub fn group_input(&self, max_participants: u32) -> CreateGroupInput {
        let (check_in, check_out) = self.stay();
        CreateGroupInput {
            hotel_id: self.hotel_id,
            name: "Team offsite".to_string(),
            check_in,
            check_out,
            max_participants,
            join_deadline: None,
            notes: None,
        }
    }
}

pub async fn create_test_service() -> TestContext {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let storage = InMemoryStorage::new();
    let booking = InMemoryBookingEngine::new();
    let notifier = InMemoryNotifier::new();

    let hotel = Hotel {
        id: Uuid::new_v4(),
        name: "Test Hotel".to_string(),
        city: "Porto".to_string(),
    };
    storage.save_hotel(hotel.clone()).await.unwrap();

    let mut rooms = [Uuid::nil(); 3];
    for (i, (number, rate)) in [("101", 100.0), ("201", 150.0), ("202", 200.0)]
        .into_iter()
        .enumerate()
    {
        let room = Room {
            id: Uuid::new_v4(),
            hotel_id: hotel.id,
            number: number.to_string(),
            capacity: 2,
            nightly_rate: rate,
        };
        booking.set_room_rate(room.id, rate).await;
        storage.save_room(room.clone()).await.unwrap();
        rooms[i] = room.id;
    }

    let other_hotel = Hotel {
        id: Uuid::new_v4(),
        name: "Other Hotel".to_string(),
        city: "Faro".to_string(),
    };
    storage.save_hotel(other_hotel.clone()).await.unwrap();
    let foreign_room = Room {
        id: Uuid::new_v4(),
        hotel_id: other_hotel.id,
        number: "901".to_string(),
        capacity: 2,
        nightly_rate: 80.0,
    };
    storage.save_room(foreign_room.clone()).await.unwrap();

    TestContext {
        service: Arc::new(GroupStayService::new(storage, booking, notifier)),
        hotel_id: hotel.id,
        rooms,
        foreign_room: foreign_room.id,
    }
}
