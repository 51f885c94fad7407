pub mod event;
pub mod group;
pub mod hotel;
pub mod participant;

pub use event::{GroupEvent, GroupEventType};
pub use group::{Group, GroupStatus};
pub use hotel::{Hotel, Room};
pub use participant::{Participant, ParticipantStatus};
