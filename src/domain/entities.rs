pub mod card;
pub mod live_counter;
pub mod project;
pub mod upload_draft;
pub mod waitlist;
