use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const PROJECTS_TABLE: &str = "projects";
pub const ORDER_COLUMN: &str = "created_at";

pub const COUNTER_SEED: i64 = 243;
pub const COUNTER_TICK: Duration = Duration::from_millis(3500);

pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const FALLBACK_IMAGE_URL: &str = "https://via.placeholder.com/800";
pub const STOCK_IMAGE_BASE: &str = "https://source.unsplash.com/random/800x600/";
pub const STOCK_IMAGE_TOPICS: &str = "data,technology";

pub const SUBMIT_SUCCESS_MESSAGE: &str =
    "Project Submitted for Verification! It will appear once approved.";
pub const WAITLIST_PROMPT: &str = "We are launching payments next week! \
    Enter your work email to get 1 Free Credit when we go live:";
