use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const CONTACT_STATUS_NEW: &str = "new";
pub const TOP_TECHNOLOGIES_DEFAULT: usize = 8;
