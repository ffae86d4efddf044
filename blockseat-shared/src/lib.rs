pub mod duration;
pub mod models;
pub mod pii;
pub mod time;

pub use duration::calculate_duration;
pub use models::envelope::{ApiEnvelope, BookingsPage};
pub use pii::Masked;
pub use time::TimePoint;
