pub mod ids;
pub mod time;

pub use ids::new_user_id;
pub use self::time::{now_timestamp, today_utc};
