/// Schedule management modules
mod digest_tasks;
mod manager;
mod types;

// Re-export public types and functions
pub use manager::start_schedule_manager;
pub use types::{Schedule, ScheduleType};
