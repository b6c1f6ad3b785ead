// Command modules
mod birthdays;
mod digest;
mod manual;
mod member;
mod notes;
mod timezone;

// Re-export all commands
pub use birthdays::{birthday_calendar, birthday_info, birthday_next, birthday_search, birthdays};
pub use digest::{disable_digest, setup_digest};
pub use manual::{birthday_add, birthday_edit, birthday_remove};
pub use member::{forget_my_birthday, set_my_birthday};
pub use notes::birthday_note;
pub use timezone::setup_timezone;
