/// Birthdays within this many days (after today) are listed under "This week"
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Maximum length of a Discord message body
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Earliest birth year accepted from users
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Page size used when listing guild members
pub const MEMBER_PAGE_SIZE: u64 = 1000;

/// Default local time for the daily digest
pub const DEFAULT_DIGEST_TIME: &str = "08:00";

/// Timezone used when a server has not configured one
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "birthday_rs=info";
