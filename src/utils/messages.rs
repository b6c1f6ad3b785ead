/// Pure functions for formatting error and success messages (Discord-agnostic)
use crate::constants::MAX_MESSAGE_LENGTH;

/// Format a validation error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format a success message with emoji
pub fn format_success(message: &str) -> String {
    format!("✅ {}", message)
}

/// Format an info message with emoji
pub fn format_info(message: &str) -> String {
    format!("ℹ️ {}", message)
}

/// Build a database error message (generic, doesn't expose internals)
pub fn build_database_error() -> String {
    format_error("A database error occurred. Please try again later.")
}

/// Build a success message for deleting data
pub fn build_delete_success(item_type: &str) -> String {
    format_success(&format!("{} deleted successfully!", item_type))
}

/// Build an error for a manual birthday id that doesn't exist
pub fn build_unknown_entry_error(id: i64) -> String {
    format_error(&format!(
        "No manual birthday with id `{}` in this server. Use `/birthday_search` to find ids.",
        id
    ))
}

/// Truncate a long message with ellipsis
pub fn truncate_message(message: &str, max_length: usize) -> String {
    if message.chars().count() <= max_length {
        message.to_string()
    } else if max_length < 3 {
        message.chars().take(max_length).collect()
    } else {
        let truncated: String = message.chars().take(max_length - 3).collect();
        format!("{}...", truncated)
    }
}

/// Clamp a reply to the Discord message size limit
pub fn fit_message(message: &str) -> String {
    truncate_message(message, MAX_MESSAGE_LENGTH)
}
