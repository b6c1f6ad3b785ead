/// Pure string processing utilities (Discord-agnostic)

/// Replace literal \n with actual newlines
pub fn process_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Trim and normalize whitespace in a string
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check if a string is empty after trimming
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

/// Display name built from a first and last name
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
        .trim()
        .to_string()
}

/// First name followed by "& N more" when several people share a date
pub fn summarize_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, rest @ ..] => format!("{} & {} more", first, rest.len()),
    }
}
