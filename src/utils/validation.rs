use poise::serenity_prelude::GuildId;

use crate::constants::MIN_BIRTH_YEAR;
use crate::utils::datetime::{date_exists, is_valid_date};
use crate::utils::string_utils::{is_empty_or_whitespace, normalize_whitespace};

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NotInGuild,
    InvalidMonth(i32),
    InvalidDay { month: i32, day: i32 },
    DateDoesNotExist { year: i32, month: i32, day: i32 },
    InvalidYear { year: i32, current_year: i32 },
    EmptyName,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NotInGuild => write!(f, "This command must be used in a server"),
            ValidationError::InvalidMonth(month) => {
                write!(f, "Month must be between 1 and 12, got {}", month)
            }
            ValidationError::InvalidDay { month, day } => {
                write!(f, "Day {} is not valid for month {}", day, month)
            }
            ValidationError::DateDoesNotExist { year, month, day } => {
                write!(f, "{:04}-{:02}-{:02} is not a real date", year, month, day)
            }
            ValidationError::InvalidYear { year, current_year } => write!(
                f,
                "Birth year must be between {} and {}, got {}",
                MIN_BIRTH_YEAR, current_year, year
            ),
            ValidationError::EmptyName => write!(f, "A first name is required"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A birthday that passed boundary validation and is safe to hand to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidBirthday {
    pub month: u32,
    pub day: u32,
    pub year: Option<i32>,
}

/// Extract guild ID from context, returning error if not in a guild
pub fn require_guild(guild_id: Option<GuildId>) -> Result<GuildId, ValidationError> {
    guild_id.ok_or(ValidationError::NotInGuild)
}

/// Validate a month/day with an optional birth year
///
/// Feb 29 is accepted without a year; with a year, the date must exist.
pub fn validate_birthday(
    month: i32,
    day: i32,
    year: Option<i32>,
    current_year: i32,
) -> Result<ValidBirthday, ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth(month));
    }

    if !is_valid_date(month, day) {
        return Err(ValidationError::InvalidDay { month, day });
    }

    if let Some(year) = year {
        if !(MIN_BIRTH_YEAR..=current_year).contains(&year) {
            return Err(ValidationError::InvalidYear { year, current_year });
        }
        if !date_exists(year, month, day) {
            return Err(ValidationError::DateDoesNotExist { year, month, day });
        }
    }

    Ok(ValidBirthday {
        month: month as u32,
        day: day as u32,
        year,
    })
}

/// Validate a person's name, returning the normalized first and last name
pub fn validate_name(first_name: &str, last_name: &str) -> Result<(String, String), ValidationError> {
    if is_empty_or_whitespace(first_name) {
        return Err(ValidationError::EmptyName);
    }

    Ok((normalize_whitespace(first_name), normalize_whitespace(last_name)))
}
