/// Validated writes for manual entries and members' own birthdays
use poise::serenity_prelude::UserId;

use super::ServiceResult;
use crate::database::Database;
use crate::store::{ManualBirthday, ManualBirthdayDraft, ManualStore};
use crate::utils::validation::{validate_birthday, validate_name, ValidBirthday};

/// Raw command input for a manual birthday
#[derive(Debug, Clone)]
pub struct EntryInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub month: i32,
    pub day: i32,
    pub year: Option<i32>,
}

impl EntryInput<'_> {
    fn validate(&self, current_year: i32) -> ServiceResult<ManualBirthdayDraft> {
        let (first_name, last_name) = validate_name(self.first_name, self.last_name)?;
        let birthday = validate_birthday(self.month, self.day, self.year, current_year)?;

        Ok(ManualBirthdayDraft {
            first_name,
            last_name,
            month: birthday.month,
            day: birthday.day,
            year: birthday.year,
        })
    }
}

/// Service for manually entered birthdays
pub struct EntryService<'a, M> {
    store: &'a M,
}

impl<'a, M> EntryService<'a, M>
where
    M: ManualStore + Sync,
{
    pub fn new(store: &'a M) -> Self {
        Self { store }
    }

    /// Validate and add a new entry
    pub async fn add(&self, input: EntryInput<'_>, current_year: i32) -> ServiceResult<ManualBirthday> {
        let draft = input.validate(current_year)?;
        Ok(self.store.add(draft).await?)
    }

    /// Validate and overwrite entry `id`, `None` when it doesn't exist
    pub async fn edit(
        &self,
        id: i64,
        input: EntryInput<'_>,
        current_year: i32,
    ) -> ServiceResult<Option<ManualBirthday>> {
        let item = input.validate(current_year)?.with_id(id);
        if self.store.update(&item).await? {
            Ok(Some(item))
        } else {
            Ok(None)
        }
    }

    pub async fn remove(&self, id: i64) -> ServiceResult<bool> {
        Ok(self.store.remove(id).await?)
    }
}

/// Service for members registering their own birthday
pub struct MemberService<'a> {
    db: &'a Database,
}

impl<'a> MemberService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Validate and save a member's birthday
    pub async fn save_member_birthday(
        &self,
        user_id: UserId,
        month: i32,
        day: i32,
        year: Option<i32>,
        current_year: i32,
    ) -> ServiceResult<ValidBirthday> {
        let birthday = validate_birthday(month, day, year, current_year)?;

        self.db
            .upsert_birthday(user_id, birthday.month, birthday.day, birthday.year)
            .await?;

        Ok(birthday)
    }

    /// Returns whether a birthday was stored
    pub async fn forget_member_birthday(&self, user_id: UserId) -> ServiceResult<bool> {
        Ok(self.db.remove_birthday(user_id).await?)
    }
}
