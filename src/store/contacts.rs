use std::collections::HashMap;
use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GuildId, UserId};
use tracing::{info, warn};

use super::ContactSource;
use crate::constants::MEMBER_PAGE_SIZE;
use crate::database::Database;
use crate::engine::BirthdayRecord;

/// Contact-backed birthdays: members of one server who registered their birthday
pub struct GuildContacts {
    http: Arc<serenity::Http>,
    db: Database,
    guild_id: GuildId,
}

impl GuildContacts {
    pub fn new(http: Arc<serenity::Http>, db: Database, guild_id: GuildId) -> Self {
        Self { http, db, guild_id }
    }

    /// Display names of every current member, paging through the member list
    async fn member_names(&self) -> Result<HashMap<UserId, String>, serenity::Error> {
        let mut names = HashMap::new();
        let mut after: Option<UserId> = None;

        loop {
            let page = self
                .guild_id
                .members(&self.http, Some(MEMBER_PAGE_SIZE), after)
                .await?;
            let page_len = page.len() as u64;
            after = page.last().map(|member| member.user.id);

            for member in page {
                names.insert(member.user.id, member.display_name().to_string());
            }

            if page_len < MEMBER_PAGE_SIZE || after.is_none() {
                break;
            }
        }

        Ok(names)
    }
}

impl ContactSource for GuildContacts {
    async fn fetch_birthdays(&self) -> Vec<BirthdayRecord> {
        let birthdays = match self.db.get_all_birthdays().await {
            Ok(birthdays) => birthdays,
            Err(e) => {
                warn!(
                    "Failed to load member birthdays for guild {}: {}",
                    self.guild_id, e
                );
                return Vec::new();
            }
        };

        if birthdays.is_empty() {
            return Vec::new();
        }

        let names = match self.member_names().await {
            Ok(names) => names,
            Err(e) => {
                warn!("Failed to list members of guild {}: {}", self.guild_id, e);
                return Vec::new();
            }
        };

        let records: Vec<BirthdayRecord> = birthdays
            .into_iter()
            .filter_map(|(user_id, month, day, year)| {
                names.get(&user_id).map(|name| {
                    BirthdayRecord::contact(user_id.get(), name.clone(), month, day, year)
                })
            })
            .collect();

        info!(
            "Loaded {} member birthday(s) for guild {}",
            records.len(),
            self.guild_id
        );
        records
    }
}
