/// Pure functions that render engine output as chat messages (Discord-agnostic)
use chrono::{Datelike, NaiveDate};

use crate::engine::{
    age_turning, bucket, days_until, next_occurrence, next_up, split_upcoming_by_year,
    BirthdayRecord, NextUp, Origin,
};
use crate::utils::datetime::{
    countdown_string, format_month_day, format_weekday_month_day, get_month_name, zodiac_sign,
};
use crate::utils::string_utils::{is_empty_or_whitespace, process_newlines, summarize_names};

/// Format age information string
pub fn format_age_info(age: Option<i32>) -> String {
    age.map(|age| format!(" (turning {})", age))
        .unwrap_or_default()
}

/// Short handle shown next to manual entries so they can be edited or removed
fn entry_handle(record: &BirthdayRecord) -> Option<String> {
    record.id.manual_id().map(|id| format!("`#{}`", id))
}

/// One list row: name, date, countdown, age and handle
pub fn format_birthday_row(record: &BirthdayRecord, today: NaiveDate) -> String {
    let mut parts = vec![
        format_month_day(record.month, record.day),
        countdown_string(days_until(record.month, record.day, today)),
    ];

    if let Some(age) = age_turning(record.year, record.month, record.day, today) {
        parts.push(format!("turns {}", age));
    }
    if let Some(handle) = entry_handle(record) {
        parts.push(handle);
    }

    format!("• **{}** — {}", record.full_name, parts.join(" · "))
}

fn build_section(title: &str, records: &[&BirthdayRecord], today: NaiveDate) -> String {
    let rows: Vec<String> = records
        .iter()
        .map(|record| format_birthday_row(record, today))
        .collect();
    format!("**{}**\n{}", title, rows.join("\n"))
}

/// Countdown card for the soonest birthday
pub fn build_next_up_card(next: &NextUp, current_year: i32) -> String {
    let when = next
        .date()
        .map(|date| format_weekday_month_day(date, current_year))
        .unwrap_or_else(|| format_month_day(next.month, next.day));

    format!(
        "⏳ **Next up** · {}\n**{}** — {}",
        countdown_string(next.days),
        summarize_names(&next.names),
        when
    )
}

/// Banner shown above today's birthdays
pub fn build_today_banner(count: usize) -> String {
    let noun = if count == 1 { "birthday" } else { "birthdays" };
    format!(
        "🎉 **TODAY** · {} {}\nDon't forget to send a message!",
        count, noun
    )
}

/// Full overview: Today, This week, Coming up and Next year
pub fn build_overview(records: &[BirthdayRecord], today: NaiveDate) -> String {
    if records.is_empty() {
        return "No birthdays yet. Add one with `/birthday_add` or register yours with `/set_my_birthday`."
            .to_string();
    }

    let buckets = bucket(records, today);
    let mut sections = Vec::new();

    if buckets.today.is_empty() {
        match next_up(records, today) {
            Some(next) => sections.push(build_next_up_card(&next, today.year())),
            None => sections.push("No birthdays today :(".to_string()),
        }
    } else {
        sections.push(format!(
            "{}\n{}",
            build_today_banner(buckets.today.len()),
            build_section("Today", &buckets.today, today)
        ));
    }

    if !buckets.week.is_empty() {
        sections.push(build_section("This week", &buckets.week, today));
    }

    let split = split_upcoming_by_year(&buckets.upcoming, today);
    if !split.this_year.is_empty() {
        sections.push(build_section("Coming up", &split.this_year, today));
    }
    if !split.next_year.is_empty() {
        let title = (today.year() + 1).to_string();
        sections.push(build_section(&title, &split.next_year, today));
    }

    sections.join("\n\n")
}

/// Search results, soonest first
pub fn build_search_results(query: &str, matches: &[&BirthdayRecord], today: NaiveDate) -> String {
    if matches.is_empty() {
        return format!("No birthdays matching \"{}\".", query);
    }

    let title = format!("Results for \"{}\"", query);
    build_section(&title, matches, today)
}

/// One month of the calendar, one line per day with birthdays
pub fn build_month_calendar(month: u32, entries: &[(u32, Vec<String>)]) -> String {
    let title = format!("📅 **{}**", get_month_name(month));
    if entries.is_empty() {
        return format!("{}\nNo birthdays this month.", title);
    }

    let lines: Vec<String> = entries
        .iter()
        .map(|(day, names)| format!("`{:>2}` {}", day, names.join(", ")))
        .collect();
    format!("{}\n{}", title, lines.join("\n"))
}

/// Everyone stored under one calendar day
pub fn build_day_listing(month: u32, day: u32, matches: &[&BirthdayRecord], today: NaiveDate) -> String {
    let title = format!("📅 {}", format_month_day(month, day));
    if matches.is_empty() {
        return format!("**{}**\nNo birthdays on this day.", title);
    }

    build_section(&title, matches, today)
}

/// Detail card for one person, including their note
pub fn build_person_detail(record: &BirthdayRecord, today: NaiveDate, note: &str) -> String {
    let next = next_occurrence(record.month, record.day, today);
    let days = days_until(record.month, record.day, today);

    let born = match record.year {
        Some(year) => format!("{} {}", format_month_day(record.month, record.day), year),
        None => format_month_day(record.month, record.day),
    };

    let mut lines = vec![
        format!("🎂 **{}**", record.full_name),
        format!("Birthday: {}", born),
        format!(
            "Next: {} ({})",
            format_weekday_month_day(next, today.year()),
            countdown_string(days)
        ),
    ];

    if let Some(age) = age_turning(record.year, record.month, record.day, today) {
        lines.push(format!("Turning: {}", age));
    }
    lines.push(format!("Zodiac: {}", zodiac_sign(record.month, record.day)));

    let source = match record.origin {
        Origin::Contact => "Server member".to_string(),
        Origin::Manual => format!(
            "Added manually {}",
            entry_handle(record).unwrap_or_default()
        ),
    };
    lines.push(format!("Source: {}", source.trim_end()));

    if !is_empty_or_whitespace(note) {
        lines.push(format!("📝 {}", note.trim()));
    }

    lines.join("\n")
}

/// Build a combined message from parts
pub fn build_combined_message(header: &str, body: &str, footer: &str) -> String {
    format!("{}\n{}\n{}", header, body, footer)
}

/// Build default header for the daily digest
pub fn build_default_header() -> String {
    "🎉 **Happy Birthday** 🎉\n\nToday we celebrate:".to_string()
}

/// Build default footer for the daily digest
pub fn build_default_footer() -> String {
    "\nEveryone wish them a happy birthday! 🎂🎈".to_string()
}

/// Process custom text by converting literal \n to actual newlines
pub fn process_custom_text(text: &Option<String>) -> Option<String> {
    text.as_deref().map(process_newlines)
}

/// Daily digest for today's birthdays, with an optional next-up line
pub fn build_digest_message(
    todays: &[&BirthdayRecord],
    next: Option<&NextUp>,
    today: NaiveDate,
    custom_header: &Option<String>,
    custom_footer: &Option<String>,
) -> String {
    let header = process_custom_text(custom_header).unwrap_or_else(build_default_header);
    let footer = process_custom_text(custom_footer).unwrap_or_else(build_default_footer);

    let entries: Vec<String> = todays
        .iter()
        .map(|record| {
            let age = age_turning(record.year, record.month, record.day, today);
            format!("• **{}**{}!", record.full_name, format_age_info(age))
        })
        .collect();

    let mut message = build_combined_message(&header, &entries.join("\n"), &footer);

    if let Some(next) = next {
        message.push_str(&format!(
            "\n\nComing up: **{}** {}",
            summarize_names(&next.names),
            countdown_string(next.days)
        ));
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 3, 10)
    }

    #[test]
    fn test_format_age_info() {
        assert_eq!(format_age_info(Some(25)), " (turning 25)");
        assert_eq!(format_age_info(None), "");
    }

    #[test]
    fn test_format_birthday_row_manual_with_year() {
        let record = BirthdayRecord::manual(3, "Ana", 3, 10, Some(1990));
        assert_eq!(
            format_birthday_row(&record, today()),
            "• **Ana** — Mar 10 · Today 🎉 · turns 35 · `#3`"
        );
    }

    #[test]
    fn test_format_birthday_row_member_without_year() {
        let record = BirthdayRecord::contact(9, "Ben", 3, 15, None);
        assert_eq!(format_birthday_row(&record, today()), "• **Ben** — Mar 15 · in 5 days");
    }

    #[test]
    fn test_build_overview_sections() {
        let records = vec![
            BirthdayRecord::manual(1, "Ana", 3, 10, Some(1990)),
            BirthdayRecord::manual(2, "Ben", 3, 15, None),
            BirthdayRecord::manual(3, "Cleo", 1, 1, None),
            BirthdayRecord::manual(4, "Dee", 6, 1, None),
        ];
        let overview = build_overview(&records, today());

        assert!(overview.starts_with("🎉 **TODAY** · 1 birthday"));
        let week = overview.find("**This week**").unwrap();
        let coming = overview.find("**Coming up**").unwrap();
        let next_year = overview.find("**2026**").unwrap();
        assert!(week < coming && coming < next_year);
        assert!(overview.contains("**Cleo**"));
    }

    #[test]
    fn test_build_overview_shows_next_up_when_nothing_today() {
        let records = vec![
            BirthdayRecord::manual(1, "Dee", 3, 20, None),
            BirthdayRecord::manual(2, "Ada", 3, 20, None),
        ];
        let overview = build_overview(&records, today());

        assert!(overview.starts_with("⏳ **Next up** · in 10 days\n**Ada & 1 more** — Thu, Mar 20"));
        assert!(!overview.contains("TODAY"));
    }

    #[test]
    fn test_build_day_listing() {
        let ana = BirthdayRecord::manual(1, "Ana", 3, 15, None);
        assert_eq!(
            build_day_listing(3, 15, &[&ana], today()),
            "**📅 Mar 15**\n• **Ana** — Mar 15 · in 5 days · `#1`"
        );
        assert_eq!(
            build_day_listing(2, 29, &[], today()),
            "**📅 Feb 29**\nNo birthdays on this day."
        );
    }

    #[test]
    fn test_build_overview_empty() {
        assert!(build_overview(&[], today()).contains("/birthday_add"));
    }

    #[test]
    fn test_build_next_up_card_next_year() {
        let next = NextUp {
            days: 297,
            month: 1,
            day: 1,
            year: 2026,
            names: vec!["Cleo".to_string()],
        };
        assert_eq!(
            build_next_up_card(&next, 2025),
            "⏳ **Next up** · in 297 days\n**Cleo** — Thu, Jan 1 2026"
        );
    }

    #[test]
    fn test_build_today_banner_plural() {
        assert!(build_today_banner(2).contains("2 birthdays"));
        assert!(build_today_banner(1).contains("1 birthday\n"));
    }

    #[test]
    fn test_build_search_results() {
        let ana = BirthdayRecord::manual(1, "Ana", 3, 10, None);
        let results = build_search_results("an", &[&ana], today());

        assert!(results.starts_with("**Results for \"an\"**"));
        assert!(results.contains("**Ana**"));
        assert_eq!(build_search_results("zz", &[], today()), "No birthdays matching \"zz\".");
    }

    #[test]
    fn test_build_month_calendar() {
        let entries = vec![
            (2, vec!["Carl".to_string()]),
            (10, vec!["Ana".to_string(), "Mia".to_string()]),
        ];
        assert_eq!(
            build_month_calendar(3, &entries),
            "📅 **March**\n` 2` Carl\n`10` Ana, Mia"
        );
        assert_eq!(build_month_calendar(8, &[]), "📅 **August**\nNo birthdays this month.");
    }

    #[test]
    fn test_build_person_detail() {
        let record = BirthdayRecord::manual(4, "Ana", 3, 21, Some(1990));
        let detail = build_person_detail(&record, today(), "  Likes tulips ");

        assert!(detail.starts_with("🎂 **Ana**"));
        assert!(detail.contains("Birthday: Mar 21 1990"));
        assert!(detail.contains("Next: Fri, Mar 21 (in 11 days)"));
        assert!(detail.contains("Turning: 35"));
        assert!(detail.contains("Zodiac: ♈ Aries"));
        assert!(detail.contains("Source: Added manually `#4`"));
        assert!(detail.ends_with("📝 Likes tulips"));
    }

    #[test]
    fn test_build_person_detail_member_without_note() {
        let record = BirthdayRecord::contact(4, "Ben", 3, 15, None);
        let detail = build_person_detail(&record, today(), "");

        assert!(detail.contains("Source: Server member"));
        assert!(!detail.contains("Turning"));
        assert!(!detail.contains("📝"));
    }

    #[test]
    fn test_build_digest_message_default() {
        let ana = BirthdayRecord::manual(1, "Ana", 3, 10, Some(1990));
        let ben = BirthdayRecord::contact(2, "Ben", 3, 10, None);
        let next = NextUp {
            days: 5,
            month: 3,
            day: 15,
            year: 2025,
            names: vec!["Eve".to_string()],
        };
        let message = build_digest_message(&[&ana, &ben], Some(&next), today(), &None, &None);

        assert!(message.starts_with("🎉 **Happy Birthday** 🎉"));
        assert!(message.contains("• **Ana** (turning 35)!\n• **Ben**!"));
        assert!(message.ends_with("Coming up: **Eve** in 5 days"));
    }

    #[test]
    fn test_build_digest_message_custom_text() {
        let ana = BirthdayRecord::manual(1, "Ana", 3, 10, None);
        let message = build_digest_message(
            &[&ana],
            None,
            today(),
            &Some("Party time!\\nToday:".to_string()),
            &Some("Bye".to_string()),
        );
        assert_eq!(message, "Party time!\nToday:\n• **Ana**!\nBye");
    }

    #[test]
    fn test_process_custom_text() {
        assert_eq!(
            process_custom_text(&Some("Line 1\\nLine 2".to_string())),
            Some("Line 1\nLine 2".to_string())
        );
        assert_eq!(process_custom_text(&None), None);
    }
}
