/// Pure functions building the texts the bot sends (Discord-agnostic)
use crate::constants::DATE_FORMAT_HINT;
use crate::models::BirthdayEntry;
use crate::utils::datetime::format_birth_date;

/// Format a validation error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format a success message with emoji
pub fn format_success(message: &str) -> String {
    format!("✅ {}", message)
}

pub fn build_welcome_message() -> String {
    "🎉 Birthday Reminder Bot! 🎂\n\n\
     I'll remind this chat about upcoming birthdays.\n\n\
     Commands:\n\
     /add - Add a person\n\
     /list - Show the list\n\
     /remove - Remove a person\n\
     /help - Help\n\n\
     Start by adding people with /add"
        .to_string()
}

pub fn build_help_message() -> String {
    format!(
        "🤖 Birthday Reminder Bot - Help\n\n\
         Commands:\n\
         /add - Add a person (asks for a username and a date)\n\
         /list - Show everyone\n\
         /remove @username - Remove a person\n\
         /help - This help\n\n\
         Date format: {} (for example: 15.12.1990)",
        DATE_FORMAT_HINT
    )
}

pub fn build_identifier_prompt() -> String {
    "Enter the person's username (for example: @username):".to_string()
}

pub fn build_date_prompt(identifier: &str) -> String {
    format!(
        "Now enter the birth date for {} (format: {}):",
        identifier, DATE_FORMAT_HINT
    )
}

/// Confirmation after an entry was stored
pub fn build_added_message(identifier: &str, birth_date: chrono::NaiveDate) -> String {
    format_success(&format!(
        "{} added with birth date {}",
        identifier,
        format_birth_date(birth_date)
    ))
}

pub fn build_date_format_error() -> String {
    format_error(&format!(
        "Invalid date format. Use {}\nTry again: /add",
        DATE_FORMAT_HINT
    ))
}

pub fn build_remove_usage() -> String {
    "Usage: /remove @username".to_string()
}

pub fn build_removed_message(identifier: &str) -> String {
    format_success(&format!("{} removed from the list", identifier))
}

pub fn build_not_found_message(identifier: &str) -> String {
    format_error(&format!("{} not found in the list", identifier))
}

/// Listing of all entries, or the empty-state text
pub fn build_birthday_list(entries: &[BirthdayEntry]) -> String {
    if entries.is_empty() {
        return "📭 The birthday list is empty".to_string();
    }

    let lines = entries
        .iter()
        .map(|entry| format!("{} — {}", entry.identifier, format_birth_date(entry.birth_date)))
        .collect::<Vec<_>>()
        .join("\n");

    format!("🎂 Birthday list:\n\n{}", lines)
}

/// Daily reminder naming everyone whose birthday is tomorrow
pub fn build_reminder_message(entries: &[BirthdayEntry]) -> String {
    let names = entries
        .iter()
        .map(|entry| entry.identifier.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🎂 Tomorrow is the birthday of:\n{}\n\nDon't forget to congratulate them!",
        names
    )
}

pub fn build_command_failed_message() -> String {
    format_error("Something went wrong. Please try again later.")
}

/// Split a message into chunks of at most `max_length` characters
///
/// Chunks break between lines; a single line longer than the limit is cut mid-line.
/// Joining the chunks with newlines restores the lines in order.
pub fn split_message(message: &str, max_length: usize) -> Vec<String> {
    let max_length = max_length.max(1);

    let pieces = message.split('\n').flat_map(|line| {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            vec![String::new()]
        } else {
            chars
                .chunks(max_length)
                .map(|part| part.iter().collect::<String>())
                .collect()
        }
    });

    let mut chunks = Vec::new();
    let mut current: Option<(String, usize)> = None;
    for piece in pieces {
        let piece_len = piece.chars().count();
        match current.as_mut() {
            Some((text, len)) if *len + 1 + piece_len <= max_length => {
                text.push('\n');
                text.push_str(&piece);
                *len += 1 + piece_len;
            }
            _ => {
                if let Some((text, _)) = current.take() {
                    chunks.push(text);
                }
                current = Some((piece, piece_len));
            }
        }
    }
    if let Some((text, _)) = current {
        chunks.push(text);
    }

    chunks.retain(|chunk| !chunk.trim().is_empty());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_MESSAGE_LENGTH;
    use chrono::NaiveDate;

    fn entry(identifier: &str, day: u32, month: u32, year: i32) -> BirthdayEntry {
        BirthdayEntry {
            id: 1,
            identifier: identifier.to_string(),
            birth_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_format_error_and_success() {
        assert_eq!(format_error("Oops"), "❌ Oops");
        assert_eq!(format_success("Done"), "✅ Done");
    }

    #[test]
    fn test_birthday_list_empty() {
        assert_eq!(build_birthday_list(&[]), "📭 The birthday list is empty");
    }

    #[test]
    fn test_birthday_list_lines() {
        let list = build_birthday_list(&[entry("@alice", 15, 12, 1990), entry("@bob", 5, 3, 1995)]);
        assert_eq!(
            list,
            "🎂 Birthday list:\n\n@alice — 15.12.1990\n@bob — 05.03.1995"
        );
    }

    #[test]
    fn test_reminder_message_lists_everyone() {
        let message = build_reminder_message(&[entry("@alice", 16, 3, 1990), entry("@bob", 16, 3, 2001)]);
        assert!(message.contains("@alice\n@bob"));
        assert!(message.starts_with("🎂 Tomorrow"));
    }

    #[test]
    fn test_added_message_echoes_display_date() {
        let date = NaiveDate::from_ymd_opt(1995, 3, 5).unwrap();
        assert_eq!(
            build_added_message("@bob", date),
            "✅ @bob added with birth date 05.03.1995"
        );
    }

    #[test]
    fn test_split_message_short_text_is_one_chunk() {
        assert_eq!(split_message("🎂 Birthday list:\n\n@alice", 2000), ["🎂 Birthday list:\n\n@alice"]);
    }

    #[test]
    fn test_split_long_birthday_list() {
        let entries: Vec<_> = (0..300)
            .map(|n| entry(&format!("@member_number_{}", n), 1 + n % 28, 1 + n % 12, 1990))
            .collect();
        let list = build_birthday_list(&entries);
        assert!(list.chars().count() > MAX_MESSAGE_LENGTH);

        let chunks = split_message(&list, MAX_MESSAGE_LENGTH);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|chunk| chunk.chars().count() <= MAX_MESSAGE_LENGTH));
        assert_eq!(chunks.join("\n"), list);
    }

    #[test]
    fn test_split_long_reminder_keeps_every_name() {
        let entries: Vec<_> = (0..400)
            .map(|n| entry(&format!("@member_number_{}", n), 16, 3, 1990))
            .collect();
        let message = build_reminder_message(&entries);

        let chunks = split_message(&message, MAX_MESSAGE_LENGTH);
        assert!(chunks.iter().all(|chunk| chunk.chars().count() <= MAX_MESSAGE_LENGTH));
        let lines: Vec<&str> = chunks.iter().flat_map(|chunk| chunk.lines()).collect();
        for n in 0..400 {
            let name = format!("@member_number_{}", n);
            assert!(lines.contains(&name.as_str()), "{name}");
        }
    }

    #[test]
    fn test_split_message_cuts_overlong_line() {
        let line = "x".repeat(45);
        let chunks = split_message(&line, 20);
        assert_eq!(chunks, ["x".repeat(20), "x".repeat(20), "x".repeat(5)]);
    }

    #[test]
    fn test_help_mentions_date_format() {
        assert!(build_help_message().contains("DD.MM.YYYY"));
        assert!(build_date_format_error().contains("/add"));
    }
}
