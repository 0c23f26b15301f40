/// Display and input format for birth dates
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Human-readable form of [`DATE_FORMAT`] shown in prompts
pub const DATE_FORMAT_HINT: &str = "DD.MM.YYYY";

/// Character every stored identifier starts with
pub const IDENTIFIER_MARKER: char = '@';

/// Prefix for text commands, matching the slash command names
pub const COMMAND_PREFIX: &str = "/";

/// Longest message Discord accepts, in characters
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Default storage location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://birthdays.db";

/// Default time of the daily reminder check
pub const DEFAULT_REMINDER_HOUR: u32 = 2;
pub const DEFAULT_REMINDER_MINUTE: u32 = 0;

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "birthday_reminder=info";
