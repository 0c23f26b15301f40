use std::str::FromStr;

use crate::utils::validation::ValidationError;

/// Wall-clock time of the daily reminder check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTime {
    hour: u32,
    minute: u32,
}

impl ReminderTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::ReminderTimeOutOfRange { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Cron expression firing once a day at this time (e.g. "0 0 2 * * *" for 02:00)
    ///
    /// Format: second minute hour day month weekday
    pub fn cron_expression(&self) -> String {
        format!("0 {} {} * * *", self.minute, self.hour)
    }

    pub fn cron_schedule(&self) -> Result<cron::Schedule, cron::error::Error> {
        cron::Schedule::from_str(&self.cron_expression())
    }
}

impl std::fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
