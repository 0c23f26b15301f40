/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input does not have the `DD.MM.YYYY` shape
    DatePattern,
    /// Input has the right shape but names no calendar day, e.g. `31.02.1990`
    DateOutOfRange,
    ReminderTimeOutOfRange { hour: u32, minute: u32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::DatePattern => write!(f, "Date must be written as DD.MM.YYYY"),
            ValidationError::DateOutOfRange => write!(f, "Date does not exist in the calendar"),
            ValidationError::ReminderTimeOutOfRange { hour, minute } => {
                write!(f, "Invalid reminder time {:02}:{:02}", hour, minute)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
