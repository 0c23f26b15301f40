/// Utility modules for common functionality
pub mod datetime;
pub mod messages;
pub mod string_utils;
pub mod validation;
