pub mod health;
pub mod reminder;
pub mod sender;
pub mod timezone;
