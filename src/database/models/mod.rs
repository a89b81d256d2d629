pub mod subscriber;
pub mod sent_reminder;

pub use subscriber::*;
pub use sent_reminder::*;
