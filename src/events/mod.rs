pub mod record;
pub mod source;
pub mod store;

pub use record::{EventRecord, ReminderResult};
pub use source::{DroppedRow, EventSourceError, LoadReport};
pub use store::{EventSnapshot, EventStore};
