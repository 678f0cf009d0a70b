pub mod accounts;
pub mod disputes;
pub mod reports;

pub use accounts::{Account, CoreStatus, GlobalState, ServiceRecord, StateDelta};
pub use disputes::{BadReport, OffenderRecord};
pub use reports::{PendingReport, QueueStatus, QueuedReport};
