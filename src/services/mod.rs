pub mod check_in;
pub mod code_input;
pub mod dashboard;
pub mod presenter;
pub mod station;

pub use check_in::{AttendanceStatus, CheckInOutcome, CheckInService};
pub use code_input::EntryMethod;
pub use dashboard::{AttendanceDashboard, AttendanceFilter, RoundFilter};
pub use presenter::{RoundStatus, TeamSummary};
pub use station::{CANCELLED_MESSAGE, CheckInStation, LookupTicket, PendingLookup, StationView};
