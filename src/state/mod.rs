// State management module.
// Handles login form, data loading, and UI state for tabs.

pub mod login;
pub mod profile;
pub mod resource;
pub mod schedule;

pub use login::{LoginField, LoginState};
pub use profile::ProfileTabState;
pub use resource::{DataSink, LoadStatus, ResourceState, SharedResource};
pub use schedule::{ScheduleTabState, ScheduleView};
