//! User administration terminal UI
//!
//! A form for creating and editing users on top, the paginated user table
//! below, and a notification bar at the bottom.

pub mod app;
pub mod ui;
pub mod events;
pub mod handlers;
pub mod traits;
pub mod components;
pub mod screens;
pub mod operations;

pub use app::{App, Focus};
pub use events::AppEvent;
pub use operations::{SubmitOutcome, SyncMessage, UserStore, UserSync};
pub use screens::{UserField, UserForm, UserListScreen};
