//! State operations for the admin TUI
//!
//! `UserStore` holds the local collection; `UserSync` drives it from the
//! remote API through background tasks and records the resulting
//! notifications.

pub mod user_store;
pub mod user_sync;

pub use user_store::UserStore;
pub use user_sync::{SubmitOutcome, SyncMessage, UserSync};
