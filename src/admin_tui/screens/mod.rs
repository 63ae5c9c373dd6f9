//! Screens of the admin TUI

pub mod user_form;
pub mod user_list;

pub use user_form::{UserField, UserForm};
pub use user_list::UserListScreen;
