//! Reusable UI components for the admin TUI

pub mod data_table;
pub mod form_field;
pub mod status_display;

pub use data_table::{build_rows, Column, DataTable, TableRows};
pub use form_field::{Form, FormField, FormFieldType};
pub use status_display::{Notice, NoticeKind, StatusDisplay};
