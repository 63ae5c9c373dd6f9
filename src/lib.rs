//! useradmin - terminal admin console for user records served by a REST API

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod validation;
pub mod admin_tui;
