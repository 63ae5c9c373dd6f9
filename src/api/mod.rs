//! Remote user API
//!
//! The `UserApi` trait is the seam between the admin shell and the backend.
//! `HttpUserApi` talks to the REST service; `LocalUserApi` keeps everything
//! in memory and hands out timestamp ids.

pub mod types;
pub mod errors;
pub mod client;
pub mod local;

pub use types::*;
pub use errors::ApiError;
pub use client::{HttpUserApi, UserApi};
pub use local::LocalUserApi;
