//! Backend and browser services.
//!
//! This module provides services for external communication:
//!
//! # Services
//!
//! - [`prediction`] - Image upload to the prediction endpoint
//! - [`auth`] - Login, signup and logout requests
//! - [`preview`] - Local file rendering through `FileReader`
//! - [`navigation`] - Full page redirects

pub mod prediction;
pub mod auth;
pub mod preview;
pub mod navigation;

pub use prediction::*;
pub use auth::*;
pub use preview::*;
pub use navigation::*;
