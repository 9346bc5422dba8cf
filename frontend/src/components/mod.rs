//! UI Components for the Fracture Detect application.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with logout
//! - [`Hero`] - Page title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Image selection, preview and prediction result
//! - [`LoginForm`] - Credential form for existing users
//! - [`SignupForm`] - Account creation with confirmation modal
//! - [`PasswordField`] - Password input with visibility toggle

mod header;
mod hero;
mod upload;
mod login;
mod signup;
mod password_field;
mod footer;

pub use header::*;
pub use hero::*;
pub use upload::*;
pub use login::*;
pub use signup::*;
pub use password_field::*;
pub use footer::*;
