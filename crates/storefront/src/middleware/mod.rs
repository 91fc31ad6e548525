//! HTTP middleware for the storefront.

pub mod auth;

pub use auth::{CurrentUser, current_user};
