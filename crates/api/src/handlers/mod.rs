//! HTTP handlers, one module per resource.

pub mod auth;
pub mod projects;
pub mod summary;
pub mod tasks;
