//! Domain types and validation shared across the Taskory crates.
//!
//! Nothing here talks to the network: this crate holds the error taxonomy,
//! id/timestamp aliases, the fixed project color palette, day-bucket date
//! math, the closed set of task views, and the validation helpers the API
//! layer applies before touching the document store.

pub mod dates;
pub mod error;
pub mod palette;
pub mod project;
pub mod task;
pub mod types;
pub mod views;
