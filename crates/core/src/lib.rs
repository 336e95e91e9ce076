//! Pure domain logic for the lendit rental backend.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API layer, and any future CLI tooling.

pub mod booking;
pub mod classify;
pub mod error;
pub mod page;
pub mod types;
