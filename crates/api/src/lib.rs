//! HTTP surface of the lendit rental backend.

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
