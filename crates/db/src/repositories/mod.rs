//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod item_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use item_repo::ItemRepo;
pub use user_repo::UserRepo;
